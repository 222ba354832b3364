use serde_json::{json, Value};

use crate::decimal::{items_to_json, json_to_attribute, record_to_item};
use crate::error::{ApiError, ClientInputError};
use crate::response::build_response;
use crate::store::{UserKey, UserStore};
use crate::types::{ApiRequest, ApiResponse, Method, CREATED_AT_FIELD};
use crate::update_expression::UpdateExpressionBuilder;
use crate::validation::{parse_user_record, require_key_params};

/// Routes one request to at most one store call and always returns a response.
pub async fn handle(store: &dyn UserStore, request: &ApiRequest) -> ApiResponse {
    tracing::info!(
        "Received request - Method: {} Body: {} Query: {:?}",
        request.http_method,
        request.body.is_some(),
        request.query_string_parameters
    );

    match dispatch(store, request).await {
        Ok(resp) => resp,
        Err(e) => {
            match &e {
                ApiError::ClientInput(reason) => tracing::warn!("Rejected request: {}", reason),
                ApiError::Storage(err) => tracing::error!("DynamoDB error: {}", err),
                ApiError::Unexpected(msg) => tracing::error!("Unexpected error: {}", msg),
            }
            e.into_response()
        }
    }
}

async fn dispatch(
    store: &dyn UserStore,
    request: &ApiRequest,
) -> Result<ApiResponse, ApiError> {
    let method =
        Method::parse(&request.http_method).ok_or(ClientInputError::UnsupportedMethod)?;

    match method {
        Method::Options => Ok(build_response(200, &json!({ "message": "CORS enabled" }))),
        Method::Get => list_users(store).await,
        Method::Post => create_user(store, request.body.as_deref()).await,
        Method::Put => update_user(store, request.body.as_deref()).await,
        Method::Delete => delete_user(store, request).await,
    }
}

/// GET: full table scan with decimals normalized to floats.
pub async fn list_users(store: &dyn UserStore) -> Result<ApiResponse, ApiError> {
    let items = store.scan_all().await?;
    let items = items_to_json(&items)?;

    Ok(build_response(
        200,
        &json!({
            "Items": items,
            "message": "Users retrieved successfully",
        }),
    ))
}

/// A missing body is an internal fault (500); an empty one is malformed JSON (400).
fn require_body(body: Option<&str>) -> Result<&str, ApiError> {
    body.ok_or_else(|| ApiError::Unexpected("request body is missing".to_string()))
}

/// POST: stamp `createdAt` and put the record, overwriting any existing item with the same key.
pub async fn create_user(
    store: &dyn UserStore,
    body: Option<&str>,
) -> Result<ApiResponse, ApiError> {
    let mut user = parse_user_record(require_body(body)?)?.into_record();

    let now = chrono::Utc::now().to_rfc3339();
    user.insert(CREATED_AT_FIELD.to_string(), Value::String(now));

    store.put_item(record_to_item(user.clone())).await?;

    Ok(build_response(
        201,
        &json!({
            "message": "User created successfully",
            "user": user,
        }),
    ))
}

/// PUT: set every non-key field on the addressed item.
pub async fn update_user(
    store: &dyn UserStore,
    body: Option<&str>,
) -> Result<ApiResponse, ApiError> {
    let user = parse_user_record(require_body(body)?)?;

    let update = user
        .fields
        .into_iter()
        .fold(UpdateExpressionBuilder::new(), |builder, (field, value)| {
            builder.set(field, json_to_attribute(value))
        })
        .build()
        .ok_or(ClientInputError::NoFieldsToUpdate)?;
    let key = UserKey::new(json_to_attribute(user.user_id), json_to_attribute(user.email));

    store.update_item(&key, &update).await?;

    Ok(build_response(
        200,
        &json!({ "message": "User updated successfully" }),
    ))
}

/// DELETE: remove by the key pair in the query string. Deleting a missing user succeeds.
pub async fn delete_user(
    store: &dyn UserStore,
    request: &ApiRequest,
) -> Result<ApiResponse, ApiError> {
    let (user_id, email) = require_key_params(request.query_string_parameters.as_ref())?;

    store
        .delete_item(&UserKey::from_strings(user_id, email))
        .await?;

    Ok(build_response(
        200,
        &json!({ "message": "User deleted successfully" }),
    ))
}
