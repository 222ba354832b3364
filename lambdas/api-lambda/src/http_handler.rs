use lambda_http::{Body, Error, Request, RequestExt, Response};
use std::collections::HashMap;
use std::sync::Arc;
use users_shared::{
    types::{ApiRequest, ApiResponse},
    AppState,
};

/// Main Lambda handler - adapts the gateway event and hands it to the users dispatcher
pub(crate) async fn function_handler(
    event: Request,
    state: Arc<AppState>,
) -> Result<Response<Body>, Error> {
    tracing::info!(
        "Users API invoked - Method: {} Path: {}",
        event.method(),
        event.uri().path()
    );

    let request = to_api_request(&event);
    let response = state.handle(&request).await;

    tracing::info!("Responding with status {}", response.status_code);
    into_http_response(response)
}

/// Extracts the method, text body and query parameters the dispatcher works from.
pub(crate) fn to_api_request(event: &Request) -> ApiRequest {
    let body = match event.body() {
        Body::Empty => None,
        Body::Text(text) => Some(text.clone()),
        Body::Binary(bytes) => Some(String::from_utf8_lossy(bytes).into_owned()),
    };

    // Last value wins when a key is repeated, as in the gateway's single-value map
    let query_string_parameters = event
        .query_string_parameters_ref()
        .map(|params| {
            params
                .iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect::<HashMap<_, _>>()
        })
        .filter(|map| !map.is_empty());

    ApiRequest {
        http_method: event.method().as_str().to_string(),
        body,
        query_string_parameters,
    }
}

pub(crate) fn into_http_response(response: ApiResponse) -> Result<Response<Body>, Error> {
    let mut builder = Response::builder().status(response.status_code);
    for (name, value) in &response.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    Ok(builder.body(Body::Text(response.body)).map_err(Box::new)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lambda_http::http;
    use users_shared::{config::Config, store::MemoryStore};

    fn state() -> (Arc<AppState>, MemoryStore) {
        let store = MemoryStore::new();
        let config = Config::from_lookup(|key| (key == "STORE_BACKEND").then(|| "memory".to_string()));
        (AppState::new(Arc::new(store.clone()), config), store)
    }

    fn request(method: &str, body: Body) -> Request {
        http::Request::builder()
            .method(method)
            .uri("/users")
            .body(body)
            .unwrap()
    }

    fn body_json(resp: &Response<Body>) -> serde_json::Value {
        match resp.body() {
            Body::Text(text) => serde_json::from_str(text).unwrap(),
            other => panic!("expected a text body, got {other:?}"),
        }
    }

    #[test]
    fn converts_method_body_and_query() {
        let event = request("DELETE", Body::Text("{}".to_string())).with_query_string_parameters(
            HashMap::from([
                ("user_id".to_string(), "u1".to_string()),
                ("email".to_string(), "a@x.com".to_string()),
            ]),
        );

        let api = to_api_request(&event);
        assert_eq!(api.http_method, "DELETE");
        assert_eq!(api.body.as_deref(), Some("{}"));
        let params = api.query_string_parameters.unwrap();
        assert_eq!(params["user_id"], "u1");
        assert_eq!(params["email"], "a@x.com");
    }

    #[test]
    fn repeated_query_keys_keep_the_last_value() {
        let event = request("DELETE", Body::Empty).with_query_string_parameters(HashMap::from([
            (
                "user_id".to_string(),
                vec!["u1".to_string(), "u2".to_string()],
            ),
            ("email".to_string(), vec!["a@x.com".to_string()]),
        ]));

        let params = to_api_request(&event).query_string_parameters.unwrap();
        assert_eq!(params["user_id"], "u2");
        assert_eq!(params["email"], "a@x.com");
    }

    #[test]
    fn empty_body_and_no_query_are_absent() {
        let api = to_api_request(&request("GET", Body::Empty));
        assert_eq!(api.body, None);
        assert_eq!(api.query_string_parameters, None);
    }

    #[test]
    fn binary_bodies_are_read_as_text() {
        let api = to_api_request(&request("POST", Body::Binary(br#"{"a":1}"#.to_vec())));
        assert_eq!(api.body.as_deref(), Some(r#"{"a":1}"#));
    }

    #[tokio::test]
    async fn post_then_get_through_the_lambda_surface() {
        let (state, store) = state();

        let created = function_handler(
            request(
                "POST",
                Body::Text(r#"{"user_id":"u1","email":"a@x.com","name":"Ann"}"#.to_string()),
            ),
            Arc::clone(&state),
        )
        .await
        .unwrap();
        assert_eq!(created.status(), 201);
        assert_eq!(
            created.headers()["Access-Control-Allow-Methods"],
            "OPTIONS,POST,GET,PUT,DELETE"
        );
        assert_eq!(created.headers()["Content-Type"], "application/json");
        assert_eq!(body_json(&created)["user"]["name"], "Ann");
        assert_eq!(store.len().unwrap(), 1);

        let listed = function_handler(request("GET", Body::Empty), state)
            .await
            .unwrap();
        assert_eq!(listed.status(), 200);
        assert_eq!(body_json(&listed)["Items"][0]["email"], "a@x.com");
    }

    #[tokio::test]
    async fn delete_without_query_is_a_bad_request() {
        let (state, _store) = state();
        let resp = function_handler(request("DELETE", Body::Empty), state)
            .await
            .unwrap();
        assert_eq!(resp.status(), 400);
        assert_eq!(resp.headers()["Access-Control-Allow-Origin"], "*");
    }
}
