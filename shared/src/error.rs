use serde_json::json;
use thiserror::Error;

use crate::response::build_response;
use crate::types::ApiResponse;

/// Rejections caused by the caller's input. Always reported as 400.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ClientInputError {
    #[error("Invalid JSON in request body")]
    InvalidJson,
    #[error("Missing required fields: user_id and email")]
    MissingRequiredFields,
    #[error("No fields to update")]
    NoFieldsToUpdate,
    #[error("Missing required query parameters: user_id and email")]
    MissingQueryParameters,
    #[error("Unsupported HTTP method")]
    UnsupportedMethod,
}

/// Failures surfaced by a storage backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The remote service rejected or failed the call. Carries the rendered SDK error.
    #[error("{0}")]
    Service(String),
    /// The request was well-formed JSON but not acceptable to the table.
    #[error("ValidationException: {0}")]
    Validation(String),
    #[error("Lock error: {0}")]
    Lock(String),
}

/// Everything `handle` can fail with before it turns the failure into a response.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    ClientInput(#[from] ClientInputError),
    #[error(transparent)]
    Storage(#[from] StoreError),
    #[error("{0}")]
    Unexpected(String),
}

impl ApiError {
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::ClientInput(_) => 400,
            ApiError::Storage(_) | ApiError::Unexpected(_) => 500,
        }
    }

    /// Renders the error as a response. 500s carry the raw error text for diagnostics.
    pub fn into_response(self) -> ApiResponse {
        let status = self.status_code();
        let body = match &self {
            ApiError::ClientInput(e) => json!({ "message": e.to_string() }),
            ApiError::Storage(e) => json!({
                "message": "Database error",
                "error": e.to_string(),
            }),
            ApiError::Unexpected(msg) => json!({
                "message": "Internal server error",
                "error": msg,
            }),
        };
        build_response(status, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_input_errors_are_bad_requests() {
        let resp = ApiError::from(ClientInputError::NoFieldsToUpdate).into_response();
        assert_eq!(resp.status_code, 400);
        assert_eq!(
            resp.json().unwrap(),
            json!({ "message": "No fields to update" })
        );
    }

    #[test]
    fn storage_errors_carry_the_raw_error_text() {
        let err = StoreError::Service("ResourceNotFoundException: table missing".to_string());
        let resp = ApiError::from(err).into_response();
        assert_eq!(resp.status_code, 500);
        assert_eq!(
            resp.json().unwrap(),
            json!({
                "message": "Database error",
                "error": "ResourceNotFoundException: table missing",
            })
        );
    }

    #[test]
    fn unexpected_errors_are_internal() {
        let resp = ApiError::Unexpected("boom".to_string()).into_response();
        assert_eq!(resp.status_code, 500);
        assert_eq!(resp.json().unwrap()["message"], "Internal server error");
        assert_eq!(resp.json().unwrap()["error"], "boom");
    }
}
