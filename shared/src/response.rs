use serde::Serialize;
use std::collections::HashMap;

use crate::types::ApiResponse;

/// Fixed header set carried by every response, whatever the status.
pub const RESPONSE_HEADERS: [(&str, &str); 4] = [
    ("Content-Type", "application/json"),
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Headers", "Content-Type,Authorization"),
    ("Access-Control-Allow-Methods", "OPTIONS,POST,GET,PUT,DELETE"),
];

pub fn cors_headers() -> HashMap<String, String> {
    RESPONSE_HEADERS
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Build a response descriptor with a JSON-encoded body and the CORS header set.
pub fn build_response<T: Serialize + ?Sized>(status_code: u16, body: &T) -> ApiResponse {
    let body = match serde_json::to_string(body) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("Failed to serialize response body: {}", e);
            return ApiResponse {
                status_code: 500,
                headers: cors_headers(),
                body: serde_json::json!({
                    "message": "Internal server error",
                    "error": e.to_string(),
                })
                .to_string(),
            };
        }
    };

    ApiResponse {
        status_code,
        headers: cors_headers(),
        body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn every_response_carries_the_cors_headers() {
        for status in [200, 201, 400, 500] {
            let resp = build_response(status, &json!({ "message": "x" }));
            assert_eq!(resp.status_code, status);
            assert_eq!(resp.headers.len(), 4);
            assert_eq!(resp.headers["Content-Type"], "application/json");
            assert_eq!(resp.headers["Access-Control-Allow-Origin"], "*");
            assert_eq!(
                resp.headers["Access-Control-Allow-Headers"],
                "Content-Type,Authorization"
            );
            assert_eq!(
                resp.headers["Access-Control-Allow-Methods"],
                "OPTIONS,POST,GET,PUT,DELETE"
            );
        }
    }

    #[test]
    fn body_is_json_encoded() {
        let resp = build_response(200, &json!({ "message": "CORS enabled" }));
        assert_eq!(resp.body, r#"{"message":"CORS enabled"}"#);
    }
}
