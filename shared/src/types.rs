use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Partition key of the users table.
pub const USER_ID_FIELD: &str = "user_id";
/// Sort key of the users table.
pub const EMAIL_FIELD: &str = "email";
/// Timestamp injected on creation.
pub const CREATED_AT_FIELD: &str = "createdAt";

/// A user record as received from callers: field name to arbitrary JSON value.
pub type UserRecord = serde_json::Map<String, serde_json::Value>;

// ========== REQUEST ==========
/// Inbound request descriptor, as produced by the HTTP gateway.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ApiRequest {
    pub http_method: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub query_string_parameters: Option<HashMap<String, String>>,
}

impl ApiRequest {
    pub fn new(http_method: impl Into<String>) -> Self {
        Self {
            http_method: http_method.into(),
            ..Self::default()
        }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_query(mut self, params: &[(&str, &str)]) -> Self {
        self.query_string_parameters = Some(
            params
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        );
        self
    }
}

/// Methods the dispatcher knows how to route. Matching is exact and case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Options,
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "OPTIONS" => Some(Method::Options),
            "GET" => Some(Method::Get),
            "POST" => Some(Method::Post),
            "PUT" => Some(Method::Put),
            "DELETE" => Some(Method::Delete),
            _ => None,
        }
    }
}

// ========== RESPONSE ==========
/// Outbound response descriptor consumed by the HTTP gateway.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl ApiResponse {
    /// Parses the JSON body back into a value. Mostly useful for callers inspecting payloads.
    pub fn json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::from_str(&self.body)
    }
}
