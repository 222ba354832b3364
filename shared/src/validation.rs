//! Pure input checks. Nothing here touches storage; every rejection is a
//! [`ClientInputError`] the dispatcher turns into a 400.

use serde_json::Value;
use std::collections::HashMap;

use crate::error::ClientInputError;
use crate::types::{UserRecord, EMAIL_FIELD, USER_ID_FIELD};

/// A user record split into its key pair and the remaining fields.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyedRecord {
    pub user_id: Value,
    pub email: Value,
    pub fields: UserRecord,
}

impl KeyedRecord {
    /// Puts the key pair back, yielding the record as the caller sent it.
    pub fn into_record(self) -> UserRecord {
        let mut record = self.fields;
        record.insert(USER_ID_FIELD.to_string(), self.user_id);
        record.insert(EMAIL_FIELD.to_string(), self.email);
        record
    }
}

/// Parses the body text as JSON. An empty string is malformed JSON like any other.
pub fn parse_body(body: &str) -> Result<Value, ClientInputError> {
    serde_json::from_str(body).map_err(|_| ClientInputError::InvalidJson)
}

/// Requires a JSON object holding both key fields.
pub fn require_key_fields(value: Value) -> Result<KeyedRecord, ClientInputError> {
    let Value::Object(mut fields) = value else {
        return Err(ClientInputError::MissingRequiredFields);
    };
    match (fields.remove(USER_ID_FIELD), fields.remove(EMAIL_FIELD)) {
        (Some(user_id), Some(email)) => Ok(KeyedRecord {
            user_id,
            email,
            fields,
        }),
        _ => Err(ClientInputError::MissingRequiredFields),
    }
}

/// Parse then validate, in that order: bad JSON wins over missing fields.
pub fn parse_user_record(body: &str) -> Result<KeyedRecord, ClientInputError> {
    require_key_fields(parse_body(body)?)
}

/// Extracts `(user_id, email)` from query parameters. Absent and incomplete
/// parameter maps are rejected identically.
pub fn require_key_params(
    params: Option<&HashMap<String, String>>,
) -> Result<(String, String), ClientInputError> {
    let params = params.ok_or(ClientInputError::MissingQueryParameters)?;
    match (params.get(USER_ID_FIELD), params.get(EMAIL_FIELD)) {
        (Some(user_id), Some(email)) => Ok((user_id.clone(), email.clone())),
        _ => Err(ClientInputError::MissingQueryParameters),
    }
}
