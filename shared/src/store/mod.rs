//! Storage seam for the users table.
//!
//! The dispatcher only ever talks to [`UserStore`], so the DynamoDB-backed store
//! used in production can be swapped for [`MemoryStore`] locally and in tests.

pub mod dynamo;
pub mod memory;

use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use std::collections::HashMap;

use crate::error::StoreError;
use crate::types::{EMAIL_FIELD, USER_ID_FIELD};
use crate::update_expression::UpdateExpression;

pub use dynamo::DynamoStore;
pub use memory::MemoryStore;

/// An item in its storage-native form.
pub type StoredItem = HashMap<String, AttributeValue>;

/// Composite `(user_id, email)` key.
#[derive(Debug, Clone, PartialEq)]
pub struct UserKey {
    pub user_id: AttributeValue,
    pub email: AttributeValue,
}

impl UserKey {
    pub fn new(user_id: AttributeValue, email: AttributeValue) -> Self {
        Self { user_id, email }
    }

    pub fn from_strings(user_id: impl Into<String>, email: impl Into<String>) -> Self {
        Self::new(
            AttributeValue::S(user_id.into()),
            AttributeValue::S(email.into()),
        )
    }

    pub fn to_key_map(&self) -> StoredItem {
        HashMap::from([
            (USER_ID_FIELD.to_string(), self.user_id.clone()),
            (EMAIL_FIELD.to_string(), self.email.clone()),
        ])
    }
}

/// The four operations the dispatcher needs from a table. Each call is a single
/// round trip; nothing here retries.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Unfiltered, unpaginated read of the table.
    async fn scan_all(&self) -> Result<Vec<StoredItem>, StoreError>;

    /// Insert or overwrite an item.
    async fn put_item(&self, item: StoredItem) -> Result<(), StoreError>;

    /// Apply a `SET` update to the item at `key`, creating it if absent.
    async fn update_item(&self, key: &UserKey, update: &UpdateExpression)
        -> Result<(), StoreError>;

    /// Remove the item at `key`. Removing a missing item succeeds.
    async fn delete_item(&self, key: &UserKey) -> Result<(), StoreError>;
}
