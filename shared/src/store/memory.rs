use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use super::{StoredItem, UserKey, UserStore};
use crate::error::StoreError;
use crate::types::{EMAIL_FIELD, USER_ID_FIELD};
use crate::update_expression::UpdateExpression;

type Key = (String, String);

/// In-memory table for local development and testing.
/// Follows DynamoDB semantics for the operations used here: string-typed keys,
/// overwriting puts, upserting updates and idempotent deletes.
#[derive(Clone, Default)]
pub struct MemoryStore {
    items: Arc<RwLock<BTreeMap<Key, StoredItem>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the table with pre-built items, bypassing any conversion.
    pub fn with_items(items: impl IntoIterator<Item = StoredItem>) -> Result<Self, StoreError> {
        let store = Self::new();
        {
            let mut table = store.write()?;
            for item in items {
                table.insert(key_of_item(&item)?, item);
            }
        }
        Ok(store)
    }

    pub fn get(&self, user_id: &str, email: &str) -> Result<Option<StoredItem>, StoreError> {
        Ok(self
            .read()?
            .get(&(user_id.to_string(), email.to_string()))
            .cloned())
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.read()?.is_empty())
    }

    fn read(
        &self,
    ) -> Result<std::sync::RwLockReadGuard<'_, BTreeMap<Key, StoredItem>>, StoreError> {
        self.items
            .read()
            .map_err(|e| StoreError::Lock(e.to_string()))
    }

    fn write(
        &self,
    ) -> Result<std::sync::RwLockWriteGuard<'_, BTreeMap<Key, StoredItem>>, StoreError> {
        self.items
            .write()
            .map_err(|e| StoreError::Lock(e.to_string()))
    }
}

fn key_part(field: &str, value: Option<&AttributeValue>) -> Result<String, StoreError> {
    match value {
        Some(AttributeValue::S(s)) => Ok(s.clone()),
        Some(_) => Err(StoreError::Validation(format!(
            "One or more parameter values were invalid: Type mismatch for key {field} expected: S"
        ))),
        None => Err(StoreError::Validation(format!(
            "One or more parameter values were invalid: Missing the key {field} in the item"
        ))),
    }
}

fn key_of_item(item: &StoredItem) -> Result<Key, StoreError> {
    Ok((
        key_part(USER_ID_FIELD, item.get(USER_ID_FIELD))?,
        key_part(EMAIL_FIELD, item.get(EMAIL_FIELD))?,
    ))
}

fn key_of(key: &UserKey) -> Result<Key, StoreError> {
    Ok((
        key_part(USER_ID_FIELD, Some(&key.user_id))?,
        key_part(EMAIL_FIELD, Some(&key.email))?,
    ))
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn scan_all(&self) -> Result<Vec<StoredItem>, StoreError> {
        Ok(self.read()?.values().cloned().collect())
    }

    async fn put_item(&self, item: StoredItem) -> Result<(), StoreError> {
        let key = key_of_item(&item)?;
        self.write()?.insert(key, item);
        Ok(())
    }

    async fn update_item(
        &self,
        key: &UserKey,
        update: &UpdateExpression,
    ) -> Result<(), StoreError> {
        let table_key = key_of(key)?;

        if let Some(a) = update
            .assignments()
            .iter()
            .find(|a| a.field == USER_ID_FIELD || a.field == EMAIL_FIELD)
        {
            return Err(StoreError::Validation(format!(
                "One or more parameter values were invalid: Cannot update attribute {}. This attribute is part of the key",
                a.field
            )));
        }

        let mut table = self.write()?;
        let item = table.entry(table_key).or_insert_with(|| key.to_key_map());
        for assignment in update.assignments() {
            item.insert(assignment.field.clone(), assignment.value.clone());
        }
        Ok(())
    }

    async fn delete_item(&self, key: &UserKey) -> Result<(), StoreError> {
        let table_key = key_of(key)?;
        self.write()?.remove(&table_key);
        Ok(())
    }
}
