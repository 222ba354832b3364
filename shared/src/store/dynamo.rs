use async_trait::async_trait;
use aws_sdk_dynamodb::{error::DisplayErrorContext, Client as DynamoClient};

use super::{StoredItem, UserKey, UserStore};
use crate::error::StoreError;
use crate::update_expression::UpdateExpression;

/// DynamoDB-backed table. The client is built once per process and reused.
#[derive(Clone, Debug)]
pub struct DynamoStore {
    client: DynamoClient,
    table_name: String,
}

impl DynamoStore {
    pub fn new(client: DynamoClient, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }
}

fn service_error<E: std::error::Error>(e: E) -> StoreError {
    StoreError::Service(DisplayErrorContext(&e).to_string())
}

#[async_trait]
impl UserStore for DynamoStore {
    async fn scan_all(&self) -> Result<Vec<StoredItem>, StoreError> {
        let output = self
            .client
            .scan()
            .table_name(&self.table_name)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("DynamoDB scan failed on {}: {}", self.table_name, e);
                service_error(e)
            })?;

        let items = output.items.unwrap_or_default();
        tracing::info!("Scanned {} items from {}", items.len(), self.table_name);
        Ok(items)
    }

    async fn put_item(&self, item: StoredItem) -> Result<(), StoreError> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .send()
            .await
            .map_err(|e| {
                tracing::error!("DynamoDB put_item failed on {}: {}", self.table_name, e);
                service_error(e)
            })?;
        Ok(())
    }

    async fn update_item(
        &self,
        key: &UserKey,
        update: &UpdateExpression,
    ) -> Result<(), StoreError> {
        self.client
            .update_item()
            .table_name(&self.table_name)
            .set_key(Some(key.to_key_map()))
            .update_expression(update.expression())
            .set_expression_attribute_names(Some(update.attribute_names()))
            .set_expression_attribute_values(Some(update.attribute_values()))
            .send()
            .await
            .map_err(|e| {
                tracing::error!("DynamoDB update_item failed on {}: {}", self.table_name, e);
                service_error(e)
            })?;
        Ok(())
    }

    async fn delete_item(&self, key: &UserKey) -> Result<(), StoreError> {
        self.client
            .delete_item()
            .table_name(&self.table_name)
            .set_key(Some(key.to_key_map()))
            .send()
            .await
            .map_err(|e| {
                tracing::error!("DynamoDB delete_item failed on {}: {}", self.table_name, e);
                service_error(e)
            })?;
        Ok(())
    }
}
