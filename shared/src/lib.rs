pub mod config;
pub mod decimal;
pub mod error;
pub mod response;
pub mod store;
pub mod types;
pub mod update_expression;
pub mod users;
pub mod validation;

use aws_sdk_dynamodb::Client as DynamoClient;
use std::sync::Arc;

use config::{Config, StoreBackend};
use store::{DynamoStore, MemoryStore, UserStore};

/// Shared application state, built once per cold start.
pub struct AppState {
    pub store: Arc<dyn UserStore>,
    pub config: Config,
}

impl AppState {
    pub fn new(store: Arc<dyn UserStore>, config: Config) -> Arc<Self> {
        Arc::new(Self { store, config })
    }

    /// Picks the backend named by `config`. The DynamoDB client is only used for that backend.
    pub fn from_config(config: Config, dynamo_client: DynamoClient) -> Arc<Self> {
        let store: Arc<dyn UserStore> = match config.backend {
            StoreBackend::Memory => {
                tracing::info!("Using in-memory store backend");
                Arc::new(MemoryStore::new())
            }
            StoreBackend::DynamoDb => {
                tracing::info!("Using DynamoDB table {}", config.table_name);
                Arc::new(DynamoStore::new(dynamo_client, config.table_name.clone()))
            }
        };
        Self::new(store, config)
    }

    pub async fn handle(&self, request: &types::ApiRequest) -> types::ApiResponse {
        users::handle(self.store.as_ref(), request).await
    }
}
