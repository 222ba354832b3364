use aws_sdk_dynamodb::Client as DynamoClient;
use lambda_http::{run, service_fn, tracing, Error, Request};
use std::sync::Arc;
use users_shared::{config::Config, AppState};

mod http_handler;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing::init_default_subscriber();

    // Initialize configuration and the DynamoDB client once at startup
    let config = Config::from_env();
    let sdk_config = aws_config::load_from_env().await;
    let state = AppState::from_config(config, DynamoClient::new(&sdk_config));

    run(service_fn(move |event: Request| {
        let state = Arc::clone(&state);
        async move { http_handler::function_handler(event, state).await }
    }))
    .await
}
