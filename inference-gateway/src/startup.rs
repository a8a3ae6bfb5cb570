use crate::config::{Backend, GatewayConfig};
use crate::handlers;
use crate::services::{
    DynamoEndpointStore, EndpointStore, InferenceClient, LocalInference, LocalStorage,
    MemoryEndpointStore, S3Storage, SageMakerInference, Storage,
};
use axum::{
    Router,
    middleware::from_fn,
    routing::{get, post},
};
use service_core::error::AppError;
use service_core::middleware::tracing::request_id_middleware;
use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub config: GatewayConfig,
    pub storage: Arc<dyn Storage>,
    pub endpoints: Arc<dyn EndpointStore>,
    pub inference: Arc<dyn InferenceClient>,
}

pub struct Application {
    port: u16,
    server: Box<dyn std::future::Future<Output = std::io::Result<()>> + Send + Unpin>,
}

impl Application {
    pub async fn build(config: GatewayConfig) -> Result<Self, AppError> {
        let (storage, endpoints, inference): (
            Arc<dyn Storage>,
            Arc<dyn EndpointStore>,
            Arc<dyn InferenceClient>,
        ) = match config.backend {
            Backend::Aws => {
                let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
                if let Some(region) = config.aws.region.clone() {
                    loader = loader.region(aws_config::Region::new(region));
                }
                let sdk_config = loader.load().await;

                (
                    Arc::new(S3Storage::new(
                        aws_sdk_s3::Client::new(&sdk_config),
                        config.storage.bucket.clone(),
                    )),
                    Arc::new(DynamoEndpointStore::new(
                        aws_sdk_dynamodb::Client::new(&sdk_config),
                        config.config_table.clone(),
                    )),
                    Arc::new(SageMakerInference::new(aws_sdk_sagemakerruntime::Client::new(
                        &sdk_config,
                    ))),
                )
            }
            Backend::Local => (
                Arc::new(
                    LocalStorage::new(&config.storage.local_path)
                        .await
                        .map_err(|e| {
                            tracing::error!(
                                "Failed to initialize local storage at {}: {}",
                                config.storage.local_path,
                                e
                            );
                            e
                        })?,
                ),
                Arc::new(MemoryEndpointStore::new(Vec::new())),
                Arc::new(LocalInference::new(
                    config.storage.bucket.clone(),
                    config.storage.prefix.clone(),
                )),
            ),
        };

        Self::build_with_services(config, storage, endpoints, inference).await
    }

    /// Injection point used by the integration tests.
    pub async fn build_with_services(
        config: GatewayConfig,
        storage: Arc<dyn Storage>,
        endpoints: Arc<dyn EndpointStore>,
        inference: Arc<dyn InferenceClient>,
    ) -> Result<Self, AppError> {
        let state = AppState {
            config: config.clone(),
            storage,
            endpoints,
            inference,
        };

        let app = build_router(state);

        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Listening on {}", port);

        let server = axum::serve(listener, app);

        Ok(Self {
            port,
            server: Box::new(server.into_future()),
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.server.await
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::greeting))
        .route("/health", get(handlers::health_check))
        .route("/async_handler", post(handlers::submit_task))
        .route("/config", get(handlers::list_config))
        .route("/task/:task_id", get(handlers::get_task))
        .route("/auth", post(handlers::authenticate))
        .route("/upload_handler", post(handlers::upload_image))
        // Browser-facing gateway: gallery frontends call this from anywhere.
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}
