use inference_gateway::config::{Backend, GatewayConfig};
use inference_gateway::models::{EndpointConfig, JobId};
use inference_gateway::services::{
    EndpointStore, InferenceClient, LocalInference, LocalStorage, MemoryEndpointStore, Storage,
};
use inference_gateway::startup::Application;
use std::sync::Arc;
use uuid::Uuid;

pub const TEST_ADMIN_TOKEN: &str = "test-admin-token";
pub const TEST_BUCKET: &str = "test-gallery";

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub config: GatewayConfig,
    pub storage: Arc<dyn Storage>,
    pub storage_path: String,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with_endpoints(Vec::new()).await
    }

    pub async fn spawn_with_endpoints(records: Vec<EndpointConfig>) -> Self {
        let config = Self::test_config();
        let inference: Arc<dyn InferenceClient> = Arc::new(LocalInference::new(
            config.storage.bucket.clone(),
            config.storage.prefix.clone(),
        ));
        Self::spawn_with_services(config, records, inference).await
    }

    pub async fn spawn_with_services(
        config: GatewayConfig,
        records: Vec<EndpointConfig>,
        inference: Arc<dyn InferenceClient>,
    ) -> Self {
        let storage: Arc<dyn Storage> = Arc::new(
            LocalStorage::new(&config.storage.local_path)
                .await
                .expect("Failed to initialize test storage"),
        );
        let endpoints: Arc<dyn EndpointStore> = Arc::new(MemoryEndpointStore::new(records));

        let app = Application::build_with_services(
            config.clone(),
            storage.clone(),
            endpoints,
            inference,
        )
        .await
        .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);
        let storage_path = config.storage.local_path.clone();

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        TestApp {
            address,
            port,
            config,
            storage,
            storage_path,
        }
    }

    pub fn test_config() -> GatewayConfig {
        let mut config = GatewayConfig::load().expect("Failed to load configuration");
        config.common.port = 0; // Random port for testing
        config.backend = Backend::Local;
        config.storage.bucket = TEST_BUCKET.to_string();
        config.storage.local_path = format!("target/test-storage-{}", Uuid::new_v4());
        config.admin_token = TEST_ADMIN_TOKEN.to_string();
        config
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    /// Writes a result document (or arbitrary bytes) where the backend would
    /// put it for the given task.
    pub async fn write_result(&self, task_id: JobId, body: &[u8]) {
        let key = self.config.storage.output_key(task_id);
        self.storage
            .put(&key, body.to_vec(), "application/json")
            .await
            .expect("Failed to write result object");
    }

    pub async fn cleanup(&self) {
        let _ = tokio::fs::remove_dir_all(&self.storage_path).await;
    }
}

pub fn generation_request() -> serde_json::Value {
    serde_json::json!({
        "prompt": "cat",
        "steps": 20,
        "sampler": "euler",
        "seed": 1,
        "height": 512,
        "width": 512,
        "count": 1
    })
}

pub fn endpoint_record(endpoint: &str, label: &str) -> EndpointConfig {
    EndpointConfig {
        endpoint: endpoint.to_string(),
        label: label.to_string(),
        hit: String::new(),
    }
}
