use crate::models::EndpointConfig;
use async_trait::async_trait;
use aws_sdk_dynamodb::Client as DynamoClient;
use aws_sdk_dynamodb::types::AttributeValue;
use service_core::error::AppError;
use std::collections::HashMap;

/// Partition key under which the admin process stores endpoint records.
const CONFIG_PARTITION: &str = "APIConfig";

/// Endpoint configuration table seam. `query(None)` returns every record for
/// the partition; `query(Some(prefix))` narrows to endpoints whose sort key
/// begins with the prefix. Records come back in ascending sort-key order
/// either way.
#[async_trait]
pub trait EndpointStore: Send + Sync {
    async fn query(&self, prefix: Option<&str>) -> Result<Vec<EndpointConfig>, AppError>;
}

pub struct DynamoEndpointStore {
    client: DynamoClient,
    table: String,
}

impl DynamoEndpointStore {
    pub fn new(client: DynamoClient, table: String) -> Self {
        Self { client, table }
    }
}

#[async_trait]
impl EndpointStore for DynamoEndpointStore {
    async fn query(&self, prefix: Option<&str>) -> Result<Vec<EndpointConfig>, AppError> {
        let mut request = self
            .client
            .query()
            .table_name(&self.table)
            .scan_index_forward(true)
            .expression_attribute_values(":pk", AttributeValue::S(CONFIG_PARTITION.to_string()));

        request = match prefix {
            None => request.key_condition_expression("PK = :pk"),
            Some(prefix) => request
                .key_condition_expression("PK = :pk AND begins_with(SM_ENDPOINT, :sk)")
                .expression_attribute_values(":sk", AttributeValue::S(prefix.to_string())),
        };

        let response = request.send().await.map_err(|e| {
            AppError::InternalError(anyhow::anyhow!(
                "config table query failed: {}",
                e.into_service_error()
            ))
        })?;

        Ok(response.items().iter().map(record_from_item).collect())
    }
}

fn record_from_item(item: &HashMap<String, AttributeValue>) -> EndpointConfig {
    let attr = |name: &str| {
        item.get(name)
            .and_then(|value| value.as_s().ok())
            .cloned()
            .unwrap_or_default()
    };
    EndpointConfig {
        endpoint: attr("SM_ENDPOINT"),
        label: attr("LABEL"),
        hit: attr("HIT"),
    }
}

/// In-memory store backing the local backend and the integration tests.
pub struct MemoryEndpointStore {
    records: Vec<EndpointConfig>,
}

impl MemoryEndpointStore {
    pub fn new(mut records: Vec<EndpointConfig>) -> Self {
        records.sort_by(|a, b| a.endpoint.cmp(&b.endpoint));
        Self { records }
    }
}

#[async_trait]
impl EndpointStore for MemoryEndpointStore {
    async fn query(&self, prefix: Option<&str>) -> Result<Vec<EndpointConfig>, AppError> {
        Ok(self
            .records
            .iter()
            .filter(|record| prefix.is_none_or(|p| record.endpoint.starts_with(p)))
            .cloned()
            .collect())
    }
}
