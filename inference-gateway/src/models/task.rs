use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Pending,
    Completed,
    Failed,
}

/// The document the inference backend writes at the derived output key once
/// a job finishes.
#[derive(Debug, Deserialize)]
pub struct ResultDocument {
    pub result: Vec<String>,
}

impl ResultDocument {
    pub fn parse(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    /// Returns the result references with the store-qualified `s3://<bucket>`
    /// prefix removed, so clients see store-relative paths.
    pub fn relative_images(&self, bucket_uri: &str) -> Vec<String> {
        self.result
            .iter()
            .map(|image| {
                image
                    .strip_prefix(bucket_uri)
                    .unwrap_or(image)
                    .to_string()
            })
            .collect()
    }
}
