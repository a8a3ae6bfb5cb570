use crate::models::JobId;
use async_trait::async_trait;
use aws_sdk_sagemakerruntime::Client as SageMakerClient;
use service_core::error::AppError;

/// Acknowledgment returned by the backend for an accepted submission.
#[derive(Debug, Clone)]
pub struct SubmissionAck {
    /// Store URI the backend will write the result document to.
    pub output_location: String,
}

/// Asynchronous inference backend seam. The job id is handed to the backend
/// as the inference id, so the output object it names and the staged input
/// share one identifier.
#[async_trait]
pub trait InferenceClient: Send + Sync {
    async fn submit(
        &self,
        endpoint: &str,
        input_location: &str,
        job_id: JobId,
    ) -> Result<SubmissionAck, AppError>;
}

pub struct SageMakerInference {
    client: SageMakerClient,
}

impl SageMakerInference {
    pub fn new(client: SageMakerClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl InferenceClient for SageMakerInference {
    async fn submit(
        &self,
        endpoint: &str,
        input_location: &str,
        job_id: JobId,
    ) -> Result<SubmissionAck, AppError> {
        let response = self
            .client
            .invoke_endpoint_async()
            .endpoint_name(endpoint)
            .input_location(input_location)
            .inference_id(job_id.to_string())
            .send()
            .await
            .map_err(|e| {
                AppError::BadGateway(format!(
                    "inference submission rejected: {}",
                    e.into_service_error()
                ))
            })?;

        let output_location = response
            .output_location()
            .map(str::to_string)
            .ok_or_else(|| {
                AppError::BadGateway("inference backend returned no output location".to_string())
            })?;

        Ok(SubmissionAck { output_location })
    }
}

/// Local backend: acknowledges immediately with the output location the
/// polling flow derives, without contacting any backend. Jobs stay pending
/// until something writes the result document.
pub struct LocalInference {
    bucket: String,
    prefix: String,
}

impl LocalInference {
    pub fn new(bucket: String, prefix: String) -> Self {
        Self { bucket, prefix }
    }
}

#[async_trait]
impl InferenceClient for LocalInference {
    async fn submit(
        &self,
        _endpoint: &str,
        _input_location: &str,
        job_id: JobId,
    ) -> Result<SubmissionAck, AppError> {
        Ok(SubmissionAck {
            output_location: format!("s3://{}/{}/out/{}.out", self.bucket, self.prefix, job_id),
        })
    }
}
