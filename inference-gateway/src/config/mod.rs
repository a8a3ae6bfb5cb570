use crate::models::JobId;
use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub backend: Backend,
    pub aws: AwsSettings,
    pub storage: StorageSettings,
    pub config_table: String,
    pub admin_token: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AwsSettings {
    /// Region for the inference runtime; falls back to the ambient provider
    /// chain when unset.
    pub region: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    pub bucket: String,
    pub prefix: String,
    pub upload_prefix: String,
    pub local_path: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    Aws,
    Local,
}

impl GatewayConfig {
    pub fn load() -> Result<Self, AppError> {
        // Load common config (handles .env and APP__ prefix)
        let common_config = core_config::Config::load()?;

        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        Ok(GatewayConfig {
            common: common_config,
            backend: get_env("GATEWAY_BACKEND", Some("local"), is_prod)?
                .parse()
                .map_err(|e: String| AppError::ConfigError(anyhow::anyhow!(e)))?,
            aws: AwsSettings {
                region: env::var("SM_REGION").ok().filter(|v| !v.is_empty()),
            },
            storage: StorageSettings {
                bucket: get_env("S3_BUCKET", Some("gallery"), is_prod)?,
                prefix: get_env("S3_PREFIX", Some("stablediffusion/asyncinvoke"), is_prod)?,
                upload_prefix: get_env("UPLOAD_PREFIX", Some("stablediffusion/upload"), is_prod)?,
                local_path: get_env("LOCAL_STORAGE_PATH", Some("storage"), is_prod)?,
            },
            config_table: get_env("DDB_TABLE", Some("api-config"), is_prod)?,
            admin_token: get_env("GALLERY_ADMIN_TOKEN", Some(""), is_prod)?,
        })
    }
}

impl StorageSettings {
    /// Key of the staged input document for a job.
    pub fn input_key(&self, id: JobId) -> String {
        format!("{}/input/{}.json", normalized(&self.prefix), id)
    }

    /// Key the backend writes the result document to for a job.
    pub fn output_key(&self, id: JobId) -> String {
        format!("{}/out/{}.out", normalized(&self.prefix), id)
    }

    pub fn upload_key(&self, name: &str, extension: &str) -> String {
        format!("{}/{}.{}", normalized(&self.upload_prefix), name, extension)
    }

    /// Fully-qualified store URI for a key.
    pub fn object_uri(&self, key: &str) -> String {
        format!("s3://{}/{}", self.bucket, key)
    }

    /// The store-qualified prefix stripped from result references before they
    /// are returned to clients.
    pub fn uri_prefix(&self) -> String {
        format!("s3://{}", self.bucket)
    }
}

fn normalized(prefix: &str) -> &str {
    prefix.strip_prefix('/').unwrap_or(prefix)
}

impl std::str::FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "aws" => Ok(Backend::Aws),
            "local" => Ok(Backend::Local),
            _ => Err(format!("Invalid gateway backend: {}", s)),
        }
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}
