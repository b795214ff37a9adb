//! AWS S3 and S3-compatible snapshot storage

use crate::sync::SyncError;
use anyhow::{Context, Result};
use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_s3::{Client, Config};
use cnyre_core::SnapshotStore;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tokio::runtime::Runtime;

/// Connection settings for an S3 bucket holding the snapshot
#[derive(Debug, Clone)]
pub struct S3Settings {
    pub bucket: String,
    pub region: String,
    pub prefix: Option<String>,
    pub endpoint: Option<String>,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
}

pub struct S3SnapshotStore {
    client: Client,
    bucket: String,
    prefix: Option<String>,
    // The SDK is async; calls are driven to completion on this private runtime
    runtime: Runtime,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl S3SnapshotStore {
    /// Build a client from explicit settings, falling back to the standard
    /// AWS_* environment variables for credentials.
    pub fn new(settings: S3Settings) -> Result<Self, SyncError> {
        if settings.bucket.trim().is_empty() {
            return Err(SyncError::Configuration("S3 bucket name is empty".to_string()));
        }
        if settings.region.trim().is_empty() {
            return Err(SyncError::Configuration("S3 region is empty".to_string()));
        }

        let access_key = non_empty(settings.access_key_id)
            .or_else(|| non_empty(std::env::var("AWS_ACCESS_KEY_ID").ok()));
        let secret_key = non_empty(settings.secret_access_key)
            .or_else(|| non_empty(std::env::var("AWS_SECRET_ACCESS_KEY").ok()));

        let (access_key, secret_key) = match (access_key, secret_key) {
            (Some(access), Some(secret)) => (access, secret),
            _ => {
                return Err(SyncError::Credentials(
                    "set remote.access_key_id/remote.secret_access_key or \
                     AWS_ACCESS_KEY_ID/AWS_SECRET_ACCESS_KEY"
                        .to_string(),
                ))
            }
        };

        let creds = Credentials::new(
            access_key,
            secret_key,
            std::env::var("AWS_SESSION_TOKEN").ok(),
            None,
            "cnyre",
        );

        let mut config_builder = Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(settings.region))
            .credentials_provider(creds);

        // Use custom endpoint if provided (for S3-compatible services)
        if let Some(endpoint_url) = non_empty(settings.endpoint) {
            config_builder = config_builder
                .endpoint_url(endpoint_url)
                .force_path_style(true);
        }

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| SyncError::Configuration(format!("failed to start I/O runtime: {}", e)))?;

        Ok(Self {
            client: Client::from_conf(config_builder.build()),
            bucket: settings.bucket,
            prefix: non_empty(settings.prefix),
            runtime,
        })
    }

    fn full_key(&self, key: &str) -> String {
        match &self.prefix {
            Some(prefix) => format!(
                "{}/{}",
                prefix.trim_end_matches('/'),
                key.trim_start_matches('/')
            ),
            None => key.to_string(),
        }
    }
}

impl SnapshotStore for S3SnapshotStore {
    fn describe(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!("s3://{}/{}", self.bucket, prefix.trim_matches('/')),
            None => format!("s3://{}", self.bucket),
        }
    }

    fn read_text(&self, key: &str) -> Result<String> {
        let full_key = self.full_key(key);

        self.runtime.block_on(async {
            let response = self
                .client
                .get_object()
                .bucket(&self.bucket)
                .key(&full_key)
                .send()
                .await
                .with_context(|| format!("Failed to get {} from S3", full_key))?;

            let body = response
                .body
                .collect()
                .await
                .context("Failed to read S3 object body")?;

            Ok(String::from_utf8_lossy(&body.into_bytes()).into_owned())
        })
    }

    fn download(&self, key: &str, local_path: &Path) -> Result<u64> {
        let full_key = self.full_key(key);

        self.runtime.block_on(async {
            let response = self
                .client
                .get_object()
                .bucket(&self.bucket)
                .key(&full_key)
                .send()
                .await
                .with_context(|| format!("Failed to get {} from S3", full_key))?;

            let mut file = BufWriter::new(
                File::create(local_path).context("Failed to create local file")?,
            );

            let mut byte_stream = response.body;
            let mut downloaded = 0u64;

            while let Some(bytes) = byte_stream
                .try_next()
                .await
                .context("Failed while streaming S3 object")?
            {
                file.write_all(&bytes)?;
                downloaded += bytes.len() as u64;
            }

            file.flush()?;
            tracing::debug!("Downloaded {} bytes from s3://{}/{}", downloaded, self.bucket, full_key);

            Ok(downloaded)
        })
    }
}
