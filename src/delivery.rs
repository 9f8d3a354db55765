use anyhow::{anyhow, bail, Context, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use chrono::Utc;
use std::io::Write;
use std::path::Path;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;
use tracing::debug;

use crate::sign;

pub const ENV_ENDPOINT: &str = "CHART_STORE_ENDPOINT";
pub const ENV_PORT: &str = "CHART_STORE_PORT";
pub const ENV_ACCESS_KEY: &str = "CHART_STORE_ACCESS_KEY";
pub const ENV_SECRET_KEY: &str = "CHART_STORE_SECRET_KEY";
pub const ENV_USE_SSL: &str = "CHART_STORE_USE_SSL";
pub const ENV_BUCKET: &str = "CHART_STORE_BUCKET";

const DEFAULT_PORT: u16 = 9000;
const DEFAULT_BUCKET: &str = "chartforge";
const OBJECT_PREFIX: &str = "charts";
const REGION: &str = "us-east-1";
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Connection settings for the S3-compatible object store.
#[derive(Debug, Clone)]
pub struct ObjectStoreConfig {
    pub endpoint: String,
    pub port: u16,
    pub use_ssl: bool,
    pub access_key: String,
    pub secret_key: String,
    pub bucket: String,
}

impl ObjectStoreConfig {
    /// Read the store configuration from the environment.
    ///
    /// Returns `Some` only when endpoint, access key and secret key are all
    /// present; partial configuration is treated identically to none.
    pub fn from_env() -> Option<Self> {
        let endpoint = env_nonempty(ENV_ENDPOINT)?;
        let access_key = env_nonempty(ENV_ACCESS_KEY)?;
        let secret_key = env_nonempty(ENV_SECRET_KEY)?;

        let port = std::env::var(ENV_PORT)
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);
        let use_ssl = std::env::var(ENV_USE_SSL).is_ok_and(|v| v == "true");
        let bucket = env_nonempty(ENV_BUCKET).unwrap_or_else(|| DEFAULT_BUCKET.to_string());

        Some(Self {
            endpoint,
            port,
            use_ssl,
            access_key,
            secret_key,
            bucket,
        })
    }

    fn host(&self) -> String {
        format!("{}:{}", self.endpoint, self.port)
    }

    fn base_url(&self) -> String {
        let protocol = if self.use_ssl { "https" } else { "http" };
        format!("{}://{}", protocol, self.host())
    }

    /// Public URL of an uploaded object.
    pub fn object_url(&self, object_name: &str) -> String {
        format!("{}/{}/{}", self.base_url(), self.bucket, object_name)
    }
}

fn env_nonempty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

/// Final caller-facing representation of rendered raster output.
#[derive(Debug, Clone, PartialEq)]
pub enum DeliveryArtifact {
    /// Raster bytes embedded directly, base64-encoded.
    Inline { base64: String },
    /// Public URL of the externally hosted bytes.
    Hosted { url: String },
}

/// Object store operations needed by the upload path. Seam for tests and
/// alternative stores.
pub trait ObjectStore {
    fn bucket_exists(&self, bucket: &str) -> Result<bool>;
    fn make_bucket(&self, bucket: &str) -> Result<()>;
    fn put_object(
        &self,
        bucket: &str,
        object_name: &str,
        file: &Path,
        content_type: &str,
    ) -> Result<()>;
}

/// Production store client: S3-compatible REST over HTTP with SigV4 signing.
pub struct S3Store<'a> {
    config: &'a ObjectStoreConfig,
    client: reqwest::blocking::Client,
}

impl<'a> S3Store<'a> {
    pub fn new(config: &'a ObjectStoreConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("failed to create object store HTTP client")?;
        Ok(Self { config, client })
    }

    fn signed_request(
        &self,
        method: reqwest::Method,
        path: &str,
        payload: Vec<u8>,
        content_type: Option<&str>,
    ) -> Result<reqwest::blocking::Response> {
        let headers = sign::sign_request(
            method.as_str(),
            &self.config.host(),
            path,
            &payload,
            &self.config.access_key,
            &self.config.secret_key,
            REGION,
            Utc::now(),
        );

        let url = format!("{}{}", self.config.base_url(), path);
        let mut request = self
            .client
            .request(method, &url)
            .header("Authorization", headers.authorization)
            .header("x-amz-date", headers.amz_date)
            .header("x-amz-content-sha256", headers.content_sha256);
        if let Some(content_type) = content_type {
            request = request.header("Content-Type", content_type);
        }

        request
            .body(payload)
            .send()
            .with_context(|| format!("object store request to {} failed", url))
    }
}

impl ObjectStore for S3Store<'_> {
    fn bucket_exists(&self, bucket: &str) -> Result<bool> {
        let path = format!("/{}", bucket);
        let response = self.signed_request(reqwest::Method::HEAD, &path, Vec::new(), None)?;
        let status = response.status();
        if status.is_success() {
            Ok(true)
        } else if status == reqwest::StatusCode::NOT_FOUND {
            Ok(false)
        } else {
            Err(anyhow!("bucket lookup for '{}' returned HTTP {}", bucket, status))
        }
    }

    fn make_bucket(&self, bucket: &str) -> Result<()> {
        let path = format!("/{}", bucket);
        let response = self.signed_request(reqwest::Method::PUT, &path, Vec::new(), None)?;
        let status = response.status();
        if !status.is_success() {
            bail!("bucket creation for '{}' returned HTTP {}", bucket, status);
        }
        Ok(())
    }

    fn put_object(
        &self,
        bucket: &str,
        object_name: &str,
        file: &Path,
        content_type: &str,
    ) -> Result<()> {
        let payload = std::fs::read(file)
            .with_context(|| format!("failed to read upload source {}", file.display()))?;
        let path = format!("/{}/{}", bucket, object_name);
        let response =
            self.signed_request(reqwest::Method::PUT, &path, payload, Some(content_type))?;
        let status = response.status();
        if !status.is_success() {
            bail!("object upload to '{}' returned HTTP {}", path, status);
        }
        Ok(())
    }
}

static LAST_TIMESTAMP: AtomicI64 = AtomicI64::new(0);

/// Millisecond timestamp guaranteed to increase strictly across calls in
/// this process, so object names never collide locally.
fn next_timestamp() -> i64 {
    let now = Utc::now().timestamp_millis();
    let prev = LAST_TIMESTAMP
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |prev| {
            Some(now.max(prev + 1))
        })
        .expect("timestamp update closure always yields a value");
    now.max(prev + 1)
}

/// Resolve the delivery representation for rendered raster bytes.
///
/// With no store configuration the bytes are embedded inline; this is a
/// routing decision, not a fallback. With configuration present, an upload
/// failure is a hard failure for the call and is never downgraded to inline
/// delivery.
pub fn resolve(buffer: &[u8], config: Option<&ObjectStoreConfig>) -> Result<DeliveryArtifact> {
    match config {
        None => {
            debug!("object store not configured; delivering inline");
            Ok(DeliveryArtifact::Inline {
                base64: STANDARD.encode(buffer),
            })
        }
        Some(config) => {
            let store = S3Store::new(config)?;
            let url = upload_via(&store, config, buffer)?;
            Ok(DeliveryArtifact::Hosted { url })
        }
    }
}

/// Upload raster bytes through the given store and return the public URL.
///
/// The buffer is staged in a scoped temporary file that is removed on every
/// exit path, success and failure alike.
pub fn upload_via(
    store: &dyn ObjectStore,
    config: &ObjectStoreConfig,
    buffer: &[u8],
) -> Result<String> {
    let object_name = format!("{}/{}.png", OBJECT_PREFIX, next_timestamp());

    let mut temp = tempfile::NamedTempFile::new().context("failed to create temporary file")?;
    temp.write_all(buffer)
        .context("failed to stage upload buffer")?;
    temp.flush().context("failed to stage upload buffer")?;

    if !store.bucket_exists(&config.bucket)? {
        store.make_bucket(&config.bucket)?;
    }
    store.put_object(&config.bucket, &object_name, temp.path(), "image/png")?;

    debug!(object = %object_name, "uploaded chart to object store");
    Ok(config.object_url(&object_name))
}
