//! Google Cloud Storage sink.
//!
//! Uploads objects with the JSON API "media" upload and returns the public
//! object URL. Obtaining the OAuth access token is the caller's business;
//! the sink only forwards it as a bearer token.

use super::types::{SinkError, StorageSink};
use std::time::Duration;
use tracing::{debug, trace, warn};
use url::Url;

/// Default public host for objects.
pub const DEFAULT_GCS_PUBLIC_BASE_URL: &str = "https://storage.googleapis.com";

/// Default upload endpoint.
pub const DEFAULT_GCS_UPLOAD_BASE_URL: &str = "https://storage.googleapis.com/upload/storage/v1";

/// Longest error body kept in [`SinkError::Status`].
const MAX_ERROR_BODY: usize = 512;

/// Settings for [`GcsSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GcsConfig {
    /// Bucket name
    pub bucket: String,
    /// OAuth2 access token; requests are sent unauthenticated when absent
    pub access_token: Option<String>,
    /// Base for returned public URLs (`{base}/{bucket}/{name}`)
    pub public_base_url: String,
    /// Base of the upload API (`{base}/b/{bucket}/o`)
    pub upload_base_url: String,
    /// Apply the `publicRead` ACL to every object
    pub make_public: bool,
    /// HTTP timeout in seconds
    pub timeout_secs: u64,
}

impl GcsConfig {
    /// Create a config for `bucket` using the public Google endpoints.
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            access_token: None,
            public_base_url: DEFAULT_GCS_PUBLIC_BASE_URL.to_string(),
            upload_base_url: DEFAULT_GCS_UPLOAD_BASE_URL.to_string(),
            make_public: true,
            timeout_secs: 60,
        }
    }

    /// Set the bearer token.
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Override the public URL base (e.g. a CDN in front of the bucket).
    pub fn with_public_base_url(mut self, base: impl Into<String>) -> Self {
        self.public_base_url = base.into();
        self
    }

    /// Override the upload endpoint (e.g. a local emulator).
    pub fn with_upload_base_url(mut self, base: impl Into<String>) -> Self {
        self.upload_base_url = base.into();
        self
    }

    /// Enable or disable the `publicRead` ACL.
    pub fn with_make_public(mut self, make_public: bool) -> Self {
        self.make_public = make_public;
        self
    }
}

/// Sink uploading to a Google Cloud Storage bucket.
#[derive(Clone)]
pub struct GcsSink {
    client: reqwest::Client,
    config: GcsConfig,
    upload_url: Url,
    public_base: Url,
}

impl GcsSink {
    /// Create a sink from its configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError::Config`] if the bucket is empty, a base URL does
    /// not parse, or the HTTP client cannot be built.
    pub fn new(config: GcsConfig) -> Result<Self, SinkError> {
        if config.bucket.trim().is_empty() {
            return Err(SinkError::Config("GCS bucket name is empty".to_string()));
        }

        let mut upload_url = parse_base(&config.upload_base_url)?;
        upload_url
            .path_segments_mut()
            .map_err(|_| SinkError::Config("upload base URL cannot be a base".to_string()))?
            .pop_if_empty()
            .extend(["b", config.bucket.as_str(), "o"]);

        let public_base = parse_base(&config.public_base_url)?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SinkError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            config,
            upload_url,
            public_base,
        })
    }

    /// Public URL of an object in this bucket.
    pub fn public_url(&self, name: &str) -> String {
        let mut url = self.public_base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend([self.config.bucket.as_str(), name]);
        }
        url.to_string()
    }

    /// Bucket this sink writes to.
    pub fn bucket(&self) -> &str {
        &self.config.bucket
    }
}

/// Cut an error body to at most [`MAX_ERROR_BODY`] bytes on a char boundary.
fn truncate_body(mut body: String) -> String {
    if body.len() > MAX_ERROR_BODY {
        let cut = (0..=MAX_ERROR_BODY)
            .rev()
            .find(|&i| body.is_char_boundary(i))
            .unwrap_or(0);
        body.truncate(cut);
    }
    body
}

fn parse_base(raw: &str) -> Result<Url, SinkError> {
    Url::parse(raw).map_err(|e| SinkError::Config(format!("invalid URL '{}': {}", raw, e)))
}

impl StorageSink for GcsSink {
    async fn put(&self, name: &str, bytes: Vec<u8>, content_type: &str) -> Result<String, SinkError> {
        let size = bytes.len();
        trace!(bucket = %self.config.bucket, name = name, size, "GCS upload starting");

        let mut query = vec![("uploadType", "media"), ("name", name)];
        if self.config.make_public {
            query.push(("predefinedAcl", "publicRead"));
        }

        let mut request = self
            .client
            .post(self.upload_url.clone())
            .query(&query)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(bytes);
        if let Some(token) = &self.config.access_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| {
            warn!(name = name, error = %e, is_timeout = e.is_timeout(), "GCS request failed");
            SinkError::Request {
                name: name.to_string(),
                reason: e.to_string(),
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = truncate_body(response.text().await.unwrap_or_default());
            warn!(name = name, status = status.as_u16(), "GCS upload rejected");
            return Err(SinkError::Status {
                name: name.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let url = self.public_url(name);
        debug!(name = name, size, url = %url, "GCS upload complete");
        Ok(url)
    }

    fn describe(&self) -> String {
        format!("gcs://{}", self.config.bucket)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_url() {
        let sink = GcsSink::new(GcsConfig::new("my-bucket")).unwrap();
        assert_eq!(
            sink.public_url("abc_24x24_1.jpg"),
            "https://storage.googleapis.com/my-bucket/abc_24x24_1.jpg"
        );
    }

    #[test]
    fn test_public_url_with_custom_base() {
        let config = GcsConfig::new("tiles").with_public_base_url("https://cdn.example.com/");
        let sink = GcsSink::new(config).unwrap();
        assert_eq!(
            sink.public_url("a.jpg"),
            "https://cdn.example.com/tiles/a.jpg"
        );
    }

    #[test]
    fn test_upload_url_contains_bucket() {
        let sink = GcsSink::new(GcsConfig::new("my-bucket")).unwrap();
        assert_eq!(
            sink.upload_url.as_str(),
            "https://storage.googleapis.com/upload/storage/v1/b/my-bucket/o"
        );
    }

    #[test]
    fn test_empty_bucket_rejected() {
        let result = GcsSink::new(GcsConfig::new("  "));
        assert!(matches!(result, Err(SinkError::Config(_))));
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let config = GcsConfig::new("b").with_upload_base_url("not a url");
        assert!(matches!(GcsSink::new(config), Err(SinkError::Config(_))));
    }

    #[test]
    fn test_config_builder() {
        let config = GcsConfig::new("b")
            .with_access_token("tok")
            .with_make_public(false);
        assert_eq!(config.access_token.as_deref(), Some("tok"));
        assert!(!config.make_public);
        assert_eq!(config.public_base_url, DEFAULT_GCS_PUBLIC_BASE_URL);
    }

    #[test]
    fn test_describe() {
        let sink = GcsSink::new(GcsConfig::new("bkt")).unwrap();
        assert_eq!(sink.describe(), "gcs://bkt");
        assert_eq!(sink.bucket(), "bkt");
    }

    #[test]
    fn test_truncate_body_keeps_short_bodies() {
        assert_eq!(truncate_body("denied".to_string()), "denied");
        let exact = "x".repeat(MAX_ERROR_BODY);
        assert_eq!(truncate_body(exact.clone()), exact);
    }

    #[test]
    fn test_truncate_body_respects_char_boundary() {
        // 'é' occupies bytes 511..513
        let body = format!("{}é tail", "a".repeat(MAX_ERROR_BODY - 1));
        let cut = truncate_body(body);
        assert_eq!(cut.len(), MAX_ERROR_BODY - 1);
        assert!(cut.chars().all(|c| c == 'a'));
    }

    /// Serve one HTTP response to the first connection, after reading the request.
    async fn serve_once(status_line: &'static str, body: String) -> String {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};
        use tokio::net::TcpListener;

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = stream.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
                let text = String::from_utf8_lossy(&request);
                if let Some(header_end) = text.find("\r\n\r\n") {
                    let content_length = text[..header_end]
                        .lines()
                        .find_map(|line| {
                            let (key, value) = line.split_once(':')?;
                            key.eq_ignore_ascii_case("content-length")
                                .then(|| value.trim().parse::<usize>().ok())
                                .flatten()
                        })
                        .unwrap_or(0);
                    if request.len() >= header_end + 4 + content_length {
                        break;
                    }
                }
            }

            let response = format!(
                "{}\r\nContent-Type: text/plain; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).await.unwrap();
            stream.shutdown().await.unwrap();
        });

        format!("http://{}/upload", addr)
    }

    #[tokio::test]
    async fn test_rejection_with_multibyte_body_is_status_error() {
        let body = format!("{}é", "a".repeat(MAX_ERROR_BODY - 1));
        let base = serve_once("HTTP/1.1 403 Forbidden", body).await;
        let sink = GcsSink::new(GcsConfig::new("b").with_upload_base_url(base)).unwrap();

        let result = sink.put("abc_24x24_1.jpg", vec![1, 2, 3], "image/jpeg").await;

        match result {
            Err(SinkError::Status { name, status, body }) => {
                assert_eq!(name, "abc_24x24_1.jpg");
                assert_eq!(status, 403);
                assert_eq!(body, "a".repeat(MAX_ERROR_BODY - 1));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_request_error() {
        let config = GcsConfig::new("b").with_upload_base_url("http://127.0.0.1:9/upload");
        let sink = GcsSink::new(config).unwrap();

        let result = sink.put("x.jpg", vec![1, 2, 3], "image/jpeg").await;
        assert!(matches!(result, Err(SinkError::Request { .. })));
    }
}
