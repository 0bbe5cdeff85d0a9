use async_trait::async_trait;
use chunkscope_common::config::ClientConfig;
use chunkscope_common::types::{ChunkRequest, ChunkResult, ErrorBody, UploadResponse};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

/// The two calls the front-end makes against the chunking service.
#[async_trait]
pub trait ChunkBackend: Send + Sync {
    /// Upload a PDF and get its extracted text back.
    async fn upload_pdf(&self, filename: &str, bytes: Vec<u8>) -> Result<String, ClientError>;

    /// Chunk text with the given parameters.
    async fn chunk(&self, request: &ChunkRequest) -> Result<ChunkResult, ClientError>;
}

/// HTTP client for the chunking service.
#[derive(Clone)]
pub struct ChunkClient {
    client: Client,
    base_url: String,
}

impl ChunkClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Self::from_config(&ClientConfig {
            server_url: base_url.to_string(),
            ..ClientConfig::default()
        })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: config.server_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Whether the service answers its health check.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let url = format!("{}/health", self.base_url);
        let resp = self.client.get(&url).send().await?;
        Ok(resp.status().is_success())
    }

    pub async fn upload_pdf(&self, filename: &str, bytes: Vec<u8>) -> Result<String, ClientError> {
        let url = format!("{}/upload", self.base_url);
        let size = bytes.len();
        let part = Part::bytes(bytes)
            .file_name(filename.to_string())
            .mime_str("application/pdf")?;
        let form = Form::new().part("file", part);

        tracing::debug!(%filename, size, "Uploading PDF");
        let resp = self.client.post(&url).multipart(form).send().await?;
        let reply: UploadResponse = read_reply(resp).await?;
        Ok(reply.text)
    }

    pub async fn chunk(&self, request: &ChunkRequest) -> Result<ChunkResult, ClientError> {
        let url = format!("{}/chunk", self.base_url);
        tracing::debug!(
            strategy = %request.strategy,
            chunk_size = request.chunk_size,
            overlap = request.overlap,
            "Requesting chunks"
        );

        let resp = self.client.post(&url).json(request).send().await?;
        let result: ChunkResult = read_reply(resp).await?;

        if !result.is_consistent() {
            tracing::warn!(
                reported = result.metadata.total_chunks,
                actual = result.chunks.len(),
                "Chunk metadata does not match the chunk list"
            );
        }

        Ok(result)
    }
}

#[async_trait]
impl ChunkBackend for ChunkClient {
    async fn upload_pdf(&self, filename: &str, bytes: Vec<u8>) -> Result<String, ClientError> {
        ChunkClient::upload_pdf(self, filename, bytes).await
    }

    async fn chunk(&self, request: &ChunkRequest) -> Result<ChunkResult, ClientError> {
        ChunkClient::chunk(self, request).await
    }
}

/// An `error` field wins over the status code: the service may report
/// failures with a 200.
async fn read_reply<T: DeserializeOwned>(resp: Response) -> Result<T, ClientError> {
    let status = resp.status();
    let body = resp.text().await?;

    if let Ok(ErrorBody { error }) = serde_json::from_str::<ErrorBody>(&body) {
        return Err(ClientError::Service {
            status: status.as_u16(),
            message: error,
        });
    }

    if !status.is_success() {
        return Err(ClientError::Status {
            status: status.as_u16(),
            body,
        });
    }

    Ok(serde_json::from_str(&body)?)
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The service explained what went wrong; the message is shown as-is.
    #[error("{message}")]
    Service { status: u16, message: String },
    #[error("server returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid response: {0}")]
    Decode(#[from] serde_json::Error),
}
