use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, Environment};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

const ENV_PREFIX: &str = "CHUNKSCOPE";

/// Settings for the chunking service (`chunkscope-api`).
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Largest accepted `/upload` body, in bytes.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

/// Settings for anything that talks to the chunking service.
#[derive(Debug, Deserialize, Clone)]
pub struct ClientConfig {
    #[serde(default = "default_server_url")]
    pub server_url: String,
    /// Per-request timeout. Unset means requests may wait indefinitely.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_max_upload_bytes() -> usize {
    10 * 1024 * 1024
}

fn default_server_url() -> String {
    "http://localhost:8000".to_string()
}

fn env_source() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

fn load<T: DeserializeOwned>(builder: ConfigBuilder<DefaultState>) -> Result<T, ConfigError> {
    builder.build()?.try_deserialize()
}

impl ServerConfig {
    /// Read `CHUNKSCOPE_HOST`, `CHUNKSCOPE_PORT`, `CHUNKSCOPE_MAX_UPLOAD_BYTES`.
    pub fn from_env() -> Result<Self, ConfigError> {
        load(config::Config::builder().add_source(env_source()))
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

impl ClientConfig {
    /// Read `CHUNKSCOPE_SERVER_URL` and `CHUNKSCOPE_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        load(config::Config::builder().add_source(env_source()))
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            timeout_secs: None,
        }
    }
}
