use chunkscope_common::config::ServerConfig;
use std::sync::Arc;

use crate::extract::{PdfTextExtractor, TextExtractor};

#[derive(Clone)]
pub struct AppState {
    pub extractor: Arc<dyn TextExtractor>,
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(config: &ServerConfig) -> Self {
        Self::with_extractor(config, Arc::new(PdfTextExtractor))
    }

    pub fn with_extractor(config: &ServerConfig, extractor: Arc<dyn TextExtractor>) -> Self {
        Self {
            extractor,
            max_upload_bytes: config.max_upload_bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_takes_upload_limit_from_config() {
        let config = ServerConfig {
            max_upload_bytes: 4096,
            ..ServerConfig::default()
        };
        let state = AppState::new(&config);
        assert_eq!(state.max_upload_bytes, 4096);
    }
}
