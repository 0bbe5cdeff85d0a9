use chunkscope_api::extract::{ExtractError, TextExtractor};
use chunkscope_api::{create_router, AppState};
use chunkscope_client::{ChunkClient, ClientError};
use chunkscope_common::config::ServerConfig;
use chunkscope_common::types::{ChunkParams, ChunkRequest, Strategy};
use std::sync::Arc;

struct Utf8Extractor;

impl TextExtractor for Utf8Extractor {
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractError> {
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }
}

async fn serve(state: AppState) -> ChunkClient {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, create_router(state)).await.unwrap();
    });
    ChunkClient::new(&format!("http://{addr}")).unwrap()
}

fn params(strategy: Strategy, chunk_size: usize, overlap: usize) -> ChunkParams {
    ChunkParams {
        strategy,
        chunk_size,
        overlap,
    }
}

#[tokio::test]
async fn test_fixed_chunking_over_http() {
    let client = serve(AppState::new(&ServerConfig::default())).await;
    assert!(client.health().await.unwrap());

    let request = ChunkRequest::new("x".repeat(1200), params(Strategy::Fixed, 500, 50));
    let result = client.chunk(&request).await.unwrap();

    assert_eq!(result.metadata.total_chunks, 3);
    assert_eq!(result.metadata.strategy, "fixed");
    let lens: Vec<usize> = result.chunks.iter().map(|c| c.len()).collect();
    assert_eq!(lens, vec![500, 500, 300]);
    assert!(result.is_consistent());
}

#[tokio::test]
async fn test_same_request_same_answer() {
    let client = serve(AppState::new(&ServerConfig::default())).await;
    let text = "First sentence here. Second one follows! Third? ".repeat(30);

    for strategy in Strategy::ALL {
        let request = ChunkRequest::new(text.clone(), params(strategy, 200, 20));
        let first = client.chunk(&request).await.unwrap();
        let second = client.chunk(&request).await.unwrap();
        assert_eq!(first, second, "{strategy} is not deterministic");
        assert_eq!(first.metadata.strategy, strategy.as_str());
    }
}

#[tokio::test]
async fn test_rejections_carry_service_message() {
    let client = serve(AppState::new(&ServerConfig::default())).await;

    let err = client
        .chunk(&ChunkRequest::new("   ", ChunkParams::default()))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Service { status: 400, .. }));
    assert_eq!(err.to_string(), "No text provided");

    let err = client
        .chunk(&ChunkRequest::new("text", params(Strategy::Fixed, 100, 100)))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "overlap must be smaller than chunk_size");
}

#[tokio::test]
async fn test_upload_then_chunk_extracted_text() {
    let state = AppState::with_extractor(&ServerConfig::default(), Arc::new(Utf8Extractor));
    let client = serve(state).await;

    let text = client
        .upload_pdf("notes.pdf", b"Para one.\n\nPara two.".to_vec())
        .await
        .unwrap();
    assert_eq!(text, "Para one.\n\nPara two.");

    let result = client
        .chunk(&ChunkRequest::new(text, params(Strategy::Paragraph, 500, 0)))
        .await
        .unwrap();
    assert_eq!(result.chunks, vec!["Para one.\n\nPara two.".to_string()]);
}

#[tokio::test]
async fn test_upload_rejections() {
    let config = ServerConfig {
        max_upload_bytes: 32,
        ..ServerConfig::default()
    };
    let client = serve(AppState::new(&config)).await;

    let err = client
        .upload_pdf("notes.txt", b"plain".to_vec())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Only PDF files are allowed");

    let err = client
        .upload_pdf("big.pdf", vec![b'%'; 64])
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Service { status: 413, .. }));
    assert_eq!(err.to_string(), "file too large");

    let err = client
        .upload_pdf("garbage.pdf", b"not a pdf".to_vec())
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Service { status: 422, .. }));
    assert!(err
        .to_string()
        .starts_with("Could not extract text from PDF: "));
}
