use axum::extract::rejection::JsonRejection;
use axum::routing::post;
use axum::{Json, Router};
use chunkscope_common::types::{
    is_blank, ChunkRequest, ChunkResult, Strategy, DEFAULT_CHUNK_SIZE, DEFAULT_OVERLAP,
};
use serde::Deserialize;

use crate::error::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/chunk", post(chunk))
}

/// Incoming body. Fields are lenient so each problem gets its own message.
#[derive(Debug, Deserialize)]
struct ChunkBody {
    #[serde(default)]
    text: String,
    #[serde(default = "default_strategy")]
    strategy: String,
    #[serde(default = "default_chunk_size")]
    chunk_size: usize,
    #[serde(default = "default_overlap")]
    overlap: usize,
}

fn default_strategy() -> String {
    Strategy::Fixed.to_string()
}

fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}

fn default_overlap() -> usize {
    DEFAULT_OVERLAP
}

async fn chunk(body: Result<Json<ChunkBody>, JsonRejection>) -> Result<Json<ChunkResult>, ApiError> {
    let Json(body) = body.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;

    if is_blank(&body.text) {
        return Err(ApiError::bad_request("No text provided"));
    }
    let strategy: Strategy = body.strategy.parse()?;

    let request = ChunkRequest {
        text: body.text,
        strategy,
        chunk_size: body.chunk_size,
        overlap: body.overlap,
    };

    let result = tokio::task::spawn_blocking(move || chunkscope_chunker::chunk_text(&request))
        .await
        .map_err(|e| ApiError::Internal(format!("chunking task failed: {e}")))??;

    tracing::info!(
        strategy = %strategy,
        total_chunks = result.metadata.total_chunks,
        average_chunk_size = result.metadata.average_chunk_size,
        "Chunk request served"
    );

    Ok(Json(result))
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{send, state_with_limit};
    use axum::body::Body;
    use axum::http::{header, Request};
    use serde_json::{json, Value};

    async fn post_chunk(body: Value) -> Result<(u16, Value), Box<dyn std::error::Error>> {
        let request = Request::builder()
            .method("POST")
            .uri("/chunk")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&body)?))?;
        send(request, state_with_limit(1024)).await
    }

    #[tokio::test]
    async fn test_fixed_chunking_contract() -> Result<(), Box<dyn std::error::Error>> {
        let text = "a".repeat(1200);
        let (status, body) = post_chunk(json!({
            "text": text,
            "strategy": "fixed",
            "chunk_size": 500,
            "overlap": 50,
        }))
        .await?;

        assert_eq!(status, 200);
        assert_eq!(body["chunks"].as_array().map(Vec::len), Some(3));
        assert_eq!(body["metadata"]["total_chunks"], 3);
        assert_eq!(body["metadata"]["strategy"], "fixed");
        let average = body["metadata"]["average_chunk_size"].as_f64().unwrap_or_default();
        assert!((average - 1300.0 / 3.0).abs() < 1e-6);
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_fields_use_defaults() -> Result<(), Box<dyn std::error::Error>> {
        let (status, body) = post_chunk(json!({ "text": "Short text." })).await?;
        assert_eq!(status, 200);
        assert_eq!(body["metadata"]["strategy"], "fixed");
        assert_eq!(body["chunks"], json!(["Short text."]));
        Ok(())
    }

    #[tokio::test]
    async fn test_empty_text_rejected() -> Result<(), Box<dyn std::error::Error>> {
        let (status, body) = post_chunk(json!({ "text": "   ", "strategy": "sentence" })).await?;
        assert_eq!(status, 400);
        assert_eq!(body, json!({ "error": "No text provided" }));
        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_strategy_rejected() -> Result<(), Box<dyn std::error::Error>> {
        let (status, body) = post_chunk(json!({ "text": "hello", "strategy": "semantic" })).await?;
        assert_eq!(status, 400);
        assert_eq!(body["error"], "Invalid chunking strategy");
        Ok(())
    }

    #[tokio::test]
    async fn test_overlap_must_leave_progress() -> Result<(), Box<dyn std::error::Error>> {
        let (status, body) = post_chunk(json!({
            "text": "hello world",
            "strategy": "sliding",
            "chunk_size": 100,
            "overlap": 150,
        }))
        .await?;
        assert_eq!(status, 400);
        assert_eq!(body["error"], "overlap must be smaller than chunk_size");
        Ok(())
    }

    #[tokio::test]
    async fn test_malformed_json_uses_error_body() -> Result<(), Box<dyn std::error::Error>> {
        let request = Request::builder()
            .method("POST")
            .uri("/chunk")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{ not json"))?;
        let (status, body) = send(request, state_with_limit(1024)).await?;
        assert_eq!(status, 400);
        assert!(body["error"].is_string());
        Ok(())
    }
}
