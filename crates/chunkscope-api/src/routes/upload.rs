use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use chunkscope_common::types::UploadResponse;

use crate::error::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/upload", post(upload))
}

fn multipart_error(err: MultipartError) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge
    } else {
        ApiError::bad_request(err.body_text())
    }
}

async fn upload(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut multipart =
        multipart.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        if !filename.to_ascii_lowercase().ends_with(".pdf") {
            return Err(ApiError::bad_request("Only PDF files are allowed"));
        }

        let bytes = field.bytes().await.map_err(multipart_error)?;
        if bytes.len() > state.max_upload_bytes {
            tracing::warn!(
                %filename,
                size = bytes.len(),
                limit = state.max_upload_bytes,
                "Upload rejected"
            );
            return Err(ApiError::PayloadTooLarge);
        }

        let extractor = state.extractor.clone();
        let size = bytes.len();
        let text = tokio::task::spawn_blocking(move || extractor.extract(&bytes))
            .await
            .map_err(|e| ApiError::Internal(format!("extraction task failed: {e}")))??;

        tracing::info!(%filename, size, text_chars = text.chars().count(), "PDF text extracted");
        return Ok(Json(UploadResponse { text }));
    }

    Err(ApiError::bad_request("No file provided"))
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{send, state_with_limit};
    use axum::body::Body;
    use axum::http::{header, Request};
    use serde_json::json;

    const BOUNDARY: &str = "chunkscope-test-boundary";

    fn multipart_request(
        field: &str,
        filename: &str,
        content: &[u8],
    ) -> Result<Request<Body>, axum::http::Error> {
        let mut body = Vec::new();
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(b"Content-Type: application/pdf\r\n\r\n");
        body.extend_from_slice(content);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri("/upload")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
    }

    #[tokio::test]
    async fn test_upload_returns_extracted_text() -> Result<(), Box<dyn std::error::Error>> {
        let request = multipart_request("file", "notes.pdf", b"Extracted words.")?;
        let (status, body) = send(request, state_with_limit(1024)).await?;
        assert_eq!(status, 200);
        assert_eq!(body, json!({ "text": "Extracted words." }));
        Ok(())
    }

    #[tokio::test]
    async fn test_non_pdf_rejected() -> Result<(), Box<dyn std::error::Error>> {
        let request = multipart_request("file", "notes.txt", b"plain")?;
        let (status, body) = send(request, state_with_limit(1024)).await?;
        assert_eq!(status, 400);
        assert_eq!(body["error"], "Only PDF files are allowed");
        Ok(())
    }

    #[tokio::test]
    async fn test_oversized_upload_reports_file_too_large() -> Result<(), Box<dyn std::error::Error>>
    {
        let request = multipart_request("file", "big.pdf", &[b'x'; 64])?;
        let (status, body) = send(request, state_with_limit(16)).await?;
        assert_eq!(status, 413);
        assert_eq!(body, json!({ "error": "file too large" }));
        Ok(())
    }

    #[tokio::test]
    async fn test_unreadable_pdf_is_unprocessable() -> Result<(), Box<dyn std::error::Error>> {
        let request = multipart_request("file", "broken.pdf", b"BAD bytes")?;
        let (status, body) = send(request, state_with_limit(1024)).await?;
        assert_eq!(status, 422);
        assert_eq!(
            body["error"],
            "Could not extract text from PDF: broken xref table"
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_file_field() -> Result<(), Box<dyn std::error::Error>> {
        let request = multipart_request("attachment", "notes.pdf", b"ignored")?;
        let (status, body) = send(request, state_with_limit(1024)).await?;
        assert_eq!(status, 400);
        assert_eq!(body["error"], "No file provided");
        Ok(())
    }
}
