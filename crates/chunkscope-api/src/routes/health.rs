use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{send, state_with_limit};
    use axum::body::Body;
    use axum::http::Request;

    #[tokio::test]
    async fn test_health_reports_ok() -> Result<(), Box<dyn std::error::Error>> {
        let request = Request::builder().uri("/health").body(Body::empty())?;
        let (status, body) = send(request, state_with_limit(1024)).await?;
        assert_eq!(status, 200);
        assert_eq!(body["status"], "ok");
        Ok(())
    }
}
