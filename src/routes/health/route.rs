use axum::{Json, Router, extract::State, routing::get};

use super::dto::HealthResponse;
use crate::viewer::Viewer;

pub fn create_route() -> Router<Viewer> {
    Router::new().route("/health", get(health_check))
}

#[utoipa::path(
    get,
    tag = "health",
    path = "/health",
    responses(
      (status = 200, description = "Health check successful", body = HealthResponse),
    )
)]
pub async fn health_check(State(viewer): State<Viewer>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK".to_string(),
        phase: viewer.phase(),
        chain_id: viewer.chain_id(),
    })
}
