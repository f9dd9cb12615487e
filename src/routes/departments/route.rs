use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};

use super::dto::DepartmentBlocksResponse;
use crate::errors::ViewerError;
use crate::viewer::Viewer;

pub fn create_route() -> Router<Viewer> {
    Router::new().route(
        "/api/v1/departments/{department}/blocks",
        get(get_department_blocks),
    )
}

/// Get every block recorded for a department
///
/// An unknown department yields `200` with an empty list; a failed query is
/// reported with an error status.
#[utoipa::path(
    get,
    path = "/api/v1/departments/{department}/blocks",
    params(
        ("department" = String, Path, description = "Department name")
    ),
    responses(
        (status = 200, description = "Blocks retrieved", body = DepartmentBlocksResponse),
        (status = 502, description = "Contract call failed", body = crate::errors::ErrorResponse),
        (status = 503, description = "Wallet provider unavailable", body = crate::errors::ErrorResponse)
    ),
    tag = "Departments"
)]
pub async fn get_department_blocks(
    State(viewer): State<Viewer>,
    Path(department): Path<String>,
) -> Result<(StatusCode, Json<DepartmentBlocksResponse>), ViewerError> {
    let set = viewer.query_department_blocks(&department).await?;

    Ok((StatusCode::OK, Json(set.into())))
}
