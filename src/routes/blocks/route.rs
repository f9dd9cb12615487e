use axum::{Json, Router, extract::State, http::StatusCode, routing::post};

use super::dto::{CreateBlockRequest, SubmissionResponse};
use crate::blockchain::record::RecordForm;
use crate::errors::ViewerError;
use crate::viewer::Viewer;

pub fn create_route() -> Router<Viewer> {
    Router::new()
        .route("/api/v1/blocks/genesis", post(create_genesis_block))
        .route("/api/v1/blocks", post(add_block))
}

impl From<CreateBlockRequest> for RecordForm {
    fn from(request: CreateBlockRequest) -> Self {
        Self {
            department: request.department,
            student_name: request.student_name,
            usn: request.usn,
            dob: request.dob,
            semester: request.semester,
            cgpa: request.cgpa,
            student_address: request.student_address,
        }
    }
}

/// Create the first block of a department chain
#[utoipa::path(
    post,
    path = "/api/v1/blocks/genesis",
    request_body = CreateBlockRequest,
    responses(
        (status = 201, description = "Transaction submitted", body = SubmissionResponse),
        (status = 422, description = "Missing fields", body = crate::errors::ErrorResponse),
        (status = 502, description = "Contract call failed", body = crate::errors::ErrorResponse),
        (status = 503, description = "Wallet provider unavailable", body = crate::errors::ErrorResponse)
    ),
    tag = "Blocks"
)]
pub async fn create_genesis_block(
    State(viewer): State<Viewer>,
    Json(payload): Json<CreateBlockRequest>,
) -> Result<(StatusCode, Json<SubmissionResponse>), ViewerError> {
    let submission = viewer.create_genesis_block(&payload.into()).await?;

    Ok((StatusCode::CREATED, Json(submission.into())))
}

/// Append a block to an existing department chain
#[utoipa::path(
    post,
    path = "/api/v1/blocks",
    request_body = CreateBlockRequest,
    responses(
        (status = 201, description = "Transaction submitted", body = SubmissionResponse),
        (status = 422, description = "Missing fields", body = crate::errors::ErrorResponse),
        (status = 502, description = "Contract call failed", body = crate::errors::ErrorResponse),
        (status = 503, description = "Wallet provider unavailable", body = crate::errors::ErrorResponse)
    ),
    tag = "Blocks"
)]
pub async fn add_block(
    State(viewer): State<Viewer>,
    Json(payload): Json<CreateBlockRequest>,
) -> Result<(StatusCode, Json<SubmissionResponse>), ViewerError> {
    let submission = viewer.add_block(&payload.into()).await?;

    Ok((StatusCode::CREATED, Json(submission.into())))
}
