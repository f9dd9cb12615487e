use axum::{Json, Router, extract::State, http::StatusCode, routing::get};

use super::dto::AccountResponse;
use crate::errors::ViewerError;
use crate::viewer::Viewer;

pub fn create_route() -> Router<Viewer> {
    Router::new().route("/api/v1/account", get(get_selected_account))
}

/// Account that write actions are submitted from
#[utoipa::path(
    get,
    path = "/api/v1/account",
    responses(
        (status = 200, description = "Selected account", body = AccountResponse),
        (status = 403, description = "No authorized account", body = crate::errors::ErrorResponse),
        (status = 503, description = "Wallet provider unavailable", body = crate::errors::ErrorResponse)
    ),
    tag = "Account"
)]
pub async fn get_selected_account(
    State(viewer): State<Viewer>,
) -> Result<(StatusCode, Json<AccountResponse>), ViewerError> {
    let address = viewer.selected_account().await?;

    let response = AccountResponse {
        address: format!("{:?}", address),
        chain_id: viewer.chain_id(),
    };

    Ok((StatusCode::OK, Json(response)))
}
