use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Coarse classification used for logging and for the JSON error body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    MissingProvider,
    AuthorizationDenied,
    IncompleteInput,
    RemoteCallFailure,
    Config,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum ViewerError {
    #[error("Ethereum provider not found: {0}")]
    MissingProvider(String),

    #[error("Wallet authorization denied: {0}")]
    AuthorizationDenied(String),

    #[error("No Ethereum account connected. Please connect a wallet.")]
    NoAccount,

    #[error("Please fill in all fields (missing: {})", .0.join(", "))]
    IncompleteInput(Vec<&'static str>),

    #[error("{operation} failed: {reason}")]
    RemoteCall {
        operation: &'static str,
        reason: String,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl ViewerError {
    pub fn remote(operation: &'static str, reason: impl ToString) -> Self {
        Self::RemoteCall {
            operation,
            reason: reason.to_string(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingProvider(_) => ErrorKind::MissingProvider,
            Self::AuthorizationDenied(_) | Self::NoAccount => ErrorKind::AuthorizationDenied,
            Self::IncompleteInput(_) => ErrorKind::IncompleteInput,
            Self::RemoteCall { .. } => ErrorKind::RemoteCallFailure,
            Self::Config(_) => ErrorKind::Config,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::MissingProvider => StatusCode::SERVICE_UNAVAILABLE,
            ErrorKind::AuthorizationDenied => StatusCode::FORBIDDEN,
            ErrorKind::IncompleteInput => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorKind::RemoteCallFailure => StatusCode::BAD_GATEWAY,
            ErrorKind::Config => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub kind: ErrorKind,
    pub message: String,
}

impl From<&ViewerError> for ErrorResponse {
    fn from(err: &ViewerError) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ViewerError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(ErrorResponse::from(&self))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_account_shares_the_authorization_kind() {
        assert_eq!(ViewerError::NoAccount.kind(), ErrorKind::AuthorizationDenied);
        assert_eq!(
            ViewerError::AuthorizationDenied("user rejected".into()).status_code(),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn incomplete_input_lists_missing_fields() {
        let err = ViewerError::IncompleteInput(vec!["usn", "cgpa"]);
        assert_eq!(err.to_string(), "Please fill in all fields (missing: usn, cgpa)");
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn remote_failure_maps_to_bad_gateway() {
        let err = ViewerError::remote("addBlock", "execution reverted");
        assert_eq!(err.kind(), ErrorKind::RemoteCallFailure);
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(err.to_string(), "addBlock failed: execution reverted");
    }
}
