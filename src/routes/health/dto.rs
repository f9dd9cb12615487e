use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::viewer::Phase;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "OK")]
    pub status: String,
    pub phase: Phase,
    pub chain_id: Option<u64>,
}
