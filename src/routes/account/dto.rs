use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AccountResponse {
    #[schema(example = "0x90f8bf6a479f320ead074411a4b0e7944ea8c9c1")]
    pub address: String,
    pub chain_id: Option<u64>,
}
