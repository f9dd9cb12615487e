use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::blockchain::ledger::Submission;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateBlockRequest {
    #[schema(example = "CS")]
    pub department: String,

    #[schema(example = "Asha Rao")]
    pub student_name: String,

    #[schema(example = "1RV20CS001")]
    pub usn: String,

    #[schema(example = "2002-04-11")]
    pub dob: String,

    #[schema(example = "6")]
    pub semester: String,

    #[schema(example = "9.1")]
    pub cgpa: String,

    #[schema(example = "0x90f8bf6a479f320ead074411a4b0e7944ea8c9c1")]
    pub student_address: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SubmissionResponse {
    pub tx_hash: String,
    /// Present only when the server waits for confirmation.
    pub block_number: Option<u64>,
}

impl From<Submission> for SubmissionResponse {
    fn from(submission: Submission) -> Self {
        Self {
            tx_hash: format!("{:?}", submission.tx_hash),
            block_number: submission.block_number,
        }
    }
}
