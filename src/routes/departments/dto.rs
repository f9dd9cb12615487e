use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::blockchain::record::{AcademicRecord, DepartmentRecordSet};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DepartmentBlocksResponse {
    pub department: String,
    pub blocks: Vec<AcademicRecord>,
    pub total: usize,
    pub fetched_at: DateTime<Utc>,
}

impl From<DepartmentRecordSet> for DepartmentBlocksResponse {
    fn from(set: DepartmentRecordSet) -> Self {
        Self {
            department: set.department,
            total: set.records.len(),
            blocks: set.records,
            fetched_at: set.fetched_at,
        }
    }
}
