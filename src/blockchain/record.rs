use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::errors::ViewerError;

/// Field names in the order the contract expects its arguments.
pub const RECORD_FIELDS: [&str; 7] = [
    "department",
    "student_name",
    "usn",
    "dob",
    "semester",
    "cgpa",
    "student_address",
];

/// One block of a department chain, as stored by the contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AcademicRecord {
    pub department: String,
    pub student_name: String,
    /// University seat number (student id).
    pub usn: String,
    pub dob: String,
    pub semester: String,
    pub cgpa: String,
    /// Account the record is attributed to.
    pub student_address: String,
}

impl AcademicRecord {
    /// Values in contract argument order.
    pub fn contract_args(&self) -> [&str; 7] {
        [
            &self.department,
            &self.student_name,
            &self.usn,
            &self.dob,
            &self.semester,
            &self.cgpa,
            &self.student_address,
        ]
    }
}

/// Raw form input. Any field may be empty until validated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct RecordForm {
    pub department: String,
    pub student_name: String,
    pub usn: String,
    pub dob: String,
    pub semester: String,
    pub cgpa: String,
    pub student_address: String,
}

impl RecordForm {
    fn values(&self) -> [&str; 7] {
        [
            &self.department,
            &self.student_name,
            &self.usn,
            &self.dob,
            &self.semester,
            &self.cgpa,
            &self.student_address,
        ]
    }

    pub fn missing_fields(&self) -> Vec<&'static str> {
        RECORD_FIELDS
            .iter()
            .zip(self.values())
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| *name)
            .collect()
    }

    /// Validate that every field is filled in. Values are passed on as typed.
    pub fn to_record(&self) -> Result<AcademicRecord, ViewerError> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(ViewerError::IncompleteInput(missing));
        }

        Ok(AcademicRecord {
            department: self.department.clone(),
            student_name: self.student_name.clone(),
            usn: self.usn.clone(),
            dob: self.dob.clone(),
            semester: self.semester.clone(),
            cgpa: self.cgpa.clone(),
            student_address: self.student_address.clone(),
        })
    }
}

/// Department name required by the read path.
pub fn require_department(department: &str) -> Result<&str, ViewerError> {
    if department.trim().is_empty() {
        return Err(ViewerError::IncompleteInput(vec!["department"]));
    }
    Ok(department)
}

/// Result of a department query, kept only for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DepartmentRecordSet {
    pub department: String,
    pub records: Vec<AcademicRecord>,
    pub fetched_at: DateTime<Utc>,
}

impl DepartmentRecordSet {
    pub fn new(department: impl Into<String>, records: Vec<AcademicRecord>) -> Self {
        Self {
            department: department.into(),
            records,
            fetched_at: Utc::now(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
