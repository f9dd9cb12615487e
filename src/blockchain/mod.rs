pub mod contract;
pub mod ledger;
pub mod provider;
pub mod record;

pub use ledger::{ContractLedger, RecordLedger, Submission};
pub use provider::{Connection, WalletProvider, connect};
pub use record::{AcademicRecord, DepartmentRecordSet, RecordForm};
