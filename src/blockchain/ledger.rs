use std::sync::Arc;

use async_trait::async_trait;
use ethers::contract::ContractCall;
use ethers::providers::Middleware;
use ethers::types::{Address, TransactionReceipt, TxHash, U64};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::contract::{CollegeBlockChain, DepartmentBlock};
use super::record::AcademicRecord;
use crate::errors::ViewerError;

pub const CREATE_GENESIS_BLOCK: &str = "createGenesisBlock";
pub const ADD_BLOCK: &str = "addBlock";
pub const GET_DEPARTMENT_BLOCKS: &str = "getDepartmentBlocks";

/// Outcome of a state-changing call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Submission {
    #[schema(value_type = String)]
    pub tx_hash: TxHash,
    /// Set only when the receipt was awaited.
    pub block_number: Option<u64>,
}

/// Mutation and query surface of the department record ledger.
#[async_trait]
pub trait RecordLedger: Send + Sync {
    async fn create_genesis_block(
        &self,
        record: &AcademicRecord,
        caller: Address,
    ) -> Result<Submission, ViewerError>;

    async fn add_block(
        &self,
        record: &AcademicRecord,
        caller: Address,
    ) -> Result<Submission, ViewerError>;

    async fn get_department_blocks(
        &self,
        department: &str,
    ) -> Result<Vec<AcademicRecord>, ViewerError>;
}

/// [`RecordLedger`] backed by the deployed contract.
#[derive(Clone, Debug)]
pub struct ContractLedger<M> {
    contract: CollegeBlockChain<M>,
    wait_for_confirmation: bool,
}

impl<M: Middleware + 'static> ContractLedger<M> {
    pub fn new(address: Address, client: Arc<M>, wait_for_confirmation: bool) -> Self {
        Self {
            contract: CollegeBlockChain::new(address, client),
            wait_for_confirmation,
        }
    }

    pub fn address(&self) -> Address {
        self.contract.address()
    }

    pub(crate) fn genesis_call(
        &self,
        record: &AcademicRecord,
        caller: Address,
    ) -> Result<ContractCall<M, ()>, ViewerError> {
        let owner = parse_owner(record, CREATE_GENESIS_BLOCK)?;
        Ok(self
            .contract
            .create_genesis_block(
                record.department.clone(),
                record.student_name.clone(),
                record.usn.clone(),
                record.dob.clone(),
                record.semester.clone(),
                record.cgpa.clone(),
                owner,
            )
            .from(caller))
    }

    pub(crate) fn add_block_call(
        &self,
        record: &AcademicRecord,
        caller: Address,
    ) -> Result<ContractCall<M, ()>, ViewerError> {
        let owner = parse_owner(record, ADD_BLOCK)?;
        Ok(self
            .contract
            .add_block(
                record.department.clone(),
                record.student_name.clone(),
                record.usn.clone(),
                record.dob.clone(),
                record.semester.clone(),
                record.cgpa.clone(),
                owner,
            )
            .from(caller))
    }

    /// Send once. No retry; the receipt is awaited only when configured.
    async fn submit(
        &self,
        call: ContractCall<M, ()>,
        operation: &'static str,
    ) -> Result<Submission, ViewerError> {
        let pending = call
            .send()
            .await
            .map_err(|e| ViewerError::remote(operation, e))?;
        let tx_hash = pending.tx_hash();

        if !self.wait_for_confirmation {
            return Ok(Submission {
                tx_hash,
                block_number: None,
            });
        }

        let receipt = pending
            .await
            .map_err(|e| ViewerError::remote(operation, e))?;
        settle(operation, tx_hash, receipt)
    }
}

/// Interpret the receipt of an awaited transaction.
fn settle(
    operation: &'static str,
    tx_hash: TxHash,
    receipt: Option<TransactionReceipt>,
) -> Result<Submission, ViewerError> {
    let receipt =
        receipt.ok_or_else(|| ViewerError::remote(operation, "transaction receipt not found"))?;

    if receipt.status == Some(U64::zero()) {
        return Err(ViewerError::remote(
            operation,
            format!("transaction {:?} reverted", tx_hash),
        ));
    }

    Ok(Submission {
        tx_hash,
        block_number: receipt.block_number.map(|n| n.as_u64()),
    })
}

fn parse_owner(record: &AcademicRecord, operation: &'static str) -> Result<Address, ViewerError> {
    record.student_address.trim().parse().map_err(|e| {
        ViewerError::remote(
            operation,
            format!("invalid student address {:?}: {}", record.student_address, e),
        )
    })
}

fn into_record(block: DepartmentBlock) -> AcademicRecord {
    AcademicRecord {
        department: block.department,
        student_name: block.student_name,
        usn: block.usn,
        dob: block.dob,
        semester: block.semester,
        cgpa: block.cgpa,
        student_address: format!("{:?}", block.student_address),
    }
}

#[async_trait]
impl<M: Middleware + 'static> RecordLedger for ContractLedger<M> {
    async fn create_genesis_block(
        &self,
        record: &AcademicRecord,
        caller: Address,
    ) -> Result<Submission, ViewerError> {
        let call = self.genesis_call(record, caller)?;
        self.submit(call, CREATE_GENESIS_BLOCK).await
    }

    async fn add_block(
        &self,
        record: &AcademicRecord,
        caller: Address,
    ) -> Result<Submission, ViewerError> {
        let call = self.add_block_call(record, caller)?;
        self.submit(call, ADD_BLOCK).await
    }

    async fn get_department_blocks(
        &self,
        department: &str,
    ) -> Result<Vec<AcademicRecord>, ViewerError> {
        let blocks = self
            .contract
            .get_department_blocks(department.to_string())
            .call()
            .await
            .map_err(|e| ViewerError::remote(GET_DEPARTMENT_BLOCKS, e))?;

        Ok(blocks
            .into_iter()
            .map(
                |(department, student_name, usn, dob, semester, cgpa, student_address)| {
                    into_record(DepartmentBlock {
                        department,
                        student_name,
                        usn,
                        dob,
                        semester,
                        cgpa,
                        student_address,
                    })
                },
            )
            .collect())
    }
}
