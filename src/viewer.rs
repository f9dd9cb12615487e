use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use ethers::types::Address;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use utoipa::ToSchema;

use crate::blockchain::ledger::Submission;
use crate::blockchain::provider::{Connection, connect};
use crate::blockchain::record::{
    AcademicRecord, DepartmentRecordSet, RecordForm, require_department,
};
use crate::config::ProviderConfig;
use crate::errors::ViewerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Disconnected,
    Connected,
    Submitting,
    Querying,
}

/// What the results area currently shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ResultsView {
    #[default]
    NotQueried,
    Loaded(DepartmentRecordSet),
    Failed {
        department: String,
        error: String,
    },
}

impl ResultsView {
    pub fn records(&self) -> &[AcademicRecord] {
        match self {
            Self::Loaded(set) => &set.records,
            _ => &[],
        }
    }
}

#[derive(Default)]
struct InFlight {
    writes: AtomicUsize,
    reads: AtomicUsize,
}

/// Decrements its counter when the action completes, whatever the outcome.
struct InFlightGuard<'a>(&'a AtomicUsize);

impl<'a> InFlightGuard<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Form/table controller. Cheap to clone; clones share the results area.
#[derive(Clone, Default)]
pub struct Viewer {
    connection: Option<Connection>,
    results: Arc<RwLock<ResultsView>>,
    in_flight: Arc<InFlight>,
}

impl Viewer {
    pub fn new(connection: Option<Connection>) -> Self {
        Self {
            connection,
            ..Self::default()
        }
    }

    /// Connect once. A failed connection leaves the viewer disconnected.
    pub async fn mount(config: &ProviderConfig) -> Self {
        match connect(config).await {
            Ok(connection) => {
                tracing::info!(chain_id = connection.chain_id, "Connected to wallet provider");
                Self::new(Some(connection))
            }
            Err(e) => {
                tracing::error!(kind = ?e.kind(), "Error initializing provider: {}", e);
                Self::new(None)
            }
        }
    }

    pub fn chain_id(&self) -> Option<u64> {
        self.connection.as_ref().map(|c| c.chain_id)
    }

    pub fn phase(&self) -> Phase {
        if self.connection.is_none() {
            Phase::Disconnected
        } else if self.in_flight.writes.load(Ordering::SeqCst) > 0 {
            Phase::Submitting
        } else if self.in_flight.reads.load(Ordering::SeqCst) > 0 {
            Phase::Querying
        } else {
            Phase::Connected
        }
    }

    pub async fn results(&self) -> ResultsView {
        self.results.read().await.clone()
    }

    fn connection(&self) -> Result<&Connection, ViewerError> {
        self.connection.as_ref().ok_or_else(|| {
            ViewerError::MissingProvider("Ensure a wallet provider is configured.".to_string())
        })
    }

    pub async fn selected_account(&self) -> Result<Address, ViewerError> {
        let result = match self.connection() {
            Ok(connection) => connection.selected_account().await,
            Err(e) => Err(e),
        };
        log_failure("Error resolving account", result)
    }

    pub async fn create_genesis_block(&self, form: &RecordForm) -> Result<Submission, ViewerError> {
        let result = self.submit(form, WriteAction::Genesis).await;
        log_failure("Error creating genesis block", result)
    }

    pub async fn add_block(&self, form: &RecordForm) -> Result<Submission, ViewerError> {
        let result = self.submit(form, WriteAction::Append).await;
        log_failure("Error adding block", result)
    }

    async fn submit(&self, form: &RecordForm, action: WriteAction) -> Result<Submission, ViewerError> {
        let record = form.to_record()?;
        let connection = self.connection()?;
        let _guard = InFlightGuard::enter(&self.in_flight.writes);

        let caller = connection.selected_account().await?;
        let submission = match action {
            WriteAction::Genesis => connection.ledger.create_genesis_block(&record, caller).await?,
            WriteAction::Append => connection.ledger.add_block(&record, caller).await?,
        };

        tracing::info!(
            department = %record.department,
            caller = ?caller,
            tx_hash = ?submission.tx_hash,
            "{} submitted",
            action.name()
        );
        Ok(submission)
    }

    /// Query a department for the page. The outcome replaces the results
    /// area, whichever query finishes last wins.
    pub async fn get_department_blocks(
        &self,
        department: &str,
    ) -> Result<DepartmentRecordSet, ViewerError> {
        let result = match self.fetch(department).await {
            Ok(set) => {
                *self.results.write().await = ResultsView::Loaded(set.clone());
                Ok(set)
            }
            Err(e @ ViewerError::RemoteCall { .. }) => {
                *self.results.write().await = ResultsView::Failed {
                    department: department.to_string(),
                    error: e.to_string(),
                };
                Err(e)
            }
            Err(e) => Err(e),
        };
        log_failure("Error retrieving blocks", result)
    }

    /// Query a department without touching the page's results area.
    pub async fn query_department_blocks(
        &self,
        department: &str,
    ) -> Result<DepartmentRecordSet, ViewerError> {
        let result = self.fetch(department).await;
        log_failure("Error retrieving blocks", result)
    }

    async fn fetch(&self, department: &str) -> Result<DepartmentRecordSet, ViewerError> {
        let department = require_department(department)?;
        let connection = self.connection()?;
        let _guard = InFlightGuard::enter(&self.in_flight.reads);

        let records = connection.ledger.get_department_blocks(department).await?;
        let set = DepartmentRecordSet::new(department, records);
        tracing::info!(department, rows = set.records.len(), "Department blocks retrieved");
        Ok(set)
    }
}

#[derive(Debug, Clone, Copy)]
enum WriteAction {
    Genesis,
    Append,
}

impl WriteAction {
    fn name(self) -> &'static str {
        match self {
            Self::Genesis => "Genesis block",
            Self::Append => "Block",
        }
    }
}

fn log_failure<T>(context: &str, result: Result<T, ViewerError>) -> Result<T, ViewerError> {
    if let Err(e) = &result {
        tracing::error!(kind = ?e.kind(), "{}: {}", context, e);
    }
    result
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::AtomicUsize;

    use async_trait::async_trait;
    use ethers::types::TxHash;
    use tokio::sync::oneshot;

    use super::*;
    use crate::blockchain::ledger::RecordLedger;
    use crate::blockchain::provider::tests::StaticWallet;
    use crate::blockchain::record::tests::complete_form;
    use crate::errors::ErrorKind;

    #[derive(Debug, Clone, PartialEq)]
    pub(crate) enum LedgerCall {
        Genesis(AcademicRecord, Address),
        Append(AcademicRecord, Address),
        Query(String),
    }

    /// In-memory ledger recording every call it receives.
    #[derive(Default)]
    pub(crate) struct FakeLedger {
        pub calls: Mutex<Vec<LedgerCall>>,
        pub blocks: Mutex<Vec<AcademicRecord>>,
        pub fail_with: Mutex<Option<String>>,
        /// Per-department gates; a query waits on its gate before answering.
        pub gates: Mutex<Vec<(String, oneshot::Receiver<Vec<AcademicRecord>>)>>,
        pub writes: AtomicUsize,
    }

    impl FakeLedger {
        fn failure(&self, operation: &'static str) -> Result<(), ViewerError> {
            match self.fail_with.lock().unwrap().clone() {
                Some(reason) => Err(ViewerError::remote(operation, reason)),
                None => Ok(()),
            }
        }

        pub(crate) fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl RecordLedger for FakeLedger {
        async fn create_genesis_block(
            &self,
            record: &AcademicRecord,
            caller: Address,
        ) -> Result<Submission, ViewerError> {
            self.calls
                .lock()
                .unwrap()
                .push(LedgerCall::Genesis(record.clone(), caller));
            self.failure("createGenesisBlock")?;
            let n = self.writes.fetch_add(1, Ordering::SeqCst) as u64;
            Ok(Submission {
                tx_hash: TxHash::from_low_u64_be(n + 1),
                block_number: None,
            })
        }

        async fn add_block(
            &self,
            record: &AcademicRecord,
            caller: Address,
        ) -> Result<Submission, ViewerError> {
            self.calls
                .lock()
                .unwrap()
                .push(LedgerCall::Append(record.clone(), caller));
            self.failure("addBlock")?;
            let n = self.writes.fetch_add(1, Ordering::SeqCst) as u64;
            Ok(Submission {
                tx_hash: TxHash::from_low_u64_be(n + 1),
                block_number: None,
            })
        }

        async fn get_department_blocks(
            &self,
            department: &str,
        ) -> Result<Vec<AcademicRecord>, ViewerError> {
            self.calls
                .lock()
                .unwrap()
                .push(LedgerCall::Query(department.to_string()));
            self.failure("getDepartmentBlocks")?;

            let gate = {
                let mut gates = self.gates.lock().unwrap();
                gates
                    .iter()
                    .position(|(name, _)| name == department)
                    .map(|index| gates.remove(index).1)
            };
            if let Some(gate) = gate {
                return gate
                    .await
                    .map_err(|e| ViewerError::remote("getDepartmentBlocks", e));
            }

            Ok(self
                .blocks
                .lock()
                .unwrap()
                .iter()
                .filter(|record| record.department == department)
                .cloned()
                .collect())
        }
    }

    pub(crate) fn account() -> Address {
        Address::from_low_u64_be(0xacc0)
    }

    pub(crate) fn connected(ledger: Arc<FakeLedger>) -> Viewer {
        connected_with(ledger, vec![account(), Address::from_low_u64_be(0xbeef)])
    }

    pub(crate) fn connected_with(ledger: Arc<FakeLedger>, accounts: Vec<Address>) -> Viewer {
        Viewer::new(Some(Connection::new(
            Arc::new(StaticWallet(accounts)),
            ledger,
            1337,
        )))
    }

    fn record(department: &str, usn: &str) -> AcademicRecord {
        let mut form = complete_form();
        form.department = department.into();
        form.usn = usn.into();
        form.to_record().unwrap()
    }

    #[tokio::test]
    async fn incomplete_form_makes_no_calls() {
        let ledger = Arc::new(FakeLedger::default());
        let viewer = connected(ledger.clone());

        for field in 0..7 {
            let mut form = complete_form();
            match field {
                0 => form.department.clear(),
                1 => form.student_name.clear(),
                2 => form.usn.clear(),
                3 => form.dob.clear(),
                4 => form.semester.clear(),
                5 => form.cgpa.clear(),
                _ => form.student_address.clear(),
            }

            let err = viewer.create_genesis_block(&form).await.unwrap_err();
            assert_eq!(err.kind(), ErrorKind::IncompleteInput);
            let err = viewer.add_block(&form).await.unwrap_err();
            assert_eq!(err.kind(), ErrorKind::IncompleteInput);
        }

        assert_eq!(ledger.call_count(), 0);
    }

    #[tokio::test]
    async fn genesis_is_submitted_once_as_the_selected_account() {
        let ledger = Arc::new(FakeLedger::default());
        let viewer = connected(ledger.clone());
        let form = complete_form();

        let submission = viewer.create_genesis_block(&form).await.unwrap();

        assert_eq!(submission.tx_hash, TxHash::from_low_u64_be(1));
        assert_eq!(
            *ledger.calls.lock().unwrap(),
            vec![LedgerCall::Genesis(form.to_record().unwrap(), account())]
        );
    }

    #[tokio::test]
    async fn values_are_submitted_as_typed() {
        let ledger = Arc::new(FakeLedger::default());
        let viewer = connected(ledger.clone());
        let mut form = complete_form();
        form.department = "  CS ".into();
        form.cgpa = "9.1 ".into();

        viewer.add_block(&form).await.unwrap();
        viewer.get_department_blocks(" CS").await.unwrap();

        let calls = ledger.calls.lock().unwrap();
        match calls.as_slice() {
            [LedgerCall::Append(record, _), LedgerCall::Query(department)] => {
                assert_eq!(record.department, "  CS ");
                assert_eq!(record.cgpa, "9.1 ");
                assert_eq!(department, " CS");
            }
            other => panic!("unexpected calls: {:?}", other),
        }
    }

    #[tokio::test]
    async fn add_block_does_not_check_for_genesis_locally() {
        let ledger = Arc::new(FakeLedger::default());
        let viewer = connected(ledger.clone());

        viewer.add_block(&complete_form()).await.unwrap();

        assert!(matches!(
            ledger.calls.lock().unwrap().as_slice(),
            [LedgerCall::Append(_, caller)] if *caller == account()
        ));
    }

    #[tokio::test]
    async fn no_account_skips_submission() {
        let ledger = Arc::new(FakeLedger::default());
        let viewer = connected_with(ledger.clone(), vec![]);

        let err = viewer.create_genesis_block(&complete_form()).await.unwrap_err();

        assert!(matches!(err, ViewerError::NoAccount));
        assert_eq!(ledger.call_count(), 0);
    }

    #[tokio::test]
    async fn disconnected_viewer_reports_missing_provider() {
        let viewer = Viewer::new(None);
        assert_eq!(viewer.phase(), Phase::Disconnected);

        let err = viewer.create_genesis_block(&complete_form()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingProvider);
        let err = viewer.add_block(&complete_form()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingProvider);
        let err = viewer.get_department_blocks("CS").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingProvider);
        assert_eq!(viewer.results().await, ResultsView::NotQueried);
    }

    #[tokio::test]
    async fn mount_without_provider_is_disconnected() {
        let viewer = Viewer::mount(&ProviderConfig::default()).await;
        assert_eq!(viewer.phase(), Phase::Disconnected);
        assert_eq!(viewer.chain_id(), None);
    }

    #[tokio::test]
    async fn remote_failure_is_returned_not_retried() {
        let ledger = Arc::new(FakeLedger::default());
        *ledger.fail_with.lock().unwrap() = Some("execution reverted".into());
        let viewer = connected(ledger.clone());

        let err = viewer.create_genesis_block(&complete_form()).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::RemoteCallFailure);
        assert_eq!(ledger.call_count(), 1);
        assert_eq!(viewer.phase(), Phase::Connected);
    }

    #[tokio::test]
    async fn query_replaces_results_and_keeps_order() {
        let ledger = Arc::new(FakeLedger::default());
        *ledger.blocks.lock().unwrap() = vec![
            record("CS", "003"),
            record("EE", "001"),
            record("CS", "001"),
        ];
        let viewer = connected(ledger.clone());

        let set = viewer.get_department_blocks("CS").await.unwrap();
        assert_eq!(set.department, "CS");
        let usns: Vec<_> = set.records.iter().map(|r| r.usn.as_str()).collect();
        assert_eq!(usns, ["003", "001"]);
        assert_eq!(viewer.results().await.records().len(), 2);

        let set = viewer.get_department_blocks("EE").await.unwrap();
        assert_eq!(set.records.len(), 1);
        assert_eq!(viewer.results().await, ResultsView::Loaded(set));
    }

    #[tokio::test]
    async fn empty_and_failed_queries_are_distinguishable() {
        let ledger = Arc::new(FakeLedger::default());
        let viewer = connected(ledger.clone());

        let set = viewer.get_department_blocks("ME").await.unwrap();
        assert!(set.is_empty());
        assert!(matches!(viewer.results().await, ResultsView::Loaded(_)));

        *ledger.fail_with.lock().unwrap() = Some("rpc timeout".into());
        let err = viewer.get_department_blocks("ME").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RemoteCallFailure);
        assert!(matches!(
            viewer.results().await,
            ResultsView::Failed { department, .. } if department == "ME"
        ));
    }

    #[tokio::test]
    async fn api_query_leaves_page_results_alone() {
        let ledger = Arc::new(FakeLedger::default());
        *ledger.blocks.lock().unwrap() = vec![record("CS", "001")];
        let viewer = connected(ledger.clone());

        let set = viewer.query_department_blocks("CS").await.unwrap();
        assert_eq!(set.records.len(), 1);
        assert_eq!(viewer.results().await, ResultsView::NotQueried);

        *ledger.fail_with.lock().unwrap() = Some("rpc timeout".into());
        viewer.query_department_blocks("CS").await.unwrap_err();
        assert_eq!(viewer.results().await, ResultsView::NotQueried);
        assert_eq!(ledger.call_count(), 2);
    }

    #[tokio::test]
    async fn blank_department_is_not_queried() {
        let ledger = Arc::new(FakeLedger::default());
        let viewer = connected(ledger.clone());

        let err = viewer.get_department_blocks("   ").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IncompleteInput);
        assert_eq!(ledger.call_count(), 0);
    }

    #[tokio::test]
    async fn last_completed_query_wins() {
        let ledger = Arc::new(FakeLedger::default());
        let (cs_tx, cs_rx) = oneshot::channel();
        let (ee_tx, ee_rx) = oneshot::channel();
        ledger
            .gates
            .lock()
            .unwrap()
            .extend([("CS".to_string(), cs_rx), ("EE".to_string(), ee_rx)]);
        let viewer = connected(ledger.clone());

        let cs = tokio::spawn({
            let viewer = viewer.clone();
            async move { viewer.get_department_blocks("CS").await }
        });
        let ee = tokio::spawn({
            let viewer = viewer.clone();
            async move { viewer.get_department_blocks("EE").await }
        });

        while ledger.call_count() < 2 {
            tokio::task::yield_now().await;
        }
        assert_eq!(viewer.phase(), Phase::Querying);

        // EE was issued second but completes first; CS completes last.
        ee_tx.send(vec![record("EE", "100")]).unwrap();
        ee.await.unwrap().unwrap();
        cs_tx
            .send(vec![record("CS", "200"), record("CS", "201")])
            .unwrap();
        cs.await.unwrap().unwrap();

        match viewer.results().await {
            ResultsView::Loaded(set) => {
                assert_eq!(set.department, "CS");
                assert_eq!(set.records.len(), 2);
            }
            other => panic!("unexpected results: {:?}", other),
        }
        assert_eq!(viewer.phase(), Phase::Connected);
    }
}
