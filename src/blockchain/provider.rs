use std::sync::Arc;

use async_trait::async_trait;
use ethers::middleware::SignerMiddleware;
use ethers::providers::{Http, JsonRpcClient, Middleware, Provider, ProviderError, RpcError};
use ethers::signers::{LocalWallet, Signer};
use ethers::types::Address;

use super::ledger::{ContractLedger, RecordLedger};
use crate::config::ProviderConfig;
use crate::errors::ViewerError;

/// JSON-RPC "method not found".
const METHOD_NOT_FOUND: i64 = -32601;

/// Source of the accounts the user has authorized.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    async fn accounts(&self) -> Result<Vec<Address>, ViewerError>;
}

/// Accounts managed by the node behind the RPC endpoint.
#[derive(Clone, Debug)]
pub struct RpcWallet<P> {
    provider: Arc<Provider<P>>,
}

impl<P: JsonRpcClient + 'static> RpcWallet<P> {
    pub fn new(provider: Arc<Provider<P>>) -> Self {
        Self { provider }
    }

    /// Ask the node for account access. Nodes without `eth_requestAccounts`
    /// fall back to `eth_accounts`.
    pub async fn authorize(&self) -> Result<Vec<Address>, ViewerError> {
        let requested: Result<Vec<Address>, ProviderError> =
            self.provider.request("eth_requestAccounts", ()).await;

        match requested {
            Ok(accounts) => Ok(accounts),
            Err(e) if is_method_not_found(&e) => {
                tracing::debug!("eth_requestAccounts unsupported, using eth_accounts");
                self.accounts().await
            }
            Err(e) => Err(ViewerError::AuthorizationDenied(e.to_string())),
        }
    }
}

fn is_method_not_found(err: &ProviderError) -> bool {
    err.as_error_response()
        .is_some_and(|response| response.code == METHOD_NOT_FOUND)
}

#[async_trait]
impl<P: JsonRpcClient + 'static> WalletProvider for RpcWallet<P> {
    async fn accounts(&self) -> Result<Vec<Address>, ViewerError> {
        self.provider
            .get_accounts()
            .await
            .map_err(|e| ViewerError::remote("eth_accounts", e))
    }
}

/// A locally held key acting as a single-account wallet.
#[derive(Clone, Debug)]
pub struct KeyWallet {
    wallet: LocalWallet,
}

impl KeyWallet {
    pub fn new(wallet: LocalWallet) -> Self {
        Self { wallet }
    }
}

#[async_trait]
impl WalletProvider for KeyWallet {
    async fn accounts(&self) -> Result<Vec<Address>, ViewerError> {
        Ok(vec![self.wallet.address()])
    }
}

/// Handles produced by a successful [`connect`].
#[derive(Clone)]
pub struct Connection {
    pub wallet: Arc<dyn WalletProvider>,
    pub ledger: Arc<dyn RecordLedger>,
    pub chain_id: u64,
}

impl Connection {
    pub fn new(
        wallet: Arc<dyn WalletProvider>,
        ledger: Arc<dyn RecordLedger>,
        chain_id: u64,
    ) -> Self {
        Self {
            wallet,
            ledger,
            chain_id,
        }
    }

    /// First authorized account.
    pub async fn selected_account(&self) -> Result<Address, ViewerError> {
        let accounts = self.wallet.accounts().await?;
        accounts.first().copied().ok_or(ViewerError::NoAccount)
    }
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("chain_id", &self.chain_id)
            .finish_non_exhaustive()
    }
}

/// Open the provider, authorize accounts and bind the contract.
pub async fn connect(config: &ProviderConfig) -> Result<Connection, ViewerError> {
    let rpc_url = config
        .rpc_url
        .as_deref()
        .filter(|url| !url.trim().is_empty())
        .ok_or_else(|| {
            ViewerError::MissingProvider(
                "no RPC endpoint configured. Set BLOCKCHAIN_RPC_URL".to_string(),
            )
        })?;

    let contract_address: Address = config
        .contract_address
        .parse()
        .map_err(|e| ViewerError::Config(format!("Failed to parse contract address: {}", e)))?;

    let provider = Provider::<Http>::try_from(rpc_url)
        .map_err(|e| ViewerError::MissingProvider(format!("invalid RPC url: {}", e)))?;

    let chain_id = provider
        .get_chainid()
        .await
        .map_err(|e| ViewerError::MissingProvider(format!("RPC endpoint unreachable: {}", e)))?
        .as_u64();

    match &config.private_key {
        Some(private_key) => {
            let wallet: LocalWallet = private_key
                .parse()
                .map_err(|e| ViewerError::Config(format!("Failed to parse private key: {}", e)))?;
            let wallet = wallet.with_chain_id(chain_id);

            let client = Arc::new(SignerMiddleware::new(provider, wallet.clone()));
            let ledger =
                ContractLedger::new(contract_address, client, config.wait_for_confirmation);

            tracing::info!(chain_id, account = ?wallet.address(), "Using local signer");
            Ok(Connection::new(
                Arc::new(KeyWallet::new(wallet)),
                Arc::new(ledger),
                chain_id,
            ))
        }
        None => {
            let provider = Arc::new(provider);
            let wallet = RpcWallet::new(provider.clone());
            if config.request_accounts {
                let accounts = wallet.authorize().await?;
                tracing::info!(chain_id, accounts = accounts.len(), "Wallet authorized");
            }

            let ledger =
                ContractLedger::new(contract_address, provider, config.wait_for_confirmation);
            Ok(Connection::new(Arc::new(wallet), Arc::new(ledger), chain_id))
        }
    }
}
