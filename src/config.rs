use clap::Parser;
use once_cell::sync::Lazy;

pub static APP_CONFIG: Lazy<Config> = Lazy::new(Config::parse);

pub const DEFAULT_CONTRACT_ADDRESS: &str = "0x3851b2E2f436cCdb8c86370C815f7625eF483a8d";

#[derive(Debug, Parser, Clone)]
pub struct Config {
    #[clap(long, env, default_value_t = 8080)]
    pub port: u16,

    #[clap(long, env, default_value_t = true)]
    pub swagger_enabled: bool,

    #[clap(long, env, default_value = "info")]
    pub log_level: String,

    /// JSON-RPC endpoint of the wallet provider. Without it every contract action is disabled.
    #[clap(long, env)]
    pub blockchain_rpc_url: Option<String>,

    #[clap(long, env, default_value = DEFAULT_CONTRACT_ADDRESS)]
    pub contract_address: String,

    /// Sign locally with this key instead of using the node's accounts.
    #[clap(long, env)]
    pub wallet_private_key: Option<String>,

    #[clap(long, env)]
    pub wait_for_confirmation: bool,

    #[clap(long, env)]
    pub skip_account_request: bool,
}

impl Config {
    pub fn provider_config(&self) -> ProviderConfig {
        ProviderConfig {
            rpc_url: self.blockchain_rpc_url.clone(),
            contract_address: self.contract_address.clone(),
            private_key: self.wallet_private_key.clone(),
            wait_for_confirmation: self.wait_for_confirmation,
            request_accounts: !self.skip_account_request,
        }
    }
}

/// Settings consumed by [`crate::blockchain::provider::connect`].
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub rpc_url: Option<String>,
    pub contract_address: String,
    pub private_key: Option<String>,
    pub wait_for_confirmation: bool,
    pub request_accounts: bool,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            rpc_url: None,
            contract_address: DEFAULT_CONTRACT_ADDRESS.to_string(),
            private_key: None,
            wait_for_confirmation: false,
            request_accounts: true,
        }
    }
}
