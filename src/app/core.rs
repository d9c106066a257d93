use std::sync::Arc;
use std::time::Duration;
use sui_sdk::types::base_types::SuiAddress;
use crate::config::TipJarConfig;
use crate::gateway::ExecutionGateway;
use crate::transactions::TransactionBuilder;
use crate::utils::shorten_id;
use crate::wallet::{LedgerClient, StatsReader, StatsSnapshot};

#[derive(Debug, Clone, PartialEq)]
pub enum MessageType {
    Error,
    Info,
    Success,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    EditingTip,
    EditingOwner,
}

pub struct App {
    pub config: TipJarConfig,
    pub ledger: Arc<dyn LedgerClient>,
    pub gateway: Arc<dyn ExecutionGateway>,
    pub builder: TransactionBuilder,
    pub stats_reader: StatsReader,
    pub current_account: Option<SuiAddress>,
    pub wallet_address: String,
    pub sui_balance: Option<u128>,
    pub stats: Option<StatsSnapshot>,
    pub tip_amount: String,
    pub new_owner: String,
    pub input_mode: InputMode,
    pub is_confirming_reset: bool,
    pub loading: bool,
    /// Bumped on every explicit refresh request
    pub refresh_key: u64,
    pub(crate) next_fetch_seq: u64,
    pub(crate) applied_fetch_seq: u64,
    pub error_message: Option<String>,
    pub success_message: Option<String>,
    pub message_type: MessageType,
}

/// What an action needs once the lock is released
#[derive(Clone)]
pub struct ActionContext {
    pub sender: SuiAddress,
    pub ledger: Arc<dyn LedgerClient>,
    pub gateway: Arc<dyn ExecutionGateway>,
    pub builder: TransactionBuilder,
    pub rpc_timeout: Duration,
    pub execution_timeout: Duration,
}

impl App {
    pub fn new(
        config: TipJarConfig,
        ledger: Arc<dyn LedgerClient>,
        gateway: Arc<dyn ExecutionGateway>,
        current_account: Option<SuiAddress>,
    ) -> App {
        let builder = TransactionBuilder::new(config.package_id, config.tip_jar_id);
        let stats_reader = StatsReader::new(Arc::clone(&ledger), config.tip_jar_id, config.rpc_timeout);
        let wallet_address = current_account
            .map(|address| shorten_id(&address.to_string()))
            .unwrap_or_else(|| "Not Connected".to_string());

        App {
            config,
            ledger,
            gateway,
            builder,
            stats_reader,
            current_account,
            wallet_address,
            sui_balance: None,
            stats: None,
            tip_amount: String::new(),
            new_owner: String::new(),
            input_mode: InputMode::Normal,
            is_confirming_reset: false,
            loading: false,
            refresh_key: 0,
            next_fetch_seq: 0,
            applied_fetch_seq: 0,
            error_message: None,
            success_message: None,
            message_type: MessageType::Info,
        }
    }

    pub fn action_context(&self) -> Option<ActionContext> {
        let sender = self.current_account?;
        Some(ActionContext {
            sender,
            ledger: Arc::clone(&self.ledger),
            gateway: Arc::clone(&self.gateway),
            builder: self.builder.clone(),
            rpc_timeout: self.config.rpc_timeout,
            execution_timeout: self.config.execution_timeout,
        })
    }

    // clear error and success message
    pub fn clear_error(&mut self) {
        self.error_message = None;
        self.success_message = None;
    }

    // set message method
    pub fn set_message(&mut self, message_type: MessageType, message: String) {
        self.message_type = message_type.clone();
        match message_type {
            MessageType::Success => {
                self.success_message = Some(message);
                self.error_message = None;
            }
            MessageType::Error | MessageType::Info => {
                self.error_message = Some(message);
                self.success_message = None;
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::path::PathBuf;
    use std::str::FromStr;
    use sui_sdk::types::base_types::ObjectID;
    use tokio::sync::Mutex;
    use crate::config::Network;
    use crate::gateway::mock::MockGateway;
    use crate::wallet::mock::MockLedger;
    use super::*;

    pub fn test_config() -> TipJarConfig {
        TipJarConfig {
            package_id: ObjectID::new([0xaa; 32]),
            tip_jar_id: ObjectID::new([0xbb; 32]),
            network: Network::Testnet,
            rpc_url: Network::Testnet.rpc_url().to_string(),
            sponsor: None,
            keystore_path: PathBuf::from("/tmp/sui.keystore"),
            client_config_path: PathBuf::from("/tmp/client.yaml"),
            gas_budget: 1_000,
            rpc_timeout: Duration::from_secs(5),
            execution_timeout: Duration::from_secs(5),
        }
    }

    pub fn test_account() -> SuiAddress {
        SuiAddress::from_str("0x00000000000000000000000000000000000000000000000000000000000000cc").unwrap()
    }

    pub fn test_app(ledger: Arc<MockLedger>, gateway: Arc<MockGateway>) -> Arc<Mutex<App>> {
        Arc::new(Mutex::new(App::new(test_config(), ledger, gateway, Some(test_account()))))
    }
}
