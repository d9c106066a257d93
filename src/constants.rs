/// Move module holding the tip jar entry points
pub const TIP_JAR_MODULE: &str = "tip_jar_contract";
pub const SEND_TIP_FUNCTION: &str = "send_tip";
pub const RESET_STATS_FUNCTION: &str = "reset_stats";
pub const CHANGE_OWNER_FUNCTION: &str = "change_owner";

/// Fields read from the shared TipJar object
pub const FIELD_OWNER: &str = "owner";
pub const FIELD_TOTAL_TIPS: &str = "total_tips_received";
pub const FIELD_TIP_COUNT: &str = "tip_count";

pub const SUI_COIN_TYPE: &str = "0x2::sui::SUI";

/// Deployment ids default to this and must be overridden
pub const PLACEHOLDER_ID: &str = "0x0";

// Global constants
pub const GAS_BUDGET: u64 = 100_000_000;

pub const SUI_DECIMAL_PLACES: usize = 9;
pub const MIST_PER_SUI: u64 = 1_000_000_000;
pub const SUI_DECIMALS: f64 = 1_000_000_000.0;
pub const DISPLAY_DECIMALS: usize = 3;

pub const SUI_ADDRESS_HEX_LEN: usize = 64;

pub const RPC_TIMEOUT_SECS: u64 = 30;
pub const EXECUTION_TIMEOUT_SECS: u64 = 60;
pub const UI_POLL_INTERVAL_MILLIS: u64 = 50;

pub const MESSAGE_AREA_MARGIN: u16 = 4;
pub const DEFAULT_LOG_FILE: &str = "tip-jar.log";

pub const NETWORKS: [(&str, &str); 3] = [
    ("devnet", "https://fullnode.devnet.sui.io:443"),
    ("testnet", "https://fullnode.testnet.sui.io:443"),
    ("mainnet", "https://fullnode.mainnet.sui.io:443"),
];
