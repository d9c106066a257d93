mod types;
mod client;
mod utils;
mod address;
mod coins;
mod stats;
#[cfg(test)]
pub mod mock;

pub use types::{AssetRecord, StatsSnapshot, StatsStatus, TipAmount, TipJarStats};
pub use client::{LedgerClient, Wallet};
pub use address::normalize_sui_address;
pub use coins::{pick_gas_coin, select_funding_coin};
pub use stats::StatsReader;
