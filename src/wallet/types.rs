// Basic type definitions for the wallet module

use std::num::NonZeroU64;
use sui_sdk::types::base_types::ObjectID;
use crate::error::TipJarError;
use crate::utils::sui_to_mist;

/// One spendable coin of the fixed coin type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRecord {
    pub object_id: ObjectID,
    pub balance: u64,
}

/// Display model of the shared TipJar object. Values are kept as the
/// ledger rendered them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TipJarStats {
    pub owner: String,
    pub total_tips: String,
    pub tip_count: String,
}

impl Default for TipJarStats {
    fn default() -> Self {
        Self {
            owner: String::new(),
            total_tips: "0".to_string(),
            tip_count: "0".to_string(),
        }
    }
}

impl TipJarStats {
    pub fn total_tips_mist(&self) -> u64 {
        self.total_tips.parse().unwrap_or(0)
    }
}

/// Where the current stats came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatsStatus {
    /// Projected from the object's fields
    Live,
    /// Object had no structured content; defaults shown
    Missing,
    /// Fetch failed or timed out; defaults shown
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub stats: TipJarStats,
    pub status: StatsStatus,
}

impl StatsSnapshot {
    pub fn is_stale(&self) -> bool {
        self.failure().is_some()
    }

    pub fn failure(&self) -> Option<&str> {
        match &self.status {
            StatsStatus::Failed(reason) => Some(reason),
            _ => None,
        }
    }
}

/// A strictly positive tip in MIST
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TipAmount(NonZeroU64);

impl TipAmount {
    pub fn parse(input: &str) -> Result<Self, TipJarError> {
        let mist = sui_to_mist(input)?;
        NonZeroU64::new(mist)
            .map(TipAmount)
            .ok_or_else(|| TipJarError::InvalidAmount { input: input.to_string() })
    }

    #[cfg(test)]
    pub fn from_mist(mist: u64) -> Option<Self> {
        NonZeroU64::new(mist).map(TipAmount)
    }

    pub fn mist(&self) -> u64 {
        self.0.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tip_amount_must_be_positive() {
        assert!(TipAmount::parse("0").is_err());
        assert!(TipAmount::parse("0.0000000001").is_err());
        assert_eq!(TipAmount::parse("0.000000001").unwrap().mist(), 1);
        assert_eq!(TipAmount::parse("1.5").unwrap().mist(), 1_500_000_000);
    }

    #[test]
    fn test_default_stats() {
        let stats = TipJarStats::default();
        assert_eq!(stats.owner, "");
        assert_eq!(stats.total_tips, "0");
        assert_eq!(stats.tip_count, "0");
        assert_eq!(stats.total_tips_mist(), 0);
    }
}
