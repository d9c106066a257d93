use std::sync::Arc;
use std::time::Duration;
use serde_json::{Map, Value};
use sui_sdk::types::base_types::ObjectID;
use tracing::{debug, warn};
use crate::constants::{FIELD_OWNER, FIELD_TIP_COUNT, FIELD_TOTAL_TIPS};
use crate::error::TipJarError;
use crate::utils::with_timeout;
use super::client::LedgerClient;
use super::types::{StatsSnapshot, StatsStatus, TipJarStats};
use super::utils::field_as_string;

/// Reads the shared TipJar object into a [`StatsSnapshot`]. Never fails:
/// any problem degrades to default stats with a non-live status.
#[derive(Clone)]
pub struct StatsReader {
    ledger: Arc<dyn LedgerClient>,
    tip_jar_id: ObjectID,
    timeout: Duration,
}

impl StatsReader {
    pub fn new(ledger: Arc<dyn LedgerClient>, tip_jar_id: ObjectID, timeout: Duration) -> Self {
        Self { ledger, tip_jar_id, timeout }
    }

    pub async fn fetch(&self) -> StatsSnapshot {
        let ledger = Arc::clone(&self.ledger);
        let id = self.tip_jar_id;
        let result = with_timeout("reading tip jar stats", self.timeout, async move {
            ledger.get_object_fields(id).await.map_err(TipJarError::Ledger)
        })
        .await;

        match result {
            Ok(Some(fields)) => StatsSnapshot {
                stats: project_stats(&fields),
                status: StatsStatus::Live,
            },
            Ok(None) => {
                debug!(tip_jar = %self.tip_jar_id, "tip jar object has no structured content");
                StatsSnapshot {
                    stats: TipJarStats::default(),
                    status: StatsStatus::Missing,
                }
            }
            Err(e) => {
                warn!(tip_jar = %self.tip_jar_id, error = %e, "error fetching tip jar stats");
                StatsSnapshot {
                    stats: TipJarStats::default(),
                    status: StatsStatus::Failed(e.to_string()),
                }
            }
        }
    }
}

pub fn project_stats(fields: &Map<String, Value>) -> TipJarStats {
    TipJarStats {
        owner: field_as_string(fields, FIELD_OWNER, ""),
        total_tips: field_as_string(fields, FIELD_TOTAL_TIPS, "0"),
        tip_count: field_as_string(fields, FIELD_TIP_COUNT, "0"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wallet::mock::{MockLedger, MockObject};
    use serde_json::json;

    fn reader(ledger: MockLedger) -> StatsReader {
        StatsReader::new(Arc::new(ledger), ObjectID::new([7u8; 32]), Duration::from_secs(5))
    }

    #[tokio::test]
    async fn test_fields_are_passed_through() {
        let ledger = MockLedger::with_fields(
            json!({ "total_tips_received": "42", "tip_count": "3", "owner": "0xabc" }),
            vec![],
        );
        let snapshot = reader(ledger).fetch().await;
        assert_eq!(snapshot.status, StatsStatus::Live);
        assert_eq!(
            snapshot.stats,
            TipJarStats {
                owner: "0xabc".to_string(),
                total_tips: "42".to_string(),
                tip_count: "3".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_missing_content_gives_defaults() {
        let snapshot = reader(MockLedger::new(MockObject::NoContent, vec![])).fetch().await;
        assert_eq!(snapshot.stats, TipJarStats::default());
        assert_eq!(snapshot.status, StatsStatus::Missing);
    }

    #[tokio::test]
    async fn test_fetch_failure_degrades() {
        let snapshot = reader(MockLedger::new(MockObject::Unreachable, vec![])).fetch().await;
        assert_eq!(snapshot.stats, TipJarStats::default());
        assert!(snapshot.is_stale());
    }

    #[tokio::test]
    async fn test_partial_fields() {
        let ledger = MockLedger::with_fields(json!({ "tip_count": 5 }), vec![]);
        let snapshot = reader(ledger).fetch().await;
        assert_eq!(snapshot.stats.tip_count, "5");
        assert_eq!(snapshot.stats.total_tips, "0");
        assert_eq!(snapshot.stats.owner, "");
    }

    #[tokio::test]
    async fn test_slow_ledger_times_out_as_failed() {
        let reader = StatsReader::new(
            Arc::new(MockLedger::new(MockObject::Hang, vec![])),
            ObjectID::new([7u8; 32]),
            Duration::from_millis(20),
        );
        let snapshot = reader.fetch().await;
        assert_eq!(snapshot.stats, TipJarStats::default());
        assert!(matches!(&snapshot.status, StatsStatus::Failed(reason) if reason.starts_with("Timed out")));
    }
}
