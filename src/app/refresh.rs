use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, warn};
use crate::app::core::App;
use crate::constants::SUI_COIN_TYPE;
use crate::error::TipJarError;
use crate::utils::with_timeout;
use crate::wallet::{StatsReader, StatsSnapshot};

impl App {
    /// Tag a new stats fetch; the tag orders responses by issue time
    pub fn begin_stats_fetch(&mut self) -> (u64, StatsReader) {
        self.next_fetch_seq += 1;
        (self.next_fetch_seq, self.stats_reader.clone())
    }

    /// Apply a fetched snapshot unless a newer fetch already landed
    pub fn apply_stats(&mut self, seq: u64, snapshot: StatsSnapshot) -> bool {
        if seq <= self.applied_fetch_seq {
            warn!(seq, applied = self.applied_fetch_seq, "discarding stale stats response");
            return false;
        }
        self.applied_fetch_seq = seq;
        self.stats = Some(snapshot);
        true
    }

    pub async fn refresh_stats(app: Arc<Mutex<App>>) {
        let (seq, reader) = app.lock().await.begin_stats_fetch();
        let snapshot = reader.fetch().await;
        app.lock().await.apply_stats(seq, snapshot);
    }

    pub async fn refresh_balance(app: Arc<Mutex<App>>) {
        let (account, ledger, timeout) = {
            let guard = app.lock().await;
            match guard.current_account {
                Some(account) => (account, Arc::clone(&guard.ledger), guard.config.rpc_timeout),
                None => return,
            }
        };

        let result = with_timeout("reading wallet balance", timeout, async move {
            ledger.get_balance(account, SUI_COIN_TYPE).await.map_err(TipJarError::Ledger)
        })
        .await;

        match result {
            Ok(balance) => app.lock().await.sui_balance = Some(balance),
            Err(e) => warn!(error = %e, "failed to refresh wallet balance"),
        }
    }

    /// Explicit refresh trigger: bump the key, then re-read everything
    pub async fn request_refresh(app: Arc<Mutex<App>>) {
        let key = {
            let mut guard = app.lock().await;
            guard.refresh_key += 1;
            guard.refresh_key
        };
        debug!(refresh_key = key, "refresh requested");
        App::refresh_stats(Arc::clone(&app)).await;
        App::refresh_balance(app).await;
    }
}
