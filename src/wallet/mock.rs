//! In-memory ledger used by the tests

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde_json::{Map, Value};
use sui_sdk::types::base_types::{ObjectID, SuiAddress};
use super::client::LedgerClient;
use super::types::AssetRecord;

pub enum MockObject {
    Fields(Map<String, Value>),
    NoContent,
    Unreachable,
    /// Never answers within any test timeout
    Hang,
}

pub struct MockLedger {
    pub object: Mutex<MockObject>,
    pub coins: Mutex<Vec<AssetRecord>>,
    pub object_fetches: AtomicUsize,
    pub coin_fetches: AtomicUsize,
}

impl MockLedger {
    pub fn new(object: MockObject, coins: Vec<AssetRecord>) -> Self {
        Self {
            object: Mutex::new(object),
            coins: Mutex::new(coins),
            object_fetches: AtomicUsize::new(0),
            coin_fetches: AtomicUsize::new(0),
        }
    }

    pub fn with_fields(fields: Value, coins: Vec<AssetRecord>) -> Self {
        match fields {
            Value::Object(map) => Self::new(MockObject::Fields(map), coins),
            _ => Self::new(MockObject::NoContent, coins),
        }
    }

    pub fn object_fetches(&self) -> usize {
        self.object_fetches.load(Ordering::SeqCst)
    }

    pub fn coin_fetches(&self) -> usize {
        self.coin_fetches.load(Ordering::SeqCst)
    }
}

pub fn coin(last_byte: u8, balance: u64) -> AssetRecord {
    let mut bytes = [0u8; 32];
    bytes[31] = last_byte;
    AssetRecord {
        object_id: ObjectID::new(bytes),
        balance,
    }
}

#[async_trait]
impl LedgerClient for MockLedger {
    async fn get_object_fields(&self, _object_id: ObjectID) -> Result<Option<Map<String, Value>>> {
        self.object_fetches.fetch_add(1, Ordering::SeqCst);
        let hangs = matches!(*self.object.lock().unwrap(), MockObject::Hang);
        if hangs {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        }
        match &*self.object.lock().unwrap() {
            MockObject::Fields(fields) => Ok(Some(fields.clone())),
            MockObject::NoContent | MockObject::Hang => Ok(None),
            MockObject::Unreachable => Err(anyhow!("connection refused")),
        }
    }

    async fn get_coins(&self, _owner: SuiAddress, _coin_type: &str) -> Result<Vec<AssetRecord>> {
        self.coin_fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self.coins.lock().unwrap().clone())
    }

    async fn get_balance(&self, _owner: SuiAddress, _coin_type: &str) -> Result<u128> {
        Ok(self.coins.lock().unwrap().iter().map(|c| c.balance as u128).sum())
    }
}
