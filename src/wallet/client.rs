use std::sync::Arc;
use anyhow::Result;
use async_trait::async_trait;
use serde_json::{Map, Value};
use sui_sdk::{
    rpc_types::{SuiObjectDataOptions, SuiParsedData},
    types::base_types::{ObjectID, SuiAddress},
    SuiClient,
};
use super::types::AssetRecord;

/// Read side of the ledger used by the tip jar
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// Structured fields of an object, `None` when it has no Move content
    async fn get_object_fields(&self, object_id: ObjectID) -> Result<Option<Map<String, Value>>>;

    /// Every coin of `coin_type` owned by `owner`, in ledger order
    async fn get_coins(&self, owner: SuiAddress, coin_type: &str) -> Result<Vec<AssetRecord>>;

    async fn get_balance(&self, owner: SuiAddress, coin_type: &str) -> Result<u128>;
}

#[derive(Clone)]
pub struct Wallet {
    pub client: Arc<SuiClient>,
}

impl Wallet {
    pub fn new(client: Arc<SuiClient>) -> Self {
        Wallet { client }
    }
}

#[async_trait]
impl LedgerClient for Wallet {
    async fn get_object_fields(&self, object_id: ObjectID) -> Result<Option<Map<String, Value>>> {
        let response = self.client.read_api()
            .get_object_with_options(object_id, SuiObjectDataOptions::new().with_content())
            .await?;

        let fields = response.data
            .and_then(|data| data.content)
            .and_then(|content| match content {
                SuiParsedData::MoveObject(move_obj) => match move_obj.fields.to_json_value() {
                    Value::Object(map) => Some(map),
                    _ => None,
                },
                _ => None,
            });

        Ok(fields)
    }

    async fn get_coins(&self, owner: SuiAddress, coin_type: &str) -> Result<Vec<AssetRecord>> {
        let mut records = Vec::new();
        let mut cursor = None;

        loop {
            let page = self.client.coin_read_api()
                .get_coins(owner, Some(coin_type.to_string()), cursor.take(), None)
                .await?;

            records.extend(page.data.into_iter().map(|coin| AssetRecord {
                object_id: coin.coin_object_id,
                balance: coin.balance,
            }));

            if !page.has_next_page {
                break;
            }
            cursor = page.next_cursor;
            if cursor.is_none() {
                break;
            }
        }

        Ok(records)
    }

    async fn get_balance(&self, owner: SuiAddress, coin_type: &str) -> Result<u128> {
        let balance = self.client.coin_read_api()
            .get_balance(owner, Some(coin_type.to_string()))
            .await?;
        Ok(balance.total_balance)
    }
}
