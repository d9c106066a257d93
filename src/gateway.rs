use std::path::Path;
use std::sync::Arc;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use shared_crypto::intent::Intent;
use sui_keys::keystore::{AccountKeystore, FileBasedKeystore};
use sui_sdk::{
    rpc_types::{
        Coin,
        SuiObjectDataOptions,
        SuiTransactionBlockEffectsAPI,
        SuiTransactionBlockResponseOptions,
    },
    types::{
        base_types::{ObjectID, ObjectRef, SequenceNumber, SuiAddress},
        transaction::{Transaction, TransactionData},
    },
    SuiClient,
};
use sui_types::{
    object::Owner,
    quorum_driver_types::ExecuteTransactionRequestType,
    transaction::{CallArg, ObjectArg, SharedObjectMutability},
};
use tracing::{debug, info};
use crate::constants::{GAS_BUDGET, SUI_COIN_TYPE};
use crate::error::TipJarError;
use crate::transactions::{PlanInput, TransactionPlan};
use crate::wallet::{pick_gas_coin, AssetRecord};

/// Fee sponsored submission. Exactly one outcome per plan: the digest on
/// success, the failure cause otherwise.
#[async_trait]
pub trait ExecutionGateway: Send + Sync {
    async fn execute(&self, sender: SuiAddress, plan: TransactionPlan) -> Result<String, TipJarError>;
}

/// Which coin pays gas for a plan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GasSource {
    /// A sponsor coin the plan doesn't touch
    Separate(ObjectID),
    /// The coin the plan splits from; the split then comes off the gas coin
    PlanCoin(ObjectID),
}

/// Prefer a coin outside the plan. A self-sponsored sender whose only
/// usable coin is the one being split pays gas from that coin, provided it
/// covers both the split and the budget.
pub fn choose_gas(
    coins: &[AssetRecord],
    plan: &TransactionPlan,
    budget: u64,
    self_sponsored: bool,
) -> Option<GasSource> {
    if let Some(coin) = pick_gas_coin(coins, &plan.object_ids(), budget) {
        return Some(GasSource::Separate(coin.object_id));
    }
    if !self_sponsored {
        return None;
    }
    let (source, amount) = plan.split_source()?;
    let needed = budget.checked_add(amount)?;
    coins
        .iter()
        .find(|coin| coin.object_id == source && coin.balance >= needed)
        .map(|coin| GasSource::PlanCoin(coin.object_id))
}

/// Gas configuration for transactions
#[derive(Debug, Clone)]
pub struct GasConfig {
    pub budget: u64,
    pub price: Option<u64>,
}

impl Default for GasConfig {
    fn default() -> Self {
        Self {
            budget: GAS_BUDGET,
            price: None,
        }
    }
}

/// Signs for both the sender and the sponsor from the local keystore and
/// pays gas from the sponsor's coins
pub struct SponsoredExecutor {
    sui_client: Arc<SuiClient>,
    keystore: FileBasedKeystore,
    sponsor: SuiAddress,
    gas_config: GasConfig,
}

impl SponsoredExecutor {
    pub fn new(
        sui_client: Arc<SuiClient>,
        keystore_path: &Path,
        sponsor: SuiAddress,
        gas_config: GasConfig,
    ) -> Result<Self> {
        let keystore = FileBasedKeystore::load_or_create(&keystore_path.to_path_buf())?;
        Ok(Self {
            sui_client,
            keystore,
            sponsor,
            gas_config,
        })
    }

    /// Every SUI coin the sponsor owns, across all pages
    async fn sponsor_coins(&self) -> Result<Vec<Coin>> {
        let mut coins = Vec::new();
        let mut cursor = None;

        loop {
            let page = self.sui_client
                .coin_read_api()
                .get_coins(self.sponsor, Some(SUI_COIN_TYPE.to_string()), cursor.take(), None)
                .await?;
            coins.extend(page.data);

            if !page.has_next_page {
                break;
            }
            cursor = page.next_cursor;
            if cursor.is_none() {
                break;
            }
        }

        Ok(coins)
    }

    /// Get the initial shared version of a shared object
    async fn get_shared_object(&self, object_id: ObjectID) -> Result<SequenceNumber> {
        let object = self.sui_client
            .read_api()
            .get_object_with_options(object_id, SuiObjectDataOptions::new().with_owner())
            .await?
            .data
            .ok_or_else(|| anyhow!("Object {} not found", object_id))?;

        match object.owner {
            Some(Owner::Shared { initial_shared_version }) => Ok(initial_shared_version),
            _ => Err(anyhow!("Object {} is not a shared object", object_id)),
        }
    }

    async fn get_owned_object(&self, object_id: ObjectID) -> Result<ObjectRef> {
        let object = self.sui_client
            .read_api()
            .get_object_with_options(object_id, SuiObjectDataOptions::new().with_owner())
            .await?
            .data
            .ok_or_else(|| anyhow!("Object {} not found", object_id))?;

        Ok((object_id, object.version, object.digest))
    }

    /// Resolve every plan input into a call argument, in plan order
    async fn resolve_inputs(&self, inputs: &[PlanInput]) -> Result<Vec<CallArg>> {
        let mut call_args = Vec::with_capacity(inputs.len());
        for input in inputs {
            let arg = match input {
                PlanInput::SharedObject { id, mutable } => {
                    let initial_shared_version = self.get_shared_object(*id).await?;
                    CallArg::Object(ObjectArg::SharedObject {
                        id: *id,
                        initial_shared_version,
                        mutability: if *mutable {
                            SharedObjectMutability::Mutable
                        } else {
                            SharedObjectMutability::Immutable
                        },
                    })
                }
                PlanInput::OwnedObject(id) => {
                    CallArg::Object(ObjectArg::ImmOrOwnedObject(self.get_owned_object(*id).await?))
                }
                pure => pure
                    .pure_call_arg()?
                    .ok_or_else(|| anyhow!("unsupported plan input {:?}", pure))?,
            };
            call_args.push(arg);
        }
        Ok(call_args)
    }

    async fn build_transaction(&self, sender: SuiAddress, plan: TransactionPlan) -> Result<TransactionData> {
        let coins = self.sponsor_coins().await?;
        let records: Vec<AssetRecord> = coins
            .iter()
            .map(|coin| AssetRecord { object_id: coin.coin_object_id, balance: coin.balance })
            .collect();

        let budget = self.gas_config.budget;
        let source = choose_gas(&records, &plan, budget, self.sponsor == sender).ok_or_else(|| {
            anyhow!("Sponsor {} has no coin covering the gas budget of {} MIST", self.sponsor, budget)
        })?;
        let (gas_id, plan) = match source {
            GasSource::Separate(id) => (id, plan),
            GasSource::PlanCoin(id) => {
                debug!(coin = %id, "splitting from the gas coin");
                let plan = plan
                    .pay_from_gas(id)
                    .ok_or_else(|| anyhow!("plan does not spend coin {}", id))?;
                (id, plan)
            }
        };
        let gas_coin = coins
            .iter()
            .find(|coin| coin.coin_object_id == gas_id)
            .map(|coin| coin.object_ref())
            .ok_or_else(|| anyhow!("gas coin {} disappeared", gas_id))?;

        let call_args = self.resolve_inputs(plan.inputs()).await?;
        let pt = plan.into_programmable(call_args)?;

        let gas_price = match self.gas_config.price {
            Some(price) => price,
            None => self.sui_client.read_api().get_reference_gas_price().await?,
        };

        Ok(TransactionData::new_programmable_allow_sponsor(
            sender,
            vec![gas_coin],
            pt,
            budget,
            gas_price,
            self.sponsor,
        ))
    }

    async fn sign_and_execute(&self, sender: SuiAddress, tx_data: TransactionData) -> Result<String> {
        let mut signatures = vec![
            self.keystore.sign_secure(&sender, &tx_data, Intent::sui_transaction()).await?,
        ];
        if self.sponsor != sender {
            signatures.push(
                self.keystore.sign_secure(&self.sponsor, &tx_data, Intent::sui_transaction()).await?,
            );
        }

        let response = self.sui_client
            .quorum_driver_api()
            .execute_transaction_block(
                Transaction::from_data(tx_data, signatures),
                SuiTransactionBlockResponseOptions::new().with_effects(),
                Some(ExecuteTransactionRequestType::WaitForLocalExecution),
            )
            .await?;

        if let Some(effects) = &response.effects {
            if !effects.status().is_ok() {
                return Err(anyhow!("Transaction failed: {:?}", effects.status()));
            }
        }

        Ok(response.digest.base58_encode())
    }
}

#[async_trait]
impl ExecutionGateway for SponsoredExecutor {
    async fn execute(&self, sender: SuiAddress, plan: TransactionPlan) -> Result<String, TipJarError> {
        let action = plan.action();
        debug!(%action, commands = plan.commands().len(), ?plan, "submitting sponsored transaction");

        let tx_data = self.build_transaction(sender, plan)
            .await
            .map_err(|e| TipJarError::Execution(format!("{:#}", e)))?;
        let digest = self.sign_and_execute(sender, tx_data)
            .await
            .map_err(|e| TipJarError::Execution(format!("{:#}", e)))?;

        info!(%action, %digest, sponsor = %self.sponsor, "transaction executed");
        Ok(digest)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::transactions::TransactionBuilder;
    use crate::wallet::mock::coin;
    use crate::wallet::TipAmount;

    const BUDGET: u64 = 100_000_000;

    fn tip_plan(source: &AssetRecord, sui: &str) -> TransactionPlan {
        TransactionBuilder::new(ObjectID::new([0xaa; 32]), ObjectID::new([0xbb; 32]))
            .send_tip(source, TipAmount::parse(sui).unwrap())
    }

    #[test]
    fn test_single_coin_self_sponsored_pays_gas_from_tip_coin() {
        let coins = vec![coin(1, 2_000_000_000)];
        let plan = tip_plan(&coins[0], "1");
        assert_eq!(
            choose_gas(&coins, &plan, BUDGET, true),
            Some(GasSource::PlanCoin(coins[0].object_id))
        );
    }

    #[test]
    fn test_separate_sponsor_needs_its_own_coin() {
        let coins = vec![coin(1, 2_000_000_000)];
        let plan = tip_plan(&coins[0], "1");
        assert_eq!(choose_gas(&coins, &plan, BUDGET, false), None);
    }

    #[test]
    fn test_untouched_coin_is_preferred() {
        let coins = vec![coin(1, 2_000_000_000), coin(2, 50), coin(3, BUDGET)];
        let plan = tip_plan(&coins[0], "1");
        assert_eq!(
            choose_gas(&coins, &plan, BUDGET, true),
            Some(GasSource::Separate(coins[2].object_id))
        );
    }

    #[test]
    fn test_tip_coin_must_cover_tip_and_budget() {
        let coins = vec![coin(1, 1_000_000_000 + BUDGET - 1)];
        let plan = tip_plan(&coins[0], "1");
        assert_eq!(choose_gas(&coins, &plan, BUDGET, true), None);
    }

    #[test]
    fn test_plan_without_split_needs_a_gas_coin() {
        let plan = TransactionBuilder::new(ObjectID::new([0xaa; 32]), ObjectID::new([0xbb; 32])).reset_stats();
        assert_eq!(choose_gas(&[coin(1, 10)], &plan, BUDGET, true), None);
        assert_eq!(
            choose_gas(&[coin(1, BUDGET)], &plan, BUDGET, true),
            Some(GasSource::Separate(coin(1, BUDGET).object_id))
        );
    }
}
