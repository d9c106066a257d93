use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::str::FromStr;
use std::sync::Arc;
use futures::FutureExt;
use sui_sdk::types::base_types::SuiAddress;
use tokio::sync::Mutex;
use tracing::{error, info, warn};
use crate::app::core::{ActionContext, App, MessageType};
use crate::constants::SUI_COIN_TYPE;
use crate::error::{ErrorKind, TipJarError};
use crate::transactions::{TipJarAction, TransactionPlan};
use crate::utils::with_timeout;
use crate::wallet::{normalize_sui_address, select_funding_coin, TipAmount};

impl TipJarAction {
    fn failure_prefix(&self) -> &'static str {
        match self {
            TipJarAction::SendTip => "Error sending tip",
            TipJarAction::ResetStats => "Error resetting stats",
            TipJarAction::ChangeOwner => "Error changing owner",
        }
    }
}

impl App {
    fn report_failure(&mut self, action: TipJarAction, err: &TipJarError) {
        self.loading = false;
        let message = match err.kind() {
            ErrorKind::Validation | ErrorKind::Resource => {
                warn!(%action, error = %err, "action rejected");
                err.to_string()
            }
            ErrorKind::Execution | ErrorKind::Timeout => {
                error!(%action, error = %err, "transaction failed");
                format!("{}: {}", action.failure_prefix(), err)
            }
            ErrorKind::Read | ErrorKind::Build => {
                error!(%action, error = %err, "error creating transaction");
                "Error creating transaction".to_string()
            }
        };
        self.set_message(MessageType::Error, message);
    }

    /// Success continuation: clear the input the action consumed
    fn report_success(&mut self, action: TipJarAction, message: String, digest: &str) {
        info!(%action, %digest, "action succeeded");
        match action {
            TipJarAction::SendTip => self.tip_amount.clear(),
            TipJarAction::ChangeOwner => self.new_owner.clear(),
            TipJarAction::ResetStats => {}
        }
        self.set_message(MessageType::Success, message);
    }

    fn prepare(&mut self, action: TipJarAction) -> Result<ActionContext, TipJarError> {
        let context = self.action_context().ok_or(TipJarError::NotConnected)?;
        self.loading = true;
        self.is_confirming_reset = false;
        self.set_message(MessageType::Info, format!("Submitting {}...", action));
        Ok(context)
    }

    /// Shared driver: runs `work` without holding the lock, always clears
    /// `loading`, reports the outcome and refreshes stats after success.
    async fn run_action<Fut>(
        app: Arc<Mutex<App>>,
        action: TipJarAction,
        success_message: String,
        work: Fut,
    ) -> Result<String, TipJarError>
    where
        Fut: Future<Output = Result<String, TipJarError>> + Send,
    {
        let outcome = AssertUnwindSafe(work)
            .catch_unwind()
            .await
            .unwrap_or_else(|_| Err(TipJarError::Build("panicked while building transaction".to_string())));

        {
            let mut guard = app.lock().await;
            guard.loading = false;
            match &outcome {
                Ok(digest) => guard.report_success(action, success_message, digest),
                Err(e) => guard.report_failure(action, e),
            }
        }

        if outcome.is_ok() {
            App::refresh_stats(Arc::clone(&app)).await;
            App::refresh_balance(app).await;
        }
        outcome
    }

    pub async fn send_tip(app: Arc<Mutex<App>>) -> Result<String, TipJarError> {
        let action = TipJarAction::SendTip;
        let (context, amount, amount_text) = {
            let mut guard = app.lock().await;
            let prepared = TipAmount::parse(&guard.tip_amount)
                .and_then(|amount| Ok((guard.prepare(action)?, amount)));
            match prepared {
                Ok((context, amount)) => (context, amount, guard.tip_amount.trim().to_string()),
                Err(e) => {
                    guard.report_failure(action, &e);
                    return Err(e);
                }
            }
        };

        let success_message = format!("Tip of {} SUI sent successfully!", amount_text);
        App::run_action(app, action, success_message, execute_tip(context, amount)).await
    }

    pub async fn reset_stats(app: Arc<Mutex<App>>) -> Result<String, TipJarError> {
        let action = TipJarAction::ResetStats;
        let context = {
            let mut guard = app.lock().await;
            match guard.prepare(action) {
                Ok(context) => context,
                Err(e) => {
                    guard.report_failure(action, &e);
                    return Err(e);
                }
            }
        };

        let work = async move {
            let plan = context.builder.reset_stats();
            submit(&context, plan).await
        };
        App::run_action(app, action, "Tip jar stats reset successfully!".to_string(), work).await
    }

    pub async fn change_owner(app: Arc<Mutex<App>>) -> Result<String, TipJarError> {
        let action = TipJarAction::ChangeOwner;
        let (context, new_owner) = {
            let mut guard = app.lock().await;
            let prepared = parse_new_owner(&guard.new_owner)
                .and_then(|owner| Ok((guard.prepare(action)?, owner)));
            match prepared {
                Ok(prepared) => prepared,
                Err(e) => {
                    guard.report_failure(action, &e);
                    return Err(e);
                }
            }
        };

        let work = async move {
            let plan = context.builder.change_owner(new_owner);
            submit(&context, plan).await
        };
        App::run_action(app, action, "Owner changed successfully!".to_string(), work).await
    }
}

fn parse_new_owner(raw: &str) -> Result<SuiAddress, TipJarError> {
    if raw.trim().is_empty() {
        return Err(TipJarError::EmptyOwner);
    }
    let normalized = normalize_sui_address(raw)?;
    SuiAddress::from_str(&normalized).map_err(|_| TipJarError::InvalidAddress {
        input: raw.to_string(),
        reason: "not a Sui address",
    })
}

async fn execute_tip(context: ActionContext, amount: TipAmount) -> Result<String, TipJarError> {
    let ledger = Arc::clone(&context.ledger);
    let sender = context.sender;
    let coins = with_timeout("fetching coins", context.rpc_timeout, async move {
        ledger.get_coins(sender, SUI_COIN_TYPE).await.map_err(TipJarError::Ledger)
    })
    .await?;

    let coin = select_funding_coin(&coins, amount.mist(), SUI_COIN_TYPE)?;
    let plan = context.builder.send_tip(coin, amount);
    submit(&context, plan).await
}

async fn submit(context: &ActionContext, plan: TransactionPlan) -> Result<String, TipJarError> {
    let gateway = Arc::clone(&context.gateway);
    let sender = context.sender;
    with_timeout("executing transaction", context.execution_timeout, async move {
        gateway.execute(sender, plan).await
    })
    .await
}
