use std::future::Future;
use std::path::Path;
use std::time::Duration;
use anyhow::Result;
use sui_sdk::SuiClient;
use sui_sdk::SuiClientBuilder;
use sui_sdk::types::base_types::SuiAddress;
use sui_sdk::wallet_context::WalletContext;
use crate::constants::{DISPLAY_DECIMALS, MIST_PER_SUI, SUI_DECIMALS, SUI_DECIMAL_PLACES};
use crate::error::TipJarError;

pub fn shorten_id(id: &str) -> String {
    if id.len() > 16 {
        // 0x598928d17a...4d73ffbd: first 10 chars including 0x, last 8 chars
        format!("{}...{}", &id[..10], &id[id.len()-8..])
    } else {
        id.to_string()
    }
}

/// MIST to a SUI string with three decimals, e.g. `1500000000` -> `"1.500"`
pub fn mist_to_sui_string(amount: u64) -> String {
    format!("{:.*}", DISPLAY_DECIMALS, amount as f64 / SUI_DECIMALS)
}

pub fn format_sui_balance(amount: u128) -> String {
    format!("{:.*} SUI", DISPLAY_DECIMALS, amount as f64 / SUI_DECIMALS)
}

/// Parse a decimal SUI amount into MIST.
///
/// Digits past the ninth decimal place are dropped, so the result never
/// exceeds what the user typed.
pub fn sui_to_mist(input: &str) -> Result<u64, TipJarError> {
    let invalid = || TipJarError::InvalidAmount { input: input.to_string() };
    let trimmed = input.trim();

    let (whole, fraction) = match trimmed.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (trimmed, ""),
    };
    if whole.is_empty() && fraction.is_empty() {
        return Err(invalid());
    }
    if !whole.chars().all(|c| c.is_ascii_digit()) || !fraction.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }

    let whole_mist = if whole.is_empty() {
        0
    } else {
        whole
            .parse::<u64>()
            .ok()
            .and_then(|w| w.checked_mul(MIST_PER_SUI))
            .ok_or_else(invalid)?
    };

    let mut fraction_digits: String = fraction.chars().take(SUI_DECIMAL_PLACES).collect();
    while fraction_digits.len() < SUI_DECIMAL_PLACES {
        fraction_digits.push('0');
    }
    let fraction_mist = fraction_digits.parse::<u64>().map_err(|_| invalid())?;

    whole_mist.checked_add(fraction_mist).ok_or_else(invalid)
}

/// Run a remote step with a deadline
pub async fn with_timeout<T, F>(step: &'static str, after: Duration, fut: F) -> Result<T, TipJarError>
where
    F: Future<Output = Result<T, TipJarError>>,
{
    match tokio::time::timeout(after, fut).await {
        Ok(result) => result,
        Err(_) => Err(TipJarError::Timeout { step, after }),
    }
}

pub async fn setup_for_read(rpc_url: &str, client_config: &Path) -> Result<(SuiClient, SuiAddress)> {
    let sui = SuiClientBuilder::default()
        .build(rpc_url)
        .await?;

    let mut context = WalletContext::new(client_config)?;
    let active_address = context.active_address()?;

    Ok((sui, active_address))
}
