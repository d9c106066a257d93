use sui_sdk::types::base_types::ObjectID;
use crate::error::TipJarError;
use super::types::AssetRecord;

/// Pick the coin to split a tip from.
///
/// Single pass in ledger order: the first coin covering `target` wins,
/// otherwise the largest coin seen so far is kept as a fallback. Returns
/// `None` only for an empty slice.
pub fn select_coin(coins: &[AssetRecord], target: u64) -> Option<&AssetRecord> {
    let mut selected = coins.first()?;
    for coin in coins {
        if coin.balance >= target {
            selected = coin;
            break;
        }
        if coin.balance > selected.balance {
            selected = coin;
        }
    }
    Some(selected)
}

/// Select a coin and make sure it covers the tip
pub fn select_funding_coin<'a>(
    coins: &'a [AssetRecord],
    target: u64,
    coin_type: &str,
) -> Result<&'a AssetRecord, TipJarError> {
    let selected = select_coin(coins, target)
        .ok_or_else(|| TipJarError::NoCoins { coin_type: coin_type.to_string() })?;
    ensure_sufficient(selected, target)?;
    Ok(selected)
}

pub fn ensure_sufficient(coin: &AssetRecord, target: u64) -> Result<(), TipJarError> {
    if coin.balance < target {
        return Err(TipJarError::InsufficientBalance {
            required: target,
            available: coin.balance,
        });
    }
    Ok(())
}

/// First coin that can pay `budget` in gas and isn't used by the
/// transaction itself
pub fn pick_gas_coin<'a>(
    coins: &'a [AssetRecord],
    excluded: &[ObjectID],
    budget: u64,
) -> Option<&'a AssetRecord> {
    coins
        .iter()
        .find(|coin| coin.balance >= budget && !excluded.contains(&coin.object_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wallet::mock::coin;

    #[test]
    fn test_first_sufficient_coin_wins() {
        let coins = vec![coin(1, 5), coin(2, 20), coin(3, 15)];
        assert_eq!(select_coin(&coins, 10).unwrap().balance, 20);
    }

    #[test]
    fn test_not_best_fit() {
        let coins = vec![coin(1, 1), coin(2, 100), coin(3, 11)];
        assert_eq!(select_coin(&coins, 10).unwrap().object_id, coins[1].object_id);
    }

    #[test]
    fn test_largest_fallback_is_insufficient() {
        let coins = vec![coin(1, 5), coin(2, 8)];
        let selected = select_coin(&coins, 10).unwrap();
        assert_eq!(selected.balance, 8);
        assert!(matches!(
            ensure_sufficient(selected, 10),
            Err(TipJarError::InsufficientBalance { required: 10, available: 8 })
        ));
    }

    #[test]
    fn test_single_coin() {
        let coins = vec![coin(1, 50)];
        assert_eq!(select_coin(&coins, 10).unwrap().balance, 50);
    }

    #[test]
    fn test_empty_set() {
        assert!(select_coin(&[], 10).is_none());
        assert!(matches!(
            select_funding_coin(&[], 10, "0x2::sui::SUI"),
            Err(TipJarError::NoCoins { .. })
        ));
    }

    #[test]
    fn test_sufficient_first_coin_stops_scan() {
        let coins = vec![coin(1, 50), coin(2, 20)];
        assert_eq!(select_coin(&coins, 10).unwrap().object_id, coins[0].object_id);
    }

    #[test]
    fn test_first_coin_kept_when_it_is_largest() {
        let coins = vec![coin(1, 9), coin(2, 3)];
        assert_eq!(select_coin(&coins, 10).unwrap().balance, 9);
    }

    #[test]
    fn test_gas_coin_skips_plan_objects() {
        let coins = vec![coin(1, 500), coin(2, 500)];
        let picked = pick_gas_coin(&coins, &[coins[0].object_id], 100).unwrap();
        assert_eq!(picked.object_id, coins[1].object_id);
    }

    #[test]
    fn test_gas_coin_must_cover_budget() {
        let coins = vec![coin(1, 99), coin(2, 100)];
        assert_eq!(pick_gas_coin(&coins, &[], 100).unwrap().object_id, coins[1].object_id);
        assert!(pick_gas_coin(&coins[..1], &[], 100).is_none());
    }

    #[test]
    fn test_only_coin_in_use_leaves_no_gas_coin() {
        let coins = vec![coin(1, 2_000_000_000)];
        assert!(pick_gas_coin(&coins, &[coins[0].object_id], 100_000_000).is_none());
    }
}
