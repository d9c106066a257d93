use crate::constants::SUI_ADDRESS_HEX_LEN;
use crate::error::TipJarError;

/// Canonicalize a user supplied address: `0x` prefix, lowercase, left padded
/// to 64 hex digits. Over-long or non-hex input is rejected instead of padded.
pub fn normalize_sui_address(input: &str) -> Result<String, TipJarError> {
    let invalid = |reason| TipJarError::InvalidAddress { input: input.to_string(), reason };

    let lowered = input.trim().to_lowercase();
    let digits = lowered.strip_prefix("0x").unwrap_or(&lowered);

    if digits.is_empty() {
        return Err(invalid("no hex digits"));
    }
    if digits.len() > SUI_ADDRESS_HEX_LEN {
        return Err(invalid("more than 64 hex digits"));
    }
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid("contains non-hex characters"));
    }

    Ok(format!("0x{:0>width$}", digits, width = SUI_ADDRESS_HEX_LEN))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_canonical(address: &str) -> bool {
        address.len() == 66
            && address.starts_with("0x")
            && address[2..].chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
    }

    #[test]
    fn test_pads_short_address() {
        let normalized = normalize_sui_address("0xabc").unwrap();
        assert_eq!(normalized, format!("0x{}abc", "0".repeat(61)));
        assert!(is_canonical(&normalized));
    }

    #[test]
    fn test_adds_missing_prefix_and_lowercases() {
        let normalized = normalize_sui_address("ABCDEF").unwrap();
        assert_eq!(normalized, format!("0x{}abcdef", "0".repeat(58)));
        assert_eq!(normalize_sui_address("0XAbC").unwrap(), normalize_sui_address("abc").unwrap());
    }

    #[test]
    fn test_canonical_address_is_unchanged() {
        let canonical = "0x598928d17a9a5dadfaffdaca2e5d2315bd2e9387d73c8a63488a1a0f4d73ffbd";
        assert_eq!(normalize_sui_address(canonical).unwrap(), canonical);
        let twice = normalize_sui_address(&normalize_sui_address("0x2").unwrap()).unwrap();
        assert_eq!(twice, normalize_sui_address("0x2").unwrap());
    }

    #[test]
    fn test_rejects_over_length() {
        let too_long = format!("0x{}", "1".repeat(65));
        assert!(matches!(
            normalize_sui_address(&too_long),
            Err(TipJarError::InvalidAddress { .. })
        ));
    }

    #[test]
    fn test_rejects_non_hex_and_empty() {
        assert!(normalize_sui_address("0xzz").is_err());
        assert!(normalize_sui_address("0x").is_err());
        assert!(normalize_sui_address("").is_err());
    }
}
