//! Common utility and helper functions that are used across the project

use std::str::FromStr;

use alloy_primitives::{Address, U256};
use alloy_sol_types::SolCall;
use candid::Nat;
use chrono::Utc;
use num_bigint::BigUint;

use super::error::*;

/// Returns Err if the `caller` is not the management address
pub fn only_management(caller: Address, management: Address) -> StrategyResult<()> {
    if caller != management {
        // only the management role is allowed to mutate the configuration
        return Err(StrategyError::Unauthorized);
    }
    Ok(())
}

/// Converts String to Address and returns StrategyError on failure
pub fn string_to_address(input: String) -> StrategyResult<Address> {
    Address::from_str(&input).map_err(|err| StrategyError::DecodingError(format!("{:#?}", err)))
}

/// Converts a decimal (or `0x` prefixed hex) String to U256
pub fn string_to_u256(input: String) -> StrategyResult<U256> {
    U256::from_str(&input).map_err(|err| StrategyError::DecodingError(format!("{:#?}", err)))
}

/// Converts values of type `U256` to `Nat`
pub fn u256_to_nat(value: &U256) -> StrategyResult<Nat> {
    let be_bytes: [u8; 32] = value.to_be_bytes();
    Ok(Nat(BigUint::from_bytes_be(&be_bytes)))
}

/// Current unix time in seconds
pub fn current_timestamp() -> u64 {
    u64::try_from(Utc::now().timestamp()).unwrap_or_default()
}

/// Hex encodes the calldata with a `0x` prefix
pub fn encode_hex_data(data: &[u8]) -> String {
    format!("0x{}", hex::encode(data))
}

/// Returns `T` from Solidity struct.
pub fn decode_abi_response<T, F: SolCall<Return = T>>(hex_data: String) -> StrategyResult<T> {
    let stripped_hex = if hex_data.starts_with("0x") {
        hex_data[2..].to_string()
    } else {
        hex_data
    };
    let hex_bytes =
        hex::decode(stripped_hex).map_err(|err| StrategyError::DecodingError(err.to_string()))?;
    F::abi_decode_returns(&hex_bytes, false)
        .map_err(|err| StrategyError::DecodingError(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::IERC20;
    use alloy_sol_types::SolValue;

    #[test]
    fn test_string_to_address_valid() {
        // Valid Ethereum address
        let input = "0x0123456789abcdef0123456789abcdef01234567".to_string();
        let result = string_to_address(input.clone());
        assert!(result.is_ok());
        let address = result.unwrap();
        assert_eq!(address, Address::from_str(&input).unwrap());
    }

    #[test]
    fn test_string_to_address_invalid() {
        let input = "invalid_address".to_string();
        let result = string_to_address(input);
        assert!(matches!(result, Err(StrategyError::DecodingError(_))));
    }

    #[test]
    fn test_string_to_u256_decimal() {
        let result = string_to_u256("9900".to_string()).unwrap();
        assert_eq!(result, U256::from(9_900u64));
    }

    #[test]
    fn test_string_to_u256_invalid() {
        assert!(string_to_u256("ninety".to_string()).is_err());
    }

    #[test]
    fn test_u256_to_nat() {
        let nat = u256_to_nat(&U256::from(1234567890_u64)).unwrap();
        assert_eq!(nat, Nat::from(1234567890_u64));
    }

    #[test]
    fn test_u256_to_nat_max() {
        let nat = u256_to_nat(&U256::MAX).unwrap();
        assert_eq!(nat, Nat(BigUint::from_bytes_be(&[0xff; 32])));
    }

    #[test]
    fn test_only_management() {
        let management = Address::repeat_byte(0x11);
        assert!(only_management(management, management).is_ok());
        assert_eq!(
            only_management(Address::repeat_byte(0x22), management),
            Err(StrategyError::Unauthorized)
        );
    }

    #[test]
    fn test_decode_abi_response_with_prefix() {
        let encoded = encode_hex_data(&U256::from(42u64).abi_encode());
        let decoded = decode_abi_response::<_, IERC20::balanceOfCall>(encoded).unwrap();
        assert_eq!(decoded._0, U256::from(42u64));
    }

    #[test]
    fn test_decode_abi_response_invalid_hex() {
        let result = decode_abi_response::<_, IERC20::balanceOfCall>("0xzz".to_string());
        assert!(matches!(result, Err(StrategyError::DecodingError(_))));
    }
}
