use sarawak_common::identity;
use soroban_sdk::{Address, Env, String};

use crate::ContractError;

/// Upper bound on a stored content reference. CIDv1 strings in base32 are
/// well under this.
pub const MAX_HASH_LEN: u32 = 128;

/// Most entries any paged query returns in one call.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Clamp a caller-supplied page size to [`MAX_PAGE_SIZE`].
pub fn page_limit(limit: u32) -> u32 {
    limit.min(MAX_PAGE_SIZE)
}

/// Reject the zero account wherever a real principal is required.
pub fn validate_address(env: &Env, address: &Address) -> Result<(), ContractError> {
    if identity::is_zero_address(env, address) {
        return Err(ContractError::InvalidAddress);
    }
    Ok(())
}

/// Validate an off-chain content reference (IPFS CID or similar).
/// The ledger never interprets the hash, it only requires one to be present.
pub fn validate_ipfs_hash(hash: &String) -> Result<(), ContractError> {
    let len = hash.len();
    if len == 0 {
        return Err(ContractError::EmptyHash);
    }
    if len > MAX_HASH_LEN {
        return Err(ContractError::HashTooLong);
    }
    Ok(())
}

/// Credit grants must be strictly positive.
pub fn validate_amount(amount: i64) -> Result<(), ContractError> {
    if amount <= 0 {
        return Err(ContractError::InvalidAmount);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use soroban_sdk::testutils::Address as _;

    #[test]
    fn test_validate_address() {
        let env = Env::default();

        assert_eq!(validate_address(&env, &Address::generate(&env)), Ok(()));
        assert_eq!(
            validate_address(&env, &identity::zero_address(&env)),
            Err(ContractError::InvalidAddress)
        );
    }

    #[test]
    fn test_validate_ipfs_hash() {
        let env = Env::default();

        // Short references are fine; content is opaque.
        assert_eq!(validate_ipfs_hash(&String::from_str(&env, "QmX")), Ok(()));
        assert_eq!(
            validate_ipfs_hash(&String::from_str(
                &env,
                "QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG"
            )),
            Ok(())
        );

        assert_eq!(
            validate_ipfs_hash(&String::from_str(&env, "")),
            Err(ContractError::EmptyHash)
        );

        let at_limit = "a".repeat(MAX_HASH_LEN as usize);
        assert_eq!(validate_ipfs_hash(&String::from_str(&env, &at_limit)), Ok(()));
        let too_long = "a".repeat(MAX_HASH_LEN as usize + 1);
        assert_eq!(
            validate_ipfs_hash(&String::from_str(&env, &too_long)),
            Err(ContractError::HashTooLong)
        );
    }

    #[test]
    fn test_page_limit_is_capped() {
        assert_eq!(page_limit(0), 0);
        assert_eq!(page_limit(10), 10);
        assert_eq!(page_limit(MAX_PAGE_SIZE), MAX_PAGE_SIZE);
        assert_eq!(page_limit(u32::MAX), MAX_PAGE_SIZE);
    }

    #[test]
    fn test_validate_amount() {
        assert_eq!(validate_amount(1), Ok(()));
        assert_eq!(validate_amount(i64::MAX), Ok(()));
        assert_eq!(validate_amount(0), Err(ContractError::InvalidAmount));
        assert_eq!(validate_amount(-5), Err(ContractError::InvalidAmount));
    }
}
