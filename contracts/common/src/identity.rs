use soroban_sdk::{Address, Env, String};

/// Strkey of the all-zero ed25519 account.
///
/// Stellar has no native "zero address"; this account has no known secret key
/// and is the conventional placeholder for "no identity". Contracts reject it
/// wherever a real principal is required.
pub const ZERO_ACCOUNT: &str = "GAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAWHF";

/// Returns the zero-account address for this environment.
pub fn zero_address(env: &Env) -> Address {
    Address::from_string(&String::from_str(env, ZERO_ACCOUNT))
}

/// Returns `true` when `address` is the zero account.
pub fn is_zero_address(env: &Env, address: &Address) -> bool {
    *address == zero_address(env)
}
