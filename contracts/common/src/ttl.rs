use soroban_sdk::{Env, IntoVal, Val};

/// Remaining-ledgers mark below which an entry is bumped (~30 days).
pub const TTL_THRESHOLD: u32 = 518_400;
/// Ledgers an entry is bumped to (~180 days).
pub const TTL_EXTEND_TO: u32 = 3_110_400;

/// Extends the time-to-live of a persistent storage entry.
/// Call after every `persistent().set` so ledger data is not archived.
pub fn extend_persistent<K>(env: &Env, key: &K)
where
    K: IntoVal<Env, Val>,
{
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Extends the time-to-live of the contract instance and every instance key.
pub fn extend_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
}
