use crate::{events, validation, ContractError};
use sarawak_common::ttl;
use soroban_sdk::{symbol_short, Address, Env, Symbol};

// ── Storage Keys ─────────────────────────────────────────────

const DOCTOR: Symbol = symbol_short!("DOCTOR");
const DOCTOR_COUNT: Symbol = symbol_short!("DOC_CNT");

fn doctor_key(doctor: &Address) -> (Symbol, Address) {
    (DOCTOR, doctor.clone())
}

// ── Registry ─────────────────────────────────────────────────

/// Whether `doctor` is currently on the allow-list.
pub fn is_verified(env: &Env, doctor: &Address) -> bool {
    env.storage()
        .persistent()
        .get(&doctor_key(doctor))
        .unwrap_or(false)
}

/// Number of doctors currently verified.
pub fn verified_count(env: &Env) -> u32 {
    env.storage().instance().get(&DOCTOR_COUNT).unwrap_or(0)
}

/// Admits `doctor`. The caller must already have been checked as admin.
pub fn add(env: &Env, admin: &Address, doctor: &Address) -> Result<(), ContractError> {
    validation::validate_address(env, doctor)?;
    if is_verified(env, doctor) {
        return Err(ContractError::AlreadyVerified);
    }

    let key = doctor_key(doctor);
    env.storage().persistent().set(&key, &true);
    ttl::extend_persistent(env, &key);
    env.storage()
        .instance()
        .set(&DOCTOR_COUNT, &verified_count(env).saturating_add(1));

    events::publish_doctor_verified(env, admin.clone(), doctor.clone());
    Ok(())
}

/// Removes `doctor` from the allow-list.
///
/// Patient grants held by the doctor are left untouched; registry membership
/// and per-patient access are revoked independently.
pub fn remove(env: &Env, admin: &Address, doctor: &Address) -> Result<(), ContractError> {
    if !is_verified(env, doctor) {
        return Err(ContractError::NotVerified);
    }

    let key = doctor_key(doctor);
    env.storage().persistent().set(&key, &false);
    ttl::extend_persistent(env, &key);
    env.storage()
        .instance()
        .set(&DOCTOR_COUNT, &verified_count(env).saturating_sub(1));

    events::publish_doctor_removed(env, admin.clone(), doctor.clone());
    Ok(())
}
