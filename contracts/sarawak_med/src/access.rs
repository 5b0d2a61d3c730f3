use crate::{events, registry, validation, ContractError};
use sarawak_common::ttl;
use soroban_sdk::{symbol_short, Address, Env, Symbol};

const ACCESS: Symbol = symbol_short!("ACCESS");

fn access_key(patient: &Address, doctor: &Address) -> (Symbol, Address, Address) {
    (ACCESS, patient.clone(), doctor.clone())
}

/// Current permission for `(patient, doctor)`.
///
/// Registry membership is checked when access is granted, not here: a doctor
/// removed from the registry keeps any grant until the patient revokes it.
pub fn has_access(env: &Env, patient: &Address, doctor: &Address) -> bool {
    env.storage()
        .persistent()
        .get(&access_key(patient, doctor))
        .unwrap_or(false)
}

pub fn grant(env: &Env, patient: &Address, doctor: &Address) -> Result<(), ContractError> {
    validation::validate_address(env, doctor)?;
    if !registry::is_verified(env, doctor) {
        return Err(ContractError::DoctorNotVerified);
    }
    if has_access(env, patient, doctor) {
        return Err(ContractError::AlreadyGranted);
    }

    let key = access_key(patient, doctor);
    env.storage().persistent().set(&key, &true);
    ttl::extend_persistent(env, &key);

    events::publish_access_granted(env, patient.clone(), doctor.clone());
    Ok(())
}

pub fn revoke(env: &Env, patient: &Address, doctor: &Address) -> Result<(), ContractError> {
    if !has_access(env, patient, doctor) {
        return Err(ContractError::NotGranted);
    }

    let key = access_key(patient, doctor);
    env.storage().persistent().set(&key, &false);
    ttl::extend_persistent(env, &key);

    events::publish_access_revoked(env, patient.clone(), doctor.clone());
    Ok(())
}
