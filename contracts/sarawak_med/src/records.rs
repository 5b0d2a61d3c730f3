use crate::{access, events, registry, validation, ContractError};
use sarawak_common::ttl;
use soroban_sdk::{contracttype, symbol_short, Address, Env, String, Symbol, Vec};

const RECORD: Symbol = symbol_short!("RECORD");
const PATIENT_RECORDS: Symbol = symbol_short!("PAT_REC");
const RECORD_COUNTER: Symbol = symbol_short!("REC_CTR");

/// A reference to an encrypted document held off-chain.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MedicalRecord {
    /// Global, 1-based write sequence.
    pub id: u64,
    /// Content address of the off-chain blob. Opaque to the ledger.
    pub ipfs_hash: String,
    /// Verified doctor who wrote the record.
    pub doctor: Address,
    pub timestamp: u64,
}

fn record_key(record_id: u64) -> (Symbol, u64) {
    (RECORD, record_id)
}

fn patient_key(patient: &Address) -> (Symbol, Address) {
    (PATIENT_RECORDS, patient.clone())
}

/// Ids of `patient`'s records in write order. Each record lives in its own
/// entry so the per-patient index only grows by one `u64` per write.
pub fn record_ids_of(env: &Env, patient: &Address) -> Vec<u64> {
    env.storage()
        .persistent()
        .get(&patient_key(patient))
        .unwrap_or(Vec::new(env))
}

pub fn get(env: &Env, record_id: u64) -> Option<MedicalRecord> {
    env.storage().persistent().get(&record_key(record_id))
}

/// Full record list for `patient`, oldest first.
pub fn records_of(env: &Env, patient: &Address) -> Vec<MedicalRecord> {
    let mut out = Vec::new(env);
    for record_id in record_ids_of(env, patient).iter() {
        if let Some(record) = get(env, record_id) {
            out.push_back(record);
        }
    }
    out
}

/// Total number of records written across all patients.
pub fn record_count(env: &Env) -> u64 {
    env.storage().instance().get(&RECORD_COUNTER).unwrap_or(0)
}

/// Appends a record for `patient` authored by `doctor`.
pub fn write(
    env: &Env,
    doctor: &Address,
    patient: &Address,
    ipfs_hash: String,
) -> Result<u64, ContractError> {
    if !registry::is_verified(env, doctor) {
        return Err(ContractError::Unauthorized);
    }
    validation::validate_address(env, patient)?;
    validation::validate_ipfs_hash(&ipfs_hash)?;

    let record_id = record_count(env).saturating_add(1);
    env.storage().instance().set(&RECORD_COUNTER, &record_id);

    let record = MedicalRecord {
        id: record_id,
        ipfs_hash: ipfs_hash.clone(),
        doctor: doctor.clone(),
        timestamp: env.ledger().timestamp(),
    };

    let key = record_key(record_id);
    env.storage().persistent().set(&key, &record);
    ttl::extend_persistent(env, &key);

    let index_key = patient_key(patient);
    let mut ids = record_ids_of(env, patient);
    ids.push_back(record_id);
    env.storage().persistent().set(&index_key, &ids);
    ttl::extend_persistent(env, &index_key);

    events::publish_record_written(env, record_id, patient.clone(), doctor.clone(), ipfs_hash);

    Ok(record_id)
}

/// Reads `patient`'s records on behalf of `caller`.
///
/// The attempt is audited before the decision is applied, so a denied read
/// still leaves exactly one `AccessAttempted { granted: false }` entry.
pub fn read(
    env: &Env,
    caller: &Address,
    patient: &Address,
) -> Result<Vec<MedicalRecord>, ContractError> {
    let granted = caller == patient || access::has_access(env, patient, caller);

    events::publish_access_attempted(env, patient.clone(), caller.clone(), granted);

    if !granted {
        return Err(ContractError::AccessDenied);
    }
    Ok(records_of(env, patient))
}
