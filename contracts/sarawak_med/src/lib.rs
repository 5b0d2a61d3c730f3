#![no_std]

pub mod access;
pub mod audit;
pub mod billing;
pub mod circuit_breaker;
pub mod errors;
pub mod events;
pub mod records;
pub mod registry;
pub mod validation;

use sarawak_common::ttl;
use soroban_sdk::{contract, contractimpl, symbol_short, Address, Env, String, Symbol, Vec};

pub use audit::{AuditEntry, AuditEvent, AuditKind};
pub use billing::McIssuance;
pub use circuit_breaker::PauseScope;
pub use errors::{ContractError, ErrorCategory, ErrorSeverity};
pub use records::MedicalRecord;

/// Storage keys for the contract
const ADMIN: Symbol = symbol_short!("ADMIN");
const INITIALIZED: Symbol = symbol_short!("INIT");

fn load_admin(env: &Env) -> Result<Address, ContractError> {
    env.storage()
        .instance()
        .get(&ADMIN)
        .ok_or(ContractError::NotInitialized)
}

fn require_admin(env: &Env, caller: &Address) -> Result<(), ContractError> {
    if *caller != load_admin(env)? {
        return Err(ContractError::Unauthorized);
    }
    Ok(())
}

#[contract]
pub struct SarawakMedContract;

#[contractimpl]
impl SarawakMedContract {
    // ── Lifecycle ─────────────────────────────────────────────────────────────

    /// Initialize the contract with an admin address
    pub fn initialize(env: Env, admin: Address) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }
        validation::validate_address(&env, &admin)?;
        admin.require_auth();

        env.storage().instance().set(&ADMIN, &admin);
        env.storage().instance().set(&INITIALIZED, &true);
        ttl::extend_instance(&env);

        events::publish_initialized(&env, admin);

        Ok(())
    }

    /// Get the admin address
    pub fn get_admin(env: Env) -> Result<Address, ContractError> {
        load_admin(&env)
    }

    /// Check if the contract is initialized
    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&INITIALIZED)
    }

    /// Contract version
    pub fn version() -> u32 {
        1
    }

    // ── Doctor registry ───────────────────────────────────────────────────────

    /// Admit a doctor to the allow-list. Admin only.
    pub fn add_verified_doctor(
        env: Env,
        caller: Address,
        doctor: Address,
    ) -> Result<(), ContractError> {
        circuit_breaker::require_not_paused(&env, &circuit_breaker::ADD_DOCTOR)?;
        caller.require_auth();
        require_admin(&env, &caller)?;

        registry::add(&env, &caller, &doctor)?;
        ttl::extend_instance(&env);
        Ok(())
    }

    /// Remove a doctor from the allow-list. Admin only.
    /// Existing patient grants are not revoked.
    pub fn remove_verified_doctor(
        env: Env,
        caller: Address,
        doctor: Address,
    ) -> Result<(), ContractError> {
        circuit_breaker::require_not_paused(&env, &circuit_breaker::REMOVE_DOCTOR)?;
        caller.require_auth();
        require_admin(&env, &caller)?;

        registry::remove(&env, &caller, &doctor)?;
        ttl::extend_instance(&env);
        Ok(())
    }

    pub fn is_verified_doctor(env: Env, doctor: Address) -> bool {
        registry::is_verified(&env, &doctor)
    }

    pub fn get_verified_doctor_count(env: Env) -> u32 {
        registry::verified_count(&env)
    }

    // ── Access control ────────────────────────────────────────────────────────

    /// Let a verified doctor read the calling patient's records.
    pub fn grant_access(env: Env, patient: Address, doctor: Address) -> Result<(), ContractError> {
        circuit_breaker::require_not_paused(&env, &circuit_breaker::GRANT_ACCESS)?;
        patient.require_auth();

        access::grant(&env, &patient, &doctor)?;
        ttl::extend_instance(&env);
        Ok(())
    }

    /// Withdraw a doctor's read access. Takes effect on the next read.
    pub fn revoke_access(env: Env, patient: Address, doctor: Address) -> Result<(), ContractError> {
        circuit_breaker::require_not_paused(&env, &circuit_breaker::REVOKE_ACCESS)?;
        patient.require_auth();

        access::revoke(&env, &patient, &doctor)?;
        ttl::extend_instance(&env);
        Ok(())
    }

    pub fn has_access(env: Env, patient: Address, doctor: Address) -> bool {
        access::has_access(&env, &patient, &doctor)
    }

    // ── Medical records ───────────────────────────────────────────────────────

    /// Append a record for `patient`. The caller must be a verified doctor.
    /// Returns the new record id.
    pub fn write_record(
        env: Env,
        caller: Address,
        patient: Address,
        ipfs_hash: String,
    ) -> Result<u64, ContractError> {
        circuit_breaker::require_not_paused(&env, &circuit_breaker::WRITE_RECORD)?;
        caller.require_auth();

        let record_id = records::write(&env, &caller, &patient, ipfs_hash)?;
        ttl::extend_instance(&env);
        Ok(record_id)
    }

    /// Read `patient`'s records. Allowed for the patient and for doctors the
    /// patient has granted access to. Every call is audited.
    pub fn read_records(
        env: Env,
        caller: Address,
        patient: Address,
    ) -> Result<Vec<MedicalRecord>, ContractError> {
        caller.require_auth();

        let result = records::read(&env, &caller, &patient);
        ttl::extend_instance(&env);
        result
    }

    pub fn get_my_records(env: Env, caller: Address) -> Vec<MedicalRecord> {
        caller.require_auth();
        records::records_of(&env, &caller)
    }

    pub fn get_my_records_count(env: Env, caller: Address) -> u32 {
        caller.require_auth();
        records::record_ids_of(&env, &caller).len()
    }

    /// Total records written across all patients.
    pub fn get_record_count(env: Env) -> u64 {
        records::record_count(&env)
    }

    // ── Billing ───────────────────────────────────────────────────────────────

    /// Credit a hospital account. Admin only. Returns the new balance.
    pub fn add_credits(
        env: Env,
        caller: Address,
        hospital: Address,
        amount: i64,
    ) -> Result<i64, ContractError> {
        circuit_breaker::require_not_paused(&env, &circuit_breaker::ADD_CREDITS)?;
        caller.require_auth();
        require_admin(&env, &caller)?;

        let balance = billing::add_credits(&env, &caller, &hospital, amount)?;
        ttl::extend_instance(&env);
        Ok(balance)
    }

    /// Record a medical certificate for `hospital` and debit one credit.
    /// Never blocked by a low or negative balance.
    pub fn issue_digital_mc(env: Env, caller: Address, hospital: Address) -> Result<u64, ContractError> {
        circuit_breaker::require_not_paused(&env, &circuit_breaker::ISSUE_MC)?;
        caller.require_auth();

        let sequence_number = billing::issue(&env, &caller, &hospital)?;
        ttl::extend_instance(&env);
        Ok(sequence_number)
    }

    pub fn get_hospital_balance(env: Env, hospital: Address) -> i64 {
        billing::balance_of(&env, &hospital)
    }

    pub fn get_mc_count(env: Env) -> u64 {
        billing::mc_count(&env)
    }

    /// Up to `limit` issuances starting at sequence `start`.
    pub fn get_mc_history(env: Env, start: u64, limit: u32) -> Vec<McIssuance> {
        billing::history(&env, start, limit)
    }

    pub fn get_hospital_mc_count(env: Env, hospital: Address) -> u64 {
        billing::hospital_mc_count(&env, &hospital)
    }

    /// Up to `limit` of `hospital`'s issuances starting at its `start`-th.
    pub fn get_hospital_mc_history(
        env: Env,
        hospital: Address,
        start: u64,
        limit: u32,
    ) -> Vec<McIssuance> {
        billing::hospital_history(&env, &hospital, start, limit)
    }

    // ── Audit log ─────────────────────────────────────────────────────────────

    pub fn get_audit_count(env: Env) -> u64 {
        audit::count(&env)
    }

    pub fn get_audit_entry(env: Env, sequence: u64) -> Result<AuditEntry, ContractError> {
        audit::get(&env, sequence)
    }

    /// Up to `limit` entries starting at sequence `start`.
    pub fn get_audit_log(env: Env, start: u64, limit: u32) -> Vec<AuditEntry> {
        audit::page(&env, start, limit)
    }

    pub fn get_audit_count_by_kind(env: Env, kind: AuditKind) -> u64 {
        audit::count_by_kind(&env, kind)
    }

    pub fn get_audit_count_by_subject(env: Env, subject: Address) -> u64 {
        audit::count_by_subject(&env, &subject)
    }

    /// Entries of `kind`; `start` is the 1-based position among them.
    pub fn get_audit_by_kind(env: Env, kind: AuditKind, start: u64, limit: u32) -> Vec<AuditEntry> {
        audit::by_kind(&env, kind, start, limit)
    }

    /// Entries naming `subject` in any role; `start` is the 1-based position
    /// among them.
    pub fn get_audit_by_subject(
        env: Env,
        subject: Address,
        start: u64,
        limit: u32,
    ) -> Vec<AuditEntry> {
        audit::by_subject(&env, &subject, start, limit)
    }

    /// Entries whose timestamp lies in `[from_ts, to_ts]`; `start` is the
    /// 1-based position within the range.
    pub fn get_audit_in_range(
        env: Env,
        from_ts: u64,
        to_ts: u64,
        start: u64,
        limit: u32,
    ) -> Vec<AuditEntry> {
        audit::in_range(&env, from_ts, to_ts, start, limit)
    }

    pub fn verify_audit_chain(env: Env) -> bool {
        audit::verify_chain(&env)
    }

    // ── Circuit breaker ───────────────────────────────────────────────────────

    pub fn pause(env: Env, caller: Address, scope: PauseScope) -> Result<(), ContractError> {
        caller.require_auth();
        require_admin(&env, &caller)?;

        circuit_breaker::pause(&env, &caller, scope);
        Ok(())
    }

    pub fn resume(env: Env, caller: Address, scope: PauseScope) -> Result<(), ContractError> {
        caller.require_auth();
        require_admin(&env, &caller)?;

        circuit_breaker::resume(&env, &caller, scope);
        Ok(())
    }

    pub fn is_paused(env: Env, scope: PauseScope) -> bool {
        circuit_breaker::is_paused(&env, &scope)
    }
}

#[cfg(test)]
mod test;
