//! Per-hospital usage credits and the medical-certificate issuance history.
//!
//! Balances are signed. Issuing an MC always debits one credit, even when the
//! account is already at or below zero; hospitals run into debt and settle it
//! later through `add_credits`.

use crate::validation::{self, page_limit};
use crate::{events, ContractError};
use sarawak_common::ttl;
use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol, Vec};

const BALANCE: Symbol = symbol_short!("BAL");
const MC: Symbol = symbol_short!("MC");
const MC_COUNTER: Symbol = symbol_short!("MC_CTR");
const HOSPITAL_MC: Symbol = symbol_short!("H_MC");
const HOSPITAL_MC_COUNT: Symbol = symbol_short!("H_MC_CNT");

/// One issued medical certificate.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct McIssuance {
    pub hospital: Address,
    /// Global, 1-based issuance sequence.
    pub sequence_number: u64,
    pub timestamp: u64,
}

fn balance_key(hospital: &Address) -> (Symbol, Address) {
    (BALANCE, hospital.clone())
}

fn issuance_key(sequence_number: u64) -> (Symbol, u64) {
    (MC, sequence_number)
}

/// Current balance; accounts that were never touched read as zero.
pub fn balance_of(env: &Env, hospital: &Address) -> i64 {
    env.storage()
        .persistent()
        .get(&balance_key(hospital))
        .unwrap_or(0)
}

fn set_balance(env: &Env, hospital: &Address, balance: i64) {
    let key = balance_key(hospital);
    env.storage().persistent().set(&key, &balance);
    ttl::extend_persistent(env, &key);
}

pub fn mc_count(env: &Env) -> u64 {
    env.storage().instance().get(&MC_COUNTER).unwrap_or(0)
}

/// Number of certificates issued for `hospital`.
pub fn hospital_mc_count(env: &Env, hospital: &Address) -> u64 {
    env.storage()
        .persistent()
        .get(&(HOSPITAL_MC_COUNT, hospital.clone()))
        .unwrap_or(0)
}

/// Records `sequence_number` as the hospital's next issuance slot.
fn index_hospital(env: &Env, hospital: &Address, sequence_number: u64) {
    let count_key = (HOSPITAL_MC_COUNT, hospital.clone());
    let slot = hospital_mc_count(env, hospital).saturating_add(1);
    let slot_key = (HOSPITAL_MC, hospital.clone(), slot);

    env.storage().persistent().set(&slot_key, &sequence_number);
    ttl::extend_persistent(env, &slot_key);
    env.storage().persistent().set(&count_key, &slot);
    ttl::extend_persistent(env, &count_key);
}

/// Credits `hospital` with `amount`. `admin` must already have been checked.
/// Returns the new balance.
pub fn add_credits(
    env: &Env,
    admin: &Address,
    hospital: &Address,
    amount: i64,
) -> Result<i64, ContractError> {
    validation::validate_address(env, hospital)?;
    validation::validate_amount(amount)?;

    let new_balance = balance_of(env, hospital)
        .checked_add(amount)
        .ok_or(ContractError::BalanceOverflow)?;
    set_balance(env, hospital, new_balance);

    events::publish_credits_added(env, admin.clone(), hospital.clone(), amount, new_balance);
    Ok(new_balance)
}

/// Records an MC issuance for `hospital` and debits one credit.
/// There is no sufficiency check. Returns the issuance sequence number.
pub fn issue(env: &Env, issuer: &Address, hospital: &Address) -> Result<u64, ContractError> {
    validation::validate_address(env, hospital)?;

    let new_balance = balance_of(env, hospital)
        .checked_sub(1)
        .ok_or(ContractError::BalanceOverflow)?;

    let sequence_number = mc_count(env).saturating_add(1);
    let issuance = McIssuance {
        hospital: hospital.clone(),
        sequence_number,
        timestamp: env.ledger().timestamp(),
    };

    let key = issuance_key(sequence_number);
    env.storage().persistent().set(&key, &issuance);
    ttl::extend_persistent(env, &key);
    env.storage().instance().set(&MC_COUNTER, &sequence_number);
    index_hospital(env, hospital, sequence_number);
    set_balance(env, hospital, new_balance);

    events::publish_mc_issued(
        env,
        hospital.clone(),
        issuer.clone(),
        sequence_number,
        new_balance,
    );
    Ok(sequence_number)
}

fn load_issuance(env: &Env, sequence_number: u64) -> Option<McIssuance> {
    env.storage()
        .persistent()
        .get(&issuance_key(sequence_number))
}

/// Up to `limit` issuances starting at sequence `start` (1-based), in order.
pub fn history(env: &Env, start: u64, limit: u32) -> Vec<McIssuance> {
    let mut out = Vec::new(env);
    let limit = page_limit(limit);
    let total = mc_count(env);
    let mut sequence_number = start.max(1);
    while sequence_number <= total && out.len() < limit {
        if let Some(issuance) = load_issuance(env, sequence_number) {
            out.push_back(issuance);
        }
        sequence_number = sequence_number.saturating_add(1);
    }
    out
}

/// Up to `limit` of `hospital`'s issuances starting at its `start`-th
/// (1-based). Order matches the global history.
pub fn hospital_history(env: &Env, hospital: &Address, start: u64, limit: u32) -> Vec<McIssuance> {
    let mut out = Vec::new(env);
    let limit = page_limit(limit);
    let total = hospital_mc_count(env, hospital);
    let mut slot = start.max(1);
    while slot <= total && out.len() < limit {
        let sequence_number: Option<u64> = env
            .storage()
            .persistent()
            .get(&(HOSPITAL_MC, hospital.clone(), slot));
        if let Some(issuance) = sequence_number.and_then(|n| load_issuance(env, n)) {
            out.push_back(issuance);
        }
        slot = slot.saturating_add(1);
    }
    out
}
