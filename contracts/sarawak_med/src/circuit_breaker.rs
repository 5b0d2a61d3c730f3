use crate::{events, ContractError};
use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

// ── Types ─────────────────────────────────────────────────────

/// Defines the scope of the pause mechanism
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PauseScope {
    /// Halts every state-mutating entrypoint
    Global,
    /// Halts a single entrypoint, identified by its short name
    Function(Symbol),
}

// ── Function Names ───────────────────────────────────────────

pub const ADD_DOCTOR: Symbol = symbol_short!("ADD_DOC");
pub const REMOVE_DOCTOR: Symbol = symbol_short!("REM_DOC");
pub const GRANT_ACCESS: Symbol = symbol_short!("GRT_ACC");
pub const REVOKE_ACCESS: Symbol = symbol_short!("REV_ACC");
pub const WRITE_RECORD: Symbol = symbol_short!("WRT_REC");
pub const ADD_CREDITS: Symbol = symbol_short!("ADD_CRD");
pub const ISSUE_MC: Symbol = symbol_short!("ISS_MC");

// ── Storage Keys ─────────────────────────────────────────────

fn global_pause_key() -> Symbol {
    symbol_short!("P_GLOB")
}

fn function_pause_key(func: &Symbol) -> (Symbol, Symbol) {
    (symbol_short!("P_FUNC"), func.clone())
}

// ── Core ─────────────────────────────────────────────────────

pub fn is_paused(env: &Env, scope: &PauseScope) -> bool {
    match scope {
        PauseScope::Global => env
            .storage()
            .instance()
            .get(&global_pause_key())
            .unwrap_or(false),
        PauseScope::Function(func) => env
            .storage()
            .instance()
            .get(&function_pause_key(func))
            .unwrap_or(false),
    }
}

/// Fails with `Paused` if either the global breaker or the breaker for `func`
/// is engaged.
pub fn require_not_paused(env: &Env, func: &Symbol) -> Result<(), ContractError> {
    if is_paused(env, &PauseScope::Global) || is_paused(env, &PauseScope::Function(func.clone()))
    {
        return Err(ContractError::Paused);
    }
    Ok(())
}

/// Engages a circuit breaker. The caller must already have been checked as admin.
pub fn pause(env: &Env, caller: &Address, scope: PauseScope) {
    set_flag(env, &scope, true);
    events::publish_contract_paused(env, caller.clone(), scope);
}

/// Releases a circuit breaker. The caller must already have been checked as admin.
pub fn resume(env: &Env, caller: &Address, scope: PauseScope) {
    set_flag(env, &scope, false);
    events::publish_contract_resumed(env, caller.clone(), scope);
}

fn set_flag(env: &Env, scope: &PauseScope, value: bool) {
    match scope {
        PauseScope::Global => {
            env.storage().instance().set(&global_pause_key(), &value);
        }
        PauseScope::Function(func) => {
            env.storage()
                .instance()
                .set(&function_pause_key(func), &value);
        }
    }
}
