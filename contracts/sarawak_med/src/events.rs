use crate::audit::{self, AuditEvent};
use crate::circuit_breaker::PauseScope;
use soroban_sdk::{contracttype, symbol_short, Address, Env, String};

/// Event published when the contract is initialized.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub timestamp: u64,
}

/// Event published when the admin admits a doctor into the registry.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DoctorVerifiedEvent {
    pub admin: Address,
    pub doctor: Address,
    pub timestamp: u64,
}

/// Event published when the admin removes a doctor from the registry.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DoctorRemovedEvent {
    pub admin: Address,
    pub doctor: Address,
    pub timestamp: u64,
}

/// Event published when a verified doctor appends a record for a patient.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RecordWrittenEvent {
    pub record_id: u64,
    pub patient: Address,
    pub doctor: Address,
    pub ipfs_hash: String,
    pub timestamp: u64,
}

/// Event published when a patient grants a doctor read access.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AccessGrantedEvent {
    pub patient: Address,
    pub doctor: Address,
    pub timestamp: u64,
}

/// Event published when a patient revokes a doctor's read access.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AccessRevokedEvent {
    pub patient: Address,
    pub doctor: Address,
    pub timestamp: u64,
}

/// Event published on every record read, whether it is allowed or denied.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AccessAttemptedEvent {
    pub patient: Address,
    pub accessor: Address,
    pub granted: bool,
    pub timestamp: u64,
}

/// Event published when the admin credits a hospital account.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CreditsAddedEvent {
    pub admin: Address,
    pub hospital: Address,
    pub amount: i64,
    pub new_balance: i64,
    pub timestamp: u64,
}

/// Event published when a medical certificate is issued and billed.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct McIssuedEvent {
    pub hospital: Address,
    pub issuer: Address,
    pub sequence_number: u64,
    pub new_balance: i64,
    pub timestamp: u64,
}

/// Event published when a circuit breaker is engaged.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContractPausedEvent {
    pub caller: Address,
    pub scope: PauseScope,
    pub timestamp: u64,
}

/// Event published when a circuit breaker is released.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContractResumedEvent {
    pub caller: Address,
    pub scope: PauseScope,
    pub timestamp: u64,
}

pub fn publish_initialized(env: &Env, admin: Address) {
    let topics = (symbol_short!("INIT"),);
    let data = InitializedEvent {
        admin,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

/// Publishes a registry admission and records it in the audit log.
pub fn publish_doctor_verified(env: &Env, admin: Address, doctor: Address) {
    let topics = (symbol_short!("DOC_VER"), doctor.clone());
    let data = DoctorVerifiedEvent {
        admin,
        doctor,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data.clone());
    audit::append(env, AuditEvent::DoctorVerified(data));
}

/// Publishes a registry removal and records it in the audit log.
pub fn publish_doctor_removed(env: &Env, admin: Address, doctor: Address) {
    let topics = (symbol_short!("DOC_REM"), doctor.clone());
    let data = DoctorRemovedEvent {
        admin,
        doctor,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data.clone());
    audit::append(env, AuditEvent::DoctorRemoved(data));
}

/// Publishes a record append. Topics carry both parties so indexers can
/// follow either the patient or the authoring doctor.
pub fn publish_record_written(
    env: &Env,
    record_id: u64,
    patient: Address,
    doctor: Address,
    ipfs_hash: String,
) {
    let topics = (symbol_short!("REC_WRT"), patient.clone(), doctor.clone());
    let data = RecordWrittenEvent {
        record_id,
        patient,
        doctor,
        ipfs_hash,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data.clone());
    audit::append(env, AuditEvent::RecordWritten(data));
}

pub fn publish_access_granted(env: &Env, patient: Address, doctor: Address) {
    let topics = (symbol_short!("ACC_GRT"), patient.clone(), doctor.clone());
    let data = AccessGrantedEvent {
        patient,
        doctor,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data.clone());
    audit::append(env, AuditEvent::AccessGranted(data));
}

pub fn publish_access_revoked(env: &Env, patient: Address, doctor: Address) {
    let topics = (symbol_short!("ACC_REV"), patient.clone(), doctor.clone());
    let data = AccessRevokedEvent {
        patient,
        doctor,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data.clone());
    audit::append(env, AuditEvent::AccessRevoked(data));
}

/// Publishes a read attempt. Emitted before the access decision is acted on,
/// so denied reads are recorded as well as allowed ones.
pub fn publish_access_attempted(env: &Env, patient: Address, accessor: Address, granted: bool) {
    let topics = (symbol_short!("ACC_ATT"), patient.clone(), accessor.clone());
    let data = AccessAttemptedEvent {
        patient,
        accessor,
        granted,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data.clone());
    audit::append(env, AuditEvent::AccessAttempted(data));
}

pub fn publish_credits_added(
    env: &Env,
    admin: Address,
    hospital: Address,
    amount: i64,
    new_balance: i64,
) {
    let topics = (symbol_short!("CRD_ADD"), hospital.clone());
    let data = CreditsAddedEvent {
        admin,
        hospital,
        amount,
        new_balance,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data.clone());
    audit::append(env, AuditEvent::CreditsAdded(data));
}

pub fn publish_mc_issued(
    env: &Env,
    hospital: Address,
    issuer: Address,
    sequence_number: u64,
    new_balance: i64,
) {
    let topics = (symbol_short!("MC_ISS"), hospital.clone());
    let data = McIssuedEvent {
        hospital,
        issuer,
        sequence_number,
        new_balance,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data.clone());
    audit::append(env, AuditEvent::McIssued(data));
}

pub fn publish_contract_paused(env: &Env, caller: Address, scope: PauseScope) {
    let topics = (symbol_short!("PAUSED"), caller.clone());
    let data = ContractPausedEvent {
        caller,
        scope,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_contract_resumed(env: &Env, caller: Address, scope: PauseScope) {
    let topics = (symbol_short!("RESUMED"), caller.clone());
    let data = ContractResumedEvent {
        caller,
        scope,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}
