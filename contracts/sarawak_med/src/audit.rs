//! Append-only, hash-chained audit log.
//!
//! Every state transition appends one [`AuditEntry`] in the same invocation
//! that mutates the ledger. Entries are numbered from 1 in operation order and
//! each carries the SHA-256 of its predecessor, so a rewritten entry breaks
//! [`verify_chain`].
//!
//! Kind and subject queries read from per-kind and per-address slot indexes
//! written at append time, and time-range queries binary search the log, so
//! every query touches at most one page of entries.

use crate::events::{
    AccessAttemptedEvent, AccessGrantedEvent, AccessRevokedEvent, CreditsAddedEvent,
    DoctorRemovedEvent, DoctorVerifiedEvent, McIssuedEvent, RecordWrittenEvent,
};
use crate::validation::page_limit;
use crate::ContractError;
use sarawak_common::ttl;
use soroban_sdk::{contracttype, symbol_short, xdr::ToXdr, Address, Bytes, BytesN, Env, Symbol, Vec};

const AUDIT: Symbol = symbol_short!("AUDIT");
const AUDIT_CTR: Symbol = symbol_short!("AUD_CTR");
const AUDIT_HEAD: Symbol = symbol_short!("AUD_HEAD");

// ── Index Keys ───────────────────────────────────────────────

const KIND_COUNT: Symbol = symbol_short!("AUD_KCNT");
const KIND_SLOT: Symbol = symbol_short!("AUD_KIDX");
const SUBJECT_COUNT: Symbol = symbol_short!("AUD_SCNT");
const SUBJECT_SLOT: Symbol = symbol_short!("AUD_SIDX");

/// Discriminant of an [`AuditEvent`], used for kind queries.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AuditKind {
    DoctorVerified,
    DoctorRemoved,
    RecordWritten,
    AccessGranted,
    AccessRevoked,
    AccessAttempted,
    CreditsAdded,
    McIssued,
}

/// A single audited state transition. Each variant carries the payload of the
/// matching contract event.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AuditEvent {
    DoctorVerified(DoctorVerifiedEvent),
    DoctorRemoved(DoctorRemovedEvent),
    RecordWritten(RecordWrittenEvent),
    AccessGranted(AccessGrantedEvent),
    AccessRevoked(AccessRevokedEvent),
    AccessAttempted(AccessAttemptedEvent),
    CreditsAdded(CreditsAddedEvent),
    McIssued(McIssuedEvent),
}

impl AuditEvent {
    pub fn kind(&self) -> AuditKind {
        match self {
            AuditEvent::DoctorVerified(_) => AuditKind::DoctorVerified,
            AuditEvent::DoctorRemoved(_) => AuditKind::DoctorRemoved,
            AuditEvent::RecordWritten(_) => AuditKind::RecordWritten,
            AuditEvent::AccessGranted(_) => AuditKind::AccessGranted,
            AuditEvent::AccessRevoked(_) => AuditKind::AccessRevoked,
            AuditEvent::AccessAttempted(_) => AuditKind::AccessAttempted,
            AuditEvent::CreditsAdded(_) => AuditKind::CreditsAdded,
            AuditEvent::McIssued(_) => AuditKind::McIssued,
        }
    }

    /// The two parties named in the payload: acting party first, then the
    /// party acted upon. They coincide when a patient reads their own records.
    pub fn subjects(&self) -> (Address, Address) {
        match self {
            AuditEvent::DoctorVerified(e) => (e.admin.clone(), e.doctor.clone()),
            AuditEvent::DoctorRemoved(e) => (e.admin.clone(), e.doctor.clone()),
            AuditEvent::RecordWritten(e) => (e.doctor.clone(), e.patient.clone()),
            AuditEvent::AccessGranted(e) => (e.patient.clone(), e.doctor.clone()),
            AuditEvent::AccessRevoked(e) => (e.patient.clone(), e.doctor.clone()),
            AuditEvent::AccessAttempted(e) => (e.accessor.clone(), e.patient.clone()),
            AuditEvent::CreditsAdded(e) => (e.admin.clone(), e.hospital.clone()),
            AuditEvent::McIssued(e) => (e.issuer.clone(), e.hospital.clone()),
        }
    }

    /// Returns `true` if `who` appears in the payload in any role.
    pub fn involves(&self, who: &Address) -> bool {
        let (actor, target) = self.subjects();
        actor == *who || target == *who
    }
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AuditEntry {
    /// 1-based position in the log.
    pub sequence: u64,
    pub timestamp: u64,
    pub event: AuditEvent,
    /// Hash of the previous entry (all zero for the first entry).
    pub prev_hash: BytesN<32>,
}

fn entry_key(sequence: u64) -> (Symbol, u64) {
    (AUDIT, sequence)
}

fn zero_hash(env: &Env) -> BytesN<32> {
    BytesN::from_array(env, &[0u8; 32])
}

fn hash_entry(env: &Env, entry: &AuditEntry) -> BytesN<32> {
    let mut buf = Bytes::new(env);
    buf.extend_from_array(&entry.sequence.to_be_bytes());
    buf.extend_from_array(&entry.timestamp.to_be_bytes());
    buf.extend_from_array(&entry.prev_hash.to_array());
    buf.append(&entry.event.clone().to_xdr(env));
    env.crypto().sha256(&buf).into()
}

fn index_kind(env: &Env, kind: AuditKind, sequence: u64) {
    let count_key = (KIND_COUNT, kind);
    let slot = count_by_kind(env, kind).saturating_add(1);
    let slot_key = (KIND_SLOT, kind, slot);

    env.storage().persistent().set(&slot_key, &sequence);
    ttl::extend_persistent(env, &slot_key);
    env.storage().persistent().set(&count_key, &slot);
    ttl::extend_persistent(env, &count_key);
}

fn index_subject(env: &Env, subject: &Address, sequence: u64) {
    let count_key = (SUBJECT_COUNT, subject.clone());
    let slot = count_by_subject(env, subject).saturating_add(1);
    let slot_key = (SUBJECT_SLOT, subject.clone(), slot);

    env.storage().persistent().set(&slot_key, &sequence);
    ttl::extend_persistent(env, &slot_key);
    env.storage().persistent().set(&count_key, &slot);
    ttl::extend_persistent(env, &count_key);
}

/// Appends `event` to the log and returns its sequence number.
pub fn append(env: &Env, event: AuditEvent) -> u64 {
    let sequence = count(env).saturating_add(1);
    let prev_hash: BytesN<32> = env
        .storage()
        .instance()
        .get(&AUDIT_HEAD)
        .unwrap_or_else(|| zero_hash(env));

    let kind = event.kind();
    let (actor, target) = event.subjects();
    let entry = AuditEntry {
        sequence,
        timestamp: env.ledger().timestamp(),
        event,
        prev_hash,
    };

    let key = entry_key(sequence);
    env.storage().persistent().set(&key, &entry);
    ttl::extend_persistent(env, &key);

    index_kind(env, kind, sequence);
    index_subject(env, &actor, sequence);
    if target != actor {
        index_subject(env, &target, sequence);
    }

    env.storage()
        .instance()
        .set(&AUDIT_HEAD, &hash_entry(env, &entry));
    env.storage().instance().set(&AUDIT_CTR, &sequence);

    sequence
}

pub fn count(env: &Env) -> u64 {
    env.storage().instance().get(&AUDIT_CTR).unwrap_or(0)
}

pub fn count_by_kind(env: &Env, kind: AuditKind) -> u64 {
    env.storage()
        .persistent()
        .get(&(KIND_COUNT, kind))
        .unwrap_or(0)
}

pub fn count_by_subject(env: &Env, subject: &Address) -> u64 {
    env.storage()
        .persistent()
        .get(&(SUBJECT_COUNT, subject.clone()))
        .unwrap_or(0)
}

pub fn get(env: &Env, sequence: u64) -> Result<AuditEntry, ContractError> {
    env.storage()
        .persistent()
        .get(&entry_key(sequence))
        .ok_or(ContractError::AuditEntryNotFound)
}

/// Walks positions `start..=total` (1-based), resolving each to a log
/// sequence through `sequence_at`, until `limit` entries are collected.
fn collect_page<F>(env: &Env, total: u64, start: u64, limit: u32, sequence_at: F) -> Vec<AuditEntry>
where
    F: Fn(u64) -> Option<u64>,
{
    let mut out = Vec::new(env);
    let limit = page_limit(limit);
    let mut position = start.max(1);
    while position <= total && out.len() < limit {
        if let Some(entry) = sequence_at(position).and_then(|sequence| get(env, sequence).ok()) {
            out.push_back(entry);
        }
        position = position.saturating_add(1);
    }
    out
}

/// Returns up to `limit` entries starting at sequence `start` (1-based).
pub fn page(env: &Env, start: u64, limit: u32) -> Vec<AuditEntry> {
    collect_page(env, count(env), start, limit, Some)
}

/// Entries of `kind`, paged by position among entries of that kind.
pub fn by_kind(env: &Env, kind: AuditKind, start: u64, limit: u32) -> Vec<AuditEntry> {
    collect_page(env, count_by_kind(env, kind), start, limit, |slot| {
        env.storage().persistent().get(&(KIND_SLOT, kind, slot))
    })
}

/// Entries naming `subject` in any role, paged by position among them.
pub fn by_subject(env: &Env, subject: &Address, start: u64, limit: u32) -> Vec<AuditEntry> {
    collect_page(env, count_by_subject(env, subject), start, limit, |slot| {
        env.storage()
            .persistent()
            .get(&(SUBJECT_SLOT, subject.clone(), slot))
    })
}

/// First sequence whose timestamp is at least `ts`, or `count + 1` if none.
/// Ledger time never moves backwards, so timestamps are sorted by sequence.
fn first_at_or_after(env: &Env, ts: u64) -> u64 {
    let mut lo = 1u64;
    let mut hi = count(env).saturating_add(1);
    while lo < hi {
        let mid = lo.saturating_add(hi.saturating_sub(lo) / 2);
        match get(env, mid) {
            Ok(entry) if entry.timestamp < ts => lo = mid.saturating_add(1),
            _ => hi = mid,
        }
    }
    lo
}

/// Entries with `from_ts <= timestamp <= to_ts`, paged by position within
/// the range.
pub fn in_range(env: &Env, from_ts: u64, to_ts: u64, start: u64, limit: u32) -> Vec<AuditEntry> {
    let mut out = Vec::new(env);
    let limit = page_limit(limit);
    let total = count(env);
    let mut sequence = first_at_or_after(env, from_ts).saturating_add(start.saturating_sub(1));
    while sequence <= total && out.len() < limit {
        let entry = match get(env, sequence) {
            Ok(entry) => entry,
            Err(_) => break,
        };
        if entry.timestamp > to_ts {
            break;
        }
        out.push_back(entry);
        sequence = sequence.saturating_add(1);
    }
    out
}

/// Recomputes the hash chain from the first entry and compares it against the
/// stored links and head.
pub fn verify_chain(env: &Env) -> bool {
    let mut expected = zero_hash(env);
    for sequence in 1..=count(env) {
        let entry: AuditEntry = match env.storage().persistent().get(&entry_key(sequence)) {
            Some(entry) => entry,
            None => return false,
        };
        if entry.sequence != sequence || entry.prev_hash != expected {
            return false;
        }
        expected = hash_entry(env, &entry);
    }

    let head: BytesN<32> = env
        .storage()
        .instance()
        .get(&AUDIT_HEAD)
        .unwrap_or_else(|| zero_hash(env));
    head == expected
}
