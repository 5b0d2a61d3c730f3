#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::arithmetic_side_effects
)]

use super::*;
use sarawak_common::identity::zero_address;
use soroban_sdk::testutils::{Address as _, Events, Ledger as _};
use soroban_sdk::{symbol_short, Env, IntoVal, TryIntoVal};

fn setup() -> (Env, Address, SarawakMedContractClient<'static>, Address) {
    let env = Env::default();
    env.mock_all_auths();

    let contract_id = env.register(SarawakMedContract, ());
    let client = SarawakMedContractClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    client.initialize(&admin);

    (env, contract_id, client, admin)
}

#[test]
fn test_initialize() {
    let env = Env::default();
    env.mock_all_auths();
    let contract_id = env.register(SarawakMedContract, ());
    let client = SarawakMedContractClient::new(&env, &contract_id);

    assert!(!client.is_initialized());
    assert_eq!(
        client.try_get_admin(),
        Err(Ok(ContractError::NotInitialized))
    );

    let admin = Address::generate(&env);
    client.initialize(&admin);
    let events = env.events().all();

    assert!(client.is_initialized());
    assert_eq!(client.get_admin(), admin);

    let event = events.get(events.len() - 1).unwrap();
    assert_eq!(event.1, (symbol_short!("INIT"),).into_val(&env));
    let payload: events::InitializedEvent = event.2.try_into_val(&env).unwrap();
    assert_eq!(payload.admin, admin);
}

#[test]
fn test_initialize_twice_fails() {
    let (env, _id, client, _admin) = setup();
    let other = Address::generate(&env);
    assert_eq!(
        client.try_initialize(&other),
        Err(Ok(ContractError::AlreadyInitialized))
    );
}

#[test]
fn test_initialize_rejects_zero_admin() {
    let env = Env::default();
    env.mock_all_auths();
    let contract_id = env.register(SarawakMedContract, ());
    let client = SarawakMedContractClient::new(&env, &contract_id);

    assert_eq!(
        client.try_initialize(&zero_address(&env)),
        Err(Ok(ContractError::InvalidAddress))
    );
    assert!(!client.is_initialized());
}

#[test]
fn test_admin_ops_before_initialize() {
    let env = Env::default();
    env.mock_all_auths();
    let contract_id = env.register(SarawakMedContract, ());
    let client = SarawakMedContractClient::new(&env, &contract_id);

    let caller = Address::generate(&env);
    let doctor = Address::generate(&env);
    assert_eq!(
        client.try_add_verified_doctor(&caller, &doctor),
        Err(Ok(ContractError::NotInitialized))
    );
    assert_eq!(
        client.try_add_credits(&caller, &doctor, &5),
        Err(Ok(ContractError::NotInitialized))
    );
}

#[test]
fn test_add_verified_doctor_publishes_event() {
    let (env, _id, client, admin) = setup();
    let doctor = Address::generate(&env);

    client.add_verified_doctor(&admin, &doctor);
    let events = env.events().all();

    assert!(client.is_verified_doctor(&doctor));
    assert_eq!(client.get_verified_doctor_count(), 1);

    let event = events.get(events.len() - 1).unwrap();
    assert_eq!(
        event.1,
        (symbol_short!("DOC_VER"), doctor.clone()).into_val(&env)
    );
    let payload: events::DoctorVerifiedEvent = event.2.try_into_val(&env).unwrap();
    assert_eq!(payload.admin, admin);
    assert_eq!(payload.doctor, doctor);
}

#[test]
fn test_remove_verified_doctor_updates_count() {
    let (env, _id, client, admin) = setup();
    let a = Address::generate(&env);
    let b = Address::generate(&env);

    client.add_verified_doctor(&admin, &a);
    client.add_verified_doctor(&admin, &b);
    assert_eq!(client.get_verified_doctor_count(), 2);

    client.remove_verified_doctor(&admin, &a);
    assert_eq!(client.get_verified_doctor_count(), 1);
    assert!(!client.is_verified_doctor(&a));
    assert!(client.is_verified_doctor(&b));
}

#[test]
fn test_write_record_stores_and_publishes() {
    let (env, _id, client, admin) = setup();
    let doctor = Address::generate(&env);
    let patient = Address::generate(&env);
    client.add_verified_doctor(&admin, &doctor);

    env.ledger().set_timestamp(1_700_000_000);
    let hash = String::from_str(&env, "QmX");
    let record_id = client.write_record(&doctor, &patient, &hash);
    let events = env.events().all();

    assert_eq!(record_id, 1);
    assert_eq!(client.get_record_count(), 1);

    let event = events.get(events.len() - 1).unwrap();
    assert_eq!(
        event.1,
        (symbol_short!("REC_WRT"), patient.clone(), doctor.clone()).into_val(&env)
    );
    let payload: events::RecordWrittenEvent = event.2.try_into_val(&env).unwrap();
    assert_eq!(payload.record_id, 1);
    assert_eq!(payload.ipfs_hash, hash);

    let records = client.get_my_records(&patient);
    assert_eq!(records.len(), 1);
    let record = records.get(0).unwrap();
    assert_eq!(record.doctor, doctor);
    assert_eq!(record.ipfs_hash, hash);
    assert_eq!(record.timestamp, 1_700_000_000);
}

#[test]
fn test_read_records_publishes_attempt() {
    let (env, _id, client, admin) = setup();
    let doctor = Address::generate(&env);
    let patient = Address::generate(&env);
    client.add_verified_doctor(&admin, &doctor);
    client.write_record(&doctor, &patient, &String::from_str(&env, "QmX"));

    let records = client.read_records(&patient, &patient);
    let events = env.events().all();
    assert_eq!(records.len(), 1);

    let event = events.get(events.len() - 1).unwrap();
    assert_eq!(
        event.1,
        (symbol_short!("ACC_ATT"), patient.clone(), patient.clone()).into_val(&env)
    );
    let payload: events::AccessAttemptedEvent = event.2.try_into_val(&env).unwrap();
    assert!(payload.granted);
}

#[test]
fn test_denied_read_is_audited_before_failing() {
    let (env, contract_id, client, admin) = setup();
    let doctor = Address::generate(&env);
    let stranger = Address::generate(&env);
    let patient = Address::generate(&env);
    let hospital = Address::generate(&env);
    client.add_verified_doctor(&admin, &doctor);
    client.add_verified_doctor(&admin, &stranger);
    client.write_record(&doctor, &patient, &String::from_str(&env, "QmX"));
    client.add_credits(&admin, &hospital, &3);

    let audit_before = client.get_audit_count();

    // Run the read inside the contract frame so its own unit of work is kept.
    let result = env.as_contract(&contract_id, || records::read(&env, &stranger, &patient));
    assert_eq!(result, Err(ContractError::AccessDenied));

    assert_eq!(client.get_audit_count(), audit_before + 1);
    let entry = client.get_audit_entry(&(audit_before + 1));
    match entry.event {
        AuditEvent::AccessAttempted(attempt) => {
            assert!(!attempt.granted);
            assert_eq!(attempt.accessor, stranger);
            assert_eq!(attempt.patient, patient);
        }
        other => panic!("unexpected audit event {:?}", other),
    }

    // Nothing else moved.
    assert_eq!(client.get_my_records_count(&patient), 1);
    assert!(!client.has_access(&patient, &stranger));
    assert_eq!(client.get_hospital_balance(&hospital), 3);
    assert!(client.verify_audit_chain());
}

#[test]
fn test_denied_read_via_client_reports_access_denied() {
    let (env, _id, client, _admin) = setup();
    let stranger = Address::generate(&env);
    let patient = Address::generate(&env);

    assert_eq!(
        client.try_read_records(&stranger, &patient),
        Err(Ok(ContractError::AccessDenied))
    );
}

#[test]
fn test_add_credits_and_issue_publish_events() {
    let (env, _id, client, admin) = setup();
    let hospital = Address::generate(&env);
    let issuer = Address::generate(&env);

    assert_eq!(client.add_credits(&admin, &hospital, &2), 2);
    let events = env.events().all();
    let event = events.get(events.len() - 1).unwrap();
    assert_eq!(
        event.1,
        (symbol_short!("CRD_ADD"), hospital.clone()).into_val(&env)
    );
    let payload: events::CreditsAddedEvent = event.2.try_into_val(&env).unwrap();
    assert_eq!(payload.admin, admin);
    assert_eq!(payload.amount, 2);
    assert_eq!(payload.new_balance, 2);

    assert_eq!(client.issue_digital_mc(&issuer, &hospital), 1);
    let events = env.events().all();
    let event = events.get(events.len() - 1).unwrap();
    assert_eq!(
        event.1,
        (symbol_short!("MC_ISS"), hospital.clone()).into_val(&env)
    );
    let payload: events::McIssuedEvent = event.2.try_into_val(&env).unwrap();
    assert_eq!(payload.issuer, issuer);
    assert_eq!(payload.sequence_number, 1);
    assert_eq!(payload.new_balance, 1);
}

#[test]
fn test_credit_overflow_is_rejected_without_side_effects() {
    let (env, _id, client, admin) = setup();
    let hospital = Address::generate(&env);

    client.add_credits(&admin, &hospital, &i64::MAX);
    let audit_before = client.get_audit_count();

    assert_eq!(
        client.try_add_credits(&admin, &hospital, &1),
        Err(Ok(ContractError::BalanceOverflow))
    );
    assert_eq!(client.get_hospital_balance(&hospital), i64::MAX);
    assert_eq!(client.get_audit_count(), audit_before);
}

#[test]
fn test_global_pause_blocks_mutations_but_not_reads() {
    let (env, _id, client, admin) = setup();
    let doctor = Address::generate(&env);
    let patient = Address::generate(&env);
    let hospital = Address::generate(&env);
    client.add_verified_doctor(&admin, &doctor);
    client.write_record(&doctor, &patient, &String::from_str(&env, "QmX"));

    client.pause(&admin, &PauseScope::Global);
    assert!(client.is_paused(&PauseScope::Global));

    let other = Address::generate(&env);
    assert_eq!(
        client.try_add_verified_doctor(&admin, &other),
        Err(Ok(ContractError::Paused))
    );
    assert_eq!(
        client.try_write_record(&doctor, &patient, &String::from_str(&env, "QmY")),
        Err(Ok(ContractError::Paused))
    );
    assert_eq!(
        client.try_grant_access(&patient, &doctor),
        Err(Ok(ContractError::Paused))
    );
    assert_eq!(
        client.try_issue_digital_mc(&doctor, &hospital),
        Err(Ok(ContractError::Paused))
    );
    assert_eq!(client.read_records(&patient, &patient).len(), 1);

    client.resume(&admin, &PauseScope::Global);
    client.issue_digital_mc(&doctor, &hospital);
    assert_eq!(client.get_mc_count(), 1);
}

#[test]
fn test_function_pause_is_scoped() {
    let (env, _id, client, admin) = setup();
    let hospital = Address::generate(&env);

    let scope = PauseScope::Function(circuit_breaker::ISSUE_MC);
    client.pause(&admin, &scope);
    assert!(client.is_paused(&scope));
    assert!(!client.is_paused(&PauseScope::Global));

    assert_eq!(
        client.try_issue_digital_mc(&admin, &hospital),
        Err(Ok(ContractError::Paused))
    );
    // Other entrypoints still run.
    client.add_credits(&admin, &hospital, &4);
    assert_eq!(client.get_hospital_balance(&hospital), 4);
}

#[test]
fn test_pause_requires_admin() {
    let (env, _id, client, _admin) = setup();
    let intruder = Address::generate(&env);
    assert_eq!(
        client.try_pause(&intruder, &PauseScope::Global),
        Err(Ok(ContractError::Unauthorized))
    );
    assert!(!client.is_paused(&PauseScope::Global));
}

#[test]
fn test_version() {
    assert_eq!(SarawakMedContract::version(), 1);
}
