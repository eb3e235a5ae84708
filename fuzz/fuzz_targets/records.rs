#![no_main]

use arbitrary::Arbitrary;
use common::Component;
use hub::{HubContract, HubContractClient};
use libfuzzer_sys::fuzz_target;
use records::{RecordsContract, RecordsContractClient};
use roles::{RoleRegistryContract, RoleRegistryContractClient};
use soroban_sdk::{testutils::Address as _, Address, BytesN, Env, String};
use trust::{TrustLedgerContract, TrustLedgerContractClient};

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Register { caller: u8, hash_seed: u8, record_type: u8, uri_len: u8 },
    RegisterByDoctor { doctor: u8, patient: u8, hash_seed: u8, uri_len: u8 },
    Attest { caller: u8, hash_seed: u8 },
    AttestWithSig { hash_seed: u8, r: [u8; 32], s: [u8; 32], recovery_id: u8 },
    TogglePause,
}

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();
    let admin = Address::generate(&env);

    let hub_id = env.register(HubContract, ());
    let hub = HubContractClient::new(&env, &hub_id);
    hub.initialize(&admin);

    let roles_id = env.register(RoleRegistryContract, ());
    let roles = RoleRegistryContractClient::new(&env, &roles_id);
    roles.initialize(&admin);

    let trust_id = env.register(TrustLedgerContract, ());
    TrustLedgerContractClient::new(&env, &trust_id).initialize(&admin, &hub_id);

    let records_id = env.register(RecordsContract, ());
    let client = RecordsContractClient::new(&env, &records_id);
    client.initialize(&admin, &hub_id);

    hub.set_component(&admin, &Component::Roles, &roles_id);
    hub.set_component(&admin, &Component::Trust, &trust_id);
    hub.set_component(&admin, &Component::Records, &records_id);

    // Two patients, two doctors, one stranger.
    let mut users = vec![];
    for i in 0..5 {
        let user = Address::generate(&env);
        match i {
            0 | 1 => roles.register_patient(&user),
            2 | 3 => roles.register_doctor(&admin, &user),
            _ => {}
        }
        users.push(user);
    }
    let pick = |i: u8| users[i as usize % users.len()].clone();
    let hash = |seed: u8| BytesN::from_array(&env, &[seed % 8; 32]);
    let uri = |len: u8| String::from_str(&env, &"q".repeat(len as usize % 300));

    for action in actions {
        match action {
            FuzzAction::Register { caller, hash_seed, record_type, uri_len } => {
                let _ = client.try_add_record(
                    &pick(caller),
                    &hash(hash_seed),
                    &(record_type as u32 % 4),
                    &String::from_str(&env, ""),
                    &uri(uri_len),
                );
            }
            FuzzAction::RegisterByDoctor { doctor, patient, hash_seed, uri_len } => {
                let _ = client.try_add_record_by_doctor(
                    &pick(doctor),
                    &pick(patient),
                    &hash(hash_seed),
                    &1,
                    &String::from_str(&env, ""),
                    &uri(uri_len),
                );
            }
            FuzzAction::Attest { caller, hash_seed } => {
                let _ = client.try_add_signature(&pick(caller), &hash(hash_seed));
            }
            FuzzAction::AttestWithSig { hash_seed, r, s, recovery_id } => {
                let _ = client.try_add_signature_with_sig(
                    &hash(hash_seed),
                    &BytesN::from_array(&env, &r),
                    &BytesN::from_array(&env, &s),
                    &(recovery_id as u32),
                );
            }
            FuzzAction::TogglePause => {
                if client.is_paused() {
                    let _ = client.try_unpause(&admin);
                } else {
                    let _ = client.try_pause(&admin);
                }
            }
        }

        // A record's signature count never exceeds the number of doctors.
        for seed in 0..8u8 {
            if let Ok(Ok(count)) = client.try_sig_count(&hash(seed)) {
                assert!(count <= 2);
            }
        }
    }
});
