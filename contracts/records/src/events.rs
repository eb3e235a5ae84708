use soroban_sdk::{symbol_short, Address, BytesN, Env, String};

/// Fired once when the registry is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub hub: Address,
    pub timestamp: u64,
}

/// Fired for every newly registered record, always before any reward event
/// of the same registration.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RecordAddedEvent {
    pub file_hash: BytesN<32>,
    pub patient: Address,
    pub record_type: u32,
    pub metadata: String,
    pub ipfs_uri: String,
    pub timestamp: u64,
}

/// Fired for every accepted doctor attestation.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SignatureAddedEvent {
    pub file_hash: BytesN<32>,
    pub doctor: Address,
    pub sig_count: u32,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardEvent {
    pub beneficiary: Address,
    pub token: Address,
    pub amount: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PauseEvent {
    pub admin: Address,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HubChangedEvent {
    pub previous: Address,
    pub hub: Address,
    pub timestamp: u64,
}

pub fn publish_initialized(env: &Env, admin: Address, hub: Address) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            admin,
            hub,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_record_added(
    env: &Env,
    file_hash: BytesN<32>,
    patient: Address,
    record_type: u32,
    metadata: String,
    ipfs_uri: String,
) {
    env.events().publish(
        (symbol_short!("REC_ADD"), file_hash.clone(), patient.clone()),
        RecordAddedEvent {
            file_hash,
            patient,
            record_type,
            metadata,
            ipfs_uri,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_signature_added(env: &Env, file_hash: BytesN<32>, doctor: Address, sig_count: u32) {
    env.events().publish(
        (symbol_short!("SIG_ADD"), file_hash.clone(), doctor.clone()),
        SignatureAddedEvent {
            file_hash,
            doctor,
            sig_count,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_reward(env: &Env, beneficiary: Address, token: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("REWARD"), beneficiary.clone()),
        RewardEvent {
            beneficiary,
            token,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_paused(env: &Env, admin: Address) {
    env.events().publish(
        (symbol_short!("PAUSED"),),
        PauseEvent {
            admin,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_unpaused(env: &Env, admin: Address) {
    env.events().publish(
        (symbol_short!("UNPAUSED"),),
        PauseEvent {
            admin,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_hub_changed(env: &Env, previous: Address, hub: Address) {
    env.events().publish(
        (symbol_short!("HUB_SET"),),
        HubChangedEvent {
            previous,
            hub,
            timestamp: env.ledger().timestamp(),
        },
    );
}
