use common::Role;
use soroban_sdk::{symbol_short, Address, BytesN, Env};

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoleChangedEvent {
    pub identity: Address,
    pub previous: Role,
    pub role: Role,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SignerBoundEvent {
    pub identity: Address,
    pub signer: BytesN<20>,
    pub timestamp: u64,
}

pub fn publish_initialized(env: &Env, admin: Address) {
    env.events().publish((symbol_short!("INIT"),), admin);
}

/// Publishes a role transition for `identity`.
pub fn publish_role_changed(env: &Env, identity: Address, previous: Role, role: Role) {
    let topics = (symbol_short!("ROLE_SET"), identity.clone());
    let data = RoleChangedEvent {
        identity,
        previous,
        role,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_signer_bound(env: &Env, identity: Address, signer: BytesN<20>) {
    let topics = (symbol_short!("SIG_BIND"), identity.clone());
    let data = SignerBoundEvent {
        identity,
        signer,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}
