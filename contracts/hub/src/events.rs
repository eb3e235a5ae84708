use common::Component;
use soroban_sdk::{symbol_short, Address, Env};

/// Fired once when the hub is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub timestamp: u64,
}

/// Fired when a component is (re)wired.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ComponentSetEvent {
    pub component: Component,
    pub endpoint: Address,
    pub previous: Option<Address>,
    pub timestamp: u64,
}

/// Fired when a component is unwired.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ComponentClearedEvent {
    pub component: Component,
    pub previous: Address,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminTransferEvent {
    pub from: Address,
    pub to: Address,
    pub timestamp: u64,
}

pub fn publish_initialized(env: &Env, admin: Address) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            admin,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_component_set(
    env: &Env,
    component: Component,
    endpoint: Address,
    previous: Option<Address>,
) {
    env.events().publish(
        (symbol_short!("COMP_SET"), component),
        ComponentSetEvent {
            component,
            endpoint,
            previous,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_component_cleared(env: &Env, component: Component, previous: Address) {
    env.events().publish(
        (symbol_short!("COMP_CLR"), component),
        ComponentClearedEvent {
            component,
            previous,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_admin_transfer_proposed(env: &Env, from: Address, to: Address) {
    env.events().publish(
        (symbol_short!("ADM_PROP"),),
        AdminTransferEvent {
            from,
            to,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_admin_transfer_accepted(env: &Env, from: Address, to: Address) {
    env.events().publish(
        (symbol_short!("ADM_ACC"),),
        AdminTransferEvent {
            from,
            to,
            timestamp: env.ledger().timestamp(),
        },
    );
}
