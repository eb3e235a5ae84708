use soroban_sdk::{symbol_short, Address, Env};

/// Fired once when the distributor is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub hub: Address,
    pub amount: i128,
    pub timestamp: u64,
}

/// Fired for every reward paid out.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardPaidEvent {
    pub beneficiary: Address,
    pub token: Address,
    pub amount: i128,
    pub timestamp: u64,
}

/// Fired when the admin changes the per-record reward.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AmountSetEvent {
    pub amount: i128,
    pub timestamp: u64,
}

pub fn publish_initialized(env: &Env, admin: Address, hub: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            admin,
            hub,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_reward_paid(env: &Env, beneficiary: Address, token: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("PAID"), beneficiary.clone()),
        RewardPaidEvent {
            beneficiary,
            token,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_amount_set(env: &Env, amount: i128) {
    env.events().publish(
        (symbol_short!("AMT_SET"),),
        AmountSetEvent {
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}
