use soroban_sdk::{symbol_short, Address, Env};

/// Fired whenever points are credited to an identity.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PointsAddedEvent {
    pub identity: Address,
    pub points: u64,
    pub total: u64,
    pub timestamp: u64,
}

pub fn publish_initialized(env: &Env, admin: Address, hub: Address) {
    env.events().publish((symbol_short!("INIT"),), (admin, hub));
}

pub fn publish_points_added(env: &Env, identity: Address, points: u64, total: u64) {
    let topics = (symbol_short!("PTS_ADD"), identity.clone());
    let data = PointsAddedEvent {
        identity,
        points,
        total,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}
