#![no_std]

//! # Trust-Score Ledger
//!
//! Accumulates health-history trust points per identity. Points are only
//! credited by the record registry wired in the hub, once per doctor
//! attestation on one of the identity's records.

pub mod events;

use common::{ttl, Component, HubClient};
use soroban_sdk::{contract, contractimpl, contracttype, symbol_short, Address, Env, Symbol};

const ADMIN: Symbol = symbol_short!("ADMIN");
const INITIALIZED: Symbol = symbol_short!("INIT");
const HUB: Symbol = symbol_short!("HUB");

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
enum DataKey {
    Points(Address),
}

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    InvalidInput = 4,
}

#[contract]
pub struct TrustLedgerContract;

#[contractimpl]
impl TrustLedgerContract {
    pub fn initialize(env: Env, admin: Address, hub: Address) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }

        env.storage().instance().set(&ADMIN, &admin);
        env.storage().instance().set(&INITIALIZED, &true);
        env.storage().instance().set(&HUB, &hub);
        ttl::extend_instance(&env);

        events::publish_initialized(&env, admin, hub);

        Ok(())
    }

    /// Credit `points` to `identity` and return the new total.
    ///
    /// `caller` must be the record registry currently wired in the hub.
    pub fn add_points(
        env: Env,
        caller: Address,
        identity: Address,
        points: u64,
    ) -> Result<u64, ContractError> {
        caller.require_auth();
        Self::require_records(&env, &caller)?;

        if points == 0 {
            return Err(ContractError::InvalidInput);
        }

        let key = DataKey::Points(identity.clone());
        let total = Self::points_of(env.clone(), identity.clone()).saturating_add(points);
        env.storage().persistent().set(&key, &total);
        ttl::extend_persistent(&env, &key);

        events::publish_points_added(&env, identity, points, total);

        Ok(total)
    }

    pub fn points_of(env: Env, identity: Address) -> u64 {
        env.storage()
            .persistent()
            .get(&DataKey::Points(identity))
            .unwrap_or(0)
    }

    pub fn get_admin(env: Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&ADMIN)
            .ok_or(ContractError::NotInitialized)
    }

    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&INITIALIZED)
    }

    fn require_records(env: &Env, caller: &Address) -> Result<(), ContractError> {
        let hub: Address = env
            .storage()
            .instance()
            .get(&HUB)
            .ok_or(ContractError::NotInitialized)?;
        match HubClient::new(env, &hub).resolve(&Component::Records) {
            Some(records) if records == *caller => Ok(()),
            _ => Err(ContractError::Unauthorized),
        }
    }
}
