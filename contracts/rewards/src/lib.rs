#![no_std]

//! # Reward Distributor
//!
//! Pays a fixed amount of a Soroban token to patients who register records
//! through the reward-bearing path of the record registry. The distributor
//! pays from its own token balance, which the administrator funds, and only
//! honours calls from the `Records` component wired in the hub.

pub mod events;

use common::{ttl, Component, HubClient};
use soroban_sdk::{contract, contractimpl, symbol_short, token, Address, Env, Symbol};

// ── Storage key constants ────────────────────────────────────────────────────

const ADMIN: Symbol = symbol_short!("ADMIN");
const INITIALIZED: Symbol = symbol_short!("INIT");
const HUB: Symbol = symbol_short!("HUB");
const AMOUNT: Symbol = symbol_short!("AMOUNT");
const TOTAL_PAID: Symbol = symbol_short!("TOT_PAID");

// ── Contract errors ──────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    InvalidInput = 4,
    InsufficientBalance = 5,
}

#[contract]
pub struct RewardDistributorContract;

#[contractimpl]
impl RewardDistributorContract {
    /// Bootstrap the distributor.
    ///
    /// * `hub`    – hub used to authenticate the record registry.
    /// * `amount` – tokens paid per rewarded registration; must be positive.
    pub fn initialize(
        env: Env,
        admin: Address,
        hub: Address,
        amount: i128,
    ) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }
        if amount <= 0 {
            return Err(ContractError::InvalidInput);
        }

        env.storage().instance().set(&ADMIN, &admin);
        env.storage().instance().set(&INITIALIZED, &true);
        env.storage().instance().set(&HUB, &hub);
        env.storage().instance().set(&AMOUNT, &amount);
        ttl::extend_instance(&env);

        events::publish_initialized(&env, admin, hub, amount);

        Ok(())
    }

    /// Pay the configured reward in `token` to `beneficiary`.
    ///
    /// `caller` must be the record registry currently wired in the hub.
    /// Fails with `InsufficientBalance` when the distributor cannot cover the
    /// payment, leaving every balance unchanged.
    pub fn reward(
        env: Env,
        caller: Address,
        beneficiary: Address,
        token: Address,
    ) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_records(&env, &caller)?;

        let amount = Self::get_amount(env.clone());
        let client = token::Client::new(&env, &token);
        let this = env.current_contract_address();
        if client.balance(&this) < amount {
            return Err(ContractError::InsufficientBalance);
        }

        client.transfer(&this, &beneficiary, &amount);

        let total: i128 = env.storage().instance().get(&TOTAL_PAID).unwrap_or(0);
        env.storage()
            .instance()
            .set(&TOTAL_PAID, &total.saturating_add(amount));

        events::publish_reward_paid(&env, beneficiary, token, amount);

        Ok(amount)
    }

    /// Update the per-registration reward. Admin only.
    pub fn set_amount(env: Env, caller: Address, amount: i128) -> Result<(), ContractError> {
        caller.require_auth();
        Self::require_admin(&env, &caller)?;

        if amount <= 0 {
            return Err(ContractError::InvalidInput);
        }
        env.storage().instance().set(&AMOUNT, &amount);

        events::publish_amount_set(&env, amount);

        Ok(())
    }

    // ── View functions ───────────────────────────────────────────────────────

    pub fn get_amount(env: Env) -> i128 {
        env.storage().instance().get(&AMOUNT).unwrap_or(0)
    }

    /// Sum of every reward paid out, across all tokens.
    pub fn get_total_paid(env: Env) -> i128 {
        env.storage().instance().get(&TOTAL_PAID).unwrap_or(0)
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

    // ── Internal helpers ─────────────────────────────────────────────────────

    fn require_initialized(env: &Env) -> Result<(), ContractError> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::NotInitialized);
        }
        Ok(())
    }

    fn require_admin(env: &Env, caller: &Address) -> Result<(), ContractError> {
        let admin: Address = env
            .storage()
            .instance()
            .get(&ADMIN)
            .ok_or(ContractError::NotInitialized)?;
        if *caller != admin {
            return Err(ContractError::Unauthorized);
        }
        Ok(())
    }

    /// Guard: `caller` must be the `Records` component resolved through the hub.
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
