#![no_std]

//! # Hub
//!
//! Late-binding locator for the Linnia contracts. The administrator wires each
//! [`Component`] to a deployed contract address; dependents resolve through the
//! hub at call time, so any component can be redeployed and re-wired without
//! redeploying the contracts that use it.

pub mod events;

use common::{ttl, Component};
use soroban_sdk::{contract, contractimpl, contracttype, symbol_short, Address, Env, Symbol};

// ── Storage keys ─────────────────────────────────────────────────────────────

const ADMIN: Symbol = symbol_short!("ADMIN");
const PENDING_ADMIN: Symbol = symbol_short!("PEND_ADM");
const INITIALIZED: Symbol = symbol_short!("INIT");

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
enum DataKey {
    Endpoint(Component),
}

// ── Errors ───────────────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    ComponentNotSet = 4,
    NoPendingAdmin = 5,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct HubContract;

#[contractimpl]
impl HubContract {
    /// Bootstrap the hub with its administrator.
    pub fn initialize(env: Env, admin: Address) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }

        env.storage().instance().set(&ADMIN, &admin);
        env.storage().instance().set(&INITIALIZED, &true);
        ttl::extend_instance(&env);

        events::publish_initialized(&env, admin);

        Ok(())
    }

    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&INITIALIZED)
    }

    pub fn get_admin(env: Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&ADMIN)
            .ok_or(ContractError::NotInitialized)
    }

    // ── Wiring ──────────────────────────────────────────────────────────────

    /// Point `component` at `endpoint`, replacing any previous wiring.
    pub fn set_component(
        env: Env,
        caller: Address,
        component: Component,
        endpoint: Address,
    ) -> Result<(), ContractError> {
        caller.require_auth();
        Self::require_admin(&env, &caller)?;

        let key = DataKey::Endpoint(component);
        let previous: Option<Address> = env.storage().persistent().get(&key);
        env.storage().persistent().set(&key, &endpoint);
        ttl::extend_persistent(&env, &key);

        events::publish_component_set(&env, component, endpoint, previous);

        Ok(())
    }

    /// Remove the wiring for `component`; later resolutions yield `None`.
    pub fn clear_component(
        env: Env,
        caller: Address,
        component: Component,
    ) -> Result<(), ContractError> {
        caller.require_auth();
        Self::require_admin(&env, &caller)?;

        let key = DataKey::Endpoint(component);
        let previous: Address = env
            .storage()
            .persistent()
            .get(&key)
            .ok_or(ContractError::ComponentNotSet)?;
        env.storage().persistent().remove(&key);

        events::publish_component_cleared(&env, component, previous);

        Ok(())
    }

    /// Resolve the endpoint currently wired for `component`.
    pub fn resolve(env: Env, component: Component) -> Option<Address> {
        env.storage()
            .persistent()
            .get(&DataKey::Endpoint(component))
    }

    // ── Admin transfer (two-step) ──────────────────────────────────────────

    /// Propose a new admin address. Only the current admin can call this.
    pub fn propose_admin(
        env: Env,
        current_admin: Address,
        new_admin: Address,
    ) -> Result<(), ContractError> {
        current_admin.require_auth();
        Self::require_admin(&env, &current_admin)?;

        env.storage().instance().set(&PENDING_ADMIN, &new_admin);

        events::publish_admin_transfer_proposed(&env, current_admin, new_admin);

        Ok(())
    }

    /// Accept the pending admin transfer. Only the proposed admin can call this.
    pub fn accept_admin(env: Env, new_admin: Address) -> Result<(), ContractError> {
        new_admin.require_auth();

        let pending: Address = env
            .storage()
            .instance()
            .get(&PENDING_ADMIN)
            .ok_or(ContractError::NoPendingAdmin)?;
        if new_admin != pending {
            return Err(ContractError::Unauthorized);
        }

        let old_admin = Self::get_admin(env.clone())?;
        env.storage().instance().set(&ADMIN, &new_admin);
        env.storage().instance().remove(&PENDING_ADMIN);

        events::publish_admin_transfer_accepted(&env, old_admin, new_admin);

        Ok(())
    }

    pub fn get_pending_admin(env: Env) -> Option<Address> {
        env.storage().instance().get(&PENDING_ADMIN)
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

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
}
