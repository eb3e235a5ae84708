use soroban_sdk::{symbol_short, Address, Env, Symbol};

use crate::{events, ContractError};

const PAUSED: Symbol = symbol_short!("P_GLOB");

pub fn is_paused(env: &Env) -> bool {
    env.storage().instance().get(&PAUSED).unwrap_or(false)
}

/// First check of every mutating entry point.
pub fn require_not_paused(env: &Env) -> Result<(), ContractError> {
    if is_paused(env) {
        return Err(ContractError::Paused);
    }
    Ok(())
}

/// Halts registration and attestation. The caller must already be
/// authenticated as the administrator.
pub fn pause(env: &Env, admin: &Address) -> Result<(), ContractError> {
    if is_paused(env) {
        return Err(ContractError::Paused);
    }
    env.storage().instance().set(&PAUSED, &true);
    events::publish_paused(env, admin.clone());
    Ok(())
}

pub fn unpause(env: &Env, admin: &Address) -> Result<(), ContractError> {
    if !is_paused(env) {
        return Err(ContractError::NotPaused);
    }
    env.storage().instance().set(&PAUSED, &false);
    events::publish_unpaused(env, admin.clone());
    Ok(())
}
