//! Resolution of collaborator contracts through the hub.
//!
//! Nothing is cached: every call resolves the current endpoint so the admin
//! can rewire a component without touching the registry.

use common::{Component, HubClient, RewardDistributorClient, RoleRegistryClient, TrustLedgerClient};
use soroban_sdk::{symbol_short, Address, Env, Symbol};

use crate::ContractError;

pub const HUB: Symbol = symbol_short!("HUB");

pub fn hub(env: &Env) -> Result<Address, ContractError> {
    env.storage()
        .instance()
        .get(&HUB)
        .ok_or(ContractError::NotInitialized)
}

fn resolve(env: &Env, component: Component) -> Result<Option<Address>, ContractError> {
    let hub = hub(env)?;
    match HubClient::new(env, &hub).try_resolve(&component) {
        Ok(Ok(endpoint)) => Ok(endpoint),
        _ => Err(match component {
            Component::Rewards => ContractError::RewardsNotConfigured,
            Component::Trust => ContractError::TrustUpdateFailed,
            _ => ContractError::RolesNotConfigured,
        }),
    }
}

/// The role registry is a hard dependency.
pub fn roles(env: &Env) -> Result<RoleRegistryClient<'_>, ContractError> {
    let endpoint = resolve(env, Component::Roles)?.ok_or(ContractError::RolesNotConfigured)?;
    Ok(RoleRegistryClient::new(env, &endpoint))
}

pub fn rewards(env: &Env) -> Result<RewardDistributorClient<'_>, ContractError> {
    let endpoint = resolve(env, Component::Rewards)?.ok_or(ContractError::RewardsNotConfigured)?;
    Ok(RewardDistributorClient::new(env, &endpoint))
}

/// `None` when no trust ledger is wired; callers skip the update.
pub fn trust(env: &Env) -> Result<Option<TrustLedgerClient<'_>>, ContractError> {
    Ok(resolve(env, Component::Trust)?.map(|endpoint| TrustLedgerClient::new(env, &endpoint)))
}
