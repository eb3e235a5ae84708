//! Client interfaces for cross-contract calls.
//!
//! Each trait mirrors the public entry points of a deployed contract; the
//! generated `*Client` types let a contract call a collaborator knowing only
//! its address. The record registry uses the `try_*` variants so a failing
//! collaborator is reported as a typed error rather than trapping the host.

use soroban_sdk::{contractclient, Address, BytesN, Env};

use crate::{Component, Role};

/// Hub / registry locator.
#[contractclient(name = "HubClient")]
pub trait HubInterface {
    /// Returns the endpoint wired for `component`, or `None` when unset.
    fn resolve(env: Env, component: Component) -> Option<Address>;
}

/// Role registry.
#[contractclient(name = "RoleRegistryClient")]
pub trait RoleRegistryInterface {
    fn role_of(env: Env, identity: Address) -> Role;

    /// Maps a 20-byte secp256k1 signer address to the identity that bound it.
    fn identity_of_signer(env: Env, signer: BytesN<20>) -> Option<Address>;
}

/// Reward distributor.
#[contractclient(name = "RewardDistributorClient")]
pub trait RewardDistributorInterface {
    /// Transfers the configured reward amount of `token` to `beneficiary`.
    fn reward(env: Env, caller: Address, beneficiary: Address, token: Address) -> i128;
}

/// Trust-score ledger.
#[contractclient(name = "TrustLedgerClient")]
pub trait TrustLedgerInterface {
    /// Credits `points` to `identity` and returns the new total.
    fn add_points(env: Env, caller: Address, identity: Address, points: u64) -> u64;
}
