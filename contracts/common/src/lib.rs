//! Shared types and collaborator interfaces for the Linnia contract suite.
//!
//! This crate provides:
//! - [`Role`]: the role tags handed out by the role registry.
//! - [`Component`]: the logical names the hub resolves to contract addresses.
//! - Client interfaces for every collaborator the record registry calls
//!   through the hub (see [`interfaces`]).
//! - Persistent-storage TTL helpers shared by every contract.

#![no_std]

use soroban_sdk::contracttype;

// ── Modules ──────────────────────────────────────────────────────────────────

pub mod interfaces;
pub mod ttl;

pub use interfaces::*;

// ── Shared types ─────────────────────────────────────────────────────────────

/// Role of an identity as recorded by the role registry.
///
/// Every identity has exactly one role; unknown identities are `Unregistered`.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Role {
    Unregistered = 0,
    Patient = 1,
    Doctor = 2,
}

/// Logical component names wired through the hub.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Component {
    /// Role registry (hard dependency of the record registry).
    Roles = 1,
    /// Record registry itself; collaborators use it to authenticate callers.
    Records = 2,
    /// Reward distributor for the reward-bearing registration path.
    Rewards = 3,
    /// Trust-score ledger; optional.
    Trust = 4,
}
