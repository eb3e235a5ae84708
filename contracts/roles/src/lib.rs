#![no_std]

//! # Role Registry
//!
//! Maps every identity to a single [`Role`]. Patients register themselves;
//! doctors are registered by the administrator. A doctor may also bind a
//! 20-byte secp256k1 signer address so that attestations signed off-ledger
//! with standard wallet tooling can be traced back to the doctor's identity.

pub mod events;

use common::{ttl, Role};
use soroban_sdk::{contract, contractimpl, contracttype, symbol_short, Address, BytesN, Env, Symbol};

const ADMIN: Symbol = symbol_short!("ADMIN");
const INITIALIZED: Symbol = symbol_short!("INIT");

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
enum DataKey {
    Role(Address),
    /// identity -> bound signer
    Signer(Address),
    /// bound signer -> identity
    SignerOwner(BytesN<20>),
}

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    AlreadyRegistered = 4,
    NotRegistered = 5,
    NotDoctor = 6,
    SignerTaken = 7,
    InvalidSigner = 8,
}

#[contract]
pub struct RoleRegistryContract;

#[contractimpl]
impl RoleRegistryContract {
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

    // ── Registration ────────────────────────────────────────────────────────

    /// Self-registration as a patient. Only unregistered identities may join.
    pub fn register_patient(env: Env, patient: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        patient.require_auth();

        let previous = Self::role_of(env.clone(), patient.clone());
        if previous != Role::Unregistered {
            return Err(ContractError::AlreadyRegistered);
        }

        Self::store_role(&env, &patient, Role::Patient);
        events::publish_role_changed(&env, patient, previous, Role::Patient);

        Ok(())
    }

    /// Registers `doctor` as a doctor. Admin only; an existing patient is promoted.
    pub fn register_doctor(env: Env, caller: Address, doctor: Address) -> Result<(), ContractError> {
        caller.require_auth();
        Self::require_admin(&env, &caller)?;

        let previous = Self::role_of(env.clone(), doctor.clone());
        if previous == Role::Doctor {
            return Err(ContractError::AlreadyRegistered);
        }

        Self::store_role(&env, &doctor, Role::Doctor);
        events::publish_role_changed(&env, doctor, previous, Role::Doctor);

        Ok(())
    }

    /// Returns `identity` to `Unregistered` and releases its signer binding. Admin only.
    pub fn unregister(env: Env, caller: Address, identity: Address) -> Result<(), ContractError> {
        caller.require_auth();
        Self::require_admin(&env, &caller)?;

        let previous = Self::role_of(env.clone(), identity.clone());
        if previous == Role::Unregistered {
            return Err(ContractError::NotRegistered);
        }

        env.storage()
            .persistent()
            .remove(&DataKey::Role(identity.clone()));
        Self::release_signer(&env, &identity);

        events::publish_role_changed(&env, identity, previous, Role::Unregistered);

        Ok(())
    }

    pub fn role_of(env: Env, identity: Address) -> Role {
        env.storage()
            .persistent()
            .get(&DataKey::Role(identity))
            .unwrap_or(Role::Unregistered)
    }

    // ── Signer binding ──────────────────────────────────────────────────────

    /// Binds a secp256k1 signer address to the calling doctor, replacing any
    /// earlier binding of that doctor.
    pub fn bind_signer(env: Env, doctor: Address, signer: BytesN<20>) -> Result<(), ContractError> {
        doctor.require_auth();

        if Self::role_of(env.clone(), doctor.clone()) != Role::Doctor {
            return Err(ContractError::NotDoctor);
        }
        if signer.to_array() == [0u8; 20] {
            return Err(ContractError::InvalidSigner);
        }

        let owner_key = DataKey::SignerOwner(signer.clone());
        if let Some(owner) = env.storage().persistent().get::<_, Address>(&owner_key) {
            if owner != doctor {
                return Err(ContractError::SignerTaken);
            }
        }

        Self::release_signer(&env, &doctor);

        let signer_key = DataKey::Signer(doctor.clone());
        env.storage().persistent().set(&signer_key, &signer);
        ttl::extend_persistent(&env, &signer_key);
        env.storage().persistent().set(&owner_key, &doctor);
        ttl::extend_persistent(&env, &owner_key);

        events::publish_signer_bound(&env, doctor, signer);

        Ok(())
    }

    pub fn signer_of(env: Env, identity: Address) -> Option<BytesN<20>> {
        env.storage().persistent().get(&DataKey::Signer(identity))
    }

    pub fn identity_of_signer(env: Env, signer: BytesN<20>) -> Option<Address> {
        env.storage().persistent().get(&DataKey::SignerOwner(signer))
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    fn store_role(env: &Env, identity: &Address, role: Role) {
        let key = DataKey::Role(identity.clone());
        env.storage().persistent().set(&key, &role);
        ttl::extend_persistent(env, &key);
    }

    fn release_signer(env: &Env, identity: &Address) {
        let signer_key = DataKey::Signer(identity.clone());
        if let Some(signer) = env.storage().persistent().get::<_, BytesN<20>>(&signer_key) {
            env.storage()
                .persistent()
                .remove(&DataKey::SignerOwner(signer));
            env.storage().persistent().remove(&signer_key);
        }
    }

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
}
