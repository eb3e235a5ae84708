use common::Role;
use soroban_sdk::{Address, BytesN, Env};

use crate::{collaborators, ContractError};

/// Current role of `identity` in the wired role registry.
pub fn role_of(env: &Env, identity: &Address) -> Result<Role, ContractError> {
    match collaborators::roles(env)?.try_role_of(identity) {
        Ok(Ok(role)) => Ok(role),
        _ => Err(ContractError::RoleLookupFailed),
    }
}

/// Single gate used by every mutating operation.
pub fn authorize(env: &Env, required: Role, identity: &Address) -> Result<(), ContractError> {
    if role_of(env, identity)? == required {
        return Ok(());
    }
    Err(match required {
        Role::Doctor => ContractError::NotDoctor,
        _ => ContractError::NotPatient,
    })
}

/// Identity that bound `signer`; an unbound key cannot be a doctor.
pub fn identity_of_signer(env: &Env, signer: &BytesN<20>) -> Result<Address, ContractError> {
    match collaborators::roles(env)?.try_identity_of_signer(signer) {
        Ok(Ok(Some(identity))) => Ok(identity),
        Ok(Ok(None)) => Err(ContractError::NotDoctor),
        _ => Err(ContractError::RoleLookupFailed),
    }
}
