#![no_std]

//! # Record Registry
//!
//! Provenance registry for medical records. A record is keyed by the
//! keccak-256 digest of the original file and points at its encrypted
//! payload in IPFS. Patients register their own records, doctors register
//! on behalf of patients and attest records either directly or through a
//! wallet signature relayed by anyone.
//!
//! Roles, rewards and trust points live in separate contracts resolved
//! through the hub on every call. Collaborator calls run inside the same
//! invocation, so any failure rolls the whole operation back.

pub mod collaborators;
pub mod errors;
pub mod events;
pub mod pause;
pub mod rbac;
pub mod signature;
pub mod store;
pub mod validation;

pub use errors::{ContractError, ErrorCategory, ErrorSeverity};
pub use signature::{EthSignedMessage, SignatureVerifier};

use common::{ttl, Role};
use soroban_sdk::{
    contract, contractimpl, contracttype, symbol_short, Address, Bytes, BytesN, Env, String,
    Symbol,
};

const ADMIN: Symbol = symbol_short!("ADMIN");
const INITIALIZED: Symbol = symbol_short!("INIT");

/// Scheme used by `add_signature_with_sig` and `recover_signer`.
type Verifier = EthSignedMessage;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Record {
    pub patient: Address,
    pub record_type: u32,
    pub metadata: String,
    pub meta_hash: BytesN<32>,
    pub sig_count: u32,
    /// Patient's trust-ledger total as of the latest attestation.
    pub trust_score: u64,
    pub ipfs_uri: String,
    pub timestamp: u64,
}

#[contract]
pub struct RecordsContract;

#[contractimpl]
impl RecordsContract {
    /// Bootstrap the registry with its administrator and hub.
    pub fn initialize(env: Env, admin: Address, hub: Address) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }

        env.storage().instance().set(&ADMIN, &admin);
        env.storage().instance().set(&INITIALIZED, &true);
        env.storage().instance().set(&collaborators::HUB, &hub);
        ttl::extend_instance(&env);

        events::publish_initialized(&env, admin, hub);

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

    pub fn get_hub(env: Env) -> Result<Address, ContractError> {
        collaborators::hub(&env)
    }

    /// Re-point the registry at another hub.
    pub fn set_hub(env: Env, caller: Address, hub: Address) -> Result<(), ContractError> {
        caller.require_auth();
        Self::require_admin(&env, &caller)?;

        let previous = collaborators::hub(&env)?;
        env.storage().instance().set(&collaborators::HUB, &hub);
        ttl::extend_instance(&env);

        events::publish_hub_changed(&env, previous, hub);
        Ok(())
    }

    // ── Registration ────────────────────────────────────────────────────────

    /// Register a record owned by the calling patient.
    pub fn add_record(
        env: Env,
        patient: Address,
        file_hash: BytesN<32>,
        record_type: u32,
        metadata: String,
        ipfs_uri: String,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        pause::require_not_paused(&env)?;
        patient.require_auth();

        Self::check_registration(&env, &file_hash, record_type, &metadata, &ipfs_uri)?;
        rbac::authorize(&env, Role::Patient, &patient)?;

        Self::insert_record(&env, patient, file_hash, record_type, metadata, ipfs_uri);
        Ok(())
    }

    /// Register a record for `patient` and attest it as `doctor` in the same
    /// call.
    pub fn add_record_by_doctor(
        env: Env,
        doctor: Address,
        patient: Address,
        file_hash: BytesN<32>,
        record_type: u32,
        metadata: String,
        ipfs_uri: String,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        pause::require_not_paused(&env)?;
        doctor.require_auth();

        Self::check_registration(&env, &file_hash, record_type, &metadata, &ipfs_uri)?;
        rbac::authorize(&env, Role::Doctor, &doctor)?;
        rbac::authorize(&env, Role::Patient, &patient)?;

        Self::insert_record(
            &env,
            patient,
            file_hash.clone(),
            record_type,
            metadata,
            ipfs_uri,
        );
        Self::attest(&env, &file_hash, &doctor)
    }

    /// Register a record owned by the calling patient and pay them the
    /// distributor's reward in `token`. Fails as a whole, leaving no record,
    /// when the reward cannot be paid.
    pub fn add_record_with_reward(
        env: Env,
        patient: Address,
        file_hash: BytesN<32>,
        record_type: u32,
        metadata: String,
        ipfs_uri: String,
        token: Address,
    ) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        pause::require_not_paused(&env)?;
        patient.require_auth();

        Self::check_registration(&env, &file_hash, record_type, &metadata, &ipfs_uri)?;
        rbac::authorize(&env, Role::Patient, &patient)?;

        Self::insert_record(
            &env,
            patient.clone(),
            file_hash,
            record_type,
            metadata,
            ipfs_uri,
        );

        let distributor = collaborators::rewards(&env)?;
        let amount = match distributor.try_reward(
            &env.current_contract_address(),
            &patient,
            &token,
        ) {
            Ok(Ok(amount)) => amount,
            _ => return Err(ContractError::RewardFailed),
        };

        events::publish_reward(&env, patient, token, amount);
        Ok(amount)
    }

    // ── Attestation ─────────────────────────────────────────────────────────

    /// Attest a record as the calling doctor.
    pub fn add_signature(
        env: Env,
        doctor: Address,
        file_hash: BytesN<32>,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        pause::require_not_paused(&env)?;
        doctor.require_auth();

        Self::attest(&env, &file_hash, &doctor)
    }

    /// Attest a record on behalf of the doctor whose bound signer key
    /// personally signed `file_hash`. Anyone may relay the signature.
    ///
    /// Returns the attesting doctor.
    pub fn add_signature_with_sig(
        env: Env,
        file_hash: BytesN<32>,
        r: BytesN<32>,
        s: BytesN<32>,
        recovery_id: u32,
    ) -> Result<Address, ContractError> {
        Self::require_initialized(&env)?;
        pause::require_not_paused(&env)?;

        // A key that cannot be recovered is, in particular, not a bound doctor.
        let signer = Verifier::recover(&env, &file_hash, &r, &s, recovery_id)?
            .ok_or(ContractError::NotDoctor)?;
        let doctor = rbac::identity_of_signer(&env, &signer)?;

        Self::attest(&env, &file_hash, &doctor)?;
        Ok(doctor)
    }

    // ── Pause ───────────────────────────────────────────────────────────────

    pub fn pause(env: Env, caller: Address) -> Result<(), ContractError> {
        caller.require_auth();
        Self::require_admin(&env, &caller)?;
        pause::pause(&env, &caller)
    }

    pub fn unpause(env: Env, caller: Address) -> Result<(), ContractError> {
        caller.require_auth();
        Self::require_admin(&env, &caller)?;
        pause::unpause(&env, &caller)
    }

    pub fn is_paused(env: Env) -> bool {
        pause::is_paused(&env)
    }

    // ── Queries ─────────────────────────────────────────────────────────────

    pub fn get_record(env: Env, file_hash: BytesN<32>) -> Result<Record, ContractError> {
        store::load_record(&env, &file_hash).ok_or(ContractError::RecordNotFound)
    }

    pub fn patient_of(env: Env, file_hash: BytesN<32>) -> Result<Address, ContractError> {
        Self::get_record(env, file_hash).map(|record| record.patient)
    }

    pub fn has_signed(env: Env, file_hash: BytesN<32>, doctor: Address) -> bool {
        store::has_signed(&env, &file_hash, &doctor)
    }

    pub fn sig_count(env: Env, file_hash: BytesN<32>) -> Result<u32, ContractError> {
        Self::get_record(env, file_hash).map(|record| record.sig_count)
    }

    pub fn record_for_uri(env: Env, ipfs_uri: String) -> Option<BytesN<32>> {
        store::record_for_uri(&env, &ipfs_uri)
    }

    pub fn record_count(env: Env) -> u64 {
        store::record_count(&env)
    }

    /// Address of the key that personally signed `digest`. Pure;
    /// `InvalidSignature` when no key recovers from the signature.
    pub fn recover_signer(
        env: Env,
        digest: BytesN<32>,
        r: BytesN<32>,
        s: BytesN<32>,
        recovery_id: u32,
    ) -> Result<BytesN<20>, ContractError> {
        Verifier::recover(&env, &digest, &r, &s, recovery_id)?
            .ok_or(ContractError::InvalidSignature)
    }

    pub fn version() -> u32 {
        1
    }

    // ── Internals ───────────────────────────────────────────────────────────

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

    /// Input validation followed by the uniqueness checks, so a duplicate is
    /// reported as a conflict whoever the caller is.
    fn check_registration(
        env: &Env,
        file_hash: &BytesN<32>,
        record_type: u32,
        metadata: &String,
        ipfs_uri: &String,
    ) -> Result<(), ContractError> {
        validation::validate_registration(file_hash, record_type, metadata, ipfs_uri)?;
        if store::has_record(env, file_hash) {
            return Err(ContractError::RecordExists);
        }
        if store::record_for_uri(env, ipfs_uri).is_some() {
            return Err(ContractError::IpfsUriTaken);
        }
        Ok(())
    }

    fn insert_record(
        env: &Env,
        patient: Address,
        file_hash: BytesN<32>,
        record_type: u32,
        metadata: String,
        ipfs_uri: String,
    ) {
        let record = Record {
            patient: patient.clone(),
            record_type,
            metadata: metadata.clone(),
            meta_hash: Self::meta_hash(env, &metadata),
            sig_count: 0,
            trust_score: 0,
            ipfs_uri: ipfs_uri.clone(),
            timestamp: env.ledger().timestamp(),
        };

        store::save_record(env, &file_hash, &record);
        store::index_uri(env, &ipfs_uri, &file_hash);
        store::increment_record_count(env);
        ttl::extend_instance(env);

        events::publish_record_added(env, file_hash, patient, record_type, metadata, ipfs_uri);
    }

    fn attest(env: &Env, file_hash: &BytesN<32>, doctor: &Address) -> Result<(), ContractError> {
        let mut record = store::load_record(env, file_hash).ok_or(ContractError::RecordNotFound)?;
        rbac::authorize(env, Role::Doctor, doctor)?;
        if store::has_signed(env, file_hash, doctor) {
            return Err(ContractError::AlreadySigned);
        }

        store::mark_signed(env, file_hash, doctor);
        record.sig_count = record.sig_count.saturating_add(1);

        if let Some(ledger) = collaborators::trust(env)? {
            record.trust_score = match ledger.try_add_points(
                &env.current_contract_address(),
                &record.patient,
                &1,
            ) {
                Ok(Ok(total)) => total,
                _ => return Err(ContractError::TrustUpdateFailed),
            };
        }

        store::save_record(env, file_hash, &record);
        events::publish_signature_added(env, file_hash.clone(), doctor.clone(), record.sig_count);
        Ok(())
    }

    fn meta_hash(env: &Env, metadata: &String) -> BytesN<32> {
        let mut buf = [0u8; validation::MAX_METADATA_LEN as usize];
        let len = metadata.len() as usize;
        metadata.copy_into_slice(&mut buf[..len]);
        env.crypto()
            .keccak256(&Bytes::from_slice(env, &buf[..len]))
            .into()
    }
}

#[cfg(test)]
mod test_signature;
