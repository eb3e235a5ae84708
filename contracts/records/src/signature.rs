//! Signer recovery for delegated attestations.
//!
//! The registry only depends on [`SignatureVerifier`]; [`EthSignedMessage`]
//! reproduces the personal-message scheme of standard Ethereum wallets so
//! signatures produced off-chain by existing tooling verify unchanged.

use k256::{
    ecdsa::{RecoveryId, Signature, VerifyingKey},
    elliptic_curve::sec1::ToEncodedPoint,
};
use soroban_sdk::{Bytes, BytesN, Env};

use crate::ContractError;

/// Prefix wallets prepend to a 32-byte message before hashing.
pub const PERSONAL_MESSAGE_PREFIX: &[u8; 28] = b"\x19Ethereum Signed Message:\n32";

pub trait SignatureVerifier {
    /// Returns the 20-byte address of the key that signed `digest`, or
    /// `None` when the signature is well formed but no key recovers from it.
    fn recover(
        env: &Env,
        digest: &BytesN<32>,
        r: &BytesN<32>,
        s: &BytesN<32>,
        recovery_id: u32,
    ) -> Result<Option<BytesN<20>>, ContractError>;
}

pub struct EthSignedMessage;

impl EthSignedMessage {
    /// keccak256(prefix || digest)
    pub fn message_hash(env: &Env, digest: &BytesN<32>) -> BytesN<32> {
        let mut message = Bytes::from_slice(env, PERSONAL_MESSAGE_PREFIX);
        message.extend_from_array(&digest.to_array());
        env.crypto().keccak256(&message).into()
    }

    /// Accepts both raw (0, 1) and legacy (27, 28) recovery ids.
    pub fn normalize_recovery_id(recovery_id: u32) -> Result<u8, ContractError> {
        match recovery_id {
            0 | 1 => Ok(recovery_id as u8),
            27 | 28 => Ok((recovery_id - 27) as u8),
            _ => Err(ContractError::InvalidSignature),
        }
    }

    /// Last 20 bytes of keccak256 over the uncompressed public key without
    /// its 0x04 tag.
    pub fn address_of(env: &Env, public_key: &BytesN<65>) -> BytesN<20> {
        let key = Bytes::from(public_key.clone()).slice(1..65);
        let hash = env.crypto().keccak256(&key).to_array();
        let mut address = [0u8; 20];
        address.copy_from_slice(&hash[12..32]);
        BytesN::from_array(env, &address)
    }
}

impl SignatureVerifier for EthSignedMessage {
    /// Never traps: out-of-range scalars, high `s` and an `r` with no point
    /// on the curve all yield `None`.
    fn recover(
        env: &Env,
        digest: &BytesN<32>,
        r: &BytesN<32>,
        s: &BytesN<32>,
        recovery_id: u32,
    ) -> Result<Option<BytesN<20>>, ContractError> {
        let recovery_id = Self::normalize_recovery_id(recovery_id)?;
        let r = r.to_array();
        let s = s.to_array();
        if r == [0u8; 32] || s == [0u8; 32] {
            return Err(ContractError::InvalidSignature);
        }
        let recovery_id = RecoveryId::from_byte(recovery_id).ok_or(ContractError::InvalidSignature)?;

        let signature = match Signature::from_scalars(r, s) {
            Ok(signature) => signature,
            Err(_) => return Ok(None),
        };
        let prehash = Self::message_hash(env, digest).to_array();
        let key = match VerifyingKey::recover_from_prehash(&prehash, &signature, recovery_id) {
            Ok(key) => key,
            Err(_) => return Ok(None),
        };

        let point = key.to_encoded_point(false);
        let public_key: [u8; 65] = match point.as_bytes().try_into() {
            Ok(bytes) => bytes,
            Err(_) => return Ok(None),
        };
        Ok(Some(Self::address_of(env, &BytesN::from_array(env, &public_key))))
    }
}
