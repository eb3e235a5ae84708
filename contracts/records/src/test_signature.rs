#![allow(clippy::unwrap_used, clippy::expect_used)]

extern crate std;

use k256::{ecdsa::SigningKey, elliptic_curve::sec1::ToEncodedPoint};
use soroban_sdk::{Bytes, BytesN, Env, String};

use crate::{
    test::{file_hash, setup, uri},
    ContractError, EthSignedMessage,
};

struct Signed {
    r: BytesN<32>,
    s: BytesN<32>,
    recovery_id: u32,
}

fn signing_key(seed: u8) -> SigningKey {
    SigningKey::from_slice(&[seed; 32]).unwrap()
}

/// Wallet-style personal signature over `digest`.
fn sign(env: &Env, key: &SigningKey, digest: &BytesN<32>) -> Signed {
    let prehash = EthSignedMessage::message_hash(env, digest).to_array();
    let (signature, recovery_id) = key.sign_prehash_recoverable(&prehash).unwrap();
    let bytes = signature.to_bytes();
    let mut r = [0u8; 32];
    let mut s = [0u8; 32];
    r.copy_from_slice(&bytes[..32]);
    s.copy_from_slice(&bytes[32..]);
    Signed {
        r: BytesN::from_array(env, &r),
        s: BytesN::from_array(env, &s),
        recovery_id: recovery_id.to_byte() as u32,
    }
}

/// keccak256 of the uncompressed public key, last 20 bytes.
fn eth_address(env: &Env, key: &SigningKey) -> BytesN<20> {
    let point = key.verifying_key().to_encoded_point(false);
    let hash = env
        .crypto()
        .keccak256(&Bytes::from_slice(env, &point.as_bytes()[1..]))
        .to_array();
    let mut address = [0u8; 20];
    address.copy_from_slice(&hash[12..]);
    BytesN::from_array(env, &address)
}

#[test]
fn test_message_hash_uses_personal_prefix() {
    let env = Env::default();
    let digest = file_hash(&env, 0xab);
    let mut expected = Bytes::from_slice(&env, b"\x19Ethereum Signed Message:\n32");
    expected.extend_from_array(&[0xab; 32]);
    let expected: BytesN<32> = env.crypto().keccak256(&expected).into();
    assert_eq!(EthSignedMessage::message_hash(&env, &digest), expected);
}

#[test]
fn test_recover_signer_matches_reference_key() {
    let s = setup();
    let key = signing_key(7);
    let digest = file_hash(&s.env, 42);
    let sig = sign(&s.env, &key, &digest);

    assert_eq!(
        s.client
            .recover_signer(&digest, &sig.r, &sig.s, &sig.recovery_id),
        eth_address(&s.env, &key)
    );
    // Legacy 27/28 encoding recovers the same key.
    assert_eq!(
        s.client
            .recover_signer(&digest, &sig.r, &sig.s, &(sig.recovery_id + 27)),
        eth_address(&s.env, &key)
    );
}

#[test]
fn test_other_digest_recovers_other_address() {
    let s = setup();
    let key = signing_key(7);
    let sig = sign(&s.env, &key, &file_hash(&s.env, 42));

    let recovered = s.client.recover_signer(
        &file_hash(&s.env, 43),
        &sig.r,
        &sig.s,
        &sig.recovery_id,
    );
    assert_ne!(recovered, eth_address(&s.env, &key));
}

#[test]
fn test_malformed_signatures_rejected() {
    let s = setup();
    let digest = file_hash(&s.env, 1);
    let zero = file_hash(&s.env, 0);
    let one = file_hash(&s.env, 1);

    assert_eq!(
        s.client.try_recover_signer(&digest, &zero, &one, &0),
        Err(Ok(ContractError::InvalidSignature))
    );
    assert_eq!(
        s.client.try_recover_signer(&digest, &one, &zero, &0),
        Err(Ok(ContractError::InvalidSignature))
    );
    assert_eq!(
        s.client.try_recover_signer(&digest, &one, &one, &2),
        Err(Ok(ContractError::InvalidSignature))
    );
}

#[test]
fn test_delegated_attestation_by_bound_doctor() {
    let s = setup();
    let patient = s.patient();
    let doctor = s.doctor();
    let key = signing_key(9);
    s.roles.bind_signer(&doctor, &eth_address(&s.env, &key));

    let hash = file_hash(&s.env, 5);
    s.client.add_record(
        &patient,
        &hash,
        &1,
        &String::from_str(&s.env, ""),
        &uri(&s.env, "ipfs://a"),
    );

    let sig = sign(&s.env, &key, &hash);
    let attestor = s
        .client
        .add_signature_with_sig(&hash, &sig.r, &sig.s, &sig.recovery_id);
    assert_eq!(attestor, doctor);
    assert!(s.client.has_signed(&hash, &doctor));
    assert_eq!(s.client.sig_count(&hash), 1);

    // Replaying the same signature is a duplicate attestation.
    assert_eq!(
        s.client
            .try_add_signature_with_sig(&hash, &sig.r, &sig.s, &sig.recovery_id),
        Err(Ok(ContractError::AlreadySigned))
    );
    // So is a direct attestation by the same doctor.
    assert_eq!(
        s.client.try_add_signature(&doctor, &hash),
        Err(Ok(ContractError::AlreadySigned))
    );
}

#[test]
fn test_unbound_signer_is_not_a_doctor() {
    let s = setup();
    let patient = s.patient();
    let hash = file_hash(&s.env, 6);
    s.client.add_record(
        &patient,
        &hash,
        &1,
        &String::from_str(&s.env, ""),
        &uri(&s.env, "ipfs://a"),
    );

    let sig = sign(&s.env, &signing_key(11), &hash);
    assert_eq!(
        s.client
            .try_add_signature_with_sig(&hash, &sig.r, &sig.s, &sig.recovery_id),
        Err(Ok(ContractError::NotDoctor))
    );
    assert_eq!(s.client.sig_count(&hash), 0);
}

#[test]
fn test_signer_bound_to_demoted_doctor_rejected() {
    let s = setup();
    let patient = s.patient();
    let doctor = s.doctor();
    let key = signing_key(13);
    s.roles.bind_signer(&doctor, &eth_address(&s.env, &key));

    let hash = file_hash(&s.env, 7);
    s.client.add_record(
        &patient,
        &hash,
        &1,
        &String::from_str(&s.env, ""),
        &uri(&s.env, "ipfs://a"),
    );

    s.roles.unregister(&s.admin, &doctor);
    let sig = sign(&s.env, &key, &hash);
    assert_eq!(
        s.client
            .try_add_signature_with_sig(&hash, &sig.r, &sig.s, &sig.recovery_id),
        Err(Ok(ContractError::NotDoctor))
    );
}

/// Curve order of secp256k1.
const CURVE_ORDER: [u8; 32] = [
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
    0xfe, 0xba, 0xae, 0xdc, 0xe6, 0xaf, 0x48, 0xa0, 0x3b, 0xbf, 0xd2, 0x5e, 0x8c, 0xd0, 0x36,
    0x41, 0x41,
];

/// n - s, turning a low-`s` signature into its high-`s` twin.
fn negate_scalar(s: &[u8; 32]) -> [u8; 32] {
    let mut out = [0u8; 32];
    let mut borrow = 0i16;
    for i in (0..32).rev() {
        let mut diff = CURVE_ORDER[i] as i16 - s[i] as i16 - borrow;
        borrow = if diff < 0 {
            diff += 256;
            1
        } else {
            0
        };
        out[i] = diff as u8;
    }
    out
}

#[test]
fn test_garbage_signatures_are_not_doctors() {
    let s = setup();
    let patient = s.patient();
    let doctor = s.doctor();
    let key = signing_key(17);
    s.roles.bind_signer(&doctor, &eth_address(&s.env, &key));

    let hash = file_hash(&s.env, 8);
    s.client.add_record(
        &patient,
        &hash,
        &1,
        &String::from_str(&s.env, ""),
        &uri(&s.env, "ipfs://a"),
    );

    // Arbitrary non-zero triples: about half have an `r` off the curve or a
    // high `s`, the rest recover to keys nobody bound.
    for seed in 1u8..=24 {
        let r = BytesN::from_array(&s.env, &[seed; 32]);
        let sv = BytesN::from_array(&s.env, &[seed.wrapping_mul(7) | 1; 32]);
        assert_eq!(
            s.client
                .try_add_signature_with_sig(&hash, &r, &sv, &(seed as u32 % 2)),
            Err(Ok(ContractError::NotDoctor))
        );
    }

    // Scalars at or above the curve order.
    let max = BytesN::from_array(&s.env, &[0xff; 32]);
    let one = file_hash(&s.env, 1);
    assert_eq!(
        s.client.try_add_signature_with_sig(&hash, &max, &one, &0),
        Err(Ok(ContractError::NotDoctor))
    );
    assert_eq!(
        s.client.try_add_signature_with_sig(&hash, &one, &max, &1),
        Err(Ok(ContractError::NotDoctor))
    );

    // The high-`s` twin of the bound doctor's genuine signature.
    let sig = sign(&s.env, &key, &hash);
    let high_s = BytesN::from_array(&s.env, &negate_scalar(&sig.s.to_array()));
    assert_eq!(
        s.client
            .try_add_signature_with_sig(&hash, &sig.r, &high_s, &sig.recovery_id),
        Err(Ok(ContractError::NotDoctor))
    );

    assert_eq!(s.client.sig_count(&hash), 0);
    assert!(!s.client.has_signed(&hash, &doctor));

    // The genuine signature still goes through afterwards.
    s.client
        .add_signature_with_sig(&hash, &sig.r, &sig.s, &sig.recovery_id);
    assert_eq!(s.client.sig_count(&hash), 1);
}

#[test]
fn test_unrecoverable_signature_query_is_invalid() {
    let s = setup();
    let digest = file_hash(&s.env, 3);
    let max = BytesN::from_array(&s.env, &[0xff; 32]);
    let one = file_hash(&s.env, 1);

    assert_eq!(
        s.client.try_recover_signer(&digest, &max, &one, &0),
        Err(Ok(ContractError::InvalidSignature))
    );

    let key = signing_key(19);
    let sig = sign(&s.env, &key, &digest);
    let high_s = BytesN::from_array(&s.env, &negate_scalar(&sig.s.to_array()));
    let res = s
        .client
        .try_recover_signer(&digest, &sig.r, &high_s, &sig.recovery_id);
    assert_ne!(res, Ok(Ok(eth_address(&s.env, &key))));

    // Garbage never aborts the query.
    for seed in 1u8..=16 {
        let r = BytesN::from_array(&s.env, &[seed; 32]);
        let sv = BytesN::from_array(&s.env, &[seed.wrapping_mul(13) | 1; 32]);
        match s.client.try_recover_signer(&digest, &r, &sv, &(seed as u32 % 2)) {
            Ok(Ok(address)) => assert_ne!(address, eth_address(&s.env, &key)),
            other => assert_eq!(other, Err(Ok(ContractError::InvalidSignature))),
        }
    }
}
