//! Persistent layout of the registry.
//!
//! * `Record(file_hash)`          – the record itself.
//! * `UriIndex(ipfs_uri)`         – reverse index, one file hash per URI.
//! * `Signed(file_hash, doctor)`  – attestation marker.
//!
//! The record counter lives in instance storage.

use common::ttl;
use soroban_sdk::{contracttype, symbol_short, Address, BytesN, Env, String, Symbol};

use crate::Record;

const RECORD_COUNT: Symbol = symbol_short!("REC_CTR");

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    Record(BytesN<32>),
    UriIndex(String),
    Signed(BytesN<32>, Address),
}

pub fn has_record(env: &Env, file_hash: &BytesN<32>) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::Record(file_hash.clone()))
}

pub fn load_record(env: &Env, file_hash: &BytesN<32>) -> Option<Record> {
    env.storage()
        .persistent()
        .get(&DataKey::Record(file_hash.clone()))
}

pub fn save_record(env: &Env, file_hash: &BytesN<32>, record: &Record) {
    let key = DataKey::Record(file_hash.clone());
    env.storage().persistent().set(&key, record);
    ttl::extend_persistent(env, &key);
}

pub fn record_for_uri(env: &Env, ipfs_uri: &String) -> Option<BytesN<32>> {
    env.storage()
        .persistent()
        .get(&DataKey::UriIndex(ipfs_uri.clone()))
}

pub fn index_uri(env: &Env, ipfs_uri: &String, file_hash: &BytesN<32>) {
    let key = DataKey::UriIndex(ipfs_uri.clone());
    env.storage().persistent().set(&key, file_hash);
    ttl::extend_persistent(env, &key);
}

pub fn has_signed(env: &Env, file_hash: &BytesN<32>, doctor: &Address) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::Signed(file_hash.clone(), doctor.clone()))
}

pub fn mark_signed(env: &Env, file_hash: &BytesN<32>, doctor: &Address) {
    let key = DataKey::Signed(file_hash.clone(), doctor.clone());
    env.storage().persistent().set(&key, &true);
    ttl::extend_persistent(env, &key);
}

pub fn record_count(env: &Env) -> u64 {
    env.storage().instance().get(&RECORD_COUNT).unwrap_or(0)
}

pub fn increment_record_count(env: &Env) -> u64 {
    let count = record_count(env).saturating_add(1);
    env.storage().instance().set(&RECORD_COUNT, &count);
    count
}
