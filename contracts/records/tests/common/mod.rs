#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

extern crate std;

use ::common::Component;
use hub::{HubContract, HubContractClient};
use k256::{ecdsa::SigningKey, elliptic_curve::sec1::ToEncodedPoint};
use records::{EthSignedMessage, RecordsContract, RecordsContractClient};
use rewards::{RewardDistributorContract, RewardDistributorContractClient};
use roles::{RoleRegistryContract, RoleRegistryContractClient};
use soroban_sdk::{
    testutils::{Address as _, Events},
    token::{Client as TokenClient, StellarAssetClient},
    Address, Bytes, BytesN, Env, String, Val, Vec,
};
use trust::{TrustLedgerContract, TrustLedgerContractClient};

pub const REWARD_AMOUNT: i128 = 10;

/// The whole system: hub, role registry, reward distributor, trust ledger
/// and record registry, all wired through the hub.
pub struct TestContext {
    pub env: Env,
    pub admin: Address,
    pub hub: HubContractClient<'static>,
    pub roles: RoleRegistryContractClient<'static>,
    pub rewards: RewardDistributorContractClient<'static>,
    pub trust: TrustLedgerContractClient<'static>,
    pub records: RecordsContractClient<'static>,
    pub token: Address,
}

/// Creates a mocked Soroban environment and deploys every contract.
/// The distributor starts with `funding` tokens.
pub fn setup_system(funding: i128) -> TestContext {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);

    let hub_id = env.register(HubContract, ());
    let hub = HubContractClient::new(&env, &hub_id);
    hub.initialize(&admin);

    let roles_id = env.register(RoleRegistryContract, ());
    let roles = RoleRegistryContractClient::new(&env, &roles_id);
    roles.initialize(&admin);

    let rewards_id = env.register(RewardDistributorContract, ());
    let rewards = RewardDistributorContractClient::new(&env, &rewards_id);
    rewards.initialize(&admin, &hub_id, &REWARD_AMOUNT);

    let trust_id = env.register(TrustLedgerContract, ());
    let trust = TrustLedgerContractClient::new(&env, &trust_id);
    trust.initialize(&admin, &hub_id);

    let records_id = env.register(RecordsContract, ());
    let records = RecordsContractClient::new(&env, &records_id);
    records.initialize(&admin, &hub_id);

    hub.set_component(&admin, &Component::Roles, &roles_id);
    hub.set_component(&admin, &Component::Rewards, &rewards_id);
    hub.set_component(&admin, &Component::Trust, &trust_id);
    hub.set_component(&admin, &Component::Records, &records_id);

    let token = env
        .register_stellar_asset_contract_v2(admin.clone())
        .address();
    if funding > 0 {
        StellarAssetClient::new(&env, &token).mint(&rewards_id, &funding);
    }

    TestContext {
        env,
        admin,
        hub,
        roles,
        rewards,
        trust,
        records,
        token,
    }
}

impl TestContext {
    pub fn patient(&self) -> Address {
        let patient = Address::generate(&self.env);
        self.roles.register_patient(&patient);
        patient
    }

    pub fn doctor(&self) -> Address {
        let doctor = Address::generate(&self.env);
        self.roles.register_doctor(&self.admin, &doctor);
        doctor
    }

    pub fn balance(&self, who: &Address) -> i128 {
        TokenClient::new(&self.env, &self.token).balance(who)
    }

    /// Events the record registry published in the last invocation.
    pub fn registry_events(&self) -> std::vec::Vec<(Vec<Val>, Val)> {
        self.env
            .events()
            .all()
            .iter()
            .filter(|(contract, _, _)| *contract == self.records.address)
            .map(|(_, topics, data)| (topics, data))
            .collect()
    }

    /// Registers a record for `patient` with an empty metadata string.
    pub fn register(&self, patient: &Address, seed: u8, ipfs_uri: &str) -> BytesN<32> {
        let hash = file_hash(&self.env, seed);
        self.records.add_record(
            patient,
            &hash,
            &1,
            &String::from_str(&self.env, ""),
            &String::from_str(&self.env, ipfs_uri),
        );
        hash
    }
}

pub fn file_hash(env: &Env, seed: u8) -> BytesN<32> {
    BytesN::from_array(env, &[seed; 32])
}

pub fn text(env: &Env, s: &str) -> String {
    String::from_str(env, s)
}

/// Reference wallet signer.
pub struct Wallet {
    key: SigningKey,
}

pub struct Signature {
    pub r: BytesN<32>,
    pub s: BytesN<32>,
    pub recovery_id: u32,
}

impl Wallet {
    pub fn new(seed: u8) -> Self {
        Self {
            key: SigningKey::from_slice(&[seed; 32]).unwrap(),
        }
    }

    pub fn address(&self, env: &Env) -> BytesN<20> {
        let point = self.key.verifying_key().to_encoded_point(false);
        let hash = env
            .crypto()
            .keccak256(&Bytes::from_slice(env, &point.as_bytes()[1..]))
            .to_array();
        let mut address = [0u8; 20];
        address.copy_from_slice(&hash[12..]);
        BytesN::from_array(env, &address)
    }

    /// Personal-message signature over `digest`.
    pub fn sign(&self, env: &Env, digest: &BytesN<32>) -> Signature {
        let prehash = EthSignedMessage::message_hash(env, digest).to_array();
        let (signature, recovery_id) = self.key.sign_prehash_recoverable(&prehash).unwrap();
        let bytes = signature.to_bytes();
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..]);
        Signature {
            r: BytesN::from_array(env, &r),
            s: BytesN::from_array(env, &s),
            recovery_id: recovery_id.to_byte() as u32,
        }
    }
}
