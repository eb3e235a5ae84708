use soroban_sdk::contracttype;

/// Error categories used to classify every registry error.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ErrorCategory {
    /// Malformed or sentinel input: zero hash, empty URI, bad signature encoding
    Validation = 1,
    /// Duplicate file hash, duplicate URI, or repeated attestation
    Conflict = 2,
    /// Role mismatch or non-admin caller on an admin operation
    Authorization = 3,
    /// Attestation against a record that does not exist
    NotFound = 4,
    /// A required collaborator is unset or its sub-call failed
    Collaborator = 5,
    /// Lifecycle and pause state
    System = 6,
}

/// Error severity levels indicating the impact and urgency of errors
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ErrorSeverity {
    Low = 1,
    Medium = 2,
    High = 3,
    Critical = 4,
}

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    NotPatient = 4,
    NotDoctor = 5,
    InvalidFileHash = 6,
    InvalidIpfsUri = 7,
    InvalidRecordType = 8,
    InvalidMetadata = 9,
    InvalidSignature = 10,
    RecordExists = 11,
    IpfsUriTaken = 12,
    AlreadySigned = 13,
    RecordNotFound = 14,
    RolesNotConfigured = 15,
    RoleLookupFailed = 16,
    RewardsNotConfigured = 17,
    RewardFailed = 18,
    TrustUpdateFailed = 19,
    Paused = 20,
    NotPaused = 21,
}

impl ContractError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ContractError::InvalidFileHash
            | ContractError::InvalidIpfsUri
            | ContractError::InvalidRecordType
            | ContractError::InvalidMetadata
            | ContractError::InvalidSignature => ErrorCategory::Validation,
            ContractError::RecordExists
            | ContractError::IpfsUriTaken
            | ContractError::AlreadySigned => ErrorCategory::Conflict,
            ContractError::Unauthorized | ContractError::NotPatient | ContractError::NotDoctor => {
                ErrorCategory::Authorization
            }
            ContractError::RecordNotFound => ErrorCategory::NotFound,
            ContractError::RolesNotConfigured
            | ContractError::RoleLookupFailed
            | ContractError::RewardsNotConfigured
            | ContractError::RewardFailed
            | ContractError::TrustUpdateFailed => ErrorCategory::Collaborator,
            ContractError::NotInitialized
            | ContractError::AlreadyInitialized
            | ContractError::Paused
            | ContractError::NotPaused => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Validation | ErrorCategory::NotFound | ErrorCategory::Conflict => {
                ErrorSeverity::Low
            }
            ErrorCategory::Authorization => ErrorSeverity::Medium,
            ErrorCategory::Collaborator => ErrorSeverity::High,
            ErrorCategory::System => match self {
                ContractError::Paused | ContractError::NotInitialized => ErrorSeverity::Critical,
                _ => ErrorSeverity::Low,
            },
        }
    }

    /// Nothing is retried by the registry itself; this only tells callers
    /// whether resubmitting the same call unchanged can ever succeed.
    pub fn retryable(&self) -> bool {
        matches!(
            self,
            ContractError::Paused
                | ContractError::RewardFailed
                | ContractError::TrustUpdateFailed
                | ContractError::RoleLookupFailed
        )
    }

    pub fn message(&self) -> &'static str {
        match self {
            ContractError::NotInitialized => "Contract has not been initialized",
            ContractError::AlreadyInitialized => "Contract is already initialized",
            ContractError::Unauthorized => "Caller is not the administrator",
            ContractError::NotPatient => "Identity is not a registered patient",
            ContractError::NotDoctor => "Identity is not a registered doctor",
            ContractError::InvalidFileHash => "File hash must not be the zero hash",
            ContractError::InvalidIpfsUri => "IPFS URI is empty or too long",
            ContractError::InvalidRecordType => "Record type must be non-zero",
            ContractError::InvalidMetadata => "Metadata is too long",
            ContractError::InvalidSignature => "Malformed signature",
            ContractError::RecordExists => "A record with this file hash already exists",
            ContractError::IpfsUriTaken => "IPFS URI already points at another record",
            ContractError::AlreadySigned => "Doctor has already signed this record",
            ContractError::RecordNotFound => "Record not found",
            ContractError::RolesNotConfigured => "Role registry is not wired in the hub",
            ContractError::RoleLookupFailed => "Role registry lookup failed",
            ContractError::RewardsNotConfigured => "Reward distributor is not wired in the hub",
            ContractError::RewardFailed => "Reward distribution failed",
            ContractError::TrustUpdateFailed => "Trust-score ledger update failed",
            ContractError::Paused => "Contract operations are currently paused",
            ContractError::NotPaused => "Contract is not paused",
        }
    }
}
