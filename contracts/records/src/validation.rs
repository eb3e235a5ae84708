use soroban_sdk::{BytesN, String};

use crate::ContractError;

pub const MAX_IPFS_URI_LEN: u32 = 256;
pub const MAX_METADATA_LEN: u32 = 1024;

/// The all-zero digest is reserved as the "no record" sentinel.
pub fn validate_file_hash(file_hash: &BytesN<32>) -> Result<(), ContractError> {
    if file_hash.to_array() == [0u8; 32] {
        return Err(ContractError::InvalidFileHash);
    }
    Ok(())
}

pub fn validate_ipfs_uri(ipfs_uri: &String) -> Result<(), ContractError> {
    if ipfs_uri.is_empty() || ipfs_uri.len() > MAX_IPFS_URI_LEN {
        return Err(ContractError::InvalidIpfsUri);
    }
    Ok(())
}

pub fn validate_record_type(record_type: u32) -> Result<(), ContractError> {
    if record_type == 0 {
        return Err(ContractError::InvalidRecordType);
    }
    Ok(())
}

/// Metadata is optional free-form text but bounded in size.
pub fn validate_metadata(metadata: &String) -> Result<(), ContractError> {
    if metadata.len() > MAX_METADATA_LEN {
        return Err(ContractError::InvalidMetadata);
    }
    Ok(())
}

pub fn validate_registration(
    file_hash: &BytesN<32>,
    record_type: u32,
    metadata: &String,
    ipfs_uri: &String,
) -> Result<(), ContractError> {
    validate_file_hash(file_hash)?;
    validate_record_type(record_type)?;
    validate_metadata(metadata)?;
    validate_ipfs_uri(ipfs_uri)
}
