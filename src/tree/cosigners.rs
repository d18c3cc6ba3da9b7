//! Cosigner metadata stored on PSBT inputs
//!
//! Each tree transaction input records the public keys of the parties that
//! jointly authorise spending it. Keys are kept as proprietary PSBT entries:
//!
//! - prefix: `arktree`
//! - subtype: `0x01`
//! - key: big-endian `u32` position of the cosigner
//! - value: 33-byte compressed public key
//!
//! The big-endian position keeps the map order equal to insertion order.

use crate::errors::CosignerError;
use bitcoin::psbt::{self, raw::ProprietaryKey};
use bitcoin::secp256k1::PublicKey;

pub const COSIGNER_PREFIX: &[u8] = b"arktree";
pub const COSIGNER_SUBTYPE: u8 = 0x01;

fn cosigner_key(position: u32) -> ProprietaryKey {
    ProprietaryKey {
        prefix: COSIGNER_PREFIX.to_vec(),
        subtype: COSIGNER_SUBTYPE,
        key: position.to_be_bytes().to_vec(),
    }
}

fn is_cosigner_entry(key: &ProprietaryKey) -> bool {
    key.prefix == COSIGNER_PREFIX && key.subtype == COSIGNER_SUBTYPE
}

/// Record `keys` as the cosigners of `input`, replacing any existing set
pub fn set_cosigner_keys(input: &mut psbt::Input, keys: &[PublicKey]) {
    input.proprietary.retain(|key, _| !is_cosigner_entry(key));
    for (position, key) in keys.iter().enumerate() {
        input
            .proprietary
            .insert(cosigner_key(position as u32), key.serialize().to_vec());
    }
}

/// Ordered cosigner keys of `input`
///
/// # Errors
/// - [`CosignerError::Missing`] when the input has no cosigner entries
/// - [`CosignerError::Malformed`] when an entry is not a valid public key
pub fn get_cosigner_keys(input: &psbt::Input) -> Result<Vec<PublicKey>, CosignerError> {
    let keys = input
        .proprietary
        .iter()
        .filter(|(key, _)| is_cosigner_entry(key))
        .enumerate()
        .map(|(position, (_, value))| {
            PublicKey::from_slice(value).map_err(|e| CosignerError::Malformed {
                position,
                reason: e.to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    if keys.is_empty() {
        return Err(CosignerError::Missing);
    }

    Ok(keys)
}
