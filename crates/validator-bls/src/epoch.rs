use crate::{EpochEntropy, PublicKeyCache, Result, SerializedPublicKey};

use bls_crypto::{epoch::EpochBlock, PublicKey};
use log::trace;

/// The bytes validators sign when committing to the next epoch's validator set
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EpochSnarkData {
    /// Hashed with the CRH
    pub message: Vec<u8>,
    /// Passed straight to the XOF. Empty for the plain encoding.
    pub extra_data: Vec<u8>,
}

/// Encodes the epoch index, the maximum number of non signers and the new validator set
pub fn encode_epoch_snark_data(
    cache: &PublicKeyCache,
    new_validator_set: &[SerializedPublicKey],
    maximum_non_signers: u32,
    epoch_index: u16,
) -> Result<EpochSnarkData> {
    let public_keys = deserialize_validator_set(cache, new_validator_set)?;
    let epoch_block = EpochBlock::new(
        epoch_index,
        0,    // The round number is not used prior to CIP22
        None, // The epoch entropy is not used prior to CIP22
        None, // The parent entropy is not used prior to CIP22
        maximum_non_signers,
        public_keys.len(),
        public_keys,
    );
    let message = epoch_block.encode_to_bytes()?;
    trace!(
        "encoded epoch {} with {} validators",
        epoch_index,
        new_validator_set.len()
    );

    Ok(EpochSnarkData {
        message,
        extra_data: vec![],
    })
}

/// Encodes an epoch in the CIP22 format: the validator set padded to `maximum_validators`
/// keys together with the entropy of the block and its parent, plus the index and the
/// consensus round as extra data
#[allow(clippy::too_many_arguments)]
pub fn encode_epoch_snark_data_cip22(
    cache: &PublicKeyCache,
    new_validator_set: &[SerializedPublicKey],
    maximum_non_signers: u32,
    maximum_validators: u32,
    epoch_index: u16,
    round: u8,
    block_hash: &EpochEntropy,
    parent_hash: &EpochEntropy,
) -> Result<EpochSnarkData> {
    let public_keys = deserialize_validator_set(cache, new_validator_set)?;
    let epoch_block = EpochBlock::new(
        epoch_index,
        round,
        Some(*block_hash.as_bytes()),
        Some(*parent_hash.as_bytes()),
        maximum_non_signers,
        maximum_validators as usize,
        public_keys,
    );
    let (message, extra_data) = epoch_block.encode_inner_to_bytes_cip22()?;
    trace!(
        "encoded epoch {} round {} with {} of {} validators",
        epoch_index,
        round,
        new_validator_set.len(),
        maximum_validators
    );

    Ok(EpochSnarkData {
        message,
        extra_data,
    })
}

fn deserialize_validator_set(
    cache: &PublicKeyCache,
    validator_set: &[SerializedPublicKey],
) -> Result<Vec<PublicKey>> {
    validator_set
        .iter()
        .enumerate()
        .map(|(index, key)| {
            cache
                .get_or_deserialize(key)
                .map(|public_key| (*public_key).clone())
                .map_err(|err| err.at_index(index))
        })
        .collect()
}
