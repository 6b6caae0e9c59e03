mod encoding;
pub use encoding::{
    bits_to_bytes, bytes_to_bits, encode_public_key, encode_u16, encode_u32, encode_u8, FQ_BITS,
    PUBKEY_BITS,
};

use crate::{
    hash_to_curve::try_and_increment_cip22::COMPOSITE_HASH_TO_G1_CIP22,
    hashers::composite::MAX_CRH_INPUT_BYTES, BLSError, HashToCurve, PublicKey, SIG_DOMAIN,
};

use ark_bls12_377::G1Projective;
use ark_serialize::SerializationError;
use thiserror::Error;

/// Length in bytes of the block entropy committed to by CIP22 epoch blocks
pub const EPOCH_ENTROPY_BYTES: usize = 16;

/// Length in bits of the block entropy committed to by CIP22 epoch blocks
pub const EPOCH_ENTROPY_BITS: usize = EPOCH_ENTROPY_BYTES * 8;

/// Bits of a CIP22 message preceding the validator set
const CIP22_HEADER_BITS: usize = 32 + 32 + 2 * EPOCH_ENTROPY_BITS;

/// Largest validator set a CIP22 message can be padded to while still fitting the CRH input
pub const MAX_VALIDATORS_CIP22: usize =
    (MAX_CRH_INPUT_BYTES * 8 - CIP22_HEADER_BITS) / PUBKEY_BITS;

#[derive(Debug, Error)]
/// Union type for data serialization errors
pub enum EncodingError {
    #[error("serialization error: {0}")]
    Serialization(#[from] SerializationError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("BLS error: {0}")]
    Bls(#[from] BLSError),
    #[error("{count} validators exceed the maximum of {maximum}")]
    TooManyValidators { count: usize, maximum: usize },
    #[error("padding to {maximum} validators exceeds the limit of {limit}")]
    MaximumValidatorsTooLarge { maximum: usize, limit: usize },
}

/// Metadata about the next epoch, as committed to by the validators of the current one
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EpochBlock {
    /// The epoch number
    pub index: u16,
    /// The consensus round in which the block was agreed on
    pub round: u8,
    /// Entropy of the epoch block
    pub epoch_entropy: Option<[u8; EPOCH_ENTROPY_BYTES]>,
    /// Entropy of the parent of the epoch block
    pub parent_entropy: Option<[u8; EPOCH_ENTROPY_BYTES]>,
    /// The maximum allowed number of signers that may be absent
    pub maximum_non_signers: u32,
    /// The size the validator set is padded to
    pub maximum_validators: usize,
    /// The public keys of the new validators
    pub new_public_keys: Vec<PublicKey>,
}

impl EpochBlock {
    /// Creates a new epoch block
    pub fn new(
        index: u16,
        round: u8,
        epoch_entropy: Option<[u8; EPOCH_ENTROPY_BYTES]>,
        parent_entropy: Option<[u8; EPOCH_ENTROPY_BYTES]>,
        maximum_non_signers: u32,
        maximum_validators: usize,
        new_public_keys: Vec<PublicKey>,
    ) -> Self {
        Self {
            index,
            round,
            epoch_entropy,
            parent_entropy,
            maximum_non_signers,
            maximum_validators,
            new_public_keys,
        }
    }

    /// Encodes the block to LE bits: index, maximum non signers, then every public key
    pub fn encode_to_bits(&self) -> Result<Vec<bool>, EncodingError> {
        let mut epoch_bits = vec![];
        epoch_bits.extend_from_slice(&encode_u16(self.index));
        epoch_bits.extend_from_slice(&encode_u32(self.maximum_non_signers));
        for added_public_key in &self.new_public_keys {
            epoch_bits.extend_from_slice(&encode_public_key(added_public_key)?);
        }
        Ok(epoch_bits)
    }

    /// Encodes the block to LE bytes
    pub fn encode_to_bytes(&self) -> Result<Vec<u8>, EncodingError> {
        Ok(bits_to_bytes(&self.encode_to_bits()?))
    }

    /// Encodes the part of a CIP22 block which is compressed by the CRH. The validator set
    /// is padded with zero bits up to `maximum_validators` keys, so that every epoch has the
    /// same length.
    pub fn encode_inner_to_bits_cip22(&self) -> Result<Vec<bool>, EncodingError> {
        if self.maximum_validators > MAX_VALIDATORS_CIP22 {
            return Err(EncodingError::MaximumValidatorsTooLarge {
                maximum: self.maximum_validators,
                limit: MAX_VALIDATORS_CIP22,
            });
        }
        if self.new_public_keys.len() > self.maximum_validators {
            return Err(EncodingError::TooManyValidators {
                count: self.new_public_keys.len(),
                maximum: self.maximum_validators,
            });
        }

        let mut epoch_bits =
            Vec::with_capacity(CIP22_HEADER_BITS + self.maximum_validators * PUBKEY_BITS);
        epoch_bits.extend_from_slice(&encode_u32(self.maximum_non_signers));
        epoch_bits.extend_from_slice(&encode_u32(self.maximum_validators as u32));
        epoch_bits.extend_from_slice(&entropy_to_bits(&self.epoch_entropy));
        epoch_bits.extend_from_slice(&entropy_to_bits(&self.parent_entropy));
        for added_public_key in &self.new_public_keys {
            epoch_bits.extend_from_slice(&encode_public_key(added_public_key)?);
        }
        let padding = self.maximum_validators - self.new_public_keys.len();
        epoch_bits.resize(epoch_bits.len() + padding * PUBKEY_BITS, false);
        Ok(epoch_bits)
    }

    /// Encodes the part of a CIP22 block which goes straight to the XOF: index and round
    pub fn encode_extra_data_to_bits_cip22(&self) -> Vec<bool> {
        let mut epoch_bits = encode_u16(self.index);
        epoch_bits.extend_from_slice(&encode_u8(self.round));
        epoch_bits
    }

    /// Encodes a CIP22 block to its `(message, extra_data)` pair of LE bytes
    pub fn encode_inner_to_bytes_cip22(&self) -> Result<(Vec<u8>, Vec<u8>), EncodingError> {
        Ok((
            bits_to_bytes(&self.encode_inner_to_bits_cip22()?),
            bits_to_bytes(&self.encode_extra_data_to_bits_cip22()),
        ))
    }

    /// Encodes the block and hashes it to BLS12-377's G1 with the CIP22 composite hasher,
    /// using `SIG_DOMAIN` as a domain separator
    pub fn hash_to_g1_cip22(&self) -> Result<G1Projective, EncodingError> {
        let (message, extra_data) = self.encode_inner_to_bytes_cip22()?;
        Ok(COMPOSITE_HASH_TO_G1_CIP22.hash(SIG_DOMAIN, &message, &extra_data)?)
    }
}

/// Missing entropy is encoded as zeros
fn entropy_to_bits(entropy: &Option<[u8; EPOCH_ENTROPY_BYTES]>) -> Vec<bool> {
    let entropy = entropy.unwrap_or([0u8; EPOCH_ENTROPY_BYTES]);
    let mut bits = bytes_to_bits(&entropy, EPOCH_ENTROPY_BITS);
    bits.reverse();
    bits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        test_helpers::{keygen_mul, seeded_rng},
        PrivateKey,
    };
    use ark_ec::ProjectiveCurve;
    use ark_ff::PrimeField;
    use rand::Rng;

    fn block(num_keys: usize, maximum_validators: usize, round: u8) -> EpochBlock {
        let rng = &mut seeded_rng();
        let public_keys = keygen_mul(num_keys)
            .iter()
            .map(PrivateKey::to_public)
            .collect();
        EpochBlock::new(
            7,
            round,
            Some(rng.gen()),
            Some(rng.gen()),
            2,
            maximum_validators,
            public_keys,
        )
    }

    #[test]
    fn plain_encoding_length() {
        let block = block(4, 4, 0);
        let bits = block.encode_to_bits().unwrap();
        assert_eq!(bits.len(), 16 + 32 + 4 * PUBKEY_BITS);
        let bytes = block.encode_to_bytes().unwrap();
        assert_eq!(bytes.len(), (bits.len() + 7) / 8);
    }

    #[test]
    fn cip22_pads_to_maximum_validators() {
        let block = block(3, 5, 0);
        let bits = block.encode_inner_to_bits_cip22().unwrap();
        assert_eq!(bits.len(), 32 + 32 + 2 * EPOCH_ENTROPY_BITS + 5 * PUBKEY_BITS);
        assert!(bits[bits.len() - 2 * PUBKEY_BITS..].iter().all(|b| !*b));
    }

    #[test]
    fn cip22_extra_data() {
        let (_, extra_data) = block(1, 1, 0).encode_inner_to_bytes_cip22().unwrap();
        assert_eq!(extra_data, vec![0x00, 0x00, 0xe0]);
        let (_, extra_data) = block(1, 1, 1).encode_inner_to_bytes_cip22().unwrap();
        assert_eq!(extra_data, vec![0x80, 0x00, 0xe0]);
    }

    #[test]
    fn cip22_rejects_too_many_validators() {
        let err = block(3, 2, 0).encode_inner_to_bytes_cip22().unwrap_err();
        assert!(matches!(
            err,
            EncodingError::TooManyValidators {
                count: 3,
                maximum: 2
            }
        ));
    }

    #[test]
    fn cip22_bounds_maximum_validators_by_the_crh_input() {
        let (message, _) = block(1, MAX_VALIDATORS_CIP22, 0)
            .encode_inner_to_bytes_cip22()
            .unwrap();
        assert!(message.len() <= MAX_CRH_INPUT_BYTES);

        for maximum in [MAX_VALIDATORS_CIP22 + 1, u32::MAX as usize].iter() {
            let err = block(0, *maximum, 0).encode_inner_to_bits_cip22().unwrap_err();
            assert!(matches!(
                err,
                EncodingError::MaximumValidatorsTooLarge { maximum: m, limit }
                    if m == *maximum && limit == MAX_VALIDATORS_CIP22
            ));
        }
    }

    #[test]
    fn cip22_entropy_is_committed() {
        let block = block(2, 2, 0);
        let (message, _) = block.encode_inner_to_bytes_cip22().unwrap();
        let mut other = block.clone();
        other.parent_entropy = None;
        let (other_message, _) = other.encode_inner_to_bytes_cip22().unwrap();
        assert_eq!(message.len(), other_message.len());
        assert_ne!(message, other_message);
    }

    #[test]
    fn signing_the_hash_matches_signing_the_encoding() {
        let block = block(2, 3, 1);
        let sk = &keygen_mul(1)[0];
        let (message, extra_data) = block.encode_inner_to_bytes_cip22().unwrap();
        let sig = sk
            .sign(&message, &extra_data, &*COMPOSITE_HASH_TO_G1_CIP22)
            .unwrap();
        let hash = block.hash_to_g1_cip22().unwrap();
        assert_eq!(*sig.as_ref(), hash.mul(sk.as_ref().into_repr()));
    }
}
