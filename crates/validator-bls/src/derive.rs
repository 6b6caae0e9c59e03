use crate::{
    Error, Result, SerializedPublicKey, MODULUS377, MODULUSMASK, PRIVATEKEYBYTES, PUBLICKEYBYTES,
};

use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use bls_crypto::PrivateKey;
use log::{debug, trace};
use num_bigint::BigUint;
use sha3::{Digest, Keccak256};

/// Prefix of every derivation candidate
const DERIVATION_PREFIX: &[u8] = b"ecdsatobls";

/// Deterministically derives a BLS12-377 private key from a raw secp256k1 private key, returned
/// as 32 little endian bytes.
///
/// Candidates are `Keccak256("ecdsatobls" || counter || ecdsa_private_key)` truncated to the bit
/// length of the scalar field, for counters from 0 to 255. The first candidate below the field
/// modulus is the key.
///
/// # Panics
///
/// If the scalar does not survive a round trip through its byte encodings. This is an internal
/// consistency failure, not an input error.
pub fn derive_bls_private_key(ecdsa_private_key: &[u8; PRIVATEKEYBYTES]) -> Result<Vec<u8>> {
    let modulus = BigUint::parse_bytes(MODULUS377.as_bytes(), 10).ok_or(Error::InvalidModulus)?;

    for counter in 0..=u8::MAX {
        let mut candidate = Keccak256::new()
            .chain(DERIVATION_PREFIX)
            .chain([counter])
            .chain(ecdsa_private_key)
            .finalize()
            .to_vec();
        candidate[0] &= MODULUSMASK;

        let scalar = BigUint::from_bytes_be(&candidate);
        if scalar >= modulus {
            trace!("derivation counter {} is above the modulus", counter);
            continue;
        }

        let be_bytes = scalar.to_bytes_be();
        let mut key_bytes = vec![0u8; candidate.len() - be_bytes.len()];
        key_bytes.extend_from_slice(&be_bytes);
        assert_eq!(
            candidate,
            key_bytes,
            "private key bytes should have been the same: {}, {}",
            hex::encode(&candidate),
            hex::encode(&key_bytes)
        );
        // the scalar is serialized little endian
        key_bytes.reverse();

        let private_key = PrivateKey::deserialize(&key_bytes[..])
            .map_err(Error::deserialize("private key"))?;
        let mut key_bytes_from_lib = Vec::with_capacity(PRIVATEKEYBYTES);
        private_key.serialize(&mut key_bytes_from_lib)?;
        assert_eq!(
            key_bytes, key_bytes_from_lib,
            "private key bytes from library should have been the same"
        );

        debug!("derived a BLS private key at counter {}", counter);
        return Ok(key_bytes_from_lib);
    }

    Err(Error::DerivationExhausted)
}

/// Returns the compressed public key of a 32 byte little endian private key
pub fn private_to_public(private_key: &[u8]) -> Result<SerializedPublicKey> {
    let private_key = parse_private_key(private_key)?;
    let mut pk_bytes = Vec::with_capacity(PUBLICKEYBYTES);
    private_key.to_public().serialize(&mut pk_bytes)?;
    SerializedPublicKey::from_bytes(&pk_bytes)
}

/// Deserializes a private key, which must be exactly `PRIVATEKEYBYTES` long
pub(crate) fn parse_private_key(private_key: &[u8]) -> Result<PrivateKey> {
    if private_key.len() != PRIVATEKEYBYTES {
        return Err(Error::WrongLength {
            ty: "PrivateKey",
            expected: PRIVATEKEYBYTES,
            actual: private_key.len(),
        });
    }
    PrivateKey::deserialize(private_key).map_err(Error::deserialize("private key"))
}
