//! # Validator BLS
//!
//! BLS identities for the validator set: deterministic derivation of a BLS12-377 key from
//! an ECDSA key, fixed-length encodings of public keys and signatures, a shared public key
//! cache, aggregate signature verification and the encoding of epoch SNARK data.
//!
//! All the curve arithmetic is delegated to [`bls_crypto`].

mod error;
pub use error::{Error, Result};

/// Fixed length byte encodings with hex text and JSON codecs
pub mod serialized;
pub use serialized::{EpochEntropy, SerializedPublicKey, SerializedSignature};

/// Derivation of BLS keys from ECDSA keys
pub mod derive;
pub use derive::{derive_bls_private_key, private_to_public};

/// Cache of deserialized public keys
pub mod cache;
pub use cache::PublicKeyCache;

/// Signing, aggregation and verification over serialized values
pub mod signatures;
pub use signatures::{
    aggregate_signatures, sign_message, sign_pop, uncompress_key, verify_aggregated_signature,
    verify_pop, verify_signature,
};

/// Epoch SNARK data encoding
pub mod epoch;
pub use epoch::{encode_epoch_snark_data, encode_epoch_snark_data_cip22, EpochSnarkData};

/// Length of a compressed public key (a G2 point)
pub const PUBLICKEYBYTES: usize = 96;

/// Length of a compressed signature (a G1 point)
pub const SIGNATUREBYTES: usize = 48;

/// Length of the block entropy committed to by CIP22 epochs
pub const EPOCHENTROPYBYTES: usize = 16;

/// Length of a serialized private key, and of the ECDSA key it is derived from
pub const PRIVATEKEYBYTES: usize = 32;

/// Order of the BLS12-377 scalar field, in decimal
pub const MODULUS377: &str =
    "8444461749428370424248824938781546531375899335154063827935233455917409239041";

/// Bit length of `MODULUS377`
pub const MODULUSBITS: usize = 253;

/// Keeps the low 5 bits of the most significant byte, so candidates have at most `MODULUSBITS` bits
pub const MODULUSMASK: u8 = 31;

#[cfg(test)]
mod tests {
    use super::*;
    use ark_bls12_377::{Fr, FrParameters};
    use ark_ff::{BigInteger, FpParameters, PrimeField};
    use bls_crypto::epoch::EPOCH_ENTROPY_BYTES;
    use num_bigint::BigUint;

    #[test]
    fn constants_match_the_curve() {
        let modulus: BigUint = MODULUS377.parse().unwrap();
        assert_eq!(modulus, BigUint::from_bytes_le(&FrParameters::MODULUS.to_bytes_le()));
        assert_eq!(modulus.bits() as usize, MODULUSBITS);
        assert_eq!(Fr::size_in_bits(), MODULUSBITS);
        assert_eq!(EPOCH_ENTROPY_BYTES, EPOCHENTROPYBYTES);
        assert_eq!(MODULUSMASK as usize, (1 << (MODULUSBITS % 8)) - 1);
    }
}
