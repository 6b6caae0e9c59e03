//! # BLS Cryptography
//!
//! This crate implements BLS signatures over BLS12-377, with public keys on G2
//! and signatures on G1, together with the hash-to-curve methods used by the
//! validator set and the canonical encoding of epoch blocks.
/// BLS signing
mod bls;
pub use bls::{PrivateKey, PublicKey, Signature};

/// Hashing to curve utilities
pub mod hash_to_curve;
pub use hash_to_curve::HashToCurve;

/// Useful hash functions
pub mod hashers;
pub use hashers::Hasher;

/// Canonical encoding of epoch blocks
pub mod epoch;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

use ark_serialize::SerializationError;
use thiserror::Error;

/// Convenience result alias
pub type BlsResult<T> = std::result::Result<T, BLSError>;

/// Domain separator for signing messages
pub const SIG_DOMAIN: &[u8] = b"ULforxof";

/// Domain separator for Proofs of Posession
pub const POP_DOMAIN: &[u8] = b"ULforpop";

/// Domain separator for public inputs to the snark
pub const OUT_DOMAIN: &[u8] = b"ULforout";

#[derive(Debug, Error)]
/// Error type
pub enum BLSError {
    /// The pairing check did not hold
    #[error("signature verification failed")]
    VerificationFailed,
    /// An IO error
    #[error("io error {0}")]
    IoError(#[from] std::io::Error),
    /// Error while hashing
    #[error("error in hasher {0}")]
    HashingError(String),
    /// Personalization string cannot be larger than 8 bytes
    #[error("domain length is too large: {0}")]
    DomainTooLarge(usize),
    /// The CRH only accepts inputs up to a fixed number of bits
    #[error("input of {len} bytes is too large for the CRH (max {max} bytes)")]
    InputTooLarge { len: usize, max: usize },
    /// No counter produced a valid curve point
    #[error("Could not hash to curve")]
    HashToCurveError,
    /// Point or scalar (de)serialization failed
    #[error("{0}")]
    SerializationError(#[from] SerializationError),
}
