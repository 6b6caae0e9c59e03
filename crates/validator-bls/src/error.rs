use ark_serialize::SerializationError;
use bls_crypto::{epoch::EncodingError, BLSError};
use thiserror::Error;

/// Convenience result alias
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
/// Error type
pub enum Error {
    /// A fixed length value was built from a slice of another length
    #[error("wrong length for {ty}: expected {expected}, got {actual}")]
    WrongLength {
        ty: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("invalid hex string: {0}")]
    InvalidHex(#[from] hex::FromHexError),
    #[error("hex string without 0x prefix")]
    MissingHexPrefix,
    /// The bytes do not encode a valid point or scalar
    #[error("could not deserialize {what}: {source}")]
    Deserialize {
        what: &'static str,
        #[source]
        source: SerializationError,
    },
    #[error("serialization failed: {0}")]
    Serialization(#[from] SerializationError),
    /// Locates the failing element of a key or signature set
    #[error("element {index}: {source}")]
    AtIndex {
        index: usize,
        #[source]
        source: Box<Error>,
    },
    /// The pairing check did not hold
    #[error("signature verification failed")]
    VerificationFailed,
    #[error("the direct hasher has no CIP22 variant")]
    UnsupportedHasher,
    #[error("cannot aggregate an empty set")]
    EmptyAggregate,
    #[error("couldn't derive a BLS key from an ECDSA key")]
    DerivationExhausted,
    #[error("can't parse modulus")]
    InvalidModulus,
    #[error(transparent)]
    Bls(BLSError),
    #[error(transparent)]
    Encoding(#[from] EncodingError),
}

impl Error {
    /// Wraps the error with the index of the element which caused it
    pub fn at_index(self, index: usize) -> Self {
        Error::AtIndex {
            index,
            source: Box::new(self),
        }
    }

    pub(crate) fn deserialize(what: &'static str) -> impl FnOnce(SerializationError) -> Self {
        move |source| Error::Deserialize { what, source }
    }
}

impl From<BLSError> for Error {
    fn from(err: BLSError) -> Self {
        match err {
            BLSError::VerificationFailed => Error::VerificationFailed,
            err => Error::Bls(err),
        }
    }
}
