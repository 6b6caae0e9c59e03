/// Implementation of the `MapToGroup` algorithm (Paragraph
/// 3.3) of [this paper](https://link.springer.com/content/pdf/10.1007/3-540-45682-1_30.pdf)
///
/// This method involves hashing the data along with a counter. If the hash can then be interpreted
/// as an elliptic curve point, it returns. If not, it increments the counter and tries again.
///
/// **This algorithm is not constant time**.
///
/// # Examples
///
/// Hashing the data requires instantiating a hasher, importing the `HashToCurve` trait
/// and calling the `hash` function
///
/// ```rust
/// use bls_crypto::{OUT_DOMAIN, hash_to_curve::{HashToCurve, try_and_increment::DIRECT_HASH_TO_G1}};
///
/// // Instantiate the lazily evaluated hasher to BLS 12-377.
/// let hasher = &*DIRECT_HASH_TO_G1;
///
/// // Hash the data. The domain must be at most 8 bytes.
/// let hash = hasher.hash(OUT_DOMAIN, &b"some_data"[..], &b"extra"[..]).expect("should not fail");
/// ```
///
/// Picking the hasher and the curve explicitly also exposes the winning counter:
///
/// ```rust
/// use ark_bls12_377::g1::Parameters;
/// use bls_crypto::{
///     OUT_DOMAIN,
///     hashers::DirectHasher,
///     hash_to_curve::try_and_increment::TryAndIncrement,
/// };
///
/// let hasher = TryAndIncrement::<_, Parameters>::new(&DirectHasher);
/// let (hash, counter) = hasher.hash_with_attempt(OUT_DOMAIN, &b"some_data"[..], &b"extra"[..]).expect("should not fail");
/// assert!(counter < 255);
/// ```
pub mod try_and_increment;

/// The CIP22 variant of try-and-increment, which compresses the message once with the CRH and
/// only reruns the XOF for every counter
pub mod try_and_increment_cip22;

use crate::BLSError;

/// Trait for hashing arbitrary data to a group element on an elliptic curve
pub trait HashToCurve {
    /// The type of the curve being used.
    type Output;

    /// Given a domain separator, a message and potentially some extra data, produces
    /// a hash of them which is a curve point.
    fn hash(
        &self,
        domain: &[u8],
        message: &[u8],
        extra_data: &[u8],
    ) -> Result<Self::Output, BLSError>;
}

/// Rounds the requested byte length up to a whole number of 256-bit XOF blocks
pub fn hash_length(n: usize) -> usize {
    (n * 8 + 255) / 256 * 256 / 8
}
