use log::trace;
use std::marker::PhantomData;

use super::{hash_length, HashToCurve};
use crate::hashers::{
    composite::{CompositeHasher, COMPOSITE_HASHER, CRH},
    DirectHasher, Hasher,
};
use crate::BLSError;

use ark_bls12_377::g1::Parameters as G1Parameters;
use ark_ec::{
    models::{
        short_weierstrass_jacobian::{GroupAffine, GroupProjective},
        SWModelParameters,
    },
    AffineCurve,
};
use ark_ff::Zero;
use ark_serialize::CanonicalSerialize;
use once_cell::sync::Lazy;

pub(crate) const NUM_TRIES: u8 = 255;

/// Composite (Bowe-Hopwood CRH, Blake2x XOF) Try-and-Increment hasher for BLS 12-377.
pub static COMPOSITE_HASH_TO_G1: Lazy<TryAndIncrement<CompositeHasher<CRH>, G1Parameters>> =
    Lazy::new(|| TryAndIncrement::new(&*COMPOSITE_HASHER));

/// Direct (Blake2s CRH, Blake2x XOF) Try-and-Increment hasher for BLS 12-377.
/// Equivalent to Blake2xs.
pub static DIRECT_HASH_TO_G1: Lazy<TryAndIncrement<DirectHasher, G1Parameters>> =
    Lazy::new(|| TryAndIncrement::new(&DirectHasher));

/// A try-and-increment method for hashing to G1 and G2. See page 521 in
/// https://link.springer.com/content/pdf/10.1007/3-540-45682-1_30.pdf.
#[derive(Clone)]
pub struct TryAndIncrement<'a, H, P> {
    hasher: &'a H,
    curve_params: PhantomData<P>,
}

impl<'a, H, P> TryAndIncrement<'a, H, P>
where
    H: Hasher,
    P: SWModelParameters,
{
    /// Instantiates a new Try-and-increment hasher with the provided hashing method
    /// and curve parameters based on the type
    pub fn new(h: &'a H) -> Self {
        TryAndIncrement {
            hasher: h,
            curve_params: PhantomData,
        }
    }

    /// Hashes `counter || extra_data || message` for increasing counters until the output
    /// decodes to a point, and returns that point (cleared of its cofactor) with the counter
    pub fn hash_with_attempt(
        &self,
        domain: &[u8],
        message: &[u8],
        extra_data: &[u8],
    ) -> Result<(GroupProjective<P>, usize), BLSError> {
        let num_bytes = GroupAffine::<P>::zero().serialized_size();
        let hash_bytes = hash_length(num_bytes);

        for c in 0..NUM_TRIES {
            let candidate_hash =
                self.hasher
                    .hash(domain, &[&[c][..], extra_data, message].concat(), hash_bytes)?;

            // handle the Celo deployed bit extraction logic
            #[cfg(feature = "compat")]
            let candidate_hash = {
                use ark_serialize::{Flags, SWFlags};

                let mut candidate_hash = candidate_hash[..num_bytes].to_vec();
                let positive_flag = candidate_hash[num_bytes - 1] & 2 != 0;
                if positive_flag {
                    candidate_hash[num_bytes - 1] |= SWFlags::PositiveY.u8_bitmask();
                } else {
                    candidate_hash[num_bytes - 1] &= !SWFlags::PositiveY.u8_bitmask();
                }
                candidate_hash
            };

            if let Some(p) = GroupAffine::<P>::from_random_bytes(&candidate_hash[..num_bytes]) {
                let scaled = p.mul_by_cofactor_to_projective();
                if scaled.is_zero() {
                    continue;
                }
                trace!(
                    "succeeded hashing \"{}\" to curve in {} tries",
                    hex::encode(message),
                    c
                );

                return Ok((scaled, c as usize));
            }
        }
        Err(BLSError::HashToCurveError)
    }
}

impl<'a, H, P> HashToCurve for TryAndIncrement<'a, H, P>
where
    H: Hasher,
    P: SWModelParameters,
{
    type Output = GroupProjective<P>;

    fn hash(
        &self,
        domain: &[u8],
        message: &[u8],
        extra_data: &[u8],
    ) -> Result<Self::Output, BLSError> {
        self.hash_with_attempt(domain, message, extra_data)
            .map(|res| res.0)
    }
}
