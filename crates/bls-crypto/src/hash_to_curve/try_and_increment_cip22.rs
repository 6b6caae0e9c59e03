use log::trace;
use std::marker::PhantomData;

use super::{hash_length, try_and_increment::NUM_TRIES, HashToCurve};
use crate::hashers::{
    composite::{CompositeHasher, COMPOSITE_HASHER, CRH},
    Hasher,
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

/// Composite (Bowe-Hopwood CRH, Blake2x XOF) Try-and-Increment hasher for BLS 12-377,
/// framed as in CIP22.
pub static COMPOSITE_HASH_TO_G1_CIP22: Lazy<
    TryAndIncrementCIP22<CompositeHasher<CRH>, G1Parameters>,
> = Lazy::new(|| TryAndIncrementCIP22::new(&*COMPOSITE_HASHER));

/// Try-and-increment where the message goes through the CRH only once, and the
/// counter and extra data are mixed in at the XOF stage.
#[derive(Clone)]
pub struct TryAndIncrementCIP22<'a, H, P> {
    hasher: &'a H,
    curve_params: PhantomData<P>,
}

impl<'a, H, P> TryAndIncrementCIP22<'a, H, P>
where
    H: Hasher,
    P: SWModelParameters,
{
    /// Instantiates a new Try-and-increment hasher with the provided hashing method
    /// and curve parameters based on the type
    pub fn new(h: &'a H) -> Self {
        TryAndIncrementCIP22 {
            hasher: h,
            curve_params: PhantomData,
        }
    }

    /// Returns the point together with the counter that produced it
    pub fn hash_with_attempt_cip22(
        &self,
        domain: &[u8],
        message: &[u8],
        extra_data: &[u8],
    ) -> Result<(GroupProjective<P>, usize), BLSError> {
        let num_bytes = GroupAffine::<P>::zero().serialized_size();
        let hash_bytes = hash_length(num_bytes);
        let inner_hash = self.hasher.crh(domain, message, hash_bytes)?;

        for c in 0..NUM_TRIES {
            let msg = [&[c][..], extra_data, &inner_hash].concat();
            let candidate_hash = self.hasher.xof(domain, &msg, hash_bytes)?;

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
                    "succeeded hashing \"{}\" to curve in {} tries (cip22)",
                    hex::encode(message),
                    c
                );

                return Ok((scaled, c as usize));
            }
        }
        Err(BLSError::HashToCurveError)
    }
}

impl<'a, H, P> HashToCurve for TryAndIncrementCIP22<'a, H, P>
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
        self.hash_with_attempt_cip22(domain, message, extra_data)
            .map(|res| res.0)
    }
}
