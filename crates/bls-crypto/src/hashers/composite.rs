use super::{DirectHasher, Hasher};
use crate::BLSError;

use ark_crypto_primitives::crh::{bowe_hopwood, pedersen, CRH as CRHTrait};
use ark_ec::ProjectiveCurve;
use ark_ed_on_bw6_761::{EdwardsParameters, EdwardsProjective};
use ark_serialize::CanonicalSerialize;
use log::debug;
use once_cell::sync::Lazy;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaChaRng;

/// Window parameters of the Bowe-Hopwood CRH over Edwards BW6-761
#[derive(Clone)]
pub struct Window;

impl pedersen::Window for Window {
    const WINDOW_SIZE: usize = 93;
    const NUM_WINDOWS: usize = 560;
}

/// Bowe-Hopwood packs 3 input bits into every segment chunk
const CHUNK_SIZE: usize = 3;

/// Largest message (in bytes) the CRH accepts
pub const MAX_CRH_INPUT_BYTES: usize =
    <Window as pedersen::Window>::WINDOW_SIZE * <Window as pedersen::Window>::NUM_WINDOWS * CHUNK_SIZE
        / 8;

/// Domain and input hashed into the seed of the CRH generators
const PRNG_DOMAIN: &[u8] = b"UL_prngs";
const PRNG_SEED: &[u8] = b"ULTRALIGHT PRNG SEED";

/// Bowe-Hopwood Pedersen CRH over Edwards BW6-761, cheap to evaluate inside a SNARK
/// over BW6-761
pub type CRH = bowe_hopwood::CRH<EdwardsParameters, Window>;

/// Lazily evaluated composite hasher instantiated over `CRH`.
pub static COMPOSITE_HASHER: Lazy<CompositeHasher<CRH>> =
    Lazy::new(|| CompositeHasher::<CRH>::new().expect("CRH window parameters are valid"));

/// Uses a SNARK-friendly CRH to compress the message and Blake2x as the XOF.
pub struct CompositeHasher<H: CRHTrait> {
    parameters: H::Parameters,
}

impl<H: CRHTrait<Output = EdwardsProjective>> CompositeHasher<H> {
    /// Instantiates the CRH with generators sampled from a fixed, publicly known seed so that
    /// every node (and the circuit) agrees on them.
    pub fn new() -> Result<Self, BLSError> {
        Ok(Self {
            parameters: Self::setup_crh()?,
        })
    }

    fn prng() -> Result<impl Rng, BLSError> {
        let hash_result = DirectHasher.hash(PRNG_DOMAIN, PRNG_SEED, 32)?;
        let mut seed = [0; 32];
        seed.copy_from_slice(&hash_result[..32]);
        Ok(ChaChaRng::from_seed(seed))
    }

    fn setup_crh() -> Result<H::Parameters, BLSError> {
        let mut rng = Self::prng()?;
        debug!("setting up the composite hasher CRH parameters");
        H::setup(&mut rng).map_err(|e| BLSError::HashingError(e.to_string()))
    }
}

impl<H: CRHTrait<Output = EdwardsProjective>> Hasher for CompositeHasher<H> {
    fn crh(&self, _: &[u8], message: &[u8], _: usize) -> Result<Vec<u8>, BLSError> {
        if message.len() > MAX_CRH_INPUT_BYTES {
            return Err(BLSError::InputTooLarge {
                len: message.len(),
                max: MAX_CRH_INPUT_BYTES,
            });
        }
        let h = H::evaluate(&self.parameters, message)
            .map_err(|e| BLSError::HashingError(e.to_string()))?
            .into_affine();
        // only the x coordinate is kept
        let mut res = vec![];
        h.x.serialize(&mut res)?;

        Ok(res)
    }

    fn xof(
        &self,
        domain: &[u8],
        hashed_message: &[u8],
        xof_digest_length: usize,
    ) -> Result<Vec<u8>, BLSError> {
        DirectHasher.xof(domain, hashed_message, xof_digest_length)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{test_helpers::seeded_rng, SIG_DOMAIN};
    use rand::Rng;

    #[test]
    fn test_crh_empty() {
        let msg: Vec<u8> = vec![];
        let result = COMPOSITE_HASHER.crh(&[], &msg, 96).unwrap();
        assert_eq!(result.len(), 48);
    }

    #[test]
    fn test_crh_is_deterministic() {
        let rng = &mut seeded_rng();
        let msg: Vec<u8> = (0..32).map(|_| rng.gen()).collect();
        let first = COMPOSITE_HASHER.crh(&[], &msg, 96).unwrap();
        let second = COMPOSITE_HASHER.crh(&[], &msg, 96).unwrap();
        assert_eq!(first, second);

        let mut other = msg.clone();
        other[0] ^= 1;
        assert_ne!(first, COMPOSITE_HASHER.crh(&[], &other, 96).unwrap());
    }

    #[test]
    fn test_hash_random() {
        let rng = &mut seeded_rng();
        let msg: Vec<u8> = (0..9820 * 4 / 8).map(|_| rng.gen()).collect();
        let result = COMPOSITE_HASHER.hash(SIG_DOMAIN, &msg, 96).unwrap();
        assert_eq!(result.len(), 96);
    }

    #[test]
    fn rejects_oversized_input() {
        let msg = vec![0u8; MAX_CRH_INPUT_BYTES + 1];
        let err = COMPOSITE_HASHER.crh(&[], &msg, 96).unwrap_err();
        assert!(matches!(err, BLSError::InputTooLarge { .. }));
    }
}
