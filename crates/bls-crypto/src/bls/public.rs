use crate::{BLSError, BlsResult, HashToCurve, Signature, POP_DOMAIN, SIG_DOMAIN};

use ark_bls12_377::{Bls12_377, Fq12, G1Projective, G2Affine, G2Projective};
use ark_ec::{AffineCurve, PairingEngine, ProjectiveCurve};
use ark_ff::{One, Zero};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize, SerializationError};

use std::{
    borrow::Borrow,
    io::{Read, Write},
    ops::Neg,
};

/// A BLS public key on G2
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicKey(G2Projective);

impl From<G2Projective> for PublicKey {
    fn from(pk: G2Projective) -> PublicKey {
        PublicKey(pk)
    }
}

impl AsRef<G2Projective> for PublicKey {
    fn as_ref(&self) -> &G2Projective {
        &self.0
    }
}

impl PublicKey {
    /// Sums the provided public keys to produce the aggregate public key.
    pub fn aggregate<P: Borrow<PublicKey>>(public_keys: impl IntoIterator<Item = P>) -> PublicKey {
        public_keys
            .into_iter()
            .fold(G2Projective::zero(), |acc, pk| acc + pk.borrow().as_ref())
            .into()
    }

    /// Verifies a signature over the message and extra data under `SIG_DOMAIN`
    pub fn verify<H: HashToCurve<Output = G1Projective> + ?Sized>(
        &self,
        message: &[u8],
        extra_data: &[u8],
        signature: &Signature,
        hash_to_g1: &H,
    ) -> BlsResult<()> {
        self.verify_sig(SIG_DOMAIN, message, extra_data, signature, hash_to_g1)
    }

    /// Verifies a proof of possession under `POP_DOMAIN`
    pub fn verify_pop<H: HashToCurve<Output = G1Projective> + ?Sized>(
        &self,
        message: &[u8],
        signature: &Signature,
        hash_to_g1: &H,
    ) -> BlsResult<()> {
        self.verify_sig(POP_DOMAIN, message, &[], signature, hash_to_g1)
    }

    fn verify_sig<H: HashToCurve<Output = G1Projective> + ?Sized>(
        &self,
        domain: &[u8],
        message: &[u8],
        extra_data: &[u8],
        signature: &Signature,
        hash_to_g1: &H,
    ) -> BlsResult<()> {
        // the identity pairs to one with the identity signature for every message
        if self.0.is_zero() {
            return Err(BLSError::VerificationFailed);
        }
        let hash = hash_to_g1.hash(domain, message, extra_data)?;
        // e(sig, -g2) * e(H(m), pk) == 1
        let pairing = Bls12_377::product_of_pairings(&[
            (
                signature.as_ref().into_affine().into(),
                G2Affine::prime_subgroup_generator().neg().into(),
            ),
            (hash.into_affine().into(), self.0.into_affine().into()),
        ]);
        if pairing == Fq12::one() {
            Ok(())
        } else {
            Err(BLSError::VerificationFailed)
        }
    }
}

impl CanonicalSerialize for PublicKey {
    fn serialize<W: Write>(&self, writer: W) -> Result<(), SerializationError> {
        self.0.into_affine().serialize(writer)
    }

    fn serialize_uncompressed<W: Write>(&self, writer: W) -> Result<(), SerializationError> {
        self.0.into_affine().serialize_uncompressed(writer)
    }

    fn serialized_size(&self) -> usize {
        self.0.into_affine().serialized_size()
    }
}

impl CanonicalDeserialize for PublicKey {
    fn deserialize<R: Read>(reader: R) -> Result<Self, SerializationError> {
        Ok(PublicKey::from(
            G2Affine::deserialize(reader)?.into_projective(),
        ))
    }

    fn deserialize_uncompressed<R: Read>(reader: R) -> Result<Self, SerializationError> {
        Ok(PublicKey::from(
            G2Affine::deserialize_uncompressed(reader)?.into_projective(),
        ))
    }
}
