use crate::{BlsResult, HashToCurve, PublicKey, Signature, POP_DOMAIN, SIG_DOMAIN};

use ark_bls12_377::{Fr, G1Projective, G2Projective};
use ark_ec::ProjectiveCurve;
use ark_ff::{PrimeField, UniformRand};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize, Read, SerializationError, Write};
use rand::Rng;

/// A BLS private key, serialized as 32 little endian bytes
#[derive(Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct PrivateKey(Fr);

impl From<Fr> for PrivateKey {
    fn from(sk: Fr) -> PrivateKey {
        PrivateKey(sk)
    }
}

impl AsRef<Fr> for PrivateKey {
    fn as_ref(&self) -> &Fr {
        &self.0
    }
}

impl PrivateKey {
    /// Generates a new private key from the provided RNG
    pub fn generate<R: Rng>(rng: &mut R) -> PrivateKey {
        PrivateKey(Fr::rand(rng))
    }

    /// Hashes the message and extra data to G1 under `SIG_DOMAIN` and signs it
    pub fn sign<H: HashToCurve<Output = G1Projective> + ?Sized>(
        &self,
        message: &[u8],
        extra_data: &[u8],
        hash_to_g1: &H,
    ) -> BlsResult<Signature> {
        self.sign_message(SIG_DOMAIN, message, extra_data, hash_to_g1)
    }

    /// Produces a proof of possession over `message` under `POP_DOMAIN`
    pub fn sign_pop<H: HashToCurve<Output = G1Projective> + ?Sized>(
        &self,
        message: &[u8],
        hash_to_g1: &H,
    ) -> BlsResult<Signature> {
        self.sign_message(POP_DOMAIN, message, &[], hash_to_g1)
    }

    fn sign_message<H: HashToCurve<Output = G1Projective> + ?Sized>(
        &self,
        domain: &[u8],
        message: &[u8],
        extra_data: &[u8],
        hash_to_g1: &H,
    ) -> BlsResult<Signature> {
        let hash = hash_to_g1.hash(domain, message, extra_data)?;
        Ok(Signature::from(hash.mul(self.0.into_repr())))
    }

    /// Returns the public key on G2
    pub fn to_public(&self) -> PublicKey {
        PublicKey::from(G2Projective::prime_subgroup_generator().mul(self.0.into_repr()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash_to_curve::{
        try_and_increment::{COMPOSITE_HASH_TO_G1, DIRECT_HASH_TO_G1},
        try_and_increment_cip22::COMPOSITE_HASH_TO_G1_CIP22,
    };
    use rand::{thread_rng, Rng};

    #[test]
    fn test_simple_sig() {
        test_simple_sig_with_hasher(&*DIRECT_HASH_TO_G1);
        test_simple_sig_with_hasher(&*COMPOSITE_HASH_TO_G1);
        test_simple_sig_with_hasher(&*COMPOSITE_HASH_TO_G1_CIP22);
    }

    fn test_simple_sig_with_hasher<H: HashToCurve<Output = G1Projective>>(hasher: &H) {
        let rng = &mut thread_rng();
        for _ in 0..5 {
            let message: Vec<u8> = (0..32).map(|_| rng.gen()).collect();
            let sk = PrivateKey::generate(rng);

            let sig = sk.sign(&message[..], &[], hasher).unwrap();
            let pk = sk.to_public();
            pk.verify(&message[..], &[], &sig, hasher).unwrap();
            let message2 = b"goodbye";
            pk.verify(&message2[..], &[], &sig, hasher).unwrap_err();
        }
    }

    #[test]
    fn test_pop() {
        let rng = &mut thread_rng();
        let try_and_increment = &*DIRECT_HASH_TO_G1;

        let sk = PrivateKey::generate(rng);
        let sk2 = PrivateKey::generate(rng);

        let pk = sk.to_public();
        let mut pk_bytes = vec![];
        pk.serialize(&mut pk_bytes).unwrap();

        let sig = sk.sign_pop(&pk_bytes, try_and_increment).unwrap();

        let pk2 = sk2.to_public();
        pk.verify_pop(&pk_bytes, &sig, try_and_increment).unwrap();
        pk2.verify_pop(&pk_bytes, &sig, try_and_increment)
            .unwrap_err();
        // a pop is not a valid signature over the same bytes
        pk.verify(&pk_bytes, &[], &sig, try_and_increment)
            .unwrap_err();
    }

    #[test]
    fn private_key_serialization() {
        let rng = &mut thread_rng();
        let sk = PrivateKey::generate(rng);
        let mut bytes = vec![];
        sk.serialize(&mut bytes).unwrap();
        assert_eq!(bytes.len(), 32);
        let de = PrivateKey::deserialize(&bytes[..]).unwrap();
        assert_eq!(sk, de);
    }
}
