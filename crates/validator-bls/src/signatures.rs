use crate::{
    derive::parse_private_key, Error, PublicKeyCache, Result, SerializedPublicKey,
    SerializedSignature, SIGNATUREBYTES,
};

use ark_bls12_377::G1Projective;
use ark_ff::Zero;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use bls_crypto::{
    hash_to_curve::{
        try_and_increment::{COMPOSITE_HASH_TO_G1, DIRECT_HASH_TO_G1},
        try_and_increment_cip22::COMPOSITE_HASH_TO_G1_CIP22,
    },
    HashToCurve, Signature,
};

/// A hash to G1 which can be shared between threads
pub type HashToG1 = dyn HashToCurve<Output = G1Projective> + Sync;

/// Picks the hash to G1 negotiated by the two flags. The direct hasher has no CIP22 framing.
pub fn hasher(use_composite_hasher: bool, cip22: bool) -> Result<&'static HashToG1> {
    match (use_composite_hasher, cip22) {
        (false, false) => Ok(&*DIRECT_HASH_TO_G1),
        (true, false) => Ok(&*COMPOSITE_HASH_TO_G1),
        (true, true) => Ok(&*COMPOSITE_HASH_TO_G1_CIP22),
        (false, true) => Err(Error::UnsupportedHasher),
    }
}

/// Verifies a signature over `message` and `extra_data` by a single public key
pub fn verify_signature(
    cache: &PublicKeyCache,
    public_key: &SerializedPublicKey,
    message: &[u8],
    extra_data: &[u8],
    signature: &SerializedSignature,
    use_composite_hasher: bool,
    cip22: bool,
) -> Result<()> {
    let hash_to_g1 = hasher(use_composite_hasher, cip22)?;
    let public_key = cache.get_or_deserialize(public_key)?;
    let signature = deserialize_signature(signature)?;
    public_key.verify(message, extra_data, &signature, hash_to_g1)?;
    Ok(())
}

/// Sums the provided signatures to produce the aggregate signature
pub fn aggregate_signatures(signatures: &[SerializedSignature]) -> Result<SerializedSignature> {
    if signatures.is_empty() {
        return Err(Error::EmptyAggregate);
    }
    let signatures = signatures
        .iter()
        .enumerate()
        .map(|(index, sig)| deserialize_signature(sig).map_err(|err| err.at_index(index)))
        .collect::<Result<Vec<_>>>()?;
    serialize_signature(&Signature::aggregate(&signatures))
}

/// Verifies an aggregate signature against the aggregate of `public_keys`, with a single
/// pairing check
pub fn verify_aggregated_signature(
    cache: &PublicKeyCache,
    public_keys: &[SerializedPublicKey],
    message: &[u8],
    extra_data: &[u8],
    signature: &SerializedSignature,
    use_composite_hasher: bool,
    cip22: bool,
) -> Result<()> {
    let hash_to_g1 = hasher(use_composite_hasher, cip22)?;
    let apk = cache.aggregate(public_keys)?;
    // keys cancelling out sum to the identity, which verifies any message
    if apk.as_ref().is_zero() {
        return Err(Error::VerificationFailed);
    }
    let signature = deserialize_signature(signature)?;
    apk.verify(message, extra_data, &signature, hash_to_g1)?;
    Ok(())
}

/// Returns the uncompressed encoding of a public key
pub fn uncompress_key(cache: &PublicKeyCache, public_key: &SerializedPublicKey) -> Result<Vec<u8>> {
    let public_key = cache.get_or_deserialize(public_key)?;
    let mut bytes = vec![];
    public_key.serialize_uncompressed(&mut bytes)?;
    Ok(bytes)
}

/// Signs `message` and `extra_data` with a 32 byte little endian private key
pub fn sign_message(
    private_key: &[u8],
    message: &[u8],
    extra_data: &[u8],
    use_composite_hasher: bool,
    cip22: bool,
) -> Result<SerializedSignature> {
    let hash_to_g1 = hasher(use_composite_hasher, cip22)?;
    let private_key = parse_private_key(private_key)?;
    serialize_signature(&private_key.sign(message, extra_data, hash_to_g1)?)
}

/// Produces a proof of possession of the private key over `message`, usually the
/// signer's address
pub fn sign_pop(private_key: &[u8], message: &[u8]) -> Result<SerializedSignature> {
    let private_key = parse_private_key(private_key)?;
    serialize_signature(&private_key.sign_pop(message, &*DIRECT_HASH_TO_G1)?)
}

/// Verifies a proof of possession
pub fn verify_pop(
    cache: &PublicKeyCache,
    public_key: &SerializedPublicKey,
    message: &[u8],
    signature: &SerializedSignature,
) -> Result<()> {
    let public_key = cache.get_or_deserialize(public_key)?;
    let signature = deserialize_signature(signature)?;
    public_key.verify_pop(message, &signature, &*DIRECT_HASH_TO_G1)?;
    Ok(())
}

fn deserialize_signature(signature: &SerializedSignature) -> Result<Signature> {
    Signature::deserialize(&signature.as_bytes()[..]).map_err(Error::deserialize("signature"))
}

fn serialize_signature(signature: &Signature) -> Result<SerializedSignature> {
    let mut bytes = Vec::with_capacity(SIGNATUREBYTES);
    signature.serialize(&mut bytes)?;
    SerializedSignature::from_bytes(&bytes)
}
