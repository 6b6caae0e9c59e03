use super::EncodingError;
use crate::PublicKey;

use ark_bls12_377::FqParameters;
use ark_ec::ProjectiveCurve;
use ark_ff::{FpParameters, PrimeField, Zero};
use ark_serialize::CanonicalSerialize;

/// Number of bits of a BLS12-377 base field element
pub const FQ_BITS: usize = FqParameters::MODULUS_BITS as usize;

/// Number of bits of an encoded public key: both coordinates of `x` and the sign of `y`
pub const PUBKEY_BITS: usize = 2 * FQ_BITS + 1;

/// The function assumes that the public key is not the point in infinity, which is true for
/// BLS public keys
pub fn encode_public_key(public_key: &PublicKey) -> Result<Vec<bool>, EncodingError> {
    let pk_affine = public_key.as_ref().into_affine();
    let x = pk_affine.x;
    let y = pk_affine.y;

    let y_c0_big = y.c0.into_repr();
    let y_c1_big = y.c1.into_repr();

    let half = FqParameters::MODULUS_MINUS_ONE_DIV_TWO;
    let is_over_half = y_c1_big > half || (y.c1.is_zero() && y_c0_big > half);

    let mut bits = Vec::with_capacity(PUBKEY_BITS);
    let mut x_bytes_c0 = vec![];
    x.c0.serialize(&mut x_bytes_c0)?;
    bits.extend_from_slice(&bytes_to_bits(&x_bytes_c0, FQ_BITS));
    let mut x_bytes_c1 = vec![];
    x.c1.serialize(&mut x_bytes_c1)?;
    bits.extend_from_slice(&bytes_to_bits(&x_bytes_c1, FQ_BITS));
    bits.push(is_over_half);

    Ok(bits)
}

/// LE Encodes a U8 to **bits**
pub fn encode_u8(num: u8) -> Vec<bool> {
    (0..8).map(|i| (num >> i) & 1 == 1).collect()
}

/// LE Encodes a U16 to **bits**
pub fn encode_u16(num: u16) -> Vec<bool> {
    (0..16).map(|i| (num >> i) & 1 == 1).collect()
}

/// LE Encodes a U32 to **bits**
pub fn encode_u32(num: u32) -> Vec<bool> {
    (0..32).map(|i| (num >> i) & 1 == 1).collect()
}

/// Converts the provided bits to LE bytes
pub fn bits_to_bytes(bits: &[bool]) -> Vec<u8> {
    let reversed_bits = {
        let mut tmp = bits.to_owned();
        tmp.reverse();
        tmp
    };

    let mut bytes = Vec::with_capacity((bits.len() + 7) / 8);
    for chunk in reversed_bits.chunks(8) {
        let mut byte = 0u8;
        for (i, c) in chunk.iter().enumerate() {
            byte |= (*c as u8) << i;
        }
        bytes.push(byte);
    }

    bytes
}

/// If bytes is a little endian representation of a number, this returns the bits
/// of the number in descending order
pub fn bytes_to_bits(bytes: &[u8], bits_to_take: usize) -> Vec<bool> {
    let mut bits = vec![];
    for b in bytes {
        let mut byte = *b;
        for _ in 0..8 {
            bits.push((byte & 1) == 1);
            byte >>= 1;
        }
    }

    bits.truncate(bits_to_take);
    bits.reverse();
    bits
}
