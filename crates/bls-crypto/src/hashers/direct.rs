use super::Hasher;
use crate::BLSError;

use blake2s_simd::Params;
use byteorder::{LittleEndian, WriteBytesExt};

/// Blake2s CRH followed by a Blake2x XOF, as described in https://blake2.net/blake2x.pdf
#[derive(Clone, Copy, Debug, Default)]
pub struct DirectHasher;

/// Blake2s personalization strings are limited to 8 bytes
const MAX_DOMAIN_LENGTH: usize = 8;

/// Packs the node index and the requested XOF digest length into Blake2x's node offset
fn xof_digest_length_to_node_offset(
    node_offset: usize,
    xof_digest_length: usize,
) -> Result<u64, BLSError> {
    let mut xof_digest_length_bytes: [u8; 2] = [0; 2];
    (&mut xof_digest_length_bytes[..]).write_u16::<LittleEndian>(xof_digest_length as u16)?;
    let offset = node_offset as u64
        | ((xof_digest_length_bytes[0] as u64) << 32)
        | ((xof_digest_length_bytes[1] as u64) << 40);
    Ok(offset)
}

fn check_domain(domain: &[u8]) -> Result<(), BLSError> {
    if domain.len() > MAX_DOMAIN_LENGTH {
        return Err(BLSError::DomainTooLarge(domain.len()));
    }
    Ok(())
}

impl Hasher for DirectHasher {
    fn crh(
        &self,
        domain: &[u8],
        message: &[u8],
        xof_digest_length: usize,
    ) -> Result<Vec<u8>, BLSError> {
        check_domain(domain)?;
        let hash_result = Params::new()
            .hash_length(32)
            .node_offset(xof_digest_length_to_node_offset(0, xof_digest_length)?)
            .personal(domain)
            .to_state()
            .update(message)
            .finalize()
            .as_ref()
            .to_vec();
        Ok(hash_result)
    }

    fn xof(
        &self,
        domain: &[u8],
        hashed_message: &[u8],
        xof_digest_length: usize,
    ) -> Result<Vec<u8>, BLSError> {
        check_domain(domain)?;
        let num_hashes = (xof_digest_length + 32 - 1) / 32;

        let mut result = Vec::with_capacity(num_hashes * 32);
        for i in 0..num_hashes {
            let hash_result = Params::new()
                .hash_length(32)
                .max_leaf_length(32)
                .inner_hash_length(32)
                .fanout(0)
                .max_depth(0)
                .personal(domain)
                .node_offset(xof_digest_length_to_node_offset(i, xof_digest_length)?)
                .to_state()
                .update(hashed_message)
                .finalize();
            result.extend_from_slice(hash_result.as_ref());
        }

        Ok(result)
    }
}
