use crate::PrivateKey;

use rand::SeedableRng;
use rand_xorshift::XorShiftRng;

/// Same seeded RNG for all tests, so that failures are reproducible
pub fn seeded_rng() -> XorShiftRng {
    XorShiftRng::from_seed([
        0x5d, 0xbe, 0x62, 0x59, 0x8d, 0x31, 0x3d, 0x76, 0x32, 0x37, 0xdb, 0x17, 0xe5, 0xbc, 0x06,
        0x54,
    ])
}

/// generate `num` private keys
pub fn keygen_mul(num: usize) -> Vec<PrivateKey> {
    let rng = &mut seeded_rng();
    (0..num).map(|_| PrivateKey::generate(rng)).collect()
}
