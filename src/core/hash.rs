use sha3::{Digest, Sha3_256};
use std::fmt::Debug;

pub trait Hash: Debug + Clone + 'static {
    /// The length in bytes of the hasher output
    const LENGTH: usize;

    type Output: AsRef<[u8]> + Debug + Default + Copy + PartialEq;

    fn hash(s: &[u8]) -> Self::Output;
}

#[derive(Debug, Clone, Default)]
pub struct Sha3Hasher;

impl Hash for Sha3Hasher {
    const LENGTH: usize = 32;
    type Output = [u8; 32];

    fn hash(s: &[u8]) -> Self::Output {
        let mut h = Sha3_256::new();
        h.update(s);
        h.finalize().into()
    }
}
