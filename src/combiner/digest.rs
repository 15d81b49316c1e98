//! BLAKE3 combiner
//!
//! Slower than Adler-32 but with 256-bit output, for deployments that want
//! fewer accidental root collisions.

use super::Combiner;

/// Combiner hashing `len(left) || left || right` with BLAKE3.
///
/// The left length is mixed in so that moving bytes across the sibling
/// boundary changes the digest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Blake3Combiner;

impl Blake3Combiner {
    /// Width of every signature this combiner produces.
    pub const OUTPUT_LEN: usize = blake3::OUT_LEN;
}

impl Combiner for Blake3Combiner {
    fn name(&self) -> &'static str {
        "blake3"
    }

    fn combine(&self, left: &[u8], right: &[u8]) -> Vec<u8> {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&(left.len() as u64).to_be_bytes());
        hasher.update(left);
        hasher.update(right);
        hasher.finalize().as_bytes().to_vec()
    }
}
