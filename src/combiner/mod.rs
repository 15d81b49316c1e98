//! Signature combining functions
//!
//! Internal node signature = combine(left.signature, right.signature)
//!
//! The tree shape and the wire format never look inside a signature, so
//! any pure two-argument function can stand in here. The default is a
//! fast Adler-32 checksum with no tamper resistance. It catches dropped
//! signatures and most in-pair swaps but misses a small fraction of swaps
//! across pairs; see [`Adler32Combiner`] for the measured rate.

mod checksum;
mod digest;

pub use checksum::Adler32Combiner;
pub use digest::Blake3Combiner;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Pure function merging two child signatures into a parent signature.
///
/// Implementations must be deterministic and must not treat the arguments
/// symmetrically: `combine(a, b)` and `combine(b, a)` are expected to
/// differ, otherwise sibling swaps go undetected.
pub trait Combiner: Send + Sync + fmt::Debug {
    /// Short identifier used in logs and CLI output.
    fn name(&self) -> &'static str;

    /// Combine the left child's signature with the right child's.
    fn combine(&self, left: &[u8], right: &[u8]) -> Vec<u8>;
}

/// Selector for the combiners shipped with this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub enum CombinerKind {
    /// 32-bit Adler checksum widened to 8 bytes
    #[default]
    Adler32,
    /// 32-byte BLAKE3 digest
    Blake3,
}

impl CombinerKind {
    /// Every selectable combiner, in declaration order.
    pub const ALL: [CombinerKind; 2] = [CombinerKind::Adler32, CombinerKind::Blake3];

    /// Instantiate the selected combiner.
    pub fn instantiate(self) -> Arc<dyn Combiner> {
        match self {
            CombinerKind::Adler32 => Arc::new(Adler32Combiner),
            CombinerKind::Blake3 => Arc::new(Blake3Combiner),
        }
    }

    /// Length in bytes of every signature the combiner emits.
    pub fn output_len(self) -> usize {
        match self {
            CombinerKind::Adler32 => Adler32Combiner::OUTPUT_LEN,
            CombinerKind::Blake3 => Blake3Combiner::OUTPUT_LEN,
        }
    }

    /// Identifier matching [`Combiner::name`].
    pub fn as_str(self) -> &'static str {
        match self {
            CombinerKind::Adler32 => "adler32",
            CombinerKind::Blake3 => "blake3",
        }
    }
}

impl fmt::Display for CombinerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CombinerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CombinerKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown combiner '{}' (expected adler32 or blake3)", s))
    }
}
