use std::fmt;

use serde::{Deserialize, Serialize};

/// An exon is a genomic interval with a start and an end coordinate
///
/// The coordinates are kept exactly as they appear in the source
/// annotation (GTF files use 1-based, inclusive coordinates). The
/// forest-building logic treats an `Exon` as an opaque value: it only
/// relies on equality and the lexicographic order (by `start`, then
/// by `end`). `start <= end` is not enforced.
///
/// # Examples
///
/// ```rust
/// use spliceforest::models::Exon;
///
/// let first = Exon::new(20, 25);
/// let second = Exon::new(20, 30);
/// assert!(first < second);
/// assert_eq!(first.to_string(), "20-25".to_string());
/// ```
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct Exon {
    start: u32,
    end: u32,
}

impl Exon {
    /// Creates a new `Exon` from a start and an end coordinate
    pub fn new(start: u32, end: u32) -> Self {
        Exon { start, end }
    }

    /// Returns the start coordinate
    pub fn start(&self) -> u32 {
        self.start
    }

    /// Returns the end coordinate
    pub fn end(&self) -> u32 {
        self.end
    }
}

impl fmt::Display for Exon {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

impl From<(u32, u32)> for Exon {
    fn from(coords: (u32, u32)) -> Self {
        Exon::new(coords.0, coords.1)
    }
}
