//! Error types for Huffman tree construction.

use thiserror::Error;

/// Error variants for tree construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The weight sequence cannot produce a tree (empty, or its total overflows `u64`).
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),

    /// `build` was called on a tree that is already built.
    #[error("tree is already built")]
    AlreadyBuilt,

    /// Fewer than two unattached nodes were available for a merge.
    #[error("internal consistency failure at slot {index}: {found} unattached node(s) found, need 2")]
    InternalConsistency {
        /// Slot the merge was meant to fill.
        index: usize,
        /// Unattached candidates seen during the scan.
        found: usize,
    },
}

/// A specialized Result type for tree construction.
pub type Result<T> = std::result::Result<T, Error>;
