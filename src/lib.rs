//! # Huffman Trees
//!
//! *Optimal prefix-code trees from a fixed set of weights.*
//!
//! ## Intuition First
//!
//! Picture a pile of sacks, each labelled with how often its symbol shows up.
//! Take the two lightest sacks, tie them together into a bigger sack, and put
//! it back on the pile. Repeat until one sack is left. Light symbols end up
//! buried deep (long codes), heavy ones stay near the top (short codes).
//!
//! ## The Problem
//!
//! Given N leaf weights, find the binary tree that minimizes the
//! weighted path length: the sum over leaves of weight × depth. Any
//! prefix code corresponds to such a tree, so the minimum is the best
//! average code length achievable symbol-by-symbol.
//!
//! ## Historical Context
//!
//! ```text
//! 1948  Shannon     Entropy as the fundamental limit
//! 1949  Fano        Shannon-Fano coding: top-down, not always optimal
//! 1952  Huffman     Bottom-up greedy merge: provably optimal
//! 1976  van Leeuwen Two-queue construction in O(N) for sorted weights
//! ```
//!
//! ## Mathematical Formulation
//!
//! For leaf weights $w_i$ at depths $d_i$:
//!
//! ```text
//! WPL = Σ w_i · d_i = Σ (weights of internal nodes)
//! ```
//!
//! The second form is why the greedy merge works: every merge pays the
//! combined weight once, and merging the two lightest first never costs more.
//!
//! ## Complexity Analysis
//!
//! - **Time**: $O(N^2)$ with [`Selection::LinearScan`], $O(N \log N)$ with
//!   [`Selection::MinHeap`].
//! - **Space**: $O(N)$; exactly $2N - 1$ nodes.
//!
//! ## Failure Modes
//!
//! 1. **Empty input**: no tree exists; rejected with [`Error::InvalidInput`].
//! 2. **Weight overflow**: totals past `u64::MAX` are rejected up front.
//! 3. **Rebuilding**: a second `build` is rejected with [`Error::AlreadyBuilt`].
//!
//! ## Implementation Notes
//!
//! Nodes live in one arena and refer to each other by [`NodeId`]. Leaves take
//! slots `0..N` in input order, merges append in construction order, so the
//! root is always the last slot.
//!
//! ## References
//!
//! - Huffman, D. A. (1952). "A Method for the Construction of Minimum-Redundancy Codes."
//! - van Leeuwen, J. (1976). "On the construction of Huffman trees."

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod tree;

pub use error::{Error, Result};
pub use tree::{Node, NodeId, Selection, State, TreeBuilder};
