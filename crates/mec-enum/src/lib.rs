#![deny(missing_docs)]

//! Enumeration of the Markov equivalence class of a partially directed
//! input graph.
//!
//! Four independent enumeration families share one graph representation
//! and one measurement sink:
//!
//! - [`enumerate_cpdag`]: maximum-cardinality-search buckets over the
//!   chordal components of a CC/CPDAG input, linear delay per output;
//! - [`enumerate_pdag`]: the generalisation to PDAG inputs with
//!   background directions, via a secondary in-degree bucket level;
//! - [`enumerate_meek`]: recursive branching on undirected edges with
//!   Meek closure after every orientation;
//! - [`enumerate_chickering`] / [`enumerate_dfs`]: walks over
//!   covered-edge reversals from a seed extension, the DFS variant with
//!   a Hamming-distance-3 bound between consecutive outputs.
//!
//! Every enumerator reports its tally as a big integer (class sizes pass
//! `2^63` already for moderate cliques) and emits each DAG through a
//! [`Measurement`] sink, which enforces the cooperative deadline and the
//! optional emission cap. [`mec_size`] computes the class size of CC and
//! CPDAG inputs by an independent recursion for cross-checking.

mod branching;
mod count;
mod cpdag;
mod emit;
mod measure;
mod pdag;
mod reversal;

pub use branching::enumerate_meek;
pub use count::mec_size;
pub use cpdag::enumerate_cpdag;
pub use measure::{DelaySummary, MeasureOpts, Measurement};
pub use pdag::enumerate_pdag;
pub use reversal::{enumerate_chickering, enumerate_dfs};
