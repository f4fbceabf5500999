#![deny(missing_docs)]

//! Core types shared across the MEC enumeration crates.
//!
//! The engine enumerates the directed acyclic graphs that are Markov
//! equivalent to a partially directed input. This crate holds what every
//! member crate needs: the structured error surface and the vertex
//! convention (vertices are `1..=n`, matching the on-disk graph format).

pub mod errors;

pub use errors::{ErrorInfo, MecError};

/// Vertex identifier. Graphs are 1-indexed; index 0 is never a vertex.
pub type Vertex = usize;
