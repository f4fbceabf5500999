#![deny(missing_docs)]

//! Deterministic partially directed graph primitive for the MEC engine.
//!
//! A partially directed graph (PDAG) stores every edge as directed arcs:
//! an undirected edge `{u, v}` is the arc pair `u→v` plus `v→u`, a
//! directed edge `u→v` is the arc `u→v` alone. Adjacency lives in
//! `BTreeSet`s so membership is `O(log d)` and every iteration order is
//! deterministic, which the enumerators rely on for reproducible output.

mod analysis;
mod hash;
mod io;
mod pdag;

pub use analysis::{is_acyclic, skeleton_edges, undirected_components, v_structures};
pub use hash::{canonical_hash, edge_fingerprint, Fingerprint};
pub use io::{parse_graph, read_graph_file, render_graph, write_dag_file};
pub use pdag::Pdag;
