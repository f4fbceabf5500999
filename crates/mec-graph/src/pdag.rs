use std::collections::BTreeSet;

use mec_core::{ErrorInfo, MecError, Vertex};

fn graph_error(code: &str, message: impl Into<String>) -> MecError {
    MecError::Graph(ErrorInfo::new(code, message))
}

/// Partially directed graph over vertices `1..=n`.
///
/// Every edge is stored as directed arcs: the undirected edge `{u, v}`
/// is the pair `u→v`, `v→u`; the directed edge `u→v` is the single arc.
/// Forward and backward adjacency are kept in lockstep: `v ∈ fwd[u]`
/// exactly when `u ∈ bwd[v]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pdag {
    n: usize,
    fwd: Vec<BTreeSet<Vertex>>,
    bwd: Vec<BTreeSet<Vertex>>,
    arcs: usize,
}

impl Pdag {
    /// Creates an edgeless graph on `n` vertices.
    pub fn new(n: usize) -> Self {
        Self {
            n,
            fwd: vec![BTreeSet::new(); n + 1],
            bwd: vec![BTreeSet::new(); n + 1],
            arcs: 0,
        }
    }

    /// Number of vertices.
    pub fn n_vertices(&self) -> usize {
        self.n
    }

    /// Number of stored arcs. An undirected edge counts twice.
    pub fn arc_count(&self) -> usize {
        self.arcs
    }

    /// Whether the graph has no arcs at all.
    pub fn is_edgeless(&self) -> bool {
        self.arcs == 0
    }

    fn check_endpoint(&self, v: Vertex) -> Result<(), MecError> {
        if v == 0 || v > self.n {
            return Err(graph_error("unknown-vertex", "vertex out of range")
                .map_context(|info| info.with_context("vertex", v).with_context("n", self.n)));
        }
        Ok(())
    }

    /// Inserts the arc `u→v`. Inserting an existing arc is a no-op.
    pub fn add_edge(&mut self, u: Vertex, v: Vertex) -> Result<(), MecError> {
        self.check_endpoint(u)?;
        self.check_endpoint(v)?;
        if u == v {
            return Err(graph_error("self-loop", "self loops are not allowed")
                .map_context(|info| info.with_context("vertex", u)));
        }
        self.insert_arc(u, v);
        Ok(())
    }

    /// Unchecked arc insertion for algorithm internals operating on
    /// already-validated vertices. Returns whether the arc was new.
    pub fn insert_arc(&mut self, u: Vertex, v: Vertex) -> bool {
        debug_assert!(u >= 1 && u <= self.n && v >= 1 && v <= self.n && u != v);
        if self.fwd[u].insert(v) {
            self.bwd[v].insert(u);
            self.arcs += 1;
            true
        } else {
            false
        }
    }

    /// Inserts the undirected edge `{u, v}` (both arcs).
    pub fn add_undirected(&mut self, u: Vertex, v: Vertex) -> Result<(), MecError> {
        self.add_edge(u, v)?;
        self.add_edge(v, u)
    }

    /// Removes the arc `u→v` if present.
    pub fn remove_edge(&mut self, u: Vertex, v: Vertex) {
        debug_assert!(u >= 1 && u <= self.n && v >= 1 && v <= self.n);
        if self.fwd[u].remove(&v) {
            self.bwd[v].remove(&u);
            self.arcs -= 1;
        }
    }

    /// Whether the arc `u→v` is present.
    pub fn has_edge(&self, u: Vertex, v: Vertex) -> bool {
        debug_assert!(u >= 1 && u <= self.n && v >= 1 && v <= self.n);
        self.fwd[u].contains(&v)
    }

    /// Whether `u→v` is a directed edge: the arc exists, its reverse does not.
    pub fn is_directed(&self, u: Vertex, v: Vertex) -> bool {
        self.has_edge(u, v) && !self.has_edge(v, u)
    }

    /// Whether `{u, v}` is an undirected edge: both arcs exist.
    pub fn is_undirected(&self, u: Vertex, v: Vertex) -> bool {
        self.has_edge(u, v) && self.has_edge(v, u)
    }

    /// Whether `u` and `v` are adjacent in any way.
    pub fn is_adjacent(&self, u: Vertex, v: Vertex) -> bool {
        self.has_edge(u, v) || self.has_edge(v, u)
    }

    /// Out-neighbours of `v` (arc targets), ascending.
    pub fn out_neighbors(&self, v: Vertex) -> &BTreeSet<Vertex> {
        debug_assert!(v >= 1 && v <= self.n);
        &self.fwd[v]
    }

    /// In-neighbours of `v` (arc sources), ascending.
    pub fn in_neighbors(&self, v: Vertex) -> &BTreeSet<Vertex> {
        debug_assert!(v >= 1 && v <= self.n);
        &self.bwd[v]
    }

    /// Union of in- and out-neighbours, ascending.
    pub fn all_neighbors(&self, v: Vertex) -> BTreeSet<Vertex> {
        let mut set = self.fwd[v].clone();
        set.extend(self.bwd[v].iter().copied());
        set
    }

    /// Neighbours joined to `v` by an undirected edge, ascending.
    pub fn undirected_neighbors(&self, v: Vertex) -> impl Iterator<Item = Vertex> + '_ {
        self.fwd[v]
            .iter()
            .copied()
            .filter(move |&w| self.bwd[v].contains(&w))
    }

    /// Sources of directed edges into `v`, ascending.
    pub fn directed_parents(&self, v: Vertex) -> impl Iterator<Item = Vertex> + '_ {
        self.bwd[v]
            .iter()
            .copied()
            .filter(move |&w| !self.fwd[v].contains(&w))
    }

    /// Targets of directed edges out of `v`, ascending.
    pub fn directed_children(&self, v: Vertex) -> impl Iterator<Item = Vertex> + '_ {
        self.fwd[v]
            .iter()
            .copied()
            .filter(move |&w| !self.bwd[v].contains(&w))
    }

    /// All arcs `(u, v)` in lexicographic order.
    pub fn edges(&self) -> Vec<(Vertex, Vertex)> {
        let mut out = Vec::with_capacity(self.arcs);
        for u in 1..=self.n {
            for &v in &self.fwd[u] {
                out.push((u, v));
            }
        }
        out
    }

    /// Undirected edges as pairs `(u, v)` with `u < v`, lexicographic.
    pub fn undirected_edges(&self) -> Vec<(Vertex, Vertex)> {
        let mut out = Vec::new();
        for u in 1..=self.n {
            for &v in &self.fwd[u] {
                if v > u && self.bwd[u].contains(&v) {
                    out.push((u, v));
                }
            }
        }
        out
    }

    /// Turns the undirected edge `{u, v}` into the directed edge `u→v`
    /// by dropping the reverse arc.
    pub fn orient(&mut self, u: Vertex, v: Vertex) {
        debug_assert!(self.is_undirected(u, v));
        self.remove_edge(v, u);
    }
}

trait ContextExt {
    fn map_context(self, apply: impl FnOnce(ErrorInfo) -> ErrorInfo) -> MecError;
}

impl ContextExt for MecError {
    fn map_context(self, apply: impl FnOnce(ErrorInfo) -> ErrorInfo) -> MecError {
        match self {
            MecError::Graph(info) => MecError::Graph(apply(info)),
            other => other,
        }
    }
}
