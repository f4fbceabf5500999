use std::collections::BTreeSet;
use std::path::Path;

use mec_core::{MecError, Vertex};
use mec_graph::Pdag;
use num_bigint::BigUint;

use crate::emit::Emitter;
use crate::measure::Measurement;

/// Enumerates every DAG Markov equivalent to the CC/CPDAG input `g`:
/// every orientation of the undirected edges that creates neither a
/// cycle nor a new v-structure, with the directed edges of `g` copied
/// unchanged. Returns the tally; each DAG goes through `sink` and, when
/// `out_dir` is given, to `dag-<k>.txt` below it.
///
/// The enumeration runs a maximum-cardinality search simultaneously over
/// all chordal components, branching only where the search has a genuine
/// choice, which keeps the delay between consecutive outputs linear in
/// the size of the emitted graph. Output order is deterministic: the
/// candidate drawn from the top bucket is always its smallest vertex.
/// Recursion depth is bounded by the vertex count; callers running close
/// to `n = 2048` should give the thread commensurate stack headroom.
pub fn enumerate_cpdag(
    g: &Pdag,
    sink: &mut Measurement,
    out_dir: Option<&Path>,
) -> Result<BigUint, MecError> {
    let n = g.n_vertices();
    let mut mirror = Pdag::new(n);
    for (u, v) in g.undirected_edges() {
        mirror.insert_arc(u, v);
        mirror.insert_arc(v, u);
    }
    let mut emitter = Emitter::new(sink, out_dir)?;
    let mut buckets = CpdagBuckets::new(mirror, n);
    buckets.visit(g, &mut emitter)?;
    Ok(emitter.into_count())
}

/// Bucket state of the maximum-cardinality search.
///
/// `a[k]` holds the unvisited vertices whose label (number of visited
/// neighbours, offset by one) is `k`; `inv_a[v]` is the label of `v`,
/// negated once `v` is visited; `max_a` is the largest non-empty bucket.
/// `tau` is the ordering under construction, filled left to right at the
/// write cursor `i`. `set`/`reset` touch one bucket entry per neighbour,
/// so a visit costs time proportional to the vertex degree.
pub(crate) struct CpdagBuckets {
    c: Pdag,
    a: Vec<BTreeSet<Vertex>>,
    inv_a: Vec<i64>,
    tau: Vec<Vertex>,
    max_a: usize,
    i: usize,
    n: usize,
}

impl CpdagBuckets {
    fn new(c: Pdag, n: usize) -> Self {
        let mut a = vec![BTreeSet::new(); n + 2];
        a[1] = (1..=n).collect();
        Self {
            c,
            a,
            inv_a: vec![1; n + 1],
            tau: vec![0; n + 2],
            max_a: 1,
            i: 1,
            n,
        }
    }

    /// Marks `v` visited at cursor position `i`: removes it from its
    /// bucket, flips the label sign, appends it to `tau`, and promotes
    /// every unvisited neighbour one bucket up. Returns the previous
    /// `max_a` for the matching [`CpdagBuckets::reset`].
    fn set(&mut self, v: Vertex) -> usize {
        let saved = self.max_a;
        let label = self.inv_a[v];
        debug_assert!(label > 0, "set on a visited vertex");
        self.a[label as usize].remove(&v);
        self.inv_a[v] = -label;
        self.tau[self.i] = v;
        self.i += 1;
        let neighbors: Vec<Vertex> = self.c.in_neighbors(v).iter().copied().collect();
        for w in neighbors {
            let lw = self.inv_a[w];
            if lw > 0 {
                self.a[lw as usize].remove(&w);
                self.a[lw as usize + 1].insert(w);
                self.inv_a[w] = lw + 1;
            }
        }
        self.max_a += 1;
        while self.max_a > 0 && self.a[self.max_a].is_empty() {
            self.max_a -= 1;
        }
        saved
    }

    /// Exact inverse of [`CpdagBuckets::set`].
    fn reset(&mut self, v: Vertex, saved: usize) {
        let neighbors: Vec<Vertex> = self.c.in_neighbors(v).iter().copied().collect();
        for w in neighbors {
            let lw = self.inv_a[w];
            if lw > 0 {
                debug_assert!(lw > 1, "bucket underflow");
                self.a[lw as usize].remove(&w);
                self.a[lw as usize - 1].insert(w);
                self.inv_a[w] = lw - 1;
            }
        }
        self.i -= 1;
        self.tau[self.i] = 0;
        self.inv_a[v] = -self.inv_a[v];
        self.a[self.inv_a[v] as usize].insert(v);
        self.max_a = saved;
    }

    /// Unvisited vertices reachable from `v` through vertices currently
    /// in the top bucket, ascending. Computed on the pre-`set` state, so
    /// every member shares `v`'s label.
    fn reachable(&self, v: Vertex) -> Vec<Vertex> {
        let mut seen: BTreeSet<Vertex> = BTreeSet::from([v]);
        let mut queue = vec![v];
        while let Some(w) = queue.pop() {
            for &x in self.c.out_neighbors(w) {
                if self.inv_a[x] == self.max_a as i64 && seen.insert(x) {
                    queue.push(x);
                }
            }
        }
        seen.into_iter().collect()
    }

    fn visit(&mut self, g: &Pdag, emitter: &mut Emitter<'_>) -> Result<(), MecError> {
        if self.i > self.n {
            return emitter.emit(&orient_along(g, &positions(&self.tau, self.n)));
        }
        let v = *self.a[self.max_a]
            .first()
            .expect("top bucket holds a vertex while the ordering is incomplete");
        let saved = self.set(v);
        self.visit(g, emitter)?;
        self.reset(v, saved);

        for x in self.reachable(v) {
            if x == v {
                continue;
            }
            let saved = self.set(x);
            self.visit(g, emitter)?;
            self.reset(x, saved);
        }
        Ok(())
    }
}

/// Inverse of a complete ordering: `positions(tau, n)[v]` is the slot of
/// `v` in `tau`.
pub(crate) fn positions(tau: &[Vertex], n: usize) -> Vec<usize> {
    let mut pos = vec![0; n + 1];
    for idx in 1..=n {
        pos[tau[idx]] = idx;
    }
    pos
}

/// Copies `g` with every undirected edge oriented from the earlier to
/// the later endpoint of the ordering; directed edges pass through.
pub(crate) fn orient_along(g: &Pdag, pos: &[usize]) -> Pdag {
    let mut dag = g.clone();
    for (u, v) in g.undirected_edges() {
        if pos[u] < pos[v] {
            dag.remove_edge(v, u);
        } else {
            dag.remove_edge(u, v);
        }
    }
    dag
}
