use std::collections::BTreeSet;
use std::path::Path;

use mec_core::{MecError, Vertex};
use mec_graph::{undirected_components, Pdag};
use mec_orient::{is_extendable, meek_close};
use num_bigint::BigUint;
use num_traits::Zero;

use crate::cpdag::{orient_along, positions};
use crate::emit::Emitter;
use crate::measure::Measurement;

/// Enumerates every DAG Markov equivalent to `g` that also respects its
/// directed edges as background knowledge. Returns zero for inputs with
/// no consistent extension. Emission behaviour matches
/// [`crate::enumerate_cpdag`].
///
/// The input is first closed under the Meek rules, which turns it into
/// its maximally oriented form; the search then runs over the connected
/// components of the undirected subgraph, with a secondary bucket level
/// that keeps any vertex still owing an in-component directed
/// predecessor below every vertex owing none. The emitted orderings
/// therefore always respect the background directions.
pub fn enumerate_pdag(
    g: &Pdag,
    sink: &mut Measurement,
    out_dir: Option<&Path>,
) -> Result<BigUint, MecError> {
    if !is_extendable(g) {
        return Ok(BigUint::zero());
    }
    let mut h = g.clone();
    meek_close(&mut h);

    let n = h.n_vertices();
    let comp = undirected_components(&h);

    // Mirror of the in-component edges with everything bidirected, so the
    // sibling reachability step can also traverse background edges.
    let mut mirror = Pdag::new(n);
    let mut parents: Vec<Vec<Vertex>> = vec![Vec::new(); n + 1];
    let mut children: Vec<Vec<Vertex>> = vec![Vec::new(); n + 1];
    let mut undir: Vec<Vec<Vertex>> = vec![Vec::new(); n + 1];
    for (u, v) in h.edges() {
        if comp[u] != comp[v] {
            continue;
        }
        mirror.insert_arc(u, v);
        mirror.insert_arc(v, u);
        if h.is_directed(u, v) {
            parents[v].push(u);
            children[u].push(v);
        } else if u < v {
            undir[u].push(v);
            undir[v].push(u);
        }
    }

    let mut emitter = Emitter::new(sink, out_dir)?;
    let mut buckets = PdagBuckets::new(mirror, parents, children, undir, n);
    buckets.visit(&h, &mut emitter)?;
    Ok(emitter.into_count())
}

/// Bucket state of the background-aware maximum-cardinality search.
///
/// Labels live on a two-axis scale,
/// `2·(#visited undirected neighbours) + (1 if indeg == 0) + 1`, where
/// `indeg[v]` counts the unvisited in-component directed predecessors of
/// `v` (the pending portion of its `parents` set). Buckets span
/// `2(n+1)` slots. `set`/`reset` additionally move a child across the
/// in-degree-zero flag when its last pending predecessor is visited or
/// unwound.
struct PdagBuckets {
    c: Pdag,
    children: Vec<Vec<Vertex>>,
    undir: Vec<Vec<Vertex>>,
    indeg: Vec<usize>,
    a: Vec<BTreeSet<Vertex>>,
    inv_a: Vec<i64>,
    tau: Vec<Vertex>,
    max_a: usize,
    i: usize,
    n: usize,
}

impl PdagBuckets {
    fn new(
        c: Pdag,
        parents: Vec<Vec<Vertex>>,
        children: Vec<Vec<Vertex>>,
        undir: Vec<Vec<Vertex>>,
        n: usize,
    ) -> Self {
        let indeg: Vec<usize> = (0..=n).map(|v| parents[v].len()).collect();
        let mut a = vec![BTreeSet::new(); 2 * n + 4];
        let mut inv_a = vec![0i64; n + 1];
        for v in 1..=n {
            let label = 1 + i64::from(indeg[v] == 0);
            inv_a[v] = label;
            a[label as usize].insert(v);
        }
        Self {
            c,
            children,
            undir,
            indeg,
            a,
            inv_a,
            tau: vec![0; n + 2],
            max_a: 2,
            i: 1,
            n,
        }
    }

    fn move_bucket(&mut self, w: Vertex, delta: i64) {
        let lw = self.inv_a[w];
        self.a[lw as usize].remove(&w);
        self.a[(lw + delta) as usize].insert(w);
        self.inv_a[w] = lw + delta;
    }

    /// Marks `v` visited: promotes every unvisited undirected neighbour
    /// two buckets up, and every child whose pending in-degree hits zero
    /// one bucket up. Returns the previous `max_a`.
    fn set(&mut self, v: Vertex) -> usize {
        let saved = self.max_a;
        let label = self.inv_a[v];
        debug_assert!(label > 0, "set on a visited vertex");
        self.a[label as usize].remove(&v);
        self.inv_a[v] = -label;
        self.tau[self.i] = v;
        self.i += 1;
        for idx in 0..self.undir[v].len() {
            let w = self.undir[v][idx];
            if self.inv_a[w] > 0 {
                self.move_bucket(w, 2);
            }
        }
        for idx in 0..self.children[v].len() {
            let w = self.children[v][idx];
            // A child is never visited before its last predecessor.
            debug_assert!(self.inv_a[w] > 0);
            self.indeg[w] -= 1;
            if self.indeg[w] == 0 {
                self.move_bucket(w, 1);
            }
        }
        self.max_a += 2;
        while self.max_a > 0 && self.a[self.max_a].is_empty() {
            self.max_a -= 1;
        }
        saved
    }

    /// Exact inverse of [`PdagBuckets::set`].
    fn reset(&mut self, v: Vertex, saved: usize) {
        for idx in 0..self.undir[v].len() {
            let w = self.undir[v][idx];
            if self.inv_a[w] > 0 {
                debug_assert!(self.inv_a[w] > 2, "bucket underflow");
                self.move_bucket(w, -2);
            }
        }
        for idx in 0..self.children[v].len() {
            let w = self.children[v][idx];
            debug_assert!(self.inv_a[w] > 0);
            if self.indeg[w] == 0 {
                self.move_bucket(w, -1);
            }
            self.indeg[w] += 1;
        }
        self.i -= 1;
        self.tau[self.i] = 0;
        self.inv_a[v] = -self.inv_a[v];
        self.a[self.inv_a[v] as usize].insert(v);
        self.max_a = saved;
    }

    /// Unvisited vertices reachable from `v` through the top bucket,
    /// ascending; traversal may pass through bidirected background edges.
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

    fn visit(&mut self, h: &Pdag, emitter: &mut Emitter<'_>) -> Result<(), MecError> {
        if self.i > self.n {
            return emitter.emit(&orient_along(h, &positions(&self.tau, self.n)));
        }
        // The in-degree-zero flag makes labels of eligible vertices even;
        // a vertex with pending predecessors can never top the scale.
        debug_assert!(self.max_a % 2 == 0, "top bucket owes a predecessor");
        let v = *self.a[self.max_a]
            .first()
            .expect("top bucket holds a vertex while the ordering is incomplete");
        debug_assert_eq!(self.indeg[v], 0);
        let saved = self.set(v);
        self.visit(h, emitter)?;
        self.reset(v, saved);

        for x in self.reachable(v) {
            if x == v {
                continue;
            }
            let saved = self.set(x);
            self.visit(h, emitter)?;
            self.reset(x, saved);
        }
        Ok(())
    }
}
