use mec_core::Vertex;
use mec_graph::Pdag;

/// Working state of the sink-elimination extension engine.
///
/// Wraps a copy of the input graph together with six per-vertex counters
/// that keep the *potential sink* test O(1):
///
/// - `out_dir`/`in_dir`: directed out/in degree;
/// - `out_undir`/`in_undir`: undirected degree (an undirected edge
///   contributes to both at each endpoint, so the two stay equal);
/// - `alpha[v]`: pairs of undirected neighbours of `v` that are
///   themselves adjacent;
/// - `beta[v]`: pairs `(x, y)` with `v—x` undirected, `y→v` directed
///   and `x` adjacent to `y`.
///
/// A vertex `s` is a potential sink exactly when `out_dir[s] == 0`,
/// `alpha[s] == C(out_undir[s], 2)` and
/// `beta[s] == out_undir[s] · in_dir[s]`: no outgoing directed edge, the
/// undirected neighbourhood is a clique, and every directed predecessor
/// is adjacent to every undirected neighbour.
#[derive(Debug, Clone)]
pub struct ExtendedGraph {
    g: Pdag,
    out_dir: Vec<i64>,
    in_dir: Vec<i64>,
    out_undir: Vec<i64>,
    in_undir: Vec<i64>,
    alpha: Vec<i64>,
    beta: Vec<i64>,
}

impl ExtendedGraph {
    /// Builds the counter state for `source` by inserting its edges one
    /// unordered pair at a time into an initially edgeless working copy.
    pub fn new(source: &Pdag) -> Self {
        let n = source.n_vertices();
        let mut eg = Self {
            g: Pdag::new(n),
            out_dir: vec![0; n + 1],
            in_dir: vec![0; n + 1],
            out_undir: vec![0; n + 1],
            in_undir: vec![0; n + 1],
            alpha: vec![0; n + 1],
            beta: vec![0; n + 1],
        };
        for v in 1..=n {
            for adj in source.all_neighbors(v) {
                if adj >= v {
                    break;
                }
                if source.is_undirected(adj, v) {
                    eg.insert_undirected(adj, v);
                } else if source.has_edge(adj, v) {
                    eg.insert_directed(adj, v);
                } else {
                    eg.insert_directed(v, adj);
                }
            }
        }
        eg
    }

    /// The working graph in its current, partially eliminated state.
    pub fn graph(&self) -> &Pdag {
        &self.g
    }

    /// Current `alpha` counter of `v`.
    pub fn alpha(&self, v: Vertex) -> i64 {
        self.alpha[v]
    }

    /// Current `beta` counter of `v`.
    pub fn beta(&self, v: Vertex) -> i64 {
        self.beta[v]
    }

    /// O(1) potential-sink test from the maintained counters.
    pub fn is_potential_sink(&self, s: Vertex) -> bool {
        self.out_dir[s] == 0
            && self.alpha[s] == self.out_undir[s] * (self.out_undir[s] - 1) / 2
            && self.beta[s] == self.out_undir[s] * self.in_dir[s]
    }

    fn insert_undirected(&mut self, u: Vertex, v: Vertex) {
        self.g.insert_arc(u, v);
        self.g.insert_arc(v, u);
        self.out_undir[u] += 1;
        self.in_undir[u] += 1;
        self.out_undir[v] += 1;
        self.in_undir[v] += 1;
        self.update_pair_counters(u, v, 1, false);
    }

    fn insert_directed(&mut self, tail: Vertex, head: Vertex) {
        self.g.insert_arc(tail, head);
        self.out_dir[tail] += 1;
        self.in_dir[head] += 1;
        self.update_pair_counters(tail, head, 1, true);
    }

    /// Adjusts `alpha`/`beta` for inserting (`val = 1`) or deleting
    /// (`val = -1`) the edge between `u` and `v`, by scanning their
    /// common neighbourhood. The edge itself must be present in the
    /// working graph on both sides of the call; the cases never inspect
    /// the `u`–`v` arcs, so insertion updates after the arc lands and
    /// deletion updates before it is removed.
    fn update_pair_counters(&mut self, u: Vertex, v: Vertex, val: i64, uv_directed: bool) {
        let common: Vec<Vertex> = self
            .g
            .all_neighbors(u)
            .into_iter()
            .filter(|&x| x != v && self.g.is_adjacent(v, x))
            .collect();
        for x in common {
            let ux = self.g.is_undirected(u, x);
            let vx = self.g.is_undirected(v, x);
            if !uv_directed {
                if ux {
                    self.alpha[u] += val;
                }
                if !self.g.has_edge(u, x) && self.g.has_edge(x, u) {
                    self.beta[u] += val;
                }
                if vx {
                    self.alpha[v] += val;
                }
                if self.g.has_edge(x, v) && !self.g.has_edge(v, x) {
                    self.beta[v] += val;
                }
            } else if vx {
                self.beta[v] += val;
            }
            if ux && vx {
                self.alpha[x] += val;
            }
            if vx && self.g.has_edge(u, x) && !self.g.has_edge(x, u) {
                self.beta[x] += val;
            }
            if ux && !self.g.has_edge(x, v) && self.g.has_edge(v, x) {
                self.beta[x] += val;
            }
        }
    }

    /// Removes every edge incident to the potential sink `s`, keeping all
    /// counters of the remaining vertices exact. Directed predecessors go
    /// first, then the undirected edges at `s`.
    pub fn eliminate(&mut self, s: Vertex) {
        debug_assert!(self.is_potential_sink(s));
        let preds: Vec<Vertex> = self.g.directed_parents(s).collect();
        for p in preds {
            self.update_pair_counters(p, s, -1, true);
            self.g.remove_edge(p, s);
            self.out_dir[p] -= 1;
            self.in_dir[s] -= 1;
        }
        let undirected: Vec<Vertex> = self.g.undirected_neighbors(s).collect();
        for u in undirected {
            self.update_pair_counters(s, u, -1, false);
            self.g.remove_edge(s, u);
            self.g.remove_edge(u, s);
            self.out_undir[s] -= 1;
            self.in_undir[s] -= 1;
            self.out_undir[u] -= 1;
            self.in_undir[u] -= 1;
        }
        debug_assert_eq!(self.in_dir[s], 0);
        debug_assert_eq!(self.out_undir[s], 0);
        debug_assert_eq!(self.alpha[s], 0);
        debug_assert_eq!(self.beta[s], 0);
    }
}

/// Runs sink elimination to completion. When `mirror` is supplied, every
/// popped sink `s` orients the mirror's undirected edges at `s` into `s`
/// by dropping the `s→u` arcs for the current out-neighbours of `s`.
/// Returns whether the working graph was fully consumed.
fn eliminate_all(eg: &mut ExtendedGraph, mut mirror: Option<&mut Pdag>) -> bool {
    let n = eg.g.n_vertices();
    let mut listed = vec![false; n + 1];
    let mut stack: Vec<Vertex> = Vec::new();
    for v in 1..=n {
        if eg.is_potential_sink(v) {
            listed[v] = true;
            stack.push(v);
        }
    }
    // LIFO over the working stack: seeded ascending, so the first pops
    // run from the largest initial sink downwards. The order does not
    // affect extendability, but it does pick which extension comes out.
    while let Some(s) = stack.pop() {
        if let Some(d) = mirror.as_deref_mut() {
            let outs: Vec<Vertex> = eg.g.out_neighbors(s).iter().copied().collect();
            for u in outs {
                d.remove_edge(s, u);
            }
        }
        let neighbors = eg.g.all_neighbors(s);
        eg.eliminate(s);
        for w in neighbors {
            if !listed[w] && eg.is_potential_sink(w) {
                listed[w] = true;
                stack.push(w);
            }
        }
    }
    eg.g.is_edgeless()
}

/// Whether `g` admits a consistent DAG extension.
pub fn is_extendable(g: &Pdag) -> bool {
    let mut eg = ExtendedGraph::new(g);
    eliminate_all(&mut eg, None)
}

/// Produces a consistent DAG extension of `g`, or `None` when there is
/// none. Which extension comes out is fixed by the LIFO elimination
/// order, so repeated calls agree.
pub fn extend(g: &Pdag) -> Option<Pdag> {
    let mut eg = ExtendedGraph::new(g);
    let mut d = g.clone();
    if eliminate_all(&mut eg, Some(&mut d)) {
        Some(d)
    } else {
        None
    }
}
