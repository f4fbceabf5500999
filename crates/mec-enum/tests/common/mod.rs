#![allow(dead_code)]

use std::collections::BTreeSet;
use std::path::Path;

use mec_enum::{MeasureOpts, Measurement};
use mec_graph::{
    canonical_hash, is_acyclic, read_graph_file, skeleton_edges, v_structures, Pdag,
};
use mec_orient::meek_close;
use rand::rngs::StdRng;
use rand::Rng;

pub fn sink() -> Measurement {
    Measurement::new(&MeasureOpts::default()).unwrap()
}

pub fn undirected(n: usize, edges: &[(usize, usize)]) -> Pdag {
    let mut g = Pdag::new(n);
    for &(u, v) in edges {
        g.add_undirected(u, v).unwrap();
    }
    g
}

pub fn triangle() -> Pdag {
    undirected(3, &[(1, 2), (2, 3), (1, 3)])
}

pub fn path4() -> Pdag {
    undirected(4, &[(1, 2), (2, 3), (3, 4)])
}

pub fn complete(n: usize) -> Pdag {
    let mut g = Pdag::new(n);
    for u in 1..=n {
        for v in (u + 1)..=n {
            g.add_undirected(u, v).unwrap();
        }
    }
    g
}

pub fn two_triangles() -> Pdag {
    undirected(6, &[(1, 2), (2, 3), (1, 3), (4, 5), (5, 6), (4, 6)])
}

/// 1→2, 2→3, 1—3: Meek R2 forces the last edge.
pub fn forced_triangle() -> Pdag {
    let mut g = Pdag::new(3);
    g.add_edge(1, 2).unwrap();
    g.add_edge(2, 3).unwrap();
    g.add_undirected(1, 3).unwrap();
    g
}

/// 1→2, 3→2 shielded by 1—3: both orientations of the shield are open.
pub fn shielded_collider() -> Pdag {
    let mut g = Pdag::new(3);
    g.add_edge(1, 2).unwrap();
    g.add_edge(3, 2).unwrap();
    g.add_undirected(1, 3).unwrap();
    g
}

/// Random DAG: edges sampled between vertex pairs, oriented along the
/// identity order so acyclicity is free.
pub fn random_dag(rng: &mut StdRng, n: usize, density: f64) -> Pdag {
    let mut d = Pdag::new(n);
    for u in 1..=n {
        for v in (u + 1)..=n {
            if rng.gen_bool(density) {
                d.add_edge(u, v).unwrap();
            }
        }
    }
    d
}

/// Pattern of a DAG: skeleton undirected except for v-structure arcs,
/// closed under the Meek rules. For a DAG this is its CPDAG.
pub fn pattern_of(d: &Pdag) -> Pdag {
    let mut pattern = Pdag::new(d.n_vertices());
    for (u, v) in skeleton_edges(d) {
        pattern.add_undirected(u, v).unwrap();
    }
    for (a, b, c) in v_structures(d) {
        if pattern.is_undirected(a, b) {
            pattern.orient(a, b);
        }
        if pattern.is_undirected(c, b) {
            pattern.orient(c, b);
        }
    }
    meek_close(&mut pattern);
    pattern
}

/// Reads back the `dag-<k>.txt` files of one enumeration run, in
/// emission order.
pub fn collect_emitted(dir: &Path, count: usize) -> Vec<Pdag> {
    (1..=count)
        .map(|k| read_graph_file(&dir.join(format!("dag-{k}.txt")), false).unwrap())
        .collect()
}

/// Reference result: every orientation of the undirected edges of `g`
/// that is acyclic and reproduces the v-structures of `g`, as canonical
/// hashes. Exponential in the undirected edge count; test-sized inputs
/// only.
pub fn reference_class(g: &Pdag) -> BTreeSet<String> {
    let free = g.undirected_edges();
    assert!(free.len() < 20, "reference enumeration too large");
    let target = v_structures(g);
    let mut out = BTreeSet::new();
    for mask in 0u32..(1 << free.len()) {
        let mut d = g.clone();
        for (bit, &(u, v)) in free.iter().enumerate() {
            if mask & (1 << bit) != 0 {
                d.orient(u, v);
            } else {
                d.orient(v, u);
            }
        }
        if is_acyclic(&d) && v_structures(&d) == target {
            out.insert(canonical_hash(&d));
        }
    }
    out
}
