use mec_graph::Pdag;
use mec_orient::ExtendedGraph;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn brute_alpha(g: &Pdag, v: usize) -> i64 {
    let nbrs: Vec<usize> = g.undirected_neighbors(v).collect();
    let mut count = 0;
    for (i, &x) in nbrs.iter().enumerate() {
        for &y in &nbrs[i + 1..] {
            if g.is_adjacent(x, y) {
                count += 1;
            }
        }
    }
    count
}

fn brute_beta(g: &Pdag, v: usize) -> i64 {
    let mut count = 0;
    for x in g.undirected_neighbors(v) {
        for y in g.directed_parents(v) {
            if g.is_adjacent(x, y) {
                count += 1;
            }
        }
    }
    count
}

fn brute_potential_sink(g: &Pdag, s: usize) -> bool {
    if g.directed_children(s).next().is_some() {
        return false;
    }
    let nbrs: Vec<usize> = g.undirected_neighbors(s).collect();
    for (i, &x) in nbrs.iter().enumerate() {
        for &y in &nbrs[i + 1..] {
            if !g.is_adjacent(x, y) {
                return false;
            }
        }
    }
    for p in g.directed_parents(s) {
        for &x in &nbrs {
            if !g.is_adjacent(p, x) {
                return false;
            }
        }
    }
    true
}

fn check_against_brute_force(eg: &ExtendedGraph) {
    let g = eg.graph();
    for v in 1..=g.n_vertices() {
        assert_eq!(eg.alpha(v), brute_alpha(g, v), "alpha desync at {v}");
        assert_eq!(eg.beta(v), brute_beta(g, v), "beta desync at {v}");
        assert_eq!(
            eg.is_potential_sink(v),
            brute_potential_sink(g, v),
            "sink test desync at {v}"
        );
    }
}

fn random_pdag(rng: &mut StdRng, n: usize, density: f64) -> Pdag {
    let mut g = Pdag::new(n);
    for u in 1..=n {
        for v in (u + 1)..=n {
            if !rng.gen_bool(density) {
                continue;
            }
            match rng.gen_range(0..3) {
                0 => g.add_undirected(u, v).unwrap(),
                1 => g.add_edge(u, v).unwrap(),
                _ => g.add_edge(v, u).unwrap(),
            }
        }
    }
    g
}

#[test]
fn counters_match_brute_force_after_build() {
    let mut rng = StdRng::seed_from_u64(11);
    for n in [4, 6, 9] {
        for _ in 0..40 {
            let g = random_pdag(&mut rng, n, 0.5);
            let eg = ExtendedGraph::new(&g);
            assert_eq!(eg.graph(), &g);
            check_against_brute_force(&eg);
        }
    }
}

#[test]
fn counters_survive_sink_elimination() {
    let mut rng = StdRng::seed_from_u64(23);
    for _ in 0..60 {
        let g = random_pdag(&mut rng, 8, 0.45);
        let mut eg = ExtendedGraph::new(&g);
        // Eliminate sinks greedily, re-verifying every counter after each
        // elimination; stops when no sink remains (non-extendable rest).
        loop {
            let sink = (1..=8).find(|&v| {
                eg.is_potential_sink(v) && !eg.graph().all_neighbors(v).is_empty()
            });
            let Some(s) = sink else { break };
            eg.eliminate(s);
            check_against_brute_force(&eg);
        }
    }
}

#[test]
fn dense_clique_counters() {
    // K5, all undirected: alpha[v] = C(4,2) pairs, every vertex a sink.
    let n = 5;
    let mut g = Pdag::new(n);
    for u in 1..=n {
        for v in (u + 1)..=n {
            g.add_undirected(u, v).unwrap();
        }
    }
    let eg = ExtendedGraph::new(&g);
    for v in 1..=n {
        assert_eq!(eg.alpha(v), 6);
        assert_eq!(eg.beta(v), 0);
        assert!(eg.is_potential_sink(v));
    }
}

#[test]
fn collider_vertex_is_still_a_sink() {
    // 1→2←3 with 1, 3 non-adjacent: vertex 2 has no undirected
    // neighbours, so the clique and predecessor conditions are vacuous.
    let mut g = Pdag::new(3);
    g.add_edge(1, 2).unwrap();
    g.add_edge(3, 2).unwrap();
    let eg = ExtendedGraph::new(&g);
    assert!(eg.is_potential_sink(2));
    assert!(!eg.is_potential_sink(1));
    assert!(!eg.is_potential_sink(3));
}
