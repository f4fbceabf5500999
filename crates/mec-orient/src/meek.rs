use mec_core::Vertex;
use mec_graph::Pdag;

/// Applies the four Meek orientation rules until no rule fires, turning a
/// PDAG into its maximally oriented form (MPDAG). Returns the number of
/// edges oriented.
///
/// Each pass scans the undirected edges in lexicographic order and tries
/// both orientations of each, so the fixpoint is reached deterministically.
/// Every application removes one arc, which bounds the number of passes by
/// the edge count.
pub fn meek_close(g: &mut Pdag) -> usize {
    let mut oriented = 0usize;
    loop {
        let mut changed = false;
        for (u, v) in g.undirected_edges() {
            for (x, y) in [(u, v), (v, u)] {
                if !g.is_undirected(x, y) {
                    continue;
                }
                if forces_orientation(g, x, y) {
                    g.orient(x, y);
                    oriented += 1;
                    changed = true;
                }
            }
        }
        if !changed {
            return oriented;
        }
    }
}

/// Whether some rule forces the undirected edge `{x, y}` into `x→y`.
fn forces_orientation(g: &Pdag, x: Vertex, y: Vertex) -> bool {
    rule1(g, x, y) || rule2(g, x, y) || rule3(g, x, y) || rule4(g, x, y)
}

// R1: a→x, x—y, a and y non-adjacent orients x→y.
fn rule1(g: &Pdag, x: Vertex, y: Vertex) -> bool {
    g.directed_parents(x).any(|a| a != y && !g.is_adjacent(a, y))
}

// R2: x→b→y with x—y orients x→y.
fn rule2(g: &Pdag, x: Vertex, y: Vertex) -> bool {
    g.directed_children(x).any(|b| g.is_directed(b, y))
}

// R3: x—b, x—d, b→y, d→y with b, d non-adjacent orients x→y.
fn rule3(g: &Pdag, x: Vertex, y: Vertex) -> bool {
    let into_y: Vec<Vertex> = g
        .undirected_neighbors(x)
        .filter(|&b| g.is_directed(b, y))
        .collect();
    for (i, &b) in into_y.iter().enumerate() {
        for &d in &into_y[i + 1..] {
            if !g.is_adjacent(b, d) {
                return true;
            }
        }
    }
    false
}

// R4: x—c, x—d, d→c→y, y and d non-adjacent orients x→y.
fn rule4(g: &Pdag, x: Vertex, y: Vertex) -> bool {
    for c in g.undirected_neighbors(x) {
        if !g.is_directed(c, y) {
            continue;
        }
        for d in g.undirected_neighbors(x) {
            if d != y && g.is_directed(d, c) && !g.is_adjacent(d, y) {
                return true;
            }
        }
    }
    false
}
