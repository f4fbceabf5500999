use std::collections::BTreeMap;

use mec_core::Vertex;
use mec_graph::{canonical_hash, undirected_components, Pdag};
use mec_orient::meek_close;
use num_bigint::BigUint;
use num_traits::{One, Zero};

/// Size of the Markov equivalence class of a CC/CPDAG input, computed
/// without enumerating: the product over the undirected components of a
/// root-picking recursion. Each member of a connected chordal component
/// has a unique source vertex, so the component count is the sum over
/// candidate roots of the count of the graph re-closed with all edges
/// leaving that root; the remaining undirected components recurse.
///
/// Independent of the enumeration machinery apart from the Meek closure,
/// which makes it the cross-check of choice for the enumerators' tallies.
/// Intermediate components are memoised on canonical fingerprints.
pub fn mec_size(g: &Pdag) -> BigUint {
    let mut memo: BTreeMap<String, BigUint> = BTreeMap::new();
    component_product(g, &mut memo)
}

/// Product of the rooted counts over the undirected components of `g`.
fn component_product(g: &Pdag, memo: &mut BTreeMap<String, BigUint>) -> BigUint {
    let comp = undirected_components(g);
    let n = g.n_vertices();
    let mut members: BTreeMap<usize, Vec<Vertex>> = BTreeMap::new();
    for v in 1..=n {
        members.entry(comp[v]).or_default().push(v);
    }
    let mut total = BigUint::one();
    for vertices in members.values() {
        if vertices.len() < 2 {
            continue;
        }
        total *= count_component(&induced_undirected(g, vertices), memo);
    }
    total
}

/// Count for one connected, fully undirected chordal component.
fn count_component(sub: &Pdag, memo: &mut BTreeMap<String, BigUint>) -> BigUint {
    let key = canonical_hash(sub);
    if let Some(hit) = memo.get(&key) {
        return hit.clone();
    }
    let mut total = BigUint::zero();
    for root in 1..=sub.n_vertices() {
        let mut rooted = sub.clone();
        let spokes: Vec<Vertex> = rooted.undirected_neighbors(root).collect();
        for w in spokes {
            rooted.orient(root, w);
        }
        meek_close(&mut rooted);
        total += component_product(&rooted, memo);
    }
    memo.insert(key, total.clone());
    total
}

/// Induced subgraph on `vertices`, undirected edges only, relabelled to
/// `1..=k` preserving the vertex order.
fn induced_undirected(g: &Pdag, vertices: &[Vertex]) -> Pdag {
    let mut index: BTreeMap<Vertex, Vertex> = BTreeMap::new();
    for (idx, &v) in vertices.iter().enumerate() {
        index.insert(v, idx + 1);
    }
    let mut sub = Pdag::new(vertices.len());
    for &v in vertices {
        for w in g.undirected_neighbors(v) {
            if w > v {
                if let Some(&wi) = index.get(&w) {
                    sub.insert_arc(index[&v], wi);
                    sub.insert_arc(wi, index[&v]);
                }
            }
        }
    }
    sub
}
