use std::collections::BTreeSet;
use std::path::Path;

use mec_core::{MecError, Vertex};
use mec_graph::{edge_fingerprint, Fingerprint, Pdag};
use mec_orient::extend;
use num_bigint::BigUint;
use num_traits::Zero;

use crate::emit::Emitter;
use crate::measure::Measurement;

/// Enumerates the class of `g` by walking covered-edge reversals from a
/// seed extension; every member is reachable by reversing one covered
/// edge at a time. Returns zero when `g` has no consistent extension.
/// Emission behaviour matches [`crate::enumerate_cpdag`].
///
/// The walk deduplicates on canonical edge-set fingerprints, so it holds
/// one 32-byte entry per class member; for large classes pair it with
/// the sink's emission cap.
pub fn enumerate_chickering(
    g: &Pdag,
    sink: &mut Measurement,
    out_dir: Option<&Path>,
) -> Result<BigUint, MecError> {
    let Some(mut d) = extend(g) else {
        return Ok(BigUint::zero());
    };
    let mut emitter = Emitter::new(sink, out_dir)?;
    let mut visited = BTreeSet::from([edge_fingerprint(&d)]);
    walk(&mut d, g, &mut visited, &mut emitter, None)?;
    Ok(emitter.into_count())
}

/// Same traversal as [`enumerate_chickering`], but emitting on entry at
/// even depth and on exit at odd depth. Consecutive outputs then differ
/// in at most three directed edges.
pub fn enumerate_dfs(
    g: &Pdag,
    sink: &mut Measurement,
    out_dir: Option<&Path>,
) -> Result<BigUint, MecError> {
    let Some(mut d) = extend(g) else {
        return Ok(BigUint::zero());
    };
    let mut emitter = Emitter::new(sink, out_dir)?;
    let mut visited = BTreeSet::from([edge_fingerprint(&d)]);
    walk(&mut d, g, &mut visited, &mut emitter, Some(0))?;
    Ok(emitter.into_count())
}

/// One traversal for both variants: `depth = None` emits every node on
/// entry; `depth = Some(k)` alternates entry/exit emission by parity.
fn walk(
    d: &mut Pdag,
    g: &Pdag,
    visited: &mut BTreeSet<Fingerprint>,
    emitter: &mut Emitter<'_>,
    depth: Option<usize>,
) -> Result<(), MecError> {
    match depth {
        None | Some(0) => emitter.emit(d)?,
        Some(k) if k % 2 == 0 => emitter.emit(d)?,
        _ => {}
    }
    for (x, y) in covered_edges(d, g) {
        d.remove_edge(x, y);
        d.insert_arc(y, x);
        if visited.insert(edge_fingerprint(d)) {
            walk(d, g, visited, emitter, depth.map(|k| k + 1))?;
        }
        d.remove_edge(y, x);
        d.insert_arc(x, y);
    }
    if let Some(k) = depth {
        if k % 2 == 1 {
            emitter.emit(d)?;
        }
    }
    Ok(())
}

/// Covered edges of `d` that were undirected in `g`: arcs `x→y` with
/// `parents(x) = parents(y) \ {x}`. Reversing one preserves acyclicity
/// and the v-structures, and restricting to edges free in `g` keeps the
/// background directions intact.
fn covered_edges(d: &Pdag, g: &Pdag) -> Vec<(Vertex, Vertex)> {
    let mut out = Vec::new();
    for (x, y) in d.edges() {
        if !g.is_undirected(x, y) {
            continue;
        }
        let px = d.in_neighbors(x);
        let py = d.in_neighbors(y);
        if py.len() != px.len() + 1 || !py.contains(&x) {
            continue;
        }
        if px.iter().all(|p| py.contains(p)) {
            out.push((x, y));
        }
    }
    out
}
