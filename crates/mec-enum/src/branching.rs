use std::path::Path;

use mec_core::{MecError, Vertex};
use mec_graph::Pdag;
use mec_orient::{is_extendable, meek_close};
use num_bigint::BigUint;
use num_traits::Zero;

use crate::emit::Emitter;
use crate::measure::Measurement;

/// Enumerates the class of `g` by branching: close under the Meek rules,
/// pick the first remaining undirected edge, recurse with it oriented
/// each way. Emission behaviour matches [`crate::enumerate_cpdag`].
///
/// With `skip_check` unset the input is first tested for a consistent
/// extension and a zero count is returned when there is none; setting it
/// trusts the caller and saves the test, e.g. when the input is known to
/// be a CPDAG. Recursion depth is bounded by the number of undirected
/// edges, each frame holding one working copy.
pub fn enumerate_meek(
    g: &Pdag,
    sink: &mut Measurement,
    out_dir: Option<&Path>,
    skip_check: bool,
) -> Result<BigUint, MecError> {
    if !skip_check && !is_extendable(g) {
        return Ok(BigUint::zero());
    }
    let mut emitter = Emitter::new(sink, out_dir)?;
    branch(g.clone(), 1, &mut emitter)?;
    Ok(emitter.into_count())
}

fn branch(mut g: Pdag, last: usize, emitter: &mut Emitter<'_>) -> Result<(), MecError> {
    meek_close(&mut g);
    // Closure only removes arcs, so pairs below the previous pivot stay
    // fully oriented; the scan resumes at its smaller endpoint.
    match first_undirected_from(&g, last) {
        None => emitter.emit(&g),
        Some((u, v)) => {
            let mut forward = g.clone();
            forward.orient(u, v);
            branch(forward, u, emitter)?;
            g.orient(v, u);
            branch(g, u, emitter)
        }
    }
}

fn first_undirected_from(g: &Pdag, last: usize) -> Option<(Vertex, Vertex)> {
    for u in last..=g.n_vertices() {
        for &v in g.out_neighbors(u) {
            if v > u && g.has_edge(v, u) {
                return Some((u, v));
            }
        }
    }
    None
}
