use sha2::{Digest, Sha256};

use crate::pdag::Pdag;

/// Fixed-size fingerprint of a graph's arc set.
pub type Fingerprint = [u8; 32];

/// Computes a canonical fingerprint of the graph: Sha256 over the vertex
/// count and the sorted arc list, length-prefixed. Two graphs share a
/// fingerprint exactly when they have the same vertex count and arc set,
/// so fingerprints stand in for whole edge lists in visited sets and
/// memo tables.
pub fn edge_fingerprint(g: &Pdag) -> Fingerprint {
    let mut hasher = Sha256::new();
    hasher.update((g.n_vertices() as u64).to_le_bytes());
    let edges = g.edges();
    hasher.update((edges.len() as u64).to_le_bytes());
    for (u, v) in edges {
        hasher.update((u as u64).to_le_bytes());
        hasher.update((v as u64).to_le_bytes());
    }
    hasher.finalize().into()
}

/// Hex form of [`edge_fingerprint`], for reports and memo keys.
pub fn canonical_hash(g: &Pdag) -> String {
    let digest = edge_fingerprint(g);
    let mut out = String::with_capacity(64);
    for byte in digest {
        out.push_str(&format!("{byte:02x}"));
    }
    out
}
