mod common;

use common::*;
use mec_enum::{enumerate_cpdag, enumerate_meek, enumerate_pdag};
use num_bigint::BigUint;
use num_traits::Zero;

#[test]
fn triangle_has_six_members() {
    let g = triangle();
    assert_eq!(
        enumerate_cpdag(&g, &mut sink(), None).unwrap(),
        BigUint::from(6u32)
    );
    assert_eq!(
        enumerate_pdag(&g, &mut sink(), None).unwrap(),
        BigUint::from(6u32)
    );
    assert_eq!(
        enumerate_meek(&g, &mut sink(), None, false).unwrap(),
        BigUint::from(6u32)
    );
}

#[test]
fn forced_triangle_has_one_member() {
    let g = forced_triangle();
    assert_eq!(
        enumerate_pdag(&g, &mut sink(), None).unwrap(),
        BigUint::from(1u32)
    );
    assert_eq!(
        enumerate_meek(&g, &mut sink(), None, false).unwrap(),
        BigUint::from(1u32)
    );
}

#[test]
fn path_has_four_members() {
    let g = path4();
    assert_eq!(
        enumerate_cpdag(&g, &mut sink(), None).unwrap(),
        BigUint::from(4u32)
    );
}

#[test]
fn shielded_collider_keeps_both_shield_orientations() {
    let g = shielded_collider();
    let reference = reference_class(&g);
    assert_eq!(reference.len(), 2);
    assert_eq!(
        enumerate_pdag(&g, &mut sink(), None).unwrap(),
        BigUint::from(2u32)
    );
    assert_eq!(
        enumerate_meek(&g, &mut sink(), None, false).unwrap(),
        BigUint::from(2u32)
    );
}

#[test]
fn complete_graph_counts_factorially() {
    assert_eq!(
        enumerate_cpdag(&complete(4), &mut sink(), None).unwrap(),
        BigUint::from(24u32)
    );
    assert_eq!(
        enumerate_pdag(&complete(4), &mut sink(), None).unwrap(),
        BigUint::from(24u32)
    );
}

#[test]
fn disconnected_components_multiply() {
    let g = two_triangles();
    assert_eq!(
        enumerate_cpdag(&g, &mut sink(), None).unwrap(),
        BigUint::from(36u32)
    );
    assert_eq!(
        enumerate_meek(&g, &mut sink(), None, false).unwrap(),
        BigUint::from(36u32)
    );
}

#[test]
fn inconsistent_inputs_count_zero() {
    // Chordless square: every acyclic orientation introduces a collider.
    let square = undirected(4, &[(1, 2), (2, 3), (3, 4), (1, 4)]);
    assert!(reference_class(&square).is_empty());
    assert!(enumerate_pdag(&square, &mut sink(), None)
        .unwrap()
        .is_zero());
    assert!(enumerate_meek(&square, &mut sink(), None, false)
        .unwrap()
        .is_zero());

    let mut cycle = mec_graph::Pdag::new(3);
    cycle.add_edge(1, 2).unwrap();
    cycle.add_edge(2, 3).unwrap();
    cycle.add_edge(3, 1).unwrap();
    assert!(enumerate_pdag(&cycle, &mut sink(), None).unwrap().is_zero());
}

#[test]
fn emission_order_is_reproducible() {
    let g = triangle();
    let first = tempfile::tempdir().unwrap();
    let second = tempfile::tempdir().unwrap();
    let count = enumerate_cpdag(&g, &mut sink(), Some(first.path())).unwrap();
    enumerate_cpdag(&g, &mut sink(), Some(second.path())).unwrap();
    let a = collect_emitted(first.path(), 6);
    let b = collect_emitted(second.path(), 6);
    assert_eq!(count, BigUint::from(6u32));
    assert_eq!(a, b);
}

#[test]
fn singleton_and_empty_graphs() {
    let lonely = mec_graph::Pdag::new(1);
    assert_eq!(
        enumerate_cpdag(&lonely, &mut sink(), None).unwrap(),
        BigUint::from(1u32)
    );
    assert_eq!(
        enumerate_pdag(&lonely, &mut sink(), None).unwrap(),
        BigUint::from(1u32)
    );
}
