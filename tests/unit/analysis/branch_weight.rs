//! Unit tests for broadcast weight computation

use arktree_analyser::analysis::{branch_weight, branch_weights, count_nodes, node_weight};
use arktree_analyser::errors::GraphError;
use bitcoin::hashes::Hash;
use bitcoin::{OutPoint, Txid};

use crate::common::fixtures::{chain, generated_tree, pubkeys, tx_node, tx_without_inputs};

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {}, got {}",
        expected,
        actual
    );
}

#[test]
fn test_three_nodes_two_cosigners() {
    let branch = chain(3, 2);
    assert_close(branch_weight(&branch).unwrap(), 1.5);
}

#[test]
fn test_single_cosigner_weight_equals_node_count() {
    for length in 1..=6 {
        let branch = chain(length, 1);
        assert_close(branch_weight(&branch).unwrap(), length as f64);
    }
}

#[test]
fn test_k_cosigners_weight_is_count_over_k() {
    for k in [1usize, 2, 3, 5, 8] {
        let branch = chain(4, k);
        assert_close(branch_weight(&branch).unwrap(), 4.0 / k as f64);
    }
}

#[test]
fn test_generated_five_leaf_weights() {
    // One cosigner per leaf: a branch node over n leaves weighs 1/n
    let tree = generated_tree(5, 1, 2);
    let mut weights = branch_weights(&tree.graph).unwrap();
    weights.sort_by(f64::total_cmp);

    // L4 -> root: 1 + 1/5
    assert_close(weights[0], 1.2);
    // L0 -> B01 -> B0123 -> root: 1 + 1/2 + 1/4 + 1/5
    for weight in &weights[1..] {
        assert_close(*weight, 1.95);
    }
}

#[test]
fn test_weight_is_positive_and_bounded_by_size() {
    let tree = generated_tree(9, 3, 2);
    for leaf in tree.graph.leaves() {
        let branch = tree.graph.sub_graph(&[leaf.txid()]).unwrap();
        let weight = branch_weight(&branch).unwrap();
        assert!(weight > 0.0);
        assert!(weight <= count_nodes(&branch).unwrap() as f64);
    }
}

#[test]
fn test_only_first_input_counts() {
    let node = tx_node(
        OutPoint::new(Txid::from_byte_array([1; 32]), 0),
        1,
        &pubkeys(1, 4),
    );
    assert_close(node_weight(&node).unwrap(), 0.25);
}

#[test]
fn test_node_without_inputs_is_invalid() {
    let node = tx_without_inputs();
    match branch_weight(&node) {
        Err(GraphError::InvalidNode { txid, .. }) => assert_eq!(txid, node.txid()),
        other => panic!("expected InvalidNode, got {:?}", other),
    }
}

#[test]
fn test_missing_cosigners_is_invalid() {
    let mut root = tx_node(
        OutPoint::new(Txid::from_byte_array([1; 32]), 0),
        1,
        &pubkeys(1, 2),
    );
    let bare = tx_node(OutPoint::new(root.txid(), 0), 1, &[]);
    let bare_txid = bare.txid();
    root.insert_child(0, bare);

    match branch_weight(&root) {
        Err(GraphError::InvalidNode { txid, .. }) => assert_eq!(txid, bare_txid),
        other => panic!("expected InvalidNode, got {:?}", other),
    }
}
