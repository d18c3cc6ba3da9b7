//! Unit tests for branch extraction and branch sizes

use arktree_analyser::analysis::{branch_sizes, count_nodes, extract_branch};
use arktree_analyser::errors::GraphError;
use arktree_analyser::tree::cosigners::get_cosigner_keys;
use bitcoin::hashes::Hash;
use bitcoin::Txid;

use crate::common::fixtures::{chain, generated_tree};

#[test]
fn test_one_branch_per_leaf() {
    for leaves in [1, 2, 3, 5, 8, 13] {
        let tree = generated_tree(leaves, 1, 2);
        let sizes = branch_sizes(&tree.graph).unwrap();
        assert_eq!(sizes.len(), leaves, "{} leaves", leaves);
    }
}

#[test]
fn test_branch_size_bounds() {
    let tree = generated_tree(11, 1, 2);
    let total = count_nodes(&tree.graph).unwrap();

    for size in branch_sizes(&tree.graph).unwrap() {
        assert!(size >= 1);
        assert!(size <= total);
    }
}

#[test]
fn test_five_leaf_tree_sizes() {
    let tree = generated_tree(5, 1, 2);
    assert_eq!(count_nodes(&tree.graph).unwrap(), 9);

    let mut sizes = branch_sizes(&tree.graph).unwrap();
    sizes.sort();
    assert_eq!(sizes, vec![2, 4, 4, 4, 4]);
}

#[test]
fn test_single_leaf_branch_is_root() {
    let tree = generated_tree(1, 1, 2);
    assert_eq!(branch_sizes(&tree.graph).unwrap(), vec![1]);
}

#[test]
fn test_branch_contains_leaf_and_root() {
    let tree = generated_tree(6, 2, 2);

    for leaf in tree.graph.leaves() {
        let branch = extract_branch(&tree.graph, leaf.txid()).unwrap();

        assert_eq!(branch.txid(), tree.graph.txid());
        assert!(branch.contains(&leaf.txid()));
        assert_eq!(branch.leaves().len(), 1);
        assert_eq!(branch.leaves()[0].txid(), leaf.txid());
    }
}

#[test]
fn test_branch_preserves_node_data() {
    let tree = generated_tree(4, 2, 2);
    let leaf = tree.graph.leaves()[2];

    let branch = extract_branch(&tree.graph, leaf.txid()).unwrap();

    branch
        .apply(|node| {
            let source = tree.graph.find(&node.txid()).unwrap();
            assert_eq!(node.psbt(), source.psbt());
            assert_eq!(
                get_cosigner_keys(&node.psbt().inputs[0]).unwrap(),
                get_cosigner_keys(&source.psbt().inputs[0]).unwrap()
            );
            Ok(true)
        })
        .unwrap();
}

#[test]
fn test_branches_are_independent() {
    let tree = generated_tree(4, 1, 2);
    let leaves = tree.graph.leaves();

    let first = extract_branch(&tree.graph, leaves[0].txid()).unwrap();
    let mut second = extract_branch(&tree.graph, leaves[1].txid()).unwrap();
    let first_before = first.clone();

    // Grafting onto one branch must not show up in the other or the source
    second.insert_child(99, chain(2, 1));

    assert_eq!(first, first_before);
    assert_eq!(count_nodes(&tree.graph).unwrap(), 7);
}

#[test]
fn test_unknown_leaf_not_found() {
    let tree = generated_tree(3, 1, 2);
    let before = tree.graph.clone();
    let unknown = Txid::from_byte_array([0x11; 32]);

    let result = extract_branch(&tree.graph, unknown);

    assert_eq!(result, Err(GraphError::NotFound { txid: unknown }));
    assert_eq!(tree.graph, before);
}

#[test]
fn test_internal_node_branch_stops_there() {
    let tree = generated_tree(4, 1, 2);
    let internal = tree.graph.children()[&0].txid();

    let branch = extract_branch(&tree.graph, internal).unwrap();

    assert_eq!(count_nodes(&branch).unwrap(), 2);
    assert!(branch.children()[&0].is_leaf());
}

#[test]
fn test_deep_branch_extraction() {
    let depth = 20_000;
    let graph = chain(depth, 1);
    let leaf = graph.leaves()[0].txid();

    let branch = extract_branch(&graph, leaf).unwrap();

    assert_eq!(count_nodes(&branch).unwrap(), depth);
    assert_eq!(branch_sizes(&graph).unwrap(), vec![depth]);
    assert!(branch == graph);
}
