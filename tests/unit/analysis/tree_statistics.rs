//! Unit tests for tree-level summaries produced by the analysis engine

use arktree_analyser::analysis::{AnalysisEngine, FrequencyBucket, WeightKey};

use crate::common::fixtures::generated_tree;

#[test]
fn test_five_leaf_size_summary() {
    let tree = generated_tree(5, 1, 2);
    let analysis = AnalysisEngine::new(&tree.graph)
        .analyse_tree(false)
        .unwrap();

    assert_eq!(analysis.total_transactions, 9);
    assert_eq!(analysis.leaf_count, 5);

    let sizes = &analysis.branch_sizes;
    assert_eq!(sizes.count, 5);
    assert_eq!(sizes.max, 4);
    assert!((sizes.mean - 3.6).abs() < 1e-9);
    assert_eq!(sizes.median, 4.0);
    assert_eq!(
        sizes.distribution,
        vec![
            FrequencyBucket { value: 2, count: 1 },
            FrequencyBucket { value: 4, count: 4 },
        ]
    );
    assert!(analysis.branch_weights.is_none());
}

#[test]
fn test_five_leaf_weight_summary() {
    let tree = generated_tree(5, 1, 2);
    let analysis = AnalysisEngine::new(&tree.graph).analyse_tree(true).unwrap();

    let weights = analysis.branch_weights.unwrap();
    assert_eq!(weights.count, 5);
    assert!((weights.max - 1.95).abs() < 1e-9);
    assert!((weights.median - 1.95).abs() < 1e-9);
    assert!((weights.mean - 1.8).abs() < 1e-9);
    assert_eq!(
        weights.distribution,
        vec![
            FrequencyBucket {
                value: WeightKey::from_weight(1.2),
                count: 1
            },
            FrequencyBucket {
                value: WeightKey::from_weight(1.95),
                count: 4
            },
        ]
    );
}

#[test]
fn test_distribution_counts_every_branch() {
    for leaves in [1, 4, 7, 16, 33] {
        let tree = generated_tree(leaves, 2, 2);
        let analysis = AnalysisEngine::new(&tree.graph).analyse_tree(true).unwrap();

        let size_total: usize = analysis
            .branch_sizes
            .distribution
            .iter()
            .map(|bucket| bucket.count)
            .sum();
        let weight_total: usize = analysis
            .branch_weights
            .as_ref()
            .unwrap()
            .distribution
            .iter()
            .map(|bucket| bucket.count)
            .sum();

        assert_eq!(size_total, leaves);
        assert_eq!(weight_total, leaves);
    }
}

#[test]
fn test_balanced_tree_has_uniform_branches() {
    // 8 leaves at radix 2: every branch is leaf + 3 ancestors
    let tree = generated_tree(8, 1, 2);
    let analysis = AnalysisEngine::new(&tree.graph).analyse_tree(false).unwrap();

    assert_eq!(analysis.total_transactions, 15);
    assert_eq!(
        analysis.branch_sizes.distribution,
        vec![FrequencyBucket { value: 4, count: 8 }]
    );
    assert_eq!(analysis.branch_sizes.mean, 4.0);
}

#[test]
fn test_samples_follow_leaf_order() {
    let tree = generated_tree(5, 1, 2);
    let samples = AnalysisEngine::new(&tree.graph)
        .analyse_branches(false)
        .unwrap();

    // The carried-up fifth leaf sits directly under the root and is visited last
    assert_eq!(samples.sizes, vec![4, 4, 4, 4, 2]);
    assert!(samples.weights.is_none());
}
