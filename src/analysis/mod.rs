//! Branch analysis for vtxo trees
//!
//! ## Overview
//!
//! The analysis module is organised around the `AnalysisEngine`, a read-only
//! view over one [`TxGraph`]:
//!
//! - **Branch Extraction** - per-leaf path from leaf to root
//! - **Branch Sizes** - transactions a leaf owner must publish to exit
//! - **Broadcast Weights** - the same, discounted by shared ownership
//! - **Statistics** - count, max, mean, median and frequency tables
//! - **Report Generation** - formatted output for console and JSON export
//!
//! ## Usage
//!
//! ```rust
//! use arktree_analyser::analysis::AnalysisEngine;
//! use arktree_analyser::errors::AppResult;
//! use arktree_analyser::tree::{build_vtxo_tree, LeafGenerator};
//! use bitcoin::Amount;
//!
//! fn example() -> AppResult<()> {
//!     let generator = LeafGenerator::from_seed([7u8; 32]);
//!     let leaves = generator.leaves(5, Amount::from_sat(1000), 1)?;
//!     let tree = build_vtxo_tree(&leaves, generator.tree_params(100, 2))?;
//!
//!     let engine = AnalysisEngine::new(&tree.graph);
//!     let analysis = engine.analyse_tree(true)?;
//!     assert_eq!(analysis.total_transactions, 9);
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

pub mod branches;
pub mod reports;
pub mod statistics;
pub mod weight;

pub use branches::{
    analyse_branches, branch_sizes, branch_weights, count_nodes, extract_branch, BranchSamples,
};
pub use reports::{OutputFormat, ReportFormatter};
pub use statistics::{
    frequency_table, max, mean, median, FrequencyBucket, SampleSummary, SizeSummary, WeightKey,
    WeightSummary,
};
pub use weight::{branch_weight, node_weight};

use crate::errors::GraphResult;
use crate::tree::graph::TxGraph;
use crate::types::TreeAnalysis;
use tracing::info;

/// Main analysis engine over a single vtxo tree
///
/// The graph is borrowed immutably; every call is an independent pass.
pub struct AnalysisEngine<'a> {
    graph: &'a TxGraph,
}

impl<'a> AnalysisEngine<'a> {
    pub fn new(graph: &'a TxGraph) -> Self {
        Self { graph }
    }

    /// Number of transactions in the whole tree
    pub fn total_transactions(&self) -> GraphResult<usize> {
        count_nodes(self.graph)
    }

    /// Raw per-branch samples in leaf order
    pub fn analyse_branches(&self, include_weights: bool) -> GraphResult<BranchSamples> {
        analyse_branches(self.graph, include_weights)
    }

    /// Summary statistics over all branches
    ///
    /// # Arguments
    /// * `include_weights` - also compute broadcast weights
    ///
    /// # Returns
    /// * `GraphResult<TreeAnalysis>` - totals plus size (and weight) summaries
    pub fn analyse_tree(&self, include_weights: bool) -> GraphResult<TreeAnalysis> {
        let total_transactions = self.total_transactions()?;
        let samples = self.analyse_branches(include_weights)?;

        let analysis = TreeAnalysis {
            total_transactions,
            leaf_count: samples.sizes.len(),
            branch_sizes: SizeSummary::from_sizes(&samples.sizes),
            branch_weights: samples.weights.as_deref().map(WeightSummary::from_weights),
        };

        info!(
            "Analysed {} branches over {} transactions",
            analysis.leaf_count, analysis.total_transactions
        );

        Ok(analysis)
    }
}
