//! Analysis result types
//!
//! Plain serialisable structures produced by the analysis engine and consumed
//! by the report formatters.

use crate::analysis::statistics::{SizeSummary, WeightSummary};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Branch statistics of one vtxo tree
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeAnalysis {
    /// Transactions in the whole tree
    pub total_transactions: usize,
    pub leaf_count: usize,
    /// Transactions per branch
    pub branch_sizes: SizeSummary,
    /// Broadcast weight per branch (None when not requested)
    pub branch_weights: Option<WeightSummary>,
}

/// How the analysed tree was produced
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationMetadata {
    /// Hex seed that reproduces the tree
    pub seed: String,
    pub radix: usize,
    pub expiry_blocks: u16,
    pub cosigners_per_leaf: usize,
    pub leaf_amount_sats: u64,
    /// Wall-clock tree construction time
    pub build_seconds: f64,
}

/// Complete output of the `generate` command
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeReport {
    pub generated_at: DateTime<Utc>,
    pub generation: GenerationMetadata,
    pub analysis: TreeAnalysis,
}
