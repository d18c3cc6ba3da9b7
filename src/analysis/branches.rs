//! Per-leaf branch extraction and sampling
//!
//! A branch is the path from one leaf up to the root, both ends included.
//! Each leaf's branch is extracted as an independent [`TxGraph`] and measured:
//! its transaction count (size) and, optionally, its broadcast weight.

use crate::analysis::weight::branch_weight;
use crate::errors::GraphResult;
use crate::tree::graph::TxGraph;
use bitcoin::Txid;
use serde::Serialize;
use tracing::debug;

/// Branch measurements, one entry per leaf in traversal order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BranchSamples {
    pub sizes: Vec<usize>,
    /// Present only when weights were requested
    pub weights: Option<Vec<f64>>,
}

/// Number of transactions in `graph`
pub fn count_nodes(graph: &TxGraph) -> GraphResult<usize> {
    let mut count = 0;
    graph.apply(|_| {
        count += 1;
        Ok(true)
    })?;
    Ok(count)
}

/// Path from `leaf` up to the root of `graph`
///
/// # Errors
/// [`crate::errors::GraphError::NotFound`] when `leaf` is not in the graph
pub fn extract_branch(graph: &TxGraph, leaf: Txid) -> GraphResult<TxGraph> {
    graph.sub_graph(&[leaf])
}

/// Measure every branch of `graph` in a single pass
pub fn analyse_branches(graph: &TxGraph, include_weights: bool) -> GraphResult<BranchSamples> {
    let leaves = graph.leaves();
    debug!("Analysing {} branches", leaves.len());

    let mut sizes = Vec::with_capacity(leaves.len());
    let mut weights = include_weights.then(|| Vec::with_capacity(leaves.len()));

    for leaf in leaves {
        let branch = extract_branch(graph, leaf.txid())?;
        sizes.push(count_nodes(&branch)?);
        if let Some(weights) = weights.as_mut() {
            weights.push(branch_weight(&branch)?);
        }
    }

    Ok(BranchSamples { sizes, weights })
}

/// Transaction count of every branch
pub fn branch_sizes(graph: &TxGraph) -> GraphResult<Vec<usize>> {
    Ok(analyse_branches(graph, false)?.sizes)
}

/// Broadcast weight of every branch
pub fn branch_weights(graph: &TxGraph) -> GraphResult<Vec<f64>> {
    Ok(analyse_branches(graph, true)?.weights.unwrap_or_default())
}
