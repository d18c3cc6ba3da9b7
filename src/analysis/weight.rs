//! Broadcast weight of a branch
//!
//! A transaction co-owned by `k` cosigners is, from each cosigner's point of
//! view, a `1/k` share of the broadcast burden. Summing that share over every
//! transaction of a branch gives the leaf owner's expected on-chain footprint
//! for a unilateral exit. Only the first input's cosigner set is consulted.

use crate::errors::{GraphError, GraphResult};
use crate::tree::cosigners::get_cosigner_keys;
use crate::tree::graph::TxGraph;

/// Share of `node` attributed to each of its cosigners
///
/// # Errors
/// [`GraphError::InvalidNode`] when the node has no inputs or its first input
/// carries no readable cosigner keys
pub fn node_weight(node: &TxGraph) -> GraphResult<f64> {
    let input = node
        .psbt()
        .inputs
        .first()
        .ok_or_else(|| GraphError::invalid_node(node.txid(), "transaction has no inputs"))?;

    let cosigners =
        get_cosigner_keys(input).map_err(|e| GraphError::invalid_node(node.txid(), e.to_string()))?;

    Ok(1.0 / cosigners.len() as f64)
}

/// Sum of [`node_weight`] over every node of `branch`
pub fn branch_weight(branch: &TxGraph) -> GraphResult<f64> {
    let mut weight = 0.0;
    branch.apply(|node| {
        weight += node_weight(node)?;
        Ok(true)
    })?;
    Ok(weight)
}
