//! Vtxo tree transaction graph
//!
//! A [`TxGraph`] is an owned, recursive tree of unsigned transactions. Every
//! node wraps a PSBT and maps the output indices it pays to the child graphs
//! spending them. The top-level value is the root (the batch transaction);
//! nodes without children are leaves.
//!
//! ## Invariants
//!
//! - every node has exactly one parent (except the root)
//! - a child's first input spends `parent_txid:vout` where `vout` is its key
//!   in the parent's `children` map
//! - txids are unique within a graph
//!
//! Graphs are handed to the analysis layer fully built and are only read
//! from that point on. Every walk over a graph (including clone, equality
//! and drop) uses an explicit stack, so depth is bounded by memory rather
//! than by the thread stack.

use crate::errors::{GraphError, GraphResult};
use bitcoin::{OutPoint, Psbt, Txid};
use std::collections::{BTreeMap, HashSet};
use std::mem;

/// A node of the vtxo tree together with the subtree below it
#[derive(Debug)]
pub struct TxGraph {
    root: Psbt,
    txid: Txid,
    children: BTreeMap<u32, TxGraph>,
}

/// A node in pre-order position, linked to its parent by index
struct FlatNode<'a> {
    node: &'a TxGraph,
    parent: usize,
    vout: u32,
}

impl TxGraph {
    /// Create a childless graph around an unsigned transaction
    pub fn new(root: Psbt) -> Self {
        let txid = root.unsigned_tx.compute_txid();
        Self {
            root,
            txid,
            children: BTreeMap::new(),
        }
    }

    /// Attach `child` as the spender of output `vout` of this node
    ///
    /// Replaces any child previously attached to the same output.
    pub fn insert_child(&mut self, vout: u32, child: TxGraph) {
        self.children.insert(vout, child);
    }

    pub fn psbt(&self) -> &Psbt {
        &self.root
    }

    pub fn txid(&self) -> Txid {
        self.txid
    }

    pub fn children(&self) -> &BTreeMap<u32, TxGraph> {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Depth-first, parent-before-child traversal starting at this node
    ///
    /// `visit` is invoked exactly once per reachable node, children in
    /// ascending output order. Returning `Ok(false)` stops the walk; an error
    /// stops it as well and is returned unchanged.
    ///
    /// # Returns
    /// The number of nodes `visit` was invoked on
    pub fn apply<'a, F>(&'a self, mut visit: F) -> GraphResult<usize>
    where
        F: FnMut(&'a TxGraph) -> GraphResult<bool>,
    {
        let mut visited = 0;
        let mut failure = None;

        self.walk(|node| {
            visited += 1;
            match visit(node) {
                Ok(proceed) => proceed,
                Err(e) => {
                    failure = Some(e);
                    false
                }
            }
        });

        match failure {
            Some(e) => Err(e),
            None => Ok(visited),
        }
    }

    /// Infallible pre-order walk; `visit` returns false to stop
    fn walk<'a, F>(&'a self, mut visit: F)
    where
        F: FnMut(&'a TxGraph) -> bool,
    {
        let mut stack: Vec<&'a TxGraph> = vec![self];

        while let Some(node) = stack.pop() {
            if !visit(node) {
                return;
            }
            // Reversed so the lowest output index is popped first
            stack.extend(node.children.values().rev());
        }
    }

    /// All nodes in pre-order, each linked to its parent's position
    fn flatten(&self) -> Vec<FlatNode<'_>> {
        let mut flat = Vec::new();
        let mut stack = vec![FlatNode {
            node: self,
            parent: 0,
            vout: 0,
        }];

        while let Some(entry) = stack.pop() {
            let index = flat.len();
            let node = entry.node;
            flat.push(entry);
            stack.extend(node.children.iter().rev().map(|(vout, child)| FlatNode {
                node: child,
                parent: index,
                vout: *vout,
            }));
        }

        flat
    }

    /// Copy the root plus every flattened node marked in `keep`
    ///
    /// A kept node's parent must be kept too. Children always follow their
    /// parent in `flat`, so a reverse pass finishes every subtree before it
    /// is attached.
    fn rebuild(&self, flat: &[FlatNode<'_>], keep: &[bool]) -> TxGraph {
        let mut children: Vec<BTreeMap<u32, TxGraph>> =
            flat.iter().map(|_| BTreeMap::new()).collect();

        for index in (1..flat.len()).rev() {
            if !keep[index] {
                continue;
            }
            let entry = &flat[index];
            let copy = TxGraph {
                root: entry.node.root.clone(),
                txid: entry.node.txid,
                children: mem::take(&mut children[index]),
            };
            children[entry.parent].insert(entry.vout, copy);
        }

        TxGraph {
            root: self.root.clone(),
            txid: self.txid,
            children: children.into_iter().next().unwrap_or_default(),
        }
    }

    /// All leaves, in traversal order
    pub fn leaves(&self) -> Vec<&TxGraph> {
        let mut leaves = Vec::new();
        self.walk(|node| {
            if node.is_leaf() {
                leaves.push(node);
            }
            true
        });
        leaves
    }

    /// Locate the node with the given txid
    pub fn find(&self, txid: &Txid) -> Option<&TxGraph> {
        let mut found = None;
        self.walk(|node| {
            if node.txid == *txid {
                found = Some(node);
                return false;
            }
            true
        });
        found
    }

    pub fn contains(&self, txid: &Txid) -> bool {
        self.find(txid).is_some()
    }

    /// Minimal subgraph connecting every given txid to the root
    ///
    /// The result owns copies of the retained nodes; `self` is untouched.
    /// An empty `txids` slice yields the root alone.
    ///
    /// # Errors
    /// [`GraphError::NotFound`] for the first txid absent from the graph
    pub fn sub_graph(&self, txids: &[Txid]) -> GraphResult<TxGraph> {
        let targets: HashSet<Txid> = txids.iter().copied().collect();
        let flat = self.flatten();

        let mut keep: Vec<bool> = flat
            .iter()
            .map(|entry| targets.contains(&entry.node.txid))
            .collect();

        let seen: HashSet<Txid> = flat
            .iter()
            .zip(&keep)
            .filter(|(_, kept)| **kept)
            .map(|(entry, _)| entry.node.txid)
            .collect();
        if let Some(missing) = txids.iter().find(|txid| !seen.contains(*txid)) {
            return Err(GraphError::NotFound { txid: *missing });
        }

        // Mark every ancestor of a target
        for index in (1..flat.len()).rev() {
            if keep[index] {
                keep[flat[index].parent] = true;
            }
        }

        Ok(self.rebuild(&flat, &keep))
    }

    /// Check the parent/child linkage of the whole graph
    ///
    /// # Errors
    /// - [`GraphError::InvalidNode`] when a node has no inputs
    /// - [`GraphError::VisitorFailure`] when a child does not spend the
    ///   parent output it is attached to
    pub fn validate(&self) -> GraphResult<()> {
        self.apply(|node| {
            if node.root.unsigned_tx.input.is_empty() {
                return Err(GraphError::invalid_node(node.txid, "transaction has no inputs"));
            }

            let output_count = node.root.unsigned_tx.output.len();
            for (vout, child) in &node.children {
                if *vout as usize >= output_count {
                    return Err(GraphError::visitor_failure(
                        node.txid,
                        format!("child attached to missing output {}", vout),
                    ));
                }

                let expected = OutPoint::new(node.txid, *vout);
                let spent = child
                    .root
                    .unsigned_tx
                    .input
                    .first()
                    .map(|input| input.previous_output);
                if spent != Some(expected) {
                    return Err(GraphError::visitor_failure(
                        child.txid,
                        format!("does not spend parent output {}", expected),
                    ));
                }
            }

            Ok(true)
        })?;

        Ok(())
    }
}

impl Clone for TxGraph {
    fn clone(&self) -> Self {
        let flat = self.flatten();
        let keep = vec![true; flat.len()];
        self.rebuild(&flat, &keep)
    }
}

impl PartialEq for TxGraph {
    /// Pre-order with ascending children is canonical, so two graphs are
    /// equal when their flattened sequences match
    fn eq(&self, other: &Self) -> bool {
        let left = self.flatten();
        let right = other.flatten();

        left.len() == right.len()
            && left.iter().zip(&right).all(|(a, b)| {
                a.parent == b.parent
                    && a.vout == b.vout
                    && a.node.txid == b.node.txid
                    && a.node.root == b.node.root
            })
    }
}

impl Drop for TxGraph {
    fn drop(&mut self) {
        let mut pending: Vec<TxGraph> = mem::take(&mut self.children).into_values().collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(mem::take(&mut node.children).into_values());
        }
    }
}
