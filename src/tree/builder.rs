//! Vtxo tree construction
//!
//! Builds a [`TxGraph`] from an ordered list of [`Leaf`] descriptors.
//!
//! ## Shape
//!
//! Leaves are grouped bottom-up, `radix` nodes at a time, into branch nodes
//! until a single root remains. When a level does not divide evenly the
//! trailing remainder is carried up to the next level untouched, and a level
//! holding fewer than `radix` nodes collapses into one parent. With radix 2:
//!
//! ```text
//! 5 leaves: [L0 L1 L2 L3 L4]
//!        -> [B(L0 L1) B(L2 L3) L4]
//!        -> [B(B01 B23) L4]
//!        -> [root]                  9 transactions
//! ```
//!
//! ## Transactions
//!
//! Every node is a version 3 transaction with one input spending its parent's
//! output (the root spends the batch outpoint) and one output per child plus a
//! zero-value pay-to-anchor output. A child output is P2TR: the internal key
//! is the point sum of the child's cosigner keys and the merkle root is the
//! sweep tap tree root. Leaf transactions pay the leaf script.
//!
//! A branch node is co-owned by the union of its descendants' cosigners;
//! that set is written to its input so the analysis layer can weigh it.

use crate::errors::{AppError, AppResult};
use crate::tree::cosigners::set_cosigner_keys;
use crate::tree::graph::TxGraph;
use bitcoin::absolute;
use bitcoin::hashes::Hash;
use bitcoin::relative;
use bitcoin::secp256k1::{All, PublicKey, Secp256k1};
use bitcoin::taproot::TapNodeHash;
use bitcoin::transaction::Version;
use bitcoin::{Amount, OutPoint, Psbt, ScriptBuf, Sequence, Transaction, TxIn, TxOut, Witness};
use std::collections::HashSet;
use tracing::{debug, info};

/// Default number of children per branch node
pub const DEFAULT_RADIX: usize = 2;

/// Pay-to-anchor output script (`OP_1 <0x4e73>`)
pub const ANCHOR_SCRIPT: [u8; 4] = [0x51, 0x02, 0x4e, 0x73];

/// A receiver at the bottom of the tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leaf {
    amount: Amount,
    script: ScriptBuf,
    cosigners: Vec<PublicKey>,
}

impl Leaf {
    pub fn new(amount: Amount, script: ScriptBuf, cosigners: Vec<PublicKey>) -> Self {
        Self {
            amount,
            script,
            cosigners,
        }
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn script(&self) -> &ScriptBuf {
        &self.script
    }

    pub fn cosigners(&self) -> &[PublicKey] {
        &self.cosigners
    }
}

/// Parameters shared by every transaction of one tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeParams {
    /// Output of the batch transaction the root spends
    pub batch_outpoint: OutPoint,
    /// Merkle root of the sweep tap tree committed in every branch output
    pub sweep_tap_tree_root: [u8; 32],
    /// Relative timelock after which the server may sweep the tree
    pub expiry: relative::LockTime,
    /// Maximum number of children per branch node
    pub radix: usize,
}

/// A built tree and the parameters it was built with
#[derive(Debug, Clone, PartialEq)]
pub struct VtxoTree {
    pub graph: TxGraph,
    pub params: TreeParams,
}

impl VtxoTree {
    pub fn expiry(&self) -> relative::LockTime {
        self.params.expiry
    }
}

/// Intermediate tree shape before transactions are created
enum TreeNode {
    Leaf(Leaf),
    Branch {
        children: Vec<TreeNode>,
        cosigners: Vec<PublicKey>,
        amount: Amount,
    },
}

impl TreeNode {
    fn branch(children: Vec<TreeNode>) -> AppResult<Self> {
        let mut seen = HashSet::new();
        let mut cosigners = Vec::new();
        let mut amount = Amount::ZERO;

        for child in &children {
            for key in child.cosigners() {
                if seen.insert(*key) {
                    cosigners.push(*key);
                }
            }
            amount = amount.checked_add(child.amount()).ok_or_else(|| {
                AppError::Construction("branch amount overflows".to_string())
            })?;
        }

        Ok(TreeNode::Branch {
            children,
            cosigners,
            amount,
        })
    }

    fn amount(&self) -> Amount {
        match self {
            TreeNode::Leaf(leaf) => leaf.amount,
            TreeNode::Branch { amount, .. } => *amount,
        }
    }

    fn cosigners(&self) -> &[PublicKey] {
        match self {
            TreeNode::Leaf(leaf) => &leaf.cosigners,
            TreeNode::Branch { cosigners, .. } => cosigners,
        }
    }
}

/// Build a vtxo tree paying `leaves`
///
/// # Errors
/// [`AppError::Construction`] when:
/// - `leaves` is empty or `params.radix` is below 2
/// - `params.expiry` is zero
/// - a leaf has no cosigners or a zero amount
/// - cosigner keys cannot be aggregated
/// - the resulting graph fails linkage validation
pub fn build_vtxo_tree(leaves: &[Leaf], params: TreeParams) -> AppResult<VtxoTree> {
    validate_inputs(leaves, &params)?;

    info!(
        "Building vtxo tree: {} leaves, radix {}",
        leaves.len(),
        params.radix
    );

    let mut level: Vec<TreeNode> = leaves.iter().cloned().map(TreeNode::Leaf).collect();
    let mut depth = 0;
    while level.len() > 1 {
        level = create_upper_level(level, params.radix)?;
        depth += 1;
        debug!("Tree level {}: {} nodes", depth, level.len());
    }

    let root = level
        .pop()
        .ok_or_else(|| AppError::Construction("no root node produced".to_string()))?;

    let secp = Secp256k1::new();
    let sweep_root = TapNodeHash::from_byte_array(params.sweep_tap_tree_root);
    let graph = build_graph(&root, params.batch_outpoint, &secp, sweep_root)?;

    graph
        .validate()
        .map_err(|e| AppError::Construction(format!("built graph is malformed: {}", e)))?;

    Ok(VtxoTree { graph, params })
}

fn validate_inputs(leaves: &[Leaf], params: &TreeParams) -> AppResult<()> {
    if leaves.is_empty() {
        return Err(AppError::Construction("no leaves supplied".to_string()));
    }
    if params.radix < 2 {
        return Err(AppError::Construction(format!(
            "radix must be at least 2, got {}",
            params.radix
        )));
    }
    let expiry_value = match params.expiry {
        relative::LockTime::Blocks(height) => height.value(),
        relative::LockTime::Time(time) => time.value(),
    };
    if expiry_value == 0 {
        return Err(AppError::Construction("expiry must be non-zero".to_string()));
    }

    for (index, leaf) in leaves.iter().enumerate() {
        if leaf.cosigners.is_empty() {
            return Err(AppError::Construction(format!(
                "leaf {} has no cosigners",
                index
            )));
        }
        if leaf.amount == Amount::ZERO {
            return Err(AppError::Construction(format!(
                "leaf {} has a zero amount",
                index
            )));
        }
    }

    Ok(())
}

fn create_upper_level(mut nodes: Vec<TreeNode>, radix: usize) -> AppResult<Vec<TreeNode>> {
    if nodes.len() <= 1 {
        return Ok(nodes);
    }
    if nodes.len() < radix {
        return Ok(vec![TreeNode::branch(nodes)?]);
    }

    let remainder = nodes.len() % radix;
    let carried = nodes.split_off(nodes.len() - remainder);

    let mut upper = Vec::with_capacity(nodes.len() / radix + carried.len());
    let mut pending = nodes.into_iter();
    loop {
        let group: Vec<TreeNode> = pending.by_ref().take(radix).collect();
        if group.is_empty() {
            break;
        }
        upper.push(TreeNode::branch(group)?);
    }
    upper.extend(carried);

    Ok(upper)
}

fn build_graph(
    node: &TreeNode,
    spends: OutPoint,
    secp: &Secp256k1<All>,
    sweep_root: TapNodeHash,
) -> AppResult<TxGraph> {
    let mut outputs = match node {
        TreeNode::Leaf(leaf) => vec![TxOut {
            value: leaf.amount,
            script_pubkey: leaf.script.clone(),
        }],
        TreeNode::Branch { children, .. } => children
            .iter()
            .map(|child| {
                Ok(TxOut {
                    value: child.amount(),
                    script_pubkey: branch_output_script(secp, child.cosigners(), sweep_root)?,
                })
            })
            .collect::<AppResult<Vec<_>>>()?,
    };
    outputs.push(TxOut {
        value: Amount::ZERO,
        script_pubkey: ScriptBuf::from_bytes(ANCHOR_SCRIPT.to_vec()),
    });

    let tx = Transaction {
        version: Version(3),
        lock_time: absolute::LockTime::ZERO,
        input: vec![TxIn {
            previous_output: spends,
            script_sig: ScriptBuf::new(),
            sequence: Sequence::MAX,
            witness: Witness::new(),
        }],
        output: outputs,
    };

    let mut psbt = Psbt::from_unsigned_tx(tx)
        .map_err(|e| AppError::Construction(format!("failed to create PSBT: {}", e)))?;
    if let Some(input) = psbt.inputs.first_mut() {
        set_cosigner_keys(input, node.cosigners());
    }

    let mut graph = TxGraph::new(psbt);
    if let TreeNode::Branch { children, .. } = node {
        for (vout, child) in children.iter().enumerate() {
            let vout = vout as u32;
            let outpoint = OutPoint::new(graph.txid(), vout);
            let subtree = build_graph(child, outpoint, secp, sweep_root)?;
            graph.insert_child(vout, subtree);
        }
    }

    Ok(graph)
}

fn branch_output_script(
    secp: &Secp256k1<All>,
    cosigners: &[PublicKey],
    sweep_root: TapNodeHash,
) -> AppResult<ScriptBuf> {
    let keys: Vec<&PublicKey> = cosigners.iter().collect();
    let aggregated = PublicKey::combine_keys(&keys).map_err(|e| {
        AppError::Construction(format!("failed to aggregate cosigner keys: {}", e))
    })?;
    let (internal_key, _) = aggregated.x_only_public_key();

    Ok(ScriptBuf::new_p2tr(secp, internal_key, Some(sweep_root)))
}
