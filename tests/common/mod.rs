//! Common Test Utilities
//!
//! Shared fixtures for building vtxo trees and hand-made transaction graphs,
//! used across the unit and integration test trees.

#![allow(dead_code)]

/// Seed used wherever a test needs a reproducible generated tree
pub const TEST_SEED: [u8; 32] = [0x42; 32];

pub fn test_seed_hex() -> String {
    hex::encode(TEST_SEED)
}

/// Test fixture utilities
pub mod fixtures {
    use arktree_analyser::tree::{
        build_vtxo_tree, set_cosigner_keys, LeafGenerator, TxGraph, VtxoTree,
    };
    use bitcoin::absolute::LockTime;
    use bitcoin::hashes::Hash;
    use bitcoin::secp256k1::{PublicKey, Secp256k1, SecretKey};
    use bitcoin::transaction::Version;
    use bitcoin::{
        Amount, OutPoint, Psbt, ScriptBuf, Sequence, Transaction, TxIn, TxOut, Txid, Witness,
    };

    /// Deterministic public key for `index` (index must be non-zero)
    pub fn pubkey(index: u8) -> PublicKey {
        let secp = Secp256k1::new();
        let secret = SecretKey::from_slice(&[index; 32]).unwrap();
        PublicKey::from_secret_key(&secp, &secret)
    }

    /// `count` distinct keys starting at `first`
    pub fn pubkeys(first: u8, count: usize) -> Vec<PublicKey> {
        (0..count).map(|i| pubkey(first + i as u8)).collect()
    }

    /// Generated tree with the common test seed
    pub fn generated_tree(leaves: usize, cosigners_per_leaf: usize, radix: usize) -> VtxoTree {
        let generator = LeafGenerator::from_seed(super::TEST_SEED);
        let leaves = generator
            .leaves(leaves, Amount::from_sat(1000), cosigners_per_leaf)
            .unwrap();
        build_vtxo_tree(&leaves, generator.tree_params(100, radix)).unwrap()
    }

    /// Single-input transaction spending `spends` with `outputs` outputs
    pub fn tx_node(spends: OutPoint, outputs: usize, cosigners: &[PublicKey]) -> TxGraph {
        let tx = Transaction {
            version: Version(3),
            lock_time: LockTime::ZERO,
            input: vec![TxIn {
                previous_output: spends,
                script_sig: ScriptBuf::new(),
                sequence: Sequence::MAX,
                witness: Witness::new(),
            }],
            output: (0..outputs)
                .map(|i| TxOut {
                    value: Amount::from_sat(1000 + i as u64),
                    script_pubkey: ScriptBuf::new(),
                })
                .collect(),
        };
        let mut psbt = Psbt::from_unsigned_tx(tx).unwrap();
        if !cosigners.is_empty() {
            set_cosigner_keys(&mut psbt.inputs[0], cosigners);
        }
        TxGraph::new(psbt)
    }

    /// Transaction with no inputs at all
    pub fn tx_without_inputs() -> TxGraph {
        let tx = Transaction {
            version: Version(3),
            lock_time: LockTime::ZERO,
            input: vec![],
            output: vec![TxOut {
                value: Amount::from_sat(1000),
                script_pubkey: ScriptBuf::new(),
            }],
        };
        TxGraph::new(Psbt::from_unsigned_tx(tx).unwrap())
    }

    /// Linear branch of `length` nodes, every node co-owned by `cosigners` keys
    pub fn chain(length: usize, cosigners: usize) -> TxGraph {
        assert!(length > 0);
        let keys = pubkeys(1, cosigners);

        let mut spends = OutPoint::new(Txid::from_byte_array([0xaa; 32]), 0);
        let mut nodes = Vec::with_capacity(length);
        for _ in 0..length {
            let node = tx_node(spends, 1, &keys);
            spends = OutPoint::new(node.txid(), 0);
            nodes.push(node);
        }

        let mut child = nodes.pop().unwrap();
        while let Some(mut parent) = nodes.pop() {
            parent.insert_child(0, child);
            child = parent;
        }
        child
    }
}
