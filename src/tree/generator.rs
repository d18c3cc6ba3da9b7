//! Seeded generation of leaves and tree parameters
//!
//! Everything a synthetic tree needs is derived from one 32-byte seed with
//! `SHA256(seed || label || index)`, so a seed fully reproduces a tree.

use crate::errors::{AppError, AppResult};
use crate::tree::builder::{Leaf, TreeParams};
use bitcoin::hashes::Hash;
use bitcoin::relative;
use bitcoin::secp256k1::{All, PublicKey, Secp256k1, SecretKey};
use bitcoin::{Amount, OutPoint, ScriptBuf, Txid};
use sha2::{Digest, Sha256};

/// Length of generated leaf scripts (`OP_1 <32 bytes>`)
pub const LEAF_SCRIPT_LEN: usize = 34;

pub struct LeafGenerator {
    seed: [u8; 32],
    secp: Secp256k1<All>,
}

impl LeafGenerator {
    pub fn from_seed(seed: [u8; 32]) -> Self {
        Self {
            seed,
            secp: Secp256k1::new(),
        }
    }

    /// Generator seeded from the operating system RNG
    pub fn random() -> Self {
        Self::from_seed(bitcoin::secp256k1::rand::random())
    }

    /// Parse a 64-character hex seed
    pub fn from_hex(seed_hex: &str) -> AppResult<Self> {
        let bytes = hex::decode(seed_hex)
            .map_err(|e| AppError::InvalidData(format!("seed is not valid hex: {}", e)))?;
        let seed: [u8; 32] = bytes.try_into().map_err(|bytes: Vec<u8>| {
            AppError::InvalidData(format!("seed must be 32 bytes, got {}", bytes.len()))
        })?;
        Ok(Self::from_seed(seed))
    }

    pub fn seed(&self) -> [u8; 32] {
        self.seed
    }

    pub fn seed_hex(&self) -> String {
        hex::encode(self.seed)
    }

    fn derive(&self, label: &str, index: u64) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(self.seed);
        hasher.update(label.as_bytes());
        hasher.update(index.to_be_bytes());
        hasher.finalize().into()
    }

    /// Outpoint of the (fictional) batch transaction funding the tree
    pub fn batch_outpoint(&self) -> OutPoint {
        OutPoint::new(Txid::from_byte_array(self.derive("batch-txid", 0)), 0)
    }

    pub fn sweep_tap_tree_root(&self) -> [u8; 32] {
        self.derive("sweep-root", 0)
    }

    pub fn tree_params(&self, expiry_blocks: u16, radix: usize) -> TreeParams {
        TreeParams {
            batch_outpoint: self.batch_outpoint(),
            sweep_tap_tree_root: self.sweep_tap_tree_root(),
            expiry: relative::LockTime::from_height(expiry_blocks),
            radix,
        }
    }

    /// `count` leaves of `amount`, each with `cosigners_per_leaf` fresh keys
    pub fn leaves(
        &self,
        count: usize,
        amount: Amount,
        cosigners_per_leaf: usize,
    ) -> AppResult<Vec<Leaf>> {
        (0..count)
            .map(|leaf_index| {
                let cosigners = (0..cosigners_per_leaf)
                    .map(|key_index| self.cosigner_key(leaf_index, key_index))
                    .collect::<AppResult<Vec<_>>>()?;
                Ok(Leaf::new(amount, self.leaf_script(leaf_index), cosigners))
            })
            .collect()
    }

    fn leaf_script(&self, leaf_index: usize) -> ScriptBuf {
        let mut script = Vec::with_capacity(LEAF_SCRIPT_LEN);
        script.extend_from_slice(&[0x51, 0x20]);
        script.extend_from_slice(&self.derive("leaf-script", leaf_index as u64));
        ScriptBuf::from_bytes(script)
    }

    fn cosigner_key(&self, leaf_index: usize, key_index: usize) -> AppResult<PublicKey> {
        let base = ((leaf_index as u64) << 32) | key_index as u64;
        // Retry with a nonce when the digest is not a valid secret key
        for nonce in 0..u8::MAX as u64 {
            let material = self.derive("cosigner", base ^ (nonce << 56));
            if let Ok(secret) = SecretKey::from_slice(&material) {
                return Ok(PublicKey::from_secret_key(&self.secp, &secret));
            }
        }
        Err(AppError::Construction(format!(
            "could not derive cosigner key {} for leaf {}",
            key_index, leaf_index
        )))
    }
}
