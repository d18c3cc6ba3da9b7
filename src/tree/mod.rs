//! Vtxo tree model and construction
//!
//! - `graph`: the [`TxGraph`] structure with traversal and subgraph accessors
//! - `cosigners`: cosigner keys attached to PSBT inputs
//! - `builder`: radix tree construction from [`Leaf`] descriptors
//! - `generator`: seeded synthetic leaves and tree parameters

pub mod builder;
pub mod cosigners;
pub mod generator;
pub mod graph;

pub use builder::{build_vtxo_tree, Leaf, TreeParams, VtxoTree, DEFAULT_RADIX};
pub use cosigners::{get_cosigner_keys, set_cosigner_keys};
pub use generator::LeafGenerator;
pub use graph::TxGraph;
