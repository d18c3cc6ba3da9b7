//! Ark Vtxo Tree Analyser
//!
//! Builds vtxo trees and measures, for every leaf, how many transactions its
//! owner must publish to exit unilaterally and what share of them they bear.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod errors;
pub mod tree;
pub mod types;
