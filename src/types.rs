//! Ark Vtxo Tree Analyser - Type System
//!
//! - `analysis_results`: serialisable analysis and report structures

pub mod analysis_results;

pub use analysis_results::{GenerationMetadata, TreeAnalysis, TreeReport};
