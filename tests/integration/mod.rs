//! Integration Tests Module
//!
//! End-to-end tests that drive tree generation, analysis and reporting
//! through the public command surface.
