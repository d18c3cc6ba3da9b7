//! Utility functions for report formatting
//!
//! Provides shared formatting helpers used across all report formatters.

use crate::errors::AppResult;
use serde::Serialize;

/// Group digits in threes for console output
///
/// # Examples
///
/// ```
/// # use arktree_analyser::analysis::reports::utils::format_number;
/// // transactions in a binary tree over 2^20 leaves
/// assert_eq!(format_number(2_097_151), "2,097,151");
/// assert_eq!(format_number(512), "512");
/// ```
pub fn format_number(n: usize) -> String {
    let digits = n.to_string();
    let head = match digits.len() % 3 {
        0 => 3,
        partial => partial,
    };

    let mut groups = vec![&digits[..head]];
    groups.extend((head..digits.len()).step_by(3).map(|at| &digits[at..at + 3]));
    groups.join(",")
}

/// "branch" or "branches", padded so table columns line up
pub fn branch_noun(count: usize) -> &'static str {
    if count == 1 {
        "branch  "
    } else {
        "branches"
    }
}

/// Export data as JSON for programmatic use
pub fn export_json<T: Serialize>(data: &T) -> AppResult<String> {
    serde_json::to_string_pretty(data)
        .map_err(|e| crate::errors::AppError::InvalidData(format!("JSON export failed: {}", e)))
}
