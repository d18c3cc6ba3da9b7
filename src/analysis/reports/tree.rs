//! Vtxo tree report formatter
//!
//! Console layout:
//! - generation parameters (seed, radix, expiry)
//! - tree totals and branch size statistics
//! - branches grouped by size
//! - broadcast weight statistics grouped by rounded weight (when present)

use super::utils::{branch_noun, export_json, format_number};
use super::OutputFormat;
use crate::errors::AppResult;
use crate::types::TreeReport;

const RULE_WIDTH: usize = 60;

pub fn format_tree_report(report: &TreeReport, format: &OutputFormat) -> AppResult<String> {
    match format {
        OutputFormat::Json => export_json(report),
        OutputFormat::Console => Ok(format_console(report)),
    }
}

fn format_console(report: &TreeReport) -> String {
    let mut output = String::new();
    let generation = &report.generation;
    let analysis = &report.analysis;
    let sizes = &analysis.branch_sizes;
    let rule = "─".repeat(RULE_WIDTH);

    output.push_str("\n=== VTXO TREE STATISTICS ===\n\n");
    output.push_str(&format!("Seed:                 {}\n", generation.seed));
    output.push_str(&format!(
        "Radix:                {}\n",
        generation.radix
    ));
    output.push_str(&format!(
        "Expiry:               {} blocks\n",
        generation.expiry_blocks
    ));
    output.push_str(&format!(
        "Cosigners per leaf:   {}\n",
        generation.cosigners_per_leaf
    ));
    output.push_str(&format!(
        "Build time:           {:.3}s\n",
        generation.build_seconds
    ));

    output.push_str(&format!("\n{}\n", rule));
    output.push_str(&format!(
        "Total Transactions:    {:>8}\n",
        format_number(analysis.total_transactions)
    ));
    output.push_str(&format!(
        "Number of Leaves:      {:>8}\n",
        format_number(analysis.leaf_count)
    ));
    output.push_str(&format!(
        "Biggest Branch Size:   {:>8} tx\n",
        format_number(sizes.max)
    ));
    if sizes.count > 0 {
        output.push_str(&format!(
            "Average Branch Size:   {:>8.1} tx\n",
            sizes.mean
        ));
        output.push_str(&format!(
            "Median Branch Size:    {:>8.1} tx\n",
            sizes.median
        ));
    }
    output.push_str(&format!("{}\n", rule));

    output.push_str("\nBRANCH SIZES:\n");
    for bucket in &sizes.distribution {
        output.push_str(&format!(
            "  {:>4} {} with {:>3} tx\n",
            bucket.count,
            branch_noun(bucket.count),
            bucket.value
        ));
    }

    if let Some(weights) = &analysis.branch_weights {
        output.push_str("\nBROADCAST WEIGHTS:\n");
        output.push_str(&format!(
            "  Biggest Branch Weight: {:>8.2}\n",
            weights.max
        ));
        if weights.count > 0 {
            output.push_str(&format!(
                "  Average Branch Weight: {:>8.2}\n",
                weights.mean
            ));
            output.push_str(&format!(
                "  Median Branch Weight:  {:>8.2}\n",
                weights.median
            ));
        }
        output.push('\n');
        for bucket in &weights.distribution {
            output.push_str(&format!(
                "  {:>4} {} with weight {:>6}\n",
                bucket.count,
                branch_noun(bucket.count),
                bucket.value
            ));
        }
    }

    output.push_str(&format!("\n{}\n", "=".repeat(RULE_WIDTH)));
    output
}
