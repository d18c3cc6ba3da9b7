use crate::analysis::{AnalysisEngine, OutputFormat, ReportFormatter};
use crate::config::AppConfig;
use crate::errors::{AppError, AppResult};
use crate::tree::{build_vtxo_tree, LeafGenerator};
use crate::types::{GenerationMetadata, TreeReport};
use bitcoin::Amount;
use chrono::Utc;
use clap::Args;
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

/// Generate an Ark vtxo tree and report its branch statistics
#[derive(Args, Debug)]
pub struct GenerateCommand {
    /// Number of leaves (vtxos) in the tree
    pub num_leaves: usize,

    /// 32-byte hex seed for reproducible trees (random if omitted)
    #[arg(long)]
    pub seed: Option<String>,

    /// Children per branch node (overrides config.toml)
    #[arg(long)]
    pub radix: Option<usize>,

    /// Sweep expiry in blocks (overrides config.toml)
    #[arg(long)]
    pub expiry_blocks: Option<u16>,

    /// Cosigner keys per leaf (overrides config.toml)
    #[arg(long)]
    pub cosigners_per_leaf: Option<usize>,

    /// Amount per leaf in satoshis (overrides config.toml)
    #[arg(long)]
    pub amount_sats: Option<u64>,

    /// Skip broadcast weight statistics
    #[arg(long)]
    pub no_weights: bool,

    /// Output format (console or json)
    #[arg(long)]
    pub format: Option<String>,

    /// Write the report to this file instead of stdout
    #[arg(long)]
    pub output: Option<PathBuf>,
}

impl GenerateCommand {
    pub fn run(&self) -> AppResult<()> {
        let app_config = AppConfig::load()?;
        let (report, format) = self.execute(&app_config)?;
        let rendered = ReportFormatter::format_tree_report(&report, &format)?;

        match &self.output {
            Some(path) => {
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                std::fs::write(path, &rendered)?;
                println!("Report written to: {}", path.display());
            }
            None => print!("{}", rendered),
        }

        Ok(())
    }

    /// Build and analyse a tree using CLI arguments over `app_config`
    pub fn execute(&self, app_config: &AppConfig) -> AppResult<(TreeReport, OutputFormat)> {
        if self.num_leaves == 0 {
            return Err(AppError::InvalidData(
                "Number of leaves must be a positive integer".to_string(),
            ));
        }

        // CLI arguments override config values
        let tree_config = &app_config.tree;
        let radix = self.radix.unwrap_or(tree_config.radix);
        let expiry_blocks = self.expiry_blocks.unwrap_or(tree_config.expiry_blocks);
        let cosigners_per_leaf = self
            .cosigners_per_leaf
            .unwrap_or(tree_config.cosigners_per_leaf);
        let amount_sats = self.amount_sats.unwrap_or(tree_config.leaf_amount_sats);
        let include_weights = !self.no_weights && app_config.report.include_weights;
        let format = OutputFormat::parse(
            self.format
                .as_deref()
                .unwrap_or(app_config.report.format.as_str()),
        );

        if cosigners_per_leaf == 0 {
            return Err(AppError::InvalidData(
                "Each leaf needs at least one cosigner".to_string(),
            ));
        }

        let generator = match &self.seed {
            Some(seed_hex) => LeafGenerator::from_hex(seed_hex)?,
            None => LeafGenerator::random(),
        };

        info!("=== Ark Tree Generator ===");
        info!("  Leaves: {}", self.num_leaves);
        info!("  Radix: {}", radix);
        info!("  Expiry: {} blocks", expiry_blocks);
        info!("  Cosigners per leaf: {}", cosigners_per_leaf);
        info!("  Seed: {}", generator.seed_hex());

        let leaves = generator.leaves(
            self.num_leaves,
            Amount::from_sat(amount_sats),
            cosigners_per_leaf,
        )?;

        let start = Instant::now();
        let tree = build_vtxo_tree(&leaves, generator.tree_params(expiry_blocks, radix))?;
        let build_seconds = start.elapsed().as_secs_f64();
        info!("Tree built in {:.3}s", build_seconds);

        let analysis = AnalysisEngine::new(&tree.graph).analyse_tree(include_weights)?;

        let report = TreeReport {
            generated_at: Utc::now(),
            generation: GenerationMetadata {
                seed: generator.seed_hex(),
                radix,
                expiry_blocks,
                cosigners_per_leaf,
                leaf_amount_sats: amount_sats,
                build_seconds,
            },
            analysis,
        };

        Ok((report, format))
    }
}
