use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Application configuration loaded from config.toml or environment variables
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub tree: TreeConfig,
    pub report: ReportConfig,
}

/// Shape of generated vtxo trees
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeConfig {
    pub leaf_amount_sats: u64,
    pub radix: usize,
    pub expiry_blocks: u16,
    pub cosigners_per_leaf: usize,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            leaf_amount_sats: 1000,
            radix: 2,
            expiry_blocks: 100,
            cosigners_per_leaf: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// "console" or "json"
    pub format: String,
    pub include_weights: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            format: "console".to_string(),
            include_weights: true,
        }
    }
}

impl AppConfig {
    /// Load configuration from config.toml file and environment variables
    /// Environment variables take precedence over file configuration
    ///
    /// A missing config.toml is not an error; an unreadable or invalid
    /// setting is, so it never falls back to defaults silently.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration, reading `path` instead of ./config.toml when given
    ///
    /// Nested keys map to `ARKTREE_<SECTION>__<KEY>`, e.g.
    /// `ARKTREE_TREE__RADIX=4`.
    pub fn load_from(path: Option<&Path>) -> Result<Self, ConfigError> {
        let tree = TreeConfig::default();
        let report = ReportConfig::default();

        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name("config").required(false),
        };

        let config = Config::builder()
            // Start with default values
            .set_default("tree.leaf_amount_sats", tree.leaf_amount_sats)?
            .set_default("tree.radix", tree.radix as i64)?
            .set_default("tree.expiry_blocks", tree.expiry_blocks as i64)?
            .set_default("tree.cosigners_per_leaf", tree.cosigners_per_leaf as i64)?
            .set_default("report.format", report.format)?
            .set_default("report.include_weights", report.include_weights)?
            .add_source(file)
            .add_source(
                Environment::with_prefix("ARKTREE")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let app_config: AppConfig = config.try_deserialize()?;
        app_config.validate()?;
        Ok(app_config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.tree.radix < 2 {
            return Err(ConfigError::Message(format!(
                "tree.radix must be at least 2, got {}",
                self.tree.radix
            )));
        }
        if self.tree.cosigners_per_leaf == 0 {
            return Err(ConfigError::Message(
                "tree.cosigners_per_leaf must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
