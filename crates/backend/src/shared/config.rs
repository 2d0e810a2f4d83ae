use anyhow::Context;
use contracts::dashboards::d100_sales_overview::FilterSpec;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::shared::data::raw_record::{MoneyScale, NormalizeOptions};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub data: DataConfig,
    /// Initial dashboard filters
    #[serde(default)]
    pub filter: FilterSpec,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DataConfig {
    /// URL or file path of the orders feed
    pub orders: String,
    pub customers: String,
    pub products: String,
    /// Unit of money amounts in the feeds
    #[serde(default)]
    pub money_scale: MoneyScale,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Directory relative file locations are resolved against
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

impl DataConfig {
    pub fn normalize_options(&self) -> NormalizeOptions {
        NormalizeOptions {
            money_scale: self.money_scale,
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[data]
orders = "data/pedidos.json"
customers = "data/clientes.json"
products = "data/produtos.json"
money_scale = "units"
"#;

/// Load configuration
///
/// Search order:
/// 1. Explicit path (first CLI argument)
/// 2. config.toml next to the executable
/// 3. Embedded default config, resolved against the working directory
pub fn load_config(explicit: Option<&Path>) -> anyhow::Result<Config> {
    if let Some(path) = explicit {
        tracing::info!("Loading config from: {}", path.display());
        return read_config_file(path);
    }

    // Try to find config.toml next to the executable
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                return read_config_file(&config_path);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    // Fall back to default config
    tracing::info!("Using default embedded configuration");
    let mut config = parse_config(DEFAULT_CONFIG)?;
    config.data.base_dir = std::env::current_dir().ok();
    Ok(config)
}

fn read_config_file(path: &Path) -> anyhow::Result<Config> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read {}", path.display()))?;
    let mut config =
        parse_config(&contents).with_context(|| format!("invalid config {}", path.display()))?;
    config.data.base_dir = path.parent().map(Path::to_path_buf);
    Ok(config)
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    Ok(toml::from_str(contents)?)
}
