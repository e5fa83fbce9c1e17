// ⚙️ Configuration
// Sparse TOML file, every key optional. Lives at
// <config_dir>/corte-caja/config.toml unless --config points elsewhere.
// A missing file means defaults.

use crate::error::ConfigError;
use crate::record::parse_amount;
use crate::session::DEFAULT_OPENING_LABEL;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct CorteConfig {
    #[serde(default)]
    pub drawer: DrawerConfig,
    #[serde(default)]
    pub movements: MovementsConfig,
    #[serde(default)]
    pub import: ImportConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct DrawerConfig {
    pub opening_label: Option<String>,
    /// Increment used by the +/- keys on the opening amount, e.g. "500.00"
    pub opening_step: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct MovementsConfig {
    /// Labels offered by the movement form (the provider list)
    pub labels: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ImportConfig {
    pub delimiter: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ExportConfig {
    pub output_dir: Option<PathBuf>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_LABELS: [&str; 5] = [
    "Proveedor A",
    "Proveedor B",
    "Proveedor C",
    "Proveedor D",
    "Proveedor E",
];
pub const DEFAULT_OPENING_STEP: &str = "500.00";
pub const DEFAULT_DELIMITER: u8 = b',';

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub opening_label: String,
    pub opening_step: Decimal,
    pub labels: Vec<String>,
    pub delimiter: u8,
    pub output_dir: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        ResolvedConfig {
            opening_label: DEFAULT_OPENING_LABEL.to_string(),
            opening_step: Decimal::new(500, 0),
            labels: DEFAULT_LABELS.iter().map(|s| s.to_string()).collect(),
            delimiter: DEFAULT_DELIMITER,
            output_dir: PathBuf::from("."),
        }
    }
}

impl ResolvedConfig {
    pub fn is_allowed_label(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }
}

// ============================================================================
// Loading
// ============================================================================

/// `<config_dir>/corte-caja/config.toml`
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("corte-caja").join("config.toml"))
}

/// Load a config file. A missing file yields the empty config.
pub fn load_config(path: &Path) -> Result<CorteConfig, ConfigError> {
    if !path.exists() {
        info!("No config file at {}, using defaults", path.display());
        return Ok(CorteConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config: CorteConfig = toml::from_str(&contents)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Explicit path wins over the default location
pub fn load(explicit: Option<&Path>) -> Result<ResolvedConfig, ConfigError> {
    let config = match explicit.map(Path::to_path_buf).or_else(config_path) {
        Some(path) => load_config(&path)?,
        None => CorteConfig::default(),
    };
    resolve(&config)
}

// ============================================================================
// Resolution
// ============================================================================

/// Collapse the sparse file onto the defaults, validating each value
pub fn resolve(config: &CorteConfig) -> Result<ResolvedConfig, ConfigError> {
    let defaults = ResolvedConfig::default();

    let opening_label = match &config.drawer.opening_label {
        Some(label) if label.trim().is_empty() => {
            return Err(ConfigError::Invalid {
                key: "drawer.opening_label",
                reason: "must not be empty".to_string(),
            });
        }
        Some(label) => label.clone(),
        None => defaults.opening_label,
    };

    let opening_step = match &config.drawer.opening_step {
        Some(raw) => match parse_amount(raw) {
            Some(step) if step > Decimal::ZERO => step,
            _ => {
                return Err(ConfigError::Invalid {
                    key: "drawer.opening_step",
                    reason: format!("expected a positive amount, got {:?}", raw),
                });
            }
        },
        None => defaults.opening_step,
    };

    let labels = match &config.movements.labels {
        Some(labels) => {
            let labels: Vec<String> = labels
                .iter()
                .map(|l| l.trim().to_string())
                .filter(|l| !l.is_empty())
                .collect();
            if labels.is_empty() {
                return Err(ConfigError::Invalid {
                    key: "movements.labels",
                    reason: "at least one label is required".to_string(),
                });
            }
            labels
        }
        None => defaults.labels,
    };

    let delimiter = match &config.import.delimiter {
        Some(raw) => match raw.as_bytes() {
            [byte] => *byte,
            _ => {
                return Err(ConfigError::Invalid {
                    key: "import.delimiter",
                    reason: format!("expected a single ASCII character, got {:?}", raw),
                });
            }
        },
        None => defaults.delimiter,
    };

    let output_dir = config
        .export
        .output_dir
        .clone()
        .unwrap_or(defaults.output_dir);

    Ok(ResolvedConfig {
        opening_label,
        opening_step,
        labels,
        delimiter,
        output_dir,
    })
}
