//! Run Configuration - batch location, window distances, volumetrics and curve names
//!
//! Every section is `#[serde(default)]`, so a partial TOML file only overrides
//! what it names. Defaults match the usual field run: 100 ft up / 50 ft down,
//! A = 1 acre, Bo = 1.25, PHIT / SW input curves.

use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

use crate::engine::DerivationParams;
use crate::types::WindowSpec;

/// Environment variable naming a config file to load.
pub const CONFIG_ENV_VAR: &str = "LAS_WINDOW_CONFIG";

/// Config file looked for in the current directory when the env var is unset.
pub const LOCAL_CONFIG_FILE: &str = "las_window.toml";

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration for a batch run.
///
/// Load with `RunConfig::load()` which searches:
/// 1. `$LAS_WINDOW_CONFIG`
/// 2. `./las_window.toml`
/// 3. Built-in defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Where the LAS files live and where results go
    #[serde(default)]
    pub input: InputConfig,

    /// Aggregation window distances
    #[serde(default)]
    pub window: WindowConfig,

    /// OOIP inputs
    #[serde(default)]
    pub volumetrics: VolumetricsConfig,

    /// Input curve mnemonics
    #[serde(default)]
    pub curves: CurveConfig,
}

impl RunConfig {
    /// Load configuration using the standard search order:
    /// 1. `$LAS_WINDOW_CONFIG` environment variable
    /// 2. `./las_window.toml` in the current working directory
    /// 3. Built-in defaults
    ///
    /// A file that is found but fails to load is an error, never a silent
    /// fallback to defaults.
    pub fn load() -> Result<Self, ConfigError> {
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            let p = PathBuf::from(&path);
            if p.exists() {
                let config = Self::load_from_file(&p)?;
                info!(path = %p.display(), "Loaded run config from {}", CONFIG_ENV_VAR);
                return Ok(config);
            }
            warn!(path = %path, "{} points to non-existent file, falling back", CONFIG_ENV_VAR);
        }

        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() {
            let config = Self::load_from_file(&local)?;
            info!("Loaded run config from ./{}", LOCAL_CONFIG_FILE);
            return Ok(config);
        }

        info!("No {} found, using built-in defaults", LOCAL_CONFIG_FILE);
        Ok(Self::default())
    }

    /// Load from a specific TOML file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::from_toml_str(&contents).map_err(|e| match e {
            ConfigError::Parse(_, inner) => ConfigError::Parse(path.to_path_buf(), inner),
            other => other,
        })
    }

    /// Parse and validate TOML text. Unknown keys are logged as warnings.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        // Two-pass: check for unknown keys first (warnings only)
        for w in &super::validation::validate_unknown_keys(contents) {
            warn!("{}", w);
        }

        let config: Self = toml::from_str(contents)
            .map_err(|e| ConfigError::Parse(PathBuf::new(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the current config to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Validate every value a batch run depends on.
    ///
    /// Rules:
    /// - Window distances must be finite and non-negative; `ft_above` must be > 0
    /// - Area and Bo must be finite and > 0 (Bo is a divisor)
    /// - Curve names and the file extension must be non-empty
    /// - Writing next to the inputs requires a non-empty suffix
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors: Vec<String> = Vec::new();

        let w = &self.window;
        if !w.ft_above.is_finite() || w.ft_above <= 0.0 {
            errors.push(format!(
                "window.ft_above = {} must be a finite distance > 0",
                w.ft_above
            ));
        }
        if !w.ft_below.is_finite() || w.ft_below < 0.0 {
            errors.push(format!(
                "window.ft_below = {} must be a finite distance >= 0",
                w.ft_below
            ));
        }

        let v = &self.volumetrics;
        Self::check_positive(v.area_acres, "volumetrics.area_acres", &mut errors);
        Self::check_positive(v.bo, "volumetrics.bo", &mut errors);

        if self.curves.phi.trim().is_empty() {
            errors.push("curves.phi must name a porosity curve".to_string());
        }
        if self.curves.sw.trim().is_empty() {
            errors.push("curves.sw must name a water saturation curve".to_string());
        }

        let input = &self.input;
        if input.extension.trim_start_matches('.').is_empty() {
            errors.push("input.extension must not be empty".to_string());
        }
        let writes_in_place = input
            .output_dir
            .as_ref()
            .map_or(true, |out| same_folder(out, &input.folder));
        if writes_in_place && input.suffix.is_empty() {
            errors.push(
                "input.suffix must not be empty when output_dir is the input folder (inputs would be overwritten)"
                    .to_string(),
            );
        }

        let (range_errors, range_warnings) = super::validation::validate_physical_ranges(self);
        errors.extend(range_errors);
        for w in &range_warnings {
            warn!("{}", w);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    fn check_positive(value: f64, name: &str, errors: &mut Vec<String>) {
        // NaN/Inf comparisons silently pass
        if !value.is_finite() || value <= 0.0 {
            errors.push(format!("{name} = {value} must be a finite number > 0"));
        }
    }

    /// Engine parameters for this run.
    pub fn derivation_params(&self) -> Result<DerivationParams, ConfigError> {
        let window = WindowSpec::new(self.window.ft_above, self.window.ft_below)
            .map_err(|e| ConfigError::Validation(vec![e.to_string()]))?;
        Ok(DerivationParams {
            phi: self.curves.phi.clone(),
            sw: self.curves.sw.clone(),
            area_acres: self.volumetrics.area_acres,
            bo: self.volumetrics.bo,
            window,
        })
    }

    /// Directory results are written to (the input folder unless overridden).
    pub fn output_dir(&self) -> &Path {
        self.input.output_dir.as_deref().unwrap_or(&self.input.folder)
    }
}

/// Whether two folder spellings name the same directory.
///
/// Existing folders are compared after canonicalization; otherwise `.`
/// components are dropped and the remaining components compared.
fn same_folder(a: &Path, b: &Path) -> bool {
    if let (Ok(a), Ok(b)) = (a.canonicalize(), b.canonicalize()) {
        return a == b;
    }
    let lexical = |p: &Path| -> PathBuf {
        p.components()
            .filter(|c| !matches!(c, Component::CurDir))
            .collect()
    };
    lexical(a) == lexical(b)
}

/// Why a run config could not be loaded.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config I/O error ({}): {}", .0.display(), .1)]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Config parse error ({}): {}", .0.display(), .1)]
    Parse(PathBuf, #[source] toml::de::Error),

    #[error("Config serialization error: {0}")]
    Serialize(#[source] toml::ser::Error),

    #[error("Config validation failed:\n{}", format_errors(.0))]
    Validation(Vec<String>),
}

fn format_errors(errors: &[String]) -> String {
    errors
        .iter()
        .map(|e| format!("  - {e}"))
        .collect::<Vec<_>>()
        .join("\n")
}

// ============================================================================
// Input
// ============================================================================

/// Batch input location and output naming.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputConfig {
    /// Folder scanned (non-recursively) for log files
    #[serde(default = "default_folder")]
    pub folder: PathBuf,

    /// File extension to process, matched case-insensitively
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Where calculated files are written; defaults to `folder`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,

    /// Appended to the input file stem for the output file name
    #[serde(default = "default_suffix")]
    pub suffix: String,
}

fn default_folder() -> PathBuf {
    PathBuf::from(".")
}
fn default_extension() -> String {
    "las".to_string()
}
fn default_suffix() -> String {
    "_calculated".to_string()
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            folder: default_folder(),
            extension: default_extension(),
            output_dir: None,
            suffix: default_suffix(),
        }
    }
}

// ============================================================================
// Window
// ============================================================================

/// Aggregation window in depth units (feet for US logs).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Distance looked up-hole from each sample
    #[serde(default = "default_ft_above")]
    pub ft_above: f64,

    /// Distance looked down-hole from each sample
    #[serde(default = "default_ft_below")]
    pub ft_below: f64,
}

fn default_ft_above() -> f64 {
    100.0
}
fn default_ft_below() -> f64 {
    50.0
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            ft_above: default_ft_above(),
            ft_below: default_ft_below(),
        }
    }
}

// ============================================================================
// Volumetrics
// ============================================================================

/// OOIP inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumetricsConfig {
    /// Drainage area in acres (`A`)
    #[serde(default = "default_area_acres")]
    pub area_acres: f64,

    /// Oil formation volume factor (`Bo`, rb/stb)
    #[serde(default = "default_bo")]
    pub bo: f64,
}

fn default_area_acres() -> f64 {
    1.0
}
fn default_bo() -> f64 {
    1.25
}

impl Default for VolumetricsConfig {
    fn default() -> Self {
        Self {
            area_acres: default_area_acres(),
            bo: default_bo(),
        }
    }
}

// ============================================================================
// Curves
// ============================================================================

/// Input curve mnemonics, assumed identical across every file in the batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurveConfig {
    /// Porosity curve
    #[serde(default = "default_phi")]
    pub phi: String,

    /// Water saturation curve
    #[serde(default = "default_sw")]
    pub sw: String,
}

fn default_phi() -> String {
    "PHIT".to_string()
}
fn default_sw() -> String {
    "SW".to_string()
}

impl Default for CurveConfig {
    fn default() -> Self {
        Self {
            phi: default_phi(),
            sw: default_sw(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
