use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Top-level raingen configuration.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RaingenConfig {
    /// Global RNG seed.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Gauge file format.
    #[serde(default)]
    pub input: InputToml,

    /// Gauge manifest, in output order.
    #[serde(default)]
    pub gauges: Vec<GaugeToml>,

    /// Storm analysis settings.
    #[serde(default)]
    pub analysis: AnalysisToml,

    /// Synthesis settings.
    #[serde(default)]
    pub generate: GenerateToml,

    /// Interpolation settings.
    #[serde(default)]
    pub interpolate: InterpolateToml,
}

impl RaingenConfig {
    /// Reads and parses a TOML configuration file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let toml_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        toml::from_str(&toml_str).context("failed to parse TOML config")
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InputToml {
    #[serde(default = "default_true")]
    pub header_present: bool,
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
}

impl Default for InputToml {
    fn default() -> Self {
        Self {
            header_present: true,
            delimiter: default_delimiter(),
        }
    }
}

fn default_true() -> bool {
    true
}
fn default_delimiter() -> String {
    "whitespace".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GaugeToml {
    pub name: String,
    /// Raw path; normalised before use.
    pub path: String,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct AnalysisToml {
    /// Use this MDPD for every gauge instead of estimating it.
    #[serde(default)]
    pub fixed_mdpd: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GenerateToml {
    #[serde(default)]
    pub requested_length: Option<usize>,
    #[serde(default = "default_storm_model")]
    pub storm_model: String,
    #[serde(default = "default_true")]
    pub parallel: bool,
    #[serde(default = "default_max_dry_attempts")]
    pub max_dry_attempts: usize,
    pub output: Option<PathBuf>,
}

impl Default for GenerateToml {
    fn default() -> Self {
        Self {
            requested_length: None,
            storm_model: default_storm_model(),
            parallel: true,
            max_dry_attempts: default_max_dry_attempts(),
            output: None,
        }
    }
}

fn default_storm_model() -> String {
    "historical".to_string()
}
fn default_max_dry_attempts() -> usize {
    10_000
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InterpolateToml {
    #[serde(default = "default_power")]
    pub power: u32,
    #[serde(default = "default_coincident")]
    pub coincident: String,
    #[serde(default = "default_source")]
    pub source: String,
    pub output: Option<PathBuf>,
    #[serde(default)]
    pub targets: Vec<TargetToml>,
    #[serde(default)]
    pub grid: Option<GridToml>,
}

impl Default for InterpolateToml {
    fn default() -> Self {
        Self {
            power: default_power(),
            coincident: default_coincident(),
            source: default_source(),
            output: None,
            targets: Vec::new(),
            grid: None,
        }
    }
}

fn default_power() -> u32 {
    2
}
fn default_coincident() -> String {
    "use-gauge".to_string()
}
fn default_source() -> String {
    "observed".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TargetToml {
    pub x: f64,
    pub y: f64,
}

/// Generation grid. Missing bounds default to the gauges' bounding box.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GridToml {
    pub xmin: Option<f64>,
    pub xmax: Option<f64>,
    pub ymin: Option<f64>,
    pub ymax: Option<f64>,
    pub dx: f64,
    pub dy: f64,
}
