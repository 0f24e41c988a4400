//! Pure conversion functions: TOML config structs -> crate API config types.

use anyhow::{Context, Result, bail};

use crate::config::*;

use raingen_idw::{CoincidentPolicy, Extent, IdwConfig, Point, grid_centroids};
use raingen_io::{Delimiter, GaugeSpec, ReaderConfig, normalize_path};
use raingen_storms::AnalysisConfig;
use raingen_synth::{StormModel, SynthConfig};

/// Where the interpolator takes its gauge series from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesSource {
    Observed,
    Synthetic,
}

/// Parses a delimiter name: `"whitespace"` or a single character.
pub fn parse_delimiter(s: &str) -> Result<Delimiter> {
    if s.eq_ignore_ascii_case("whitespace") {
        return Ok(Delimiter::Whitespace);
    }
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(Delimiter::Char(c)),
        _ => bail!("delimiter must be \"whitespace\" or a single character, got {s:?}"),
    }
}

/// Parses a storm model name string into the corresponding enum variant.
pub fn parse_storm_model(s: &str) -> Result<StormModel> {
    match s.to_lowercase().as_str() {
        "historical" => Ok(StormModel::Historical),
        "duration-intensity" => Ok(StormModel::DurationIntensity),
        other => bail!("unknown storm model: {other:?}"),
    }
}

/// Parses a coincident-point policy name.
pub fn parse_coincident(s: &str) -> Result<CoincidentPolicy> {
    match s.to_lowercase().as_str() {
        "use-gauge" => Ok(CoincidentPolicy::UseGauge),
        "reject" => Ok(CoincidentPolicy::Reject),
        other => bail!("unknown coincident policy: {other:?}"),
    }
}

/// Parses an interpolation source name.
pub fn parse_source(s: &str) -> Result<SeriesSource> {
    match s.to_lowercase().as_str() {
        "observed" => Ok(SeriesSource::Observed),
        "synthetic" => Ok(SeriesSource::Synthetic),
        other => bail!("unknown interpolation source: {other:?}"),
    }
}

/// Builds a [`ReaderConfig`] from the TOML input configuration.
pub fn build_reader_config(input: &InputToml) -> Result<ReaderConfig> {
    let cfg = ReaderConfig::new()
        .with_header_present(input.header_present)
        .with_delimiter(parse_delimiter(&input.delimiter)?);
    cfg.validate().context("invalid [input] configuration")?;
    Ok(cfg)
}

/// Builds the gauge manifest, normalising each path.
pub fn build_gauge_specs(gauges: &[GaugeToml]) -> Vec<GaugeSpec> {
    gauges
        .iter()
        .map(|g| GaugeSpec::new(&g.name, normalize_path(&g.path), g.x, g.y))
        .collect()
}

/// Builds an [`AnalysisConfig`] from the TOML analysis configuration.
pub fn build_analysis_config(analysis: &AnalysisToml) -> Result<AnalysisConfig> {
    let cfg = match analysis.fixed_mdpd {
        Some(mdpd) => AnalysisConfig::new().with_fixed_mdpd(mdpd),
        None => AnalysisConfig::new(),
    };
    cfg.validate().context("invalid [analysis] configuration")?;
    Ok(cfg)
}

/// Builds a [`SynthConfig`] from the TOML generate configuration.
///
/// `length` overrides `requested_length`; one of them must be set and
/// positive.
pub fn build_synth_config(generate: &GenerateToml, length: Option<usize>) -> Result<SynthConfig> {
    let Some(requested) = length.or(generate.requested_length) else {
        bail!("no requested length: set [generate].requested_length or use --length");
    };
    if requested == 0 {
        bail!("requested length must be positive, got 0");
    }
    let cfg = SynthConfig::new(requested)
        .with_storm_model(parse_storm_model(&generate.storm_model)?)
        .with_max_dry_attempts(generate.max_dry_attempts);
    cfg.validate().context("invalid [generate] configuration")?;
    Ok(cfg)
}

/// Builds an [`IdwConfig`] from the TOML interpolate configuration.
pub fn build_idw_config(interp: &InterpolateToml, parallel: bool) -> Result<IdwConfig> {
    let cfg = IdwConfig::new()
        .with_power(interp.power)
        .with_coincident(parse_coincident(&interp.coincident)?)
        .with_parallel(parallel);
    cfg.validate().context("invalid [interpolate] configuration")?;
    Ok(cfg)
}

/// Collects explicit targets followed by grid centroids.
///
/// Missing grid bounds fall back to the bounding box of `gauges`.
pub fn build_targets(interp: &InterpolateToml, gauges: &[Point]) -> Result<Vec<Point>> {
    let mut targets: Vec<Point> = interp
        .targets
        .iter()
        .map(|t| Point::new(t.x, t.y))
        .collect();

    if let Some(grid) = &interp.grid {
        let bbox = Extent::from_points(gauges).context("cannot derive grid extent from gauges")?;
        let extent = Extent::new(
            grid.xmin.unwrap_or(bbox.xmin),
            grid.xmax.unwrap_or(bbox.xmax),
            grid.ymin.unwrap_or(bbox.ymin),
            grid.ymax.unwrap_or(bbox.ymax),
        )
        .context("invalid [interpolate.grid] extent")?;
        let centroids =
            grid_centroids(&extent, grid.dx, grid.dy).context("invalid [interpolate.grid]")?;
        targets.extend(centroids);
    }

    if targets.is_empty() {
        bail!("no interpolation targets: set [interpolate].targets or [interpolate.grid]");
    }
    Ok(targets)
}
