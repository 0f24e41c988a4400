//! Gauge manifest entries, per-gauge series and the loaded multi-gauge dataset.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::IoError;
use crate::reader::{ReaderConfig, read_gauge_series};

// ---------------------------------------------------------------------------
// GaugeSpec
// ---------------------------------------------------------------------------

/// Where a gauge's series lives and where the gauge stands.
#[derive(Debug, Clone, PartialEq)]
pub struct GaugeSpec {
    name: String,
    path: PathBuf,
    x: f64,
    y: f64,
}

impl GaugeSpec {
    /// Creates a manifest entry for one gauge.
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>, x: f64, y: f64) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            x,
            y,
        }
    }

    /// Gauge name, unique within a dataset.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Path of the series file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Gauge coordinates `(x, y)`.
    pub fn location(&self) -> (f64, f64) {
        (self.x, self.y)
    }
}

// ---------------------------------------------------------------------------
// GaugeSeries
// ---------------------------------------------------------------------------

/// Ordered `(timestamp, depth)` pairs recorded at one gauge.
///
/// Timestamps are kept verbatim; the generator works in timestep indices.
/// Depths are finite and non-negative (enforced by the reader).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GaugeSeries {
    timestamps: Vec<String>,
    depths: Vec<f64>,
}

impl GaugeSeries {
    pub(crate) fn new(timestamps: Vec<String>, depths: Vec<f64>) -> Self {
        debug_assert_eq!(timestamps.len(), depths.len());
        Self { timestamps, depths }
    }

    /// Builds a series from bare depths, numbering timestamps from 1.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] if any depth is negative or non-finite.
    pub fn from_depths(depths: Vec<f64>) -> Result<Self, IoError> {
        let bad: Vec<String> = depths
            .iter()
            .enumerate()
            .filter(|(_, d)| !d.is_finite() || **d < 0.0)
            .map(|(i, d)| format!("depth[{i}] = {d}"))
            .collect();
        if !bad.is_empty() {
            return Err(IoError::Validation {
                count: bad.len(),
                details: bad.join("; "),
            });
        }
        let timestamps = (1..=depths.len()).map(|i| i.to_string()).collect();
        Ok(Self { timestamps, depths })
    }

    /// Raw timestamp column.
    pub fn timestamps(&self) -> &[String] {
        &self.timestamps
    }

    /// Depth per timestep.
    pub fn depths(&self) -> &[f64] {
        &self.depths
    }

    /// Number of timesteps.
    pub fn len(&self) -> usize {
        self.depths.len()
    }

    /// Returns `true` if the series has no timesteps.
    pub fn is_empty(&self) -> bool {
        self.depths.is_empty()
    }
}

// ---------------------------------------------------------------------------
// GaugeDataset
// ---------------------------------------------------------------------------

/// All gauges of one run, in manifest order.
#[derive(Debug, Clone)]
pub struct GaugeDataset {
    gauges: Vec<(GaugeSpec, GaugeSeries)>,
}

impl GaugeDataset {
    /// Read every gauge in `specs`.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] for an empty manifest or duplicate
    /// gauge names, and propagates reader errors for the first gauge whose
    /// file cannot be loaded. A file without records is
    /// [`IoError::EmptySeries`].
    pub fn load(specs: &[GaugeSpec], config: &ReaderConfig) -> Result<Self, IoError> {
        validate_manifest(specs)?;

        let mut gauges = Vec::with_capacity(specs.len());
        for spec in specs {
            gauges.push((spec.clone(), read_nonempty(spec, config)?));
        }

        let dataset = Self { gauges };
        info!(
            n_gauges = dataset.n_gauges(),
            max_len = dataset.max_len(),
            common_len = dataset.common_len(),
            "gauge dataset loaded"
        );
        Ok(dataset)
    }

    /// Read every gauge in `specs`, skipping gauges whose file fails to load
    /// or holds no records.
    ///
    /// Returns the loaded dataset (possibly with no gauges) and the skipped
    /// gauges with their errors, both in manifest order.
    ///
    /// # Errors
    ///
    /// Manifest problems are still fatal, as for [`GaugeDataset::load`].
    pub fn load_partial(
        specs: &[GaugeSpec],
        config: &ReaderConfig,
    ) -> Result<(Self, Vec<(String, IoError)>), IoError> {
        validate_manifest(specs)?;

        let mut gauges = Vec::with_capacity(specs.len());
        let mut skipped = Vec::new();
        for spec in specs {
            match read_nonempty(spec, config) {
                Ok(series) => gauges.push((spec.clone(), series)),
                Err(e) => {
                    warn!(gauge = %spec.name(), error = %e, "skipping gauge");
                    skipped.push((spec.name().to_string(), e));
                }
            }
        }

        let dataset = Self { gauges };
        info!(
            n_gauges = dataset.n_gauges(),
            n_skipped = skipped.len(),
            common_len = dataset.common_len(),
            "gauge dataset loaded"
        );
        Ok((dataset, skipped))
    }

    /// Builds a dataset from series already in memory.
    ///
    /// # Errors
    ///
    /// Same manifest checks as [`GaugeDataset::load`], plus
    /// [`IoError::Validation`] if the two slices differ in length.
    pub fn from_parts(specs: Vec<GaugeSpec>, series: Vec<GaugeSeries>) -> Result<Self, IoError> {
        if specs.len() != series.len() {
            return Err(IoError::Validation {
                count: 1,
                details: format!("{} gauge specs but {} series", specs.len(), series.len()),
            });
        }
        validate_manifest(&specs)?;
        Ok(Self {
            gauges: specs.into_iter().zip(series).collect(),
        })
    }

    /// Number of gauges.
    pub fn n_gauges(&self) -> usize {
        self.gauges.len()
    }

    /// Length of the longest series.
    pub fn max_len(&self) -> usize {
        self.gauges.iter().map(|(_, s)| s.len()).max().unwrap_or(0)
    }

    /// Length of the shortest series (the span every gauge covers).
    pub fn common_len(&self) -> usize {
        self.gauges.iter().map(|(_, s)| s.len()).min().unwrap_or(0)
    }

    /// Iterate over `(spec, series)` in manifest order.
    pub fn iter(&self) -> impl Iterator<Item = (&GaugeSpec, &GaugeSeries)> {
        self.gauges.iter().map(|(g, s)| (g, s))
    }

    /// Look up a gauge by name.
    pub fn get(&self, name: &str) -> Option<(&GaugeSpec, &GaugeSeries)> {
        self.iter().find(|(g, _)| g.name() == name)
    }
}

fn read_nonempty(spec: &GaugeSpec, config: &ReaderConfig) -> Result<GaugeSeries, IoError> {
    let series = read_gauge_series(spec.path(), config)?;
    if series.is_empty() {
        return Err(IoError::EmptySeries {
            path: spec.path().to_path_buf(),
        });
    }
    Ok(series)
}

fn validate_manifest(specs: &[GaugeSpec]) -> Result<(), IoError> {
    let mut problems = Vec::new();
    if specs.is_empty() {
        problems.push("gauge manifest is empty".to_string());
    }
    let mut seen = BTreeSet::new();
    for spec in specs {
        if !seen.insert(spec.name()) {
            problems.push(format!("duplicate gauge name '{}'", spec.name()));
        }
        let (x, y) = spec.location();
        if !x.is_finite() || !y.is_finite() {
            problems.push(format!("gauge '{}' has non-finite coordinates", spec.name()));
        }
    }
    if problems.is_empty() {
        Ok(())
    } else {
        Err(IoError::Validation {
            count: problems.len(),
            details: problems.join("; "),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_depths_numbers_timestamps() {
        let s = GaugeSeries::from_depths(vec![0.0, 1.5, 0.0]).unwrap();
        assert_eq!(s.len(), 3);
        assert_eq!(s.timestamps(), &["1", "2", "3"]);
    }

    #[test]
    fn from_depths_rejects_negative_and_nan() {
        let err = GaugeSeries::from_depths(vec![1.0, -1.0, f64::NAN]).unwrap_err();
        assert!(matches!(err, IoError::Validation { count: 2, .. }));
    }

    #[test]
    fn lengths_and_lookup() {
        let specs = vec![
            GaugeSpec::new("a", "a.txt", 0.0, 0.0),
            GaugeSpec::new("b", "b.txt", 1.0, 0.0),
        ];
        let series = vec![
            GaugeSeries::from_depths(vec![0.0; 5]).unwrap(),
            GaugeSeries::from_depths(vec![1.0; 3]).unwrap(),
        ];
        let ds = GaugeDataset::from_parts(specs, series).unwrap();
        assert_eq!(ds.n_gauges(), 2);
        assert_eq!(ds.max_len(), 5);
        assert_eq!(ds.common_len(), 3);
        assert_eq!(ds.get("b").unwrap().1.len(), 3);
        assert!(ds.get("c").is_none());
        let names: Vec<&str> = ds.iter().map(|(g, _)| g.name()).collect();
        assert_eq!(names, ["a", "b"]);
    }

    #[test]
    fn manifest_problems_are_accumulated() {
        let specs = vec![
            GaugeSpec::new("a", "a.txt", 0.0, 0.0),
            GaugeSpec::new("a", "b.txt", f64::NAN, 0.0),
        ];
        let series = vec![GaugeSeries::default(), GaugeSeries::default()];
        let err = GaugeDataset::from_parts(specs, series).unwrap_err();
        match err {
            IoError::Validation { count, details } => {
                assert_eq!(count, 2);
                assert!(details.contains("duplicate"));
                assert!(details.contains("non-finite"));
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn empty_manifest_rejected() {
        let err = GaugeDataset::from_parts(vec![], vec![]).unwrap_err();
        assert!(matches!(err, IoError::Validation { count: 1, .. }));
    }
}
