//! Single-gauge analysis: run segmentation, MDPD, storm merge, statistics.

use tracing::{debug, info};

use crate::aggregate::{DryStatistics, StormStatistics, aggregate_storms};
use crate::error::StormError;
use crate::event::StormSequence;
use crate::mdpd::{MdpdEstimate, estimate_mdpd};
use crate::segment::{dry_runs, merge_storms};

/// How the minimum dry-period duration is obtained.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MdpdMode {
    /// Estimate from the gauge's own dry runs.
    Estimate,
    /// Use a fixed value for every gauge.
    Fixed(f64),
}

/// Configuration for [`analyze`].
///
/// # Example
///
/// ```
/// use raingen_storms::{AnalysisConfig, MdpdMode};
///
/// let config = AnalysisConfig::new().with_fixed_mdpd(6.0);
/// assert_eq!(config.mdpd_mode(), MdpdMode::Fixed(6.0));
/// ```
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    mdpd_mode: MdpdMode,
}

impl AnalysisConfig {
    /// Creates a configuration that estimates the MDPD.
    pub fn new() -> Self {
        Self {
            mdpd_mode: MdpdMode::Estimate,
        }
    }

    /// Sets the MDPD mode.
    pub fn with_mdpd_mode(mut self, mode: MdpdMode) -> Self {
        self.mdpd_mode = mode;
        self
    }

    /// Skips estimation and uses `mdpd` directly.
    pub fn with_fixed_mdpd(self, mdpd: f64) -> Self {
        self.with_mdpd_mode(MdpdMode::Fixed(mdpd))
    }

    /// Returns the MDPD mode.
    pub fn mdpd_mode(&self) -> MdpdMode {
        self.mdpd_mode
    }

    /// Validates this configuration.
    ///
    /// A fixed MDPD must be finite and non-negative.
    pub fn validate(&self) -> Result<(), StormError> {
        if let MdpdMode::Fixed(value) = self.mdpd_mode
            && (!value.is_finite() || value < 0.0)
        {
            return Err(StormError::InvalidMdpd { value });
        }
        Ok(())
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything learned about one gauge series.
#[derive(Debug, Clone)]
pub struct GaugeAnalysis {
    dry_runs: Vec<usize>,
    mdpd: f64,
    estimate: Option<MdpdEstimate>,
    sequence: StormSequence,
    storm_stats: StormStatistics,
    dry_stats: DryStatistics,
}

impl GaugeAnalysis {
    /// Raw dry-run lengths from the first pass.
    pub fn dry_runs(&self) -> &[usize] {
        &self.dry_runs
    }

    /// MDPD used for the storm merge.
    pub fn mdpd(&self) -> f64 {
        self.mdpd
    }

    /// Estimation details, `None` when the MDPD was fixed.
    pub fn estimate(&self) -> Option<&MdpdEstimate> {
        self.estimate.as_ref()
    }

    /// Merged storms and dry periods.
    pub fn sequence(&self) -> &StormSequence {
        &self.sequence
    }

    /// Storm population statistics.
    pub fn storm_stats(&self) -> &StormStatistics {
        &self.storm_stats
    }

    /// Qualifying dry-period statistics.
    pub fn dry_stats(&self) -> &DryStatistics {
        &self.dry_stats
    }
}

/// Analyse one gauge's depth series.
///
/// # Errors
///
/// Propagates estimation and merge errors, and returns
/// [`StormError::InsufficientData`] when the series contains no storm.
pub fn analyze(depths: &[f64], config: &AnalysisConfig) -> Result<GaugeAnalysis, StormError> {
    config.validate()?;

    let runs = dry_runs(depths);
    debug!(n_runs = runs.len(), len = depths.len(), "dry runs counted");

    let (mdpd, estimate) = match config.mdpd_mode() {
        MdpdMode::Fixed(value) => (value, None),
        MdpdMode::Estimate => {
            let est = estimate_mdpd(&runs)?;
            (est.value(), Some(est))
        }
    };

    let sequence = merge_storms(depths, mdpd)?;
    let storms: Vec<_> = sequence.storms().cloned().collect();
    let periods: Vec<_> = sequence.dry_periods().copied().collect();
    let storm_stats = aggregate_storms(&storms)?;
    let dry_stats = DryStatistics::from_periods(&periods);

    info!(
        mdpd,
        n_storms = storm_stats.n_storms(),
        n_dry_periods = dry_stats.n_periods(),
        mean_intensity = storm_stats.mean_intensity(),
        "gauge analysed"
    );

    Ok(GaugeAnalysis {
        dry_runs: runs,
        mdpd,
        estimate,
        sequence,
        storm_stats,
        dry_stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_mdpd_skips_estimation() {
        let series = [0.0, 0.0, 5.0, 5.0, 0.0, 0.0, 0.0, 0.0, 0.0, 3.0, 0.0];
        let a = analyze(&series, &AnalysisConfig::new().with_fixed_mdpd(3.0)).unwrap();
        assert!(a.estimate().is_none());
        assert_eq!(a.mdpd(), 3.0);
        assert_eq!(a.dry_runs(), &[2, 5, 1]);
        assert_eq!(a.storm_stats().n_storms(), 2);
        assert_eq!(a.dry_stats().n_periods(), 1);
        assert_eq!(a.sequence().tail_dry(), 1);
    }

    #[test]
    fn invalid_fixed_mdpd_rejected() {
        let config = AnalysisConfig::new().with_fixed_mdpd(-2.0);
        assert!(matches!(
            config.validate(),
            Err(StormError::InvalidMdpd { .. })
        ));
        assert!(analyze(&[1.0], &config).is_err());
    }

    #[test]
    fn all_dry_series_has_no_storms() {
        let config = AnalysisConfig::new().with_fixed_mdpd(2.0);
        assert!(matches!(
            analyze(&[0.0; 10], &config),
            Err(StormError::InsufficientData { what: "storms", .. })
        ));
    }

    #[test]
    fn estimation_failure_propagates() {
        // dry runs 1..=5: CV stays below 1
        let mut series = Vec::new();
        for run in 1..=5 {
            series.push(1.0);
            series.extend(std::iter::repeat_n(0.0, run));
        }
        series.push(1.0);
        assert!(matches!(
            analyze(&series, &AnalysisConfig::default()),
            Err(StormError::EstimationFailure { .. })
        ));
    }
}
