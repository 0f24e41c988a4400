//! Minimum dry-period duration (MDPD) estimation.
//!
//! Dry-run lengths between independent storms are roughly exponential, so
//! their coefficient of variation (CV) is close to 1. Short lulls inside a
//! storm inflate the CV. The estimator trims the shortest runs one at a time
//! and interpolates the run length at which the CV of the remaining
//! population crosses 1.

use raingen_stats::coefficient_of_variation;
use tracing::debug;

use crate::error::StormError;

/// One side of the CV = 1 crossing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CvBracket {
    /// Shortest dry-run length in the population that produced `cv`.
    pub dpd: f64,
    /// Coefficient of variation of that population.
    pub cv: f64,
}

/// Result of a successful MDPD estimation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MdpdEstimate {
    value: f64,
    below: CvBracket,
    above: CvBracket,
    iterations: usize,
}

impl MdpdEstimate {
    /// Estimated minimum dry-period duration, in timesteps.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Most recent population with `cv <= 1`.
    pub fn below(&self) -> CvBracket {
        self.below
    }

    /// Most recent population with `cv >= 1`.
    pub fn above(&self) -> CvBracket {
        self.above
    }

    /// Number of trimmed populations examined before the crossing.
    pub fn iterations(&self) -> usize {
        self.iterations
    }
}

/// Estimate the MDPD from raw dry-run lengths.
///
/// The lengths are sorted ascending. While at least two remain, the CV of the
/// remaining population is computed; a CV `<= 1` updates the lower bracket
/// and a CV `>= 1` the upper bracket, each with the current shortest run.
/// The shortest run is then removed. As soon as both brackets exist the
/// estimate is
///
/// ```text
/// MDPD = dpd1 + (1 - cv1) * (dpd2 - dpd1) / (cv2 - cv1)
/// ```
///
/// When `cv1 == cv2` (a population with CV exactly 1) the estimate is `dpd1`.
/// Zero lengths are ignored.
///
/// # Errors
///
/// Returns [`StormError::InsufficientData`] if fewer than two distinct lengths
/// are present, and [`StormError::EstimationFailure`] if the CV never
/// crosses 1.
pub fn estimate_mdpd(dry_runs: &[usize]) -> Result<MdpdEstimate, StormError> {
    let mut sorted: Vec<f64> = dry_runs
        .iter()
        .filter(|&&l| l > 0)
        .map(|&l| l as f64)
        .collect();
    sorted.sort_by(f64::total_cmp);

    let distinct = sorted
        .windows(2)
        .filter(|w| w[0] != w[1])
        .count()
        + usize::from(!sorted.is_empty());
    if distinct < 2 {
        return Err(StormError::InsufficientData {
            what: "distinct dry-run lengths",
            n: distinct,
            min: 2,
        });
    }

    let mut below: Option<CvBracket> = None;
    let mut above: Option<CvBracket> = None;
    let mut min_cv = f64::INFINITY;
    let mut max_cv = f64::NEG_INFINITY;
    let mut iterations = 0;

    for start in 0..sorted.len() - 1 {
        let remaining = &sorted[start..];
        let Some(cv) = coefficient_of_variation(remaining) else {
            continue;
        };
        iterations += 1;
        min_cv = min_cv.min(cv);
        max_cv = max_cv.max(cv);

        let dpd = remaining[0];
        if cv <= 1.0 {
            below = Some(CvBracket { dpd, cv });
        }
        if cv >= 1.0 {
            above = Some(CvBracket { dpd, cv });
        }

        if let (Some(lo), Some(hi)) = (below, above) {
            let value = if hi.cv == lo.cv {
                lo.dpd
            } else {
                lo.dpd + (1.0 - lo.cv) * (hi.dpd - lo.dpd) / (hi.cv - lo.cv)
            };
            debug!(
                mdpd = value,
                dpd1 = lo.dpd,
                cv1 = lo.cv,
                dpd2 = hi.dpd,
                cv2 = hi.cv,
                iterations,
                "MDPD estimated"
            );
            return Ok(MdpdEstimate {
                value,
                below: lo,
                above: hi,
                iterations,
            });
        }
    }

    Err(StormError::EstimationFailure {
        examined: iterations,
        min_cv,
        max_cv,
    })
}
