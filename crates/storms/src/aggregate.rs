//! Storm population statistics and duration-class intensities.

use raingen_stats::{mean, min_max};

use crate::error::StormError;
use crate::event::{DryPeriod, Storm};

/// Number of equal-width duration classes.
pub const N_CLASSES: usize = 4;

/// Storms whose duration falls into one equal-width bin.
///
/// Bins are half-open `[lower, upper)` except the last, which is closed so
/// the longest storm is included.
#[derive(Debug, Clone, PartialEq)]
pub struct DurationClass {
    index: usize,
    lower: f64,
    upper: f64,
    intensities: Vec<f64>,
}

impl DurationClass {
    /// Zero-based class index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Inclusive lower duration bound.
    pub fn lower(&self) -> f64 {
        self.lower
    }

    /// Upper duration bound (exclusive except for the last class).
    pub fn upper(&self) -> f64 {
        self.upper
    }

    /// Mean intensities of the member storms, in storm order.
    pub fn intensities(&self) -> &[f64] {
        &self.intensities
    }

    /// Number of member storms.
    pub fn len(&self) -> usize {
        self.intensities.len()
    }

    /// Returns `true` if no storm falls into this class.
    pub fn is_empty(&self) -> bool {
        self.intensities.is_empty()
    }

    /// Mean of the member storms' intensities.
    ///
    /// # Errors
    ///
    /// Returns [`StormError::EmptyClass`] if the class has no members.
    pub fn mean_intensity(&self) -> Result<f64, StormError> {
        if self.intensities.is_empty() {
            return Err(StormError::EmptyClass { class: self.index });
        }
        Ok(mean(&self.intensities))
    }
}

/// Summary statistics over all closed storms of one gauge.
#[derive(Debug, Clone, PartialEq)]
pub struct StormStatistics {
    n_storms: usize,
    total_volume: f64,
    mean_volume: f64,
    mean_intensity: f64,
    mean_duration: f64,
    mean_inter_storm_dpd: f64,
    min_duration: usize,
    max_duration: usize,
    classes: [DurationClass; N_CLASSES],
}

impl StormStatistics {
    /// Number of storms.
    pub fn n_storms(&self) -> usize {
        self.n_storms
    }

    /// Sum of storm volumes.
    pub fn total_volume(&self) -> f64 {
        self.total_volume
    }

    /// Mean storm volume.
    pub fn mean_volume(&self) -> f64 {
        self.mean_volume
    }

    /// Mean of per-storm mean intensities.
    pub fn mean_intensity(&self) -> f64 {
        self.mean_intensity
    }

    /// Mean storm duration in timesteps.
    pub fn mean_duration(&self) -> f64 {
        self.mean_duration
    }

    /// Mean number of internal dry timesteps per storm.
    pub fn mean_inter_storm_dpd(&self) -> f64 {
        self.mean_inter_storm_dpd
    }

    /// Shortest storm duration.
    pub fn min_duration(&self) -> usize {
        self.min_duration
    }

    /// Longest storm duration.
    pub fn max_duration(&self) -> usize {
        self.max_duration
    }

    /// The four duration classes, shortest first.
    pub fn classes(&self) -> &[DurationClass; N_CLASSES] {
        &self.classes
    }

    /// Index of the class whose interval contains `duration`.
    ///
    /// Durations below the observed minimum map to class 0 and durations
    /// above the maximum to the last class.
    pub fn class_of(&self, duration: usize) -> usize {
        class_index(
            duration as f64,
            self.min_duration as f64,
            class_width(self.min_duration, self.max_duration),
        )
    }

    /// Per-class mean intensity, `None` for an empty class.
    pub fn class_means(&self) -> [Option<f64>; N_CLASSES] {
        std::array::from_fn(|i| self.classes[i].mean_intensity().ok())
    }
}

fn class_width(min: usize, max: usize) -> f64 {
    (max - min) as f64 / N_CLASSES as f64
}

/// Compares against each bin's upper edge `min + (k + 1) * width`, so a zero
/// width puts every storm in the last (closed) class.
fn class_index(duration: f64, min: f64, width: f64) -> usize {
    (0..N_CLASSES - 1)
        .find(|&k| duration < min + (k + 1) as f64 * width)
        .unwrap_or(N_CLASSES - 1)
}

/// Compute population statistics and duration classes for `storms`.
///
/// # Errors
///
/// Returns [`StormError::InsufficientData`] if `storms` is empty.
pub fn aggregate_storms(storms: &[Storm]) -> Result<StormStatistics, StormError> {
    let volumes: Vec<f64> = storms.iter().map(Storm::volume).collect();
    let intensities: Vec<f64> = storms.iter().map(Storm::mean_intensity).collect();
    let durations: Vec<f64> = storms.iter().map(|s| s.duration() as f64).collect();
    let inner_dry: Vec<f64> = storms.iter().map(|s| s.inter_storm_dpd() as f64).collect();

    let Some((lo, hi)) = min_max(&durations) else {
        return Err(StormError::InsufficientData {
            what: "storms",
            n: 0,
            min: 1,
        });
    };
    let (min_duration, max_duration) = (lo as usize, hi as usize);
    let width = class_width(min_duration, max_duration);

    let mut classes: [DurationClass; N_CLASSES] = std::array::from_fn(|k| DurationClass {
        index: k,
        lower: lo + k as f64 * width,
        upper: lo + (k + 1) as f64 * width,
        intensities: Vec::new(),
    });
    for (&d, &intensity) in durations.iter().zip(&intensities) {
        classes[class_index(d, lo, width)]
            .intensities
            .push(intensity);
    }

    Ok(StormStatistics {
        n_storms: storms.len(),
        total_volume: volumes.iter().sum(),
        mean_volume: mean(&volumes),
        mean_intensity: mean(&intensities),
        mean_duration: mean(&durations),
        mean_inter_storm_dpd: mean(&inner_dry),
        min_duration,
        max_duration,
        classes,
    })
}

/// Summary of the qualifying dry periods of one gauge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DryStatistics {
    n_periods: usize,
    total_length: usize,
}

impl DryStatistics {
    /// Summarise `periods`.
    pub fn from_periods(periods: &[DryPeriod]) -> Self {
        Self {
            n_periods: periods.len(),
            total_length: periods.iter().map(|p| p.length).sum(),
        }
    }

    /// Number of qualifying dry periods.
    pub fn n_periods(&self) -> usize {
        self.n_periods
    }

    /// Total dry timesteps across all periods.
    pub fn total_length(&self) -> usize {
        self.total_length
    }

    /// Mean dry-period length, `None` when there are no periods.
    pub fn mean_length(&self) -> Option<f64> {
        (self.n_periods > 0).then(|| self.total_length as f64 / self.n_periods as f64)
    }
}
