//! Configuration for sequence synthesis.

use crate::error::SynthError;

/// How a storm draw produces depths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StormModel {
    /// Resample one observed storm uniformly and emit its depth profile.
    #[default]
    Historical,
    /// Draw an observed duration, then a mean intensity from that duration's
    /// class, and emit a constant-intensity storm.
    DurationIntensity,
}

/// Configuration for [`synthesize`](crate::synthesize).
///
/// # Example
///
/// ```
/// use raingen_synth::{StormModel, SynthConfig};
///
/// let config = SynthConfig::new(8760)
///     .with_storm_model(StormModel::DurationIntensity)
///     .with_max_dry_attempts(500);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct SynthConfig {
    requested_length: usize,
    storm_model: StormModel,
    max_dry_attempts: usize,
}

impl SynthConfig {
    /// Creates a configuration for a series of `requested_length` timesteps.
    ///
    /// Defaults: `storm_model = Historical`, `max_dry_attempts = 10_000`.
    pub fn new(requested_length: usize) -> Self {
        Self {
            requested_length,
            storm_model: StormModel::Historical,
            max_dry_attempts: 10_000,
        }
    }

    /// Sets the storm model.
    pub fn with_storm_model(mut self, model: StormModel) -> Self {
        self.storm_model = model;
        self
    }

    /// Sets how many exponential draws a dry period may reject before
    /// synthesis gives up.
    pub fn with_max_dry_attempts(mut self, attempts: usize) -> Self {
        self.max_dry_attempts = attempts;
        self
    }

    /// Returns the requested series length.
    pub fn requested_length(&self) -> usize {
        self.requested_length
    }

    /// Returns the storm model.
    pub fn storm_model(&self) -> StormModel {
        self.storm_model
    }

    /// Returns the dry-draw attempt limit.
    pub fn max_dry_attempts(&self) -> usize {
        self.max_dry_attempts
    }

    /// Validates this configuration.
    ///
    /// Both the requested length and the attempt limit must be positive.
    pub fn validate(&self) -> Result<(), SynthError> {
        if self.requested_length == 0 {
            return Err(SynthError::InvalidConfig {
                reason: "requested_length must be positive".to_string(),
            });
        }
        if self.max_dry_attempts == 0 {
            return Err(SynthError::InvalidConfig {
                reason: "max_dry_attempts must be positive".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = SynthConfig::new(24);
        assert_eq!(c.requested_length(), 24);
        assert_eq!(c.storm_model(), StormModel::Historical);
        assert_eq!(c.max_dry_attempts(), 10_000);
    }

    #[test]
    fn zero_length_rejected() {
        let err = SynthConfig::new(0).validate().unwrap_err();
        assert!(err.to_string().contains("requested_length"));
    }

    #[test]
    fn zero_attempts_rejected() {
        assert!(SynthConfig::new(5).with_max_dry_attempts(0).validate().is_err());
    }
}
