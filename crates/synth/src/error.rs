//! Error types for the raingen-synth crate.

use raingen_storms::StormError;

use crate::series::SyntheticSeries;

/// Error type for all fallible operations in the raingen-synth crate.
#[derive(Debug, thiserror::Error)]
pub enum SynthError {
    /// Returned when a [`SynthConfig`](crate::SynthConfig) is invalid.
    #[error("invalid synthesis config: {reason}")]
    InvalidConfig {
        /// Human-readable description.
        reason: String,
    },

    /// Returned when the population has neither storms nor dry periods.
    #[error("event population is empty: no storms and no dry periods")]
    EmptyPopulation,

    /// Returned when the population's dry periods are inconsistent.
    #[error("invalid dry-period population: {reason}")]
    InvalidPopulation {
        /// Human-readable description.
        reason: String,
    },

    /// Returned when no exponential draw reached the MDPD within the limit.
    #[error(
        "no dry-period draw reached MDPD {mdpd} within {attempts} attempts \
         (mean dry length {mean_length})"
    )]
    DryDrawExhausted {
        /// Number of draws made.
        attempts: usize,
        /// Mean of the exponential distribution.
        mean_length: f64,
        /// Minimum accepted length.
        mdpd: f64,
    },

    /// Returned when cancellation was requested; carries the series emitted
    /// so far.
    #[error("synthesis cancelled after emitting {} timesteps", partial.len())]
    Cancelled {
        /// Segments emitted before the flag was observed.
        partial: SyntheticSeries,
    },

    /// Wraps errors from storm statistics.
    #[error(transparent)]
    Storm(#[from] StormError),
}
