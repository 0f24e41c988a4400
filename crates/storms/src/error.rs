//! Error types for the raingen-storms crate.

/// Error type for all fallible operations in the raingen-storms crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StormError {
    /// Returned when there is too little data for a statistic to be defined.
    #[error("insufficient data: got {n} {what}, need at least {min}")]
    InsufficientData {
        /// What was counted.
        what: &'static str,
        /// Number available.
        n: usize,
        /// Minimum required.
        min: usize,
    },

    /// Returned when the coefficient of variation never crosses 1.
    #[error(
        "MDPD estimation failed: coefficient of variation stayed within \
         [{min_cv:.4}, {max_cv:.4}] over {examined} iterations without crossing 1"
    )]
    EstimationFailure {
        /// Number of trimmed dry-run populations examined.
        examined: usize,
        /// Smallest CV observed.
        min_cv: f64,
        /// Largest CV observed.
        max_cv: f64,
    },

    /// Returned when a mean is requested for a duration class with no storms.
    #[error("duration class {class} has no member storms")]
    EmptyClass {
        /// Zero-based class index.
        class: usize,
    },

    /// Returned when an MDPD value is negative or non-finite.
    #[error("invalid MDPD: {value} (must be finite and >= 0)")]
    InvalidMdpd {
        /// The rejected value.
        value: f64,
    },

    /// Returned when a depth is negative or non-finite.
    #[error("invalid depth at timestep {index}: {value} (must be finite and >= 0)")]
    InvalidDepth {
        /// Zero-based timestep.
        index: usize,
        /// The rejected value.
        value: f64,
    },
}
