//! Error types for the raingen-idw crate.

/// Error type for all fallible operations in the raingen-idw crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum IdwError {
    /// Returned when no gauges are supplied.
    #[error("no gauges supplied")]
    EmptyGauges,

    /// Returned when gauge locations and series differ in count.
    #[error("{locations} gauge locations but {series} series")]
    LengthMismatch {
        /// Number of locations.
        locations: usize,
        /// Number of series.
        series: usize,
    },

    /// Returned when the IDW power is zero or too large for `powi`.
    #[error("invalid IDW power {power} (must be in 1..={max})", max = i32::MAX)]
    InvalidPower {
        /// The rejected power.
        power: u32,
    },

    /// Returned when a gauge series has no timesteps.
    #[error("series of gauge {gauge} is empty")]
    EmptySeries {
        /// Zero-based gauge index.
        gauge: usize,
    },

    /// Returned when a target coincides with a gauge under
    /// [`CoincidentPolicy::Reject`](crate::CoincidentPolicy::Reject).
    #[error("target {target} coincides with gauge {gauge}")]
    CoincidentPoint {
        /// Zero-based target index.
        target: usize,
        /// Zero-based gauge index.
        gauge: usize,
    },

    /// Returned when a distance weight is not a positive finite number.
    #[error("weight for gauge {gauge} at target {target} is not finite and positive: {weight}")]
    NonFiniteWeight {
        /// Zero-based target index.
        target: usize,
        /// Zero-based gauge index.
        gauge: usize,
        /// The offending weight.
        weight: f64,
    },

    /// Returned when a coordinate is NaN or infinite.
    #[error("{what} {index} has a non-finite coordinate")]
    NonFiniteCoordinate {
        /// `"gauge"` or `"target"`.
        what: &'static str,
        /// Zero-based index.
        index: usize,
    },

    /// Returned when grid spacing is not positive and finite.
    #[error("invalid grid spacing dx={dx}, dy={dy} (must be finite and > 0)")]
    InvalidSpacing {
        /// Horizontal spacing.
        dx: f64,
        /// Vertical spacing.
        dy: f64,
    },

    /// Returned when an extent is empty or non-finite.
    #[error("invalid extent: {reason}")]
    InvalidExtent {
        /// Human-readable description.
        reason: String,
    },
}
