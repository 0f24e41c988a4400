//! IDW configuration.

use crate::error::IdwError;

/// What to do when a target lies exactly on a gauge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoincidentPolicy {
    /// Return that gauge's series unweighted.
    #[default]
    UseGauge,
    /// Fail with [`IdwError::CoincidentPoint`].
    Reject,
}

/// Configuration for [`interpolate`](crate::interpolate).
///
/// Defaults: `power = 2`, `coincident = UseGauge`, targets processed in
/// parallel.
#[derive(Debug, Clone)]
pub struct IdwConfig {
    power: u32,
    coincident: CoincidentPolicy,
    parallel: bool,
}

impl IdwConfig {
    /// Creates a configuration with the defaults above.
    pub fn new() -> Self {
        Self {
            power: 2,
            coincident: CoincidentPolicy::UseGauge,
            parallel: true,
        }
    }

    /// Sets the distance exponent.
    pub fn with_power(mut self, power: u32) -> Self {
        self.power = power;
        self
    }

    /// Sets the coincident-point policy.
    pub fn with_coincident(mut self, policy: CoincidentPolicy) -> Self {
        self.coincident = policy;
        self
    }

    /// Enables or disables parallel evaluation of targets.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Returns the distance exponent.
    pub fn power(&self) -> u32 {
        self.power
    }

    /// Returns the coincident-point policy.
    pub fn coincident(&self) -> CoincidentPolicy {
        self.coincident
    }

    /// Returns whether targets are evaluated in parallel.
    pub fn parallel(&self) -> bool {
        self.parallel
    }

    /// The power must be at least 1 and fit in an `i32`.
    pub fn validate(&self) -> Result<(), IdwError> {
        if self.power == 0 || i32::try_from(self.power).is_err() {
            return Err(IdwError::InvalidPower { power: self.power });
        }
        Ok(())
    }
}

impl Default for IdwConfig {
    fn default() -> Self {
        Self::new()
    }
}
