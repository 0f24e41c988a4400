//! Inverse-distance weighting of gauge series onto target points.

use rayon::prelude::*;
use tracing::debug;

use crate::config::{CoincidentPolicy, IdwConfig};
use crate::error::IdwError;
use crate::point::Point;

/// Gauge weights for one target.
#[derive(Debug, Clone, PartialEq)]
pub enum Weighting {
    /// The target lies exactly on this gauge.
    Coincident {
        /// Zero-based gauge index.
        gauge: usize,
    },
    /// Raw inverse-distance weights `1 / d^p`, one per gauge.
    Inverse(Vec<f64>),
}

/// Inverse-distance weights of `gauges` for a single `target`.
///
/// Every returned weight is finite and strictly positive. Errors report
/// the target as index 0.
///
/// # Errors
///
/// [`IdwError::InvalidPower`] unless `power` is in `1..=i32::MAX`, and
/// [`IdwError::NonFiniteWeight`] if a weight under- or overflows.
pub fn weights(gauges: &[Point], target: &Point, power: u32) -> Result<Weighting, IdwError> {
    target_weights(0, gauges, target, power)
}

fn target_weights(
    index: usize,
    gauges: &[Point],
    target: &Point,
    power: u32,
) -> Result<Weighting, IdwError> {
    let exponent = match i32::try_from(power) {
        Ok(p) if p > 0 => p,
        _ => return Err(IdwError::InvalidPower { power }),
    };
    let mut out = Vec::with_capacity(gauges.len());
    for (g, gauge) in gauges.iter().enumerate() {
        let d = gauge.distance(target);
        if d == 0.0 {
            return Ok(Weighting::Coincident { gauge: g });
        }
        let w = 1.0 / d.powi(exponent);
        if !w.is_finite() || w <= 0.0 {
            return Err(IdwError::NonFiniteWeight {
                target: index,
                gauge: g,
                weight: w,
            });
        }
        out.push(w);
    }
    Ok(Weighting::Inverse(out))
}

/// Interpolate gauge series onto each target.
///
/// `series[g]` belongs to `gauges[g]`. All series are cut to the shortest
/// one, and the result holds one estimate series of that length per target,
/// in target order.
///
/// # Errors
///
/// - [`IdwError::EmptyGauges`] / [`IdwError::LengthMismatch`] for bad inputs.
/// - [`IdwError::InvalidPower`] if the configured power is out of range.
/// - [`IdwError::EmptySeries`] if any gauge series has no timesteps.
/// - [`IdwError::NonFiniteCoordinate`] for a NaN or infinite coordinate.
/// - [`IdwError::CoincidentPoint`] under [`CoincidentPolicy::Reject`].
/// - [`IdwError::NonFiniteWeight`] if a weight under- or overflows.
pub fn interpolate(
    gauges: &[Point],
    series: &[&[f64]],
    targets: &[Point],
    config: &IdwConfig,
) -> Result<Vec<Vec<f64>>, IdwError> {
    config.validate()?;
    if gauges.is_empty() {
        return Err(IdwError::EmptyGauges);
    }
    if gauges.len() != series.len() {
        return Err(IdwError::LengthMismatch {
            locations: gauges.len(),
            series: series.len(),
        });
    }
    if let Some(gauge) = series.iter().position(|s| s.is_empty()) {
        return Err(IdwError::EmptySeries { gauge });
    }
    check_finite("gauge", gauges)?;
    check_finite("target", targets)?;

    let n = series.iter().map(|s| s.len()).min().unwrap_or(0);
    debug!(
        n_gauges = gauges.len(),
        n_targets = targets.len(),
        common_len = n,
        power = config.power(),
        "interpolating"
    );

    let estimate = |(i, target): (usize, &Point)| -> Result<Vec<f64>, IdwError> {
        match target_weights(i, gauges, target, config.power())? {
            Weighting::Coincident { gauge } => match config.coincident() {
                CoincidentPolicy::UseGauge => Ok(series[gauge][..n].to_vec()),
                CoincidentPolicy::Reject => Err(IdwError::CoincidentPoint { target: i, gauge }),
            },
            Weighting::Inverse(w) => {
                let total: f64 = w.iter().sum();
                let norm: Vec<f64> = w.iter().map(|wi| wi / total).collect();
                Ok((0..n)
                    .map(|t| norm.iter().zip(series).map(|(wi, s)| wi * s[t]).sum())
                    .collect())
            }
        }
    };

    if config.parallel() {
        targets.par_iter().enumerate().map(estimate).collect()
    } else {
        targets.iter().enumerate().map(estimate).collect()
    }
}

fn check_finite(what: &'static str, points: &[Point]) -> Result<(), IdwError> {
    match points.iter().position(|p| !p.is_finite()) {
        Some(index) => Err(IdwError::NonFiniteCoordinate { what, index }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn midpoint_of_two_gauges() {
        let gauges = [Point::new(0.0, 0.0), Point::new(10.0, 0.0)];
        let a = [4.0];
        let b = [8.0];
        let out = interpolate(
            &gauges,
            &[&a, &b],
            &[Point::new(5.0, 0.0)],
            &IdwConfig::new(),
        )
        .unwrap();
        assert_eq!(out, vec![vec![6.0]]);
    }

    #[test]
    fn weights_are_inverse_power() {
        let gauges = [Point::new(0.0, 0.0), Point::new(0.0, 4.0)];
        let target = Point::new(0.0, 2.0);
        match weights(&gauges, &target, 3).unwrap() {
            Weighting::Inverse(w) => {
                assert_relative_eq!(w[0], 0.125);
                assert_relative_eq!(w[1], 0.125);
            }
            other => panic!("expected inverse weights, got {other:?}"),
        }
    }

    #[test]
    fn coincident_target_uses_gauge_series() {
        let gauges = [Point::new(1.0, 1.0), Point::new(9.0, 9.0)];
        let a = [1.0, 2.0, 3.0];
        let b = [7.0, 7.0, 7.0, 7.0];
        let out = interpolate(
            &gauges,
            &[&a, &b],
            &[Point::new(9.0, 9.0)],
            &IdwConfig::new(),
        )
        .unwrap();
        // cut to the common length of 3
        assert_eq!(out[0], vec![7.0, 7.0, 7.0]);
    }

    #[test]
    fn coincident_target_rejected() {
        let gauges = [Point::new(1.0, 1.0)];
        let a = [1.0];
        let config = IdwConfig::new().with_coincident(CoincidentPolicy::Reject);
        let err = interpolate(
            &gauges,
            &[&a],
            &[Point::new(0.0, 0.0), Point::new(1.0, 1.0)],
            &config,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            IdwError::CoincidentPoint {
                target: 1,
                gauge: 0
            }
        ));
    }

    #[test]
    fn higher_power_favours_nearest() {
        let gauges = [Point::new(0.0, 0.0), Point::new(10.0, 0.0)];
        let a = [0.0];
        let b = [10.0];
        let target = [Point::new(2.0, 0.0)];
        let low = interpolate(&gauges, &[&a, &b], &target, &IdwConfig::new().with_power(1)).unwrap();
        let high = interpolate(&gauges, &[&a, &b], &target, &IdwConfig::new().with_power(4)).unwrap();
        // p=1: w = 1/2, 1/8 -> 10 * (1/8) / (5/8) = 2
        assert_relative_eq!(low[0][0], 2.0, epsilon = 1e-12);
        assert!(high[0][0] < low[0][0]);
    }

    #[test]
    fn parallel_and_sequential_agree() {
        let gauges = [
            Point::new(0.0, 0.0),
            Point::new(3.0, 7.0),
            Point::new(-4.0, 2.0),
        ];
        let a: Vec<f64> = (0..50).map(|t| t as f64).collect();
        let b: Vec<f64> = (0..50).map(|t| (t % 7) as f64).collect();
        let c = vec![2.5; 60];
        let series: [&[f64]; 3] = [&a, &b, &c];
        let targets: Vec<Point> = (0..20).map(|i| Point::new(i as f64 * 0.3, 1.0)).collect();
        let par = interpolate(&gauges, &series, &targets, &IdwConfig::new()).unwrap();
        let seq = interpolate(
            &gauges,
            &series,
            &targets,
            &IdwConfig::new().with_parallel(false),
        )
        .unwrap();
        assert_eq!(par, seq);
        assert!(par.iter().all(|s| s.len() == 50));
    }

    #[test]
    fn invalid_inputs() {
        let a = [1.0];
        assert!(matches!(
            interpolate(&[], &[], &[Point::new(0.0, 0.0)], &IdwConfig::new()),
            Err(IdwError::EmptyGauges)
        ));
        assert!(matches!(
            interpolate(&[Point::new(0.0, 0.0)], &[&a, &a], &[], &IdwConfig::new()),
            Err(IdwError::LengthMismatch { .. })
        ));
        assert!(matches!(
            interpolate(
                &[Point::new(0.0, 0.0)],
                &[&a],
                &[],
                &IdwConfig::new().with_power(0)
            ),
            Err(IdwError::InvalidPower { power: 0 })
        ));
        assert!(matches!(
            interpolate(
                &[Point::new(0.0, 0.0)],
                &[&a],
                &[Point::new(f64::NAN, 0.0)],
                &IdwConfig::new()
            ),
            Err(IdwError::NonFiniteCoordinate { what: "target", .. })
        ));
    }

    #[test]
    fn power_beyond_i32_rejected() {
        let gauges = [Point::new(0.0, 0.0), Point::new(10.0, 0.0)];
        let a = [0.0];
        let b = [10.0];
        let target = [Point::new(2.0, 0.0)];
        for power in [i32::MAX as u32 + 1, u32::MAX] {
            let config = IdwConfig::new().with_power(power);
            assert!(matches!(
                interpolate(&gauges, &[&a, &b], &target, &config),
                Err(IdwError::InvalidPower { power: p }) if p == power
            ));
            assert!(matches!(
                weights(&gauges, &target[0], power),
                Err(IdwError::InvalidPower { .. })
            ));
        }
    }

    #[test]
    fn empty_gauge_series_rejected() {
        let gauges = [Point::new(0.0, 0.0), Point::new(10.0, 0.0)];
        let empty: [f64; 0] = [];
        let b = [10.0, 3.0, 4.0];
        let err = interpolate(
            &gauges,
            &[&empty, &b],
            &[Point::new(5.0, 0.0)],
            &IdwConfig::new(),
        )
        .unwrap_err();
        assert!(matches!(err, IdwError::EmptySeries { gauge: 0 }));
    }

    #[test]
    fn overflowing_weight_reported() {
        let gauges = [Point::new(0.0, 0.0)];
        let target = Point::new(1e-200, 0.0);
        assert!(matches!(
            weights(&gauges, &target, 2),
            Err(IdwError::NonFiniteWeight { gauge: 0, .. })
        ));
    }
}
