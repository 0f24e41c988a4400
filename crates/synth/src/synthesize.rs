//! Token-pool synthesis of a storm and dry-period sequence.

use rand::Rng;
use rand_distr::{Distribution, Exp};
use tracing::{debug, info};

use crate::cancel::CancelFlag;
use crate::config::{StormModel, SynthConfig};
use crate::error::SynthError;
use crate::population::Population;
use crate::series::{SegmentKind, SyntheticSeries};

/// Draws a synthetic series of exactly `config.requested_length()` timesteps.
///
/// Each step draws a token from the population's event pool. A dry token
/// samples `round(Exp(mean dry length))` until the result is at least the
/// MDPD (and at least 1), then emits that many zeros. A storm token emits a
/// storm according to [`SynthConfig::storm_model`]. The final segment is
/// truncated so the series never exceeds the requested length.
///
/// `cancel` is checked before every segment.
///
/// # Errors
///
/// - [`SynthError::InvalidConfig`] if the configuration is invalid.
/// - [`SynthError::DryDrawExhausted`] if a dry draw hits the attempt limit.
/// - [`SynthError::Storm`] for an empty duration class.
/// - [`SynthError::Cancelled`] with the partial series if `cancel` is set.
pub fn synthesize(
    population: &Population,
    config: &SynthConfig,
    rng: &mut impl Rng,
    cancel: Option<&CancelFlag>,
) -> Result<SyntheticSeries, SynthError> {
    config.validate()?;

    let dry_distr = match population.dry_stats().mean_length() {
        Some(mean) => {
            let exp = Exp::new(1.0 / mean).map_err(|e| SynthError::InvalidPopulation {
                reason: format!("mean dry length {mean}: {e}"),
            })?;
            Some((mean, exp))
        }
        None => None,
    };

    let target = config.requested_length();
    let mut out = SyntheticSeries::with_capacity(target);

    while out.len() < target {
        if cancel.is_some_and(CancelFlag::is_cancelled) {
            info!(emitted = out.len(), target, "synthesis cancelled");
            return Err(SynthError::Cancelled { partial: out });
        }
        let room = target - out.len();

        match population.draw_kind(rng)? {
            SegmentKind::Dry => {
                let (mean, distr) = dry_distr.as_ref().ok_or(SynthError::EmptyPopulation)?;
                let len = draw_dry_length(
                    distr,
                    *mean,
                    population.mdpd(),
                    config.max_dry_attempts(),
                    rng,
                )?;
                out.push_segment(SegmentKind::Dry, std::iter::repeat_n(0.0, len), room);
            }
            SegmentKind::Storm => match config.storm_model() {
                StormModel::Historical => {
                    let storm = population.draw_storm(rng)?;
                    out.push_segment(SegmentKind::Storm, storm.profile().iter().copied(), room);
                }
                StormModel::DurationIntensity => {
                    let (duration, intensity) = population.draw_duration_intensity(rng)?;
                    out.push_segment(
                        SegmentKind::Storm,
                        std::iter::repeat_n(intensity, duration),
                        room,
                    );
                }
            },
        }
    }

    debug!(
        len = out.len(),
        n_segments = out.segments().len(),
        "synthetic series complete"
    );
    Ok(out)
}

fn draw_dry_length(
    distr: &Exp<f64>,
    mean_length: f64,
    mdpd: f64,
    max_attempts: usize,
    rng: &mut impl Rng,
) -> Result<usize, SynthError> {
    for _ in 0..max_attempts {
        let candidate = distr.sample(rng).round() as usize;
        if candidate >= 1 && candidate as f64 >= mdpd {
            return Ok(candidate);
        }
    }
    Err(SynthError::DryDrawExhausted {
        attempts: max_attempts,
        mean_length,
        mdpd,
    })
}
