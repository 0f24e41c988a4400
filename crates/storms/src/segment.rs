//! Run segmentation of a depth series.
//!
//! A timestep is wet when its depth is strictly positive and dry when it is
//! exactly zero.

use tracing::trace;

use crate::error::StormError;
use crate::event::{DryPeriod, Event, Storm, StormSequence};

/// Lengths of every maximal run of zero-depth timesteps, in series order.
///
/// A series starting dry contributes its leading run and a series ending dry
/// contributes its trailing run. An all-positive series has no dry runs; an
/// all-zero series has exactly one.
pub fn dry_runs(depths: &[f64]) -> Vec<usize> {
    let mut runs = Vec::new();
    let mut current = 0usize;
    for &d in depths {
        if d > 0.0 {
            if current > 0 {
                runs.push(current);
                current = 0;
            }
        } else {
            current += 1;
        }
    }
    if current > 0 {
        runs.push(current);
    }
    runs
}

/// Merge wet and dry runs into storms and qualifying dry periods.
///
/// A dry run shorter than `mdpd` that is followed by rain is internal to the
/// storm containing that rain; this includes a short leading run, which
/// becomes the head of the first storm. A dry run of at least `mdpd`
/// timesteps closes the open storm and is recorded as a [`DryPeriod`]. A
/// short trailing run is kept as [`StormSequence::tail_dry`]: the final storm
/// is closed at its last wet step.
///
/// # Errors
///
/// Returns [`StormError::InvalidMdpd`] if `mdpd` is negative or non-finite,
/// and [`StormError::InvalidDepth`] for a negative or non-finite depth.
pub fn merge_storms(depths: &[f64], mdpd: f64) -> Result<StormSequence, StormError> {
    if !mdpd.is_finite() || mdpd < 0.0 {
        return Err(StormError::InvalidMdpd { value: mdpd });
    }
    if let Some((index, &value)) = depths
        .iter()
        .enumerate()
        .find(|(_, d)| !d.is_finite() || **d < 0.0)
    {
        return Err(StormError::InvalidDepth { index, value });
    }

    let separates = |run: usize| run as f64 >= mdpd;

    let mut events = Vec::new();
    let mut open: Option<Storm> = None;
    let mut dry_start = 0usize;
    let mut dry_len = 0usize;

    for (i, &d) in depths.iter().enumerate() {
        if d > 0.0 {
            if dry_len > 0 {
                if separates(dry_len) {
                    if let Some(storm) = open.take() {
                        events.push(Event::Storm(storm));
                    }
                    events.push(Event::Dry(DryPeriod {
                        start: dry_start,
                        length: dry_len,
                    }));
                } else {
                    open.get_or_insert_with(|| Storm::open(dry_start))
                        .push_dry(dry_len);
                }
                dry_len = 0;
            }
            open.get_or_insert_with(|| Storm::open(i)).push_wet(d);
        } else {
            if dry_len == 0 {
                dry_start = i;
            }
            dry_len += 1;
        }
    }

    if let Some(storm) = open.take() {
        events.push(Event::Storm(storm));
    }
    let mut tail_dry = 0;
    if dry_len > 0 {
        if separates(dry_len) {
            events.push(Event::Dry(DryPeriod {
                start: dry_start,
                length: dry_len,
            }));
        } else {
            tail_dry = dry_len;
        }
    }

    trace!(n_events = events.len(), tail_dry, "storm merge complete");
    Ok(StormSequence {
        events,
        tail_dry,
        len: depths.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dry_runs_leading_and_trailing() {
        let runs = dry_runs(&[0.0, 0.0, 1.0, 0.0, 2.0, 3.0, 0.0, 0.0, 0.0]);
        assert_eq!(runs, vec![2, 1, 3]);
    }

    #[test]
    fn dry_runs_ending_wet_has_no_trailing_run() {
        assert_eq!(dry_runs(&[1.0, 0.0, 0.0, 4.0]), vec![2]);
    }

    #[test]
    fn dry_runs_degenerate_series() {
        assert!(dry_runs(&[]).is_empty());
        assert!(dry_runs(&[1.0, 2.0, 3.0]).is_empty());
        assert_eq!(dry_runs(&[0.0; 6]), vec![6]);
    }

    #[test]
    fn scenario_short_leading_run_joins_first_storm() {
        let series = [0.0, 0.0, 5.0, 5.0, 0.0, 0.0, 0.0, 0.0, 0.0, 3.0, 0.0];
        let seq = merge_storms(&series, 3.0).unwrap();

        let events = seq.events();
        assert_eq!(events.len(), 3);
        match &events[0] {
            Event::Storm(s) => {
                assert_eq!(s.duration(), 4);
                assert_eq!(s.profile(), &[0.0, 0.0, 5.0, 5.0]);
                assert_eq!(s.inter_storm_dpd(), 2);
            }
            other => panic!("expected storm, got {other:?}"),
        }
        assert_eq!(
            events[1],
            Event::Dry(DryPeriod {
                start: 4,
                length: 5
            })
        );
        match &events[2] {
            Event::Storm(s) => {
                assert_eq!(s.duration(), 1);
                assert_eq!(s.start(), 9);
                assert_eq!(s.volume(), 3.0);
            }
            other => panic!("expected storm, got {other:?}"),
        }
        assert_eq!(seq.tail_dry(), 1);
    }

    #[test]
    fn long_leading_and_trailing_runs_are_dry_periods() {
        let series = [0.0, 0.0, 0.0, 1.0, 0.0, 2.0, 0.0, 0.0, 0.0, 0.0];
        let seq = merge_storms(&series, 3.0).unwrap();
        let dry: Vec<_> = seq.dry_periods().copied().collect();
        assert_eq!(
            dry,
            vec![
                DryPeriod {
                    start: 0,
                    length: 3
                },
                DryPeriod {
                    start: 6,
                    length: 4
                },
            ]
        );
        let storms: Vec<_> = seq.storms().collect();
        assert_eq!(storms.len(), 1);
        assert_eq!(storms[0].profile(), &[1.0, 0.0, 2.0]);
        assert_eq!(seq.tail_dry(), 0);
    }

    #[test]
    fn zero_mdpd_splits_on_every_dry_step() {
        let seq = merge_storms(&[1.0, 0.0, 1.0], 0.0).unwrap();
        assert_eq!(seq.storms().count(), 2);
        assert_eq!(seq.dry_periods().count(), 1);
    }

    #[test]
    fn fractional_mdpd_threshold() {
        // 2 < 2.5 merges, 3 >= 2.5 separates.
        let series = [1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0];
        let seq = merge_storms(&series, 2.5).unwrap();
        let durations: Vec<usize> = seq.storms().map(Storm::duration).collect();
        assert_eq!(durations, vec![4, 1]);
    }

    #[test]
    fn all_zero_and_all_positive() {
        let seq = merge_storms(&[0.0; 5], 2.0).unwrap();
        assert_eq!(seq.storms().count(), 0);
        assert_eq!(seq.dry_periods().count(), 1);

        let seq = merge_storms(&[0.0; 5], 9.0).unwrap();
        assert!(seq.events().is_empty());
        assert_eq!(seq.tail_dry(), 5);

        let seq = merge_storms(&[1.0; 5], 2.0).unwrap();
        assert_eq!(seq.storms().count(), 1);
        assert_eq!(seq.storms().next().unwrap().duration(), 5);
    }

    #[test]
    fn invalid_inputs() {
        assert!(matches!(
            merge_storms(&[1.0], -1.0),
            Err(StormError::InvalidMdpd { .. })
        ));
        assert!(matches!(
            merge_storms(&[1.0], f64::NAN),
            Err(StormError::InvalidMdpd { .. })
        ));
        assert!(matches!(
            merge_storms(&[1.0, -0.5], 2.0),
            Err(StormError::InvalidDepth { index: 1, .. })
        ));
    }
}
