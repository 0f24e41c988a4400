//! The empirical event population a synthetic series is drawn from.

use raingen_storms::{
    DryPeriod, DryStatistics, GaugeAnalysis, Storm, StormError, StormStatistics, aggregate_storms,
};
use rand::Rng;
use rand::seq::IndexedRandom;

use crate::error::SynthError;
use crate::series::SegmentKind;

/// Observed storms and qualifying dry periods of one gauge.
///
/// The event pool holds one storm token per storm and one dry token per dry
/// period, so draws reproduce the observed storm/dry mix.
#[derive(Debug, Clone)]
pub struct Population {
    storms: Vec<Storm>,
    storm_stats: Option<StormStatistics>,
    dry_stats: DryStatistics,
    mdpd: f64,
    pool: Vec<SegmentKind>,
}

impl Population {
    /// Builds the population from a completed gauge analysis.
    pub fn from_analysis(analysis: &GaugeAnalysis) -> Result<Self, SynthError> {
        let storms = analysis.sequence().storms().cloned().collect();
        let periods: Vec<DryPeriod> = analysis.sequence().dry_periods().copied().collect();
        Self::from_parts(storms, &periods, analysis.mdpd())
    }

    /// Builds the population from explicit storms and dry periods.
    ///
    /// # Errors
    ///
    /// Returns [`SynthError::EmptyPopulation`] if both are empty,
    /// [`StormError::InvalidMdpd`] for a negative or non-finite `mdpd`, and
    /// [`SynthError::InvalidPopulation`] if a dry period is shorter than
    /// `mdpd`.
    pub fn from_parts(
        storms: Vec<Storm>,
        dry_periods: &[DryPeriod],
        mdpd: f64,
    ) -> Result<Self, SynthError> {
        if !mdpd.is_finite() || mdpd < 0.0 {
            return Err(StormError::InvalidMdpd { value: mdpd }.into());
        }
        if storms.is_empty() && dry_periods.is_empty() {
            return Err(SynthError::EmptyPopulation);
        }
        if let Some(p) = dry_periods.iter().find(|p| (p.length as f64) < mdpd) {
            return Err(SynthError::InvalidPopulation {
                reason: format!(
                    "dry period at {} has length {} below MDPD {mdpd}",
                    p.start, p.length
                ),
            });
        }

        let storm_stats = if storms.is_empty() {
            None
        } else {
            Some(aggregate_storms(&storms)?)
        };
        let pool = std::iter::repeat_n(SegmentKind::Storm, storms.len())
            .chain(std::iter::repeat_n(SegmentKind::Dry, dry_periods.len()))
            .collect();

        Ok(Self {
            storms,
            storm_stats,
            dry_stats: DryStatistics::from_periods(dry_periods),
            mdpd,
            pool,
        })
    }

    /// Observed storms.
    pub fn storms(&self) -> &[Storm] {
        &self.storms
    }

    /// Storm statistics, `None` when no storm was observed.
    pub fn storm_stats(&self) -> Option<&StormStatistics> {
        self.storm_stats.as_ref()
    }

    /// Dry-period statistics.
    pub fn dry_stats(&self) -> &DryStatistics {
        &self.dry_stats
    }

    /// Minimum accepted dry-period length.
    pub fn mdpd(&self) -> f64 {
        self.mdpd
    }

    /// Number of storm and dry tokens in the pool.
    pub fn pool_size(&self) -> usize {
        self.pool.len()
    }

    pub(crate) fn draw_kind(&self, rng: &mut impl Rng) -> Result<SegmentKind, SynthError> {
        self.pool
            .choose(rng)
            .copied()
            .ok_or(SynthError::EmptyPopulation)
    }

    pub(crate) fn draw_storm(&self, rng: &mut impl Rng) -> Result<&Storm, SynthError> {
        self.storms.choose(rng).ok_or(SynthError::EmptyPopulation)
    }

    /// Draws an observed duration, then an intensity from that duration's
    /// class.
    pub(crate) fn draw_duration_intensity(
        &self,
        rng: &mut impl Rng,
    ) -> Result<(usize, f64), SynthError> {
        let duration = self.draw_storm(rng)?.duration();
        let stats = self.storm_stats.as_ref().ok_or(SynthError::EmptyPopulation)?;
        let class = stats.class_of(duration);
        let intensity = stats.classes()[class]
            .intensities()
            .choose(rng)
            .copied()
            .ok_or(StormError::EmptyClass { class })?;
        Ok((duration, intensity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn storm(profile: &[f64]) -> Storm {
        Storm::from_profile(0, profile.to_vec()).unwrap()
    }

    fn period(length: usize) -> DryPeriod {
        DryPeriod { start: 0, length }
    }

    #[test]
    fn pool_mirrors_event_counts() {
        let p = Population::from_parts(
            vec![storm(&[1.0]), storm(&[2.0, 2.0])],
            &[period(5), period(7), period(9)],
            4.0,
        )
        .unwrap();
        assert_eq!(p.pool_size(), 5);
        assert_eq!(p.pool.iter().filter(|k| **k == SegmentKind::Dry).count(), 3);
        assert_eq!(p.dry_stats().mean_length(), Some(7.0));
        assert_eq!(p.storm_stats().unwrap().n_storms(), 2);
    }

    #[test]
    fn empty_population_rejected() {
        assert!(matches!(
            Population::from_parts(Vec::new(), &[], 2.0),
            Err(SynthError::EmptyPopulation)
        ));
    }

    #[test]
    fn short_dry_period_rejected() {
        assert!(matches!(
            Population::from_parts(vec![storm(&[1.0])], &[period(2)], 3.0),
            Err(SynthError::InvalidPopulation { .. })
        ));
    }

    #[test]
    fn invalid_mdpd_rejected() {
        assert!(matches!(
            Population::from_parts(vec![storm(&[1.0])], &[], f64::INFINITY),
            Err(SynthError::Storm(StormError::InvalidMdpd { .. }))
        ));
    }

    #[test]
    fn dry_only_population_has_no_storm_stats() {
        let p = Population::from_parts(Vec::new(), &[period(4)], 4.0).unwrap();
        assert!(p.storm_stats().is_none());
        assert_eq!(p.pool_size(), 1);
    }
}
