//! Storm and dry-period records produced by the storm-merge pass.

/// A merged wet interval, including internal dry spans shorter than the MDPD.
///
/// The depth profile runs from the storm's first timestep to its last wet
/// timestep, so `duration == active_steps + inter_storm_dpd` always holds.
#[derive(Debug, Clone, PartialEq)]
pub struct Storm {
    start: usize,
    profile: Vec<f64>,
    active_steps: usize,
    volume: f64,
}

impl Storm {
    pub(crate) fn open(start: usize) -> Self {
        Self {
            start,
            profile: Vec::new(),
            active_steps: 0,
            volume: 0.0,
        }
    }

    pub(crate) fn push_wet(&mut self, depth: f64) {
        self.profile.push(depth);
        self.active_steps += 1;
        self.volume += depth;
    }

    pub(crate) fn push_dry(&mut self, steps: usize) {
        self.profile.extend(std::iter::repeat_n(0.0, steps));
    }

    /// Builds a storm from a depth profile.
    ///
    /// Returns `None` unless the profile ends on a wet timestep and all depths
    /// are finite and non-negative.
    pub fn from_profile(start: usize, profile: Vec<f64>) -> Option<Self> {
        if profile.last().is_none_or(|&d| d <= 0.0)
            || profile.iter().any(|d| !d.is_finite() || *d < 0.0)
        {
            return None;
        }
        let mut storm = Self::open(start);
        for d in profile {
            if d > 0.0 {
                storm.push_wet(d);
            } else {
                storm.push_dry(1);
            }
        }
        Some(storm)
    }

    /// Index of the storm's first timestep in the source series.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Depth per timestep from first to last wet step.
    pub fn profile(&self) -> &[f64] {
        &self.profile
    }

    /// Sum of depths over the storm.
    pub fn volume(&self) -> f64 {
        self.volume
    }

    /// Timesteps from first to last step, inclusive of internal dry spans.
    pub fn duration(&self) -> usize {
        self.profile.len()
    }

    /// Number of wet timesteps.
    pub fn active_steps(&self) -> usize {
        self.active_steps
    }

    /// Number of internal dry timesteps (each belonging to a run below MDPD).
    pub fn inter_storm_dpd(&self) -> usize {
        self.profile.len() - self.active_steps
    }

    /// `volume / duration`.
    pub fn mean_intensity(&self) -> f64 {
        self.volume / self.duration() as f64
    }
}

/// A dry run at least MDPD long, separating two storms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DryPeriod {
    /// Index of the first dry timestep.
    pub start: usize,
    /// Number of consecutive dry timesteps.
    pub length: usize,
}

/// One element of the merged storm / dry-period sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A closed storm.
    Storm(Storm),
    /// A qualifying dry period.
    Dry(DryPeriod),
}

/// Ordered storms and qualifying dry periods for one gauge.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StormSequence {
    pub(crate) events: Vec<Event>,
    pub(crate) tail_dry: usize,
    pub(crate) len: usize,
}

impl StormSequence {
    /// All events in series order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Storms in series order.
    pub fn storms(&self) -> impl Iterator<Item = &Storm> {
        self.events.iter().filter_map(|e| match e {
            Event::Storm(s) => Some(s),
            Event::Dry(_) => None,
        })
    }

    /// Qualifying dry periods in series order.
    pub fn dry_periods(&self) -> impl Iterator<Item = &DryPeriod> {
        self.events.iter().filter_map(|e| match e {
            Event::Dry(d) => Some(d),
            Event::Storm(_) => None,
        })
    }

    /// Trailing dry timesteps shorter than MDPD. They close no storm and
    /// belong to none.
    pub fn tail_dry(&self) -> usize {
        self.tail_dry
    }

    /// Length of the source series.
    pub fn series_len(&self) -> usize {
        self.len
    }
}
