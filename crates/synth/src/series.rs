//! Synthetic series and their segment records.

/// What an emitted segment represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    /// A resampled or modelled storm.
    Storm,
    /// A run of zero-depth timesteps.
    Dry,
}

/// One emitted segment of a synthetic series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    /// Storm or dry.
    pub kind: SegmentKind,
    /// Index of the segment's first timestep.
    pub start: usize,
    /// Number of timesteps actually emitted.
    pub len: usize,
    /// `true` if the segment was cut short at the requested length.
    pub truncated: bool,
}

/// A synthetic depth series and the segments it was built from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SyntheticSeries {
    depths: Vec<f64>,
    segments: Vec<Segment>,
}

impl SyntheticSeries {
    pub(crate) fn with_capacity(len: usize) -> Self {
        Self {
            depths: Vec::with_capacity(len),
            segments: Vec::new(),
        }
    }

    /// Appends at most `room` values of `values`, returning the number
    /// appended.
    pub(crate) fn push_segment(
        &mut self,
        kind: SegmentKind,
        values: impl ExactSizeIterator<Item = f64>,
        room: usize,
    ) -> usize {
        let full = values.len();
        let len = full.min(room);
        let start = self.depths.len();
        self.depths.extend(values.take(len));
        self.segments.push(Segment {
            kind,
            start,
            len,
            truncated: len < full,
        });
        len
    }

    /// Depth per timestep.
    pub fn depths(&self) -> &[f64] {
        &self.depths
    }

    /// Emitted segments in order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Number of timesteps.
    pub fn len(&self) -> usize {
        self.depths.len()
    }

    /// Returns `true` if nothing was emitted.
    pub fn is_empty(&self) -> bool {
        self.depths.is_empty()
    }

    /// Consumes the series, returning the depths.
    pub fn into_depths(self) -> Vec<f64> {
        self.depths
    }
}
