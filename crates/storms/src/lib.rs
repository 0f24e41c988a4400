//! Storm identification for gauge precipitation series.
//!
//! Splits a depth series into wet and dry runs, estimates the minimum
//! dry-period duration (MDPD) that separates independent storms, merges
//! runs into storms and summarises the storm population.
//!
//! # Pipeline
//!
//! ```text
//!  ┌──────────────┐     ┌────────────────┐     ┌──────────────────┐     ┌──────────────┐
//!  │   dry_runs   │────▶│  estimate_mdpd │────▶│   merge_storms   │────▶│  aggregate   │
//!  │  (pass 1)    │     │  (CV crossing) │     │   (pass 2)       │     │  (classes)   │
//!  └──────────────┘     └────────────────┘     └──────────────────┘     └──────────────┘
//! ```
//!
//! # Quick start
//!
//! ```rust
//! use raingen_storms::merge_storms;
//!
//! let series = [0.0, 0.0, 5.0, 5.0, 0.0, 0.0, 0.0, 0.0, 0.0, 3.0, 0.0];
//! let seq = merge_storms(&series, 3.0).unwrap();
//!
//! assert_eq!(seq.storms().count(), 2);
//! assert_eq!(seq.storms().next().unwrap().duration(), 4);
//! ```

pub mod aggregate;
pub mod analysis;
pub mod error;
pub mod event;
pub mod mdpd;
pub mod segment;

pub use aggregate::{DryStatistics, DurationClass, N_CLASSES, StormStatistics, aggregate_storms};
pub use analysis::{AnalysisConfig, GaugeAnalysis, MdpdMode, analyze};
pub use error::StormError;
pub use event::{DryPeriod, Event, Storm, StormSequence};
pub use mdpd::{CvBracket, MdpdEstimate, estimate_mdpd};
pub use segment::{dry_runs, merge_storms};
