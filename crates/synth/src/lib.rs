//! Synthetic rainfall sequence generation for the raingen workspace.
//!
//! A gauge's merged storms and qualifying dry periods form an event pool.
//! Events are drawn from the pool uniformly: a dry draw samples an
//! exponential duration no shorter than the MDPD, a storm draw resamples
//! from the observed storm population. The series is truncated to the
//! requested length.
//!
//! # Pipeline
//!
//! ```text
//!  ┌──────────────┐     ┌────────────────┐     ┌──────────────────┐
//!  │ GaugeAnalysis │────▶│   Population   │────▶│    synthesize    │
//!  │ (raingen-storms)│   │ (event pool)   │     │ (draw, truncate) │
//!  └──────────────┘     └────────────────┘     └──────────────────┘
//! ```
//!
//! # Quick start
//!
//! ```rust
//! use raingen_storms::{AnalysisConfig, analyze};
//! use raingen_synth::{Population, SynthConfig, synthesize};
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let series = [0.0, 0.0, 5.0, 5.0, 0.0, 0.0, 0.0, 0.0, 0.0, 3.0, 0.0];
//! let analysis = analyze(&series, &AnalysisConfig::new().with_fixed_mdpd(3.0)).unwrap();
//! let population = Population::from_analysis(&analysis).unwrap();
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let config = SynthConfig::new(48);
//! let out = synthesize(&population, &config, &mut rng, None).unwrap();
//! assert_eq!(out.len(), 48);
//! ```

mod cancel;
mod config;
mod error;
mod population;
mod series;
mod synthesize;

pub use cancel::CancelFlag;
pub use config::{StormModel, SynthConfig};
pub use error::SynthError;
pub use population::Population;
pub use series::{Segment, SegmentKind, SyntheticSeries};
pub use synthesize::synthesize;
