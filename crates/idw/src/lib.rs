//! Inverse-distance weighting (IDW) of gauge series.
//!
//! For each target and timestep the estimate is
//!
//! ```text
//! z(t) = Σ_g w_g * z_g(t) / Σ_g w_g,    w_g = 1 / d(g, target)^p
//! ```
//!
//! computed over the shortest series among the supplied gauges. A target
//! lying exactly on a gauge either takes that gauge's series or is rejected,
//! per [`CoincidentPolicy`].
//!
//! # Quick start
//!
//! ```rust
//! use raingen_idw::{IdwConfig, Point, interpolate};
//!
//! let gauges = [Point::new(0.0, 0.0), Point::new(10.0, 0.0)];
//! let a = [4.0, 4.0];
//! let b = [8.0, 8.0];
//! let series: [&[f64]; 2] = [&a, &b];
//!
//! let out = interpolate(&gauges, &series, &[Point::new(5.0, 0.0)], &IdwConfig::new()).unwrap();
//! assert_eq!(out[0], vec![6.0, 6.0]);
//! ```

mod config;
mod error;
mod grid;
mod interpolate;
mod point;

pub use config::{CoincidentPolicy, IdwConfig};
pub use error::IdwError;
pub use grid::{GridCell, grid_cells, grid_centroids};
pub use interpolate::{Weighting, interpolate, weights};
pub use point::{Extent, Point};
