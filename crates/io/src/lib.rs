//! # raingen-io
//!
//! Read per-gauge precipitation depth series from delimiter-separated text
//! files and write generated rainfall as `!BEGIN`/`!END` blocks for the
//! hydraulic simulator. Bridges external files into the generator's
//! `&[f64]` slice-based APIs.

mod dataset;
mod error;
mod reader;
mod writer;

pub use dataset::{GaugeDataset, GaugeSeries, GaugeSpec};
pub use error::IoError;
pub use reader::{Delimiter, ReaderConfig, normalize_path, read_gauge_series};
pub use writer::{SeriesBlock, WriterConfig, write_blocks};
