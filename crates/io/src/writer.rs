//! Rainfall block writer for the hydraulic simulator's point-boundary format.
//!
//! ```text
//! # comment
//! # !BEGIN
//! # number beginning from 0 ++ number of points
//! # <time label> <value label>
//! # !END
//!
//!
//! !BEGIN   #<name>
//! <block index> <n> area #<descriptor>
//! 1 <depth>
//! ...
//! !END
//!
//! ```

use std::io::{BufWriter, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::IoError;

/// One named series to emit as a `!BEGIN`/`!END` block.
#[derive(Debug, Clone, Copy)]
pub struct SeriesBlock<'a> {
    name: &'a str,
    values: &'a [f64],
}

impl<'a> SeriesBlock<'a> {
    /// Creates a block view over `values` (depth per timestep).
    pub fn new(name: &'a str, values: &'a [f64]) -> Self {
        Self { name, values }
    }

    /// Block name written after `!BEGIN   #`.
    pub fn name(&self) -> &str {
        self.name
    }

    /// Depth per timestep.
    pub fn values(&self) -> &[f64] {
        self.values
    }
}

/// Labels written into the file header and block descriptor lines.
#[derive(Debug, Clone)]
pub struct WriterConfig {
    time_label: String,
    value_label: String,
    descriptor: String,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            time_label: "hour [h]".into(),
            value_label: "precipitation [mm]".into(),
            descriptor: "Length [m²/s], Area [m/s], waterlevel [m], point [m³/s]".into(),
        }
    }
}

impl WriterConfig {
    /// Sets the time-axis label of the header.
    pub fn with_time_label(mut self, label: impl Into<String>) -> Self {
        self.time_label = label.into();
        self
    }

    /// Sets the value-axis label of the header.
    pub fn with_value_label(mut self, label: impl Into<String>) -> Self {
        self.value_label = label.into();
        self
    }

    /// Sets the comment appended to each block's `area` line.
    pub fn with_descriptor(mut self, descriptor: impl Into<String>) -> Self {
        self.descriptor = descriptor.into();
        self
    }
}

/// Write `blocks` to `path`, replacing any existing file.
///
/// The file is assembled in a temporary file next to `path` and renamed into
/// place only once every block is written, so a failure never leaves a
/// partially written output behind.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] if the destination directory does not
/// exist, [`IoError::Validation`] if a block name contains a line break, and
/// [`IoError::Os`] if writing or renaming fails.
pub fn write_blocks(
    path: &Path,
    blocks: &[SeriesBlock<'_>],
    config: &WriterConfig,
) -> Result<(), IoError> {
    if let Some(bad) = blocks.iter().find(|b| b.name.contains(['\n', '\r'])) {
        return Err(IoError::Validation {
            count: 1,
            details: format!("block name {:?} contains a line break", bad.name),
        });
    }

    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    if !dir.is_dir() {
        return Err(IoError::FileNotFound {
            path: dir.to_path_buf(),
        });
    }

    let tmp = NamedTempFile::new_in(dir).map_err(|e| IoError::os(dir, e))?;
    {
        let mut out = BufWriter::new(tmp.as_file());
        write_contents(&mut out, blocks, config).map_err(|e| IoError::os(path, e))?;
        out.flush().map_err(|e| IoError::os(path, e))?;
    }
    tmp.persist(path).map_err(|e| IoError::os(path, e.error))?;

    debug!(path = %path.display(), n_blocks = blocks.len(), "rainfall blocks written");
    Ok(())
}

fn write_contents(
    out: &mut impl Write,
    blocks: &[SeriesBlock<'_>],
    config: &WriterConfig,
) -> std::io::Result<()> {
    writeln!(out, "# comment")?;
    writeln!(out, "# !BEGIN")?;
    writeln!(out, "# number beginning from 0 ++ number of points")?;
    writeln!(out, "# {} {}", config.time_label, config.value_label)?;
    writeln!(out, "# !END")?;
    writeln!(out)?;
    writeln!(out)?;

    for (index, block) in blocks.iter().enumerate() {
        writeln!(out, "!BEGIN   #{}", block.name)?;
        writeln!(
            out,
            "{} {}             area #{}",
            index,
            block.values.len(),
            config.descriptor
        )?;
        for (t, value) in block.values.iter().enumerate() {
            writeln!(out, "{} {}", t + 1, value)?;
        }
        writeln!(out, "!END")?;
        writeln!(out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(blocks: &[SeriesBlock<'_>]) -> String {
        let mut buf = Vec::new();
        write_contents(&mut buf, blocks, &WriterConfig::default()).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn header_only_when_no_blocks() {
        let text = render(&[]);
        assert!(text.starts_with("# comment\n# !BEGIN\n"));
        assert!(text.ends_with("# !END\n\n\n"));
    }

    #[test]
    fn block_layout() {
        let values = [0.0, 2.5];
        let text = render(&[SeriesBlock::new("north", &values)]);
        let body: Vec<&str> = text.lines().skip(7).collect();
        assert_eq!(body[0], "!BEGIN   #north");
        assert!(body[1].starts_with("0 2 "));
        assert!(body[1].contains("area #"));
        assert_eq!(body[2], "1 0");
        assert_eq!(body[3], "2 2.5");
        assert_eq!(body[4], "!END");
        assert_eq!(body[5], "");
    }

    #[test]
    fn custom_labels() {
        let mut buf = Vec::new();
        let cfg = WriterConfig::default()
            .with_time_label("step [-]")
            .with_value_label("depth [in]")
            .with_descriptor("rain");
        let values = [1.0];
        write_contents(&mut buf, &[SeriesBlock::new("g", &values)], &cfg).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("# step [-] depth [in]\n"));
        assert!(text.contains("0 1             area #rain\n"));
    }
}
