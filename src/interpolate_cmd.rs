//! Interpolate command: IDW of gauge series onto target points.

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow, bail};
use tracing::{info, info_span};

use raingen_idw::{Point, interpolate};
use raingen_io::{SeriesBlock, WriterConfig, write_blocks};

use crate::cli::InterpolateArgs;
use crate::config::RaingenConfig;
use crate::convert::{self, SeriesSource};
use crate::generate::{load_dataset, synthesize_gauges};

/// Run the interpolation pipeline.
pub fn run(args: InterpolateArgs) -> Result<()> {
    let _cmd = info_span!("interpolate").entered();
    let config = RaingenConfig::from_file(&args.config)?;

    let output: PathBuf = args
        .output
        .or_else(|| config.interpolate.output.clone())
        .ok_or_else(|| {
            anyhow!("no output path: set [interpolate].output in config or use --output")
        })?;
    let idw_cfg = convert::build_idw_config(&config.interpolate, config.generate.parallel)?;
    let source = convert::parse_source(&config.interpolate.source)?;

    let dataset = load_dataset(&config)?;
    let (locations, series): (Vec<Point>, Vec<Vec<f64>>) = match source {
        SeriesSource::Observed => dataset
            .iter()
            .map(|(spec, s)| {
                let (x, y) = spec.location();
                (Point::new(x, y), s.depths().to_vec())
            })
            .unzip(),
        SeriesSource::Synthetic => {
            let synth_cfg = convert::build_synth_config(&config.generate, args.length)?;
            let analysis_cfg = convert::build_analysis_config(&config.analysis)?;
            let gauges = synthesize_gauges(
                &dataset,
                &analysis_cfg,
                &synth_cfg,
                args.seed.or(config.seed),
                config.generate.parallel,
            );
            gauges
                .into_iter()
                .map(|g| (Point::new(g.location.0, g.location.1), g.depths))
                .unzip()
        }
    };
    if locations.is_empty() {
        bail!("no gauge series available for interpolation");
    }

    let targets = convert::build_targets(&config.interpolate, &locations)?;
    let refs: Vec<&[f64]> = series.iter().map(Vec::as_slice).collect();
    info!(
        n_gauges = locations.len(),
        n_targets = targets.len(),
        power = idw_cfg.power(),
        "interpolating"
    );
    let estimates =
        interpolate(&locations, &refs, &targets, &idw_cfg).context("interpolation failed")?;

    let names: Vec<String> = (0..estimates.len()).map(|i| format!("target_{i}")).collect();
    let blocks: Vec<SeriesBlock<'_>> = names
        .iter()
        .zip(&estimates)
        .map(|(name, values)| SeriesBlock::new(name, values))
        .collect();
    write_blocks(&output, &blocks, &WriterConfig::default())
        .with_context(|| format!("failed to write output: {}", output.display()))?;
    info!(path = %output.display(), n_blocks = blocks.len(), "output written");
    Ok(())
}
