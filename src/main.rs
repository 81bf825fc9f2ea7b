//! Replays a tablet sample stream through the reconstructor.

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use tablet_reconstructor::config::{Config, EXAMPLE_CONFIG};
use tablet_reconstructor::filters::exponential::ExponentialSmoother;
use tablet_reconstructor::filters::PositionFilter;
use tablet_reconstructor::pipeline::{
    format_report, parse_report_line, DeviceReport, FilterElement, FnSink, PipelineElement, ReconstructorElement,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// EMA weight of the device smoothing to reverse (0.0 - 1.0)
    #[arg(short, long)]
    weight: Option<f64>,

    /// Moves longer than this pass through untouched (-1 disables)
    #[arg(short, long, allow_negative_numbers = true)]
    cutoff: Option<f64>,

    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    config: Option<String>,

    /// Input file with one `x,y[,pressure]` report per line (stdin if omitted)
    #[arg(short, long)]
    input: Option<String>,

    /// Smooth the input with this EMA alpha first, to simulate a device
    #[arg(short, long)]
    simulate: Option<f64>,

    /// Print an example configuration file and exit
    #[arg(long)]
    print_config: bool,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

fn load_config(args: &Args) -> Config {
    let Some(config_path) = &args.config else {
        return Config::default();
    };

    info!("Loading configuration from: {}", config_path);
    match Config::from_file(config_path).and_then(|cfg| cfg.validate().map(|()| cfg)) {
        Ok(cfg) => cfg,
        Err(e) => {
            warn!("Failed to load config file: {}. Using defaults.", e);
            Config::default()
        }
    }
}

/// Build the pipeline stage the configuration asks for, applying CLI overrides
fn build_stage(config: &Config, args: &Args) -> Result<Box<dyn PipelineElement>> {
    if !config.uses_reconstructor() {
        if args.weight.is_some() || args.cutoff.is_some() {
            warn!(
                "--weight/--cutoff ignored, configured filter is '{}'",
                config.pipeline.filter
            );
        }
        let element = FilterElement::new(config.create_filter()?);
        info!("Running {} filter", element.filter_name());
        return Ok(Box::new(element));
    }

    let mut element = ReconstructorElement::new(config.build_reconstructor());
    if let Some(weight) = args.weight {
        element.reconstructor_mut().set_weight(weight);
    }
    if let Some(cutoff) = args.cutoff {
        element.reconstructor_mut().set_cutoff(cutoff);
    }
    info!(
        "Reconstructing with weight {} and cutoff {}",
        element.reconstructor().weight(),
        element.reconstructor().cutoff()
    );
    Ok(Box::new(element))
}

/// Feed every line of `reader` through `stage`, writing results to `out`.
/// Malformed lines are logged and skipped. Returns the number of reports forwarded.
fn replay<R: BufRead, W: Write>(
    reader: R,
    out: &mut W,
    stage: &mut dyn PipelineElement,
    mut simulator: Option<ExponentialSmoother>,
) -> Result<usize> {
    let mut write_error = None;
    let mut processed = 0usize;

    for (index, line) in reader.lines().enumerate() {
        let line = line.context("Failed to read input")?;
        let mut report = match parse_report_line(index + 1, &line) {
            Ok(Some(report)) => report,
            Ok(None) => continue,
            Err(e) => {
                warn!("Skipping input: {}", e);
                continue;
            }
        };

        if let (Some(smoother), Some(position)) = (simulator.as_mut(), report.position_mut()) {
            *position = smoother.apply(*position);
        }

        let mut sink = FnSink(|report: DeviceReport| {
            if write_error.is_none() {
                if let Err(e) = writeln!(out, "{}", format_report(&report)) {
                    write_error = Some(e);
                }
            }
        });
        stage.consume(report, &mut sink);
        processed += 1;

        if let Some(e) = write_error.take() {
            return Err(e).context("Failed to write output");
        }
    }

    out.flush().context("Failed to flush output")?;
    Ok(processed)
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    if args.print_config {
        print!("{EXAMPLE_CONFIG}");
        return Ok(());
    }

    let config = load_config(&args);
    let mut stage = build_stage(&config, &args)?;

    let simulator = match args.simulate {
        Some(alpha) if alpha > 0.0 && alpha <= 1.0 => Some(ExponentialSmoother::new(alpha)),
        Some(alpha) => anyhow::bail!("Simulation alpha must be in (0, 1], got {alpha}"),
        None => None,
    };

    let reader: Box<dyn BufRead> = match &args.input {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("Failed to open input file {path}"))?,
        )),
        None => Box::new(BufReader::new(io::stdin())),
    };

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let processed = replay(reader, &mut out, stage.as_mut(), simulator)?;
    info!("Processed {} reports", processed);

    Ok(())
}
