//! pixtrace: trace pixel-art and flat-color images into SVG outlines.
//!
//! Reads an image, traces every non-transparent color region into closed
//! axis-aligned polygons, and writes one `<path>` per color to an SVG
//! document.
//!
//! # Usage
//!
//! ```text
//! pixtrace [OPTIONS] [INPUT] [OUTPUT]
//! ```
//!
//! `INPUT` and `OUTPUT` default to stdin and stdout; `-` selects them
//! explicitly.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::Parser;
use pixtrace_export::SvgMetadata;
use pixtrace_pipeline::diagnostics::{Clock, process_with_diagnostics};
use pixtrace_pipeline::{TraceConfig, TraceError, TraceResult};
use tracing::level_filters::LevelFilter;

/// Trace pixel-art and flat-color images into axis-aligned SVG outlines.
///
/// Pixels of the same exact RGBA value are grouped into one filled path.
/// Fully transparent pixels are background.
#[derive(Parser)]
#[command(name = "pixtrace", version)]
struct Cli {
    /// Input image (PNG, BMP, GIF, WebP). Omit or use `-` for stdin.
    input: Option<PathBuf>,

    /// Output SVG file. Omit or use `-` for stdout.
    output: Option<PathBuf>,

    /// Keep every traced pixel corner instead of merging straight runs.
    #[arg(long)]
    no_optimize: bool,

    /// Full trace config as a JSON string.
    ///
    /// When provided, the individual config flags are ignored. The JSON
    /// must be a valid `TraceConfig` serialization.
    #[arg(long)]
    config_json: Option<String>,

    /// Document title. Defaults to the input file name without extension.
    #[arg(long)]
    title: Option<String>,

    /// Print per-stage diagnostics to stderr.
    #[arg(long)]
    diagnostics: bool,

    /// Print diagnostics as JSON instead of a human-readable report.
    #[arg(long, requires = "diagnostics")]
    json: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Build a [`TraceConfig`] from CLI arguments.
///
/// If `--config-json` is provided, the JSON is parsed directly and the
/// individual flags are ignored.
fn config_from_cli(cli: &Cli) -> Result<TraceConfig, TraceError> {
    if let Some(ref json) = cli.config_json {
        return serde_json::from_str(json)
            .map_err(|e| TraceError::InvalidConfig(format!("--config-json: {e}")));
    }

    Ok(TraceConfig {
        optimize: !cli.no_optimize,
    })
}

/// `None` and `-` both mean the standard stream.
fn file_arg(path: Option<&Path>) -> Option<&Path> {
    path.filter(|p| p.as_os_str() != "-")
}

fn read_input(path: Option<&Path>) -> std::io::Result<Vec<u8>> {
    match path {
        Some(path) => std::fs::read(path),
        None => {
            let mut bytes = Vec::new();
            std::io::stdin().lock().read_to_end(&mut bytes)?;
            Ok(bytes)
        }
    }
}

fn write_output(path: Option<&Path>, svg: &str) -> std::io::Result<()> {
    match path {
        Some(path) => std::fs::write(path, svg),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(svg.as_bytes())?;
            stdout.flush()
        }
    }
}

const fn level_for(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(level_for(cli.verbose))
        .with_writer(std::io::stderr)
        .init();

    let config = match config_from_cli(&cli) {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let input = file_arg(cli.input.as_deref());
    let output = file_arg(cli.output.as_deref());
    let source = input.map_or_else(|| "<stdin>".to_owned(), |p| p.display().to_string());

    let image_bytes = match read_input(input) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::error!("error reading {source}: {e}");
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(source = %source, bytes = image_bytes.len(), ?config, "read input");

    let result = match trace(&image_bytes, &config, &cli) {
        Ok(result) => result,
        Err(e) => {
            tracing::error!("error tracing {source}: {e}");
            return ExitCode::FAILURE;
        }
    };

    let title = cli
        .title
        .as_deref()
        .or_else(|| input.and_then(Path::file_stem).and_then(|s| s.to_str()));
    let config_json = match serde_json::to_string(&config) {
        Ok(json) => json,
        Err(e) => {
            tracing::error!("error serializing config: {e}");
            return ExitCode::FAILURE;
        }
    };
    let metadata = SvgMetadata {
        title,
        description: Some(concat!("Traced by pixtrace ", env!("CARGO_PKG_VERSION"))),
        config_json: Some(&config_json),
    };
    let svg = pixtrace_export::to_svg(&result.paths, result.dimensions, &metadata);

    if let Err(e) = write_output(output, &svg) {
        let target = output.map_or_else(|| "<stdout>".to_owned(), |p| p.display().to_string());
        tracing::error!("error writing {target}: {e}");
        return ExitCode::FAILURE;
    }
    tracing::info!(paths = result.paths.len(), bytes = svg.len(), "wrote SVG");

    ExitCode::SUCCESS
}

/// Run the pipeline, printing diagnostics to stderr when requested.
fn trace(image_bytes: &[u8], config: &TraceConfig, cli: &Cli) -> Result<TraceResult, TraceError> {
    if !cli.diagnostics {
        return pixtrace_pipeline::process(image_bytes, config);
    }

    let (result, diagnostics) = process_with_diagnostics(image_bytes, config, &StdClock)?;
    if cli.json {
        match serde_json::to_string_pretty(&diagnostics) {
            Ok(json) => eprintln!("{json}"),
            Err(e) => tracing::warn!("error serializing diagnostics: {e}"),
        }
    } else {
        eprintln!("{}", diagnostics.report());
    }
    Ok(result)
}

/// [`Clock`] implementation backed by [`std::time::Instant`].
struct StdClock;

impl Clock for StdClock {
    type Instant = Instant;

    fn now(&self) -> Instant {
        Instant::now()
    }

    fn elapsed(&self, since: &Instant) -> Duration {
        since.elapsed()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("pixtrace").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn defaults_read_stdin_and_write_stdout() {
        let cli = parse(&[]);
        assert!(file_arg(cli.input.as_deref()).is_none());
        assert!(file_arg(cli.output.as_deref()).is_none());
        assert_eq!(config_from_cli(&cli).unwrap(), TraceConfig::default());
    }

    #[test]
    fn dash_means_standard_stream() {
        let cli = parse(&["-", "out.svg"]);
        assert!(file_arg(cli.input.as_deref()).is_none());
        assert_eq!(file_arg(cli.output.as_deref()), Some(Path::new("out.svg")));
    }

    #[test]
    fn no_optimize_flag() {
        let cli = parse(&["--no-optimize", "in.png"]);
        assert!(!config_from_cli(&cli).unwrap().optimize);
    }

    #[test]
    fn config_json_overrides_flags() {
        let cli = parse(&["--no-optimize", "--config-json", r#"{"optimize":true}"#]);
        assert!(config_from_cli(&cli).unwrap().optimize);
    }

    #[test]
    fn invalid_config_json_is_rejected() {
        let cli = parse(&["--config-json", "{not json"]);
        assert!(matches!(
            config_from_cli(&cli),
            Err(TraceError::InvalidConfig(_))
        ));
    }

    #[test]
    fn json_requires_diagnostics() {
        let args = ["pixtrace", "--json"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn verbosity_levels() {
        assert_eq!(level_for(0), LevelFilter::WARN);
        assert_eq!(level_for(2), LevelFilter::DEBUG);
        assert_eq!(level_for(7), LevelFilter::TRACE);
        assert_eq!(parse(&["-vv"]).verbose, 2);
    }

    #[test]
    fn clock_measures_forward() {
        let clock = StdClock;
        let start = clock.now();
        assert!(clock.elapsed(&start) < Duration::from_secs(60));
    }
}
