//! `gridwalk <grid-file> <batch-file> [output-file]`
//!
//! Reads a grid and a batch specification, runs every walk the batch asks
//! for, and writes the report. Without an output path the report goes to
//! `<grid-stem>_<batch-stem>_results.txt`, or `walk_results.txt` if that
//! cannot be created. Heatmaps are printed to stdout when the batch asks
//! for spatial distributions.
//!
//! Exit codes: 1 bad usage, 2 unreadable input, 3 run failure.

#![forbid(unsafe_code)]

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use gridwalk::prelude::*;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: gridwalk <grid-file> <batch-file> [output-file]";
const FALLBACK_OUTPUT: &str = "walk_results.txt";

#[derive(Debug)]
enum Failure {
    Usage,
    Input(String),
    Run(String),
}

impl Failure {
    fn exit_code(&self) -> u8 {
        match self {
            Failure::Usage => 1,
            Failure::Input(_) => 2,
            Failure::Run(_) => 3,
        }
    }
}

#[derive(Debug)]
struct Args {
    grid: PathBuf,
    batch: PathBuf,
    output: Option<PathBuf>,
}

fn parse_args(args: &[String]) -> Result<Args, Failure> {
    match args {
        [grid, batch] => Ok(Args {
            grid: grid.into(),
            batch: batch.into(),
            output: None,
        }),
        [grid, batch, output] => Ok(Args {
            grid: grid.into(),
            batch: batch.into(),
            output: Some(output.into()),
        }),
        _ => Err(Failure::Usage),
    }
}

/// `<grid-stem>_<batch-stem>_results.txt`, `None` if either stem is not
/// valid UTF-8 or empty.
fn default_output_path(grid: &Path, batch: &Path) -> Option<PathBuf> {
    let stem = |p: &Path| {
        p.file_stem()
            .and_then(|s| s.to_str())
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
    };
    Some(PathBuf::from(format!(
        "{}_{}_results.txt",
        stem(grid)?,
        stem(batch)?
    )))
}

fn read_input(path: &Path, what: &str) -> Result<String, Failure> {
    info!(path = %path.display(), "reading {what}");
    fs::read_to_string(path)
        .map_err(|e| Failure::Input(format!("failed to open {}: {e}", path.display())))
}

fn open_output(args: &Args) -> Result<(PathBuf, File), Failure> {
    if let Some(path) = &args.output {
        return File::create(path)
            .map(|f| (path.clone(), f))
            .map_err(|e| Failure::Run(format!("cannot create {}: {e}", path.display())));
    }
    if let Some(path) = default_output_path(&args.grid, &args.batch) {
        match File::create(&path) {
            Ok(f) => return Ok((path, f)),
            Err(e) => warn!(path = %path.display(), %e, "falling back to {FALLBACK_OUTPUT}"),
        }
    }
    let path = PathBuf::from(FALLBACK_OUTPUT);
    File::create(&path)
        .map(|f| (path.clone(), f))
        .map_err(|e| Failure::Run(format!("cannot create {}: {e}", path.display())))
}

fn print_heatmaps(manager: &WalkManager) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for map in manager.heatmaps() {
        debug!(label = %map.label, peak = map.peak(), "heatmap");
        writeln!(out, "{map}")?;
    }
    if let Some(comparison) = manager.final_comparison() {
        info!(
            analog_peak = comparison.analog_heatmap.peak(),
            best_peak = comparison.best_heatmap.peak(),
            "final heatmaps"
        );
        writeln!(out, "Analog case: {}", comparison.analog.policy)?;
        writeln!(out, "{}", comparison.analog_heatmap)?;
        writeln!(out, "Optimized case: {}", comparison.best.policy)?;
        writeln!(out, "{}", comparison.best_heatmap)?;
    }
    out.flush()
}

fn run(args: &Args) -> Result<(), Failure> {
    let mut grid: Grid = read_input(&args.grid, "grid specification")?
        .parse()
        .map_err(|e: GridError| Failure::Input(format!("{}: {e}", args.grid.display())))?;
    info!(
        width = grid.width(),
        height = grid.height(),
        cells = grid.cell_count(),
        start = %grid.start(),
        goal = %grid.goal(),
        "grid read"
    );

    let batch: BatchSpec = read_input(&args.batch, "batch specification")?
        .parse()
        .map_err(|e: ConfigError| Failure::Input(format!("{}: {e}", args.batch.display())))?;
    let print_spatial = batch.print_spatial;

    let mut manager = WalkManager::new(batch).map_err(|e| Failure::Run(e.to_string()))?;
    manager
        .execute(&mut grid)
        .map_err(|e| Failure::Run(e.to_string()))?;

    if print_spatial {
        print_heatmaps(&manager).map_err(|e| Failure::Run(format!("writing heatmaps: {e}")))?;
    }
    if let Some(comparison) = manager.final_comparison() {
        info!(
            analog_fom = comparison.analog.fom(),
            best_fom = comparison.best.fom(),
            "final comparison"
        );
    }

    let (path, file) = open_output(args)?;
    info!(path = %path.display(), "writing results");
    let mut out = BufWriter::new(file);
    manager
        .write_report(&mut out)
        .and_then(|()| out.flush())
        .map_err(|e| Failure::Run(format!("writing {}: {e}", path.display())))
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let result = parse_args(&args).and_then(|args| run(&args));
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(failure) => {
            match &failure {
                Failure::Usage => eprintln!("{USAGE}"),
                Failure::Input(msg) | Failure::Run(msg) => error!("{msg}"),
            }
            ExitCode::from(failure.exit_code())
        }
    }
}
