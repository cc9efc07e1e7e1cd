use std::env;
use std::io;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use tracing_subscriber::EnvFilter;

use givik_log::config::EngineConfig;
use givik_log::fit::{self, FitMode};
use givik_log::parsers::{Series, SeriesStore};
use givik_log::state;

const USAGE: &str = "usage: inspect_log [--config FILE] [--json] \
[--fit X Y X1 X2 [--mode two-point|regression]] [--auto-fit X Y] FILE...";

/// Window fit requested on the command line
struct FitRequest {
    x: String,
    y: String,
    x1: f64,
    x2: f64,
}

#[derive(Default)]
struct Args {
    paths: Vec<PathBuf>,
    config: Option<PathBuf>,
    json: bool,
    mode: Option<FitMode>,
    fit: Option<FitRequest>,
    auto_fit: Option<(String, String)>,
}

fn next_value(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String> {
    args.next()
        .with_context(|| format!("{} expects a value\n{}", flag, USAGE))
}

fn next_number(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<f64> {
    let value = next_value(args, flag)?;
    value
        .parse()
        .with_context(|| format!("{}: '{}' is not a number", flag, value))
}

fn parse_args() -> Result<Args> {
    let mut parsed = Args::default();
    let mut args = env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => parsed.config = Some(PathBuf::from(next_value(&mut args, &arg)?)),
            "--json" => parsed.json = true,
            "--mode" => {
                let mode = next_value(&mut args, &arg)?;
                parsed.mode = Some(
                    mode.parse()
                        .with_context(|| format!("unknown fit mode '{}'", mode))?,
                );
            }
            "--fit" => {
                parsed.fit = Some(FitRequest {
                    x: next_value(&mut args, &arg)?,
                    y: next_value(&mut args, &arg)?,
                    x1: next_number(&mut args, &arg)?,
                    x2: next_number(&mut args, &arg)?,
                });
            }
            "--auto-fit" => {
                parsed.auto_fit = Some((next_value(&mut args, &arg)?, next_value(&mut args, &arg)?));
            }
            "-h" | "--help" => {
                println!("{}", USAGE);
                std::process::exit(0);
            }
            flag if flag.starts_with("--") => bail!("unknown option {}\n{}", flag, USAGE),
            path => parsed.paths.push(PathBuf::from(path)),
        }
    }

    if parsed.paths.is_empty() {
        bail!("no input files\n{}", USAGE);
    }
    Ok(parsed)
}

fn print_summary(store: &SeriesStore) {
    println!("\n=== {} ===", store.display_name().unwrap_or(store.source_path()));
    println!("Format: {}", store.format_kind().name());

    println!("Series ({}):", store.len());
    for (i, (name, series)) in store.series().enumerate() {
        let preview = match series {
            Series::Numeric(values) => values
                .iter()
                .take(4)
                .map(|v| format!("{:.4}", v))
                .collect::<Vec<_>>()
                .join(", "),
            Series::Labels(labels) => labels.iter().take(4).cloned().collect::<Vec<_>>().join(", "),
        };
        let more = if series.len() > 4 { ", ..." } else { "" };
        println!("  {:2}. {} [{}]: {}{}", i + 1, name, series.len(), preview, more);
    }

    let mut metadata = store.metadata().peekable();
    if metadata.peek().is_some() {
        println!("Metadata:");
        for (name, value) in metadata {
            println!("  {}: {}", name, value);
        }
    }
}

fn run_fit(store: &SeriesStore, request: &FitRequest, mode: FitMode) -> Result<()> {
    let xs = store
        .numeric(&request.x)
        .with_context(|| format!("no numeric series '{}'", request.x))?;
    let ys = store
        .numeric(&request.y)
        .with_context(|| format!("no numeric series '{}'", request.y))?;

    let result = fit::fit(xs, ys, request.x1, request.x2, mode)?;
    println!(
        "Fit ({}) {} vs {} on [{}, {}): y = {:.6} * x + {:.6} over {} points",
        mode,
        request.y,
        request.x,
        request.x1,
        request.x2,
        result.slope,
        result.intercept,
        result.window_points.len()
    );
    if let Some(r2) = result.r_squared {
        println!("  R² = {:.6}", r2);
    }
    if let Some(stats) = result.stats() {
        println!(
            "  mean {:.4}, min {:.4}, max {:.4}, delta {:.4}",
            stats.mean, stats.min, stats.max, stats.delta
        );
    }
    Ok(())
}

fn run_auto_fit(store: &SeriesStore, x: &str, y: &str, config: &EngineConfig) -> Result<()> {
    let xs = store
        .numeric(x)
        .with_context(|| format!("no numeric series '{}'", x))?;
    let ys = store
        .numeric(y)
        .with_context(|| format!("no numeric series '{}'", y))?;

    let best = fit::best_subset(xs, ys, config.search)?;
    println!(
        "Best window {} vs {}: points {}..{}, x in [{}, {}], R² = {:.6}, y = {:.6} * x + {:.6}",
        y,
        x,
        best.start,
        best.end,
        xs[best.start],
        xs[best.end - 1],
        best.r_squared,
        best.slope,
        best.intercept
    );
    Ok(())
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let args = parse_args()?;
    let config = match &args.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    let mode = args.mode.unwrap_or(config.fit_mode);

    let batch = state::load_files(&args.paths, &config);

    if args.json {
        let stores: Vec<&SeriesStore> = batch.files.iter().map(|f| &f.store).collect();
        println!("{}", serde_json::to_string_pretty(&stores)?);
    } else {
        for file in &batch.files {
            print_summary(&file.store);
            if let Some(request) = &args.fit {
                if let Err(e) = run_fit(&file.store, request, mode) {
                    eprintln!("Fit failed: {:#}", e);
                }
            }
            if let Some((x, y)) = &args.auto_fit {
                if let Err(e) = run_auto_fit(&file.store, x, y, &config) {
                    eprintln!("Best-window search failed: {:#}", e);
                }
            }
        }
    }

    for (path, error) in &batch.errors {
        eprintln!("{}: {}", path.display(), error);
    }
    if batch.files.is_empty() {
        bail!("no file could be parsed");
    }
    Ok(())
}
