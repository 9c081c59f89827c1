use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use env_logger::{fmt::Formatter, Builder, Target};
use log::{Level, LevelFilter};
use u_tsp::{tsplib, Error, Instance, SolveResult, Solver, SolverConfig};

/// Near-optimal Euclidean TSP tours: nearest-neighbor construction + 2-opt.
#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Cli {
    /// TSPLIB instance file (EUC_2D)
    #[arg(required_unless_present = "random")]
    instance: Option<PathBuf>,

    /// Wall-clock budget for the local search, in seconds
    #[arg(short, long)]
    time: Option<f64>,

    /// Candidate neighbors per node
    #[arg(short = 'k', long, default_value_t = 20)]
    candidates: usize,

    /// Solve a uniform random instance with this many nodes instead of a file
    #[arg(long, conflicts_with = "instance")]
    random: Option<usize>,

    /// Seed for --random
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Print 1-based node ids instead of 0-based indices
    #[arg(long)]
    ids: bool,

    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_filter(self) -> LevelFilter {
        match self {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logger(cli.log_level);

    let instance = match load_instance(&cli) {
        Ok(instance) => instance,
        Err(e) => return fail("loading instance", &e),
    };

    let config = match build_config(&cli) {
        Ok(config) => config,
        Err(e) => return fail("configuration", &e),
    };

    let result = match Solver::solve(&instance, &config) {
        Ok(result) => result,
        Err(e) => return fail("solving", &e),
    };

    if let Err(e) = report(&instance, &result, cli.ids) {
        return fail("writing result", &e);
    }
    ExitCode::SUCCESS
}

fn fail(step: &str, err: &Error) -> ExitCode {
    log::error!("{}", failure_message(step, err));
    ExitCode::FAILURE
}

fn failure_message(step: &str, err: &Error) -> String {
    format!("{step} failed: {err}")
}

fn load_instance(cli: &Cli) -> u_tsp::Result<Instance> {
    if let Some(n) = cli.random {
        log::info!("random instance: n={n} seed={}", cli.seed);
        return Instance::random_uniform(n, 1_000_000.0, cli.seed);
    }

    let Some(path) = cli.instance.as_ref() else {
        return Err(Error::invalid_config("no instance file given"));
    };
    let parsed = tsplib::read_tsplib(path)?;
    log::info!(
        "loaded {} ({} nodes) from {}",
        parsed.name.as_deref().unwrap_or("unnamed instance"),
        parsed.instance.len(),
        path.display()
    );
    Ok(parsed.instance)
}

fn build_config(cli: &Cli) -> u_tsp::Result<SolverConfig> {
    let mut config = SolverConfig::default().with_candidates(cli.candidates);
    if let Some(secs) = cli.time {
        let limit = Duration::try_from_secs_f64(secs)
            .map_err(|e| Error::invalid_config(format!("invalid time budget {secs}: {e}")))?;
        config = config.with_time_limit(limit);
    }
    config.validate()?;
    Ok(config)
}

fn report(instance: &Instance, result: &SolveResult, ids: bool) -> u_tsp::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    writeln!(out, "Initial tour length: {:.2}", result.initial_length)?;
    writeln!(out, "Optimized tour length: {:.2}", result.optimized_length)?;

    let labels: Vec<String> = result
        .order
        .iter()
        .map(|&i| {
            if ids {
                instance.node(i).id.to_string()
            } else {
                i.to_string()
            }
        })
        .collect();
    writeln!(out, "{}", labels.join(" "))?;
    out.flush()?;
    Ok(())
}

fn init_logger(level: LogLevel) {
    let mut builder = Builder::new();
    builder
        .filter_level(level.to_filter())
        .write_style(env_logger::WriteStyle::Never)
        .target(Target::Stderr)
        .format(|buf: &mut Formatter, record| {
            writeln!(buf, "{} {}", level_tag(record.level()), record.args())
        });

    if let Err(e) = builder.try_init() {
        eprintln!("logger init failed: {e}");
    }
}

fn level_tag(level: Level) -> &'static str {
    match level {
        Level::Error => "ERROR",
        Level::Warn => "WARN",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    }
}
