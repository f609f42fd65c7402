//! `sharpts`: translate C# files or whole projects to TypeScript.

mod config;
mod project;

use clap::Parser;
use config::{Overrides, Settings, SharptsConfig};
use sharpts::DialectKind;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "sharpts", version, about = "Translate C# source to TypeScript")]
struct Cli {
    /// Translate a single C# file.
    #[arg(long, conflicts_with = "project", required_unless_present = "project")]
    file: Option<PathBuf>,

    /// Translate every C# file below this directory.
    #[arg(long)]
    project: Option<PathBuf>,

    /// Directory the translated files are written to.
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Output file name for --file (defaults to the input name with the
    /// configured extension).
    #[arg(long, requires = "file")]
    filename: Option<String>,

    /// Config file (defaults to sharpts.toml next to the input).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output dialect: typescript or script-sharp.
    #[arg(long)]
    dialect: Option<DialectKind>,

    /// Stop at the first declaration that cannot be translated.
    #[arg(long)]
    abort_on_error: bool,

    /// Log translation progress to stderr.
    #[arg(long, short)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn config_root(cli: &Cli) -> PathBuf {
    match (&cli.project, &cli.file) {
        (Some(root), _) => root.clone(),
        (None, Some(file)) => file
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(".")),
        (None, None) => PathBuf::from("."),
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = SharptsConfig::load(cli.config.as_deref(), &config_root(&cli))?;
    let settings = Settings::resolve(
        config,
        Overrides {
            dialect: cli.dialect,
            abort_on_error: cli.abort_on_error,
            output: cli.output.clone(),
        },
    );
    tracing::debug!(?settings, "resolved settings");

    let jobs = match (&cli.project, &cli.file) {
        (Some(root), _) => {
            anyhow::ensure!(root.is_dir(), "{} is not a directory", root.display());
            project::project_jobs(root, &settings)
        }
        (None, Some(file)) => vec![project::file_job(file, cli.filename.as_deref(), &settings)?],
        (None, None) => anyhow::bail!("either --file or --project is required"),
    };
    if jobs.is_empty() {
        tracing::warn!("no C# sources found");
        return Ok(());
    }

    let reports = project::run_jobs(&jobs, &settings)?;
    let failures: usize = reports.iter().map(|report| report.failures.len()).sum();
    for report in &reports {
        for failure in &report.failures {
            eprintln!("{}: skipped {}: {}", report.input.display(), failure.name, failure.error);
        }
    }
    println!(
        "translated {} of {} files ({} declarations skipped)",
        reports.len(),
        jobs.len(),
        failures
    );
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    if let Err(err) = run(cli) {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
