//! CLI entry point for the study group analyzer.
//!
//! Loads a CSV file (or every CSV inside a ZIP archive), prints group
//! statistics and writes per-course reports.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use study_group_analyzer::analyzers::analyzer::{AnalysisRequest, analyze_source};
use study_group_analyzer::config::Settings;
use study_group_analyzer::source::open_source;
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "SGAnalyzer")]
#[command(about = "Study group analysis program", long_about = None)]
#[command(after_help = "Please report issues at the issue report system.")]
struct Cli {
    /// Set the data file path (.csv, or .zip of CSV files)
    #[arg(short = 'f', long = "filepath", value_name = "file-path")]
    file_path: PathBuf,

    /// Set a course name so it will print out group information based on
    /// course names. In addition, it saves a csv file about the results.
    #[arg(short = 'n', long = "cname", value_name = "course-name")]
    course_name: Option<String>,

    /// Print out the statistics of the study group data
    #[arg(short = 's', long = "statistics")]
    statistics: bool,

    /// Print statistics as JSON
    #[arg(long, requires = "statistics")]
    json: bool,

    /// Directory for course report CSV files
    #[arg(short = 'o', long, value_name = "dir")]
    output_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    let cli = Cli::parse();
    let settings = Settings::from_env().with_output_dir(cli.output_dir);

    // Logging setup: colored stderr + JSON rolling log file
    let log_dir = settings
        .log_file_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("logs"));
    let log_file_name = settings
        .log_file_path
        .file_name()
        .unwrap_or(OsStr::new("study_group_analyzer.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    info!(
        source = %cli.file_path.display(),
        output_dir = %settings.output_dir.display(),
        "Starting analysis"
    );

    let request = AnalysisRequest {
        statistics: cli.statistics,
        json: cli.json,
        course: cli.course_name,
        output_dir: settings.output_dir,
    };

    let source = open_source(&cli.file_path);
    let mut stdout = std::io::stdout().lock();
    let summaries = analyze_source(source.as_ref(), &request, &mut stdout)
        .with_context(|| format!("failed to analyze {}", cli.file_path.display()))?;

    info!(datasets = summaries.len(), "Finished analysis");
    Ok(())
}
