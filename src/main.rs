// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{error, info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;

use karatime::app_config::{self, Config};
use karatime::app_controller::Controller;
use karatime::errors::AppError;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

/// Options shared by every pipeline command
#[derive(clap::Args, Debug)]
struct PipelineArgs {
    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: PathBuf,

    /// Parity tolerance in centiseconds
    #[arg(short, long)]
    tolerance: Option<i64>,

    /// Effect name to prefer over untagged events (repeatable)
    #[arg(short, long = "effect")]
    effects: Vec<String>,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build the four corpora from a directory of subtitle documents
    Build {
        /// Directory to scan for documents
        #[arg(value_name = "INPUT_DIR")]
        input_dir: PathBuf,

        /// Directory the corpora are written to
        #[arg(short, long, default_value = "data")]
        output_dir: PathBuf,

        /// Number of documents processed in parallel
        #[arg(short = 'j', long)]
        jobs: Option<usize>,

        #[command(flatten)]
        pipeline: PipelineArgs,
    },

    /// Run the pipeline on single documents and report the outcome
    Check {
        /// Documents to check
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,

        #[command(flatten)]
        pipeline: PipelineArgs,
    },

    /// Generate shell completions for karatime
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// karatime - karaoke timing corpora from ASS subtitles
///
/// Extracts per-syllable karaoke timing from ASS subtitle documents, checks
/// that it agrees with each line's timestamps, and writes the documents that
/// pass into syllable and line corpora.
#[derive(Parser, Debug)]
#[command(name = "karatime")]
#[command(version)]
#[command(about = "Karaoke timing corpus builder for ASS subtitles")]
#[command(long_about = "karatime extracts per-syllable karaoke timing from ASS subtitles.

EXAMPLES:
    karatime build data/ass                    # Build corpora into ./data
    karatime build data/ass -o out -j 8        # Write to ./out using 8 workers
    karatime build data/ass -t 10 -e karaoke   # Stricter parity, explicit effect
    karatime check song.ass                    # Report one document's outcome
    karatime completions bash > karatime.bash  # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default
    one will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        // The logger itself lets everything through; log::set_max_level does the filtering
        let logger = Box::new(CustomLogger::new(LevelFilter::Trace));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color code for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "1;31",
            Level::Warn => "1;33",
            Level::Info => "1;32",
            Level::Debug => "1;36",
            Level::Trace => "1;35",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {:<5} {}\x1B[0m",
                Self::color_for_level(record.level()),
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// Load the config file and apply command line overrides
fn load_config(args: &PipelineArgs) -> Result<Config> {
    let mut config = Config::load_or_create(&args.config_path)?;

    if let Some(tolerance) = args.tolerance {
        config.karaoke.tolerance_cs = tolerance;
    }

    if !args.effects.is_empty() {
        config.karaoke.effects = args.effects.clone();
    }

    if let Some(log_level) = &args.log_level {
        config.log_level = log_level.clone().into();
    }

    log::set_max_level(config.log_level.to_level_filter());
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "karatime", &mut std::io::stdout());
            Ok(())
        }
        Commands::Build { input_dir, output_dir, jobs, pipeline } => {
            let mut config = load_config(&pipeline)?;
            if let Some(jobs) = jobs {
                config.concurrent_documents = jobs;
            }

            let controller = Controller::with_config(config)?;
            let summary = controller.run_folder(input_dir, output_dir.clone()).await?;
            if summary.documents > 0 && summary.accepted == 0 {
                warn!("Every document was discarded; corpora in {:?} are empty", output_dir);
            }
            Ok(())
        }
        Commands::Check { files, pipeline } => {
            let controller = Controller::with_config(load_config(&pipeline)?)?;
            let mut failures = 0;

            for file in &files {
                match controller.check_file(file) {
                    Ok(timings) => info!(
                        "{:?}: accepted, {} lines, {} syllables",
                        file,
                        timings.lines.len(),
                        timings.syllables.len()
                    ),
                    Err(AppError::Karaoke(e)) => {
                        error!("{:?}: discarded, {}", file, e);
                        failures += 1;
                    }
                    Err(e) => return Err(e.into()),
                }
            }

            if failures > 0 {
                return Err(anyhow!("{} of {} documents would be discarded", failures, files.len()));
            }
            Ok(())
        }
    }
}
