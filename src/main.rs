//! staged-lint CLI
//!
//! Entry point for the `staged-lint` command-line tool.

use clap::{Parser, Subcommand};
use staged_lint::config::{
    self, load, CanonicalConfig, LinterCommand, LinterStep, LoadedConfig, StderrSink,
};
use staged_lint::escape::{escape_arg, Platform};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

/// Environment variable overriding the log filter
const LOG_ENV: &str = "STAGED_LINT_LOG";

#[derive(Parser)]
#[command(name = "staged-lint")]
#[command(about = "Resolve and check linter configuration for staged files", version)]
struct Cli {
    /// Debug output; also switches the default renderer to "verbose"
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the resolved configuration as JSON
    Config {
        /// Path to config file (default: search the current directory)
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,
    },

    /// Verify the project configuration
    Verify {
        /// Path to config file (default: search the current directory)
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,
    },

    /// Escape arguments for the target shell
    Escape {
        /// Platform identifier, e.g. "win32" or "linux" (default: this platform)
        #[arg(long)]
        platform: Option<Platform>,

        /// Arguments to escape (after --)
        #[arg(last = true, required = true)]
        args: Vec<String>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    match cli.command {
        Commands::Config { config } => run_config(config, cli.debug),
        Commands::Verify { config } => run_verify(config, cli.debug),
        Commands::Escape { platform, args } => run_escape(platform, &args),
    }
}

fn init_logging(debug: bool) {
    let default_directive = if debug { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(debug)
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_raw(config_path: Option<PathBuf>) -> Option<LoadedConfig> {
    let result = match config_path {
        Some(path) => load::load_file(&path).map(Some),
        None => {
            let cwd = match std::env::current_dir() {
                Ok(dir) => dir,
                Err(e) => {
                    eprintln!("Error reading current directory: {}", e);
                    process::exit(1);
                }
            };
            load::discover(&cwd)
        }
    };

    match result {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            process::exit(1);
        }
    }
}

/// Load, resolve and validate; exits on structural errors.
fn resolve_checked(
    config_path: Option<PathBuf>,
    debug: bool,
) -> (Option<LoadedConfig>, CanonicalConfig) {
    let loaded = load_raw(config_path);
    if loaded.is_none() {
        eprintln!("Warning: no configuration found, using defaults");
    }

    let resolved = config::resolve(loaded.as_ref().map(|l| l.raw.clone()), debug);
    if config::validate(&resolved, &mut StderrSink).is_err() {
        process::exit(1);
    }
    (loaded, resolved)
}

fn run_config(config_path: Option<PathBuf>, debug: bool) {
    let (_, resolved) = resolve_checked(config_path, debug);

    match resolved.to_json() {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing output: {}", e);
            process::exit(1);
        }
    }
}

fn run_verify(config_path: Option<PathBuf>, debug: bool) {
    let (loaded, resolved) = resolve_checked(config_path, debug);

    match loaded {
        Some(ref l) => println!("Configuration valid: {}", l.source.path.display()),
        None => println!("Configuration valid: built-in defaults"),
    }
    println!();

    if resolved.linters.is_empty() {
        println!("  Linters: none");
    } else {
        println!("  Linters: {}", resolved.linters.len());
        for (pattern, command) in &resolved.linters {
            println!("    {}: {}", pattern, describe_command(command));
        }
    }
    if !resolved.ignore.is_empty() {
        println!("  Ignore: {}", resolved.ignore.join(", "));
    }
    println!("  Concurrent: {}", resolved.concurrent);
    println!("  Renderer: {}", resolved.renderer.name());
    println!("  Relative paths: {}", resolved.relative);
    if let Some(ref l) = loaded {
        println!("  Digest: {}", l.source.digest);
    }
}

fn describe_command(command: &LinterCommand) -> String {
    match command {
        LinterCommand::Single(s) => s.clone(),
        LinterCommand::Dynamic(_) => "[Function]".to_string(),
        LinterCommand::Sequence(steps) => steps
            .iter()
            .map(|step| match step {
                LinterStep::Command(s) => s.clone(),
                LinterStep::Dynamic(_) => "[Function]".to_string(),
            })
            .collect::<Vec<_>>()
            .join(", "),
    }
}

fn run_escape(platform: Option<Platform>, args: &[String]) {
    let platform = platform.unwrap_or_else(Platform::current);
    for arg in args {
        println!("{}", escape_arg(arg, platform));
    }
}
