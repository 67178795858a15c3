//! `windtheme` - check and inspect theme configuration documents.
//!
//! ```text
//! windtheme check theme.yaml
//! windtheme dump theme.yaml --format json
//! windtheme defaults
//! windtheme reference > theme.yaml
//! ```
//!
//! Logging goes to stderr; set `RUST_LOG` or pass `-v` to see load stages.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing_subscriber::EnvFilter;
use windtheme::{ConfigLoader, ThemeConfig};

/// Validate utility-CSS theme configuration documents
#[derive(Parser, Debug)]
#[command(name = "windtheme")]
#[command(version)]
#[command(about = "Validate and inspect utility-CSS theme configuration documents")]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Merge over empty defaults instead of the builtin theme
    #[arg(long, global = true)]
    no_defaults: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Load and validate a config file
    Check {
        /// Path to a .yaml, .yml or .json config
        file: PathBuf,
    },
    /// Print the merged, validated config
    Dump {
        file: PathBuf,

        #[arg(short, long, value_enum, default_value_t = Format::Yaml)]
        format: Format,
    },
    /// Print the defaults configs are merged over
    Defaults {
        #[arg(short, long, value_enum, default_value_t = Format::Yaml)]
        format: Format,
    },
    /// Print the complete reference config in framework layout
    Reference,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    Yaml,
    Json,
}

impl Format {
    fn render<T: Serialize>(self, value: &T) -> Result<String> {
        match self {
            Format::Yaml => serde_yaml::to_string(value).context("failed to render YAML"),
            Format::Json => serde_json::to_string_pretty(value)
                .map(|mut s| {
                    s.push('\n');
                    s
                })
                .context("failed to render JSON"),
        }
    }
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn load(loader: &ConfigLoader, file: &Path) -> Result<ThemeConfig> {
    loader
        .load_file(file)
        .with_context(|| format!("{} is not a valid theme config", file.display()))
}

fn summary(file: &Path, config: &ThemeConfig) -> String {
    format!(
        "{}: ok ({} content globs, {} palettes, {} animations, {} keyframe groups, {} font families, {} plugins, {} safelisted classes)\n",
        file.display(),
        config.content_globs().len(),
        config.color_palettes().len(),
        config.animations().len(),
        config.keyframes().len(),
        config.font_families().len(),
        config.plugins().len(),
        config.safelist().len(),
    )
}

/// Executes a command and returns what should be printed to stdout.
fn run(cli: &Cli) -> Result<String> {
    let loader = if cli.no_defaults {
        ConfigLoader::without_defaults()
    } else {
        ConfigLoader::new()
    };

    match &cli.command {
        Commands::Check { file } => {
            let config = load(&loader, file)?;
            Ok(summary(file, &config))
        }
        Commands::Dump { file, format } => {
            let config = load(&loader, file)?;
            format.render(&config)
        }
        Commands::Defaults { format } => format.render(loader.defaults()),
        Commands::Reference => Ok(ConfigLoader::reference_document().to_string()),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::debug!(error = ?err, "command failed");
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
