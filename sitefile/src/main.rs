//! Sitefile - check and inspect Sitefile server configurations
//!
//! This is the main entry point for the Sitefile CLI.

use anyhow::Context;
use clap::{Parser, Subcommand};
use sitefile_config::{parse_str_with, render, tokenize, DirectiveRegistry, Error, Site};
use sitefile_core::{Settings, SettingsLoader};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Sitefile - parser and checker for Caddyfile-style server configs
#[derive(Parser)]
#[command(name = "sitefile")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Settings file (TOML or JSON); defaults to the per-user settings file
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a Sitefile
    Validate {
        /// Path to the Sitefile
        #[arg(default_value = "Sitefile")]
        config: String,
    },

    /// Print the parsed server blocks as JSON
    Dump {
        /// Path to the Sitefile
        #[arg(default_value = "Sitefile")]
        config: String,
    },

    /// Print the token stream
    Tokens {
        /// Path to the Sitefile
        #[arg(default_value = "Sitefile")]
        config: String,
    },

    /// List the directives the parser accepts
    Directives,

    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing; logs go to stderr so stdout stays machine-readable
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let settings = SettingsLoader::load_or_default(cli.settings.as_deref())
        .context("Failed to load settings")?;
    let registry = DirectiveRegistry::standard().with_settings(&settings);

    match cli.command {
        Commands::Validate { config } => {
            tracing::info!("Validating config: {}", config);

            let sites = load_or_exit(&config, &registry, &settings);
            println!("✅ Configuration '{}' is valid! ({} server block(s))", config, sites.len());
        }

        Commands::Dump { config } => {
            let sites = load_or_exit(&config, &registry, &settings);
            println!("{}", serde_json::to_string_pretty(&sites)?);
        }

        Commands::Tokens { config } => {
            let source = std::fs::read_to_string(&config)
                .with_context(|| format!("Failed to read {}", config))?;
            match tokenize(&source) {
                Ok(tokens) => {
                    for token in tokens {
                        println!("{}\t{}", token.line, token.text);
                    }
                }
                Err(e) => {
                    eprintln!("{}", render(&source, &config, &Error::Lex(e)));
                    std::process::exit(1);
                }
            }
        }

        Commands::Directives => {
            println!("Builtin:    {}", registry.builtin_names().join(", "));
            println!("Middleware: {}", registry.middleware_names().join(", "));
        }

        Commands::Version => {
            println!("Sitefile v{}", sitefile_core::VERSION);
        }
    }

    Ok(())
}

/// Parse `path`, or print a rendered diagnostic and exit with status 1
fn load_or_exit(path: &str, registry: &DirectiveRegistry, settings: &Settings) -> Vec<Site> {
    let source = match std::fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("❌ {}", render("", path, &Error::Io(e)));
            std::process::exit(1);
        }
    };

    match parse_str_with(&source, registry, settings) {
        Ok(sites) => sites,
        Err(e) => {
            tracing::debug!("Parse failed: {}", e);
            eprintln!("❌ Configuration Error:\n{}", render(&source, path, &e));
            std::process::exit(1);
        }
    }
}
