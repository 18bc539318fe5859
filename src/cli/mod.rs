//! Command-line interface definitions.
//!
//! Defines the CLI structure for the wagerline binary using `clap`. Each
//! subcommand reads its input, calls into [`crate::domain`] and renders the
//! result through [`output::Output`].

pub mod clv;
pub mod config;
pub mod convert;
pub mod output;
pub mod paths;
pub mod quote;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::error::Result;
use output::Output;

/// Wager odds engine: conversion, parlay and teaser pricing, closing-line value
#[derive(Parser, Debug)]
#[command(name = "wagerline")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Config file [default: ~/.wagerline/config.toml]
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Print only the primary result
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Color output mode for terminal rendering.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl ColorChoice {
    /// Apply this choice to terminal styling for the rest of the process.
    pub fn apply(self) {
        match self {
            Self::Auto => {}
            Self::Always => owo_colors::set_override(true),
            Self::Never => owo_colors::set_override(false),
        }
    }
}

/// Top-level subcommands for the wagerline CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert odds and show the implied probability
    Convert(convert::ConvertArgs),

    /// Price a single, parlay or teaser wager from a JSON request
    Quote(quote::QuoteArgs),

    /// Summarize closing-line value from JSON records
    Clv(clv::ClvArgs),

    /// Inspect configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Subcommands for `wagerline config`.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Display the effective configuration with defaults applied.
    Show,
    /// Validate the configuration file for correctness.
    Validate,
}

/// Resolve the configuration file for this invocation.
///
/// # Errors
///
/// Returns an error if an explicit or existing default file is invalid.
pub fn load_config(cli: &Cli) -> Result<Config> {
    Config::load_or_default(cli.config.as_deref(), &paths::default_config())
}

/// Dispatch a parsed command.
///
/// # Errors
///
/// Returns the first error raised by the command handler.
pub fn execute(cli: &Cli, config: &Config, out: Output) -> Result<()> {
    match &cli.command {
        Commands::Convert(args) => convert::execute(args, config, out),
        Commands::Quote(args) => quote::execute(args, config, out),
        Commands::Clv(args) => clv::execute(args, config, out),
        Commands::Config(ConfigCommand::Show) => config::execute_show(cli, config, out),
        Commands::Config(ConfigCommand::Validate) => config::execute_validate(cli, config, out),
    }
}
