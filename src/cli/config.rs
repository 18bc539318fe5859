//! Handler for the `config` command group.

use std::path::PathBuf;

use super::output::Output;
use super::{paths, Cli};
use crate::config::Config;
use crate::error::Result;

/// The file this invocation read its configuration from, if any.
fn source(cli: &Cli) -> Option<PathBuf> {
    cli.config.clone().or_else(|| {
        let default = paths::default_config();
        default.is_file().then_some(default)
    })
}

/// Execute `config show`.
pub fn execute_show(cli: &Cli, config: &Config, out: Output) -> Result<()> {
    if out.is_json() {
        return out.record("config", config);
    }

    let rendered = config.to_toml()?;
    if out.is_quiet() {
        print!("{rendered}");
        return Ok(());
    }

    out.header(env!("CARGO_PKG_VERSION"));
    out.section("Effective Configuration");
    match source(cli) {
        Some(path) => out.field("Source", path.display()),
        None => out.field("Source", "built-in defaults"),
    }
    out.field("Odds format", config.display.odds_format);
    out.field(
        "CLV bands",
        format!(
            "+{} / {}",
            config.clv.positive_threshold, config.clv.negative_threshold
        ),
    );
    out.field("Teaser menu", format!("{} options", config.teaser.options.len()));
    out.field("Log level", &config.logging.level);
    println!();
    out.block(rendered.trim_end());
    Ok(())
}

/// Execute `config validate`.
///
/// Loading already validated the file; this reports the outcome.
pub fn execute_validate(cli: &Cli, _config: &Config, out: Output) -> Result<()> {
    match source(cli) {
        Some(path) => {
            out.success("Configuration is valid");
            out.field("Path", path.display());
        }
        None => {
            out.success("No config file found; using built-in defaults");
            out.field("Expected", paths::default_config().display());
        }
    }
    Ok(())
}
