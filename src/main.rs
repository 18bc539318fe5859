use clap::Parser;
use tracing::debug;

use wagerline::cli::output::Output;
use wagerline::cli::{execute, load_config, Cli};

fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    cli.color.apply();
    let out = Output::new(cli.json, cli.quiet);

    if let Err(e) = run(&cli, out) {
        out.error(&format!("{e:#}"));
        std::process::exit(1);
    }
}

fn run(cli: &Cli, out: Output) -> anyhow::Result<()> {
    let config = load_config(cli)?;
    config.init_logging(cli.verbose);
    debug!(command = ?cli.command, "wagerline starting");

    execute(cli, &config, out)?;
    Ok(())
}
