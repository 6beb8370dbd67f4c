use anyhow::Context;
use clap::Parser;
use tracing::debug;

use tax_cli::app::App;
use tax_cli::cli::Cli;
use tax_cli::logging;

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::init_logging(cli.log_level.as_deref(), cli.log_file.as_deref())?;

    let app = match &cli.rates_dir {
        Some(dir) => App::with_rates_dir(dir)
            .with_context(|| format!("Invalid rate data in: {}", dir.display()))?,
        None => App::builtin(),
    };
    debug!(tax_year = app.schedule().tax_year, "schedule ready");

    let output = app.run(&cli.command)?;
    println!("{output}");

    Ok(())
}
