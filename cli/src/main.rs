use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use infrastructure::config::Config;
use presentation::cli::{Cli, CliApp};
use shared::telemetry::init_tracing;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = Config::load(cli.secrets.as_deref())?;
    if let Some(top_k) = cli.top_k {
        config = config.with_top_k(top_k)?;
    }

    let mut app = CliApp::new(&config);
    app.run(&cli).await
}
