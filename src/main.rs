mod cli;

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

use cli::Cli;
use folio_content::ContentCatalog;
use folio_store::Recorder;
use folio_tui::{App, AppOptions};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let mut config = folio_config::load(cli.config.as_deref())?;
    if cli.ascii {
        config.tui.ascii_borders = true;
    }
    let config = Arc::new(config);

    let catalog = Arc::new(ContentCatalog::builtin());
    // Unconfigured store → disabled recorder; the chat works identically.
    let recorder = Recorder::from_config(&config.store);

    let terminal = ratatui::init();
    let _ = crossterm::execute!(std::io::stderr(), crossterm::event::EnableMouseCapture);

    let opts = AppOptions {
        topic: cli.topic,
        initial_prompt: cli.prompt,
    };
    let app = App::new(config, catalog, recorder, opts);
    let result = app.run(terminal).await;

    let _ = crossterm::execute!(std::io::stderr(), crossterm::event::DisableMouseCapture);
    ratatui::restore();

    result
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // Logs go to stderr so they never corrupt the ratatui frame on stdout.
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}
