//! Local host harness for the session booking dialog
//!
//! Reads one turn request as JSON from stdin and prints the dialog response.
//!
//! ```text
//! booking-turn [--config <file>] [--agenda <file>] < request.json
//! ```

use anyhow::Context;
use clap::Parser;
use cim_domain_session_booking::{
    AgendaCatalog, AgendaSource, BookingConfig, IntentRouter, JsonFileAgendaSource,
    SessionBookingHandler, StaticAgendaSource,
};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::AsyncReadExt;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "booking-turn")]
#[command(about = "Answer one session booking turn read from stdin", long_about = None)]
struct Cli {
    /// Booking configuration (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Agenda document (JSON); the bundled 2017 agenda when omitted
    #[arg(long)]
    agenda: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => BookingConfig::load(path)
            .await
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => BookingConfig::default(),
    };

    let source: Box<dyn AgendaSource> = match &cli.agenda {
        Some(path) => Box::new(JsonFileAgendaSource::new(path)),
        None => Box::new(StaticAgendaSource::conference_2017()?),
    };
    let catalog = AgendaCatalog::load(source.as_ref())
        .await
        .context("loading agenda")?;

    let mut router = IntentRouter::new();
    router.register(SessionBookingHandler::new(Arc::new(catalog), &config));

    let mut request = String::new();
    tokio::io::stdin()
        .read_to_string(&mut request)
        .await
        .context("reading request from stdin")?;

    let response = router.dispatch_json(&request).context("handling turn")?;
    println!("{response}");

    Ok(())
}
