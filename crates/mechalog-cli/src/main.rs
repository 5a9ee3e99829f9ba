//! mechalog console front end
//!
//! Menu-driven logger for mechatronic sensor events. Reads the threshold
//! configuration, restores previously logged events from the binary log
//! and then hands control to the menu loop.

mod menu;
mod prompt;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut session = menu::Session::start().context("failed to start mechalog")?;
    session.run()
}
