//! Driver Vigilance Replay - Main Entry Point

use replay::{init_logging, run, Settings};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    info!("=== Driver Vigilance Replay v{} ===", env!("CARGO_PKG_VERSION"));

    let config_path = std::env::args().nth(1);
    let settings = Settings::load(config_path.as_deref())?;

    run(settings).await
}
