//! # Shelfscan Terminal
//!
//! Hosts the product-capture screen in a terminal.
//!
//! ## Module Organization
//! ```text
//! shelfscan_terminal/
//! ├── lib.rs          ◄─── You are here (CLI, tracing, startup)
//! ├── error.rs        ◄─── ScreenError
//! ├── config.rs       ◄─── ScreenConfig (TOML + env)
//! ├── intent.rs       ◄─── Intent, ScreenEvent, command parsing
//! ├── source.rs       ◄─── BarcodeSource, WedgeScanner, LineRouter
//! ├── presenter.rs    ◄─── Presenter, TerminalPresenter, ScreenView
//! ├── input.rs        ◄─── stdin reader thread
//! └── screen.rs       ◄─── ProductScreen event loop
//! ```
//!
//! ## Startup Sequence
//! 1. Initialize tracing (stderr, so stdout stays clean for `--json`)
//! 2. Load configuration
//! 3. Build the product store (seeded with the demo products)
//! 4. Spawn the stdin reader
//! 5. Run the screen until `quit` or end of input

pub mod config;
pub mod error;
pub mod input;
pub mod intent;
pub mod presenter;
pub mod screen;
pub mod source;

use clap::Parser;
use std::path::PathBuf;
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use shelfscan_core::{demo_products, ProductStore};

pub use config::ScreenConfig;
pub use error::{ScreenError, ScreenResult};
pub use screen::ProductScreen;

/// Pending events between the input thread and the screen.
const EVENT_CHANNEL_CAPACITY: usize = 64;

#[derive(Parser, Debug, Default, Clone)]
#[command(name = "shelfscan", about = "Capture products by scanning barcodes", version)]
pub struct Cli {
    #[arg(
        long,
        env = "SHELFSCAN_CONFIG",
        value_name = "FILE",
        help = "Path to a TOML configuration file"
    )]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Render frames as JSON lines instead of text")]
    pub json: bool,

    #[arg(long, help = "Start with an empty product list")]
    pub no_seed: bool,
}

/// Runs the screen until the user quits.
pub async fn run(cli: Cli) -> ScreenResult<()> {
    info!("Starting Shelfscan");

    let config = match cli.config {
        Some(path) => ScreenConfig::load(Some(path))?,
        None => ScreenConfig::load_or_default(None),
    };

    let mut store = ProductStore::new().with_default_name(&config.store.default_product_name)?;
    if config.store.seed_demo && !cli.no_seed {
        store = store.with_products(demo_products())?;
    }

    let scanner = source::WedgeScanner::new(&config.scanner);
    let router = scanner.router();
    let presenter = presenter::TerminalPresenter::new(std::io::stdout(), cli.json);

    let (tx, rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
    input::spawn_stdin_reader(tx)?;

    let screen = ProductScreen::new(store, scanner, presenter).with_router(router);
    let screen = screen.run(rx).await?;

    info!(products = screen.store().len(), "Shelfscan stopped");
    Ok(())
}

/// Initializes the tracing subscriber.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show all debug messages
/// - `RUST_LOG=shelfscan=trace` - Trace level for our crates only
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,shelfscan=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
