#![cfg(not(tarpaulin_include))]

use std::sync::Arc;

use leadsheet::app;
use leadsheet::config::Config;
use leadsheet::store::SheetStore;

/// Main entry point for the lead endpoint server
///
/// Opens the sheet store at the configured path (creating a fresh
/// header-only grid when none exists yet) and serves the endpoint on the
/// configured address.
///
/// # Configuration
/// * `LEADSHEET_ADDR` - bind address, default `127.0.0.1:3000`
/// * `LEADSHEET_SHEET` - sheet file path, default `leads.bin.gz`
/// * `RUST_LOG` - log filter, e.g. `leadsheet=debug`
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = Config::from_env();
    let store = Arc::new(SheetStore::open(&config.sheet_path)?);

    app::run(&config.bind_addr, store).await
}
