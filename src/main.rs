//! Binary entry point: resolve settings, start file logging, open the store,
//! load the shelf, and drive the Ratatui event loop until the user exits.
use anyhow::Context;
use log::{error, info};
use reading_shelf::logging::init_logging;
use reading_shelf::{run_app, App, Config, Shelf, Store};

fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    init_logging(&config.log_level, &config.log_dir)?;

    let store = Store::open(&config.db_path)?;
    let (shelf, report) = Shelf::open(store).context("failed to load the shelf")?;

    let mut app = App::new(shelf, report);
    let result = run_app(&mut app);
    match &result {
        Ok(()) => info!("event=app_exit module=main status=ok"),
        Err(err) => error!("event=app_exit module=main status=error error=\"{err:#}\""),
    }
    result
}
