pub mod candle;
pub mod config;
pub mod content;
pub mod prefs;
pub mod stats;

use candlelight_core::error::Result;
use candlelight_core::storage::{Database, MemoryStore, StateStore};
use candlelight_core::{CandleController, Config, ContentLibrary, Event, SystemClock};

pub type Controller = CandleController<Box<dyn StateStore>, SystemClock>;

/// Open the state database, falling back to a throwaway in-memory store when
/// it is unusable, and run the startup rollover and burn resumption.
pub fn open_controller(config: &Config) -> Controller {
    let store: Box<dyn StateStore> = match Database::open() {
        Ok(db) => Box::new(db),
        Err(e) => {
            tracing::warn!(error = %e, "state database unavailable, progress will not be saved");
            Box::new(MemoryStore::new())
        }
    };
    start(store, config)
}

/// Like [`open_controller`], but fails instead of falling back when the state
/// database is unusable. For commands whose only effect is on disk.
pub fn open_durable_controller(config: &Config) -> Result<Controller> {
    let store: Box<dyn StateStore> = Box::new(Database::open()?);
    Ok(start(store, config))
}

fn start(store: Box<dyn StateStore>, config: &Config) -> Controller {
    let mut controller = CandleController::new(store, SystemClock)
        .with_default_role(&config.ui.default_role)
        .with_hold_threshold(config.timing.hold_ms);
    for event in controller.init() {
        tracing::debug!(?event, "startup");
    }
    controller
}

pub async fn load_library(config: &Config) -> Result<ContentLibrary> {
    let source = config.content_source()?;
    Ok(ContentLibrary::load(&source).await)
}

pub fn print_event(event: &Event) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(event)?);
    Ok(())
}
