//! # Candlelight Core Library
//!
//! This library provides the core logic of Candlelight, a virtual candle
//! with a ten-minute burn, a deterministic prayer and prediction of the day,
//! and a daily streak. Front-ends (the bundled CLI, or any UI) drive it
//! through [`CandleController`] and render the plain data it returns.
//!
//! ## Architecture
//!
//! - **Picker**: FNV-1a seeded selection from a content pool
//! - **Daily tracker**: streak and candles-today rollover per local day
//! - **Content**: pools loaded once from a directory or URL, resolved per
//!   role, mode and date
//! - **Burn timer**: a wall-clock state machine keyed on an absolute end time;
//!   the caller invokes `tick()` for progress
//! - **Storage**: eight-key record over SQLite (or memory) and TOML config
//!
//! ## Key Components
//!
//! - [`CandleController`]: owns the record and funnels every mutation
//! - [`BurnTimer`]: burn state machine
//! - [`ContentLibrary`] / [`ContentResolver`]: daily content
//! - [`Database`]: persistent state store
//! - [`Config`]: application configuration

pub mod burn;
pub mod clock;
pub mod content;
pub mod controller;
pub mod daily;
pub mod error;
pub mod events;
pub mod picker;
pub mod share;
pub mod storage;

pub use burn::{format_mmss, BurnState, BurnTimer, HoldGesture, FULL_BURN_MS};
pub use clock::{Clock, ManualClock, SystemClock};
pub use content::{
    ContentLibrary, ContentResolver, ContentSource, DailyContent, Locale, Prayer, Prediction,
};
pub use controller::CandleController;
pub use daily::rollover;
pub use error::{ConfigError, ContentError, CoreError, StorageError, ValidationError};
pub use events::Event;
pub use picker::{fnv1a, pick};
pub use share::ShareCard;
pub use storage::{
    Config, Database, MemoryStore, Mode, PersistedState, Sound, StateStore, StateWrite,
};
