//! The single persisted record and the key-value stores that hold it.
//!
//! The record is stored as eight string keys. Missing or unparseable values
//! read back as defaults, so a damaged store degrades to a fresh install
//! rather than failing.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::burn::FULL_BURN_MS;
use crate::error::{StorageError, ValidationError};

pub const DEFAULT_ROLE: &str = "mediabuyer";
const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Sacred,
    #[default]
    Secular,
}

impl Mode {
    pub fn toggled(self) -> Self {
        match self {
            Mode::Sacred => Mode::Secular,
            Mode::Secular => Mode::Sacred,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Sacred => "sacred",
            Mode::Secular => "secular",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sacred" => Ok(Mode::Sacred),
            "secular" => Ok(Mode::Secular),
            other => Err(ValidationError::InvalidValue {
                field: "mode".into(),
                message: format!("'{other}' (expected sacred or secular)"),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sound {
    On,
    #[default]
    Off,
}

impl Sound {
    pub fn toggled(self) -> Self {
        match self {
            Sound::On => Sound::Off,
            Sound::Off => Sound::On,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Sound::On => "on",
            Sound::Off => "off",
        }
    }
}

impl fmt::Display for Sound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sound {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "on" => Ok(Sound::On),
            "off" => Ok(Sound::Off),
            other => Err(ValidationError::InvalidValue {
                field: "sound".into(),
                message: format!("'{other}' (expected on or off)"),
            }),
        }
    }
}

/// Storage keys of the persisted record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateKey {
    Role,
    Mode,
    Sound,
    LastDate,
    Streak,
    CandlesToday,
    BurnEndAt,
    RemainingMs,
}

impl StateKey {
    pub const ALL: [StateKey; 8] = [
        StateKey::Role,
        StateKey::Mode,
        StateKey::Sound,
        StateKey::LastDate,
        StateKey::Streak,
        StateKey::CandlesToday,
        StateKey::BurnEndAt,
        StateKey::RemainingMs,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StateKey::Role => "wp_role",
            StateKey::Mode => "wp_mode",
            StateKey::Sound => "wp_sound",
            StateKey::LastDate => "wp_lastDate",
            StateKey::Streak => "wp_streak",
            StateKey::CandlesToday => "wp_candlesToday",
            StateKey::BurnEndAt => "wp_burnEndAt",
            StateKey::RemainingMs => "wp_remainingMs",
        }
    }
}

/// One change in a [`StateStore::write_batch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateWrite {
    Set(StateKey, String),
    Remove(StateKey),
}

/// A durable string key-value store. Writes are synchronous and atomic per key.
pub trait StateStore {
    fn get(&self, key: StateKey) -> Result<Option<String>, StorageError>;

    fn set(&mut self, key: StateKey, value: &str) -> Result<(), StorageError>;

    fn remove(&mut self, key: StateKey) -> Result<(), StorageError>;

    /// Apply `writes` in order. Stores that can should apply all or none;
    /// the default applies them one key at a time and stops at the first
    /// error.
    fn write_batch(&mut self, writes: &[StateWrite]) -> Result<(), StorageError> {
        for write in writes {
            match write {
                StateWrite::Set(key, value) => self.set(*key, value)?,
                StateWrite::Remove(key) => self.remove(*key)?,
            }
        }
        Ok(())
    }
}

impl<S: StateStore + ?Sized> StateStore for Box<S> {
    fn get(&self, key: StateKey) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: StateKey, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: StateKey) -> Result<(), StorageError> {
        (**self).remove(key)
    }

    fn write_batch(&mut self, writes: &[StateWrite]) -> Result<(), StorageError> {
        (**self).write_batch(writes)
    }
}

/// Volatile store for tests and for running without a usable database.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<StateKey, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raw(&self, key: StateKey) -> Option<&str> {
        self.values.get(&key).map(String::as_str)
    }
}

impl StateStore for MemoryStore {
    fn get(&self, key: StateKey) -> Result<Option<String>, StorageError> {
        Ok(self.values.get(&key).cloned())
    }

    fn set(&mut self, key: StateKey, value: &str) -> Result<(), StorageError> {
        self.values.insert(key, value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: StateKey) -> Result<(), StorageError> {
        self.values.remove(&key);
        Ok(())
    }
}

/// The durable record shared by the tracker, resolver and burn timer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedState {
    pub role: String,
    pub mode: Mode,
    pub sound: Sound,
    /// Local calendar date of the last recorded activity.
    pub last_date: Option<NaiveDate>,
    pub streak: u32,
    pub candles_today: u32,
    /// Epoch ms at which the active burn finishes; 0 when not lit.
    pub burn_end_at: u64,
    /// Wax left on an unlit candle, so a partly burnt candle survives a
    /// restart. Ignored while `burn_end_at` is set.
    pub remaining_ms: u64,
}

impl Default for PersistedState {
    fn default() -> Self {
        Self {
            role: DEFAULT_ROLE.to_string(),
            mode: Mode::default(),
            sound: Sound::default(),
            last_date: None,
            streak: 0,
            candles_today: 0,
            burn_end_at: 0,
            remaining_ms: FULL_BURN_MS,
        }
    }
}

impl PersistedState {
    /// Read the record, defaulting every missing or malformed key.
    ///
    /// # Errors
    /// Returns an error only if the store itself cannot be read.
    pub fn load<S: StateStore + ?Sized>(store: &S) -> Result<Self, StorageError> {
        let defaults = Self::default();
        Ok(Self {
            role: store
                .get(StateKey::Role)?
                .filter(|r| !r.is_empty())
                .unwrap_or(defaults.role),
            mode: parse_or(store.get(StateKey::Mode)?, defaults.mode),
            sound: parse_or(store.get(StateKey::Sound)?, defaults.sound),
            last_date: store
                .get(StateKey::LastDate)?
                .and_then(|d| NaiveDate::parse_from_str(&d, DATE_FORMAT).ok()),
            streak: parse_or(store.get(StateKey::Streak)?, defaults.streak),
            candles_today: parse_or(store.get(StateKey::CandlesToday)?, defaults.candles_today),
            burn_end_at: parse_or(store.get(StateKey::BurnEndAt)?, defaults.burn_end_at),
            remaining_ms: parse_or(store.get(StateKey::RemainingMs)?, defaults.remaining_ms),
        })
    }

    /// Write every key in one batch. An absent `last_date` removes its key.
    ///
    /// # Errors
    /// Returns the store error. Whether earlier keys landed depends on the
    /// store: [`Database`](super::Database) commits all or nothing.
    pub fn save<S: StateStore + ?Sized>(&self, store: &mut S) -> Result<(), StorageError> {
        store.write_batch(&self.writes())
    }

    fn writes(&self) -> Vec<StateWrite> {
        let last_date = match self.last_date {
            Some(date) => StateWrite::Set(StateKey::LastDate, date.format(DATE_FORMAT).to_string()),
            None => StateWrite::Remove(StateKey::LastDate),
        };
        vec![
            StateWrite::Set(StateKey::Role, self.role.clone()),
            StateWrite::Set(StateKey::Mode, self.mode.as_str().to_string()),
            StateWrite::Set(StateKey::Sound, self.sound.as_str().to_string()),
            last_date,
            StateWrite::Set(StateKey::Streak, self.streak.to_string()),
            StateWrite::Set(StateKey::CandlesToday, self.candles_today.to_string()),
            StateWrite::Set(StateKey::BurnEndAt, self.burn_end_at.to_string()),
            StateWrite::Set(StateKey::RemainingMs, self.remaining_ms.to_string()),
        ]
    }

    pub fn is_burning(&self) -> bool {
        self.burn_end_at > 0
    }
}

fn parse_or<T: FromStr>(raw: Option<String>, default: T) -> T {
    raw.and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}
