//! Owner of the single current reward configuration: validates edits,
//! writes through to the key-value store on every change, and restores the
//! configuration on startup, falling back to defaults when the stored record
//! is missing or unusable.

use crate::kv::KeyValueStore;
use crate::record;
use reward_core::loyalty::{ConfigField, FieldValue, RateSchedule, RewardConfig};
use reward_core::{PersistenceDecodeError, StoreResult};
use std::fmt;
use thiserror::Error;
use tracing::{debug, info, warn};

/// A raw configuration edit as typed or supplied by the UI.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Text(String),
    Number(f64),
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::Text(s.to_string())
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        RawValue::Text(s)
    }
}

impl From<f64> for RawValue {
    fn from(n: f64) -> Self {
        RawValue::Number(n)
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Text(s) => f.write_str(s),
            RawValue::Number(n) => write!(f, "{n}"),
        }
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    #[error("not a number")]
    NotANumber,
    #[error("must not be negative")]
    Negative,
}

/// What an edit did to the field.
#[derive(Debug, Clone, PartialEq)]
pub enum EditOutcome {
    Updated(f64),
    /// Field emptied mid-edit; not persisted until a value is entered.
    Cleared,
    /// Field left unchanged.
    Rejected { raw: String, reason: RejectReason },
}

pub struct ConfigStore<S> {
    store: S,
    key: String,
    current: RewardConfig,
}

impl<S: KeyValueStore> ConfigStore<S> {
    /// Bind to `key` in `store` and restore the persisted configuration.
    pub fn open(store: S, key: impl Into<String>) -> Self {
        let mut config_store = Self {
            store,
            key: key.into(),
            current: RewardConfig::default(),
        };
        config_store.current = config_store.load();
        info!(key = %config_store.key, "Configuration store opened");
        config_store
    }

    /// Read the stored configuration. Never fails: any problem is logged and
    /// the built-in default is returned.
    pub fn load(&self) -> RewardConfig {
        match self.try_load() {
            Ok(schedule) => {
                debug!(key = %self.key, ?schedule, "Configuration restored");
                schedule.into()
            }
            Err(e) => {
                metrics::counter!("config.load_fallbacks").increment(1);
                warn!(key = %self.key, error = %e, "Stored configuration unusable, using defaults");
                RewardConfig::default()
            }
        }
    }

    pub fn try_load(&self) -> Result<RateSchedule, PersistenceDecodeError> {
        let raw = self
            .store
            .get(&self.key)?
            .ok_or_else(|| PersistenceDecodeError::Missing(self.key.clone()))?;
        record::decode(&raw)
    }

    /// Write the full configuration. A configuration with unset fields is
    /// not a valid record and is skipped; the last complete one stays stored.
    pub fn save(&self, config: &RewardConfig) -> StoreResult<()> {
        let schedule = match config.schedule() {
            Ok(schedule) => schedule,
            Err(e) => {
                debug!(key = %self.key, reason = %e, "Skipping save of incomplete configuration");
                return Ok(());
            }
        };
        let json = record::encode(&schedule)?;
        self.store.set(&self.key, &json)?;
        metrics::counter!("config.saves").increment(1);
        debug!(key = %self.key, "Configuration saved");
        Ok(())
    }

    /// Apply a raw edit to one field.
    ///
    /// Empty text unsets the field. Unparseable, non-finite or negative
    /// values are rejected and leave the field unchanged. Accepted values
    /// are persisted immediately.
    pub fn apply_edit(&mut self, field: ConfigField, raw: impl Into<RawValue>) -> EditOutcome {
        let raw = raw.into();
        let parsed = match &raw {
            RawValue::Text(text) if text.trim().is_empty() => {
                self.current.set(field, FieldValue::Unset);
                debug!(field = field.storage_key(), "Field cleared");
                return EditOutcome::Cleared;
            }
            RawValue::Text(text) => text.trim().parse::<f64>().ok(),
            RawValue::Number(n) => Some(*n),
        };

        let value = match parsed {
            Some(v) if !v.is_finite() => Err(RejectReason::NotANumber),
            Some(v) if v < 0.0 => Err(RejectReason::Negative),
            // -0.0 normalizes to 0.0
            Some(v) => Ok(if v == 0.0 { 0.0 } else { v }),
            None => Err(RejectReason::NotANumber),
        };

        match value {
            Ok(value) => {
                self.current.set(field, FieldValue::Value(value));
                self.persist();
                debug!(field = field.storage_key(), value = value, "Field updated");
                EditOutcome::Updated(value)
            }
            Err(reason) => {
                metrics::counter!("config.edits_rejected").increment(1);
                debug!(field = field.storage_key(), raw = %raw, %reason, "Edit rejected");
                EditOutcome::Rejected {
                    raw: raw.to_string(),
                    reason,
                }
            }
        }
    }

    /// Apply a raw edit and return the resulting configuration.
    pub fn update(&mut self, field: ConfigField, raw: impl Into<RawValue>) -> RewardConfig {
        self.apply_edit(field, raw);
        self.current
    }

    /// Restore and persist the built-in defaults.
    pub fn reset(&mut self) -> RewardConfig {
        self.current = RewardConfig::default();
        self.persist();
        info!(key = %self.key, "Configuration reset to defaults");
        self.current
    }

    pub fn current(&self) -> &RewardConfig {
        &self.current
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Save the in-memory configuration; a failed write is logged and the
    /// in-memory state is kept as is.
    fn persist(&self) {
        if let Err(e) = self.save(&self.current) {
            metrics::counter!("config.save_failures").increment(1);
            warn!(key = %self.key, error = %e, "Failed to persist configuration");
        }
    }
}
