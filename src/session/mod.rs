//! The active bake of a session
//!
//! A session holds at most one bake. [`BakeSession`] is the only place that
//! mutates persisted state: it saves the baker's inputs after planning, loads
//! them for `show`, and clears them on `reset`. Everything downstream works on
//! the immutable [`BakeConfig`](crate::bake::BakeConfig) it hands out.

pub mod store;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::bake::BakeInputs;
use crate::error::{ErrorCode, PlannerError, Result};
pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError, StoredEntry};

/// Store key under which the bake inputs live
pub const BAKE_INPUTS_KEY: &str = "bake_inputs";

/// How long saved inputs are kept by default
pub const DEFAULT_MAX_AGE: Duration = Duration::from_secs(30 * 24 * 60 * 60);

/// Inputs of the active bake plus the day it was started
///
/// Records written before `started_on` existed hold only the inputs; those
/// are anchored to the current day when shown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedBake {
    #[serde(flatten)]
    pub inputs: BakeInputs,
    #[serde(default)]
    pub started_on: Option<NaiveDate>,
    #[serde(default)]
    pub saved_at: Option<DateTime<Utc>>,
}

impl SavedBake {
    pub fn new(inputs: BakeInputs, started_on: NaiveDate) -> Self {
        Self {
            inputs,
            started_on: Some(started_on),
            saved_at: Some(Utc::now()),
        }
    }
}

/// Session-scoped access to the active bake
pub struct BakeSession<S: KeyValueStore> {
    store: S,
    max_age: Duration,
}

impl<S: KeyValueStore> BakeSession<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            max_age: DEFAULT_MAX_AGE,
        }
    }

    pub fn with_max_age(mut self, max_age: Duration) -> Self {
        self.max_age = max_age;
        self
    }

    /// Load the saved bake, if there is one
    ///
    /// A record that no longer parses is treated as absent so a bad save never
    /// blocks planning a new bake.
    pub fn load(&self) -> Result<Option<SavedBake>> {
        let Some(value) = self.store.get(BAKE_INPUTS_KEY)? else {
            debug!("No saved bake in session");
            return Ok(None);
        };

        match decode_saved(value) {
            Ok(saved) => Ok(Some(saved)),
            Err(e) => {
                warn!("Ignoring unreadable saved bake: {}", e);
                Ok(None)
            }
        }
    }

    /// Persist the inputs of the active bake
    pub fn save(&mut self, saved: &SavedBake) -> Result<()> {
        let value = serde_json::to_value(saved).map_err(|e| {
            PlannerError::storage_with_code(
                ErrorCode::STORAGE_SERIALIZATION_ERROR,
                "Failed to serialize bake inputs",
                None,
            )
            .with_source(e)
        })?;
        self.store
            .set(BAKE_INPUTS_KEY, value, Some(self.max_age))?;
        info!("Saved bake inputs for {:?}", saved.started_on);
        Ok(())
    }

    /// Forget the active bake ("start again")
    pub fn clear(&mut self) -> Result<()> {
        self.store.remove(BAKE_INPUTS_KEY)?;
        info!("Cleared saved bake");
        Ok(())
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

/// Saved values may be the record itself or a JSON string holding it
fn decode_saved(value: serde_json::Value) -> Result<SavedBake> {
    let saved = match value {
        serde_json::Value::String(raw) => serde_json::from_str(&raw)?,
        other => serde_json::from_value(other)?,
    };
    Ok(saved)
}

/// Check that a session name is safe to use as a file name
pub fn validate_session_name(name: &str) -> Result<()> {
    let valid = !name.is_empty()
        && name.len() <= 64
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(PlannerError::validation_with_code(
            ErrorCode::VALIDATION_INVALID_INPUT,
            format!(
                "'{}' must be 1-64 characters of letters, digits, '-' or '_'",
                name
            ),
            Some("session".to_string()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bake::FlourType;
    use serde_json::json;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()
    }

    #[test]
    fn test_empty_session_has_no_bake() {
        let session = BakeSession::new(MemoryStore::new());
        assert!(session.load().unwrap().is_none());
    }

    #[test]
    fn test_save_load_clear() {
        let mut session = BakeSession::new(MemoryStore::new());
        let inputs = BakeInputs {
            flour_type: FlourType::Rye,
            ..BakeInputs::default()
        };

        session.save(&SavedBake::new(inputs.clone(), day())).unwrap();
        let loaded = session.load().unwrap().unwrap();
        assert_eq!(loaded.inputs, inputs);
        assert_eq!(loaded.started_on, Some(day()));

        session.clear().unwrap();
        assert!(session.load().unwrap().is_none());
    }

    #[test]
    fn test_loads_plain_inputs_record() {
        let mut store = MemoryStore::new();
        store
            .set(
                BAKE_INPUTS_KEY,
                json!({
                    "start_time": "14:00:00",
                    "cold_proof": true,
                    "flour_type": "Strong White",
                    "bake_vessel": "Dutch Oven",
                    "starter_type": "White Starter",
                    "room_temp": "Moderate (20–24°C)",
                    "bulk_override": 4.0,
                    "cold_proof_hours": 10
                }),
                None,
            )
            .unwrap();

        let saved = BakeSession::new(store).load().unwrap().unwrap();
        assert_eq!(saved.started_on, None);
        assert_eq!(saved.inputs.cold_proof_hours, Some(10));
    }

    #[test]
    fn test_loads_record_stored_as_json_string() {
        let mut store = MemoryStore::new();
        let raw = r#"{"start_time": "09:15", "cold_proof": false, "bulk_override": 3.5}"#;
        store.set(BAKE_INPUTS_KEY, json!(raw), None).unwrap();

        let saved = BakeSession::new(store).load().unwrap().unwrap();
        assert_eq!(saved.inputs.start_time, "09:15");
        assert!(!saved.inputs.cold_proof);
    }

    #[test]
    fn test_unreadable_record_reads_as_absent() {
        let mut store = MemoryStore::new();
        store
            .set(BAKE_INPUTS_KEY, json!({"cold_proof": "maybe"}), None)
            .unwrap();
        assert!(BakeSession::new(store).load().unwrap().is_none());
    }

    #[test]
    fn test_saved_bake_expires_after_max_age() {
        let mut session = BakeSession::new(MemoryStore::new()).with_max_age(Duration::ZERO);
        session
            .save(&SavedBake::new(BakeInputs::default(), day()))
            .unwrap();
        assert!(session.load().unwrap().is_none());
    }

    #[test]
    fn test_session_names() {
        assert!(validate_session_name("default").is_ok());
        assert!(validate_session_name("weekend-loaf_2").is_ok());
        assert!(validate_session_name("").is_err());
        assert!(validate_session_name("../etc").is_err());
    }
}
