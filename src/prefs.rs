//! Persisted preferences
//!
//! Three scalars survive between sessions: the personal best, the
//! all-vehicles-unlocked flag and the selected vehicle id. Storage is a plain
//! string key-value store (LocalStorage in the browser).

use std::collections::HashMap;

use crate::error::SelectionError;
use crate::vehicles::{self, DEFAULT_VEHICLE_ID, Vehicle};

pub const KEY_PERSONAL_BEST: &str = "personalBest";
pub const KEY_ALL_UNLOCKED: &str = "allVehiclesUnlocked";
pub const KEY_SELECTED_VEHICLE: &str = "selectedVehicle";

/// String key-value storage with typed accessors
pub trait KeyValueStore {
    fn get_string(&self, key: &str) -> Option<String>;
    fn set_string(&mut self, key: &str, value: &str);

    /// Integer value; unparseable entries read as absent
    fn get_int(&self, key: &str) -> Option<i64> {
        self.get_string(key)?.trim().parse().ok()
    }

    fn set_int(&mut self, key: &str, value: i64) {
        self.set_string(key, &value.to_string());
    }

    /// Boolean value; only the literal `"true"` reads as set
    fn get_bool(&self, key: &str) -> bool {
        self.get_string(key).as_deref() == Some("true")
    }

    fn set_bool(&mut self, key: &str, value: bool) {
        self.set_string(key, if value { "true" } else { "false" });
    }
}

/// In-memory store for tests and native runs
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get_string(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set_string(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }
}

/// Typed view over the persisted preferences
#[derive(Debug)]
pub struct Preferences<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> Preferences<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn personal_best(&self) -> u32 {
        self.store
            .get_int(KEY_PERSONAL_BEST)
            .and_then(|v| u32::try_from(v).ok())
            .unwrap_or(0)
    }

    /// Store `score` if it beats the current best; returns whether it did
    pub fn record_score(&mut self, score: u32) -> bool {
        if score <= self.personal_best() {
            return false;
        }
        self.store.set_int(KEY_PERSONAL_BEST, i64::from(score));
        true
    }

    pub fn all_unlocked(&self) -> bool {
        self.store.get_bool(KEY_ALL_UNLOCKED)
    }

    pub fn unlock_all(&mut self) {
        self.store.set_bool(KEY_ALL_UNLOCKED, true);
    }

    /// Selected vehicle, correcting and persisting invalid or locked choices
    pub fn selected_vehicle(&mut self) -> &'static Vehicle {
        let stored = self.store.get_string(KEY_SELECTED_VEHICLE);
        match stored
            .as_deref()
            .map(|id| vehicles::validate(id, self.all_unlocked()))
        {
            Some(Ok(vehicle)) => vehicle,
            Some(Err(e)) => {
                log::warn!("Resetting vehicle selection: {}", e);
                self.reset_vehicle()
            }
            None => self.reset_vehicle(),
        }
    }

    /// Change the selected vehicle for the next session
    pub fn select_vehicle(&mut self, id: &str) -> Result<&'static Vehicle, SelectionError> {
        let vehicle = vehicles::validate(id, self.all_unlocked())?;
        self.store.set_string(KEY_SELECTED_VEHICLE, vehicle.id);
        Ok(vehicle)
    }

    /// Fall back to the default vehicle after its sprite failed to load.
    /// Returns the fallback when a change was made.
    pub fn fallback_after_load_failure(&mut self, failed_id: &str) -> Option<&'static Vehicle> {
        if failed_id == DEFAULT_VEHICLE_ID {
            return None;
        }
        Some(self.reset_vehicle())
    }

    fn reset_vehicle(&mut self) -> &'static Vehicle {
        let vehicle = vehicles::default_vehicle();
        self.store.set_string(KEY_SELECTED_VEHICLE, vehicle.id);
        vehicle
    }
}
