//! Vehicle catalogue
//!
//! Fixed set of rides with their sprite dimensions. Only the default vehicle
//! is available until the score milestone unlocks the rest.

use serde::Serialize;

use crate::error::SelectionError;

/// Vehicle every player starts with, and the fallback for bad selections
pub const DEFAULT_VEHICLE_ID: &str = "Auto 1";

/// A selectable vehicle
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Vehicle {
    pub id: &'static str,
    pub name: &'static str,
    pub width: f32,
    pub height: f32,
}

impl Vehicle {
    /// Whether this vehicle can be picked given the unlock flag
    pub fn is_unlocked(&self, all_unlocked: bool) -> bool {
        all_unlocked || self.id == DEFAULT_VEHICLE_ID
    }

    /// Relative sprite path
    pub fn asset_path(&self) -> String {
        format!("assets/{}.svg", self.id)
    }
}

pub const VEHICLES: [Vehicle; 8] = [
    Vehicle { id: "Auto 1", name: "Classic Auto", width: 90.0, height: 60.0 },
    Vehicle { id: "Vehicle01", name: "SUV", width: 118.0, height: 53.0 },
    Vehicle { id: "Vehicle02", name: "Sedan", width: 112.0, height: 36.0 },
    Vehicle { id: "Vehicle09", name: "Race Car", width: 119.0, height: 38.0 },
    Vehicle { id: "Vehicle06", name: "Sports Car", width: 114.0, height: 37.0 },
    Vehicle { id: "Vehicle05", name: "Truck", width: 112.0, height: 51.0 },
    Vehicle { id: "Vehicle12", name: "Bus", width: 113.0, height: 64.0 },
    Vehicle { id: "Vehicle13", name: "Vintage Car", width: 143.0, height: 63.0 },
];

/// Look up a vehicle by id
pub fn find(id: &str) -> Option<&'static Vehicle> {
    VEHICLES.iter().find(|v| v.id == id)
}

/// The default vehicle
pub fn default_vehicle() -> &'static Vehicle {
    &VEHICLES[0]
}

/// Check that `id` names a vehicle the player may use
pub fn validate(id: &str, all_unlocked: bool) -> Result<&'static Vehicle, SelectionError> {
    let vehicle = find(id).ok_or_else(|| SelectionError::Unknown(id.to_string()))?;
    if !vehicle.is_unlocked(all_unlocked) {
        return Err(SelectionError::Locked(id.to_string()));
    }
    Ok(vehicle)
}

/// Vehicles available for the given unlock state
pub fn unlocked(all_unlocked: bool) -> impl Iterator<Item = &'static Vehicle> {
    VEHICLES.iter().filter(move |v| v.is_unlocked(all_unlocked))
}
