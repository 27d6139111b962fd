//! Glacier inventory profiles
//!
//! A [`GlacierProfile`] is the static description of one glacier from the
//! national inventory: geometry, classification and location. Thermal inputs
//! for melt simulation are derived from the nearest settlement baseline.
//!
//! # Scientific References
//! - Degree-day factors for Patagonian ice: Hock (2003) "Temperature index melt
//!   modelling in mountain areas", J. Hydrology 282
//! - Inventory classification: DGA Inventario Público de Glaciares (2022)

use crate::core_types::baseline::TemperatureBaseline;
use crate::core_types::observation::Location;
use crate::core_types::units::{Celsius, CubicKilometers};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Temperature drop from settlement to glacier surface (°C)
///
/// Patagonian glaciers sit 6-10 °C colder than their nearest settlement.
pub const GLACIER_LAPSE_OFFSET: f64 = 8.0;

/// Glacier base temperature when no settlement temperature is available
pub const DEFAULT_BASE_TEMPERATURE: Celsius = Celsius::new(-2.5);

/// Inventory morphology class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GlacierClassification {
    /// Valley glacier
    Valley,
    /// Cirque glacier
    Cirque,
    /// Plateau (mountain apron) glacier
    Plateau,
    /// Ice field
    IceField,
    /// Outlet glacier draining an ice field
    Outlet,
    /// Any class without a calibrated degree-day factor
    Other,
}

impl GlacierClassification {
    /// Parse an inventory label (Spanish inventory names or English)
    pub fn from_label(label: &str) -> Self {
        let lower = label.trim().to_lowercase();
        if lower.contains("valle") || lower.contains("valley") {
            GlacierClassification::Valley
        } else if lower.contains("circo") || lower.contains("cirque") {
            GlacierClassification::Cirque
        } else if lower.contains("meseta") || lower.contains("plateau") {
            GlacierClassification::Plateau
        } else if lower.contains("campo de hielo") || lower.contains("ice field") {
            GlacierClassification::IceField
        } else if lower.contains("outlet") || lower.contains("efluente") {
            GlacierClassification::Outlet
        } else {
            GlacierClassification::Other
        }
    }

    /// Calibrated degree-day factor (mm w.e. °C⁻¹ day⁻¹)
    pub fn base_ddf(self) -> f64 {
        match self {
            GlacierClassification::Valley => 5.2,
            GlacierClassification::Cirque => 4.1,
            GlacierClassification::Plateau => 3.8,
            GlacierClassification::IceField => 4.8,
            GlacierClassification::Outlet => 5.0,
            GlacierClassification::Other => 4.5,
        }
    }
}

impl fmt::Display for GlacierClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            GlacierClassification::Valley => "Valley glacier",
            GlacierClassification::Cirque => "Cirque glacier",
            GlacierClassification::Plateau => "Plateau glacier",
            GlacierClassification::IceField => "Ice field",
            GlacierClassification::Outlet => "Outlet glacier",
            GlacierClassification::Other => "Unclassified glacier",
        };
        f.write_str(label)
    }
}

/// Elevation statistics in meters above sea level
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Elevation {
    /// Mean surface elevation
    pub mean: Option<f64>,
    /// Lowest point (usually the terminus)
    pub min: Option<f64>,
    /// Highest point
    pub max: Option<f64>,
}

/// Static inventory description of a glacier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlacierProfile {
    /// Inventory code
    pub id: String,
    /// Display name and centroid
    pub location: Location,
    /// Ice volume
    pub volume: CubicKilometers,
    /// Surface area (km²)
    pub area: f64,
    /// Elevation statistics
    pub elevation: Elevation,
    /// Morphology class
    pub classification: GlacierClassification,
    /// Dominant aspect (e.g. "SE")
    pub orientation: Option<String>,
    /// Administrative region (e.g. "Aysén del General Carlos Ibáñez del Campo")
    pub region: Option<String>,
    /// Administrative comuna
    pub comuna: Option<String>,
}

impl GlacierProfile {
    /// Display name
    pub fn name(&self) -> &str {
        &self.location.name
    }

    /// Calibrated degree-day factor for this glacier's class
    pub fn base_ddf(&self) -> f64 {
        self.classification.base_ddf()
    }

    /// Glacier surface temperature derived from the nearest settlement
    ///
    /// Settlement current temperature minus [`GLACIER_LAPSE_OFFSET`], rounded
    /// to 0.1 °C. Falls back to [`DEFAULT_BASE_TEMPERATURE`] without data.
    pub fn base_temperature(&self, settlement: Option<&TemperatureBaseline>) -> Celsius {
        glacier_base_temperature(settlement)
    }
}

/// Glacier surface temperature for a settlement baseline
///
/// See [`GlacierProfile::base_temperature`].
pub fn glacier_base_temperature(settlement: Option<&TemperatureBaseline>) -> Celsius {
    match settlement {
        Some(baseline) => {
            let raw = *baseline.current - GLACIER_LAPSE_OFFSET;
            Celsius::new((raw * 10.0).round() / 10.0)
        }
        None => DEFAULT_BASE_TEMPERATURE,
    }
}

/// Reference glacier sites monitored by the point forecast pipeline
pub fn patagonian_glacier_sites() -> Vec<Location> {
    vec![
        Location::new("Campo de Hielo Sur", -49.3, -73.0),
        Location::new("Glaciar O'Higgins", -48.8, -72.9),
        Location::new("Glaciar Upsala", -49.9, -73.3),
        Location::new("Glaciar Spegazzini", -49.7, -73.2),
        Location::new("Glaciar Perito Moreno", -50.5, -73.1),
        Location::new("Glaciar Tyndall", -50.9, -73.4),
        Location::new("Campo de Hielo Norte", -46.8, -73.5),
        Location::new("Glaciar San Rafael", -46.7, -73.8),
    ]
}
