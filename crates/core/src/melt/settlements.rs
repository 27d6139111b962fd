//! Settlements downstream of Patagonian glaciers
//!
//! Great-circle distances use the haversine formula on a spherical Earth.

use crate::core_types::observation::Location;
use crate::core_types::units::Kilometers;
use crate::melt::impact::ImpactSeverity;
use serde::{Deserialize, Serialize};

/// Mean Earth radius (km)
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Settlements at or beyond this distance are ignored (km)
pub const MAX_SETTLEMENT_DISTANCE_KM: f64 = 300.0;

/// At most this many settlements are reported
pub const MAX_NEARBY_SETTLEMENTS: usize = 5;

/// A populated place
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settlement {
    /// Name and coordinates
    pub location: Location,
    /// Residents
    pub population: u32,
}

/// A settlement within reach of a glacier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearbySettlement {
    /// Settlement name
    pub name: String,
    /// Great-circle distance to the glacier
    pub distance: Kilometers,
    /// Residents
    pub population: u32,
    /// Risk tier from distance
    pub risk: ImpactSeverity,
    /// Expected impact types
    pub impact_types: Vec<String>,
}

/// Haversine distance between two WGS84 coordinates
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> Kilometers {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    Kilometers::new(EARTH_RADIUS_KM * c)
}

const DIRECT_IMPACTS: &[&str] = &[
    "Direct flooding",
    "Critical infrastructure",
    "Evacuation required",
];
const NEAR_IMPACTS: &[&str] = &["Increased river discharge", "Intensive monitoring"];
const REGIONAL_IMPACTS: &[&str] = &["Regional hydrological changes"];
const REMOTE_IMPACTS: &[&str] = &["Minimal impact"];

/// Risk tier and impact types for a settlement at `distance`
pub fn distance_tier(distance: Kilometers) -> (ImpactSeverity, &'static [&'static str]) {
    match *distance {
        d if d < 50.0 => (ImpactSeverity::Critical, DIRECT_IMPACTS),
        d if d < 100.0 => (ImpactSeverity::High, NEAR_IMPACTS),
        d if d < 200.0 => (ImpactSeverity::Moderate, REGIONAL_IMPACTS),
        _ => (ImpactSeverity::Low, REMOTE_IMPACTS),
    }
}

/// Known settlements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettlementRegistry {
    settlements: Vec<Settlement>,
}

impl SettlementRegistry {
    /// Registry over an arbitrary settlement list
    pub fn new(settlements: Vec<Settlement>) -> Self {
        SettlementRegistry { settlements }
    }

    /// Main settlements of Chilean Patagonia plus El Calafate
    pub fn patagonia() -> Self {
        let entry = |name: &str, latitude, longitude, population| Settlement {
            location: Location::new(name, latitude, longitude),
            population,
        };
        SettlementRegistry::new(vec![
            entry("Coyhaique", -45.5752, -72.0662, 60000),
            entry("Puerto Aysén", -45.4014, -72.6925, 25000),
            entry("Chile Chico", -46.5433, -71.7256, 5000),
            entry("Puerto Natales", -51.7236, -72.5084, 22000),
            entry("Punta Arenas", -53.1638, -70.9171, 130000),
            entry("El Calafate (ARG)", -50.3404, -72.2648, 25000),
            entry("Cochrane", -47.2644, -72.5733, 3500),
            entry("Villa O'Higgins", -48.4651, -72.5733, 800),
        ])
    }

    /// All settlements
    pub fn settlements(&self) -> &[Settlement] {
        &self.settlements
    }

    /// Up to five settlements closer than 300 km, nearest first
    pub fn nearby(&self, latitude: f64, longitude: f64) -> Vec<NearbySettlement> {
        let mut nearby: Vec<NearbySettlement> = self
            .settlements
            .iter()
            .filter_map(|s| {
                let distance = haversine_distance(
                    latitude,
                    longitude,
                    s.location.latitude,
                    s.location.longitude,
                );
                if *distance >= MAX_SETTLEMENT_DISTANCE_KM {
                    return None;
                }
                let (risk, impact_types) = distance_tier(distance);
                Some(NearbySettlement {
                    name: s.location.name.clone(),
                    distance,
                    population: s.population,
                    risk,
                    impact_types: impact_types.iter().map(ToString::to_string).collect(),
                })
            })
            .collect();

        nearby.sort_by_key(|s| s.distance);
        nearby.truncate(MAX_NEARBY_SETTLEMENTS);
        nearby
    }
}

impl Default for SettlementRegistry {
    fn default() -> Self {
        Self::patagonia()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_haversine_known_distance() {
        // Coyhaique to Puerto Aysén
        let d = haversine_distance(-45.5752, -72.0662, -45.4014, -72.6925);
        assert!((45.0..55.0).contains(&*d), "expected ~52 km, got {}", *d);

        let zero = haversine_distance(-47.0, -73.0, -47.0, -73.0);
        assert_relative_eq!(*zero, 0.0);
    }

    #[test]
    fn test_one_degree_latitude() {
        let d = haversine_distance(-46.0, -72.0, -47.0, -72.0);
        assert_relative_eq!(*d, EARTH_RADIUS_KM.to_radians(), epsilon = 1e-6);
    }

    #[test]
    fn test_distance_tiers() {
        assert_eq!(distance_tier(Kilometers::new(10.0)).0, ImpactSeverity::Critical);
        assert_eq!(distance_tier(Kilometers::new(50.0)).0, ImpactSeverity::High);
        assert_eq!(distance_tier(Kilometers::new(150.0)).0, ImpactSeverity::Moderate);
        assert_eq!(distance_tier(Kilometers::new(250.0)).0, ImpactSeverity::Low);
    }

    #[test]
    fn test_nearby_sorted_filtered_and_limited() {
        let registry = SettlementRegistry::patagonia();
        // Near Campo de Hielo Norte
        let nearby = registry.nearby(-46.8, -73.5);

        assert!(nearby.len() <= MAX_NEARBY_SETTLEMENTS);
        assert!(!nearby.is_empty());
        assert!(nearby.iter().all(|s| *s.distance < MAX_SETTLEMENT_DISTANCE_KM));
        assert!(nearby.windows(2).all(|w| w[0].distance <= w[1].distance));
        assert!(
            nearby.iter().all(|s| s.name != "Punta Arenas"),
            "Punta Arenas is ~700 km away"
        );
    }

    #[test]
    fn test_remote_glacier_has_no_settlements() {
        let registry = SettlementRegistry::patagonia();
        assert!(registry.nearby(-30.0, -70.0).is_empty());
    }
}
