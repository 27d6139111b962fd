//! Measured climate baselines for glacier neighbourhoods
//!
//! Baselines come from comuna-level climate layers: a temperature layer
//! (current temperature plus measured 2020 → 2050 warming) and a
//! complementary climate layer (precipitation, humidity, radiation index).
//! When a layer is unavailable the literature defaults below are used.

use crate::core_types::observation::Location;
use crate::core_types::units::{Celsius, CelsiusDelta, Percent};
use serde::{Deserialize, Serialize};

/// Comuna temperature baseline from the temperature layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureBaseline {
    /// Current mean temperature of the settlement
    pub current: Celsius,
    /// Mean temperature in the baseline year (2020)
    pub baseline_year: Celsius,
    /// Projected mean temperature in the reference year (2050)
    pub reference_year: Celsius,
    /// Measured warming between baseline and reference year
    pub delta: CelsiusDelta,
}

impl Default for TemperatureBaseline {
    /// Literature defaults used when the temperature layer is unavailable
    fn default() -> Self {
        TemperatureBaseline {
            current: Celsius::new(8.5),
            baseline_year: Celsius::new(8.5),
            reference_year: Celsius::new(11.0),
            delta: CelsiusDelta::new(2.5),
        }
    }
}

/// Comuna climate baseline from the complementary climate layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClimateBaseline {
    /// Annual precipitation (mm/yr)
    pub precipitation: f64,
    /// Mean relative humidity
    pub humidity: Percent,
    /// Solar radiation index (0-100)
    pub solar_radiation: Percent,
    /// Apparent temperature
    pub apparent_temperature: Celsius,
}

impl Default for ClimateBaseline {
    /// Literature defaults used when the climate layer is unavailable
    fn default() -> Self {
        ClimateBaseline {
            precipitation: 1200.0,
            humidity: Percent::new(75.0),
            solar_radiation: Percent::new(75.0),
            apparent_temperature: Celsius::new(8.0),
        }
    }
}

/// A comuna with whatever baseline layers were available for it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClimateStation {
    /// Comuna name and centroid
    pub location: Location,
    /// Temperature layer entry
    pub temperature: Option<TemperatureBaseline>,
    /// Complementary climate layer entry
    pub climate: Option<ClimateBaseline>,
}

impl ClimateStation {
    /// Planar distance in degrees, used only to rank stations
    fn degree_distance(&self, latitude: f64, longitude: f64) -> f64 {
        (self.location.latitude - latitude).hypot(self.location.longitude - longitude)
    }
}

/// Station closest to a coordinate by planar lat/lon distance
///
/// Ties keep the first station in slice order.
pub fn nearest_station(
    stations: &[ClimateStation],
    latitude: f64,
    longitude: f64,
) -> Option<&ClimateStation> {
    stations.iter().min_by(|a, b| {
        a.degree_distance(latitude, longitude)
            .total_cmp(&b.degree_distance(latitude, longitude))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn station(name: &str, lat: f64, lon: f64, current: f64) -> ClimateStation {
        ClimateStation {
            location: Location::new(name, lat, lon),
            temperature: Some(TemperatureBaseline {
                current: Celsius::new(current),
                ..TemperatureBaseline::default()
            }),
            climate: None,
        }
    }

    #[test]
    fn test_defaults_match_literature() {
        let t = TemperatureBaseline::default();
        assert_eq!(t.delta, CelsiusDelta::new(2.5));
        assert_eq!(t.reference_year, Celsius::new(11.0));

        let c = ClimateBaseline::default();
        assert_eq!(c.precipitation, 1200.0);
        assert_eq!(c.humidity, Percent::new(75.0));
        assert_eq!(c.solar_radiation, Percent::new(75.0));
    }

    #[test]
    fn test_nearest_station_by_planar_distance() {
        let stations = vec![
            station("Coyhaique", -45.57, -72.07, 9.0),
            station("Cochrane", -47.26, -72.57, 7.5),
            station("Villa O'Higgins", -48.47, -72.57, 6.0),
        ];

        let nearest = nearest_station(&stations, -47.0, -73.0).unwrap();
        assert_eq!(nearest.location.name, "Cochrane");
    }

    #[test]
    fn test_nearest_station_empty() {
        assert!(nearest_station(&[], -47.0, -73.0).is_none());
    }
}
