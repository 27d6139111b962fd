//! Weather observation data contract
//!
//! Two shapes of meteorological input cross the boundary into the core:
//! - [`WeatherObservation`]: an immutable point-in-time snapshot, as delivered
//!   per monitoring cell by the regional grid feed
//! - [`ForecastSeries`]: current conditions plus hourly readings and daily
//!   summaries, as delivered per coordinate by a numerical-weather-prediction feed
//!
//! Both are keyed by coordinates. Neither carries identity beyond its
//! location and timestamp. Fetching them is an external concern.

use crate::core_types::units::{
    Celsius, Centimeters, Degrees, KilometersPerHour, Millimeters, Percent, WattsPerSquareMeter,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Named geographic position (WGS84 decimal degrees)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Human-readable name (glacier, comuna or monitoring cell)
    pub name: String,
    /// Latitude, negative in the southern hemisphere
    pub latitude: f64,
    /// Longitude, negative west of Greenwich
    pub longitude: f64,
}

impl Location {
    /// Create a named location
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Location {
            name: name.into(),
            latitude,
            longitude,
        }
    }

    /// Location labelled only by its coordinates, e.g. `"Location -49.30, -73.00"`
    pub fn at(latitude: f64, longitude: f64) -> Self {
        Location {
            name: format!("Location {:.2}, {:.2}", latitude, longitude),
            latitude,
            longitude,
        }
    }

    /// True when both coordinates fall strictly within `tolerance` degrees of `other`
    ///
    /// This is an axis-aligned bounding-box test, not a true distance.
    pub fn within_box(&self, other: &Location, tolerance: f64) -> bool {
        (self.latitude - other.latitude).abs() < tolerance
            && (self.longitude - other.longitude).abs() < tolerance
    }
}

/// Point-in-time weather snapshot for one location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherObservation {
    /// Where the observation applies
    pub location: Location,

    /// Monitoring cell identifier when produced by the grid feed
    pub cell_id: Option<String>,

    /// Observation time
    pub timestamp: DateTime<Utc>,

    /// Current air temperature
    pub temperature: Celsius,

    /// Minimum temperature over the reporting period
    pub temperature_min: Celsius,

    /// Maximum temperature over the reporting period
    pub temperature_max: Celsius,

    /// Accumulated liquid precipitation over the reporting period
    pub precipitation: Millimeters,

    /// Relative humidity
    pub humidity: Percent,

    /// Sustained wind speed
    pub wind_speed: KilometersPerHour,

    /// Direction the wind blows from
    pub wind_direction: Degrees,

    /// Mean shortwave irradiance
    pub solar_radiation: WattsPerSquareMeter,

    /// Fresh snowfall over the reporting period
    pub snowfall: Centimeters,

    /// UV index (dimensionless, 0-11+)
    pub uv_index: f64,
}

/// Conditions at forecast issue time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    /// Air temperature at 2 m
    pub temperature: Celsius,
    /// Wind speed at 10 m
    pub wind_speed: KilometersPerHour,
    /// Wind direction at 10 m
    pub wind_direction: Degrees,
    /// Daylight flag
    pub is_day: bool,
}

/// One hourly forecast step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyReading {
    /// Valid time of the step
    pub time: DateTime<Utc>,
    /// Air temperature at 2 m
    pub temperature: Celsius,
    /// Relative humidity at 2 m
    pub humidity: Percent,
    /// Liquid precipitation over the hour
    pub precipitation: Millimeters,
    /// Snowfall over the hour
    pub snowfall: Centimeters,
    /// Wind speed at 10 m
    pub wind_speed: KilometersPerHour,
    /// Wind gusts at 10 m
    pub wind_gusts: KilometersPerHour,
    /// Global horizontal irradiance
    pub solar_radiation: WattsPerSquareMeter,
    /// UV index
    pub uv_index: f64,
    /// Total cloud cover
    pub cloud_cover: Percent,
}

/// One daily forecast aggregate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    /// Calendar date (local to the forecast provider)
    pub date: NaiveDate,
    /// Daily maximum temperature
    pub temperature_max: Celsius,
    /// Daily minimum temperature
    pub temperature_min: Celsius,
    /// Daily precipitation total
    pub precipitation_total: Millimeters,
    /// Daily snowfall total
    pub snowfall_total: Centimeters,
    /// Daily maximum wind speed
    pub wind_speed_max: KilometersPerHour,
    /// Mean cloud cover
    pub cloud_cover_mean: Percent,
}

/// Short-range forecast for one coordinate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSeries {
    /// Forecast coordinate
    pub location: Location,
    /// Issue time
    pub issued_at: DateTime<Utc>,
    /// Conditions at issue time
    pub current: CurrentConditions,
    /// Hourly steps, earliest first
    pub hourly: Vec<HourlyReading>,
    /// Daily aggregates, earliest first
    pub daily: Vec<DailySummary>,
}

impl ForecastSeries {
    /// Number of forecast days covered by the daily summaries
    pub fn horizon_days(&self) -> usize {
        self.daily.len()
    }

    /// First `n` daily summaries (fewer if the forecast is shorter)
    pub fn leading_days(&self, n: usize) -> &[DailySummary] {
        &self.daily[..n.min(self.daily.len())]
    }

    /// First `n` hourly readings (fewer if the forecast is shorter)
    pub fn leading_hours(&self, n: usize) -> &[HourlyReading] {
        &self.hourly[..n.min(self.hourly.len())]
    }
}

impl From<&WeatherObservation> for ForecastSeries {
    /// Degenerate one-day forecast holding a single snapshot
    fn from(obs: &WeatherObservation) -> Self {
        ForecastSeries {
            location: obs.location.clone(),
            issued_at: obs.timestamp,
            current: CurrentConditions {
                temperature: obs.temperature,
                wind_speed: obs.wind_speed,
                wind_direction: obs.wind_direction,
                is_day: true,
            },
            hourly: vec![HourlyReading {
                time: obs.timestamp,
                temperature: obs.temperature,
                humidity: obs.humidity,
                precipitation: obs.precipitation,
                snowfall: obs.snowfall,
                wind_speed: obs.wind_speed,
                wind_gusts: obs.wind_speed,
                solar_radiation: obs.solar_radiation,
                uv_index: obs.uv_index,
                cloud_cover: Percent::default(),
            }],
            daily: vec![DailySummary {
                date: obs.timestamp.date_naive(),
                temperature_max: obs.temperature_max,
                temperature_min: obs.temperature_min,
                precipitation_total: obs.precipitation,
                snowfall_total: obs.snowfall,
                wind_speed_max: obs.wind_speed,
                cloud_cover_mean: Percent::default(),
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_observation() -> WeatherObservation {
        WeatherObservation {
            location: Location::new("Cochrane", -47.26, -72.57),
            cell_id: Some("Cochrane_1".to_string()),
            timestamp: Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap(),
            temperature: Celsius::new(14.0),
            temperature_min: Celsius::new(6.0),
            temperature_max: Celsius::new(18.0),
            precipitation: Millimeters::new(12.0),
            humidity: Percent::new(70.0),
            wind_speed: KilometersPerHour::new(35.0),
            wind_direction: Degrees::new(270.0),
            solar_radiation: WattsPerSquareMeter::new(450.0),
            snowfall: Centimeters::new(0.0),
            uv_index: 5.0,
        }
    }

    #[test]
    fn test_unnamed_location_label() {
        let loc = Location::at(-49.3, -73.0);
        assert_eq!(loc.name, "Location -49.30, -73.00");
    }

    #[test]
    fn test_bounding_box_is_strict() {
        let a = Location::at(-45.0, -72.0);
        assert!(a.within_box(&Location::at(-45.3, -72.4), 0.5));
        assert!(!a.within_box(&Location::at(-45.5, -72.0), 0.5), "0.5° apart must not match");
        assert!(!a.within_box(&Location::at(-45.1, -72.6), 0.5), "longitude alone must exclude");
    }

    #[test]
    fn test_observation_to_forecast() {
        let obs = sample_observation();
        let forecast = ForecastSeries::from(&obs);

        assert_eq!(forecast.horizon_days(), 1);
        assert_eq!(forecast.daily[0].temperature_max, Celsius::new(18.0));
        assert_eq!(forecast.hourly[0].solar_radiation, WattsPerSquareMeter::new(450.0));
        assert_eq!(forecast.current.wind_speed, KilometersPerHour::new(35.0));
    }

    #[test]
    fn test_leading_windows_saturate() {
        let forecast = ForecastSeries::from(&sample_observation());
        assert_eq!(forecast.leading_days(3).len(), 1);
        assert_eq!(forecast.leading_hours(24).len(), 1);
    }
}
