//! Core types and data contracts

pub mod baseline;
pub mod glacier;
pub mod observation;
pub mod units;

pub use baseline::{nearest_station, ClimateBaseline, ClimateStation, TemperatureBaseline};
pub use glacier::{
    glacier_base_temperature, patagonian_glacier_sites, Elevation, GlacierClassification,
    GlacierProfile,
};
pub use observation::{
    CurrentConditions, DailySummary, ForecastSeries, HourlyReading, Location, WeatherObservation,
};
pub use units::*;
