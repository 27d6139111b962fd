//! Climate projection for melt simulation inputs
//!
//! Projects measured 2020 → 2050 warming onto any target year and derives the
//! remaining simulation parameters from a scalar change factor:
//! - Temperature increase: measured delta scaled by the projection factor
//! - Precipitation: drier with warming, floored at 200 mm/yr
//! - Humidity: shifted up or down by an explicit policy, clamped [30, 95] %
//! - Solar radiation: higher with less cloud, clamped [30, 95] %
//! - DDF: ice becomes easier to melt, up to +50% at the change ceiling
//! - Climate multiplier: `1 + 2c`
//!
//! [`SimulationParameters`] layers manual overrides on top of a projection.

use crate::core_types::baseline::{
    nearest_station, ClimateBaseline, ClimateStation, TemperatureBaseline,
};
use crate::core_types::glacier::{glacier_base_temperature, GlacierProfile};
use crate::core_types::units::{Celsius, CelsiusDelta, Percent};
use crate::melt::engine::{MeltSimulationInput, TargetYear};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// Year the measured baseline refers to
pub const BASELINE_YEAR: i32 = 2020;

/// Year the measured warming delta refers to
pub const REFERENCE_YEAR: i32 = 2050;

/// Year selected when none is given
pub const DEFAULT_TARGET_YEAR: i32 = 2050;

/// Projection years offered to users
pub const AVAILABLE_YEARS: [i32; 8] = [2030, 2040, 2050, 2060, 2070, 2080, 2090, 2100];

/// Bounds applied to projected quantities
pub mod limits {
    /// Projection factor range
    pub const PROJECTION_FACTOR: (f64, f64) = (-1.0, 4.0);
    /// Minimum projected precipitation (mm/yr)
    pub const PRECIPITATION_FLOOR: f64 = 200.0;
    /// Projected humidity range (%)
    pub const HUMIDITY: (f64, f64) = (30.0, 95.0);
    /// Projected solar radiation index range (%)
    pub const SOLAR_RADIATION: (f64, f64) = (30.0, 95.0);
}

/// Direction of the projected humidity change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HumidityShift {
    /// Humidity rises with warming
    #[default]
    Increase,
    /// Humidity falls with warming
    Decrease,
    /// Direction drawn per year from a seeded generator
    Seeded(u64),
}

impl HumidityShift {
    /// +1 or -1 for `year`
    fn sign(self, year: i32) -> f64 {
        match self {
            HumidityShift::Increase => 1.0,
            HumidityShift::Decrease => -1.0,
            HumidityShift::Seeded(seed) => {
                let mut rng = StdRng::seed_from_u64(seed ^ u64::from(year.unsigned_abs()));
                if rng.random_bool(0.5) {
                    1.0
                } else {
                    -1.0
                }
            }
        }
    }
}

/// Projection configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionConfig {
    /// Year with zero projected warming
    pub baseline_year: i32,
    /// Year at which the full measured delta applies
    pub reference_year: i32,
    /// Humidity direction policy
    pub humidity_shift: HumidityShift,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        ProjectionConfig {
            baseline_year: BASELINE_YEAR,
            reference_year: REFERENCE_YEAR,
            humidity_shift: HumidityShift::default(),
        }
    }
}

/// Climate parameters projected for one year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectedClimate {
    /// Target year
    pub year: i32,
    /// Fraction of the measured delta reached by `year`
    pub projection_factor: f64,
    /// Scalar climate change factor `|f| × 0.25`
    pub change_factor: f64,
    /// Warming over the base temperature
    pub temperature_increase: CelsiusDelta,
    /// Annual precipitation (mm/yr)
    pub precipitation: f64,
    /// Mean relative humidity
    pub humidity: Percent,
    /// Solar radiation index
    pub solar_radiation: Percent,
    /// Degree-day factor
    pub ddf: f64,
    /// Expected-climate amplification
    pub climate_multiplier: f64,
}

/// Projects baseline measurements onto target years
#[derive(Debug, Clone)]
pub struct ClimateProjector {
    config: ProjectionConfig,
    temperature: TemperatureBaseline,
    climate: ClimateBaseline,
    base_ddf: f64,
    base_temperature: Celsius,
}

impl ClimateProjector {
    /// Create a projector; missing baselines fall back to literature defaults
    pub fn new(
        config: ProjectionConfig,
        temperature: Option<TemperatureBaseline>,
        climate: Option<ClimateBaseline>,
        base_ddf: f64,
    ) -> Self {
        if temperature.is_none() {
            tracing::warn!("No temperature baseline available, using literature defaults");
        }
        if climate.is_none() {
            tracing::warn!("No climate baseline available, using literature defaults");
        }
        ClimateProjector {
            config,
            base_temperature: glacier_base_temperature(temperature.as_ref()),
            temperature: temperature.unwrap_or_default(),
            climate: climate.unwrap_or_default(),
            base_ddf,
        }
    }

    /// Projector for a glacier using the nearest climate station
    pub fn for_glacier(
        profile: &GlacierProfile,
        stations: &[ClimateStation],
        config: ProjectionConfig,
    ) -> Self {
        let station = nearest_station(
            stations,
            profile.location.latitude,
            profile.location.longitude,
        );
        if let Some(station) = station {
            tracing::debug!(
                "Glacier {} uses climate station {}",
                profile.name(),
                station.location.name
            );
        }
        let temperature = station.and_then(|s| s.temperature);
        let climate = station.and_then(|s| s.climate);

        Self::new(config, temperature, climate, profile.base_ddf())
    }

    /// Configuration in use
    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Glacier surface temperature used as the simulation base
    pub fn base_temperature(&self) -> Celsius {
        self.base_temperature
    }

    /// Baseline degree-day factor before projection
    pub fn base_ddf(&self) -> f64 {
        self.base_ddf
    }

    /// Fraction of the measured delta reached by `year`
    ///
    /// 0 at the baseline year and 1 at the reference year with linear
    /// interpolation between. After the reference year the trend continues at
    /// 60% of its rate; before the baseline year it runs backwards at 50%.
    /// Clamped to [-1, 4].
    pub fn projection_factor(&self, year: i32) -> f64 {
        let base = self.config.baseline_year;
        let reference = self.config.reference_year;
        let span = f64::from(reference - base);

        let factor = if year == reference {
            1.0
        } else if year == base {
            0.0
        } else if year > base && year < reference {
            f64::from(year - base) / span
        } else if year > reference {
            1.0 + f64::from(year - reference) / span * 0.6
        } else {
            -(f64::from(base - year) / span) * 0.5
        };

        let (min, max) = limits::PROJECTION_FACTOR;
        factor.clamp(min, max)
    }

    /// Project every climate parameter for `year`
    pub fn project(&self, year: i32) -> ProjectedClimate {
        let projection_factor = self.projection_factor(year);
        let change_factor = projection_factor.abs() * 0.25;

        let temperature_increase = self.temperature.delta * projection_factor;

        let precipitation = (self.climate.precipitation * (1.0 - change_factor * 0.3))
            .max(limits::PRECIPITATION_FLOOR);

        let humidity_change = change_factor * 0.15 * self.config.humidity_shift.sign(year);
        let (h_min, h_max) = limits::HUMIDITY;
        let humidity =
            Percent::new(*self.climate.humidity * (1.0 + humidity_change)).clamp_to(h_min, h_max);

        let (r_min, r_max) = limits::SOLAR_RADIATION;
        let solar_radiation = Percent::new(*self.climate.solar_radiation * (1.0 + change_factor * 0.4))
            .clamp_to(r_min, r_max);

        let projected = ProjectedClimate {
            year,
            projection_factor,
            change_factor,
            temperature_increase,
            precipitation,
            humidity,
            solar_radiation,
            ddf: self.base_ddf * (1.0 + change_factor * 0.5),
            climate_multiplier: 1.0 + change_factor * 2.0,
        };

        tracing::debug!(
            "Projection {}: f={:.3}, c={:.3}, ΔT={:.2}°C, ddf={:.2}, multiplier={:.2}",
            year,
            projection_factor,
            change_factor,
            *projected.temperature_increase,
            projected.ddf,
            projected.climate_multiplier
        );

        projected
    }

    /// Full simulation input for `year`
    pub fn input_for(&self, year: i32) -> MeltSimulationInput {
        let p = self.project(year);
        MeltSimulationInput {
            target_year: TargetYear::Year(year),
            base_temperature: self.base_temperature,
            ddf: p.ddf,
            temperature_increase: p.temperature_increase,
            solar_radiation: p.solar_radiation,
            climate_multiplier: p.climate_multiplier,
            precipitation: p.precipitation,
            humidity: p.humidity,
        }
    }
}

/// A user-editable simulation parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParameterField {
    /// Glacier base temperature
    BaseTemperature,
    /// Degree-day factor
    Ddf,
    /// Projected warming
    TemperatureIncrease,
    /// Solar radiation index
    SolarRadiation,
    /// Expected-climate amplification
    ClimateMultiplier,
    /// Annual precipitation
    Precipitation,
    /// Relative humidity
    Humidity,
}

/// Projected simulation inputs with manual overrides layered on top
///
/// Overriding a field detaches the parameter set from any projection year.
/// Selecting a year re-projects every field that was not overridden.
#[derive(Debug, Clone)]
pub struct SimulationParameters {
    projector: ClimateProjector,
    input: MeltSimulationInput,
    overrides: FxHashSet<ParameterField>,
}

impl SimulationParameters {
    /// Parameters projected for [`DEFAULT_TARGET_YEAR`]
    pub fn new(projector: ClimateProjector) -> Self {
        let input = projector.input_for(DEFAULT_TARGET_YEAR);
        SimulationParameters {
            projector,
            input,
            overrides: FxHashSet::default(),
        }
    }

    /// Current simulation input
    pub fn input(&self) -> &MeltSimulationInput {
        &self.input
    }

    /// Projector backing this parameter set
    pub fn projector(&self) -> &ClimateProjector {
        &self.projector
    }

    /// Whether `field` holds a manual value
    pub fn is_overridden(&self, field: ParameterField) -> bool {
        self.overrides.contains(&field)
    }

    /// Select a projection year, keeping overridden fields
    pub fn select_year(&mut self, year: i32) {
        let projected = self.projector.input_for(year);
        let current = self.input;
        let keep = |field| self.overrides.contains(&field);

        self.input = MeltSimulationInput {
            target_year: TargetYear::Year(year),
            base_temperature: if keep(ParameterField::BaseTemperature) {
                current.base_temperature
            } else {
                projected.base_temperature
            },
            ddf: if keep(ParameterField::Ddf) {
                current.ddf
            } else {
                projected.ddf
            },
            temperature_increase: if keep(ParameterField::TemperatureIncrease) {
                current.temperature_increase
            } else {
                projected.temperature_increase
            },
            solar_radiation: if keep(ParameterField::SolarRadiation) {
                current.solar_radiation
            } else {
                projected.solar_radiation
            },
            climate_multiplier: if keep(ParameterField::ClimateMultiplier) {
                current.climate_multiplier
            } else {
                projected.climate_multiplier
            },
            precipitation: if keep(ParameterField::Precipitation) {
                current.precipitation
            } else {
                projected.precipitation
            },
            humidity: if keep(ParameterField::Humidity) {
                current.humidity
            } else {
                projected.humidity
            },
        };
    }

    /// Manually set one field; the target year becomes unspecified
    pub fn override_field(&mut self, field: ParameterField, value: f64) {
        match field {
            ParameterField::BaseTemperature => self.input.base_temperature = Celsius::new(value),
            ParameterField::Ddf => self.input.ddf = value,
            ParameterField::TemperatureIncrease => {
                self.input.temperature_increase = CelsiusDelta::new(value);
            }
            ParameterField::SolarRadiation => self.input.solar_radiation = Percent::new(value),
            ParameterField::ClimateMultiplier => self.input.climate_multiplier = value,
            ParameterField::Precipitation => self.input.precipitation = value,
            ParameterField::Humidity => self.input.humidity = Percent::new(value),
        }
        self.overrides.insert(field);
        self.input.target_year = TargetYear::Unspecified;
        tracing::trace!("Parameter {:?} overridden with {}", field, value);
    }

    /// Drop every override and re-project the current year
    /// ([`DEFAULT_TARGET_YEAR`] when unspecified)
    pub fn reset(&mut self) {
        let year = self.input.target_year.year().unwrap_or(DEFAULT_TARGET_YEAR);
        self.overrides.clear();
        self.input = self.projector.input_for(year);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::glacier::{Elevation, GlacierClassification};
    use crate::core_types::observation::Location;
    use crate::core_types::units::CubicKilometers;
    use approx::assert_relative_eq;

    fn projector() -> ClimateProjector {
        ClimateProjector::new(
            ProjectionConfig::default(),
            Some(TemperatureBaseline {
                current: Celsius::new(9.0),
                baseline_year: Celsius::new(8.6),
                reference_year: Celsius::new(11.4),
                delta: CelsiusDelta::new(2.8),
            }),
            Some(ClimateBaseline::default()),
            4.8,
        )
    }

    #[test]
    fn test_factor_anchor_years_exact() {
        let p = projector();
        assert_eq!(p.projection_factor(2020), 0.0);
        assert_eq!(p.projection_factor(2050), 1.0);
        assert_eq!(*p.project(2020).temperature_increase, 0.0);
        assert_eq!(*p.project(2050).temperature_increase, 2.8);
    }

    #[test]
    fn test_factor_interpolation_and_extrapolation() {
        let p = projector();
        assert_relative_eq!(p.projection_factor(2035), 0.5);
        assert_relative_eq!(p.projection_factor(2080), 1.6);
        assert_relative_eq!(p.projection_factor(2100), 1.0 + 50.0 / 30.0 * 0.6);
        assert_relative_eq!(p.projection_factor(1990), -0.5);
        assert_eq!(p.projection_factor(1800), -1.0, "clamped below");
        assert_eq!(p.projection_factor(2400), 4.0, "clamped above");
    }

    #[test]
    fn test_projection_2050_defaults() {
        let p = ClimateProjector::new(ProjectionConfig::default(), None, None, 4.5);
        let c = p.project(2050);

        assert_eq!(c.change_factor, 0.25);
        assert_eq!(*c.temperature_increase, 2.5);
        assert_relative_eq!(c.precipitation, 1200.0 * (1.0 - 0.075));
        assert_relative_eq!(*c.humidity, 75.0 * 1.0375);
        assert_relative_eq!(*c.solar_radiation, 82.5);
        assert_relative_eq!(c.ddf, 4.5 * 1.125);
        assert_relative_eq!(c.climate_multiplier, 1.5);
    }

    #[test]
    fn test_projection_clamps() {
        let climate = ClimateBaseline {
            precipitation: 210.0,
            humidity: Percent::new(94.0),
            solar_radiation: Percent::new(90.0),
            ..ClimateBaseline::default()
        };
        let p = ClimateProjector::new(ProjectionConfig::default(), None, Some(climate), 4.5);
        let c = p.project(2100);

        assert_eq!(c.precipitation, 200.0, "precipitation floor");
        assert_eq!(*c.humidity, 95.0);
        assert_eq!(*c.solar_radiation, 95.0);
    }

    #[test]
    fn test_humidity_shift_policies() {
        let config = |shift| ProjectionConfig {
            humidity_shift: shift,
            ..ProjectionConfig::default()
        };
        let up = ClimateProjector::new(config(HumidityShift::Increase), None, None, 4.5);
        let down = ClimateProjector::new(config(HumidityShift::Decrease), None, None, 4.5);
        assert!(*up.project(2070).humidity > 75.0);
        assert!(*down.project(2070).humidity < 75.0);

        let seeded = ClimateProjector::new(config(HumidityShift::Seeded(42)), None, None, 4.5);
        assert_eq!(
            seeded.project(2070).humidity,
            seeded.project(2070).humidity,
            "seeded shift is reproducible"
        );
    }

    #[test]
    fn test_for_glacier_uses_nearest_station() {
        let profile = GlacierProfile {
            id: "CL104002".to_string(),
            location: Location::new("Glaciar Colonia", -47.2, -73.2),
            volume: CubicKilometers::new(12.0),
            area: 280.0,
            elevation: Elevation::default(),
            classification: GlacierClassification::Outlet,
            orientation: None,
            region: Some("Aysén".to_string()),
            comuna: Some("Cochrane".to_string()),
        };
        let stations = vec![
            ClimateStation {
                location: Location::new("Cochrane", -47.26, -72.57),
                temperature: Some(TemperatureBaseline {
                    current: Celsius::new(7.0),
                    ..TemperatureBaseline::default()
                }),
                climate: None,
            },
            ClimateStation {
                location: Location::new("Punta Arenas", -53.16, -70.92),
                temperature: None,
                climate: None,
            },
        ];

        let p = ClimateProjector::for_glacier(&profile, &stations, ProjectionConfig::default());
        assert_eq!(p.base_temperature(), Celsius::new(-1.0));
        assert_eq!(p.base_ddf(), 5.0);
    }

    #[test]
    fn test_override_sets_year_unspecified() {
        let mut params = SimulationParameters::new(projector());
        assert_eq!(params.input().target_year, TargetYear::Year(2050));

        params.override_field(ParameterField::Ddf, 7.5);
        assert_eq!(params.input().ddf, 7.5);
        assert_eq!(params.input().target_year, TargetYear::Unspecified);
        assert!(params.is_overridden(ParameterField::Ddf));
    }

    #[test]
    fn test_select_year_keeps_overrides() {
        let mut params = SimulationParameters::new(projector());
        params.override_field(ParameterField::Ddf, 7.5);
        params.select_year(2080);

        let expected = projector().input_for(2080);
        assert_eq!(params.input().target_year, TargetYear::Year(2080));
        assert_eq!(params.input().ddf, 7.5);
        assert_eq!(
            params.input().temperature_increase,
            expected.temperature_increase
        );
        assert_eq!(params.input().humidity, expected.humidity);
    }

    #[test]
    fn test_reset_clears_overrides() {
        let mut params = SimulationParameters::new(projector());
        params.select_year(2070);
        params.override_field(ParameterField::Humidity, 40.0);
        params.reset();

        assert!(!params.is_overridden(ParameterField::Humidity));
        assert_eq!(*params.input(), projector().input_for(2050), "unspecified year resets to 2050");

        params.select_year(2090);
        params.reset();
        assert_eq!(params.input().target_year, TargetYear::Year(2090));
    }
}
