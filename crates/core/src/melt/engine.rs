//! Degree-day glacier melt simulation
//!
//! Projects one year of volume loss for a glacier under a climate scenario.
//! The model is a temperature-index (degree-day) ablation estimate scaled by
//! radiation, humidity, precipitation and a scenario band for the target
//! year. It is a pure function of its inputs: identical inputs give
//! bit-identical results.
//!
//! Steps:
//! 1. Final temperature = base temperature + projected increase
//! 2. Melt-season length from final temperature
//! 3. Melt intensity and annual melt (mm w.e.); very cold, slow-melting ice
//!    only sublimates
//! 4. Loss fraction from bounded temperature, season and DDF factors
//! 5. Absolute floors for detectable melt and sublimation, then a 90% cap
//!
//! # Scientific References
//! - Degree-day melt modelling: Hock (2003) "Temperature index melt modelling
//!   in mountain areas", J. Hydrology 282
//! - Braithwaite (1995) "Positive degree-day factors for ablation on the
//!   Greenland ice sheet studied by energy-balance modelling", J. Glaciology 41

use crate::core_types::units::{Celsius, CelsiusDelta, CubicKilometers, Percent};
use crate::error::{FieldViolation, MeltValidationError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Accepted input ranges
pub mod limits {
    /// Degree-day factor (mm w.e. °C⁻¹ day⁻¹)
    pub const DDF: (f64, f64) = (1.0, 15.0);
    /// Solar radiation index (%)
    pub const SOLAR_RADIATION: (f64, f64) = (0.0, 100.0);
    /// Climate multiplier
    pub const CLIMATE_MULTIPLIER: (f64, f64) = (0.5, 5.0);
}

/// Year the simulation targets
///
/// Manually edited parameters no longer correspond to any projected year, so
/// the year becomes [`TargetYear::Unspecified`] and the scenario band is
/// neutral.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetYear {
    /// Concrete projection year
    Year(i32),
    /// Parameters were edited by hand
    Unspecified,
}

impl TargetYear {
    /// Concrete year, if any
    pub fn year(self) -> Option<i32> {
        match self {
            TargetYear::Year(year) => Some(year),
            TargetYear::Unspecified => None,
        }
    }
}

impl fmt::Display for TargetYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetYear::Year(year) => write!(f, "{year}"),
            TargetYear::Unspecified => f.write_str("custom"),
        }
    }
}

/// Simulation parameter set
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeltSimulationInput {
    /// Projection year
    pub target_year: TargetYear,
    /// Glacier surface temperature today
    pub base_temperature: Celsius,
    /// Degree-day factor (mm w.e. °C⁻¹ day⁻¹)
    pub ddf: f64,
    /// Projected warming over the base temperature
    pub temperature_increase: CelsiusDelta,
    /// Solar radiation index
    pub solar_radiation: Percent,
    /// Expected-climate amplification
    pub climate_multiplier: f64,
    /// Annual precipitation (mm/yr)
    pub precipitation: f64,
    /// Mean relative humidity
    pub humidity: Percent,
}

impl Default for MeltSimulationInput {
    /// Literature defaults for a Patagonian glacier in 2050
    fn default() -> Self {
        MeltSimulationInput {
            target_year: TargetYear::Year(2050),
            base_temperature: Celsius::new(-2.5),
            ddf: 4.5,
            temperature_increase: CelsiusDelta::new(2.5),
            solar_radiation: Percent::new(75.0),
            climate_multiplier: 1.1,
            precipitation: 1200.0,
            humidity: Percent::new(75.0),
        }
    }
}

impl MeltSimulationInput {
    /// Check ranges; returns every offending field at once
    ///
    /// # Errors
    ///
    /// Returns [`MeltValidationError`] when the DDF, solar radiation or climate
    /// multiplier is out of range, the volume is not positive, or any numeric
    /// field is not finite.
    pub fn validate(&self, volume: CubicKilometers) -> Result<(), MeltValidationError> {
        let mut violations = Vec::new();

        let mut check_range = |field: &'static str, value: f64, (min, max): (f64, f64)| {
            if !(min..=max).contains(&value) {
                violations.push(FieldViolation {
                    field,
                    value,
                    min,
                    max,
                });
            }
        };
        check_range("ddf", self.ddf, limits::DDF);
        check_range(
            "solar_radiation",
            *self.solar_radiation,
            limits::SOLAR_RADIATION,
        );
        check_range(
            "climate_multiplier",
            self.climate_multiplier,
            limits::CLIMATE_MULTIPLIER,
        );

        if !(volume.is_finite() && *volume > 0.0) {
            violations.push(FieldViolation {
                field: "volume",
                value: *volume,
                min: 0.0,
                max: f64::MAX,
            });
        }

        for (field, value) in [
            ("base_temperature", *self.base_temperature),
            ("temperature_increase", *self.temperature_increase),
            ("precipitation", self.precipitation),
            ("humidity", *self.humidity),
        ] {
            if !value.is_finite() {
                violations.push(FieldViolation {
                    field,
                    value,
                    min: f64::MIN,
                    max: f64::MAX,
                });
            }
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(MeltValidationError::new(violations))
        }
    }
}

/// Fixed constants of the ablation model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeltModel {
    /// Annual loss fraction at unit temperature, season and DDF factors
    pub base_loss_fraction: f64,
    /// Minimum loss when melt is detectable (km³)
    pub detectable_floor: f64,
    /// Minimum loss from sublimation alone (km³)
    pub sublimation_floor: f64,
    /// Final temperature above which the detectable floor applies (°C)
    pub detectable_floor_temperature: f64,
    /// Largest fraction of the volume lost in one year
    pub max_loss_fraction: f64,
    /// Annual melt below which very cold ice only sublimates (mm w.e.)
    pub deep_cold_annual_melt: f64,
    /// Final temperature below which the deep-cold branch applies (°C)
    pub deep_cold_temperature: f64,
    /// Climate modifier reported for the deep-cold branch
    pub deep_cold_modifier: f64,
    /// Remaining fraction at or below which the glacier counts as gone
    pub fully_melted_fraction: f64,
}

impl Default for MeltModel {
    fn default() -> Self {
        MeltModel {
            base_loss_fraction: 0.08,
            detectable_floor: 0.002,
            sublimation_floor: 0.0005,
            detectable_floor_temperature: -6.0,
            max_loss_fraction: 0.9,
            deep_cold_annual_melt: 5.0,
            deep_cold_temperature: -8.0,
            deep_cold_modifier: 0.05,
            fully_melted_fraction: 0.05,
        }
    }
}

/// Which branch determined the volume lost
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MeltBranch {
    /// Loss fraction applied as computed
    Ablation,
    /// Raised to the detectable-melt floor
    DetectableFloor,
    /// Raised to the sublimation floor
    SublimationFloor,
    /// Ice too cold to melt; sublimation only
    DeepCold,
    /// Limited to the maximum yearly loss
    Capped,
}

/// Factors recorded for reporting
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeltFactors {
    /// Degree-day factor used
    pub ddf: f64,
    /// Melt-season length (days)
    pub melt_season_days: u32,
    /// Combined climate factor
    pub climate_factor: f64,
}

/// One year of simulated glacier loss
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeltSimulationResult {
    /// Volume before the simulated year
    pub initial_volume: CubicKilometers,
    /// Volume lost
    pub volume_lost: CubicKilometers,
    /// Volume remaining
    pub new_volume: CubicKilometers,
    /// Base temperature plus increase
    pub final_temperature: Celsius,
    /// Climate modifier applied to the loss fraction
    pub climate_modifier: f64,
    /// Remaining volume is at most 5% of the initial volume
    pub fully_melted: bool,
    /// Factors used
    pub factors: MeltFactors,
    /// Loss fraction before floors and cap
    pub loss_fraction: f64,
    /// Melt intensity factor
    pub melt_intensity: f64,
    /// Annual melt (mm w.e.)
    pub annual_melt: f64,
    /// Branch that fixed the volume lost
    pub branch: MeltBranch,
}

impl MeltSimulationResult {
    /// Share of the initial volume lost (%)
    pub fn percent_lost(&self) -> f64 {
        *self.volume_lost / *self.initial_volume * 100.0
    }
}

/// Melt-season length in days for a mean temperature
pub fn melt_season_days(temperature: Celsius) -> u32 {
    match *temperature {
        t if t <= -5.0 => 30,
        t if t <= -2.0 => 60,
        t if t <= 0.0 => 90,
        t if t <= 2.0 => 120,
        t if t <= 5.0 => 150,
        _ => 180,
    }
}

/// Melt intensity for a mean temperature
///
/// Breakpoints differ from [`melt_season_days`]; below -5 °C only a fixed
/// sublimation term remains.
pub fn melt_intensity(temperature: Celsius) -> f64 {
    match *temperature {
        t if t >= 2.0 => t,
        t if t >= 0.0 => t * 0.7,
        t if t >= -2.0 => (t + 2.0) * 0.3,
        t if t >= -5.0 => (t + 5.0) * 0.1,
        _ => 0.05,
    }
}

/// Year-dependent warming curve inside the climate factor
pub fn year_climate_factor(year: TargetYear) -> f64 {
    let Some(year) = year.year() else {
        return 1.0;
    };
    let year = f64::from(year);
    if year >= 2080.0 {
        2.2
    } else if year >= 2060.0 {
        1.9
    } else if year >= 2050.0 {
        1.6
    } else if year > 2030.0 {
        1.0 + (year - 2030.0) / 20.0 * 0.6
    } else if year > 2020.0 {
        1.0 + (year - 2020.0) / 10.0 * 0.4
    } else {
        1.0
    }
}

/// Combined radiation, humidity, precipitation and year factor, clamped [0.2, 5.0]
pub fn climate_factor(input: &MeltSimulationInput) -> f64 {
    let radiation = 0.6 + input.solar_radiation.to_fraction() * 0.8;
    let humidity = 1.4 - input.humidity.to_fraction() * 0.6;
    let precipitation = match input.precipitation {
        p if p < 500.0 => 1.3,
        p if p < 1000.0 => 1.15,
        p if p > 2000.0 => 0.7,
        p if p > 1500.0 => 0.85,
        _ => 1.0,
    };

    (radiation * humidity * precipitation * year_climate_factor(input.target_year)).clamp(0.2, 5.0)
}

/// Emission-scenario band applied to the loss fraction
pub fn scenario_band(year: TargetYear) -> f64 {
    match year.year() {
        Some(y) if y >= 2090 => 2.8,
        Some(y) if y >= 2070 => 2.2,
        Some(y) if y >= 2050 => 1.8,
        Some(y) if y >= 2040 => 1.5,
        Some(y) if y >= 2030 => 1.3,
        Some(y) if y >= 2025 => 1.1,
        _ => 1.0,
    }
}

/// Degree-day melt simulation engine
#[derive(Debug, Clone, Default)]
pub struct MeltSimulationEngine {
    model: MeltModel,
}

impl MeltSimulationEngine {
    /// Create an engine with custom model constants
    pub fn new(model: MeltModel) -> Self {
        MeltSimulationEngine { model }
    }

    /// Model constants in use
    pub fn model(&self) -> &MeltModel {
        &self.model
    }

    /// Simulate one year of loss for a glacier of `volume`
    ///
    /// # Errors
    ///
    /// Returns [`MeltValidationError`] naming every out-of-range field; no
    /// computation runs in that case.
    pub fn simulate(
        &self,
        volume: CubicKilometers,
        input: &MeltSimulationInput,
    ) -> Result<MeltSimulationResult, MeltValidationError> {
        input.validate(volume)?;
        let model = &self.model;

        let final_temperature = input.base_temperature + input.temperature_increase;
        let days = melt_season_days(final_temperature);
        let intensity = melt_intensity(final_temperature);
        let daily_melt = input.ddf * intensity.max(0.05);
        let annual_melt = daily_melt * f64::from(days);

        tracing::debug!(
            "Melt model: T_final={:.1}°C, days={}, intensity={:.3}, annual={:.2} mm",
            *final_temperature,
            days,
            intensity,
            annual_melt
        );

        if annual_melt < model.deep_cold_annual_melt && *final_temperature < model.deep_cold_temperature
        {
            let volume_lost = model.sublimation_floor.min(*volume * model.max_loss_fraction);
            tracing::debug!(
                "Deep-cold conditions at {:.1}°C, sublimation only",
                *final_temperature
            );
            return Ok(self.finish(
                volume,
                volume_lost,
                final_temperature,
                MeltFactors {
                    ddf: input.ddf,
                    melt_season_days: days,
                    climate_factor: model.deep_cold_modifier,
                },
                0.0,
                intensity,
                annual_melt,
                MeltBranch::DeepCold,
            ));
        }

        let factor_temperature = ((*final_temperature + 8.0) / 12.0).clamp(0.2, 1.2);
        let factor_days = (f64::from(days) / 200.0).clamp(0.4, 1.8);
        let factor_ddf = (input.ddf / 6.0).clamp(0.6, 1.7);
        let climate = climate_factor(input);
        let band = scenario_band(input.target_year);

        let loss_fraction = factor_temperature
            * factor_days
            * factor_ddf
            * model.base_loss_fraction
            * climate
            * input.climate_multiplier
            * band;

        tracing::trace!(
            "Loss fraction: ft={:.3} fd={:.3} fddf={:.3} climate={:.3} band={:.2} -> {:.5}",
            factor_temperature,
            factor_days,
            factor_ddf,
            climate,
            band,
            loss_fraction
        );

        let mut volume_lost = *volume * loss_fraction;
        let mut branch = MeltBranch::Ablation;
        if volume_lost < model.detectable_floor {
            if *final_temperature > model.detectable_floor_temperature {
                volume_lost = model.detectable_floor;
                branch = MeltBranch::DetectableFloor;
            } else {
                volume_lost = model.sublimation_floor;
                branch = MeltBranch::SublimationFloor;
            }
        }

        let max_loss = *volume * model.max_loss_fraction;
        if volume_lost > max_loss {
            tracing::debug!("Loss limited to {:.0}% of volume", model.max_loss_fraction * 100.0);
            volume_lost = max_loss;
            branch = MeltBranch::Capped;
        }

        Ok(self.finish(
            volume,
            volume_lost,
            final_temperature,
            MeltFactors {
                ddf: input.ddf,
                melt_season_days: days,
                climate_factor: climate,
            },
            loss_fraction,
            intensity,
            annual_melt,
            branch,
        ))
    }

    #[allow(clippy::too_many_arguments)]
    fn finish(
        &self,
        volume: CubicKilometers,
        volume_lost: f64,
        final_temperature: Celsius,
        factors: MeltFactors,
        loss_fraction: f64,
        melt_intensity: f64,
        annual_melt: f64,
        branch: MeltBranch,
    ) -> MeltSimulationResult {
        let new_volume = (*volume - volume_lost).max(0.0);
        MeltSimulationResult {
            initial_volume: volume,
            volume_lost: CubicKilometers::new(volume_lost),
            new_volume: CubicKilometers::new(new_volume),
            final_temperature,
            climate_modifier: factors.climate_factor,
            fully_melted: new_volume <= *volume * self.model.fully_melted_fraction,
            factors,
            loss_fraction,
            melt_intensity,
            annual_melt,
            branch,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn km3(v: f64) -> CubicKilometers {
        CubicKilometers::new(v)
    }

    #[test]
    fn test_default_scenario_2050() {
        let engine = MeltSimulationEngine::default();
        let result = engine
            .simulate(km3(1.0), &MeltSimulationInput::default())
            .unwrap();

        assert_eq!(result.final_temperature, Celsius::new(0.0));
        assert_eq!(result.factors.melt_season_days, 90);
        assert_relative_eq!(result.factors.climate_factor, 1.824, epsilon = 1e-9);
        // (8/12) * 0.45 * 0.75 * 0.08 * 1.824 * 1.1 * 1.8
        assert_relative_eq!(*result.volume_lost, 0.06500736, epsilon = 1e-9);
        assert_eq!(result.branch, MeltBranch::Ablation);
        assert!(!result.fully_melted);
    }

    #[test]
    fn test_season_days_breakpoints() {
        assert_eq!(melt_season_days(Celsius::new(-5.0)), 30);
        assert_eq!(melt_season_days(Celsius::new(-4.9)), 60);
        assert_eq!(melt_season_days(Celsius::new(-2.0)), 60);
        assert_eq!(melt_season_days(Celsius::new(0.0)), 90);
        assert_eq!(melt_season_days(Celsius::new(2.0)), 120);
        assert_eq!(melt_season_days(Celsius::new(5.0)), 150);
        assert_eq!(melt_season_days(Celsius::new(5.1)), 180);
    }

    #[test]
    fn test_intensity_breakpoints() {
        assert_eq!(melt_intensity(Celsius::new(3.0)), 3.0);
        assert_relative_eq!(melt_intensity(Celsius::new(1.0)), 0.7);
        assert_relative_eq!(melt_intensity(Celsius::new(-1.0)), 0.3);
        assert_relative_eq!(melt_intensity(Celsius::new(-3.0)), 0.2);
        assert_eq!(melt_intensity(Celsius::new(-6.0)), 0.05);
    }

    #[test]
    fn test_scenario_band() {
        assert_eq!(scenario_band(TargetYear::Year(2024)), 1.0);
        assert_eq!(scenario_band(TargetYear::Year(2025)), 1.1);
        assert_eq!(scenario_band(TargetYear::Year(2030)), 1.3);
        assert_eq!(scenario_band(TargetYear::Year(2040)), 1.5);
        assert_eq!(scenario_band(TargetYear::Year(2050)), 1.8);
        assert_eq!(scenario_band(TargetYear::Year(2070)), 2.2);
        assert_eq!(scenario_band(TargetYear::Year(2090)), 2.8);
        assert_eq!(scenario_band(TargetYear::Unspecified), 1.0);
    }

    #[test]
    fn test_year_climate_curve() {
        assert_eq!(year_climate_factor(TargetYear::Year(2020)), 1.0);
        assert_relative_eq!(year_climate_factor(TargetYear::Year(2025)), 1.2);
        assert_relative_eq!(year_climate_factor(TargetYear::Year(2040)), 1.3);
        assert_eq!(year_climate_factor(TargetYear::Year(2050)), 1.6);
        assert_eq!(year_climate_factor(TargetYear::Year(2060)), 1.9);
        assert_eq!(year_climate_factor(TargetYear::Year(2100)), 2.2);
        assert_eq!(year_climate_factor(TargetYear::Unspecified), 1.0);
    }

    #[test]
    fn test_climate_factor_clamped() {
        let hot_dry = MeltSimulationInput {
            target_year: TargetYear::Year(2100),
            solar_radiation: Percent::new(100.0),
            humidity: Percent::new(0.0),
            precipitation: 100.0,
            ..MeltSimulationInput::default()
        };
        assert_eq!(climate_factor(&hot_dry), 5.0, "1.4 * 1.4 * 1.3 * 2.2 clamps to 5");

        let dark_wet = MeltSimulationInput {
            target_year: TargetYear::Unspecified,
            solar_radiation: Percent::new(0.0),
            humidity: Percent::new(100.0),
            precipitation: 3000.0,
            ..MeltSimulationInput::default()
        };
        assert_relative_eq!(climate_factor(&dark_wet), 0.6 * 0.8 * 0.7);
    }

    #[test]
    fn test_deep_cold_sublimation_branch() {
        let engine = MeltSimulationEngine::default();
        let input = MeltSimulationInput {
            base_temperature: Celsius::new(-12.0),
            temperature_increase: CelsiusDelta::new(2.0),
            ddf: 3.0,
            ..MeltSimulationInput::default()
        };
        let result = engine.simulate(km3(1.0), &input).unwrap();

        assert_eq!(result.final_temperature, Celsius::new(-10.0));
        assert_eq!(result.branch, MeltBranch::DeepCold);
        assert_eq!(*result.volume_lost, 0.0005);
        assert_eq!(result.climate_modifier, 0.05);
        assert!(!result.fully_melted);
    }

    #[test]
    fn test_detectable_floor_above_minus_six() {
        let engine = MeltSimulationEngine::default();
        let input = MeltSimulationInput {
            target_year: TargetYear::Unspecified,
            base_temperature: Celsius::new(-8.0),
            temperature_increase: CelsiusDelta::new(2.5),
            ..MeltSimulationInput::default()
        };
        let result = engine.simulate(km3(0.1), &input).unwrap();

        assert_eq!(result.branch, MeltBranch::DetectableFloor);
        assert_eq!(*result.volume_lost, 0.002);
    }

    #[test]
    fn test_sublimation_floor_at_or_below_minus_six() {
        let engine = MeltSimulationEngine::default();
        let input = MeltSimulationInput {
            target_year: TargetYear::Unspecified,
            base_temperature: Celsius::new(-9.0),
            temperature_increase: CelsiusDelta::new(2.0),
            ..MeltSimulationInput::default()
        };
        let result = engine.simulate(km3(0.1), &input).unwrap();

        assert_eq!(result.final_temperature, Celsius::new(-7.0));
        assert_eq!(result.branch, MeltBranch::SublimationFloor);
        assert_eq!(*result.volume_lost, 0.0005);
    }

    #[test]
    fn test_loss_capped_at_ninety_percent() {
        let engine = MeltSimulationEngine::default();
        let input = MeltSimulationInput {
            target_year: TargetYear::Year(2100),
            base_temperature: Celsius::new(10.0),
            ddf: 15.0,
            solar_radiation: Percent::new(100.0),
            humidity: Percent::new(0.0),
            precipitation: 100.0,
            climate_multiplier: 5.0,
            ..MeltSimulationInput::default()
        };
        let result = engine.simulate(km3(2.0), &input).unwrap();

        assert_eq!(result.branch, MeltBranch::Capped);
        assert_relative_eq!(*result.volume_lost, 1.8);
        assert_relative_eq!(*result.new_volume, 0.2);
        assert!(!result.fully_melted, "10% remaining is above the 5% mark");
        assert!(result.loss_fraction > 0.9);
    }

    #[test]
    fn test_floor_still_respects_cap_on_tiny_glacier() {
        let engine = MeltSimulationEngine::default();
        let result = engine
            .simulate(km3(0.001), &MeltSimulationInput::default())
            .unwrap();

        assert_eq!(result.branch, MeltBranch::Capped);
        assert_relative_eq!(*result.volume_lost, 0.0009);
    }

    #[test]
    fn test_identical_inputs_identical_results() {
        let engine = MeltSimulationEngine::default();
        let input = MeltSimulationInput {
            target_year: TargetYear::Year(2070),
            base_temperature: Celsius::new(-1.3),
            ..MeltSimulationInput::default()
        };
        let a = engine.simulate(km3(3.7), &input).unwrap();
        let b = engine.simulate(km3(3.7), &input).unwrap();
        assert_eq!(a.volume_lost.to_bits(), b.volume_lost.to_bits());
        assert_eq!(a, b);
    }

    #[test]
    fn test_invalid_ddf_rejected() {
        let engine = MeltSimulationEngine::default();
        let input = MeltSimulationInput {
            ddf: 20.0,
            ..MeltSimulationInput::default()
        };
        let err = engine.simulate(km3(1.0), &input).unwrap_err();
        assert_eq!(err.fields(), vec!["ddf"]);
    }

    #[test]
    fn test_every_violation_reported() {
        let engine = MeltSimulationEngine::default();
        let input = MeltSimulationInput {
            ddf: 0.5,
            solar_radiation: Percent::new(120.0),
            climate_multiplier: 6.0,
            humidity: Percent::new(f64::NAN),
            ..MeltSimulationInput::default()
        };
        let err = engine.simulate(km3(-1.0), &input).unwrap_err();
        assert_eq!(
            err.fields(),
            vec![
                "ddf",
                "solar_radiation",
                "climate_multiplier",
                "volume",
                "humidity"
            ]
        );
    }

    #[test]
    fn test_percent_lost() {
        let engine = MeltSimulationEngine::default();
        let result = engine
            .simulate(km3(2.0), &MeltSimulationInput::default())
            .unwrap();
        assert_relative_eq!(result.percent_lost(), 6.500736, epsilon = 1e-6);
    }
}
