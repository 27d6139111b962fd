//! Semantic unit types for type-safe meteorological and glaciological quantities
//!
//! Newtype wrappers keep incompatible quantities apart (a wind speed cannot be
//! passed where a precipitation depth is expected).
//!
//! # Design Philosophy
//! - All quantities use f64; observations arrive as JSON numbers
//! - Implements `Deref` to the inner value for arithmetic-heavy model code
//! - Total ordering via `Ord` (NaN sorts above all values)
//! - Serde support, serialized transparently as the bare number
//!
//! # Usage
//! ```
//! use glacier_sim_core::core_types::units::{Celsius, CelsiusDelta};
//!
//! let base = Celsius::new(-2.5);
//! let warmed = base + CelsiusDelta::new(2.5);
//! assert_eq!(warmed, Celsius::new(0.0));
//! ```

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Deref, DerefMut, Mul, Neg, Sub};

/// Boilerplate shared by every scalar unit: total ordering, `Deref`, `From`.
macro_rules! scalar_unit {
    ($name:ident, $symbol:literal) => {
        impl Eq for $name {}

        impl PartialOrd for $name {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }

        impl Ord for $name {
            fn cmp(&self, other: &Self) -> Ordering {
                self.0.total_cmp(&other.0)
            }
        }

        impl Deref for $name {
            type Target = f64;
            #[inline]
            fn deref(&self) -> &f64 {
                &self.0
            }
        }

        impl DerefMut for $name {
            #[inline]
            fn deref_mut(&mut self) -> &mut f64 {
                &mut self.0
            }
        }

        impl From<f64> for $name {
            fn from(v: f64) -> Self {
                $name(v)
            }
        }

        impl From<$name> for f64 {
            fn from(v: $name) -> f64 {
                v.0
            }
        }

        impl PartialEq<f64> for $name {
            fn eq(&self, other: &f64) -> bool {
                self.0 == *other
            }
        }

        impl PartialOrd<f64> for $name {
            fn partial_cmp(&self, other: &f64) -> Option<Ordering> {
                self.0.partial_cmp(other)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if let Some(precision) = f.precision() {
                    write!(f, "{:.*}{}", precision, self.0, $symbol)
                } else {
                    write!(f, "{}{}", self.0, $symbol)
                }
            }
        }
    };
}

// ============================================================================
// TEMPERATURE TYPES
// ============================================================================

/// Air temperature in degrees Celsius
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Celsius(f64);

scalar_unit!(Celsius, "°C");

impl Celsius {
    /// Melting point of ice at surface pressure
    pub const FREEZING: Celsius = Celsius(0.0);

    /// Create a new Celsius temperature
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Celsius(value)
    }

    /// Inner value
    #[inline]
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

/// Temperature change in Celsius degrees (warming or cooling)
///
/// A delta, not an absolute temperature: `Celsius + CelsiusDelta = Celsius`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct CelsiusDelta(f64);

scalar_unit!(CelsiusDelta, "°C");

impl CelsiusDelta {
    /// No change
    pub const ZERO: CelsiusDelta = CelsiusDelta(0.0);

    /// Create a new temperature change
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        CelsiusDelta(value)
    }

    /// Inner value
    #[inline]
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

impl Neg for CelsiusDelta {
    type Output = CelsiusDelta;
    fn neg(self) -> CelsiusDelta {
        CelsiusDelta(-self.0)
    }
}

// Scaling a warming delta by a projection factor
impl Mul<f64> for CelsiusDelta {
    type Output = CelsiusDelta;
    fn mul(self, rhs: f64) -> CelsiusDelta {
        CelsiusDelta(self.0 * rhs)
    }
}

// Celsius + CelsiusDelta = Celsius
impl Add<CelsiusDelta> for Celsius {
    type Output = Celsius;
    fn add(self, rhs: CelsiusDelta) -> Celsius {
        Celsius(self.0 + rhs.0)
    }
}

// Celsius - CelsiusDelta = Celsius
impl Sub<CelsiusDelta> for Celsius {
    type Output = Celsius;
    fn sub(self, rhs: CelsiusDelta) -> Celsius {
        Celsius(self.0 - rhs.0)
    }
}

// Celsius - Celsius = CelsiusDelta
impl Sub for Celsius {
    type Output = CelsiusDelta;
    fn sub(self, rhs: Celsius) -> CelsiusDelta {
        CelsiusDelta(self.0 - rhs.0)
    }
}

// ============================================================================
// RATIO TYPES
// ============================================================================

/// Percentage (0-100 scale): relative humidity, cloud cover, radiation index
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Percent(f64);

scalar_unit!(Percent, "%");

impl Percent {
    /// Create a new percentage
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Percent(value)
    }

    /// Inner value
    #[inline]
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }

    /// Convert to a 0-1 fraction
    #[inline]
    #[must_use]
    pub fn to_fraction(self) -> f64 {
        self.0 / 100.0
    }

    /// Clamp to an inclusive range of percentages
    #[inline]
    #[must_use]
    pub fn clamp_to(self, min: f64, max: f64) -> Self {
        Percent(self.0.clamp(min, max))
    }
}

// ============================================================================
// SPEED / DIRECTION TYPES
// ============================================================================

/// Wind speed in kilometers per hour
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct KilometersPerHour(f64);

scalar_unit!(KilometersPerHour, " km/h");

impl KilometersPerHour {
    /// Create a new wind speed
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        KilometersPerHour(value)
    }

    /// Inner value
    #[inline]
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

/// Compass bearing in degrees (0 = North, 90 = East)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Degrees(f64);

scalar_unit!(Degrees, "°");

impl Degrees {
    /// Create a new bearing
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Degrees(value)
    }

    /// Inner value
    #[inline]
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }

    /// Convert to radians
    #[inline]
    #[must_use]
    pub fn to_radians(self) -> f64 {
        self.0.to_radians()
    }
}

// ============================================================================
// DEPTH TYPES
// ============================================================================

/// Liquid precipitation depth in millimeters
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Millimeters(f64);

scalar_unit!(Millimeters, " mm");

impl Millimeters {
    /// Create a new depth
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Millimeters(value)
    }

    /// Inner value
    #[inline]
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

impl Add for Millimeters {
    type Output = Millimeters;
    fn add(self, rhs: Millimeters) -> Millimeters {
        Millimeters(self.0 + rhs.0)
    }
}

/// Snow depth in centimeters
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Centimeters(f64);

scalar_unit!(Centimeters, " cm");

impl Centimeters {
    /// Create a new snow depth
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Centimeters(value)
    }

    /// Inner value
    #[inline]
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

impl Add for Centimeters {
    type Output = Centimeters;
    fn add(self, rhs: Centimeters) -> Centimeters {
        Centimeters(self.0 + rhs.0)
    }
}

// ============================================================================
// RADIATION TYPES
// ============================================================================

/// Shortwave irradiance in watts per square meter
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct WattsPerSquareMeter(f64);

scalar_unit!(WattsPerSquareMeter, " W/m²");

impl WattsPerSquareMeter {
    /// Create a new irradiance
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        WattsPerSquareMeter(value)
    }

    /// Inner value
    #[inline]
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

// ============================================================================
// DISTANCE / VOLUME TYPES
// ============================================================================

/// Great-circle or planar distance in kilometers
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Kilometers(f64);

scalar_unit!(Kilometers, " km");

impl Kilometers {
    /// Create a new distance
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Kilometers(value)
    }

    /// Inner value
    #[inline]
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

/// Ice volume in cubic kilometers
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct CubicKilometers(f64);

scalar_unit!(CubicKilometers, " km³");

impl CubicKilometers {
    /// Liters contained in one cubic kilometer
    pub const LITERS_PER_CUBIC_KM: f64 = 1e12;

    /// Create a new volume
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        CubicKilometers(value)
    }

    /// Inner value
    #[inline]
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }

    /// Equivalent liquid volume in liters
    #[inline]
    #[must_use]
    pub fn to_liters(self) -> f64 {
        self.0 * Self::LITERS_PER_CUBIC_KM
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_celsius_delta_arithmetic() {
        let base = Celsius::new(-2.5);
        let final_temp = base + CelsiusDelta::new(3.0);
        assert_eq!(final_temp, Celsius::new(0.5));
        assert_eq!(final_temp - base, CelsiusDelta::new(3.0));
        assert_eq!(base - CelsiusDelta::new(1.0), Celsius::new(-3.5));
    }

    #[test]
    fn test_total_ordering_handles_nan() {
        let nan = Celsius::new(f64::NAN);
        let hot = Celsius::new(40.0);
        assert!(nan > hot, "NaN should sort above every finite value");
        assert_eq!(hot.max(Celsius::new(-10.0)), hot);
    }

    #[test]
    fn test_display_respects_precision() {
        assert_eq!(format!("{:.1}", Celsius::new(12.345)), "12.3°C");
        assert_eq!(format!("{}", Millimeters::new(5.0)), "5 mm");
        assert_eq!(format!("{:.0}", WattsPerSquareMeter::new(612.7)), "613 W/m²");
    }

    #[test]
    fn test_percent_helpers() {
        assert_eq!(Percent::new(75.0).to_fraction(), 0.75);
        assert_eq!(Percent::new(120.0).clamp_to(30.0, 95.0), Percent::new(95.0));
    }

    #[test]
    fn test_volume_to_liters() {
        assert_eq!(CubicKilometers::new(0.5).to_liters(), 5e11);
    }

    #[test]
    fn test_serde_transparent() {
        let json = serde_json::to_string(&KilometersPerHour::new(42.5)).unwrap();
        assert_eq!(json, "42.5");
        let back: KilometersPerHour = serde_json::from_str(&json).unwrap();
        assert_eq!(back, KilometersPerHour::new(42.5));
    }
}
