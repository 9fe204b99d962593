use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};
use std::str::FromStr;

use crate::error::ModelError;
use crate::fixed;

/// A length in a design, stored as integer nanometers.
///
/// All coordinates and distances in symbols, footprints, schematics and
/// boards use this one type so values stay exact across load/save cycles.
/// The canonical file token is millimeters with at most six fractional
/// digits, which maps 1:1 onto the nanometer grid; values that would need
/// finer resolution are rejected instead of rounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Length(i64);

const NM_PER_MM: i64 = 1_000_000;

impl Length {
    /// One inch is exactly 25.4 mm.
    pub const NM_PER_INCH: i64 = 25_400_000;
    /// One mil is 1/1000 inch.
    pub const NM_PER_MIL: i64 = 25_400;

    pub const ZERO: Self = Self(0);
    pub const MIN: Self = Self(i64::MIN);
    pub const MAX: Self = Self(i64::MAX);

    pub const fn from_nm(nanometers: i64) -> Self {
        Self(nanometers)
    }

    pub const fn to_nm(self) -> i64 {
        self.0
    }

    /// Parse a millimeter token from a file, e.g. `"0.1"` or `"-35.56"`.
    ///
    /// The token must be exactly representable on the nanometer grid.
    pub fn from_mm_str(millimeters: &str) -> Result<Self, ModelError> {
        fixed::parse_scaled(millimeters, 6)
            .map(Self)
            .ok_or_else(|| ModelError::InvalidLength(millimeters.to_string()))
    }

    /// The canonical millimeter token written to files.
    pub fn to_mm_string(self) -> String {
        fixed::format_scaled(self.0, 6)
    }

    /// Convert from floating point millimeters, rounding to the grid.
    pub fn from_mm(millimeters: f64) -> Result<Self, ModelError> {
        from_float_nm(millimeters * NM_PER_MM as f64)
            .ok_or(ModelError::LengthOutOfRange(millimeters))
    }

    /// Convert from floating point inches, rounding to the grid.
    pub fn from_inch(inches: f64) -> Result<Self, ModelError> {
        from_float_nm(inches * Self::NM_PER_INCH as f64).ok_or(ModelError::LengthOutOfRange(inches))
    }

    /// Convert from floating point mils, rounding to the grid.
    pub fn from_mil(mils: f64) -> Result<Self, ModelError> {
        from_float_nm(mils * Self::NM_PER_MIL as f64).ok_or(ModelError::LengthOutOfRange(mils))
    }

    pub fn to_mm(self) -> f64 {
        self.0 as f64 / NM_PER_MM as f64
    }

    pub fn to_inch(self) -> f64 {
        self.0 as f64 / Self::NM_PER_INCH as f64
    }

    pub fn to_mil(self) -> f64 {
        self.0 as f64 / Self::NM_PER_MIL as f64
    }

    pub fn abs(self) -> Self {
        Self(self.0.saturating_abs())
    }
}

fn from_float_nm(nanometers: f64) -> Option<Length> {
    // The exclusive upper bound avoids the i64::MAX-as-f64 rounding trap.
    if nanometers.is_finite() && nanometers >= i64::MIN as f64 && nanometers < i64::MAX as f64 {
        Some(Length(nanometers.round() as i64))
    } else {
        None
    }
}

impl Add for Length {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Length {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Length {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for Length {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Neg for Length {
    type Output = Self;
    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl Mul<i64> for Length {
    type Output = Self;
    fn mul(self, rhs: i64) -> Self {
        Self(self.0 * rhs)
    }
}

impl FromStr for Length {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_mm_str(s)
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_mm_string())
    }
}

impl serde::Serialize for Length {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_mm_string())
    }
}

impl<'de> serde::Deserialize<'de> for Length {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_mm_str(&s).map_err(serde::de::Error::custom)
    }
}
