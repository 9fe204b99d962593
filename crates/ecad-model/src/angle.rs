use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

use crate::error::ModelError;
use crate::fixed;

const MICRODEG_PER_TURN: i32 = 360_000_000;

/// A rotation, stored as integer microdegrees wrapped to one turn.
///
/// Wrapping keeps the sign of the remainder (`-450°` stores `-90°`); use
/// [`Angle::mapped_to_0_360deg`] or [`Angle::mapped_to_180deg`] when a
/// normalized form is needed. The canonical file token is decimal degrees
/// with at most six fractional digits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Angle(i32);

impl Angle {
    pub const ZERO: Self = Self(0);

    pub fn from_microdeg(microdegrees: i32) -> Self {
        Self(microdegrees % MICRODEG_PER_TURN)
    }

    pub const fn to_microdeg(self) -> i32 {
        self.0
    }

    /// Parse a degree token from a file, e.g. `"90.0"` or `"-45.5"`.
    ///
    /// The token must be exactly representable in microdegrees.
    pub fn from_deg_str(degrees: &str) -> Result<Self, ModelError> {
        fixed::parse_scaled(degrees, 6)
            .map(|microdeg| Self((microdeg % i64::from(MICRODEG_PER_TURN)) as i32))
            .ok_or_else(|| ModelError::InvalidAngle(degrees.to_string()))
    }

    /// The canonical degree token written to files.
    pub fn to_deg_string(self) -> String {
        fixed::format_scaled(i64::from(self.0), 6)
    }

    pub fn from_deg(degrees: f64) -> Self {
        Self(((degrees * 1e6) % f64::from(MICRODEG_PER_TURN)) as i32)
    }

    pub fn to_deg(self) -> f64 {
        f64::from(self.0) / 1e6
    }

    pub fn from_rad(radians: f64) -> Self {
        Self::from_deg(radians.to_degrees())
    }

    pub fn to_rad(self) -> f64 {
        self.to_deg().to_radians()
    }

    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }

    /// The same rotation expressed in `[0°, 360°)`.
    pub fn mapped_to_0_360deg(self) -> Self {
        if self.0 < 0 {
            Self(self.0 + MICRODEG_PER_TURN)
        } else {
            self
        }
    }

    /// The same rotation expressed in `(-180°, +180°]`.
    pub fn mapped_to_180deg(self) -> Self {
        if self.0 > MICRODEG_PER_TURN / 2 {
            Self(self.0 - MICRODEG_PER_TURN)
        } else if self.0 <= -MICRODEG_PER_TURN / 2 {
            Self(self.0 + MICRODEG_PER_TURN)
        } else {
            self
        }
    }
}

impl Add for Angle {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self((self.0 + rhs.0) % MICRODEG_PER_TURN)
    }
}

impl AddAssign for Angle {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Angle {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self((self.0 - rhs.0) % MICRODEG_PER_TURN)
    }
}

impl SubAssign for Angle {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Neg for Angle {
    type Output = Self;
    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl FromStr for Angle {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_deg_str(s)
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_deg_string())
    }
}

impl serde::Serialize for Angle {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_deg_string())
    }
}

impl<'de> serde::Deserialize<'de> for Angle {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_deg_str(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deg_string_round_trip() {
        let angle = Angle::from_deg_str("-45.5").unwrap();
        assert_eq!(angle.to_microdeg(), -45_500_000);
        assert_eq!(angle.to_deg_string(), "-45.5");
        assert_eq!(Angle::from_deg_str(&angle.to_deg_string()).unwrap(), angle);
    }

    #[test]
    fn wraps_to_one_turn() {
        assert_eq!(Angle::from_deg_str("450").unwrap().to_microdeg(), 90_000_000);
        assert_eq!(Angle::from_microdeg(-450_000_000).to_microdeg(), -90_000_000);
        assert_eq!(Angle::from_deg(720.0).to_microdeg(), 0);
    }

    #[test]
    fn rejects_sub_microdegree_precision() {
        assert!(Angle::from_deg_str("0.0000001").is_err());
        assert!(Angle::from_deg_str("90deg").is_err());
    }

    #[test]
    fn normalization() {
        assert_eq!(
            Angle::from_deg(-90.0).mapped_to_0_360deg(),
            Angle::from_deg(270.0)
        );
        assert_eq!(
            Angle::from_deg(270.0).mapped_to_180deg(),
            Angle::from_deg(-90.0)
        );
        assert_eq!(
            Angle::from_deg(-180.0).mapped_to_180deg(),
            Angle::from_deg(180.0)
        );
        assert_eq!(Angle::from_deg(180.0).mapped_to_180deg(), Angle::from_deg(180.0));
    }
}
