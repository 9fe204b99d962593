use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::length::Length;

/// A measurement unit for entering and displaying lengths.
///
/// All persisted coordinates are nanometer-based [`Length`] values; a
/// `LengthUnit` only selects the human-facing representation (grid
/// settings, spin boxes, rulers) and is itself stored in design files by
/// its canonical token.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LengthUnit {
    #[default]
    Millimeters,
    Micrometers,
    Nanometers,
    Inches,
    Mils,
}

impl LengthUnit {
    /// The canonical token written to files.
    pub fn as_str(self) -> &'static str {
        match self {
            LengthUnit::Millimeters => "millimeters",
            LengthUnit::Micrometers => "micrometers",
            LengthUnit::Nanometers => "nanometers",
            LengthUnit::Inches => "inches",
            LengthUnit::Mils => "mils",
        }
    }

    /// All units, in the order they appear in unit selectors.
    pub fn all() -> &'static [LengthUnit] {
        &[
            LengthUnit::Millimeters,
            LengthUnit::Micrometers,
            LengthUnit::Nanometers,
            LengthUnit::Inches,
            LengthUnit::Mils,
        ]
    }

    /// Exact nanometers per one of this unit.
    pub const fn nm_per_unit(self) -> i64 {
        match self {
            LengthUnit::Millimeters => 1_000_000,
            LengthUnit::Micrometers => 1_000,
            LengthUnit::Nanometers => 1,
            LengthUnit::Inches => Length::NM_PER_INCH,
            LengthUnit::Mils => Length::NM_PER_MIL,
        }
    }

    /// Express a length in this unit (lossy for display purposes).
    pub fn from_length(self, length: Length) -> f64 {
        length.to_nm() as f64 / self.nm_per_unit() as f64
    }

    /// Convert a value entered in this unit back to a length.
    pub fn to_length(self, value: f64) -> Result<Length, ModelError> {
        let nanometers = value * self.nm_per_unit() as f64;
        if nanometers.is_finite() && nanometers >= i64::MIN as f64 && nanometers < i64::MAX as f64
        {
            Ok(Length::from_nm(nanometers.round() as i64))
        } else {
            Err(ModelError::LengthOutOfRange(value))
        }
    }
}

impl FromStr for LengthUnit {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "millimeters" => Ok(LengthUnit::Millimeters),
            "micrometers" => Ok(LengthUnit::Micrometers),
            "nanometers" => Ok(LengthUnit::Nanometers),
            "inches" => Ok(LengthUnit::Inches),
            "mils" => Ok(LengthUnit::Mils),
            _ => Err(ModelError::InvalidLengthUnit(s.to_string())),
        }
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_round_trip() {
        for unit in LengthUnit::all() {
            assert_eq!(unit.as_str().parse::<LengthUnit>().unwrap(), *unit);
        }
        assert!("Millimeters".parse::<LengthUnit>().is_err());
        assert!("".parse::<LengthUnit>().is_err());
    }

    #[test]
    fn conversions_are_exact_per_unit() {
        let one_inch = Length::from_nm(Length::NM_PER_INCH);
        assert_eq!(LengthUnit::Inches.from_length(one_inch), 1.0);
        assert_eq!(LengthUnit::Mils.from_length(one_inch), 1000.0);
        assert_eq!(
            LengthUnit::Millimeters.to_length(25.4).unwrap(),
            one_inch
        );
    }
}
