//! Text alignment attributes for labels and values.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Horizontal text alignment, stored by its canonical token.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HAlign {
    #[default]
    Left,
    Center,
    Right,
}

impl HAlign {
    pub fn as_str(self) -> &'static str {
        match self {
            HAlign::Left => "left",
            HAlign::Center => "center",
            HAlign::Right => "right",
        }
    }

    /// The alignment mirrored around the vertical axis.
    pub fn mirrored(self) -> Self {
        match self {
            HAlign::Left => HAlign::Right,
            HAlign::Center => HAlign::Center,
            HAlign::Right => HAlign::Left,
        }
    }
}

impl FromStr for HAlign {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(HAlign::Left),
            "center" => Ok(HAlign::Center),
            "right" => Ok(HAlign::Right),
            _ => Err(ModelError::InvalidHAlign(s.to_string())),
        }
    }
}

impl fmt::Display for HAlign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Vertical text alignment, stored by its canonical token.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VAlign {
    #[default]
    Bottom,
    Center,
    Top,
}

impl VAlign {
    pub fn as_str(self) -> &'static str {
        match self {
            VAlign::Bottom => "bottom",
            VAlign::Center => "center",
            VAlign::Top => "top",
        }
    }

    /// The alignment mirrored around the horizontal axis.
    pub fn mirrored(self) -> Self {
        match self {
            VAlign::Bottom => VAlign::Top,
            VAlign::Center => VAlign::Center,
            VAlign::Top => VAlign::Bottom,
        }
    }
}

impl FromStr for VAlign {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bottom" => Ok(VAlign::Bottom),
            "center" => Ok(VAlign::Center),
            "top" => Ok(VAlign::Top),
            _ => Err(ModelError::InvalidVAlign(s.to_string())),
        }
    }
}

impl fmt::Display for VAlign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_round_trip() {
        for align in [HAlign::Left, HAlign::Center, HAlign::Right] {
            assert_eq!(align.as_str().parse::<HAlign>().unwrap(), align);
        }
        for align in [VAlign::Bottom, VAlign::Center, VAlign::Top] {
            assert_eq!(align.as_str().parse::<VAlign>().unwrap(), align);
        }
        assert!("middle".parse::<HAlign>().is_err());
        assert!("middle".parse::<VAlign>().is_err());
    }

    #[test]
    fn mirroring() {
        assert_eq!(HAlign::Left.mirrored(), HAlign::Right);
        assert_eq!(VAlign::Top.mirrored(), VAlign::Bottom);
        assert_eq!(HAlign::Center.mirrored(), HAlign::Center);
    }
}
