use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

const MAX_COMPONENTS: usize = 10;
const MAX_COMPONENT: u32 = 99_999;

/// A dotted file format version number, e.g. `"0.1"` or `"2.0.12"`.
///
/// Components compare numerically, so `"2.10"` is newer than `"2.9"`.
/// Trailing zero components carry no information and are stripped on
/// parse; `"1.0"` therefore equals and prints as `"1"`. With that
/// normalization the derived ordering is the component-wise comparison
/// with implicit zero padding.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    components: Vec<u32>,
}

impl Version {
    pub fn new(input: &str) -> Result<Self, ModelError> {
        let mut components = Vec::new();
        for part in input.split('.') {
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(ModelError::InvalidVersion(input.to_string()));
            }
            let component: u32 = part
                .parse()
                .map_err(|_| ModelError::InvalidVersion(input.to_string()))?;
            if component > MAX_COMPONENT {
                return Err(ModelError::InvalidVersion(input.to_string()));
            }
            components.push(component);
        }
        if components.len() > MAX_COMPONENTS {
            return Err(ModelError::InvalidVersion(input.to_string()));
        }
        while components.len() > 1 && components.last() == Some(&0) {
            components.pop();
        }
        Ok(Self { components })
    }

    pub fn components(&self) -> &[u32] {
        &self.components
    }

    /// The first component, used for coarse compatibility decisions.
    pub fn major(&self) -> u32 {
        self.components[0]
    }
}

impl FromStr for Version {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for component in &self.components {
            if !first {
                f.write_str(".")?;
            }
            write!(f, "{component}")?;
            first = false;
        }
        Ok(())
    }
}

impl serde::Serialize for Version {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for Version {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::new(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_normalizes() {
        assert_eq!(Version::new("1.0").unwrap(), Version::new("1").unwrap());
        assert_eq!(Version::new("1.0").unwrap().to_string(), "1");
        assert_eq!(Version::new("0.1").unwrap().components(), &[0, 1]);
        assert_eq!(Version::new("2.0.12").unwrap().to_string(), "2.0.12");
    }

    #[test]
    fn rejects_malformed() {
        for input in ["", ".", "1.", ".1", "1..2", "a.b", "1.-2", "1.100000"] {
            assert!(Version::new(input).is_err(), "accepted {input:?}");
        }
        assert!(Version::new("1.2.3.4.5.6.7.8.9.10.11").is_err());
    }

    #[test]
    fn compares_component_wise() {
        let v = |s| Version::new(s).unwrap();
        assert!(v("2.10") > v("2.9"));
        assert!(v("1") < v("1.0.1"));
        assert!(v("0.1") < v("1"));
        assert_eq!(v("3"), v("3.0.0"));
    }
}
