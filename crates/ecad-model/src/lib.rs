//! Core value types for ECAD Studio.
//!
//! Every physical quantity or identifier that appears in a design file has
//! a dedicated type here with exactly one canonical textual form: lengths
//! are nanometer-exact, angles are microdegree-exact, identifiers and
//! version numbers are validated on construction. The persistence layer
//! converts between these types and file tokens; GUI and editor crates
//! consume them directly.

pub mod alignment;
pub mod angle;
pub mod error;
mod fixed;
pub mod length;
pub mod units;
pub mod uuid;
pub mod version;

pub use alignment::{HAlign, VAlign};
pub use angle::Angle;
pub use error::{ModelError, Result};
pub use length::Length;
pub use units::LengthUnit;
pub use uuid::Uuid;
pub use version::Version;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_types_serialize_as_tokens() {
        let uuid = Uuid::new("d2c30518-9cd6-4e25-8339-d271f40499b3").expect("valid uuid");
        let json = serde_json::to_string(&uuid).expect("serialize uuid");
        assert_eq!(json, "\"d2c30518-9cd6-4e25-8339-d271f40499b3\"");
        let round: Uuid = serde_json::from_str(&json).expect("deserialize uuid");
        assert_eq!(round, uuid);

        let length = Length::from_mm_str("0.1").expect("valid length");
        let json = serde_json::to_string(&length).expect("serialize length");
        assert_eq!(json, "\"0.1\"");
        let round: Length = serde_json::from_str(&json).expect("deserialize length");
        assert_eq!(round, length);
    }

    #[test]
    fn display_matches_file_tokens() {
        assert_eq!(Version::new("0.1").expect("valid version").to_string(), "0.1");
        assert_eq!(Angle::from_deg(90.0).to_string(), "90");
        assert_eq!(LengthUnit::Mils.to_string(), "mils");
        assert_eq!(HAlign::Right.to_string(), "right");
    }
}
