//! String codecs for attribute and element text values.
//!
//! The original per-type conversion overloads collapse into one closed
//! trait implemented once per supported type. All tokens are locale
//! independent: numbers always use `.` as the decimal separator no matter
//! what the host locale says.

use chrono::{DateTime, SecondsFormat, Utc};
use ecad_model::{Angle, HAlign, Length, LengthUnit, Uuid, VAlign, Version};

/// Bidirectional conversion between a domain value and its canonical file
/// token.
///
/// Encoding is infallible; decoding any encoded value returns the original
/// (`T::decode(&v.encode()) == Some(v)`). `decode` has no context about
/// where a token came from, so it only reports success or failure; the
/// tree accessors attach element, attribute and file path to failures.
pub trait Codec: Sized {
    /// Human-readable type label used in `InvalidFormat` diagnostics.
    const TYPE_NAME: &'static str;

    /// Render the canonical token written to files.
    fn encode(&self) -> String;

    /// Parse a canonical token. `None` means the token is malformed.
    fn decode(token: &str) -> Option<Self>;
}

impl Codec for String {
    const TYPE_NAME: &'static str = "string";

    fn encode(&self) -> String {
        self.clone()
    }

    fn decode(token: &str) -> Option<Self> {
        Some(token.to_string())
    }
}

impl Codec for bool {
    const TYPE_NAME: &'static str = "boolean";

    fn encode(&self) -> String {
        String::from(if *self { "true" } else { "false" })
    }

    fn decode(token: &str) -> Option<Self> {
        match token {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        }
    }
}

macro_rules! integer_codec {
    ($($ty:ty => $label:literal),+ $(,)?) => {
        $(impl Codec for $ty {
            const TYPE_NAME: &'static str = $label;

            fn encode(&self) -> String {
                self.to_string()
            }

            fn decode(token: &str) -> Option<Self> {
                token.parse().ok()
            }
        })+
    };
}

integer_codec! {
    i32 => "integer",
    i64 => "integer",
    u32 => "unsigned integer",
    u64 => "unsigned integer",
}

impl Codec for f64 {
    const TYPE_NAME: &'static str = "number";

    // `Display` prints the shortest decimal that parses back to the same
    // value, so the round trip is exact without fixing a digit count.
    fn encode(&self) -> String {
        self.to_string()
    }

    fn decode(token: &str) -> Option<Self> {
        let value: f64 = token.parse().ok()?;
        value.is_finite().then_some(value)
    }
}

impl Codec for DateTime<Utc> {
    const TYPE_NAME: &'static str = "date/time";

    fn encode(&self) -> String {
        self.to_rfc3339_opts(SecondsFormat::Secs, true)
    }

    fn decode(token: &str) -> Option<Self> {
        DateTime::parse_from_rfc3339(token)
            .ok()
            .map(|datetime| datetime.with_timezone(&Utc))
    }
}

impl Codec for Uuid {
    const TYPE_NAME: &'static str = "uuid";

    fn encode(&self) -> String {
        self.to_string()
    }

    fn decode(token: &str) -> Option<Self> {
        token.parse().ok()
    }
}

impl Codec for Version {
    const TYPE_NAME: &'static str = "version number";

    fn encode(&self) -> String {
        self.to_string()
    }

    fn decode(token: &str) -> Option<Self> {
        token.parse().ok()
    }
}

impl Codec for Length {
    const TYPE_NAME: &'static str = "length";

    fn encode(&self) -> String {
        self.to_mm_string()
    }

    fn decode(token: &str) -> Option<Self> {
        Length::from_mm_str(token).ok()
    }
}

impl Codec for Angle {
    const TYPE_NAME: &'static str = "angle";

    fn encode(&self) -> String {
        self.to_deg_string()
    }

    fn decode(token: &str) -> Option<Self> {
        Angle::from_deg_str(token).ok()
    }
}

impl Codec for LengthUnit {
    const TYPE_NAME: &'static str = "length unit";

    fn encode(&self) -> String {
        self.as_str().to_string()
    }

    fn decode(token: &str) -> Option<Self> {
        token.parse().ok()
    }
}

impl Codec for HAlign {
    const TYPE_NAME: &'static str = "horizontal alignment";

    fn encode(&self) -> String {
        self.as_str().to_string()
    }

    fn decode(token: &str) -> Option<Self> {
        token.parse().ok()
    }
}

impl Codec for VAlign {
    const TYPE_NAME: &'static str = "vertical alignment";

    fn encode(&self) -> String {
        self.as_str().to_string()
    }

    fn decode(token: &str) -> Option<Self> {
        token.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn round_trip<T: Codec + PartialEq + std::fmt::Debug>(value: T) {
        let token = value.encode();
        assert_eq!(T::decode(&token), Some(value), "token was {token:?}");
    }

    #[test]
    fn primitives_round_trip() {
        round_trip(true);
        round_trip(false);
        round_trip(-42i32);
        round_trip(u64::MAX);
        round_trip(0.1f64);
        round_trip(-1.5e300f64);
        round_trip(String::from("Default Rules"));
    }

    #[test]
    fn booleans_are_strict() {
        assert_eq!(bool::decode("TRUE"), None);
        assert_eq!(bool::decode("1"), None);
        assert_eq!(bool::decode(""), None);
    }

    #[test]
    fn numbers_are_strict() {
        assert_eq!(u32::decode("-1"), None);
        assert_eq!(i32::decode("1.5"), None);
        assert_eq!(f64::decode("inf"), None);
        assert_eq!(f64::decode("NaN"), None);
    }

    #[test]
    fn timestamps_normalize_to_utc() {
        let timestamp = Utc.with_ymd_and_hms(2019, 8, 7, 15, 30, 0).unwrap();
        assert_eq!(timestamp.encode(), "2019-08-07T15:30:00Z");

        // Any valid RFC 3339 offset decodes to the same instant.
        let offset = DateTime::<Utc>::decode("2019-08-07T17:30:00+02:00").unwrap();
        assert_eq!(offset, timestamp);
        round_trip(timestamp);
    }

    #[test]
    fn domain_types_round_trip() {
        round_trip(Uuid::new("bdf7bea5-b88e-41b2-be85-c1604e8ddfca").unwrap());
        round_trip(Version::new("0.1").unwrap());
        round_trip(Length::from_nm(254_000));
        round_trip(Angle::from_microdeg(-45_500_000));
        round_trip(LengthUnit::Inches);
        round_trip(HAlign::Center);
        round_trip(VAlign::Top);
    }
}
