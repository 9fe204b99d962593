use thiserror::Error;

/// Validation error for a core value type.
///
/// Each variant carries the rejected input verbatim so callers can show
/// it without re-deriving context.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid uuid: \"{0}\"")]
    InvalidUuid(String),
    #[error("invalid version number: \"{0}\"")]
    InvalidVersion(String),
    #[error("invalid length: \"{0}\"")]
    InvalidLength(String),
    #[error("length out of range: {0}")]
    LengthOutOfRange(f64),
    #[error("invalid angle: \"{0}\"")]
    InvalidAngle(String),
    #[error("invalid length unit: \"{0}\"")]
    InvalidLengthUnit(String),
    #[error("invalid horizontal alignment: \"{0}\"")]
    InvalidHAlign(String),
    #[error("invalid vertical alignment: \"{0}\"")]
    InvalidVAlign(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
