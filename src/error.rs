//! Errors raised at the edges of subsector generation (config, output, UWP parsing).
//!
//! The generators themselves never fail: derived values are clamped.

/// Reasons a Universal World Profile string can fail to parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UwpParseError {
    /// Expected `SSAHPGL-T` (9 characters)
    Length(usize),
    /// Starport letter is not A-E or X
    Starport(char),
    /// Separator before the tech digit is missing
    MissingHyphen,
    /// Character is not an extended-hex digit
    Digit(char),
}

impl std::fmt::Display for UwpParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UwpParseError::Length(n) => write!(f, "UWP must be 9 characters, got {}", n),
            UwpParseError::Starport(c) => write!(f, "invalid starport class '{}'", c),
            UwpParseError::MissingHyphen => write!(f, "missing '-' before tech level"),
            UwpParseError::Digit(c) => write!(f, "invalid profile digit '{}'", c),
        }
    }
}

impl std::error::Error for UwpParseError {}

/// Errors from loading configuration or writing generated maps.
#[derive(Debug)]
pub enum SubsectorError {
    /// IO error (missing config file, unwritable output, etc.)
    Io(std::io::Error),
    /// Config file is malformed or holds an out-of-range value
    Config(String),
    /// Serialization error
    Serialization(String),
    /// Malformed world profile
    Uwp(UwpParseError),
}

impl std::fmt::Display for SubsectorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubsectorError::Io(e) => write!(f, "IO error: {}", e),
            SubsectorError::Config(e) => write!(f, "Config error: {}", e),
            SubsectorError::Serialization(e) => write!(f, "Serialization error: {}", e),
            SubsectorError::Uwp(e) => write!(f, "UWP error: {}", e),
        }
    }
}

impl std::error::Error for SubsectorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SubsectorError::Io(e) => Some(e),
            SubsectorError::Uwp(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SubsectorError {
    fn from(e: std::io::Error) -> Self {
        SubsectorError::Io(e)
    }
}

impl From<UwpParseError> for SubsectorError {
    fn from(e: UwpParseError) -> Self {
        SubsectorError::Uwp(e)
    }
}

pub type Result<T> = std::result::Result<T, SubsectorError>;
