//! Universal World Profile: the compact `SSAHPGL-T` summary of a world.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::UwpParseError;
use crate::world::Starport;

/// Highest value a single profile digit can hold (F).
pub const MAX_CODE: u8 = 15;

/// Encode 0-15 as an extended-hex digit. Larger values clamp to F.
pub fn ehex(value: u8) -> char {
    let value = value.min(MAX_CODE);
    char::from_digit(value as u32, 16)
        .map(|c| c.to_ascii_uppercase())
        .unwrap_or('F')
}

/// Decode an extended-hex digit (0-9, A-F).
pub fn from_ehex(c: char) -> Option<u8> {
    if c.is_ascii_lowercase() {
        return None;
    }
    c.to_digit(16).map(|d| d as u8)
}

/// Clamp a derived value into the encodable range.
pub fn clamp_code(value: i32) -> u8 {
    value.clamp(0, MAX_CODE as i32) as u8
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Uwp {
    pub starport: Starport,
    pub size: u8,
    pub atmosphere: u8,
    pub hydrographics: u8,
    pub population: u8,
    pub government: u8,
    pub law: u8,
    pub tech_level: u8,
}

impl Uwp {
    /// Copy with every digit clamped to 0-F.
    pub fn clamped(self) -> Self {
        Self {
            size: self.size.min(MAX_CODE),
            atmosphere: self.atmosphere.min(MAX_CODE),
            hydrographics: self.hydrographics.min(MAX_CODE),
            population: self.population.min(MAX_CODE),
            government: self.government.min(MAX_CODE),
            law: self.law.min(MAX_CODE),
            tech_level: self.tech_level.min(MAX_CODE),
            ..self
        }
    }
}

impl fmt::Display for Uwp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}{}{}{}{}-{}",
            self.starport.letter(),
            ehex(self.size),
            ehex(self.atmosphere),
            ehex(self.hydrographics),
            ehex(self.population),
            ehex(self.government),
            ehex(self.law),
            ehex(self.tech_level),
        )
    }
}

impl FromStr for Uwp {
    type Err = UwpParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != 9 {
            return Err(UwpParseError::Length(chars.len()));
        }
        let starport = Starport::from_letter(chars[0]).ok_or(UwpParseError::Starport(chars[0]))?;
        if chars[7] != '-' {
            return Err(UwpParseError::MissingHyphen);
        }
        let digit = |c: char| from_ehex(c).ok_or(UwpParseError::Digit(c));
        Ok(Self {
            starport,
            size: digit(chars[1])?,
            atmosphere: digit(chars[2])?,
            hydrographics: digit(chars[3])?,
            population: digit(chars[4])?,
            government: digit(chars[5])?,
            law: digit(chars[6])?,
            tech_level: digit(chars[8])?,
        })
    }
}

impl Serialize for Uwp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
