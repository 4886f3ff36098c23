use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Boltzmann constant k_B in J/K (2019 SI exact value).
pub const BOLTZMANN: f64 = 1.380649e-23;

/// The noble-gas species the ensemble supports.
///
/// The set is closed: an unknown species is a parse-time error at the
/// Python boundary, never a runtime lookup failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Species {
    Helium,
    Neon,
    Argon,
    Krypton,
}

/// Display color tag for a species, consumed by the plotting layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Green,
    Blue,
    Purple,
}

impl Species {
    /// All species, in display/legend order.
    pub const ALL: [Species; 4] = [
        Species::Helium,
        Species::Neon,
        Species::Argon,
        Species::Krypton,
    ];

    /// Atomic mass in kilograms.
    #[inline]
    pub fn mass(self) -> f64 {
        match self {
            Species::Helium => 6.646476441e-27,
            Species::Neon => 3.350862993e-26,
            Species::Argon => 6.633520904e-26,
            Species::Krypton => 1.391578832e-25,
        }
    }

    /// Color this species is drawn with.
    #[inline]
    pub fn color(self) -> Color {
        match self {
            Species::Helium => Color::Red,
            Species::Neon => Color::Green,
            Species::Argon => Color::Blue,
            Species::Krypton => Color::Purple,
        }
    }

    /// Lowercase species tag, the same spelling `FromStr` accepts.
    #[inline]
    pub fn name(self) -> &'static str {
        match self {
            Species::Helium => "helium",
            Species::Neon => "neon",
            Species::Argon => "argon",
            Species::Krypton => "krypton",
        }
    }
}

impl Color {
    /// Lowercase color tag understood by matplotlib and friends.
    #[inline]
    pub fn as_str(self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Green => "green",
            Color::Blue => "blue",
            Color::Purple => "purple",
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Species {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "helium" => Ok(Species::Helium),
            "neon" => Ok(Species::Neon),
            "argon" => Ok(Species::Argon),
            "krypton" => Ok(Species::Krypton),
            other => Err(Error::InvalidSpecies(other.to_string())),
        }
    }
}
