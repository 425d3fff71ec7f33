use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use crate::error::ModelError;

/// Physical carrier of a catalogued title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MediaFormat {
    #[cfg_attr(feature = "serde", serde(rename = "DVD"))]
    Dvd,
    #[cfg_attr(feature = "serde", serde(rename = "Blu-ray"))]
    BluRay,
    #[cfg_attr(feature = "serde", serde(rename = "VHS"))]
    Vhs,
}

impl MediaFormat {
    pub fn all() -> &'static [MediaFormat] {
        use MediaFormat::*;
        &[Dvd, BluRay, Vhs]
    }

    /// Canonical label, also used as the stored column value.
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaFormat::Dvd => "DVD",
            MediaFormat::BluRay => "Blu-ray",
            MediaFormat::Vhs => "VHS",
        }
    }
}

impl Display for MediaFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MediaFormat {
    type Err = ModelError;

    /// Matches the canonical labels exactly; filter values arrive verbatim
    /// from the query string and are compared case-sensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MediaFormat::all()
            .iter()
            .copied()
            .find(|format| format.as_str() == s)
            .ok_or_else(|| ModelError::InvalidFormat(s.to_string()))
    }
}

/// Top-level catalog category. Only films are browsable through the query
/// engine; other categories are stored but never returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MediaCategory {
    #[default]
    Film,
    #[cfg_attr(feature = "serde", serde(rename = "TV"))]
    Tv,
}

impl MediaCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaCategory::Film => "Film",
            MediaCategory::Tv => "TV",
        }
    }
}

impl Display for MediaCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MediaCategory {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Film" => Ok(MediaCategory::Film),
            "TV" => Ok(MediaCategory::Tv),
            other => Err(ModelError::InvalidCategory(other.to_string())),
        }
    }
}
