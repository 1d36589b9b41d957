//! Defines the station kinds served by the API and the time frequency (granularity)
//! used both for queries and for chart aggregation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The two families of INMET weather stations.
///
/// Automatic stations report hourly sensor readings with instantaneous/max/min
/// triplets. Manual (conventional) stations are read by an observer and report a
/// coarser, differently-named field set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StationType {
    #[serde(rename = "automaticas")]
    Automatic,
    #[serde(rename = "manuais")]
    Manual,
}

impl StationType {
    /// The API name of this station type, which is also the path segment of its
    /// station list endpoint (`automaticas/`, `manuais/`).
    pub fn path_segment(&self) -> &'static str {
        match self {
            StationType::Automatic => "automaticas",
            StationType::Manual => "manuais",
        }
    }
}

impl fmt::Display for StationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path_segment())
    }
}

/// Error returned when a string is not a known station type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unrecognized station type '{0}'")]
pub struct ParseStationTypeError(pub String);

impl FromStr for StationType {
    type Err = ParseStationTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "automaticas" | "automatic" => Ok(StationType::Automatic),
            "manuais" | "manual" => Ok(StationType::Manual),
            _ => Err(ParseStationTypeError(s.to_string())),
        }
    }
}

/// Represents the time frequency or granularity of the weather data.
///
/// The same enum drives the `frequencia` query parameter sent to the API and the
/// bucket size used when aggregating chart points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Frequency {
    /// One record per hour. Only automatic stations report at this frequency.
    #[serde(rename = "horario")]
    Hourly,
    /// One record (or bucket) per calendar day.
    #[serde(rename = "diario")]
    Daily,
    /// One bucket per week, weeks starting on Sunday.
    #[serde(rename = "semanal")]
    Weekly,
    /// One bucket per calendar month.
    #[serde(rename = "mensal")]
    Monthly,
}

impl Frequency {
    /// The value expected by the `frequencia` field of the interval endpoint.
    pub fn api_name(&self) -> &'static str {
        match self {
            Frequency::Hourly => "horario",
            Frequency::Daily => "diario",
            Frequency::Weekly => "semanal",
            Frequency::Monthly => "mensal",
        }
    }
}

/// Allows formatting a `Frequency` variant using its API name.
///
/// # Examples
///
/// ```
/// use inmet::Frequency;
///
/// assert_eq!(format!("{}", Frequency::Hourly), "horario");
/// assert_eq!(Frequency::Monthly.to_string(), "mensal");
/// ```
impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.api_name())
    }
}

/// Error returned when a string is not a known frequency.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unrecognized frequency '{0}'")]
pub struct ParseFrequencyError(pub String);

/// Parses either the API name (`horario`) or the English name (`hourly`).
impl FromStr for Frequency {
    type Err = ParseFrequencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "horario" | "hourly" => Ok(Frequency::Hourly),
            "diario" | "daily" => Ok(Frequency::Daily),
            "semanal" | "weekly" => Ok(Frequency::Weekly),
            "mensal" | "monthly" => Ok(Frequency::Monthly),
            _ => Err(ParseFrequencyError(s.to_string())),
        }
    }
}
