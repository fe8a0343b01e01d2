//! `RINEX` revision description
use crate::error::ParsingError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Version is the revision negotiated from the "RINEX VERSION / TYPE" header.
/// `major` is the declared version rounded to the nearest integer,
/// which selects the record decoder.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Version {
    /// Version major number
    pub major: u8,
    /// Version minor number (hundredths), as declared
    pub minor: u8,
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}.{:02}", self.major, self.minor)
    }
}

impl From<Version> for (u8, u8) {
    fn from(v: Version) -> (u8, u8) {
        (v.major, v.minor)
    }
}

impl std::str::FromStr for Version {
    type Err = ParsingError;
    /// Parses a "RINEX VERSION / TYPE" version field, like "     2.11".
    /// Only revisions 2 and 3 are supported.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let value = trimmed
            .parse::<f64>()
            .map_err(|_| ParsingError::VersionParsing(trimmed.to_string()))?;

        let major = value.round();
        if major != 2.0 && major != 3.0 {
            return Err(ParsingError::NonSupportedVersion(trimmed.to_string()));
        }

        let minor = match trimmed.split_once('.') {
            Some((int, frac)) if int.parse::<f64>().ok() == Some(major) => {
                let frac = frac.get(..2.min(frac.len())).unwrap_or("");
                format!("{:0<2}", frac).parse::<u8>().unwrap_or(0)
            },
            _ => 0,
        };

        Ok(Self {
            major: major as u8,
            minor,
        })
    }
}

impl Version {
    /// Builds a new [Version]
    pub fn new(major: u8, minor: u8) -> Self {
        Self { major, minor }
    }
}
