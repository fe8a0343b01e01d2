//! Satellite vehicle identification, as found in observation records
use gnss::prelude::{Constellation, SV};
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Errors related to [Sv] interpretation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("unknown constellation '{0}'")]
    UnknownConstellation(char),
    #[error("invalid satellite number \"{0}\"")]
    InvalidNumber(String),
}

/// [Sv] is the 3 character satellite identifier of an observation record:
/// one system letter followed by a 2 digit number.
/// Source bytes are stored verbatim: "G 9" remains "G 9"
/// and is only normalized when formatted.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Sv([u8; 3]);

impl Default for Sv {
    fn default() -> Self {
        Self(*b"G01")
    }
}

impl Sv {
    /// Builds a [Sv] from 3 raw bytes.
    /// V2 files may omit the system letter, that defaults to GPS.
    pub(crate) fn from_v2_bytes(bytes: &[u8]) -> Self {
        let mut raw = [b' '; 3];
        raw.copy_from_slice(&bytes[..3]);
        if raw[0] == b' ' {
            raw[0] = b'G';
        }
        Self(raw)
    }

    /// Builds a [Sv] from 3 raw bytes, copied as is.
    pub(crate) fn from_bytes(bytes: &[u8]) -> Self {
        let mut raw = [b' '; 3];
        raw.copy_from_slice(&bytes[..3]);
        Self(raw)
    }

    /// Returns source bytes, verbatim
    pub fn as_bytes(&self) -> &[u8; 3] {
        &self.0
    }

    /// Returns the system letter ('G', 'R', 'E'..)
    pub fn system(&self) -> char {
        self.0[0] as char
    }

    /// Returns the satellite number within its system
    pub fn number(&self) -> Result<u8, Error> {
        let digits = std::str::from_utf8(&self.0[1..]).unwrap_or("");
        digits
            .trim()
            .parse::<u8>()
            .map_err(|_| Error::InvalidNumber(digits.to_string()))
    }

    /// Returns the [Constellation] this vehicle belongs to
    pub fn constellation(&self) -> Result<Constellation, Error> {
        match self.system() {
            'G' => Ok(Constellation::GPS),
            'R' => Ok(Constellation::Glonass),
            'E' => Ok(Constellation::Galileo),
            'C' => Ok(Constellation::BeiDou),
            'J' => Ok(Constellation::QZSS),
            'I' => Ok(Constellation::IRNSS),
            'S' => Ok(Constellation::SBAS),
            c => Err(Error::UnknownConstellation(c)),
        }
    }

    /// Converts to [SV]
    pub fn to_gnss(&self) -> Result<SV, Error> {
        Ok(SV::new(self.constellation()?, self.number()?))
    }
}

impl std::fmt::Display for Sv {
    /// Formats as "XNN"
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self.number() {
            Ok(prn) => write!(f, "{}{:02}", self.system(), prn),
            Err(_) => write!(f, "{}", String::from_utf8_lossy(&self.0)),
        }
    }
}

impl std::fmt::Debug for Sv {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "Sv(\"{}\")", String::from_utf8_lossy(&self.0))
    }
}

impl std::str::FromStr for Sv {
    type Err = Error;
    /// Parses "XNN" or "X N" descriptors.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != 3 {
            return Err(Error::InvalidNumber(s.to_string()));
        }
        let sv = Self::from_bytes(bytes);
        sv.number()?;
        Ok(sv)
    }
}
