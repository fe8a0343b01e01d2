use crate::error::ParsingError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// `EpochFlag` validates an epoch,
/// or describes possible events that occurred
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EpochFlag {
    /// Epoch is sane
    #[default]
    Ok,
    /// Power failure since previous epoch
    PowerFailure,
    /// Antenna is being moved at current epoch
    AntennaBeingMoved,
    /// Site has changed, received has moved since last epoch
    NewSiteOccupation,
    /// New header information follows this epoch
    HeaderInformationFollows,
    /// External event - significant event in this epoch
    ExternalEvent,
    /// Cycle slip records: observations are slip corrections
    CycleSlip,
}

impl EpochFlag {
    /// Returns True if self is a valid epoch
    pub fn is_ok(self) -> bool {
        self == Self::Ok
    }

    /// Returns true if satellite observations follow this epoch line
    pub fn has_signals(self) -> bool {
        matches!(self, Self::Ok | Self::PowerFailure | Self::CycleSlip)
    }

    /// Returns true for special events (2 to 5), followed by header lines
    pub fn is_event(self) -> bool {
        !self.has_signals()
    }

    /// Returns true if this epoch must carry a timestamp
    pub fn requires_timestamp(self) -> bool {
        matches!(self, Self::Ok | Self::PowerFailure)
    }

    /// Returns the numerical flag value
    pub fn value(self) -> u8 {
        match self {
            Self::Ok => 0,
            Self::PowerFailure => 1,
            Self::AntennaBeingMoved => 2,
            Self::NewSiteOccupation => 3,
            Self::HeaderInformationFollows => 4,
            Self::ExternalEvent => 5,
            Self::CycleSlip => 6,
        }
    }

    /// Identifies the flag from its column content
    pub(crate) fn from_column(c: u8) -> Result<Self, ParsingError> {
        match c {
            b'0' => Ok(Self::Ok),
            b'1' => Ok(Self::PowerFailure),
            b'2' => Ok(Self::AntennaBeingMoved),
            b'3' => Ok(Self::NewSiteOccupation),
            b'4' => Ok(Self::HeaderInformationFollows),
            b'5' => Ok(Self::ExternalEvent),
            b'6' => Ok(Self::CycleSlip),
            _ => Err(ParsingError::EpochFlagParsing(c as char)),
        }
    }
}

impl std::str::FromStr for EpochFlag {
    type Err = ParsingError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.as_bytes() {
            [c] => Self::from_column(*c),
            _ => Err(ParsingError::EpochFlagParsing(s.chars().next().unwrap_or(' '))),
        }
    }
}

impl std::fmt::Display for EpochFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.value())
    }
}
