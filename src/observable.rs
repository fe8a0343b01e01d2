//! Observation type codes
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Measurement category, as encoded by the first letter
/// of an [Observable] code.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ObservableKind {
    /// Pseudo range ('C' or V2 'P')
    PseudoRange,
    /// Carrier phase ('L')
    Phase,
    /// Doppler shift ('D')
    Doppler,
    /// Raw signal strength ('S')
    SignalStrength,
    /// Ionospheric phase delay ('I')
    Ionosphere,
    /// Receiver channel number ('X')
    Channel,
    /// Anything else
    Unknown,
}

/// [Observable] is one entry of the observation types catalog:
/// a 2 (V2) or 3 (V3) character code naming the measurement kind,
/// frequency band and (V3 only) tracking attribute, like "L1" or "C1C".
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Observable([u8; 3]);

impl Observable {
    /// Builds a V2 [Observable] from its 2 letter code
    pub(crate) fn from_v2_bytes(bytes: &[u8]) -> Self {
        Self([bytes[0], bytes[1], b' '])
    }

    /// Builds a V3 [Observable] from its 3 letter code
    pub(crate) fn from_v3_bytes(bytes: &[u8]) -> Self {
        Self([bytes[0], bytes[1], bytes[2]])
    }

    /// Returns the code, without trailing whitespace
    pub fn code(&self) -> &str {
        std::str::from_utf8(&self.0).unwrap_or("").trim_end()
    }

    /// Returns the measurement category
    pub fn kind(&self) -> ObservableKind {
        match self.0[0] {
            b'C' | b'P' => ObservableKind::PseudoRange,
            b'L' => ObservableKind::Phase,
            b'D' => ObservableKind::Doppler,
            b'S' => ObservableKind::SignalStrength,
            b'I' => ObservableKind::Ionosphere,
            b'X' => ObservableKind::Channel,
            _ => ObservableKind::Unknown,
        }
    }

    /// Returns the frequency band number (1 for L1/E1/B1..)
    pub fn band(&self) -> Option<u8> {
        match self.0[1] {
            b'0'..=b'9' => Some(self.0[1] - b'0'),
            _ => None,
        }
    }

    /// Returns the tracking mode / channel attribute (V3 only)
    pub fn attribute(&self) -> Option<char> {
        match self.0[2] {
            b' ' => None,
            c => Some(c as char),
        }
    }

    /// Returns true for pseudo range codes
    pub fn is_pseudo_range(&self) -> bool {
        self.kind() == ObservableKind::PseudoRange
    }

    /// Returns true for carrier phase codes
    pub fn is_phase(&self) -> bool {
        self.kind() == ObservableKind::Phase
    }

    /// Returns true for doppler codes
    pub fn is_doppler(&self) -> bool {
        self.kind() == ObservableKind::Doppler
    }

    /// Returns true for raw signal strength codes
    pub fn is_signal_strength(&self) -> bool {
        self.kind() == ObservableKind::SignalStrength
    }
}

impl std::fmt::Display for Observable {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::fmt::Debug for Observable {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "Observable(\"{}\")", self.code())
    }
}

impl std::str::FromStr for Observable {
    type Err = crate::error::ParsingError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.len() {
            2 => Ok(Self::from_v2_bytes(trimmed.as_bytes())),
            3 => Ok(Self::from_v3_bytes(trimmed.as_bytes())),
            _ => Err(crate::error::ParsingError::FieldParsing {
                field: "observable",
                content: s.to_string(),
            }),
        }
    }
}
