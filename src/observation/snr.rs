//! Signal strength indication
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Signal to noise ratio range, as projected onto
/// the single digit signal strength indicator.
#[derive(Default, PartialOrd, Ord, PartialEq, Eq, Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SNR {
    /// SNR < 12 dB/Hz
    DbHz12,
    /// 12 dB/Hz <= SNR < 17 dB/Hz
    DbHz12_17,
    /// 18 dB/Hz <= SNR < 23 dB/Hz
    DbHz18_23,
    /// 24 dB/Hz <= SNR < 29 dB/Hz
    #[default]
    DbHz24_29,
    /// 30 dB/Hz <= SNR < 35 dB/Hz
    DbHz30_35,
    /// 36 dB/Hz <= SNR < 41 dB/Hz
    DbHz36_41,
    /// 42 dB/Hz <= SNR < 47 dB/Hz
    DbHz42_47,
    /// 48 dB/Hz <= SNR < 53 dB/Hz
    DbHz48_53,
    /// SNR >= 54 dB/Hz
    DbHz54,
}

impl std::fmt::LowerExp for SNR {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let descriptor = match self {
            Self::DbHz12 => "< 12 dB",
            Self::DbHz12_17 => "[12, 17[ dB",
            Self::DbHz18_23 => "[18, 23[ dB",
            Self::DbHz24_29 => "[24, 29[ dB",
            Self::DbHz30_35 => "[30, 35[ dB",
            Self::DbHz36_41 => "[36, 41[ dB",
            Self::DbHz42_47 => "[42, 47[ dB",
            Self::DbHz48_53 => "[48, 53[ dB",
            Self::DbHz54 => "> 54 dB",
        };
        f.write_str(descriptor)
    }
}

impl SNR {
    /// Interprets a signal strength indicator.
    /// 0 (blank) means unknown.
    pub fn from_indicator(ssi: u8) -> Option<Self> {
        match ssi {
            1 => Some(Self::DbHz12),
            2 => Some(Self::DbHz12_17),
            3 => Some(Self::DbHz18_23),
            4 => Some(Self::DbHz24_29),
            5 => Some(Self::DbHz30_35),
            6 => Some(Self::DbHz36_41),
            7 => Some(Self::DbHz42_47),
            8 => Some(Self::DbHz48_53),
            9 => Some(Self::DbHz54),
            _ => None,
        }
    }
    /// Returns true if self describes a bad signal level
    pub fn bad(self) -> bool {
        self <= SNR::DbHz18_23
    }
    /// Returns true if `self` describes a weak signal level
    pub fn weak(self) -> bool {
        self < SNR::DbHz30_35
    }
    /// Returns true if `self` describes a strong signal level, defined in standard specifications
    pub fn strong(self) -> bool {
        self >= SNR::DbHz30_35
    }
    /// Returns true if `self` is a very strong signal level
    pub fn excellent(self) -> bool {
        self > SNR::DbHz42_47
    }
}
