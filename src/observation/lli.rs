//! Loss of lock indicator (LLI) bits
use bitflags::bitflags;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

bitflags! {
    #[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd)]
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    pub struct LliFlags: u8 {
        /// Blank or 0: tracking ok, or not reported
        const OK_OR_UNKNOWN = 0x00;
        /// Bit 0: receiver lost lock since the previous epoch
        const LOCK_LOSS = 0x01;
        /// Bit 1: phase may be off by half a cycle
        const HALF_CYCLE_SLIP = 0x02;
        /// Bit 2: tracked with anti spoofing on
        const UNDER_ANTI_SPOOFING = 0x04;
    }
}
