//! Observation RINEX records and their decoders
mod lli;
mod record;
mod snr;

pub(crate) mod v2;
pub(crate) mod v3;

pub use lli::LliFlags;
pub use record::{Observation, ObservationRecord, SatelliteObservation};
pub use snr::SNR;

/// Decoder status after consuming one data line
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum Progress {
    /// Current epoch needs more lines
    Pending,
    /// Current epoch is complete and may be emitted
    Complete,
    /// A special event was decoded and may be emitted.
    /// This many following lines are header lines.
    Event(usize),
}
