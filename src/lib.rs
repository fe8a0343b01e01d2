#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

/*
 * rinex-stream is part of the rtk-rs framework.
 * Authors: Guillaume W. Bres <guillaume.bressaix@gmail.com> et al.
 * This framework is shipped under Mozilla Public V2 license.
 *
 * Documentation: https://github.com/rtk-rs/rinex-stream
 */

extern crate gnss_rs as gnss;

#[macro_use]
extern crate lazy_static;

pub mod catalog;
pub mod epoch;
pub mod error;
pub mod observable;
pub mod observation;
pub mod reader;
pub mod sv;
pub mod version;

mod framer;
mod header;

#[cfg(test)]
mod tests;

use std::io::BufRead;

use crate::{catalog::Catalog, error::Error, observation::ObservationRecord, reader::ObsReader};

/// Package to include all basic structures
pub mod prelude {
    pub use crate::{
        catalog::{Catalog, UNIVERSAL_SYSTEM},
        epoch::EpochFlag,
        error::{Error, ParsingError},
        observable::{Observable, ObservableKind},
        observation::{LliFlags, Observation, ObservationRecord, SatelliteObservation, SNR},
        reader::ObsReader,
        sv::Sv,
        version::Version,
    };

    // pub re-export
    pub use gnss::prelude::{Constellation, SV};
    pub use hifitime::{Duration, Epoch, TimeScale};
}

/// Parses an Observation RINEX stream in one go.
/// Use [ObsReader] directly to inspect the negotiated
/// version and the observation types once parsing is over.
pub fn parse<R, E, H, O>(reader: R, on_header: H, on_record: O) -> Result<(), Error<E>>
where
    R: BufRead,
    H: FnMut(&str, &str) -> Result<(), E>,
    O: FnMut(&ObservationRecord, &Catalog) -> Result<(), E>,
{
    ObsReader::default().parse(reader, on_header, on_record)
}
