//! RINEX3 observation records
use crate::{
    catalog::Catalog,
    epoch::{parse_v3_timestamp, EpochFlag},
    error::ParsingError,
    framer::{
        column, column_or_blank, columns, columns_or_blank, parse_digit, parse_float,
        parse_unsigned,
    },
    observation::{Observation, ObservationRecord, Progress},
    sv::Sv,
};

#[cfg(feature = "log")]
use log::trace;

/// First column of any intro line
const EPOCH_MARKER: u8 = b'>';

const FLAG_COLUMN: usize = 31;
const NUM_SAT: (usize, usize) = (32, 35);
const CLOCK_OFFSET: (usize, usize) = (41, 56);

const SV_WIDTH: usize = 3;
const OBS_WIDTH: usize = 16;
/// Width of the value, within one observation field
const VALUE_WIDTH: usize = 14;

/// RINEX3 record decoder: one intro line, then one line per satellite.
#[derive(Debug, Default)]
pub(crate) struct Decoder {
    /// Satellites declared by the intro line
    num_sat: usize,
    /// Satellite lines still expected
    pending: usize,
}

impl Decoder {
    /// Consumes one data line
    pub fn decode(
        &mut self,
        line: &str,
        catalog: &Catalog,
        record: &mut ObservationRecord,
    ) -> Result<Progress, ParsingError> {
        if column(line, 0)? == EPOCH_MARKER {
            self.parse_intro(line, record)
        } else {
            self.parse_satellite(line, catalog, record)
        }
    }

    fn parse_intro(
        &mut self,
        line: &str,
        record: &mut ObservationRecord,
    ) -> Result<Progress, ParsingError> {
        if self.pending > 0 {
            return Err(ParsingError::IncompleteEpoch {
                expected: self.num_sat,
                found: self.num_sat - self.pending,
            });
        }

        let flag = EpochFlag::from_column(column(line, FLAG_COLUMN)?)?;
        let count = parse_unsigned::<usize>(
            columns(line, NUM_SAT.0, NUM_SAT.1)?,
            "number of satellites",
        )?;

        record.reset(flag);
        parse_v3_timestamp(line, flag, record)?;

        if flag.is_event() {
            return Ok(Progress::Event(count));
        }

        if line.len() >= CLOCK_OFFSET.1 {
            let offset = columns(line, CLOCK_OFFSET.0, CLOCK_OFFSET.1)?;
            if !offset.trim().is_empty() {
                record.clock_offset = parse_float(offset, "clock offset")?;
            }
        }

        if count == 0 {
            return Ok(Progress::Complete);
        }

        #[cfg(feature = "log")]
        trace!("{:?} epoch: {} satellites", flag, count);

        self.num_sat = count;
        self.pending = count;
        record.reserve(count);
        Ok(Progress::Pending)
    }

    fn parse_satellite(
        &mut self,
        line: &str,
        catalog: &Catalog,
        record: &mut ObservationRecord,
    ) -> Result<Progress, ParsingError> {
        if self.pending == 0 {
            return Err(ParsingError::UnexpectedSatellite);
        }

        let sv = Sv::from_bytes(columns(line, 0, SV_WIDTH)?.as_bytes());
        let observables = catalog
            .observables(sv.system())
            .ok_or(ParsingError::UnknownSystem(sv.system()))?;

        let satellite = record.push_satellite(sv);
        for index in 0..observables.len() {
            let start = SV_WIDTH + index * OBS_WIDTH;
            satellite
                .observations
                .push(parse_observation(line, start)?);
        }

        self.pending -= 1;
        if self.pending == 0 {
            Ok(Progress::Complete)
        } else {
            Ok(Progress::Pending)
        }
    }
}

/// Decodes the observation field starting at this column.
/// Trailing fields may be omitted, in which case they are blank.
fn parse_observation(line: &str, start: usize) -> Result<Observation, ParsingError> {
    let value = columns_or_blank(line, start, start + VALUE_WIDTH);
    let value = if value.trim().is_empty() {
        0.0
    } else {
        parse_float(value, "observation")?
    };
    Ok(Observation {
        value,
        lli: parse_digit(column_or_blank(line, start + VALUE_WIDTH), "lli")?,
        ssi: parse_digit(column_or_blank(line, start + VALUE_WIDTH + 1), "ssi")?,
    })
}
