//! RINEX2 observation records
use crate::{
    catalog::Catalog,
    epoch::{parse_v2_timestamp, EpochFlag},
    error::ParsingError,
    framer::{column, columns, parse_digit, parse_float, parse_unsigned},
    observation::{Observation, ObservationRecord, Progress},
    sv::Sv,
};

#[cfg(feature = "log")]
use log::trace;

const FLAG_COLUMN: usize = 28;
const NUM_SAT: (usize, usize) = (29, 32);
const CLOCK_OFFSET: (usize, usize) = (68, 80);

/// PRN list starts at this column, on intro and continuation lines
const PRN_OFFSET: usize = 32;
const PRN_WIDTH: usize = 3;
const PRN_PER_LINE: usize = 12;

const OBS_WIDTH: usize = 16;
const OBS_PER_LINE: usize = 5;

/// Offset of the decimal point, within one observation field
const DECIMAL_POINT: usize = 10;

/// Type of line the decoder expects next
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub(crate) enum LineState {
    /// New epoch or event
    #[default]
    Intro,
    /// PRN list continuation
    Prn,
    /// Observations of nth satellite, starting at given observable
    Observations { sv: usize, obs: usize },
}

/// RINEX2 record decoder: reconstructs one epoch from
/// one or more 80 column lines.
#[derive(Debug, Default)]
pub(crate) struct Decoder {
    state: LineState,
    /// Number of satellites declared by the intro line
    num_sat: usize,
}

impl Decoder {
    /// Current [LineState]
    #[cfg(test)]
    pub fn state(&self) -> LineState {
        self.state
    }

    /// Consumes one framed data line.
    /// `carried` is the running four digit year.
    pub fn decode(
        &mut self,
        line: &str,
        carried: &mut u16,
        catalog: &Catalog,
        record: &mut ObservationRecord,
    ) -> Result<Progress, ParsingError> {
        match self.state {
            LineState::Intro => self.parse_intro(line, carried, catalog, record),
            LineState::Prn => self.parse_prns(line, record),
            LineState::Observations { sv, obs } => {
                self.parse_observations(line, sv, obs, catalog, record)
            },
        }
    }

    fn parse_intro(
        &mut self,
        line: &str,
        carried: &mut u16,
        catalog: &Catalog,
        record: &mut ObservationRecord,
    ) -> Result<Progress, ParsingError> {
        let flag = EpochFlag::from_column(column(line, FLAG_COLUMN)?)?;
        let count = parse_unsigned::<usize>(
            columns(line, NUM_SAT.0, NUM_SAT.1)?,
            "number of satellites",
        )?;

        record.reset(flag);
        parse_v2_timestamp(line, flag, carried, record)?;

        if flag.is_event() {
            return Ok(Progress::Event(count));
        }

        if column(line, CLOCK_OFFSET.1 - 1)? != b' ' {
            record.clock_offset = parse_float(
                columns(line, CLOCK_OFFSET.0, CLOCK_OFFSET.1)?,
                "clock offset",
            )?;
        }

        if count == 0 {
            return Ok(Progress::Complete);
        }

        let num_observables = catalog.universal().map(|obs| obs.len()).unwrap_or(0);
        if num_observables == 0 {
            return Err(ParsingError::MissingObservables);
        }

        #[cfg(feature = "log")]
        trace!("{:?} epoch: {} satellites", flag, count);

        self.num_sat = count;
        record.reserve(count);

        // first PRNs are on the intro line itself
        self.parse_prns(line, record)
    }

    fn parse_prns(
        &mut self,
        line: &str,
        record: &mut ObservationRecord,
    ) -> Result<Progress, ParsingError> {
        for i in 0..PRN_PER_LINE {
            if record.num_satellites() == self.num_sat {
                break;
            }
            let start = PRN_OFFSET + i * PRN_WIDTH;
            let prn = columns(line, start, start + PRN_WIDTH)?.as_bytes();
            if prn[2] == b' ' {
                return Err(ParsingError::PrnListTerminatedEarly {
                    expected: self.num_sat,
                    found: record.num_satellites(),
                });
            }
            record.push_satellite(Sv::from_v2_bytes(prn));
        }

        self.state = if record.num_satellites() == self.num_sat {
            LineState::Observations { sv: 0, obs: 0 }
        } else {
            LineState::Prn
        };

        Ok(Progress::Pending)
    }

    fn parse_observations(
        &mut self,
        line: &str,
        sv: usize,
        obs: usize,
        catalog: &Catalog,
        record: &mut ObservationRecord,
    ) -> Result<Progress, ParsingError> {
        let num_observables = catalog.universal().map(|obs| obs.len()).unwrap_or(0);
        let satellite = record
            .satellite_mut(sv)
            .ok_or(ParsingError::UnexpectedSatellite)?;

        let count = num_observables.saturating_sub(obs).min(OBS_PER_LINE);
        for i in 0..count {
            let field = columns(line, i * OBS_WIDTH, (i + 1) * OBS_WIDTH)?;
            satellite.observations.push(parse_observation(field)?);
        }

        let obs = obs + count;
        if obs < num_observables {
            self.state = LineState::Observations { sv, obs };
            return Ok(Progress::Pending);
        }

        let sv = sv + 1;
        if sv < self.num_sat {
            self.state = LineState::Observations { sv, obs: 0 };
            Ok(Progress::Pending)
        } else {
            self.state = LineState::Intro;
            Ok(Progress::Complete)
        }
    }
}

/// Decodes one 16 column observation field.
/// The value is only present when the decimal point sits at its fixed offset.
fn parse_observation(field: &str) -> Result<Observation, ParsingError> {
    let bytes = field.as_bytes();
    let value = if bytes[DECIMAL_POINT] == b'.' {
        parse_float(&field[..14], "observation")?
    } else {
        0.0
    };
    Ok(Observation {
        value,
        lli: parse_digit(bytes[14], "lli")?,
        ssi: parse_digit(bytes[15], "ssi")?,
    })
}
