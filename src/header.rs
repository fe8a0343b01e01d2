//! Header dispatcher: label table and the handlers
//! of the header lines that drive the parser
use std::collections::HashMap;
use std::str::FromStr;

use hifitime::TimeScale;

use crate::{
    catalog::{Catalog, UNIVERSAL_SYSTEM},
    error::ParsingError,
    framer::{column, columns, parse_unsigned},
    observable::Observable,
    version::Version,
};

#[cfg(feature = "log")]
use log::debug;

/// Header labels start at this column
pub(crate) const LABEL_COLUMN: usize = 60;

/// Header labels that require special treatment
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub(crate) enum Label {
    /// "RINEX VERSION / TYPE"
    VersionType,
    /// "END OF HEADER"
    EndOfHeader,
    /// "TIME OF FIRST OBS"
    TimeOfFirstObs,
    /// "# / TYPES OF OBSERV" (RINEX2)
    TypesOfObserv,
    /// "SYS / # / OBS TYPES" (RINEX3)
    SysObsTypes,
}

lazy_static! {
    /// Known labels, as 20 character fields
    static ref LABELS: HashMap<&'static str, Label> = {
        let mut labels = HashMap::with_capacity(5);
        labels.insert("RINEX VERSION / TYPE", Label::VersionType);
        labels.insert("END OF HEADER       ", Label::EndOfHeader);
        labels.insert("TIME OF FIRST OBS   ", Label::TimeOfFirstObs);
        labels.insert("# / TYPES OF OBSERV ", Label::TypesOfObserv);
        labels.insert("SYS / # / OBS TYPES ", Label::SysObsTypes);
        labels
    };
}

impl Label {
    /// Identifies a label field. Trailing whitespaces are significant.
    pub fn from_field(field: &str) -> Option<Self> {
        LABELS.get(field).copied()
    }
}

/// Splits a header line into (value, label) fields
pub(crate) fn split(line: &str) -> (&str, &str) {
    line.split_at(LABEL_COLUMN.min(line.len()))
}

/// Catalog declaration that spans over continuation lines
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
struct Declaration {
    system: char,
    /// codes still expected
    remaining: usize,
    /// declarations of complete entries are consumed but not applied
    discard: bool,
}

/// V2 codes per "# / TYPES OF OBSERV" line
const V2_CODES_PER_LINE: usize = 9;
/// V3 codes per "SYS / # / OBS TYPES" line
const V3_CODES_PER_LINE: usize = 13;

/// Parser state that header lines may modify
#[derive(Debug, Clone, Default)]
pub(crate) struct Header {
    /// Negotiated revision
    pub version: Option<Version>,
    /// Observation types catalog
    pub catalog: Catalog,
    /// Time system declared in "TIME OF FIRST OBS"
    pub timescale: Option<TimeScale>,
    /// Carried four digit year (RINEX2)
    pub year: u16,
    declaration: Option<Declaration>,
}

impl Header {
    /// Builds a new [Header] with this initial carried year
    pub fn new(year: u16) -> Self {
        Self {
            year,
            ..Default::default()
        }
    }

    /// Returns the major version number, if already known
    pub fn major(&self) -> Option<u8> {
        self.version.map(|v| v.major)
    }

    /// Applies a recognized header line
    pub fn handle(&mut self, label: Label, value: &str) -> Result<(), ParsingError> {
        match label {
            Label::VersionType => self.parse_version_type(value),
            Label::EndOfHeader => {
                #[cfg(feature = "log")]
                debug!("end of header: {}", self.catalog);
                Ok(())
            },
            Label::TimeOfFirstObs => self.parse_time_of_first_obs(value),
            Label::TypesOfObserv if self.major() == Some(2) => self.parse_v2_catalog(value),
            Label::SysObsTypes if self.major() == Some(3) => self.parse_v3_catalog(value),
            _ => Ok(()),
        }
    }

    fn parse_version_type(&mut self, value: &str) -> Result<(), ParsingError> {
        let version = Version::from_str(columns(value, 0, 9)?)?;
        match column(value, 20)? {
            b'O' => {},
            c => return Err(ParsingError::NotObservationData(c as char)),
        }

        #[cfg(feature = "log")]
        debug!("rinex revision: {}", version);

        self.version = Some(version);
        Ok(())
    }

    fn parse_time_of_first_obs(&mut self, value: &str) -> Result<(), ParsingError> {
        if self.major() == Some(2) {
            self.year = parse_unsigned(columns(value, 0, 6)?, "year")?;
        }

        // unknown time systems are not an error
        if let Some(timescale) = parse_timescale(columns(value, 48, 51)?.trim()) {
            self.timescale = Some(timescale);
        }
        Ok(())
    }

    fn parse_v2_catalog(&mut self, value: &str) -> Result<(), ParsingError> {
        let declaration = match self.declaration {
            Some(declaration) => declaration,
            None => self.declare(UNIVERSAL_SYSTEM, columns(value, 0, 6)?)?,
        };
        self.parse_codes(declaration, V2_CODES_PER_LINE, |index| {
            let start = 10 + 6 * index;
            columns(value, start, start + 2)
        })
    }

    fn parse_v3_catalog(&mut self, value: &str) -> Result<(), ParsingError> {
        let declaration = match self.declaration {
            Some(declaration) => declaration,
            None => {
                let system = column(value, 0)? as char;
                self.declare(system, columns(value, 3, 6)?)?
            },
        };
        self.parse_codes(declaration, V3_CODES_PER_LINE, |index| {
            let start = 7 + 4 * index;
            columns(value, start, start + 3)
        })
    }

    /// Opens a new catalog declaration
    fn declare(&mut self, system: char, count: &str) -> Result<Declaration, ParsingError> {
        let declared = count
            .trim()
            .parse::<usize>()
            .map_err(|_| ParsingError::ObservablesCount(count.trim().to_string()))?;

        let discard = !self.catalog.declare(system, declared);

        if discard {
            #[cfg(feature = "log")]
            debug!("'{}' observables already declared", system);
        }

        Ok(Declaration {
            system,
            remaining: declared,
            discard,
        })
    }

    /// Reads up to `per_line` codes, stopping on the first blank slot
    fn parse_codes<'a, F>(
        &mut self,
        mut declaration: Declaration,
        per_line: usize,
        slot: F,
    ) -> Result<(), ParsingError>
    where
        F: Fn(usize) -> Result<&'a str, ParsingError>,
    {
        for index in 0..per_line.min(declaration.remaining) {
            let code = slot(index)?;
            if code.trim().is_empty() {
                break;
            }
            if !declaration.discard {
                let observable = if code.len() == 2 {
                    Observable::from_v2_bytes(code.as_bytes())
                } else {
                    Observable::from_v3_bytes(code.as_bytes())
                };
                self.catalog.push(declaration.system, observable);
            }
            declaration.remaining -= 1;
        }

        if declaration.remaining == 0 {
            #[cfg(feature = "log")]
            debug!(
                "'{}' observables: {:?}",
                declaration.system,
                self.catalog.observables(declaration.system)
            );
            self.declaration = None;
        } else {
            self.declaration = Some(declaration);
        }
        Ok(())
    }
}

/// Identifies the time system of "TIME OF FIRST OBS"
fn parse_timescale(system: &str) -> Option<TimeScale> {
    match system {
        "" => None,
        "GPS" | "QZS" => Some(TimeScale::GPST),
        "GAL" => Some(TimeScale::GST),
        "BDT" => Some(TimeScale::BDT),
        "GLO" | "UTC" => Some(TimeScale::UTC),
        "TAI" => Some(TimeScale::TAI),
        _ => TimeScale::from_str(system).ok(),
    }
}
