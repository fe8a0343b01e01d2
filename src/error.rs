use thiserror::Error;

use crate::epoch::EpochFlag;

/// Errors that may rise while decoding a RINEX Observation stream.
/// Any of them is fatal to the current parse call: fixed column
/// formats cannot be resynchronized once misaligned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParsingError {
    /// Line is wider than this mode allows
    #[error("line exceeds {0} columns")]
    LineTooLong(usize),
    /// Line is too short to contain the requested column(s)
    #[error("line too short: column #{0} does not exist")]
    LineTooShort(usize),
    /// Invalid "RINEX VERSION / TYPE" content
    #[error("failed to parse version from \"{0}\"")]
    VersionParsing(String),
    /// Only RINEX 2 and 3 are supported
    #[error("non supported revision \"{0}\"")]
    NonSupportedVersion(String),
    /// This is not an Observation RINEX
    #[error("expecting observation data, got type '{0}'")]
    NotObservationData(char),
    /// Invalid observable count in a catalog declaration
    #[error("failed to parse number of observables from \"{0}\"")]
    ObservablesCount(String),
    /// Numeric field parsing error
    #[error("failed to parse {field} from \"{content}\"")]
    FieldParsing {
        field: &'static str,
        content: String,
    },
    /// Epoch flag is not one of 0..=6
    #[error("invalid epoch flag '{0}'")]
    EpochFlagParsing(char),
    /// Calendar fields do not describe a valid datetime
    #[error("invalid epoch")]
    InvalidEpoch,
    /// PRN list ended before the declared number of satellites
    #[error("prn list terminated early: {found}/{expected}")]
    PrnListTerminatedEarly { expected: usize, found: usize },
    /// Satellite system that was never declared in the header
    #[error("unexpected GNSS system '{0}'")]
    UnknownSystem(char),
    /// Nominal epochs (flag 0 and 1) must carry a timestamp
    #[error("epoch flag {0} requires a timestamp")]
    MissingEpoch(EpochFlag),
    /// New epoch started while satellites were still pending
    #[error("incomplete epoch: {found}/{expected} satellites")]
    IncompleteEpoch { expected: usize, found: usize },
    /// Satellite line outside of any epoch
    #[error("satellite line outside of an epoch")]
    UnexpectedSatellite,
    /// Data reached before "RINEX VERSION / TYPE"
    #[error("rinex version was never declared")]
    UndeclaredVersion,
    /// V2 satellites were listed, but no "# / TYPES OF OBSERV"
    #[error("no observable declared")]
    MissingObservables,
}

/// [Error] is returned by a parse call.
/// `E` is the error type of the caller's callbacks.
#[derive(Error, Debug)]
pub enum Error<E> {
    /// Stream content is not valid RINEX Observation
    #[error("line #{line}: {source}")]
    Parsing {
        /// 1-based line number
        line: usize,
        /// Framed line content
        content: String,
        #[source]
        source: ParsingError,
    },
    /// Stream read failure
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    /// One of the callbacks requested to stop
    #[error("interrupted: {0}")]
    Interrupted(E),
}

impl<E> Error<E> {
    /// Attaches line context to a [ParsingError]
    pub(crate) fn parsing(line: usize, content: &str, source: ParsingError) -> Self {
        Self::Parsing {
            line,
            content: content.to_string(),
            source,
        }
    }

    /// Returns the [ParsingError] if this is a format defect
    pub fn parsing_error(&self) -> Option<&ParsingError> {
        match self {
            Self::Parsing { source, .. } => Some(source),
            _ => None,
        }
    }
    /// Returns the line number at which parsing failed
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Parsing { line, .. } => Some(*line),
            _ => None,
        }
    }
}
