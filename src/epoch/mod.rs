//! Epoch intro lines: flags and timestamps
use crate::{
    error::ParsingError,
    framer::{column, columns, parse_float, parse_unsigned},
    observation::ObservationRecord,
};

pub mod flag;
pub use flag::EpochFlag;

/// Column ranges of the timestamp fields, for one revision
struct Layout {
    year: (usize, usize),
    month: (usize, usize),
    day: (usize, usize),
    hour: (usize, usize),
    minute: (usize, usize),
    second: (usize, usize),
}

/// " yy mm dd hh mm ss.sssssss"
const V2_LAYOUT: Layout = Layout {
    year: (1, 3),
    month: (4, 6),
    day: (7, 9),
    hour: (10, 12),
    minute: (13, 15),
    second: (15, 26),
};

/// "> yyyy mm dd hh mm ss.sssssss"
const V3_LAYOUT: Layout = Layout {
    year: (2, 6),
    month: (7, 9),
    day: (10, 12),
    hour: (13, 15),
    minute: (16, 18),
    second: (18, 29),
};

/// Column that is blank when the intro line carries no date
const DATE_MARKER: usize = 2;

/// Decodes the timestamp fields into the record.
/// Returns false when the date is omitted, which only
/// special events may do: previous date fields are then kept.
fn parse_timestamp(
    line: &str,
    flag: EpochFlag,
    layout: &Layout,
    record: &mut ObservationRecord,
) -> Result<bool, ParsingError> {
    if column(line, DATE_MARKER)? == b' ' {
        if flag.requires_timestamp() {
            return Err(ParsingError::MissingEpoch(flag));
        }
        return Ok(false);
    }

    let field = |(start, end): (usize, usize)| columns(line, start, end);

    record.year = parse_unsigned(field(layout.year)?, "year")?;
    record.month = parse_unsigned(field(layout.month)?, "month")?;
    record.day = parse_unsigned(field(layout.day)?, "day")?;
    record.hour = parse_unsigned(field(layout.hour)?, "hour")?;
    record.minute = parse_unsigned(field(layout.minute)?, "minute")?;
    record.second = parse_float(field(layout.second)?, "second")?;
    Ok(true)
}

/// Extends a two digit year to four digits.
/// RINEX2 epochs only move forward, so a two digit year lower than
/// the carried one means we crossed a century.
pub(crate) fn extend_year(carried: &mut u16, yy: u16) -> Result<u16, ParsingError> {
    let mut century = *carried / 100 * 100;
    if yy < *carried % 100 {
        century = century.checked_add(100).ok_or(ParsingError::InvalidEpoch)?;
    }
    *carried = century
        .checked_add(yy)
        .ok_or(ParsingError::InvalidEpoch)?;
    Ok(*carried)
}

/// Decodes the timestamp of a RINEX2 intro line.
/// `carried` is the running four digit year of this stream.
pub(crate) fn parse_v2_timestamp(
    line: &str,
    flag: EpochFlag,
    carried: &mut u16,
    record: &mut ObservationRecord,
) -> Result<(), ParsingError> {
    if parse_timestamp(line, flag, &V2_LAYOUT, record)? {
        record.year = extend_year(carried, record.year)?;
    }
    Ok(())
}

/// Decodes the timestamp of a RINEX3 intro line.
pub(crate) fn parse_v3_timestamp(
    line: &str,
    flag: EpochFlag,
    record: &mut ObservationRecord,
) -> Result<(), ParsingError> {
    parse_timestamp(line, flag, &V3_LAYOUT, record)?;
    Ok(())
}
