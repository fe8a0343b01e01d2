//! Line framing and fixed column access
use std::io::BufRead;

use crate::error::ParsingError;

/// Header lines, and all V2 lines, are framed to this width
pub(crate) const FRAME_WIDTH: usize = 80;

/// [LineFramer] pulls one record line at a time out of a [BufRead]
/// and makes it column addressable.
pub(crate) struct LineFramer<R: BufRead> {
    reader: R,
    /// raw bytes of the latest line
    raw: Vec<u8>,
    /// framed content of the latest line
    line: String,
    /// 1-based number of the latest line
    number: usize,
}

impl<R: BufRead> LineFramer<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            raw: Vec::with_capacity(FRAME_WIDTH + 2),
            line: String::with_capacity(FRAME_WIDTH),
            number: 0,
        }
    }

    /// Number of the line that was last framed
    pub fn number(&self) -> usize {
        self.number
    }

    /// Content of the line that was last framed
    pub fn line(&self) -> &str {
        &self.line
    }

    /// Reads next line, without its terminator.
    /// Returns Ok(false) once the stream is exhausted.
    pub fn next_line(&mut self) -> std::io::Result<bool> {
        self.raw.clear();
        self.line.clear();

        let size = self.reader.read_until(b'\n', &mut self.raw)?;
        if size == 0 {
            return Ok(false);
        }

        self.number += 1;

        if self.raw.last() == Some(&b'\n') {
            self.raw.pop();
        }
        if self.raw.last() == Some(&b'\r') {
            self.raw.pop();
        }

        // byte offsets must match column numbers
        self.line.extend(
            self.raw
                .iter()
                .map(|b| if b.is_ascii() { *b as char } else { '?' }),
        );

        Ok(true)
    }

    /// Pads latest line with whitespaces to [FRAME_WIDTH].
    /// Wider lines are rejected.
    pub fn pad(&mut self) -> Result<(), ParsingError> {
        if self.line.len() > FRAME_WIDTH {
            return Err(ParsingError::LineTooLong(FRAME_WIDTH));
        }
        while self.line.len() < FRAME_WIDTH {
            self.line.push(' ');
        }
        Ok(())
    }
}

/// Returns columns [start, end[ (0-based) of this line.
pub(crate) fn columns(line: &str, start: usize, end: usize) -> Result<&str, ParsingError> {
    line.get(start..end)
        .ok_or(ParsingError::LineTooShort(end.max(start + 1)))
}

/// Returns columns [start, end[ of this line, clamped to the line length.
/// Missing columns are considered blank.
pub(crate) fn columns_or_blank(line: &str, start: usize, end: usize) -> &str {
    let end = end.min(line.len());
    if start >= end {
        ""
    } else {
        &line[start..end]
    }
}

/// Returns column #index (0-based) of this line.
pub(crate) fn column(line: &str, index: usize) -> Result<u8, ParsingError> {
    line.as_bytes()
        .get(index)
        .copied()
        .ok_or(ParsingError::LineTooShort(index + 1))
}

/// Returns column #index of this line, blank if it does not exist.
pub(crate) fn column_or_blank(line: &str, index: usize) -> u8 {
    line.as_bytes().get(index).copied().unwrap_or(b' ')
}

/// Parses a blank tolerant single digit field, blank being 0.
pub(crate) fn parse_digit(byte: u8, field: &'static str) -> Result<u8, ParsingError> {
    match byte {
        b' ' => Ok(0),
        b'0'..=b'9' => Ok(byte - b'0'),
        _ => Err(ParsingError::FieldParsing {
            field,
            content: (byte as char).to_string(),
        }),
    }
}

/// Parses an unsigned integer field
pub(crate) fn parse_unsigned<T: std::str::FromStr>(
    content: &str,
    field: &'static str,
) -> Result<T, ParsingError> {
    content
        .trim()
        .parse::<T>()
        .map_err(|_| ParsingError::FieldParsing {
            field,
            content: content.to_string(),
        })
}

/// Parses a floating point field
pub(crate) fn parse_float(content: &str, field: &'static str) -> Result<f64, ParsingError> {
    content
        .trim()
        .parse::<f64>()
        .map_err(|_| ParsingError::FieldParsing {
            field,
            content: content.to_string(),
        })
}
