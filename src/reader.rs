//! Streaming Observation RINEX reader
use std::io::BufRead;

use hifitime::TimeScale;

use crate::{
    catalog::Catalog,
    error::{Error, ParsingError},
    framer::LineFramer,
    header::{split, Header, Label},
    observation::{v2, v3, ObservationRecord, Progress},
    version::Version,
};

#[cfg(feature = "log")]
use log::{debug, trace};

/// RINEX2 two digit years are extended from this year,
/// unless the header says otherwise.
/// 80-99 are then 19xx, 00-79 are 20xx.
pub const DEFAULT_REFERENCE_YEAR: u16 = 1980;

/// What the next line is
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
enum Mode {
    #[default]
    Header,
    Data,
}

/// [ObsReader] decodes Observation RINEX (V2 and V3) streams,
/// one line at a time, and hands out every header line and every
/// epoch to the caller's callbacks.
///
/// ```
/// use rinex_stream::prelude::*;
///
/// let content = "     2.11           OBSERVATION DATA    G (GPS)             RINEX VERSION / TYPE
///      2    L1    C1                                          # / TYPES OF OBSERV
///   2021     1     1     0     0    0.0000000     GPS         TIME OF FIRST OBS
///                                                             END OF HEADER
///  21  1  1  0  0  0.0000000  0  2G01G02
///  109474682.521 7  20832393.682
///  110535139.152 5  21034412.123
/// ";
///
/// let mut reader = ObsReader::default();
/// let mut epochs = Vec::<ObservationRecord>::new();
///
/// reader
///     .parse(
///         content.as_bytes(),
///         |_label, _value| Ok::<(), ()>(()),
///         |record, _catalog| {
///             epochs.push(record.clone());
///             Ok(())
///         },
///     )
///     .unwrap();
///
/// assert_eq!(reader.version(), Some(Version::new(2, 11)));
/// assert_eq!(reader.timescale(), TimeScale::GPST);
/// assert_eq!(epochs.len(), 1);
/// assert_eq!(epochs[0].year, 2021);
/// assert_eq!(epochs[0].satellites()[1].observations[1].value, 21034412.123);
/// ```
#[derive(Debug)]
pub struct ObsReader {
    /// Initial carried year
    reference_year: u16,
    /// [TimeScale] used when the header does not define one
    timescale: TimeScale,
    mode: Mode,
    header: Header,
    /// Lines to route to the header dispatcher, following a special event
    header_lines: usize,
    v2: v2::Decoder,
    v3: v3::Decoder,
    /// Epoch being assembled
    record: ObservationRecord,
}

impl Default for ObsReader {
    fn default() -> Self {
        Self {
            reference_year: DEFAULT_REFERENCE_YEAR,
            timescale: TimeScale::GPST,
            mode: Mode::default(),
            header: Header::new(DEFAULT_REFERENCE_YEAR),
            header_lines: 0,
            v2: v2::Decoder::default(),
            v3: v3::Decoder::default(),
            record: ObservationRecord::default(),
        }
    }
}

impl ObsReader {
    /// Returns [ObsReader] that extends RINEX2 two digit years
    /// from this one, when "TIME OF FIRST OBS" is omitted.
    pub fn with_reference_year(mut self, year: u16) -> Self {
        self.reference_year = year;
        self.header.year = year;
        self
    }

    /// Returns [ObsReader] with a default [TimeScale],
    /// for streams that do not declare one.
    pub fn with_timescale(mut self, timescale: TimeScale) -> Self {
        self.timescale = timescale;
        self
    }

    /// Returns the negotiated [Version], once "RINEX VERSION / TYPE" was parsed
    pub fn version(&self) -> Option<Version> {
        self.header.version
    }

    /// Returns the observation types [Catalog]
    pub fn catalog(&self) -> &Catalog {
        &self.header.catalog
    }

    /// Returns the [TimeScale] of this stream
    pub fn timescale(&self) -> TimeScale {
        self.header.timescale.unwrap_or(self.timescale)
    }

    /// Restores initial state
    fn reset(&mut self) {
        self.mode = Mode::Header;
        self.header = Header::new(self.reference_year);
        self.header_lines = 0;
        self.v2 = v2::Decoder::default();
        self.v3 = v3::Decoder::default();
        self.record = ObservationRecord::default();
    }

    /// Parses a complete stream.
    /// `on_header` is invoked with (label, value) for every header line,
    /// `on_record` with every epoch.
    /// Parsing stops on the first format error, or as soon as
    /// a callback returns an error, which is then returned as [Error::Interrupted].
    /// Records are only borrowed: [Clone] what needs to be retained.
    pub fn parse<R, E, H, O>(
        &mut self,
        reader: R,
        mut on_header: H,
        mut on_record: O,
    ) -> Result<(), Error<E>>
    where
        R: BufRead,
        H: FnMut(&str, &str) -> Result<(), E>,
        O: FnMut(&ObservationRecord, &Catalog) -> Result<(), E>,
    {
        self.reset();
        let mut framer = LineFramer::new(reader);

        while framer.next_line()? {
            let number = framer.number();

            if self.mode == Mode::Header || self.header.major() == Some(2) {
                framer
                    .pad()
                    .map_err(|e| Error::parsing(number, framer.line(), e))?;
            }

            let line = framer.line();
            match self.mode {
                Mode::Header => self.parse_header(number, line, &mut on_header)?,
                Mode::Data => self.parse_data(number, line, &mut on_record)?,
            }
        }

        Ok(())
    }

    fn parse_header<E, H>(
        &mut self,
        number: usize,
        line: &str,
        on_header: &mut H,
    ) -> Result<(), Error<E>>
    where
        H: FnMut(&str, &str) -> Result<(), E>,
    {
        if self.header_lines > 0 {
            self.header_lines -= 1;
            if self.header_lines == 0 {
                self.mode = Mode::Data;
            }
        }

        let (value, label) = split(line);

        if let Some(known) = Label::from_field(label) {
            self.header
                .handle(known, value)
                .map_err(|e| Error::parsing(number, line, e))?;

            if known == Label::EndOfHeader {
                self.mode = Mode::Data;
                self.header_lines = 0;
            }
        }

        on_header(label, value).map_err(Error::Interrupted)
    }

    fn parse_data<E, O>(
        &mut self,
        number: usize,
        line: &str,
        on_record: &mut O,
    ) -> Result<(), Error<E>>
    where
        O: FnMut(&ObservationRecord, &Catalog) -> Result<(), E>,
    {
        let progress = match self.header.major() {
            Some(2) => self.v2.decode(
                line,
                &mut self.header.year,
                &self.header.catalog,
                &mut self.record,
            ),
            Some(3) => self
                .v3
                .decode(line, &self.header.catalog, &mut self.record),
            _ => Err(ParsingError::UndeclaredVersion),
        }
        .map_err(|e| Error::parsing(number, line, e))?;

        match progress {
            Progress::Pending => Ok(()),
            Progress::Complete => {
                #[cfg(feature = "log")]
                trace!(
                    "{}-{:02}-{:02}T{:02}:{:02}:{:010.7}: {} satellites",
                    self.record.year,
                    self.record.month,
                    self.record.day,
                    self.record.hour,
                    self.record.minute,
                    self.record.second,
                    self.record.num_satellites()
                );

                on_record(&self.record, &self.header.catalog).map_err(Error::Interrupted)
            },
            Progress::Event(lines) => {
                #[cfg(feature = "log")]
                debug!(
                    "line #{}: {:?} event, {} header lines follow",
                    number, self.record.flag, lines
                );

                if lines > 0 {
                    self.mode = Mode::Header;
                    self.header_lines = lines;
                }

                on_record(&self.record, &self.header.catalog).map_err(Error::Interrupted)
            },
        }
    }
}
