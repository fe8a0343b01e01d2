use hifitime::{Duration, Epoch, TimeScale};

use crate::{
    epoch::EpochFlag,
    error::ParsingError,
    observation::{LliFlags, SNR},
    sv::Sv,
};

#[cfg(feature = "serde")]
use serde::{ser::SerializeStruct, Deserialize, Deserializer, Serialize, Serializer};

/// [Observation] is one measurement.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Observation {
    /// Observed value, with three decimal digits of resolution.
    /// 0.0 means the observation is absent.
    pub value: f64,
    /// Loss of lock indicator: 3 bit mask, 0 when blank.
    pub lli: u8,
    /// Signal strength projected onto 1..=9, 0 when blank.
    pub ssi: u8,
}

impl Observation {
    /// Returns true if this observation is present in the record
    pub fn is_present(&self) -> bool {
        self.value != 0.0
    }

    /// Interprets the loss of lock indicator
    pub fn lli_flags(&self) -> LliFlags {
        LliFlags::from_bits_truncate(self.lli)
    }

    /// Interprets the signal strength indicator
    pub fn snr(&self) -> Option<SNR> {
        SNR::from_indicator(self.ssi)
    }
}

/// One satellite's [Observation]s for one epoch.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SatelliteObservation {
    /// Satellite identifier
    pub sv: Sv,
    /// [Observation]s, positionally aligned with the
    /// observables the catalog declares for this satellite.
    pub observations: Vec<Observation>,
}

/// [ObservationRecord] is one epoch of an Observation RINEX.
/// The parser reuses a single record as scratch storage:
/// callbacks only borrow it, and should [Clone] whatever they need to retain.
pub struct ObservationRecord {
    /// Four digit year
    pub year: u16,
    /// Month (1..=12)
    pub month: u8,
    /// Day of month
    pub day: u8,
    /// Hours
    pub hour: u8,
    /// Minutes
    pub minute: u8,
    /// Seconds within minute, up to 7 significant decimal digits
    pub second: f64,
    /// [EpochFlag]
    pub flag: EpochFlag,
    /// Receiver clock offset (s), 0 when absent
    pub clock_offset: f64,
    /// Scratch storage, only the first `num_sat` entries are meaningful
    satellites: Vec<SatelliteObservation>,
    num_sat: usize,
}

#[cfg(feature = "serde")]
impl Serialize for ObservationRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ObservationRecord", 9)?;
        state.serialize_field("year", &self.year)?;
        state.serialize_field("month", &self.month)?;
        state.serialize_field("day", &self.day)?;
        state.serialize_field("hour", &self.hour)?;
        state.serialize_field("minute", &self.minute)?;
        state.serialize_field("second", &self.second)?;
        state.serialize_field("flag", &self.flag)?;
        state.serialize_field("clock_offset", &self.clock_offset)?;
        state.serialize_field("satellites", self.satellites())?;
        state.end()
    }
}

/// Deserialized [ObservationRecord], satellites included
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RecordFields {
    year: u16,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: f64,
    flag: EpochFlag,
    clock_offset: f64,
    satellites: Vec<SatelliteObservation>,
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for ObservationRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let fields = RecordFields::deserialize(deserializer)?;
        Ok(Self {
            year: fields.year,
            month: fields.month,
            day: fields.day,
            hour: fields.hour,
            minute: fields.minute,
            second: fields.second,
            flag: fields.flag,
            clock_offset: fields.clock_offset,
            num_sat: fields.satellites.len(),
            satellites: fields.satellites,
        })
    }
}

impl Default for ObservationRecord {
    fn default() -> Self {
        Self {
            year: 0,
            month: 0,
            day: 0,
            hour: 0,
            minute: 0,
            second: 0.0,
            flag: EpochFlag::default(),
            clock_offset: 0.0,
            satellites: Vec::new(),
            num_sat: 0,
        }
    }
}

impl Clone for ObservationRecord {
    fn clone(&self) -> Self {
        Self {
            year: self.year,
            month: self.month,
            day: self.day,
            hour: self.hour,
            minute: self.minute,
            second: self.second,
            flag: self.flag,
            clock_offset: self.clock_offset,
            satellites: self.satellites().to_vec(),
            num_sat: self.num_sat,
        }
    }
}

impl PartialEq for ObservationRecord {
    fn eq(&self, other: &Self) -> bool {
        self.year == other.year
            && self.month == other.month
            && self.day == other.day
            && self.hour == other.hour
            && self.minute == other.minute
            && self.second == other.second
            && self.flag == other.flag
            && self.clock_offset == other.clock_offset
            && self.satellites() == other.satellites()
    }
}

impl std::fmt::Debug for ObservationRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("ObservationRecord")
            .field("year", &self.year)
            .field("month", &self.month)
            .field("day", &self.day)
            .field("hour", &self.hour)
            .field("minute", &self.minute)
            .field("second", &self.second)
            .field("flag", &self.flag)
            .field("clock_offset", &self.clock_offset)
            .field("satellites", &self.satellites())
            .finish()
    }
}

impl ObservationRecord {
    /// Returns [SatelliteObservation]s in order of appearance
    pub fn satellites(&self) -> &[SatelliteObservation] {
        &self.satellites[..self.num_sat]
    }

    /// Returns number of satellites in this epoch
    pub fn num_satellites(&self) -> usize {
        self.num_sat
    }

    /// Returns [SatelliteObservation] for this [Sv], if observed
    pub fn satellite(&self, sv: &Sv) -> Option<&SatelliteObservation> {
        self.satellites().iter().find(|sat| sat.sv == *sv)
    }

    /// Interprets calendar fields as an [Epoch] in given [TimeScale].
    /// Fails for events that never carried a date.
    pub fn epoch(&self, timescale: TimeScale) -> Result<Epoch, ParsingError> {
        let epoch = Epoch::maybe_from_gregorian(
            self.year as i32,
            self.month,
            self.day,
            self.hour,
            self.minute,
            0,
            0,
            timescale,
        )
        .map_err(|_| ParsingError::InvalidEpoch)?;

        Ok(epoch + Duration::from_total_nanoseconds((self.second * 1.0E9).round() as i128))
    }

    /// Starts a new epoch: satellites are dropped, storage is kept.
    pub(crate) fn reset(&mut self, flag: EpochFlag) {
        self.flag = flag;
        self.clock_offset = 0.0;
        self.num_sat = 0;
    }

    /// Reserves room for this many satellites
    pub(crate) fn reserve(&mut self, num_sat: usize) {
        if self.satellites.len() < num_sat {
            self.satellites.reserve(num_sat - self.satellites.len());
        }
    }

    /// Appends a new [Sv] to this epoch, with no observations yet.
    pub(crate) fn push_satellite(&mut self, sv: Sv) -> &mut SatelliteObservation {
        if self.num_sat < self.satellites.len() {
            let sat = &mut self.satellites[self.num_sat];
            sat.sv = sv;
            sat.observations.clear();
        } else {
            self.satellites.push(SatelliteObservation {
                sv,
                observations: Vec::new(),
            });
        }
        self.num_sat += 1;
        &mut self.satellites[self.num_sat - 1]
    }

    /// Returns nth satellite of this epoch
    pub(crate) fn satellite_mut(&mut self, index: usize) -> Option<&mut SatelliteObservation> {
        if index < self.num_sat {
            self.satellites.get_mut(index)
        } else {
            None
        }
    }
}
