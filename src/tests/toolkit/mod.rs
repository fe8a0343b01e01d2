//! Test toolkit
use std::{cell::RefCell, str::FromStr};

use crate::prelude::*;

mod observation;
pub use observation::{check_observables, check_observations};

/// V2.11 mixed file, with special events
pub const V2_MIXED: &str = include_str!("../../../test_resources/OBS/V2/AIUB0840.05o");

/// V3.02 mixed file
pub const V3_MIXED: &str =
    include_str!("../../../test_resources/OBS/V3/TWTF00TWN_R_20190100000_01M_30S_MO.rnx");

/// Initializes the test logger, once.
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Anything a stream hands out
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    /// (label, value) header pair
    Header(String, String),
    /// Epoch
    Record(ObservationRecord),
}

impl Item {
    pub fn as_record(&self) -> Option<&ObservationRecord> {
        match self {
            Self::Record(record) => Some(record),
            _ => None,
        }
    }
}

/// Parses this content and collects everything it hands out,
/// until completion or first error.
pub fn try_collect(reader: &mut ObsReader, content: &str) -> (Vec<Item>, Result<(), Error<()>>) {
    init_logger();
    let items = RefCell::new(Vec::<Item>::new());
    let ret = reader.parse(
        content.as_bytes(),
        |label, value| {
            items
                .borrow_mut()
                .push(Item::Header(label.to_string(), value.to_string()));
            Ok(())
        },
        |record, _| {
            items.borrow_mut().push(Item::Record(record.clone()));
            Ok(())
        },
    );
    (items.into_inner(), ret)
}

/// Parses this content, which must be valid
pub fn collect(content: &str) -> (ObsReader, Vec<Item>) {
    let mut reader = ObsReader::default();
    let (items, ret) = try_collect(&mut reader, content);
    if let Err(e) = ret {
        panic!("failed to parse test content: {:?}", e);
    }
    (reader, items)
}

/// Returns collected records only
pub fn records(items: &[Item]) -> Vec<&ObservationRecord> {
    items.iter().filter_map(|item| item.as_record()).collect()
}

/// Describes the item sequence: one 'H' per header line, one 'O' per record
pub fn sequence(items: &[Item]) -> String {
    items
        .iter()
        .map(|item| match item {
            Item::Header(..) => 'H',
            Item::Record(..) => 'O',
        })
        .collect()
}

/// Builds [Sv] list from its description
pub fn satellites(descriptors: &[&str]) -> Vec<Sv> {
    descriptors
        .iter()
        .map(|desc| Sv::from_str(desc).unwrap())
        .collect()
}

/// Verifies this record's timestamp
pub fn check_timestamp(
    record: &ObservationRecord,
    (year, month, day): (u16, u8, u8),
    (hour, minute, second): (u8, u8, f64),
) {
    assert_eq!(
        (record.year, record.month, record.day),
        (year, month, day),
        "bad date"
    );
    assert_eq!((record.hour, record.minute), (hour, minute), "bad time");
    assert!(
        (record.second - second).abs() < 1.0E-9,
        "bad seconds: {} expecting {}",
        record.second,
        second
    );
}
