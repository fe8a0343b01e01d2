use std::io::{BufReader, Read};

use crate::{
    prelude::*,
    tests::toolkit::{collect, init_logger, records, try_collect, Item, V2_MIXED, V3_MIXED},
};

/// Builds a RINEX2 GPS header, that declares "C1" only
fn v2_header() -> String {
    format!(
        "{:<60}RINEX VERSION / TYPE\n{:<60}# / TYPES OF OBSERV\n{:<60}END OF HEADER\n",
        "     2.11           OBSERVATION DATA    G (GPS)", "     1    C1", ""
    )
}

#[test]
fn two_digit_years() {
    let content = format!(
        "{}{}",
        v2_header(),
        " 99 12 31 23 59 30.0000000  0  1G01
  20832393.682
 00  1  1  0  0  0.0000000  0  1G01
  20832393.682
"
    );

    let (_, items) = collect(&content);
    let years = records(&items)
        .iter()
        .map(|record| record.year)
        .collect::<Vec<_>>();
    assert_eq!(years, vec![1999, 2000]);

    let mut reader = ObsReader::default().with_reference_year(2050);
    let (items, ret) = try_collect(&mut reader, &content);
    assert!(ret.is_ok());
    let years = records(&items)
        .iter()
        .map(|record| record.year)
        .collect::<Vec<_>>();
    assert_eq!(years, vec![2099, 2100]);
}

#[test]
fn out_of_range_first_year() {
    let content = format!(
        "{:<60}RINEX VERSION / TYPE\n{:<60}# / TYPES OF OBSERV\n{:<60}TIME OF FIRST OBS\n{:<60}END OF HEADER\n{}",
        "     2.11           OBSERVATION DATA    G (GPS)",
        "     1    C1",
        " 65500     1     1     0     0    0.0000000     GPS",
        "",
        " 99 12 31 23 59 30.0000000  0  1G01\n  20832393.682\n"
    );

    let mut reader = ObsReader::default();
    let (items, ret) = try_collect(&mut reader, &content);
    assert_eq!(items.len(), 4);

    let err = ret.unwrap_err();
    assert_eq!(err.line(), Some(5));
    assert_eq!(err.parsing_error(), Some(&ParsingError::InvalidEpoch));
}

#[test]
fn default_timescale() {
    let content = format!("{}{}", v2_header(), " 21  1  1  0  0  0.0000000  0  0\n");

    let mut reader = ObsReader::default().with_timescale(TimeScale::UTC);
    let (items, ret) = try_collect(&mut reader, &content);
    assert!(ret.is_ok());
    assert_eq!(reader.timescale(), TimeScale::UTC);

    let record = records(&items)[0];
    assert_eq!(record.year, 2021);
    assert_eq!(
        record.epoch(reader.timescale()).unwrap(),
        Epoch::from_gregorian_utc_at_midnight(2021, 1, 1)
    );
}

#[test]
fn interrupted_by_record_callback() {
    init_logger();
    let mut num_headers = 0;
    let mut num_records = 0;

    let err = crate::parse(
        V2_MIXED.as_bytes(),
        |_, _| {
            num_headers += 1;
            Ok(())
        },
        |record, _| {
            num_records += 1;
            if record.num_satellites() > 0 {
                Err("stop")
            } else {
                Ok(())
            }
        },
    )
    .unwrap_err();

    assert!(matches!(err, Error::Interrupted("stop")));
    assert!(err.parsing_error().is_none());
    assert_eq!(num_headers, 18);
    assert_eq!(num_records, 1);
}

#[test]
fn interrupted_by_header_callback() {
    init_logger();
    let mut num_records = 0;

    let err = crate::parse(
        V3_MIXED.as_bytes(),
        |label, _| {
            if label.starts_with("SYS / # / OBS TYPES") {
                Err(label.to_string())
            } else {
                Ok(())
            }
        },
        |_, _| {
            num_records += 1;
            Ok(())
        },
    )
    .unwrap_err();

    match err {
        Error::Interrupted(label) => assert_eq!(label, "SYS / # / OBS TYPES "),
        e => panic!("unexpected error: {:?}", e),
    }
    assert_eq!(num_records, 0);
}

#[test]
fn oversized_lines() {
    let content = format!(
        "{}\n{:<60}END OF HEADER\n",
        "x".repeat(81),
        ""
    );
    let mut reader = ObsReader::default();
    let (items, ret) = try_collect(&mut reader, &content);
    assert!(items.is_empty());
    let err = ret.unwrap_err();
    assert_eq!(err.line(), Some(1));
    assert_eq!(err.parsing_error(), Some(&ParsingError::LineTooLong(80)));

    // RINEX2 data lines are framed too
    let content = format!(
        "{} 21  1  1  0  0  0.0000000  0  1G01{}\n",
        v2_header(),
        " ".repeat(50)
    );
    let (items, ret) = try_collect(&mut reader, &content);
    assert_eq!(items.len(), 3);
    let err = ret.unwrap_err();
    assert_eq!(err.line(), Some(4));
    assert_eq!(err.parsing_error(), Some(&ParsingError::LineTooLong(80)));
}

#[test]
fn prn_list_terminated_early() {
    let content = format!(
        "{} 21  1  1  0  0  0.0000000  0  4G01G02\n",
        v2_header()
    );
    let mut reader = ObsReader::default();
    let (items, ret) = try_collect(&mut reader, &content);
    assert!(records(&items).is_empty());

    let err = ret.unwrap_err();
    assert_eq!(err.line(), Some(4));
    assert_eq!(
        err.parsing_error(),
        Some(&ParsingError::PrnListTerminatedEarly {
            expected: 4,
            found: 2,
        })
    );
    match err {
        Error::Parsing { content, .. } => {
            assert!(content.starts_with(" 21  1  1"));
            assert_eq!(content.len(), 80);
        },
        e => panic!("unexpected error: {:?}", e),
    }
}

#[test]
fn missing_observables() {
    let content = format!(
        "{:<60}RINEX VERSION / TYPE\n{:<60}END OF HEADER\n 21  1  1  0  0  0.0000000  0  1G01\n",
        "     2.11           OBSERVATION DATA    G (GPS)", ""
    );
    let mut reader = ObsReader::default();
    let (_, ret) = try_collect(&mut reader, &content);
    let err = ret.unwrap_err();
    assert_eq!(err.line(), Some(3));
    assert_eq!(err.parsing_error(), Some(&ParsingError::MissingObservables));
}

#[test]
fn unsupported_streams() {
    let mut reader = ObsReader::default();

    let content = format!(
        "{:<60}RINEX VERSION / TYPE\n",
        "     3.04           NAVIGATION DATA     M"
    );
    let (items, ret) = try_collect(&mut reader, &content);
    assert!(items.is_empty());
    assert_eq!(
        ret.unwrap_err().parsing_error(),
        Some(&ParsingError::NotObservationData('N'))
    );

    let content = format!(
        "{:<60}RINEX VERSION / TYPE\n",
        "     4.00           OBSERVATION DATA    M"
    );
    let (_, ret) = try_collect(&mut reader, &content);
    assert_eq!(
        ret.unwrap_err().parsing_error(),
        Some(&ParsingError::NonSupportedVersion("4.00".to_string()))
    );
}

/// Fails after the first few bytes
struct BrokenStream {
    content: &'static [u8],
}

impl Read for BrokenStream {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        if self.content.is_empty() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::ConnectionReset,
                "stream reset",
            ));
        }
        let size = buf.len().min(self.content.len());
        buf[..size].copy_from_slice(&self.content[..size]);
        self.content = &self.content[size..];
        Ok(size)
    }
}

#[test]
fn io_errors() {
    init_logger();
    // stream is reset right after the 5th line
    let end = V2_MIXED.match_indices('\n').nth(4).unwrap().0 + 1;
    let stream = BufReader::new(BrokenStream {
        content: V2_MIXED[..end].as_bytes(),
    });

    let mut num_headers = 0;
    let err = crate::parse(
        stream,
        |_, _| {
            num_headers += 1;
            Ok::<(), ()>(())
        },
        |_, _| Ok(()),
    )
    .unwrap_err();

    match err {
        Error::Io(e) => assert_eq!(e.kind(), std::io::ErrorKind::ConnectionReset),
        e => panic!("unexpected error: {:?}", e),
    }
    assert_eq!(num_headers, 5);
}

#[test]
fn reader_reuse() {
    let mut reader = ObsReader::default();

    let (v3_items, ret) = try_collect(&mut reader, V3_MIXED);
    assert!(ret.is_ok());
    assert_eq!(reader.version(), Some(Version::new(3, 2)));

    // state does not leak into the next stream
    let (v2_items, ret) = try_collect(&mut reader, V2_MIXED);
    assert!(ret.is_ok());
    assert_eq!(reader.version(), Some(Version::new(2, 11)));
    assert_eq!(reader.catalog().systems(), vec![UNIVERSAL_SYSTEM]);

    let (_, expected) = collect(V2_MIXED);
    assert_eq!(v2_items, expected);

    let (_, expected) = collect(V3_MIXED);
    assert_eq!(v3_items, expected);

    // a blank date event opening the next stream has nothing to inherit
    let content = format!("{}                            5  0\n", v2_header());
    let (items, ret) = try_collect(&mut reader, &content);
    assert!(ret.is_ok());
    let (_, expected) = collect(&content);
    assert_eq!(items, expected);

    let event = records(&items)[0];
    assert_eq!(event.flag, EpochFlag::ExternalEvent);
    assert_eq!((event.year, event.month, event.day), (0, 0, 0));
    assert_eq!((event.hour, event.minute, event.second), (0, 0, 0.0));
    assert_eq!(event.epoch(TimeScale::GPST), Err(ParsingError::InvalidEpoch));
}

#[test]
fn concurrent_parsing() {
    let (_, v2_expected) = collect(V2_MIXED);
    let (_, v3_expected) = collect(V3_MIXED);

    let results = std::thread::scope(|scope| {
        let handles = (0..4)
            .map(|i| {
                scope.spawn(move || {
                    let content = if i % 2 == 0 { V2_MIXED } else { V3_MIXED };
                    let mut reader = ObsReader::default();
                    let (items, ret) = try_collect(&mut reader, content);
                    assert!(ret.is_ok());
                    items
                })
            })
            .collect::<Vec<_>>();

        handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect::<Vec<Vec<Item>>>()
    });

    for (i, items) in results.iter().enumerate() {
        if i % 2 == 0 {
            assert_eq!(items, &v2_expected);
        } else {
            assert_eq!(items, &v3_expected);
        }
    }
}

#[test]
#[cfg(feature = "serde")]
fn record_serialization() {
    let (_, items) = collect(V2_MIXED);
    let record = records(&items)[0];

    let json = serde_json::to_value(record).unwrap();
    assert_eq!(json["year"], 2005);
    assert_eq!(json["second"], 36.0);
    assert_eq!(json["flag"], "Ok");
    assert_eq!(json["satellites"].as_array().unwrap().len(), 4);
    assert_eq!(json["satellites"][0]["observations"][1]["ssi"], 8);

    let parsed: ObservationRecord = serde_json::from_value(json).unwrap();
    assert_eq!(&parsed, record);

    // scratch storage is not serialized
    let record = records(&items)[1];
    let json = serde_json::to_value(record).unwrap();
    assert_eq!(json["satellites"].as_array().unwrap().len(), 0);
}
