use std::sync::Arc;

use crate::{
    CalendarDate, ChecksumMode, ConstellationAggregator, EpochBuffer, Error, GsvRecord,
    GsvSequencing, Parsable, PositioningMode, Status, Talker, UtcTime, distance,
};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn commit_all(buffer: &mut EpochBuffer, sentences: &[&str]) -> Arc<crate::EpochSnapshot> {
    for sentence in sentences {
        buffer.append(sentence).unwrap();
    }
    buffer.commit().unwrap()
}

#[test]
fn test_rmc_worked_example() {
    init_logger();

    let mut buffer = EpochBuffer::new();
    let snapshot = commit_all(
        &mut buffer,
        &["$GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W*6A"],
    );
    let rmc = &snapshot.rmc;

    assert_eq!(
        rmc.time.get(),
        Some(UtcTime {
            hour: 12,
            minute: 35,
            second: 19.0
        })
    );
    assert_eq!(rmc.status.get(), Some(Status::Valid));

    let latitude = rmc.latitude.get().unwrap();
    assert!((latitude.decimal - 48.1173).abs() < 1e-9);
    assert_eq!(rmc.is_north.get(), Some(true));

    let longitude = rmc.longitude.get().unwrap();
    assert!((longitude.decimal - 11.516_666_666).abs() < 1e-6);
    assert_eq!(rmc.is_east.get(), Some(true));

    assert_eq!(rmc.speed_knots.get(), Some(22.4));
    assert_eq!(rmc.course.get(), Some(84.4));
    assert_eq!(
        rmc.date.get(),
        Some(CalendarDate {
            year: 1994,
            month: 3,
            day: 23
        })
    );
    assert_eq!(rmc.magnetic_variation.get(), Some(-3.1));
    assert_eq!(rmc.is_magnetic_east.get(), Some(false));

    // Fields not transmitted stay absent and hold their sentinel.
    assert!(!rmc.mode.is_present());
    assert_eq!(rmc.mode.raw(), PositioningMode::Unknown);
    assert_eq!(rmc.mode.raw().code(), -1);
    assert!(!rmc.nav_status.is_present());
}

#[test]
fn test_gsv_reassembly() {
    init_logger();

    let mut buffer = EpochBuffer::new();
    let snapshot = commit_all(
        &mut buffer,
        &[
            "$GPGSA,A,3,01,02,12,14,,,,,,,,,1.8,1.0,1.5*3B",
            "$GLGSA,A,3,65,72,,,,,,,,,,,1.8,1.0,1.5*24",
            "$GPGSV,3,1,11,01,40,083,46,02,17,308,41,12,07,344,39,14,22,228,45*00",
            "$GPGSV,3,2,11,15,10,050,30,17,35,120,44,19,05,010,20,22,62,270,48*00",
            "$GPGSV,3,3,11,24,55,045,42,25,08,190,,32,30,290,37*00",
            "$GLGSV,1,1,02,65,34,100,40,72,12,200,35*00",
        ],
    );
    assert_eq!(buffer.last_report().decoded, 6);

    let slots = &snapshot.constellations;
    assert_eq!(slots.gsa.len(), 2);
    assert_eq!(slots.gsa[0].prns.as_slice(), &[1, 2, 12, 14]);
    assert_eq!(slots.gsa[1].satellite_count(), 2);

    assert_eq!(slots.gsv.len(), 2);
    let gp = &slots.gsv[0];
    assert_eq!(gp.talker.as_str(), "GP");
    assert_eq!(gp.fragments.len(), 3);
    assert_eq!(gp.satellite_count(), 11);

    let gl = slots.fragments_of(Talker::of("$GLGSV").unwrap()).unwrap();
    assert_eq!(gl.fragments.len(), 1);
    let prns: Vec<u16> = gl.satellites().map(|s| s.prn).collect();
    assert_eq!(prns, [65, 72]);

    // The missing SNR of PRN 25 does not drop the block.
    let prn25 = gp.satellites().find(|s| s.prn == 25).unwrap();
    assert!(!prn25.snr.is_present());
    assert_eq!(prn25.azimuth.get(), Some(190));
}

#[test]
fn test_fragment_index_resets_per_talker() {
    let mut aggregator = ConstellationAggregator::new(GsvSequencing::Positional);
    let sentences = [
        ("$GPGSV,3,1,11,01,40,083,46*00", 0, 0),
        ("$GPGSV,3,2,11,15,10,050,30*00", 0, 1),
        ("$GPGSV,3,3,11,24,55,045,42*00", 0, 2),
        ("$GLGSV,1,1,02,65,34,100,40*00", 1, 0),
    ];

    for (sentence, system, fragment) in sentences {
        aggregator.push_gsv(GsvRecord::parse(sentence).unwrap()).unwrap();
        assert_eq!(aggregator.system_index(), Some(system), "Failed: {sentence:?}");
        assert_eq!(aggregator.fragment_index(), fragment, "Failed: {sentence:?}");
    }
}

#[test]
fn test_empty_commit_is_idempotent() {
    let mut buffer = EpochBuffer::new();
    let first = commit_all(&mut buffer, &["$GPGLL,4916.45,N,12311.12,W,225444,A*31"]);

    let second = buffer.commit().unwrap();
    let third = buffer.commit().unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert!(Arc::ptr_eq(&second, &third));
    assert_eq!(buffer.last_report().sentences, 0);
}

#[test]
fn test_vtg_out_of_range_speed() {
    let mut buffer = EpochBuffer::new();
    let snapshot = commit_all(&mut buffer, &["$GPVTG,054.7,T,034.4,M,9999.9,N,010.2,K,A*1C"]);
    let vtg = &snapshot.vtg;

    assert!(!vtg.speed_knots.is_present());
    assert_eq!(vtg.true_course.get(), Some(54.7));
    assert_eq!(vtg.magnetic_course.get(), Some(34.4));
    assert_eq!(vtg.speed_kmh.get(), Some(10.2));
    assert_eq!(vtg.mode.get(), Some(PositioningMode::Autonomous));
}

#[test]
fn test_structural_errors() {
    init_logger();

    // Decoding a sentence as the wrong record type.
    let result = GsvRecord::parse("$GPGGA,123519,4807.038,N*00");
    assert_eq!(
        result.unwrap_err(),
        Error::TypeMismatch {
            expected: crate::SentenceType::Gsv
        }
    );

    // Inside a session, the broken sentence is reported and the rest decodes.
    let mut buffer = EpochBuffer::new();
    let snapshot = commit_all(
        &mut buffer,
        &[
            "$GPZDA,123519,23,03,1994,00,00",
            "$GPZDA,123520,23,03,1994,00,00*42",
        ],
    );

    let report = buffer.last_report();
    assert_eq!(report.rejections.len(), 1);
    assert_eq!(report.rejections[0].error, Error::MissingChecksumDelimiter);
    assert_eq!(report.rejections[0].error.code(), -3);
    assert_eq!(snapshot.zda.time.get().map(|t| t.second), Some(20.0));
}

#[test]
fn test_records_carry_over() {
    let mut buffer = EpochBuffer::new();

    let first = commit_all(
        &mut buffer,
        &[
            "$GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W*6A",
            "$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47",
            "$GPGSA,A,3,01,02,12,14,,,,,,,,,1.8,1.0,1.5*3B",
        ],
    );
    assert_eq!(first.constellations.gsa.len(), 1);

    let second = commit_all(
        &mut buffer,
        &["$GPGGA,123520,4807.038,N,01131.000,E,1,09,0.9,545.4,M,46.9,M,,*00"],
    );

    assert_eq!(second.epoch, 2);
    assert_eq!(second.rmc, first.rmc);
    assert_eq!(second.gga.satellites_used.get(), Some(9));
    assert!(second.constellations.is_empty());
}

#[test]
fn test_unsupported_sentences_skipped() {
    let mut buffer = EpochBuffer::builder()
        .checksum_mode(ChecksumMode::Verify)
        .build();

    let snapshot = commit_all(
        &mut buffer,
        &[
            "$GPTXT,01,01,02,ANTSTATUS=OK*3B",
            "$GPDBT,12.34,f,3.76,M,2.05,F*00",
            "$GPZDA,123519,23,03,1994,00,00*42",
        ],
    );

    let report = buffer.last_report();
    assert_eq!(report.sentences, 3);
    assert_eq!(report.skipped, 2);
    assert_eq!(report.decoded, 1);
    assert!(report.rejections.is_empty());
    assert!(snapshot.zda.date.is_present());
}

#[test]
fn test_distance_between_epochs() {
    let mut buffer = EpochBuffer::new();

    let start = commit_all(&mut buffer, &["$GPGLL,4807.038,N,01131.000,E,123519,A,A*48"]);
    let end = commit_all(&mut buffer, &["$GPGLL,4807.038,N,01132.000,E,123520,A,A*00"]);

    let meters = distance(&start.gll, &end.gll);
    assert!((meters - 1237.2).abs() < 1.0);
    assert_eq!(meters, distance(&end.gll, &start.gll));
    assert_eq!(distance(&end.gll, &end.gll), 0.0);

    let lost = commit_all(&mut buffer, &["$GPGLL,,,,,123521,V,N*00"]);
    assert!(distance(&start.gll, &lost.gll).is_nan());
}

#[test]
fn test_verified_fixes_give_distance() {
    let mut buffer = EpochBuffer::builder()
        .checksum_mode(ChecksumMode::Verify)
        .build();

    let start = commit_all(&mut buffer, &["$GPGLL,4807.038,N,01131.000,E,123519,A,A*48"]);
    let end = commit_all(&mut buffer, &["$GPGLL,4807.038,N,01132.000,E,123520,A,A*41"]);
    assert!(buffer.last_report().rejections.is_empty());

    let meters = distance(&start.gll, &end.gll);
    assert!((meters - 1237.2).abs() < 1.0);

    // A wrong checksum leaves the previous fix in place, so nothing moved.
    let stale = commit_all(&mut buffer, &["$GPGLL,4807.038,N,01133.000,E,123521,A,A*00"]);
    assert_eq!(
        buffer.last_report().rejections[0].error,
        Error::ChecksumMismatch {
            expected: 0x41,
            found: 0x00
        }
    );
    assert_eq!(distance(&end.gll, &stale.gll), 0.0);
}
