use nmea0183_epoch::{ChecksumMode, EpochBuffer, Error, GsvSequencing, distance};

const EPOCHS: [&[&str]; 2] = [
    &[
        "$GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W*6A",
        "$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47",
        "$GPGLL,4807.038,N,01131.000,E,123519,A,A*48",
        "$GPGSA,A,3,01,02,12,14,,,,,,,,,1.8,1.0,1.5*3B",
        "$GPTXT,01,01,02,ANTSTATUS=OK*3B",
    ],
    &[
        "$GPGLL,4807.038,N,01132.000,E,123520,A,A*41",
        "$GPVTG,054.7,T,034.4,M,9999.9,N,010.2,K,A*1C",
        "$GPZDA,123519,23,03,1994,00,00*42",
    ],
];

fn main() -> Result<(), Error> {
    env_logger::init();

    let mut session = EpochBuffer::builder()
        .checksum_mode(ChecksumMode::Verify)
        .gsv_sequencing(GsvSequencing::Positional)
        .build();
    let reader = session.handle();

    let mut previous = None;
    for sentences in EPOCHS {
        for sentence in sentences {
            if let Err(e) = session.append(sentence) {
                println!("Append failed: {e}");
            }
        }

        let snapshot = session.commit()?;
        println!("{snapshot}");

        let report = session.last_report();
        println!(
            "{} sentences: {} decoded, {} skipped, {} rejected",
            report.sentences,
            report.decoded,
            report.skipped,
            report.rejections.len()
        );
        for rejection in &report.rejections {
            println!(
                "  #{}: {} (code {})",
                rejection.index,
                rejection.error,
                rejection.error.code()
            );
        }

        if let Some(previous) = previous.replace(snapshot.clone()) {
            println!("Moved {:.1} m", distance(&previous.gll, &snapshot.gll));
        }
    }

    println!("Reader sees epoch {}", reader.load()?.epoch);
    Ok(())
}
