//! Text report writer
//!
//! Renders the event list as a tab-separated table for operators to read
//! or import into a spreadsheet. The report is rewritten whole on every
//! save, mirroring the binary log.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::arraylist::ArrayList;
use crate::event::EventRecord;

/// Timestamp format used in the report
const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// Write all events to a tab-formatted text report at `path`.
pub fn write_report<P: AsRef<Path>>(
    path: P,
    events: &ArrayList<EventRecord>,
) -> io::Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "******************** EVENT LOG ********************")?;
    writeln!(writer)?;
    writeln!(
        writer,
        "Timestamp\tOperator ID\tOperator\tEvent\tTemperature (C)\tHumidity (%)\tEngine-on (C)\tEngine-off (C)\tHumidity threshold (%)"
    )?;

    for record in events {
        writeln!(
            writer,
            "{}\t{}\t{}\t{}\t{:.2}\t{}\t{:.2}\t{:.2}\t{}",
            record.timestamp.format(TIMESTAMP_FORMAT),
            record.operator.id,
            record.operator.name,
            record.kind,
            record.temperature,
            record.humidity,
            record.engine_on_temperature,
            record.engine_off_temperature,
            record.humidity_threshold,
        )?;
    }

    writeln!(writer)?;
    writeln!(writer, "Total events: {}", events.len())?;

    writer.flush()?;
    Ok(())
}
