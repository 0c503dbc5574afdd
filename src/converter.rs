use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::error::{Csv2QifError, Result};
use crate::qif::{header_line, map_row};
use crate::settings::Settings;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ConvertSummary {
    /// Data rows read, not counting a skipped header.
    pub rows: usize,
    pub records: usize,
    pub empty_rows: usize,
    pub date_warnings: usize,
}

/// Convert `csv_path` into a freshly created (or truncated) QIF file.
pub fn convert(csv_path: &Path, qif_path: &Path, settings: Option<&Settings>) -> Result<ConvertSummary> {
    let settings = settings.ok_or(Csv2QifError::ConfigurationMissing)?;

    let input = File::open(csv_path).map_err(|source| Csv2QifError::Io {
        path: csv_path.to_path_buf(),
        source,
    })?;
    let output = File::create(qif_path).map_err(|source| Csv2QifError::Io {
        path: qif_path.to_path_buf(),
        source,
    })?;

    log::info!("converting {} -> {}", csv_path.display(), qif_path.display());
    let mut out = BufWriter::new(output);
    let summary = convert_stream(BufReader::new(input), &mut out, settings)?;
    out.flush()?;
    log::info!(
        "wrote {} records from {} rows to {}",
        summary.records,
        summary.rows,
        qif_path.display()
    );
    Ok(summary)
}

/// Stream CSV records from `input` to QIF lines on `out`, one row at a time.
pub fn convert_stream<R: Read, W: Write>(input: R, out: &mut W, settings: &Settings) -> Result<ConvertSummary> {
    let options = &settings.options;
    writeln!(out, "{}", header_line(options.account_type()))?;

    // Header handling stays here so the header row is still checked for
    // field count like any other row.
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(input);

    let mut summary = ConvertSummary::default();
    // Byte records: cells are copied verbatim, whatever their encoding.
    let mut record = csv::ByteRecord::new();
    let mut line = 0u64;
    while rdr.read_byte_record(&mut record)? {
        line += 1;
        if options.csv_has_header && line == 1 {
            log::debug!("skipping header row");
            continue;
        }
        summary.rows += 1;

        let row: Vec<&[u8]> = record.iter().collect();
        let mapped = map_row(&row, &settings.columns, options);
        if mapped.date_fallback {
            summary.date_warnings += 1;
        }
        if !mapped.has_data {
            log::debug!("row {line} has no mapped data, skipping");
            summary.empty_rows += 1;
            continue;
        }
        for qif_line in &mapped.lines {
            out.write_all(qif_line)?;
            out.write_all(b"\n")?;
        }
        summary.records += 1;
    }
    Ok(summary)
}
