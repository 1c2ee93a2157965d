//! Evaluate a delimited file of observations, one observation per row.
//!
//! Every row that parses is written back unchanged with the `decision` and `reason` columns
//! appended. Short rows are padded with empty fields so the appended columns line up with the
//! header. Rows that fail to decode or parse, or that are longer than the header, are left out of
//! the output and reported in the [`BatchSummary`].

use crate::{
    engine::evaluate_with,
    error::{Result, SeedingError},
    observation::ObservationField,
    parse::observation_from_record,
    thresholds::Thresholds,
    verdict::Verdict,
};
use std::{
    collections::HashMap,
    fmt::Display,
    io::{Read, Write},
};
use strum::IntoEnumIterator;

/// Header of the appended verdict column.
pub const DECISION_COLUMN: &str = "decision";
/// Header of the appended reason column.
pub const REASON_COLUMN: &str = "reason";

/// A row that could not be evaluated.
#[derive(Debug)]
pub struct RejectedRow {
    /// Data row number, starting at 1 for the first row after the header.
    pub row: usize,
    /// Why the row was rejected.
    pub error: SeedingError,
}

/// Tally of a batch run.
#[derive(Debug, Default)]
pub struct BatchSummary {
    counts: HashMap<Verdict, usize>,
    rejected: Vec<RejectedRow>,
}

impl BatchSummary {
    /// Number of rows that received this verdict.
    pub fn count(&self, verdict: Verdict) -> usize {
        self.counts.get(&verdict).copied().unwrap_or(0)
    }

    /// Number of rows evaluated.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Number of rows that received any approval.
    pub fn approved(&self) -> usize {
        Verdict::iter()
            .filter(|v| v.is_approved())
            .map(|v| self.count(v))
            .sum()
    }

    /// Rows that could not be evaluated, in file order.
    pub fn rejected(&self) -> &[RejectedRow] {
        &self.rejected
    }

    fn record(&mut self, verdict: Verdict) {
        *self.counts.entry(verdict).or_insert(0) += 1;
    }
}

impl Display for BatchSummary {
    fn fmt(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(
            formatter,
            "{} rows evaluated, {} rejected",
            self.total(),
            self.rejected.len()
        )?;
        for verdict in Verdict::iter() {
            writeln!(formatter, "  {:<18} {}", verdict.tag(), self.count(verdict))?;
        }
        for rejected in &self.rejected {
            writeln!(formatter, "  row {}: {}", rejected.row, rejected.error)?;
        }
        Ok(())
    }
}

/// Evaluate every row of a CSV source against the standard operational ranges.
///
/// # Examples
///
/// ```rust
/// use cloud_seeding::{batch, Verdict};
///
/// let input = "\
/// id,radar_reflectivity_dbz,cloud_base_m,cloud_top_m,rel_humidity_pct
/// a,15,1000,3000,70
/// b,5,1000,3000,70
/// ";
///
/// let mut output = Vec::new();
/// let summary = batch::process(input.as_bytes(), &mut output).unwrap();
///
/// assert_eq!(summary.count(Verdict::ApprovedDrone), 1);
/// assert_eq!(summary.count(Verdict::Denied), 1);
///
/// let output = String::from_utf8(output).unwrap();
/// assert!(output.starts_with("id,radar_reflectivity_dbz,cloud_base_m,cloud_top_m,rel_humidity_pct,decision,reason"));
/// ```
pub fn process<R, W>(source: R, sink: W) -> Result<BatchSummary>
where
    R: Read,
    W: Write,
{
    process_with(source, sink, &Thresholds::default())
}

/// Evaluate every row of a CSV source against custom thresholds.
pub fn process_with<R, W>(source: R, sink: W, thresholds: &Thresholds) -> Result<BatchSummary>
where
    R: Read,
    W: Write,
{
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(source);
    let mut writer = csv::WriterBuilder::new().flexible(true).from_writer(sink);

    let headers = reader.headers()?.clone();
    let reflectivity = ObservationField::Reflectivity.name();
    if !headers.iter().any(|name| name.trim() == reflectivity) {
        return Err(SeedingError::MissingColumn(reflectivity));
    }

    let mut out_headers = headers.clone();
    out_headers.push_field(DECISION_COLUMN);
    out_headers.push_field(REASON_COLUMN);
    writer.write_record(&out_headers)?;

    let mut summary = BatchSummary::default();
    for (idx, record) in reader.records().enumerate() {
        let row = idx + 1;

        let parsed = match record
            .map_err(SeedingError::from)
            .and_then(|record| check_row(&headers, record))
        {
            Ok(record) => observation_from_record(&headers, &record).map(|obs| (record, obs)),
            // A decoding error only spoils this record, anything else ends the run.
            Err(SeedingError::Csv(err)) if !matches!(err.kind(), csv::ErrorKind::Utf8 { .. }) => {
                return Err(err.into());
            }
            Err(error) => Err(error),
        };

        let (mut out, obs) = match parsed {
            Ok(pair) => pair,
            Err(error) => {
                tracing::warn!(row, %error, "skipping row");
                summary.rejected.push(RejectedRow { row, error });
                continue;
            }
        };

        let decision = evaluate_with(&obs, thresholds);
        tracing::debug!(row, verdict = %decision.verdict(), "evaluated row");
        summary.record(decision.verdict());

        while out.len() < headers.len() {
            out.push_field("");
        }
        out.push_field(decision.verdict().tag());
        out.push_field(decision.reason());
        writer.write_record(&out)?;
    }

    writer.flush()?;
    tracing::info!(
        evaluated = summary.total(),
        approved = summary.approved(),
        rejected = summary.rejected.len(),
        "batch complete"
    );

    Ok(summary)
}

fn check_row(headers: &csv::StringRecord, record: csv::StringRecord) -> Result<csv::StringRecord> {
    if record.len() > headers.len() {
        Err(SeedingError::RowLength {
            expected: headers.len(),
            found: record.len(),
        })
    } else {
        Ok(record)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_missing_reflectivity_column() {
        let input = "cloud_base_m,cloud_top_m\n1000,3000\n";
        let mut output = Vec::new();

        let err = process(input.as_bytes(), &mut output).unwrap_err();
        assert!(matches!(
            err,
            SeedingError::MissingColumn("radar_reflectivity_dbz")
        ));
        assert!(output.is_empty());
    }

    #[test]
    fn test_summary_counts() {
        let mut summary = BatchSummary::default();
        summary.record(Verdict::ApprovedDrone);
        summary.record(Verdict::ApprovedMixed);
        summary.record(Verdict::Denied);
        summary.record(Verdict::Denied);

        assert_eq!(summary.total(), 4);
        assert_eq!(summary.approved(), 2);
        assert_eq!(summary.count(Verdict::Denied), 2);
        assert_eq!(summary.count(Verdict::Conditional), 0);

        let report = summary.to_string();
        assert!(report.starts_with("4 rows evaluated, 0 rejected"));
        assert!(report.contains("CONDITIONAL"));
    }

    #[test]
    fn test_check_row() {
        let headers = csv::StringRecord::from(vec!["id", "radar_reflectivity_dbz"]);

        assert!(check_row(&headers, csv::StringRecord::from(vec!["a"])).is_ok());
        assert!(check_row(&headers, csv::StringRecord::from(vec!["a", "15"])).is_ok());
        assert!(matches!(
            check_row(&headers, csv::StringRecord::from(vec!["a", "15", "x"])),
            Err(SeedingError::RowLength {
                expected: 2,
                found: 3
            })
        ));
    }
}
