//! # Bulk CSV Codec
//!
//! Parses the bulk input CSV into [`BatchRow`]s and renders a
//! [`BatchReport`] back out as the result CSV.
//!
//! Schema validation is the one fail-fast step: a header missing any
//! required column rejects the whole request before a single row is
//! processed. The output field set is derived from the outcomes actually
//! present, and every row is padded to the full header so mixed batches
//! stay rectangular.

use crate::application::error::{BatchError, BatchResult};
use crate::application::services::bulk_engine::{BatchReport, BatchRow, RowOutcome};
use std::collections::HashSet;

/// The twelve input columns every bulk request must carry.
pub const REQUIRED_COLUMNS: [&str; 12] = [
    "sender_name",
    "sender_phone",
    "sender_addr",
    "sender_city",
    "sender_state",
    "sender_zip",
    "receiver_name",
    "receiver_phone",
    "receiver_addr",
    "receiver_city",
    "receiver_state",
    "receiver_zip",
];

/// Output columns appended when at least one row succeeded.
const SUCCESS_COLUMNS: [&str; 7] = [
    "ups_cost",
    "usps_cost",
    "upsdays",
    "uspsdays",
    "label_url",
    "optimal_service",
    "optimal_cost",
];

/// Output column appended when at least one row failed.
const ERROR_COLUMN: &str = "error";

/// Parses bulk CSV input into rows.
///
/// Tolerates a UTF-8 BOM, surrounding whitespace in headers and fields,
/// and extra columns beyond the required twelve.
///
/// # Errors
///
/// Returns `BatchError::MissingColumns` listing every absent required
/// column, or `BatchError::Malformed` when the input cannot be read as
/// CSV at all.
pub fn parse_rows(input: &str) -> BatchResult<Vec<BatchRow>> {
    let input = input.strip_prefix('\u{feff}').unwrap_or(input);

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(input.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| BatchError::malformed(e.to_string()))?
        .clone();
    let present: HashSet<&str> = headers.iter().collect();

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|column| !present.contains(**column))
        .map(|column| (*column).to_owned())
        .collect();
    if !missing.is_empty() {
        return Err(BatchError::missing_columns(missing));
    }

    let mut rows = Vec::new();
    for record in reader.deserialize::<BatchRow>() {
        rows.push(record.map_err(|e| BatchError::malformed(e.to_string()))?);
    }
    Ok(rows)
}

/// Renders a batch report as the result CSV.
///
/// The header starts with the twelve input columns; quote columns appear
/// only when some row succeeded and the `error` column only when some row
/// failed. A blank row and a summary row close the document.
///
/// # Errors
///
/// Returns `BatchError::Malformed` if the CSV cannot be serialized.
pub fn write_report(report: &BatchReport) -> BatchResult<String> {
    let any_success = report.successful_count() > 0;
    let any_error = report.error_count() > 0;

    let mut header: Vec<&str> = REQUIRED_COLUMNS.to_vec();
    if any_success {
        header.extend(SUCCESS_COLUMNS);
    }
    if any_error {
        header.push(ERROR_COLUMN);
    }

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(&header)
        .map_err(|e| BatchError::malformed(e.to_string()))?;

    for result in report.rows() {
        let mut record = input_fields(result.row());

        match result.outcome() {
            RowOutcome::Success(quote) => {
                if any_success {
                    record.extend([
                        quote.ups_cost().to_string(),
                        quote.usps_cost().to_string(),
                        quote.ups_days().to_string(),
                        quote.usps_days().to_string(),
                        quote.label_url().unwrap_or_default().to_owned(),
                        quote.optimal_service().to_string(),
                        quote.optimal_cost().to_string(),
                    ]);
                }
                if any_error {
                    record.push(String::new());
                }
            }
            RowOutcome::Error { message } => {
                if any_success {
                    record.extend(std::iter::repeat_n(String::new(), SUCCESS_COLUMNS.len()));
                }
                if any_error {
                    record.push(message.clone());
                }
            }
        }

        writer
            .write_record(&record)
            .map_err(|e| BatchError::malformed(e.to_string()))?;
    }

    writer
        .write_record(vec![""; header.len()])
        .map_err(|e| BatchError::malformed(e.to_string()))?;

    let mut summary = vec![String::new(); header.len()];
    summary[0] = "Summary".to_owned();
    summary[1] = format!("Total Successful: {}", report.successful_count());
    summary[2] = format!("Total Errors: {}", report.error_count());
    writer
        .write_record(&summary)
        .map_err(|e| BatchError::malformed(e.to_string()))?;

    let bytes = writer
        .into_inner()
        .map_err(|e| BatchError::malformed(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| BatchError::malformed(e.to_string()))
}

fn input_fields(row: &BatchRow) -> Vec<String> {
    vec![
        row.sender_name.clone(),
        row.sender_phone.clone(),
        row.sender_addr.clone(),
        row.sender_city.clone(),
        row.sender_state.clone(),
        row.sender_zip.clone(),
        row.receiver_name.clone(),
        row.receiver_phone.clone(),
        row.receiver_addr.clone(),
        row.receiver_city.clone(),
        row.receiver_state.clone(),
        row.receiver_zip.clone(),
    ]
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::application::services::bulk_engine::RowResult;
    use crate::application::services::quote_resolver::ResolvedQuote;
    use crate::domain::entities::address::{Address, AddressPair};
    use crate::domain::entities::quote_record::QuoteRecord;
    use crate::domain::value_objects::Cost;

    const VALID_INPUT: &str = "\
sender_name,sender_phone,sender_addr,sender_city,sender_state,sender_zip,receiver_name,receiver_phone,receiver_addr,receiver_city,receiver_state,receiver_zip
Ada,5551234,1 Main St,Austin,TX,73301,Grace,5555678,2 Oak Ave,Boston,MA,02101
Ada,5551234,1 Main St,Austin,TX,73301,Alan,5559999,3 Elm Rd,Denver,CO,80201
";

    fn test_row(receiver_name: &str) -> BatchRow {
        BatchRow {
            sender_name: "Ada".to_owned(),
            sender_phone: "5551234".to_owned(),
            sender_addr: "1 Main St".to_owned(),
            sender_city: "Austin".to_owned(),
            sender_state: "TX".to_owned(),
            sender_zip: "73301".to_owned(),
            receiver_name: receiver_name.to_owned(),
            receiver_phone: "5555678".to_owned(),
            receiver_addr: "2 Oak Ave".to_owned(),
            receiver_city: "Boston".to_owned(),
            receiver_state: "MA".to_owned(),
            receiver_zip: "02101".to_owned(),
        }
    }

    fn success_result(receiver_name: &str) -> RowResult {
        let row = test_row(receiver_name);
        let pair = AddressPair::new(
            Address::new("Ada", "5551234", "1 Main St", "Austin", "TX", "73301").unwrap(),
            Address::new(receiver_name, "5555678", "2 Oak Ave", "Boston", "MA", "02101").unwrap(),
        );
        let record = QuoteRecord::new(
            pair,
            Cost::from_f64(100.0).unwrap(),
            Cost::from_f64(102.5).unwrap(),
            6,
            7,
            Some("http://localhost:8080/labels/label_test.gif".to_owned()),
        );
        RowResult::new(row, RowOutcome::Success(ResolvedQuote::from_record(&record, false)))
    }

    fn error_result(receiver_name: &str, message: &str) -> RowResult {
        RowResult::new(
            test_row(receiver_name),
            RowOutcome::Error {
                message: message.to_owned(),
            },
        )
    }

    #[test]
    fn parses_valid_input() {
        let rows = parse_rows(VALID_INPUT).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].receiver_name, "Grace");
        assert_eq!(rows[1].receiver_city, "Denver");
    }

    #[test]
    fn tolerates_bom_and_padding() {
        let input = format!("\u{feff}{}", VALID_INPUT.replace("Ada", " Ada "));
        let rows = parse_rows(&input).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].sender_name, "Ada");
    }

    #[test]
    fn tolerates_extra_columns() {
        let input = "\
sender_name,sender_phone,sender_addr,sender_city,sender_state,sender_zip,receiver_name,receiver_phone,receiver_addr,receiver_city,receiver_state,receiver_zip,notes
Ada,5551234,1 Main St,Austin,TX,73301,Grace,5555678,2 Oak Ave,Boston,MA,02101,fragile
";
        let rows = parse_rows(input).unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn missing_columns_are_all_reported() {
        let input = "sender_name,receiver_name\nAda,Grace\n";
        let err = parse_rows(input).unwrap_err();
        match err {
            BatchError::MissingColumns { missing } => {
                assert_eq!(missing.len(), 10);
                assert!(missing.contains(&"sender_zip".to_owned()));
                assert!(missing.contains(&"receiver_city".to_owned()));
            }
            other => panic!("expected missing columns, got {}", other),
        }
    }

    #[test]
    fn header_only_input_parses_to_no_rows() {
        let header = VALID_INPUT.lines().next().unwrap();
        let rows = parse_rows(header).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn all_success_report_has_no_error_column() {
        let report = BatchReport::from_rows(vec![success_result("Grace")]);
        let output = write_report(&report).unwrap();
        let header = output.lines().next().unwrap();

        assert!(header.contains("ups_cost"));
        assert!(header.contains("optimal_cost"));
        assert!(!header.contains("error"));
        assert!(output.contains("100.00"));
        assert!(output.contains("102.50"));
        assert!(output.contains("UPS"));
    }

    #[test]
    fn all_error_report_has_no_quote_columns() {
        let report =
            BatchReport::from_rows(vec![error_result("Grace", "carrier timeout")]);
        let output = write_report(&report).unwrap();
        let header = output.lines().next().unwrap();

        assert!(!header.contains("ups_cost"));
        assert!(header.ends_with("error"));
        assert!(output.contains("carrier timeout"));
    }

    #[test]
    fn mixed_report_pads_both_shapes() {
        let report = BatchReport::from_rows(vec![
            success_result("Grace"),
            error_result("Alan", "missing required field: receiver_zip"),
        ]);
        let output = write_report(&report).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        let width = lines[0].split(',').count();
        assert_eq!(width, 12 + 7 + 1);
        // Every data row is padded to the full header width.
        assert_eq!(lines[1].split(',').count(), width);
        assert_eq!(lines[2].split(',').count(), width);
        assert!(lines[2].contains("missing required field"));
    }

    #[test]
    fn report_ends_with_blank_then_summary() {
        let report = BatchReport::from_rows(vec![
            success_result("Grace"),
            error_result("Alan", "boom"),
        ]);
        let output = write_report(&report).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        let blank = lines[lines.len() - 2];
        assert!(blank.chars().all(|c| c == ','), "blank row was {:?}", blank);

        let summary = lines[lines.len() - 1];
        assert!(summary.starts_with("Summary"));
        assert!(summary.contains("Total Successful: 1"));
        assert!(summary.contains("Total Errors: 1"));
    }
}
