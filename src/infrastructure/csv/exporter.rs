// ============================================================
// CSV EXPORTER
// ============================================================
// Serialize generated test cases for spreadsheet tools

use chrono::{DateTime, TimeZone};
use csv::{Terminator, WriterBuilder};

use crate::domain::error::{AppError, Result};
use crate::domain::test_case::TestCase;

/// Column titles, in output order.
pub const CSV_HEADERS: [&str; 7] = [
    "Test Case ID",
    "Scenario",
    "Label",
    "Steps",
    "Request Body",
    "Severity",
    "Priority",
];

/// UTF-8 byte order mark so Excel picks the right encoding.
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

pub const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";

/// Render test cases as a BOM-prefixed CSV document.
pub fn export_test_cases(test_cases: &[TestCase]) -> Result<Vec<u8>> {
    if test_cases.is_empty() {
        return Err(AppError::EmptyExportError);
    }

    let mut writer = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_writer(UTF8_BOM.to_vec());

    writer
        .write_record(CSV_HEADERS)
        .map_err(|e| AppError::Internal(format!("Failed to write CSV header: {}", e)))?;

    for (index, test_case) in test_cases.iter().enumerate() {
        writer
            .write_record([
                test_case.id(),
                test_case.scenario(),
                test_case.label(),
                test_case.steps(),
                test_case.request_body(),
                test_case.severity(),
                test_case.priority(),
            ])
            .map_err(|e| {
                AppError::Internal(format!("Failed to write CSV row {}: {}", index + 1, e))
            })?;
    }

    writer
        .into_inner()
        .map_err(|e| AppError::Internal(format!("Failed to flush CSV output: {}", e.error())))
}

/// Download name such as `api_test_cases_2024-05-01_134502.csv`.
pub fn export_filename<Tz>(now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    format!("api_test_cases_{}.csv", now.format("%Y-%m-%d_%H%M%S"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn login_case() -> TestCase {
        TestCase {
            id: Some("TC001".into()),
            scenario: Some("Login works".into()),
            label: Some("Positive".into()),
            steps: Some("1. Do X\n2. Do Y".into()),
            request_body: Some("N/A".into()),
            severity: Some("High".into()),
            priority: Some("P0".into()),
        }
    }

    #[test]
    fn test_empty_export_fails() {
        assert!(matches!(export_test_cases(&[]), Err(AppError::EmptyExportError)));
    }

    #[test]
    fn test_export_single_case() {
        let bytes = export_test_cases(&[login_case()]).unwrap();
        assert!(bytes.starts_with(UTF8_BOM));

        let text = String::from_utf8(bytes[UTF8_BOM.len()..].to_vec()).unwrap();
        assert_eq!(
            text,
            "Test Case ID,Scenario,Label,Steps,Request Body,Severity,Priority\n\
             TC001,Login works,Positive,\"1. Do X\n2. Do Y\",N/A,High,P0\n"
        );
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let bytes = export_test_cases(&[TestCase::default()]).unwrap();
        let text = String::from_utf8(bytes[UTF8_BOM.len()..].to_vec()).unwrap();
        assert_eq!(text.lines().nth(1), Some(",,,,N/A,,"));
    }

    #[test]
    fn test_quotes_and_commas_are_escaped() {
        let case = TestCase {
            id: Some("TC002".into()),
            scenario: Some("Name, with comma".into()),
            request_body: Some(r#"{"name": "O\"Brien"}"#.into()),
            ..Default::default()
        };
        let bytes = export_test_cases(&[case]).unwrap();
        let text = String::from_utf8(bytes[UTF8_BOM.len()..].to_vec()).unwrap();
        assert_eq!(
            text.lines().nth(1),
            Some(r#"TC002,"Name, with comma",,,"{""name"": ""O\""Brien""}",,"#)
        );
    }

    #[test]
    fn test_rows_keep_input_order() {
        let mut second = login_case();
        second.id = Some("TC010".into());
        let mut first = login_case();
        first.id = Some("TC009".into());

        let bytes = export_test_cases(&[second, first]).unwrap();
        let mut reader = csv::Reader::from_reader(&bytes[UTF8_BOM.len()..]);
        let ids: Vec<String> = reader
            .records()
            .map(|record| record.unwrap()[0].to_string())
            .collect();
        assert_eq!(ids, vec!["TC010", "TC009"]);
    }

    #[test]
    fn test_export_filename_pattern() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 13, 45, 2).unwrap();
        assert_eq!(export_filename(&now), "api_test_cases_2024-05-01_134502.csv");
    }
}
