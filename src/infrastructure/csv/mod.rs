// ============================================================
// CSV INFRASTRUCTURE LAYER
// ============================================================
// Spreadsheet-friendly export of generated test cases

mod exporter;

pub use exporter::{export_filename, export_test_cases, CSV_CONTENT_TYPE, CSV_HEADERS};
