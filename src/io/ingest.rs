//! CSV ingest.
//!
//! This module turns the sales CSV into `RawSalesRow`s:
//!
//! - **Strict schema**: `Date`, `Product`, `Region` and `Sales` columns must exist
//! - **Strict values**: a present date must be `YYYY-MM-DD`, a present sales
//!   value must be numeric; anything else aborts the load (exit code 2)
//! - **Missing is not invalid**: empty cells and the usual NA markers (`NA`,
//!   `N/A`, `null`, `None`, ...) become `None` and are left for the cleaning
//!   step to drop

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use chrono::NaiveDate;
use csv::StringRecord;
use tracing::{debug, info};

use crate::domain::RawSalesRow;
use crate::error::AppError;

const COL_DATE: &str = "date";
const COL_PRODUCT: &str = "product";
const COL_REGION: &str = "region";
const COL_SALES: &str = "sales";

const REQUIRED_COLUMNS: [&str; 4] = [COL_DATE, COL_PRODUCT, COL_REGION, COL_SALES];

/// Cell values read as missing in every column (matched exactly, after trimming).
const MISSING_MARKERS: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN", "<NA>", "N/A", "NA",
    "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Ingest output: parsed rows in file order.
#[derive(Debug, Clone)]
pub struct LoadedData {
    pub rows: Vec<RawSalesRow>,
    pub rows_read: usize,
}

/// Load the sales CSV at `path`.
pub fn load_sales_rows(path: &Path) -> Result<LoadedData, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::input(format!("Failed to open CSV '{}': {e}", path.display())))?;

    let loaded = read_sales_rows(file)?;
    info!(path = %path.display(), rows = loaded.rows_read, "loaded sales rows");
    Ok(loaded)
}

/// Parse sales rows from any reader. Split out from `load_sales_rows` for tests.
pub fn read_sales_rows<R: std::io::Read>(input: R) -> Result<LoadedData, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers = reader
        .headers()
        .map_err(|e| AppError::input(format!("Failed to read CSV headers: {e}")))?
        .clone();

    let header_map = build_header_map(&headers);
    ensure_required_columns_exist(&header_map)?;

    let mut rows = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        // +2: records() starts after the header, and lines are 1-based.
        let line = idx + 2;
        let record = result.map_err(|e| AppError::input(format!("CSV parse error on line {line}: {e}")))?;

        if record.len() > headers.len() {
            return Err(AppError::input(format!(
                "Line {line}: expected {} fields, found {}.",
                headers.len(),
                record.len()
            )));
        }

        let row = parse_row(&record, &header_map).map_err(|e| AppError::input(format!("Line {line}: {e}")))?;
        rows.push(row);
    }

    debug!(rows = rows.len(), "parsed CSV records");
    Ok(LoadedData {
        rows_read: rows.len(),
        rows,
    })
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports sometimes prefix the first header with a UTF-8 BOM.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn ensure_required_columns_exist(header_map: &HashMap<String, usize>) -> Result<(), AppError> {
    for name in REQUIRED_COLUMNS {
        if !header_map.contains_key(name) {
            return Err(AppError::input(format!("Missing required column: `{name}`")));
        }
    }
    Ok(())
}

fn parse_row(record: &StringRecord, header_map: &HashMap<String, usize>) -> Result<RawSalesRow, String> {
    let date = get_optional(record, header_map, COL_DATE).map(parse_date).transpose()?;
    let product = get_optional(record, header_map, COL_PRODUCT).map(str::to_string);
    let region = get_optional(record, header_map, COL_REGION).map(str::to_string);
    let sales = get_optional(record, header_map, COL_SALES)
        .map(parse_sales)
        .transpose()?
        .flatten();

    Ok(RawSalesRow {
        date,
        product,
        region,
        sales,
    })
}

fn get_optional<'a>(record: &'a StringRecord, header_map: &HashMap<String, usize>, name: &str) -> Option<&'a str> {
    let idx = header_map.get(name)?;
    record
        .get(*idx)
        .map(str::trim)
        .filter(|s| !s.is_empty() && !is_missing_marker(s))
}

fn is_missing_marker(s: &str) -> bool {
    MISSING_MARKERS.contains(&s)
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| format!("Invalid date '{s}'. Expected YYYY-MM-DD."))
}

/// Parse a sales cell. `NaN` is a missing value, not an error.
fn parse_sales(s: &str) -> Result<Option<f64>, String> {
    let v = s
        .parse::<f64>()
        .map_err(|_| format!("Invalid sales value '{s}'. Expected a number."))?;
    if v.is_nan() {
        return Ok(None);
    }
    if !v.is_finite() {
        return Err(format!("Invalid sales value '{s}'. Expected a finite number."));
    }
    Ok(Some(v))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{DEFAULT_DATA_FILE, SAMPLE_CSV, write_sample_dataset};
    use crate::error::EXIT_INPUT;

    #[test]
    fn sample_round_trips_to_twelve_complete_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_DATA_FILE);
        write_sample_dataset(&path).unwrap();

        let loaded = load_sales_rows(&path).unwrap();
        assert_eq!(loaded.rows_read, 12);
        assert!(loaded.rows.iter().all(|r| {
            r.date.is_some() && r.product.is_some() && r.region.is_some() && r.sales.is_some()
        }));

        let first = &loaded.rows[0];
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2023, 1, 5));
        assert_eq!(first.product.as_deref(), Some("Mobile"));
        assert_eq!(first.region.as_deref(), Some("North"));
        assert_eq!(first.sales, Some(1200.0));
    }

    #[test]
    fn parses_from_embedded_text() {
        let loaded = read_sales_rows(SAMPLE_CSV.as_bytes()).unwrap();
        assert_eq!(loaded.rows.len(), 12);
        assert_eq!(loaded.rows[11].sales, Some(4000.0));
    }

    #[test]
    fn empty_cells_become_missing_fields() {
        let csv = "Date,Product,Region,Sales\n2023-01-05,,North,1200\n2023-01-06,TV,North,\n2023-01-07,TV\n";
        let loaded = read_sales_rows(csv.as_bytes()).unwrap();
        assert_eq!(loaded.rows.len(), 3);
        assert_eq!(loaded.rows[0].product, None);
        assert_eq!(loaded.rows[1].sales, None);
        assert_eq!(loaded.rows[2].region, None);
        assert_eq!(loaded.rows[2].sales, None);
    }

    #[test]
    fn nan_sales_is_missing() {
        let csv = "Date,Product,Region,Sales\n2023-01-05,TV,North,NaN\n";
        let loaded = read_sales_rows(csv.as_bytes()).unwrap();
        assert_eq!(loaded.rows[0].sales, None);
    }

    #[test]
    fn na_markers_are_missing_in_every_column() {
        let csv = concat!(
            "Date,Product,Region,Sales\n",
            "NA,TV,North,100\n",
            "2023-01-06,N/A,North,100\n",
            "2023-01-07,TV,null,100\n",
            "2023-01-08,TV,North,NA\n",
            "2023-01-09,TV,North,100\n",
        );
        let loaded = read_sales_rows(csv.as_bytes()).unwrap();
        assert_eq!(loaded.rows_read, 5);
        assert_eq!(loaded.rows[0].date, None);
        assert_eq!(loaded.rows[1].product, None);
        assert_eq!(loaded.rows[2].region, None);
        assert_eq!(loaded.rows[3].sales, None);

        let cleaned = crate::analysis::drop_incomplete(loaded.rows);
        assert_eq!(cleaned.records.len(), 1);
        assert_eq!(cleaned.dropped, 4);
    }

    #[test]
    fn na_markers_match_exactly() {
        assert!(is_missing_marker("#N/A"));
        assert!(is_missing_marker("<NA>"));
        assert!(!is_missing_marker("Na"));
        assert!(!is_missing_marker("NA-East"));
    }

    #[test]
    fn headers_are_case_insensitive_and_bom_tolerant() {
        let csv = "\u{feff}DATE,product,Region,SALES\n2023-02-10,Mobile,East,1500\n";
        let loaded = read_sales_rows(csv.as_bytes()).unwrap();
        assert_eq!(loaded.rows[0].sales, Some(1500.0));
    }

    #[test]
    fn invalid_date_is_fatal() {
        let csv = "Date,Product,Region,Sales\n2023-02-30,Mobile,East,1500\n";
        let err = read_sales_rows(csv.as_bytes()).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_INPUT);
        assert!(err.message().contains("Line 2"));
        assert!(err.message().contains("Invalid date"));
    }

    #[test]
    fn non_numeric_sales_is_fatal() {
        let csv = "Date,Product,Region,Sales\n2023-02-10,Mobile,East,lots\n";
        let err = read_sales_rows(csv.as_bytes()).unwrap_err();
        assert!(err.message().contains("Invalid sales value"));
    }

    #[test]
    fn missing_column_is_fatal() {
        let csv = "Date,Product,Sales\n2023-02-10,Mobile,1500\n";
        let err = read_sales_rows(csv.as_bytes()).unwrap_err();
        assert_eq!(err.message(), "Missing required column: `region`");
    }

    #[test]
    fn extra_fields_are_fatal() {
        let csv = "Date,Product,Region,Sales\n2023-02-10,Mobile,East,1500,oops\n";
        let err = read_sales_rows(csv.as_bytes()).unwrap_err();
        assert!(err.message().contains("expected 4 fields, found 5"));
    }

    #[test]
    fn missing_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_sales_rows(&dir.path().join("absent.csv")).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_INPUT);
        assert!(err.message().starts_with("Failed to open CSV"));
    }
}
