use csv::{ReaderBuilder, StringRecord, Trim};

use crate::domain::RowInput;

const REQUIRED_COLUMNS: [&str; 2] = ["headline", "key_points"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvValidation {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum CsvIngestionError {
    #[error("malformed CSV: {0}")]
    Malformed(#[from] csv::Error),
    #[error("No valid rows found in CSV. Each row needs a headline and key_points.")]
    NoValidRows,
}

/// Structural checks only; never fails, so callers can show every problem at once.
pub fn validate_csv(text: &str) -> CsvValidation {
    if text.trim().is_empty() {
        return CsvValidation {
            is_valid: false,
            errors: vec!["CSV file is empty".to_string()],
        };
    }

    let mut errors = Vec::new();
    let mut reader = reader_for(text);

    let headers: Vec<String> = match reader.headers() {
        Ok(h) => h.iter().map(|c| c.trim().to_lowercase()).collect(),
        Err(e) => {
            return CsvValidation {
                is_valid: false,
                errors: vec![format!("Could not read CSV header: {}", e)],
            };
        }
    };

    if reader.records().next().is_none() {
        errors.push("CSV must contain a header row and at least one data row".to_string());
    }

    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|col| !headers.iter().any(|h| h == col))
        .collect();
    if !missing.is_empty() {
        errors.push(format!("Missing required columns: {}", missing.join(", ")));
    }

    CsvValidation {
        is_valid: errors.is_empty(),
        errors,
    }
}

/// Parses every usable row. Rows without a headline or key points are skipped
/// with a warning rather than failing the upload.
pub fn parse_csv(text: &str) -> Result<Vec<RowInput>, CsvIngestionError> {
    let mut reader = reader_for(text);
    let columns = Columns::from_headers(reader.headers()?);

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record?;
        let row_number = index + 1;

        let headline = columns.field(&record, "headline");
        let key_points = columns.field(&record, "key_points");

        let (Some(headline), Some(key_points)) = (headline, key_points) else {
            tracing::warn!(
                row = row_number,
                "Skipping CSV row without headline or key_points"
            );
            continue;
        };

        rows.push(RowInput {
            headline,
            key_points,
            category: columns.field(&record, "category"),
            author_name: columns.field(&record, "author_name"),
        });
    }

    if rows.is_empty() {
        return Err(CsvIngestionError::NoValidRows);
    }

    tracing::debug!(rows = rows.len(), "Parsed CSV rows");
    Ok(rows)
}

fn reader_for(text: &str) -> csv::Reader<&[u8]> {
    ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.trim_start_matches('\u{feff}').as_bytes())
}

fn normalize_header(header: &str) -> String {
    header
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect()
}

struct Columns(Vec<String>);

impl Columns {
    fn from_headers(headers: &StringRecord) -> Self {
        Self(headers.iter().map(normalize_header).collect())
    }

    /// Trimmed, non-empty value of the named column.
    fn field(&self, record: &StringRecord, name: &str) -> Option<String> {
        let index = self.0.iter().position(|h| h == name)?;
        record
            .get(index)
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }
}
