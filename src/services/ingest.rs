use crate::models::ScoreInputRecord;
use thiserror::Error;

/// Name used for rows whose name cell is empty or absent
pub const UNNAMED_STUDENT: &str = "Unnamed Student";

const NAME_HEADERS: &[&str] = &["nome", "name"];
const WORK_HEADERS: &[&str] = &["trab", "work"];
const EXAM_HEADERS: &[&str] = &["av", "exam"];
const MAKEUP_HEADERS: &[&str] = &["avs", "makeup"];

/// Errors that can occur while reading an uploaded spreadsheet
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Spreadsheet is not valid UTF-8")]
    Encoding,

    #[error("Row {row}: column '{column}' is not a number ({value:?})")]
    InvalidNumber { row: usize, column: &'static str, value: String },

    #[error("Row {row}: column '{column}' cannot be negative ({value})")]
    NegativeScore { row: usize, column: &'static str, value: f64 },

    #[error("Row {row} has {found} cells but the header has {expected} (unquoted decimal comma?)")]
    ExtraCells { row: usize, expected: usize, found: usize },
}

/// Column positions resolved from the header row
#[derive(Debug, Default, Clone, Copy)]
struct ColumnMap {
    name: Option<usize>,
    work: Option<usize>,
    exam: Option<usize>,
    makeup: Option<usize>,
}

impl ColumnMap {
    fn from_headers(headers: &csv::StringRecord) -> Self {
        let find = |aliases: &[&str]| {
            headers
                .iter()
                .position(|h| aliases.iter().any(|a| h.trim().eq_ignore_ascii_case(a)))
        };

        Self {
            name: find(NAME_HEADERS),
            work: find(WORK_HEADERS),
            exam: find(EXAM_HEADERS),
            makeup: find(MAKEUP_HEADERS),
        }
    }
}

/// Parse an uploaded CSV body into score rows
///
/// Accepted headers (case-insensitive): `nome`/`name`, `Trab`/`work`,
/// `AV`/`exam`, `AVS`/`makeup`. Missing columns and blank cells count as 0.
/// Semicolon-separated files are detected from the header line, and a
/// decimal comma (`7,5`) is accepted. Short rows are padded with zeros, but a
/// row wider than the header is rejected since its columns can't be trusted.
pub fn parse_scores(body: &[u8]) -> Result<Vec<ScoreInputRecord>, IngestError> {
    let text = std::str::from_utf8(body).map_err(|_| IngestError::Encoding)?;
    let text = text.trim_start_matches('\u{feff}');

    if text.trim().is_empty() {
        return Ok(vec![]);
    }

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(detect_delimiter(text))
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?;
    let width = headers.len();
    let columns = ColumnMap::from_headers(headers);
    tracing::debug!("Resolved spreadsheet columns: {:?}", columns);

    let mut rows = Vec::new();
    for (i, result) in reader.records().enumerate() {
        let record = result?;
        let row = i + 1;

        if record.len() > width {
            return Err(IngestError::ExtraCells { row, expected: width, found: record.len() });
        }

        let name = columns
            .name
            .and_then(|idx| record.get(idx))
            .filter(|s| !s.is_empty())
            .unwrap_or(UNNAMED_STUDENT)
            .to_string();

        rows.push(ScoreInputRecord {
            name,
            work_score: read_score(&record, columns.work, row, "Trab")?,
            exam_score: read_score(&record, columns.exam, row, "AV")?,
            makeup_exam_score: read_score(&record, columns.makeup, row, "AVS")?,
        });
    }

    tracing::info!("Parsed {} student rows", rows.len());
    Ok(rows)
}

fn detect_delimiter(text: &str) -> u8 {
    let header = text.lines().next().unwrap_or_default();
    if header.contains(';') && !header.contains(',') {
        b';'
    } else {
        b','
    }
}

fn read_score(
    record: &csv::StringRecord,
    column: Option<usize>,
    row: usize,
    label: &'static str,
) -> Result<f64, IngestError> {
    let cell = match column.and_then(|idx| record.get(idx)) {
        Some(cell) if !cell.is_empty() => cell,
        _ => return Ok(0.0),
    };

    let value: f64 = cell
        .replace(',', ".")
        .parse()
        .ok()
        .filter(|v: &f64| v.is_finite())
        .ok_or_else(|| IngestError::InvalidNumber {
            row,
            column: label,
            value: cell.to_string(),
        })?;

    if value < 0.0 {
        return Err(IngestError::NegativeScore { row, column: label, value });
    }

    Ok(value)
}
