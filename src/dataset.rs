//! Dataset preview model and the local CSV fallback parser.
//!
//! The parser only backs the local preview path; datasets sent to the backend
//! are parsed server-side and come back as an authoritative preview.

use std::collections::HashMap;

/// Maximum number of rows rendered in the preview table.
pub const MAX_PREVIEW_ROWS: usize = 10;

/// Tabular preview of a dataset: ordered headers plus row mappings.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DatasetPreview {
    /// Ordered, unique column names.
    pub headers: Vec<String>,
    /// Row mappings from column name to cell text.
    pub rows: Vec<HashMap<String, String>>,
    /// Full dataset dimensions as reported by the backend, if known.
    pub shape: Option<(usize, usize)>,
}

impl DatasetPreview {
    /// Rows capped to [`MAX_PREVIEW_ROWS`] for table rendering.
    pub fn display_rows(&self) -> &[HashMap<String, String>] {
        &self.rows[..self.rows.len().min(MAX_PREVIEW_ROWS)]
    }

    /// Drop any row keys that are not listed in `headers`.
    pub fn sanitize(&mut self) {
        let headers = &self.headers;
        for row in &mut self.rows {
            row.retain(|key, _| headers.iter().any(|header| header == key));
        }
    }
}

/// Parse comma-delimited text into a preview.
pub fn parse_csv(text: &str) -> DatasetPreview {
    parse_delimited(text, ',')
}

/// Parse delimited text into a preview.
///
/// The first non-empty line provides the headers; each later line maps its
/// trimmed fields positionally onto those headers. Short rows fill missing
/// columns with the empty string, extra fields are dropped. Quoted fields are
/// not unescaped; this is a fallback, not a full CSV reader.
pub fn parse_delimited(text: &str, delimiter: char) -> DatasetPreview {
    let mut lines = text.lines().filter(|line| !line.is_empty());
    let Some(header_line) = lines.next() else {
        return DatasetPreview::default();
    };
    let headers: Vec<String> = header_line
        .split(delimiter)
        .map(|field| field.trim().to_string())
        .collect();
    let rows = lines
        .map(|line| {
            let fields: Vec<&str> = line.split(delimiter).map(str::trim).collect();
            headers
                .iter()
                .enumerate()
                .map(|(index, header)| {
                    let value = fields.get(index).copied().unwrap_or("");
                    (header.clone(), value.to_string())
                })
                .collect()
        })
        .collect();
    DatasetPreview {
        headers,
        rows,
        shape: None,
    }
}
