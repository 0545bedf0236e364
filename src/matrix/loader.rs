// Fixed-width matrix loader.
//
// Model output files are a flat stream of floats, one per line, that
// encode a row-major matrix. The row width is not stored in the file, so
// the caller supplies it (topic count for gam.dat, time-slice count for
// the per-topic log-probability files).

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{DtmError, Result};

const MEMORY_SOURCE: &str = "<memory>";

/// A row-major matrix where every row has exactly `width` values.
#[derive(Debug, Clone, PartialEq)]
pub struct RawMatrix {
    width: usize,
    rows: Vec<Vec<f64>>,
}

impl RawMatrix {
    /// Build a matrix from already-shaped rows, checking the width invariant.
    pub fn from_rows(rows: Vec<Vec<f64>>, width: usize) -> Result<Self> {
        if width == 0 {
            return Err(zero_width(MEMORY_SOURCE));
        }
        if let Some((index, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(DtmError::MalformedInput {
                source_name: MEMORY_SOURCE.to_string(),
                width,
                reason: format!("row {index} has {} values", row.len()),
            });
        }
        Ok(Self { width, rows })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&[f64]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    pub fn into_rows(self) -> Vec<Vec<f64>> {
        self.rows
    }
}

/// Group a token stream into rows of exactly `width` floats.
///
/// A new row starts as soon as the current one holds `width` values. Fails
/// on the first unparseable token, or if the last row comes up short.
pub fn from_tokens<'a, I>(tokens: I, width: usize, source_name: &str) -> Result<RawMatrix>
where
    I: IntoIterator<Item = &'a str>,
{
    if width == 0 {
        return Err(zero_width(source_name));
    }

    let mut rows: Vec<Vec<f64>> = Vec::new();
    let mut current: Vec<f64> = Vec::with_capacity(width);
    let mut count = 0usize;

    for token in tokens {
        let value = match token.parse::<f64>() {
            Ok(v) if v.is_finite() => v,
            _ => {
                return Err(DtmError::MalformedInput {
                    source_name: source_name.to_string(),
                    width,
                    reason: format!("token {count} ('{token}') is not a finite number"),
                })
            }
        };
        current.push(value);
        count += 1;

        if current.len() == width {
            rows.push(std::mem::replace(&mut current, Vec::with_capacity(width)));
        }
    }

    if !current.is_empty() {
        return Err(DtmError::MalformedInput {
            source_name: source_name.to_string(),
            width,
            reason: format!(
                "{count} values is not a multiple of the row width ({} left over)",
                current.len()
            ),
        });
    }

    Ok(RawMatrix { width, rows })
}

/// Parse whitespace/newline-delimited numeric text held in memory.
pub fn parse_matrix(text: &str, width: usize) -> Result<RawMatrix> {
    from_tokens(text.split_whitespace(), width, MEMORY_SOURCE)
}

/// Read a numeric text file and reshape it into rows of `width` values.
pub fn load_matrix(path: &Path, width: usize) -> Result<RawMatrix> {
    let text = fs::read_to_string(path).map_err(|e| DtmError::io(path, e))?;
    let source_name = path.display().to_string();
    let matrix = from_tokens(text.split_whitespace(), width, &source_name)?;

    debug!(
        path = %source_name,
        rows = matrix.row_count(),
        width,
        "Loaded matrix"
    );

    Ok(matrix)
}

fn zero_width(source_name: &str) -> DtmError {
    DtmError::MalformedInput {
        source_name: source_name.to_string(),
        width: 0,
        reason: "row width must be at least 1".to_string(),
    }
}
