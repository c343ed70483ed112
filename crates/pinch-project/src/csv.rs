//! Plain-text stream table format.
//!
//! ```text
//! Tmin,10
//! CP,TSUPPLY,TTARGET
//! 2.0,150,50
//! 2.0,40,120
//! ```
//!
//! Cells are comma separated and trimmed. Blank lines are ignored and
//! trailing empty cells (as spreadsheet exports leave them) are dropped.
//! Stream rows are read from their first three cells; later columns (such
//! as a stream label) are ignored.

use crate::schema::{StreamRow, StreamTable};
use crate::{ProjectError, ProjectResult};

pub const TMIN_LABEL: &str = "Tmin";
pub const HEADER: [&str; 3] = ["CP", "TSUPPLY", "TTARGET"];

fn cells(line: &str) -> Vec<&str> {
    let mut cells: Vec<&str> = line.split(',').map(str::trim).collect();
    while cells.len() > 1 && cells.last().is_some_and(|c| c.is_empty()) {
        cells.pop();
    }
    cells
}

fn number(line: usize, column: &str, cell: &str) -> ProjectResult<f64> {
    let value: f64 = cell.parse().map_err(|_| ProjectError::Format {
        line,
        what: format!("{column} is not a number: '{cell}'"),
    })?;
    if !value.is_finite() {
        return Err(ProjectError::Format {
            line,
            what: format!("{column} must be finite, got {cell}"),
        });
    }
    Ok(value)
}

/// Parse CSV text into a stream table. Line numbers in errors are 1-based.
pub fn parse_csv(text: &str) -> ProjectResult<StreamTable> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l))
        .filter(|(_, l)| !l.trim().is_empty());

    let (line, tmin_line) = lines.next().ok_or_else(|| ProjectError::Format {
        line: 1,
        what: "empty stream table".to_string(),
    })?;
    let tmin = match cells(tmin_line).as_slice() {
        [label, value] if *label == TMIN_LABEL => number(line, TMIN_LABEL, value)?,
        _ => {
            return Err(ProjectError::Format {
                line,
                what: format!("expected '{TMIN_LABEL},<value>', got '{}'", tmin_line.trim()),
            });
        }
    };

    let (line, header) = lines.next().ok_or_else(|| ProjectError::Format {
        line: line + 1,
        what: format!("missing header '{}'", HEADER.join(",")),
    })?;
    if cells(header) != HEADER {
        return Err(ProjectError::Format {
            line,
            what: format!("expected header '{}', got '{}'", HEADER.join(","), header.trim()),
        });
    }

    let mut streams = Vec::new();
    for (line, text) in lines {
        match cells(text).as_slice() {
            [cp, ts, tt, ..] => streams.push(StreamRow::new(
                number(line, "CP", cp)?,
                number(line, "TSUPPLY", ts)?,
                number(line, "TTARGET", tt)?,
            )),
            other => {
                return Err(ProjectError::Format {
                    line,
                    what: format!("expected at least 3 cells, got {}", other.len()),
                });
            }
        }
    }

    tracing::debug!(tmin, streams = streams.len(), "parsed stream table");
    Ok(StreamTable::new(tmin, streams))
}

/// Render a table in the CSV layout accepted by [`parse_csv`]. Names are not written.
pub fn to_csv_string(table: &StreamTable) -> String {
    let mut out = format!("{TMIN_LABEL},{}\n{}\n", table.tmin, HEADER.join(","));
    for row in &table.streams {
        out.push_str(&format!("{},{},{}\n", row.cp, row.supply_temp, row.target_temp));
    }
    out
}
