use error_stack::report;

use super::{
    cell_address::{CellAddress, DateColumnRange},
    row::Row,
};
use crate::domain::{entry::Column, errors::ResolutionError};

/// First row of the attendance table holding a date.
pub const START_ROW: u32 = 7;
/// Header plus the longest possible month.
pub const NUMBER_OF_ROWS: u32 = 1 + 31;

/// Picks the worksheet whose title contains `month_year_label`.
///
/// Exactly one title must match: none and several are both errors, the
/// caller is never handed a guess.
pub fn find_sheet_name<S: AsRef<str>>(
    titles: &[S],
    month_year_label: &str,
) -> error_stack::Result<String, ResolutionError> {
    let mut matches = titles
        .iter()
        .map(AsRef::as_ref)
        .filter(|title| title.contains(month_year_label))
        .map(str::to_string)
        .collect::<Vec<_>>();

    match matches.len() {
        0 => Err(report!(ResolutionError::SheetNotFound(
            month_year_label.to_string()
        ))),
        1 => Ok(matches.remove(0)),
        _ => Err(report!(ResolutionError::AmbiguousSheet(matches))),
    }
}

/// The slice of the date column scanned for today's row.
pub fn date_column_range(sheet_name: &str) -> DateColumnRange {
    DateColumnRange {
        sheet_name: sheet_name.to_string(),
        first_row: Row::from_row(START_ROW),
        row_count: NUMBER_OF_ROWS,
    }
}

/// Scans `date_column_values` top-down from `start_row` and returns the
/// cell in `column` on the first row whose date cell contains `date_label`.
pub fn find_cell_address<S: AsRef<str>>(
    sheet_name: &str,
    date_column_values: &[S],
    start_row: Row,
    date_label: &str,
    column: Column,
) -> error_stack::Result<CellAddress, ResolutionError> {
    date_column_values
        .iter()
        .position(|value| value.as_ref().contains(date_label))
        .map(|offset| CellAddress {
            sheet_name: sheet_name.to_string(),
            column,
            row: start_row.offset(offset),
        })
        .ok_or_else(|| report!(ResolutionError::DateNotFound(date_label.to_string())))
}
