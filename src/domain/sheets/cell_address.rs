use super::{
    a1_notation::{A1Notation, ToA1Notation},
    row::Row,
};
use crate::domain::entry::Column;

/// A single cell of one worksheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellAddress {
    pub sheet_name: String,
    pub column: Column,
    pub row: Row,
}

impl ToA1Notation for CellAddress {
    fn to_a1_notation(&self) -> A1Notation {
        format!("{}!{}{}", self.sheet_name, self.column, self.row).into()
    }
}

/// The `A` column slice of a worksheet that holds one date per row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateColumnRange {
    pub sheet_name: String,
    pub first_row: Row,
    pub row_count: u32,
}

impl DateColumnRange {
    pub fn last_row(&self) -> Row {
        self.first_row + Row::from_index(self.row_count)
    }
}

impl ToA1Notation for DateColumnRange {
    fn to_a1_notation(&self) -> A1Notation {
        format!(
            "{}!A{}:A{}",
            self.sheet_name,
            self.first_row,
            self.last_row()
        )
        .into()
    }
}
