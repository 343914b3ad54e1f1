use std::fmt::Formatter;

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Row {
    index: u32,
}

impl Row {
    pub fn from_index(index: u32) -> Self {
        Row { index }
    }

    pub fn from_row(row: u32) -> Self {
        Row {
            index: row.saturating_sub(1), // Convert to zero-based index
        }
    }

    /// Returns the row number as a 1-based index, as shown in the spreadsheet.
    /// # Examples
    /// ```
    /// use stag::domain::sheets::row::Row;
    /// let row = Row::from_index(0);
    /// assert_eq!(row.row(), 1);
    /// let row = Row::from_row(7);
    /// assert_eq!(row.row(), 7);
    /// ```
    pub fn row(&self) -> u32 {
        self.index.saturating_add(1)
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    /// The row `offset` rows below this one.
    pub fn offset(&self, offset: usize) -> Row {
        let offset = u32::try_from(offset).unwrap_or(u32::MAX);
        *self + Row::from_index(offset)
    }
}

impl std::ops::Add for Row {
    type Output = Row;

    fn add(self, rhs: Row) -> Self::Output {
        Row::from_index(self.index.saturating_add(rhs.index))
    }
}

impl std::fmt::Display for Row {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.row())
    }
}

impl std::fmt::Debug for Row {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Row(index: {}, row: {})", self.index(), self.row())
    }
}
