use std::fmt::Formatter;

/// Column of the attendance sheet a time is written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    C,
    D,
}

impl Column {
    pub fn letter(&self) -> &'static str {
        match self {
            Column::C => "C",
            Column::D => "D",
        }
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Which half of the working day is being recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Start,
    Stop,
}

impl EntryKind {
    pub fn column(&self) -> Column {
        match self {
            EntryKind::Start => Column::C,
            EntryKind::Stop => Column::D,
        }
    }
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            EntryKind::Start => write!(f, "start"),
            EntryKind::Stop => write!(f, "stop"),
        }
    }
}
