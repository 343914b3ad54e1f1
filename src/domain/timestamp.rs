use chrono::{Datelike, Month, NaiveDateTime};

/// The moment being recorded, rendered the ways the attendance sheet expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimestampEvent {
    at: NaiveDateTime,
}

impl TimestampEvent {
    pub fn new(at: NaiveDateTime) -> Self {
        TimestampEvent { at }
    }

    pub fn now() -> Self {
        TimestampEvent::new(chrono::Local::now().naive_local())
    }

    /// `"March 2024"`, matched against worksheet titles.
    ///
    /// The month name is always English, whatever the host locale says.
    pub fn month_year_label(&self) -> String {
        let month = u8::try_from(self.at.month())
            .ok()
            .and_then(|month| Month::try_from(month).ok())
            .map_or("", |month| month.name());

        format!("{} {}", month, self.at.year())
    }

    /// `"02.03.2024"`, matched against the date column.
    pub fn date_label(&self) -> String {
        self.at.format("%d.%m.%Y").to_string()
    }

    /// `"08:15"`, the value written into the cell.
    pub fn time_label(&self) -> String {
        self.at.format("%H:%M").to_string()
    }
}
