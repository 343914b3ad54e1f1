use error_stack::ResultExt;
use tracing::instrument;

use crate::{
    adapters::sheets::{spreadsheet_read::SpreadsheetRead, spreadsheet_write::SpreadsheetWrite},
    domain::{
        entry::EntryKind,
        sheets::{
            a1_notation::ToA1Notation,
            resolver::{date_column_range, find_cell_address, find_sheet_name},
        },
        timestamp::TimestampEvent,
    },
    ports::command_handler::CommandError,
};

/// Writes the time of `event` into today's `kind` cell and returns the raw
/// update response.
#[instrument(skip(client))]
pub async fn record_time<C>(
    client: &C,
    event: &TimestampEvent,
    kind: EntryKind,
) -> error_stack::Result<String, CommandError>
where
    C: SpreadsheetRead + SpreadsheetWrite,
{
    let titles = client
        .sheet_titles()
        .await
        .change_context(CommandError::Update(kind))?;

    let sheet_name = find_sheet_name(&titles, &event.month_year_label())
        .change_context(CommandError::Update(kind))?;
    tracing::debug!("Using sheet {}", sheet_name);

    let range = date_column_range(&sheet_name);
    let dates = client
        .read_column(&range.to_a1_notation())
        .await
        .change_context(CommandError::Update(kind))?;

    let address = find_cell_address(
        &sheet_name,
        &dates,
        range.first_row,
        &event.date_label(),
        kind.column(),
    )
    .change_context(CommandError::Update(kind))?;

    let position = address.to_a1_notation();
    let value = event.time_label();
    tracing::info!("Writing {} to {}", value, position);

    client
        .write_value(&position, &value)
        .await
        .change_context(CommandError::Update(kind))
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::{Arc, Mutex};

    use chrono::NaiveDate;
    use error_stack::report;

    use super::*;
    use crate::{
        adapters::sheets::spreadsheet_manager::SpreadsheetManagerError,
        domain::{errors::ResolutionError, sheets::a1_notation::A1Notation},
    };

    /// In-memory spreadsheet recording every call made against it.
    #[derive(Debug, Default)]
    pub(crate) struct FakeSpreadsheet {
        pub titles: Vec<String>,
        pub dates: Vec<String>,
        pub fail_writes: bool,
        pub reads: Arc<Mutex<Vec<String>>>,
        pub writes: Arc<Mutex<Vec<(String, String)>>>,
    }

    impl FakeSpreadsheet {
        pub fn new(titles: &[&str], dates: &[&str]) -> Self {
            FakeSpreadsheet {
                titles: titles.iter().map(|s| s.to_string()).collect(),
                dates: dates.iter().map(|s| s.to_string()).collect(),
                ..Default::default()
            }
        }
    }

    impl SpreadsheetRead for FakeSpreadsheet {
        async fn sheet_titles(&self) -> error_stack::Result<Vec<String>, SpreadsheetManagerError> {
            Ok(self.titles.clone())
        }

        async fn read_column(
            &self,
            range: &A1Notation,
        ) -> error_stack::Result<Vec<String>, SpreadsheetManagerError> {
            self.reads.lock().unwrap().push(range.to_string());
            Ok(self.dates.clone())
        }
    }

    impl SpreadsheetWrite for FakeSpreadsheet {
        async fn write_value(
            &self,
            position: &A1Notation,
            value: &str,
        ) -> error_stack::Result<String, SpreadsheetManagerError> {
            if self.fail_writes {
                return Err(report!(SpreadsheetManagerError::FailedToWriteRange));
            }
            self.writes
                .lock()
                .unwrap()
                .push((position.to_string(), value.to_string()));
            Ok(format!("{{\"updatedRange\":\"{}\",\"updatedCells\":1}}", position))
        }
    }

    pub(crate) fn march_second(hour: u32, minute: u32) -> TimestampEvent {
        TimestampEvent::new(
            NaiveDate::from_ymd_opt(2024, 3, 2)
                .unwrap()
                .and_hms_opt(hour, minute, 0)
                .unwrap(),
        )
    }

    #[tokio::test]
    async fn test_start_writes_column_c() {
        let sheet = FakeSpreadsheet::new(
            &["February 2024", "March 2024"],
            &["", "01.03.2024", "02.03.2024"],
        );

        let response = record_time(&sheet, &march_second(8, 15), EntryKind::Start)
            .await
            .unwrap();

        assert_eq!(
            *sheet.reads.lock().unwrap(),
            vec!["March 2024!A7:A39".to_string()]
        );
        assert_eq!(
            *sheet.writes.lock().unwrap(),
            vec![("March 2024!C9".to_string(), "08:15".to_string())]
        );
        assert!(response.contains("March 2024!C9"));
    }

    #[tokio::test]
    async fn test_stop_writes_column_d() {
        let sheet = FakeSpreadsheet::new(&["March 2024"], &["02.03.2024"]);

        record_time(&sheet, &march_second(17, 5), EntryKind::Stop)
            .await
            .unwrap();

        assert_eq!(
            *sheet.writes.lock().unwrap(),
            vec![("March 2024!D7".to_string(), "17:05".to_string())]
        );
    }

    #[tokio::test]
    async fn test_missing_month_sheet_writes_nothing() {
        let sheet = FakeSpreadsheet::new(&["February 2024"], &["02.03.2024"]);

        let err = record_time(&sheet, &march_second(8, 15), EntryKind::Start)
            .await
            .unwrap_err();

        assert_eq!(err.current_context(), &CommandError::Update(EntryKind::Start));
        assert_eq!(
            err.downcast_ref::<ResolutionError>(),
            Some(&ResolutionError::SheetNotFound("March 2024".to_string()))
        );
        assert!(sheet.reads.lock().unwrap().is_empty());
        assert!(sheet.writes.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_date_row_writes_nothing() {
        let sheet = FakeSpreadsheet::new(&["March 2024"], &["01.03.2024"]);

        let err = record_time(&sheet, &march_second(8, 15), EntryKind::Start)
            .await
            .unwrap_err();

        assert_eq!(
            err.downcast_ref::<ResolutionError>(),
            Some(&ResolutionError::DateNotFound("02.03.2024".to_string()))
        );
        assert!(sheet.writes.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_remote_failure_is_reported() {
        let sheet = FakeSpreadsheet {
            fail_writes: true,
            ..FakeSpreadsheet::new(&["March 2024"], &["02.03.2024"])
        };

        let err = record_time(&sheet, &march_second(8, 15), EntryKind::Stop)
            .await
            .unwrap_err();

        assert!(err.contains::<SpreadsheetManagerError>());
    }
}
