use error_stack::ResultExt;
use google_sheets4::api::Scope;
use tracing::instrument;

use super::{
    first_column::FirstColumn,
    spreadsheet_manager::{SpreadsheetManager, SpreadsheetManagerError},
};
use crate::domain::sheets::a1_notation::A1Notation;

pub trait SpreadsheetRead {
    /// Titles of every worksheet, in spreadsheet order.
    fn sheet_titles(
        &self,
    ) -> impl std::future::Future<
        Output = error_stack::Result<Vec<String>, SpreadsheetManagerError>,
    > + Send;

    /// First cell of every row in `range`; empty rows come back as `""`.
    fn read_column(
        &self,
        range: &A1Notation,
    ) -> impl std::future::Future<
        Output = error_stack::Result<Vec<String>, SpreadsheetManagerError>,
    > + Send;
}

impl SpreadsheetRead for SpreadsheetManager {
    #[instrument]
    async fn sheet_titles(&self) -> error_stack::Result<Vec<String>, SpreadsheetManagerError> {
        let response = self
            .hub
            .spreadsheets()
            .get(&self.spreadsheet_id)
            .add_scope(Scope::Spreadsheet)
            .doit()
            .await
            .change_context(SpreadsheetManagerError::FailedToFetchSheetTitles)
            .attach_printable_lazy(|| {
                format!("Failed to fetch spreadsheet {}", self.spreadsheet_id)
            })?;

        let titles = response
            .1
            .sheets
            .unwrap_or_default()
            .into_iter()
            .map(|sheet| {
                sheet
                    .properties
                    .and_then(|props| props.title)
                    .unwrap_or_default()
            })
            .collect::<Vec<_>>();

        tracing::debug!("Found sheets: {:?}", titles);
        Ok(titles)
    }

    #[instrument]
    async fn read_column(
        &self,
        range: &A1Notation,
    ) -> error_stack::Result<Vec<String>, SpreadsheetManagerError> {
        let response = self
            .hub
            .spreadsheets()
            .values_get(&self.spreadsheet_id, range.as_ref())
            .add_scope(Scope::Spreadsheet)
            .doit()
            .await
            .change_context(SpreadsheetManagerError::FailedToFetchRange)
            .attach_printable_lazy(|| format!("Failed to fetch values for range {}", range))?;

        Ok(response.1.values.unwrap_or_default().first_column())
    }
}
