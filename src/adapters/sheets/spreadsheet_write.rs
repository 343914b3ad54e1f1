use error_stack::ResultExt;
use google_sheets4::api::{Scope, ValueRange};
use tracing::instrument;

use super::{
    spreadsheet_manager::{SpreadsheetManager, SpreadsheetManagerError},
    value_range_factory::ValueRangeFactory,
};
use crate::domain::sheets::a1_notation::A1Notation;

pub trait SpreadsheetWrite {
    /// Writes `value` into a single cell as if typed by a user, returning
    /// the raw update response.
    fn write_value(
        &self,
        position: &A1Notation,
        value: &str,
    ) -> impl std::future::Future<Output = error_stack::Result<String, SpreadsheetManagerError>>
           + Send;
}

impl SpreadsheetWrite for SpreadsheetManager {
    #[instrument]
    async fn write_value(
        &self,
        position: &A1Notation,
        value: &str,
    ) -> error_stack::Result<String, SpreadsheetManagerError> {
        let value_range = ValueRange::from_single_cell(position, value);

        let response = self
            .hub
            .spreadsheets()
            .values_update(value_range, &self.spreadsheet_id, position.as_ref())
            .value_input_option("USER_ENTERED")
            .add_scope(Scope::Spreadsheet)
            .doit()
            .await
            .change_context(SpreadsheetManagerError::FailedToWriteRange)
            .attach_printable_lazy(|| format!("Failed to write to range {} ", position))?;

        serde_json::to_string(&response.1)
            .change_context(SpreadsheetManagerError::FailedToWriteRange)
            .attach_printable("Failed to render the update response")
    }
}
