use std::fmt::Debug;

use google_sheets4::{oauth2::authenticator::Authenticator, Sheets};
use thiserror::Error;
use tracing::instrument;

use super::http_client::{Connector, HttpClient};

pub struct SpreadsheetManager {
    pub spreadsheet_id: String,
    pub(super) hub: Sheets<Connector>,
}

impl Debug for SpreadsheetManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SpreadsheetManager {{ spreadsheet_id: {:?} }}",
            self.spreadsheet_id
        )
    }
}

#[derive(Error, Debug)]
pub enum SpreadsheetManagerError {
    #[error("Failed to fetch sheet titles")]
    FailedToFetchSheetTitles,
    #[error("Failed to fetch range")]
    FailedToFetchRange,
    #[error("Failed to write range")]
    FailedToWriteRange,
}

impl SpreadsheetManager {
    #[instrument(name = "SpreadsheetManager::new", skip(client, auth))]
    pub fn new(
        spreadsheet_id: String,
        client: HttpClient,
        auth: Authenticator<Connector>,
    ) -> Self {
        let hub = Sheets::new(client, auth);

        SpreadsheetManager {
            spreadsheet_id,
            hub,
        }
    }
}
