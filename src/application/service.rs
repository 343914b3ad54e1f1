use std::path::Path;

use error_stack::{report, ResultExt};
use tracing::instrument;

use super::{credentials::CredentialManager, update::record_time};
use crate::{
    adapters::{
        config::app_config::{AppConfig, ConfigStore},
        sheets::{spreadsheet_read::SpreadsheetRead, spreadsheet_write::SpreadsheetWrite},
    },
    domain::{
        entry::EntryKind, errors::ConfigError, sheets::sheet_link::extract_sheet_id,
        timestamp::TimestampEvent,
    },
    ports::{authorizer::Authorizer, command_handler::CommandError},
};

/// The two flows the command line exposes: `setup` and `start`/`stop`.
#[derive(Debug)]
pub struct StagService<A> {
    store: ConfigStore,
    credentials: CredentialManager<A>,
}

impl<A: Authorizer> StagService<A> {
    pub fn new(store: ConfigStore, credentials: CredentialManager<A>) -> Self {
        StagService { store, credentials }
    }

    /// Stores the sheet id and the secret, then forces a fresh authorization.
    ///
    /// Rerunning it overwrites whatever a previous setup left behind.
    #[instrument(skip(self), name = "StagService::setup")]
    pub async fn setup(
        &self,
        sheet_url: &str,
        secret: &Path,
    ) -> error_stack::Result<String, CommandError> {
        let sheet_id = extract_sheet_id(sheet_url).change_context(CommandError::Setup)?;

        tracing::info!("Setup: 📝 Saving sheet id {}", sheet_id);
        self.store
            .write(&AppConfig::with_sheet_id(sheet_id.as_str()))
            .change_context(CommandError::Setup)?;

        tracing::info!("Setup: 🔑 Saving secret {}", secret.display());
        self.store
            .save_secret(secret)
            .change_context(CommandError::Setup)?;

        tracing::info!("Setup: ☁️  Authorizing access to the spreadsheet");
        self.credentials
            .get_credentials(true)
            .await
            .change_context(CommandError::Setup)?;

        tracing::info!("Setup: ✅ Configured sheet {}", sheet_id);
        Ok(String::new())
    }

    /// Records the time of `event` in today's row.
    ///
    /// `connect` builds the spreadsheet client once the sheet id and a
    /// credential are known; nothing remote happens before setup is done.
    #[instrument(skip(self, connect), name = "StagService::update")]
    pub async fn update<C, F>(
        &self,
        kind: EntryKind,
        event: TimestampEvent,
        connect: F,
    ) -> error_stack::Result<String, CommandError>
    where
        C: SpreadsheetRead + SpreadsheetWrite,
        F: FnOnce(String, A::Credential) -> C,
    {
        let sheet_id = self
            .store
            .read()
            .sheet_id
            .filter(|sheet_id| !sheet_id.is_empty())
            .ok_or_else(|| report!(ConfigError::NotSetUp))
            .change_context(CommandError::Update(kind))?;

        let credential = self
            .credentials
            .get_credentials(false)
            .await
            .change_context(CommandError::Update(kind))?;

        let client = connect(sheet_id, credential);
        record_time(&client, &event, kind).await
    }
}

#[cfg(test)]
mod tests {
    use std::{fs, sync::atomic::Ordering};

    use super::*;
    use crate::{
        adapters::{
            config::paths::ConfigPaths,
            sheets::auth::installed_secret_json,
        },
        application::{
            credentials::tests::FakeAuthorizer,
            update::tests::{march_second, FakeSpreadsheet},
        },
        domain::errors::AuthError,
    };

    fn service(root: &Path) -> StagService<FakeAuthorizer> {
        let paths = ConfigPaths::new(root.join("stag"));
        StagService::new(
            ConfigStore::new(paths.clone()),
            CredentialManager::new(paths, FakeAuthorizer::default()),
        )
    }

    fn write_secret(dir: &Path) -> std::path::PathBuf {
        let secret = dir.join("client_secret.json");
        fs::write(&secret, installed_secret_json()).unwrap();
        secret
    }

    #[tokio::test]
    async fn test_setup_persists_everything() {
        let dir = tempfile::tempdir().unwrap();
        let service = service(dir.path());
        let secret = write_secret(dir.path());

        service
            .setup("https://sheets.google.com/spreadsheets/d/ABC123/edit", &secret)
            .await
            .unwrap();

        let paths = service.store.paths();
        assert_eq!(service.store.read().sheet_id.as_deref(), Some("ABC123"));
        assert_eq!(
            fs::read_to_string(paths.secret_file()).unwrap(),
            installed_secret_json()
        );
        assert!(paths.credentials_file().exists());
    }

    #[tokio::test]
    async fn test_setup_always_reauthorizes() {
        let dir = tempfile::tempdir().unwrap();
        let service = service(dir.path());
        let secret = write_secret(dir.path());
        let link = "https://docs.google.com/spreadsheets/d/ABC123/";

        service.setup(link, &secret).await.unwrap();
        service.setup(link, &secret).await.unwrap();

        assert_eq!(service.credentials.authorizer().obtained.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_setup_rejects_invalid_link_before_touching_disk() {
        let dir = tempfile::tempdir().unwrap();
        let service = service(dir.path());
        let secret = write_secret(dir.path());

        let err = service
            .setup("https://docs.google.com/document/d/ABC123/edit", &secret)
            .await
            .unwrap_err();

        assert_eq!(err.current_context(), &CommandError::Setup);
        assert_eq!(
            err.downcast_ref::<ConfigError>(),
            Some(&ConfigError::InvalidLink)
        );
        assert!(!service.store.paths().config_file().exists());
    }

    #[tokio::test]
    async fn test_update_requires_setup() {
        let dir = tempfile::tempdir().unwrap();
        let service = service(dir.path());

        let err = service
            .update(EntryKind::Start, march_second(8, 15), |_, _| -> FakeSpreadsheet {
                panic!("no client should be built before setup")
            })
            .await
            .unwrap_err();

        assert_eq!(err.current_context(), &CommandError::Update(EntryKind::Start));
        assert_eq!(err.downcast_ref::<ConfigError>(), Some(&ConfigError::NotSetUp));
    }

    #[tokio::test]
    async fn test_update_without_secret_fails() {
        let dir = tempfile::tempdir().unwrap();
        let service = service(dir.path());
        service
            .store
            .write(&AppConfig::with_sheet_id("ABC123"))
            .unwrap();

        let err = service
            .update(EntryKind::Stop, march_second(17, 0), |_, _| -> FakeSpreadsheet {
                panic!("no client should be built without credentials")
            })
            .await
            .unwrap_err();

        assert_eq!(err.downcast_ref::<AuthError>(), Some(&AuthError::MissingSecret));
    }

    #[tokio::test]
    async fn test_update_after_setup_reuses_credentials() {
        let dir = tempfile::tempdir().unwrap();
        let service = service(dir.path());
        let secret = write_secret(dir.path());
        service
            .setup("https://docs.google.com/spreadsheets/d/ABC123/edit", &secret)
            .await
            .unwrap();

        let sheet = FakeSpreadsheet::new(&["Sheet March 2024"], &["", "01.03.2024", "02.03.2024"]);
        let writes = sheet.writes.clone();
        let mut connected = None;
        service
            .update(EntryKind::Start, march_second(8, 15), |sheet_id, credential| {
                connected = Some((sheet_id, credential));
                sheet
            })
            .await
            .unwrap();

        assert_eq!(connected, Some(("ABC123".to_string(), "stored")));
        assert_eq!(
            *writes.lock().unwrap(),
            vec![("Sheet March 2024!C9".to_string(), "08:15".to_string())]
        );
        assert_eq!(service.credentials.authorizer().obtained.load(Ordering::SeqCst), 1);
    }
}
