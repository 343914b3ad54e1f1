use error_stack::ResultExt;
use tracing::{error, info, instrument};

use crate::{
    adapters::{
        config::{app_config::ConfigStore, paths::ConfigPaths},
        sheets::{
            auth::{FlowOptions, InstalledFlowAuthorizer},
            http_client::{http_client, HttpClient},
            spreadsheet_manager::SpreadsheetManager,
        },
    },
    application::{credentials::CredentialManager, service::StagService},
    domain::timestamp::TimestampEvent,
    ports::command_handler::{Command, CommandError, CommandHandler},
};

/// Wires the real adapters together and dispatches parsed commands.
pub struct CliAdapter {
    client: HttpClient,
    service: StagService<InstalledFlowAuthorizer>,
}

impl std::fmt::Debug for CliAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CliAdapter")
            .field("service", &self.service)
            .finish()
    }
}

impl CliAdapter {
    pub fn new(
        paths: ConfigPaths,
        flow: FlowOptions,
    ) -> error_stack::Result<Self, CommandError> {
        let client = http_client()
            .change_context(CommandError::Startup)
            .attach_printable("Could not load the platform certificate store")?;
        let authorizer = InstalledFlowAuthorizer::new(client.clone(), flow);
        let service = StagService::new(
            ConfigStore::new(paths.clone()),
            CredentialManager::new(paths, authorizer),
        );

        Ok(Self { client, service })
    }
}

#[async_trait::async_trait]
impl CommandHandler for CliAdapter {
    #[instrument]
    async fn handle(&self, command: Command) -> error_stack::Result<String, CommandError> {
        let result = match command {
            Command::Setup { sheet_url, secret } => self.service.setup(&sheet_url, &secret).await,
            Command::Update(kind) => {
                let client = self.client.clone();
                self.service
                    .update(kind, TimestampEvent::now(), move |sheet_id, auth| {
                        SpreadsheetManager::new(sheet_id, client, auth)
                    })
                    .await
            }
        };

        match &result {
            Ok(_) => info!("Command completed successfully"),
            Err(report) => error!("Command failed: {:?}", report),
        }
        result
    }
}
