use std::{fs, path::Path};

use error_stack::{report, ResultExt};
use google_sheets4::oauth2::{
    self, authenticator::Authenticator,
    authenticator_delegate::DefaultInstalledFlowDelegateWithRedirectURI, ApplicationSecret,
    InstalledFlowReturnMethod,
};
use tracing::instrument;

use super::http_client::{Connector, HttpClient};
use crate::{domain::errors::AuthError, ports::authorizer::Authorizer};

pub const SPREADSHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";

/// Reads the installed-application secret stored by `setup`.
pub fn read_secret(path: &Path) -> error_stack::Result<ApplicationSecret, AuthError> {
    let content = fs::read(path).map_err(|err| {
        let context = if err.kind() == std::io::ErrorKind::NotFound {
            AuthError::MissingSecret
        } else {
            AuthError::MalformedSecret
        };
        report!(err)
            .change_context(context)
            .attach_printable(format!("Secret path: {}", path.display()))
    })?;

    oauth2::parse_application_secret(content)
        .change_context(AuthError::MalformedSecret)
        .attach_printable_lazy(|| format!("Secret path: {}", path.display()))
}

/// How the authorization code gets back to the program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowOptions {
    /// Print the URL and read the code from stdin instead of running a
    /// local redirect server.
    pub headless: bool,
    /// Host name put in the redirect URL. It has to resolve to this machine.
    pub host_name: String,
    /// Port of the local redirect server; a free one is picked when unset.
    pub port: Option<u16>,
}

impl FlowOptions {
    fn return_method(&self) -> InstalledFlowReturnMethod {
        match (self.headless, self.port) {
            (true, _) => InstalledFlowReturnMethod::Interactive,
            (false, Some(port)) => InstalledFlowReturnMethod::HTTPPortRedirect(port),
            (false, None) => InstalledFlowReturnMethod::HTTPRedirect,
        }
    }

    /// The redirect URL can only be named up front when the port is known;
    /// otherwise the library reports the loopback address it bound.
    fn redirect_uri(&self) -> Option<String> {
        match (self.headless, self.port) {
            (false, Some(port)) => Some(format!("http://{}:{}", self.host_name, port)),
            _ => None,
        }
    }
}

/// Browser based OAuth flow for installed applications.
///
/// In headless mode the user is given a URL to open elsewhere and pastes
/// the resulting code back; otherwise a local redirect server catches it.
pub struct InstalledFlowAuthorizer {
    client: HttpClient,
    options: FlowOptions,
}

impl std::fmt::Debug for InstalledFlowAuthorizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "InstalledFlowAuthorizer {{ options: {:?} }}", self.options)
    }
}

impl InstalledFlowAuthorizer {
    pub fn new(client: HttpClient, options: FlowOptions) -> Self {
        InstalledFlowAuthorizer { client, options }
    }

    async fn authenticator(
        &self,
        secret: ApplicationSecret,
        token_store: &Path,
    ) -> error_stack::Result<Authenticator<Connector>, AuthError> {
        let builder = oauth2::InstalledFlowAuthenticator::with_client(
            secret,
            self.options.return_method(),
            self.client.clone(),
        )
        .persist_tokens_to_disk(token_store.to_path_buf());

        let builder = match self.options.redirect_uri() {
            Some(uri) => {
                tracing::debug!("Redirecting the browser to {}", uri);
                builder.flow_delegate(Box::new(DefaultInstalledFlowDelegateWithRedirectURI(uri)))
            }
            None => builder,
        };

        builder
            .build()
            .await
            .change_context(AuthError::AuthorizationFailed)
            .attach_printable_lazy(|| {
                format!("Could not create an authenticator for {}", token_store.display())
            })
    }
}

#[async_trait::async_trait]
impl Authorizer for InstalledFlowAuthorizer {
    type Credential = Authenticator<Connector>;

    #[instrument(skip(secret))]
    async fn obtain(
        &self,
        secret: ApplicationSecret,
        token_store: &Path,
    ) -> error_stack::Result<(), AuthError> {
        let auth = self.authenticator(secret, token_store).await?;

        // Requesting a token is what drives the interactive flow.
        auth.token(&[SPREADSHEETS_SCOPE])
            .await
            .change_context(AuthError::AuthorizationFailed)?;

        Ok(())
    }

    #[instrument(skip(secret))]
    async fn restore(
        &self,
        secret: ApplicationSecret,
        token_store: &Path,
    ) -> error_stack::Result<Self::Credential, AuthError> {
        self.authenticator(secret, token_store).await
    }
}

#[cfg(test)]
pub(crate) fn installed_secret_json() -> &'static str {
    r#"{"installed":{"client_id":"1234.apps.googleusercontent.com","project_id":"stag","auth_uri":"https://accounts.google.com/o/oauth2/auth","token_uri":"https://oauth2.googleapis.com/token","auth_provider_x509_cert_url":"https://www.googleapis.com/oauth2/v1/certs","client_secret":"shh","redirect_uris":["http://localhost"]}}"#
}
