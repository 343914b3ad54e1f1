use std::{fs, path::Path};

use error_stack::ResultExt;
use tracing::instrument;

use crate::{
    adapters::{
        config::paths::{restrict_permissions, ConfigPaths, FILE_MODE},
        sheets::{auth::read_secret, token_store::StoredCredential},
    },
    domain::errors::AuthError,
    ports::authorizer::Authorizer,
};

/// Owns the secret and the token store under the configuration directory.
#[derive(Debug)]
pub struct CredentialManager<A> {
    paths: ConfigPaths,
    authorizer: A,
}

impl<A: Authorizer> CredentialManager<A> {
    pub fn new(paths: ConfigPaths, authorizer: A) -> Self {
        CredentialManager { paths, authorizer }
    }

    #[cfg(test)]
    pub(crate) fn authorizer(&self) -> &A {
        &self.authorizer
    }

    /// Returns a credential for the spreadsheet scope.
    ///
    /// The interactive flow runs when `force_reauth` is set or when no
    /// valid token is stored; otherwise the stored token is reused. The
    /// flow writes to a pending file that replaces the token store only
    /// once it succeeds, so a failed flow keeps the previous credential.
    #[instrument(skip(self))]
    pub async fn get_credentials(
        &self,
        force_reauth: bool,
    ) -> error_stack::Result<A::Credential, AuthError> {
        let secret = read_secret(&self.paths.secret_file())?;
        let token_store = self.paths.credentials_file();

        let stored = StoredCredential::load(&token_store);
        let reusable = stored.as_ref().is_some_and(StoredCredential::is_valid);

        if reusable && !force_reauth {
            tracing::debug!("Reusing stored credentials");
            return self.authorizer.restore(secret, &token_store).await;
        }

        tracing::info!(
            "Starting authorization (forced: {}, stored: {:?})",
            force_reauth,
            stored.map(|credential| credential.is_valid())
        );

        // A leftover pending store would be picked up as a cached token.
        let pending = self.paths.pending_credentials_file();
        discard(&pending)?;

        if let Err(report) = self.authorizer.obtain(secret.clone(), &pending).await {
            tracing::warn!("Authorization failed, keeping the previous token store");
            if let Err(cleanup) = discard(&pending) {
                tracing::warn!("{:?}", cleanup);
            }
            return Err(report);
        }

        fs::rename(&pending, &token_store)
            .change_context(AuthError::AuthorizationFailed)
            .attach_printable_lazy(|| {
                format!("Failed to move the new token into {}", token_store.display())
            })?;
        restrict_permissions(&token_store, FILE_MODE)
            .change_context(AuthError::AuthorizationFailed)?;

        self.authorizer.restore(secret, &token_store).await
    }
}

fn discard(path: &Path) -> error_stack::Result<(), AuthError> {
    match fs::remove_file(path) {
        Err(err) if err.kind() != std::io::ErrorKind::NotFound => Err(err)
            .change_context(AuthError::AuthorizationFailed)
            .attach_printable_lazy(|| format!("Failed to remove {}", path.display())),
        _ => Ok(()),
    }
}
