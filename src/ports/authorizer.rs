use std::path::Path;

use google_sheets4::oauth2::ApplicationSecret;

use crate::domain::errors::AuthError;

/// Turns an OAuth client secret into something able to authorize Sheets calls.
#[async_trait::async_trait]
pub trait Authorizer: Send + Sync {
    type Credential: Send;

    /// Runs the interactive authorization flow and persists the resulting
    /// token to `token_store`. Nothing is written there when the flow fails.
    async fn obtain(
        &self,
        secret: ApplicationSecret,
        token_store: &Path,
    ) -> error_stack::Result<(), AuthError>;

    /// Reuses the token already persisted in `token_store`.
    async fn restore(
        &self,
        secret: ApplicationSecret,
        token_store: &Path,
    ) -> error_stack::Result<Self::Credential, AuthError>;
}
