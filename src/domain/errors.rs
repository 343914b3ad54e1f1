use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("please run `stag setup` before recording times")]
    NotSetUp,
    #[error("seems the sheet's link is invalid")]
    InvalidLink,
    #[error("failed to access the configuration directory")]
    Io,
    #[error("failed to serialize the configuration")]
    Serialization,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("secret file not found, run `stag setup` with the secret downloaded from the developer console")]
    MissingSecret,
    #[error("secret file is not a valid OAuth client secret")]
    MalformedSecret,
    #[error("authorization failed")]
    AuthorizationFailed,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    #[error("could not find sheet for date {0}")]
    SheetNotFound(String),
    #[error("too many sheets found: {0:?}")]
    AmbiguousSheet(Vec<String>),
    #[error("could not find row with date {0}")]
    DateNotFound(String),
}
