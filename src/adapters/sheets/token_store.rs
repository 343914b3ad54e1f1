use std::{fs, path::Path};

use serde::Deserialize;

use super::auth::SPREADSHEETS_SCOPE;

#[derive(Deserialize, Debug)]
struct StoredEntry {
    scopes: Vec<String>,
    token: StoredToken,
}

#[derive(Deserialize, Debug)]
struct StoredToken {
    access_token: Option<String>,
    refresh_token: Option<String>,
}

/// What the OAuth token store on disk currently holds for the spreadsheet scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoredCredential {
    valid: bool,
}

impl StoredCredential {
    fn invalid() -> Self {
        StoredCredential { valid: false }
    }

    /// Returns `None` when no token store exists at `path`.
    ///
    /// A store that cannot be parsed, or has no usable token for the
    /// spreadsheet scope, is returned marked invalid.
    pub fn load(path: &Path) -> Option<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!("Cannot read token store {}: {}", path.display(), e);
                return Some(StoredCredential::invalid());
            }
        };

        let entries: Vec<StoredEntry> = match serde_json::from_str(&content) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("Cannot parse token store {}: {}", path.display(), e);
                return Some(StoredCredential::invalid());
            }
        };

        let credential = entries
            .into_iter()
            .find(|entry| entry.scopes.iter().any(|scope| scope == SPREADSHEETS_SCOPE))
            .map(|entry| StoredCredential {
                valid: entry.token.access_token.is_some() || entry.token.refresh_token.is_some(),
            })
            .unwrap_or_else(StoredCredential::invalid);

        Some(credential)
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }
}

#[cfg(test)]
pub(crate) fn valid_token_store_json() -> String {
    format!(
        r#"[{{"scopes":["{}"],"token":{{"access_token":"ya29.token","refresh_token":"1//refresh","expires_at":null,"id_token":null}}}}]"#,
        SPREADSHEETS_SCOPE
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_store() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(StoredCredential::load(&dir.path().join("credentials.json")), None);
    }

    #[test]
    fn test_valid_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("credentials.json");
        fs::write(&path, valid_token_store_json()).unwrap();

        let credential = StoredCredential::load(&path).unwrap();
        assert!(credential.is_valid());
    }

    #[test]
    fn test_refresh_token_alone_is_enough() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("credentials.json");
        fs::write(
            &path,
            format!(
                r#"[{{"scopes":["{}"],"token":{{"access_token":null,"refresh_token":"1//refresh"}}}}]"#,
                SPREADSHEETS_SCOPE
            ),
        )
        .unwrap();

        assert!(StoredCredential::load(&path).unwrap().is_valid());
    }

    #[test]
    fn test_store_for_other_scope_is_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("credentials.json");
        fs::write(
            &path,
            r#"[{"scopes":["https://www.googleapis.com/auth/drive"],"token":{"access_token":"a","refresh_token":"r"}}]"#,
        )
        .unwrap();

        assert!(!StoredCredential::load(&path).unwrap().is_valid());
    }

    #[test]
    fn test_store_without_tokens_is_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("credentials.json");
        fs::write(
            &path,
            format!(
                r#"[{{"scopes":["{}"],"token":{{"access_token":null,"refresh_token":null}}}}]"#,
                SPREADSHEETS_SCOPE
            ),
        )
        .unwrap();

        assert!(!StoredCredential::load(&path).unwrap().is_valid());
    }

    #[test]
    fn test_garbage_store_is_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("credentials.json");
        fs::write(&path, "not json").unwrap();

        assert!(!StoredCredential::load(&path).unwrap().is_valid());
    }
}
