use std::sync::LazyLock;

use error_stack::{report, ResultExt};
use regex::Regex;
use url::Url;

use crate::domain::errors::ConfigError;

static SHEET_ID_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/spreadsheets/d/(\w+)(/edit|/)?$").expect("sheet id pattern is valid")
});

/// Extracts the spreadsheet identifier from a link such as
/// `https://docs.google.com/spreadsheets/d/<id>/edit`.
///
/// Links pasted without a scheme (`docs.google.com/spreadsheets/d/<id>`)
/// are matched as they are, minus any query or fragment.
pub fn extract_sheet_id(link: &str) -> error_stack::Result<String, ConfigError> {
    let path = match Url::parse(link) {
        Ok(url) => url.path().to_string(),
        Err(url::ParseError::RelativeUrlWithoutBase) => link
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .to_string(),
        Err(err) => {
            return Err(err)
                .change_context(ConfigError::InvalidLink)
                .attach_printable_lazy(|| format!("Not a URL: {}", link))
        }
    };

    SHEET_ID_PATTERN
        .captures(&path)
        .and_then(|captures| captures.get(1))
        .map(|id| id.as_str().to_string())
        .ok_or_else(|| {
            report!(ConfigError::InvalidLink)
                .attach_printable(format!("No spreadsheet id in link: {}", link))
        })
}
