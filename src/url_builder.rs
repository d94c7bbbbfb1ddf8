//! Address construction from configuration and mode

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use thiserror::Error;

use crate::config::AppConfiguration;
use crate::constants::{DISPLAY_QUERY, INFO_QUERY_PREFIX, ORC_QUERY_PREFIX};
use crate::mode::Mode;

/// A mode/argument combination that cannot produce an address
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct UrlBuilderError(String);

impl UrlBuilderError {
    fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    pub fn message(&self) -> &str {
        &self.0
    }
}

/// Lowercase the protocol and strip trailing `:` and `/`
pub fn normalize_protocol(protocol: &str) -> String {
    protocol
        .trim()
        .to_lowercase()
        .trim_end_matches([':', '/'])
        .to_string()
}

/// `{protocol}://{host}:{port}`
pub fn build_base_url(config: &AppConfiguration) -> String {
    let connection = &config.connection;
    format!(
        "{}://{}:{}",
        normalize_protocol(&connection.protocol),
        connection.host,
        connection.port
    )
}

/// Full address for a pane of the given mode.
///
/// `mode` is a lowercased tag as stored in the configuration. `console_number`
/// is only consulted for `orc`.
pub fn build_mode_url(
    config: &AppConfiguration,
    mode: &str,
    console_number: Option<i64>,
) -> Result<String, UrlBuilderError> {
    let kind = Mode::parse(mode)
        .ok_or_else(|| UrlBuilderError::new(format!("Unknown mode '{}'", mode)))?;

    let suffix = match kind {
        Mode::Display => DISPLAY_QUERY.to_string(),
        Mode::Info => {
            let segment = config
                .segment
                .as_deref()
                .filter(|s| !s.is_empty())
                .ok_or_else(|| UrlBuilderError::new("Missing 'segment' for info mode"))?;
            format!("{}{}", INFO_QUERY_PREFIX, encode_query_value(segment))
        }
        Mode::Orc => {
            let number = console_number
                .ok_or_else(|| UrlBuilderError::new("Console number is required for orc mode"))?;
            format!("{}{}", ORC_QUERY_PREFIX, number)
        }
    };

    let base = build_base_url(config);
    Ok(format!("{}{}", base.trim_end_matches('/'), suffix))
}

/// Everything but alphanumerics and `-._~` is escaped in a query value
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Spaces become `+`, reserved characters are percent-escaped
fn encode_query_value(value: &str) -> String {
    // a literal "%20" in the input is escaped to "%2520", so this only hits spaces
    utf8_percent_encode(value, QUERY_VALUE)
        .to_string()
        .replace("%20", "+")
}
