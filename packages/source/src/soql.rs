//! Socrata (`SoQL`) query construction.
//!
//! Queries are assembled as plain text and encoded exactly once when they
//! are attached to the URL. [`reqwest::Url`] applies the query percent-encode
//! set, which escapes spaces and quotes but passes `%` through, so literal
//! `%` characters are escaped first.

use case_map_source_models::{CasesConfig, StreetsConfig};
use reqwest::Url;

use crate::SourceError;

/// Timestamp format Socrata expects in `SoQL` comparisons.
pub const SOQL_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Builds the `$where` clause selecting cases by service name, status, and
/// request date window.
#[must_use]
pub fn case_where_clause(config: &CasesConfig) -> String {
    let start = config.window.start_datetime().format(SOQL_DATETIME_FORMAT);
    let end = config.window.end_datetime().format(SOQL_DATETIME_FORMAT);
    format!(
        "starts_with(service_name, '{service}') \
         AND starts_with(status_description, '{status}') \
         AND {column} between '{start}' and '{end}'",
        service = escape_literal(&config.service_name_prefix),
        status = escape_literal(&config.status_prefix),
        column = config.date_column,
    )
}

/// Builds the fully encoded case query URL.
///
/// # Errors
///
/// Returns [`SourceError::Conversion`] if the configured URL is invalid.
pub fn case_query_url(config: &CasesConfig) -> Result<Url, SourceError> {
    with_query(&config.url, &format!("$where={}", case_where_clause(config)))
}

/// Builds the street segment URL with its `$limit` row cap.
///
/// # Errors
///
/// Returns [`SourceError::Conversion`] if the configured URL is invalid.
pub fn streets_url(config: &StreetsConfig) -> Result<Url, SourceError> {
    with_query(&config.url, &format!("$limit={}", config.limit))
}

/// Parses `base` and appends the unencoded `query`, encoding it once.
/// Any query already on `base` is kept as is.
///
/// # Errors
///
/// Returns [`SourceError::Conversion`] if `base` is not a valid URL.
pub fn with_query(base: &str, query: &str) -> Result<Url, SourceError> {
    let mut url = Url::parse(base).map_err(|e| SourceError::Conversion {
        message: format!("Invalid URL '{base}': {e}"),
    })?;
    let query = query.replace('%', "%25");
    let combined = match url.query() {
        Some(existing) if !existing.is_empty() => format!("{existing}&{query}"),
        _ => query,
    };
    url.set_query(Some(&combined));
    Ok(url)
}

/// Escapes a `SoQL` string literal by doubling single quotes.
fn escape_literal(value: &str) -> String {
    value.replace('\'', "''")
}
