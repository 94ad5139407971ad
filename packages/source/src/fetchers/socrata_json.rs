//! Socrata JSON row fetcher.
//!
//! Fetches service request rows matching the configured `$where` filter.

use case_map_case_models::CaseRecord;
use case_map_source_models::CasesConfig;

use crate::SourceError;
use crate::soql::case_query_url;

/// Fetches raw case records for the configured service, status, and date
/// window.
///
/// # Errors
///
/// Returns [`SourceError`] if the request fails or the body is not a JSON
/// array of records.
pub async fn fetch(
    client: &reqwest::Client,
    config: &CasesConfig,
) -> Result<Vec<CaseRecord>, SourceError> {
    let url = case_query_url(config)?;
    log::info!("Fetching cases: {url}");
    let body = super::get_text(client, url, "Socrata").await?;
    let records = parse_records(&body)?;
    log::info!("Fetched {} case records", records.len());
    Ok(records)
}

/// Parses a Socrata JSON row array.
///
/// # Errors
///
/// Returns [`SourceError::Json`] if the body is not an array of objects.
pub fn parse_records(body: &str) -> Result<Vec<CaseRecord>, SourceError> {
    Ok(serde_json::from_str(body)?)
}
