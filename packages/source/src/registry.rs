//! Dataset registry. Loads all map dataset definitions from embedded TOML.
//!
//! Each `.toml` file in `packages/source/datasets/` is baked into the
//! binary at compile time via [`include_str!`]. Adding a dataset means
//! creating a TOML file and adding it to the list below.

use case_map_source_models::DatasetDefinition;

/// Identifier of the dataset used when none is requested.
pub const DEFAULT_DATASET_ID: &str = "sf_street_cleaning";

/// TOML configs embedded at compile time.
const DATASET_TOMLS: &[(&str, &str)] = &[(
    "sf_street_cleaning",
    include_str!("../datasets/sf_street_cleaning.toml"),
)];

/// Parses a dataset definition from a TOML string.
///
/// # Errors
///
/// Returns an error if the TOML is invalid or missing required fields.
pub fn parse_dataset_toml(toml_str: &str) -> Result<DatasetDefinition, toml::de::Error> {
    toml::from_str(toml_str)
}

/// Returns all registered dataset definitions.
///
/// # Panics
///
/// Panics if any embedded TOML file fails to parse. These are compile-time
/// constants, so a parse failure is a development error caught by tests.
#[must_use]
pub fn all_datasets() -> Vec<DatasetDefinition> {
    DATASET_TOMLS
        .iter()
        .map(|(name, toml_str)| {
            parse_dataset_toml(toml_str)
                .unwrap_or_else(|e| panic!("Failed to parse dataset '{name}': {e}"))
        })
        .collect()
}

/// Looks up a dataset by id.
#[must_use]
pub fn find_dataset(id: &str) -> Option<DatasetDefinition> {
    all_datasets().into_iter().find(|d| d.id == id)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn loads_all_datasets() {
        let datasets = all_datasets();
        assert_eq!(datasets.len(), DATASET_TOMLS.len());
    }

    #[test]
    fn dataset_ids_are_unique() {
        let mut seen = BTreeSet::new();
        for dataset in &all_datasets() {
            assert!(
                seen.insert(dataset.id.clone()),
                "Duplicate dataset ID: {}",
                dataset.id
            );
        }
    }

    #[test]
    fn default_dataset_matches_sf_configuration() {
        let dataset = find_dataset(DEFAULT_DATASET_ID).unwrap();
        assert_eq!(dataset.viewport.width, 960);
        assert_eq!(dataset.viewport.height, 600);
        assert_eq!(dataset.basemap.name_field, "nhood");
        assert_eq!(dataset.streets.limit, 20_000);
        assert_eq!(
            dataset.cases.service_name_prefix,
            "Street and Sidewalk Cleaning"
        );
        assert_eq!(dataset.cases.status_prefix, "Open");
        assert_eq!(
            dataset.cases.window.start,
            NaiveDate::from_ymd_opt(2020, 3, 1).unwrap()
        );
        assert_eq!(
            dataset.cases.window.end,
            NaiveDate::from_ymd_opt(2020, 3, 31).unwrap()
        );
    }

    #[test]
    fn unknown_dataset_is_none() {
        assert!(find_dataset("atlantis").is_none());
    }
}
