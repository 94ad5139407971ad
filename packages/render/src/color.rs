//! Ordinal color scale.
//!
//! Categories are assigned colors from [`CATEGORY10`] in the order they are
//! first seen, cycling once the palette is exhausted. A category keeps its
//! color for the life of the scale.

use case_map_case_models::CategorySet;

/// The ten-color categorical palette (`d3.schemeCategory10`).
pub const CATEGORY10: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

/// Maps category names to palette colors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorScale {
    domain: CategorySet,
    range: &'static [&'static str],
}

impl Default for ColorScale {
    fn default() -> Self {
        Self::new()
    }
}

impl ColorScale {
    /// Creates an empty scale over [`CATEGORY10`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            domain: CategorySet::default(),
            range: &CATEGORY10,
        }
    }

    /// Creates a scale whose domain is pre-seeded with `categories`, so
    /// every category has its color before any lookup.
    #[must_use]
    pub fn from_categories(categories: &CategorySet) -> Self {
        Self {
            domain: categories.clone(),
            range: &CATEGORY10,
        }
    }

    /// Returns the color for `category`, assigning the next palette entry
    /// if it has not been seen.
    pub fn color(&mut self, category: &str) -> &'static str {
        let index = self.domain.insert(category);
        self.range[index % self.range.len()]
    }

    /// Returns the color for `category` without assigning one.
    #[must_use]
    pub fn get(&self, category: &str) -> Option<&'static str> {
        self.domain
            .index_of(category)
            .map(|index| self.range[index % self.range.len()])
    }

    #[must_use]
    pub const fn domain(&self) -> &CategorySet {
        &self.domain
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assigns_in_first_seen_order() {
        let mut scale = ColorScale::new();
        assert_eq!(scale.color("Phone"), "#1f77b4");
        assert_eq!(scale.color("Web"), "#ff7f0e");
        assert_eq!(scale.color("Phone"), "#1f77b4");
        assert_eq!(scale.get("Web"), Some("#ff7f0e"));
        assert_eq!(scale.get("Twitter"), None);
    }

    #[test]
    fn cycles_after_ten_categories() {
        let mut scale = ColorScale::new();
        for i in 0..10 {
            scale.color(&format!("c{i}"));
        }
        assert_eq!(scale.color("c10"), CATEGORY10[0]);
    }
}
