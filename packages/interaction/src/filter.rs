//! Category filter policies.

use strum_macros::{AsRefStr, Display, EnumString};

/// How selecting a legend category changes marker visibility.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum FilterPolicy {
    /// Toggle `hidden` on every non-matching marker; matching markers are
    /// left alone. Selecting the same category twice restores the others.
    #[default]
    Flip,
    /// Hide every non-matching marker and show every matching one.
    Isolate,
}

impl FilterPolicy {
    /// New `hidden` flag for a marker, or `None` if it is left untouched.
    #[must_use]
    pub const fn next_hidden(self, hidden: bool, matches: bool) -> Option<bool> {
        match self {
            Self::Flip => {
                if matches {
                    None
                } else {
                    Some(!hidden)
                }
            }
            Self::Isolate => Some(!matches),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr as _;

    use super::*;

    #[test]
    fn flip_never_touches_matching_markers() {
        assert_eq!(FilterPolicy::Flip.next_hidden(true, true), None);
        assert_eq!(FilterPolicy::Flip.next_hidden(false, true), None);
        assert_eq!(FilterPolicy::Flip.next_hidden(false, false), Some(true));
        assert_eq!(FilterPolicy::Flip.next_hidden(true, false), Some(false));
    }

    #[test]
    fn isolate_sets_visibility_from_match() {
        assert_eq!(FilterPolicy::Isolate.next_hidden(true, true), Some(false));
        assert_eq!(FilterPolicy::Isolate.next_hidden(true, false), Some(true));
        assert_eq!(FilterPolicy::Isolate.next_hidden(false, false), Some(true));
    }

    #[test]
    fn parses_from_snake_case() {
        assert_eq!(FilterPolicy::from_str("isolate").unwrap(), FilterPolicy::Isolate);
        assert_eq!(FilterPolicy::default().to_string(), "flip");
    }
}
