//! Static registry of the categorical mushroom features the system knows
//! how to describe to a human.
//!
//! The catalog is a fixed literal table: every feature name, its
//! human-readable labels, and the single-character codes behind them. At
//! presentation time it is filtered against the codes a reference dataset
//! actually contains, so the caller only ever offers selectable options
//! that the encoder can place on the trained schema.

use lazy_static::lazy_static;
use std::collections::BTreeSet;

/// One categorical feature: a unique name and its ordered label/code pairs.
///
/// Codes are unique within a feature; this is asserted by test against the
/// literal table below.
#[derive(Debug, Clone)]
pub struct CategoricalFeature {
    pub name: &'static str,
    pub labels: &'static [(&'static str, &'static str)],
}

/// The full set of recognized features, keyed by name, fixed at process
/// start and immutable thereafter.
#[derive(Debug)]
pub struct FeatureCatalog {
    features: Vec<CategoricalFeature>,
}

const FEATURE_TABLE: &[(&str, &[(&str, &str)])] = &[
    (
        "cap-shape",
        &[
            ("bell", "b"),
            ("conical", "c"),
            ("convex", "x"),
            ("flat", "f"),
            ("knobbed", "k"),
            ("sunken", "s"),
        ],
    ),
    (
        "cap-surface",
        &[
            ("fibrous", "f"),
            ("grooves", "g"),
            ("scaly", "y"),
            ("smooth", "s"),
        ],
    ),
    (
        "cap-color",
        &[
            ("brown", "n"),
            ("buff", "b"),
            ("cinnamon", "c"),
            ("gray", "g"),
            ("green", "r"),
            ("pink", "p"),
            ("purple", "u"),
            ("red", "e"),
            ("white", "w"),
            ("yellow", "y"),
        ],
    ),
    ("bruises", &[("bruises", "t"), ("no", "f")]),
    (
        "odor",
        &[
            ("almond", "a"),
            ("anise", "l"),
            ("creosote", "c"),
            ("fishy", "y"),
            ("foul", "f"),
            ("musty", "m"),
            ("none", "n"),
            ("pungent", "p"),
            ("spicy", "s"),
        ],
    ),
    (
        "gill-attachment",
        &[
            ("attached", "a"),
            ("descending", "d"),
            ("free", "f"),
            ("notched", "n"),
        ],
    ),
    (
        "gill-spacing",
        &[("close", "c"), ("crowded", "w"), ("distant", "d")],
    ),
    ("gill-size", &[("broad", "b"), ("narrow", "n")]),
    (
        "gill-color",
        &[
            ("black", "k"),
            ("brown", "n"),
            ("buff", "b"),
            ("chocolate", "h"),
            ("gray", "g"),
            ("green", "r"),
            ("orange", "o"),
            ("pink", "p"),
            ("purple", "u"),
            ("red", "e"),
            ("white", "w"),
            ("yellow", "y"),
        ],
    ),
];

lazy_static! {
    static ref STANDARD: FeatureCatalog = FeatureCatalog {
        features: FEATURE_TABLE
            .iter()
            .map(|&(name, labels)| CategoricalFeature { name, labels })
            .collect(),
    };
}

impl FeatureCatalog {
    /// The built-in mushroom feature catalog.
    pub fn standard() -> &'static FeatureCatalog {
        &STANDARD
    }

    /// Looks up a feature by name.
    pub fn feature(&self, name: &str) -> Option<&CategoricalFeature> {
        self.features.iter().find(|f| f.name == name)
    }

    /// Names of all cataloged features, in table order.
    pub fn feature_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.features.iter().map(|f| f.name)
    }

    /// Returns the ordered `display label -> code` options for one feature,
    /// restricted to `valid_codes` (the codes actually observed in the
    /// reference dataset).
    ///
    /// Observed codes missing from the literal table are appended under a
    /// synthesized `Other (<code>)` label, so every observed code is always
    /// selectable. Pure function; the result is non-empty whenever
    /// `valid_codes` is non-empty.
    pub fn labels_for(
        &self,
        feature_name: &str,
        valid_codes: &BTreeSet<String>,
    ) -> Vec<(String, String)> {
        let mut options: Vec<(String, String)> = Vec::new();

        if let Some(feature) = self.feature(feature_name) {
            for &(label, code) in feature.labels {
                if valid_codes.contains(code) {
                    options.push((format!("{} ({})", label, code), code.to_string()));
                }
            }
        }

        // Codes observed in the data but unknown to the table. BTreeSet
        // iteration keeps the fallback order deterministic.
        for code in valid_codes {
            if !options.iter().any(|(_, c)| c == code) {
                options.push((format!("Other ({})", code), code.clone()));
            }
        }

        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(list: &[&str]) -> BTreeSet<String> {
        list.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_codes_unique_within_each_feature() {
        for feature in &FeatureCatalog::standard().features {
            let mut seen = BTreeSet::new();
            for &(_, code) in feature.labels {
                assert!(
                    seen.insert(code),
                    "duplicate code '{}' in feature '{}'",
                    code,
                    feature.name
                );
            }
        }
    }

    #[test]
    fn test_labels_restricted_to_valid_codes() {
        let catalog = FeatureCatalog::standard();
        let options = catalog.labels_for("odor", &codes(&["n", "f", "p"]));
        let offered: Vec<&str> = options.iter().map(|(_, c)| c.as_str()).collect();
        assert_eq!(offered, vec!["f", "n", "p"]);
        assert!(options.iter().any(|(label, _)| label == "none (n)"));
    }

    #[test]
    fn test_unknown_code_gets_fallback_label() {
        let catalog = FeatureCatalog::standard();
        let options = catalog.labels_for("odor", &codes(&["n", "z"]));
        assert!(options.contains(&("Other (z)".to_string(), "z".to_string())));
    }

    #[test]
    fn test_every_valid_code_is_selectable() {
        let catalog = FeatureCatalog::standard();
        let valid = codes(&["a", "l", "c", "y", "f", "m", "n", "p", "s", "q"]);
        let options = catalog.labels_for("odor", &valid);
        for code in &valid {
            assert!(
                options.iter().any(|(_, c)| c == code),
                "code '{}' not selectable",
                code
            );
        }
    }

    #[test]
    fn test_uncataloged_feature_is_all_fallback() {
        let catalog = FeatureCatalog::standard();
        let options = catalog.labels_for("spore-print-color", &codes(&["k", "n"]));
        assert_eq!(
            options,
            vec![
                ("Other (k)".to_string(), "k".to_string()),
                ("Other (n)".to_string(), "n".to_string()),
            ]
        );
    }

    #[test]
    fn test_empty_valid_codes_yields_empty_options() {
        let catalog = FeatureCatalog::standard();
        assert!(catalog.labels_for("odor", &BTreeSet::new()).is_empty());
    }
}
