//! Validated parameter sets for OIDC federation providers.

use crate::error::{Error, MissingParameters, Result};
use std::collections::BTreeMap;
use std::collections::HashMap;
use std::collections::btree_map::Entry;

/// An immutable mapping of kebab-case parameter names to values.
///
/// Populated once from caller input at provider construction time and
/// read-only afterwards. The backing map's iteration order is never
/// observable; only the required-name list order is (in error messages
/// and in persisted output).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterSet {
    values: BTreeMap<String, String>,
}

impl ParameterSet {
    /// Build a parameter set from a single mapping.
    pub fn new(values: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            values: values.into_iter().collect(),
        }
    }

    /// Merge universal OIDC parameters with variant-specific ones.
    ///
    /// A key present in both mappings with different values is rejected
    /// rather than resolved by precedence; identical duplicates merge.
    pub fn merged(
        universal: HashMap<String, String>,
        variant: HashMap<String, String>,
    ) -> Result<Self> {
        let mut values: BTreeMap<String, String> = universal.into_iter().collect();

        for (name, value) in variant {
            match values.entry(name) {
                Entry::Occupied(existing) => {
                    if existing.get() != &value {
                        return Err(Error::ConflictingParameter(existing.key().clone()));
                    }
                }
                Entry::Vacant(slot) => {
                    slot.insert(value);
                }
            }
        }

        Ok(Self { values })
    }

    /// Value for `name`, if present.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Value for `name`, or the empty string when absent.
    ///
    /// Claim construction only reads names that construction-time
    /// validation has already guaranteed non-empty.
    pub fn value_of(&self, name: &str) -> &str {
        self.get(name).unwrap_or("")
    }

    /// Check that every required name maps to a non-empty value.
    ///
    /// Scans the whole list so a single failure reports every missing
    /// parameter at once.
    pub fn validate(
        &self,
        required_names: &[String],
    ) -> std::result::Result<(), MissingParameters> {
        let missing: Vec<String> = required_names
            .iter()
            .filter(|name| self.get(name).is_none_or(str::is_empty))
            .cloned()
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(MissingParameters::new(missing))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn required(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn test_validate_passes_when_all_present() {
        let params = ParameterSet::new([
            ("oidc-provider-url".to_string(), "https://example.com".to_string()),
            ("oidc-client-id".to_string(), "client".to_string()),
        ]);

        let result = params.validate(&required(&["oidc-provider-url", "oidc-client-id"]));
        assert_eq!(result, Ok(()));
    }

    #[test]
    fn test_validate_reports_every_missing_name() {
        let params = ParameterSet::new([("oidc-client-id".to_string(), "client".to_string())]);

        let missing = params
            .validate(&required(&["oidc-provider-url", "oidc-client-id", "github-org"]))
            .unwrap_err();

        assert_eq!(missing.names(), ["oidc-provider-url", "github-org"]);
    }

    #[test]
    fn test_empty_value_counts_as_missing() {
        let params = ParameterSet::new([("deployment-branch".to_string(), String::new())]);

        let missing = params.validate(&required(&["deployment-branch"])).unwrap_err();
        assert_eq!(missing.names(), ["deployment-branch"]);
    }

    #[test]
    fn test_merged_rejects_conflicting_keys() {
        let universal = HashMap::from([("oidc-client-id".to_string(), "one".to_string())]);
        let variant = HashMap::from([("oidc-client-id".to_string(), "two".to_string())]);

        let err = ParameterSet::merged(universal, variant).unwrap_err();
        assert!(matches!(err, Error::ConflictingParameter(name) if name == "oidc-client-id"));
    }

    #[test]
    fn test_merged_tolerates_identical_duplicates() {
        let universal = HashMap::from([("oidc-client-id".to_string(), "same".to_string())]);
        let variant = HashMap::from([
            ("oidc-client-id".to_string(), "same".to_string()),
            ("github-org".to_string(), "acme".to_string()),
        ]);

        let params = ParameterSet::merged(universal, variant).unwrap();
        assert_eq!(params.get("oidc-client-id"), Some("same"));
        assert_eq!(params.get("github-org"), Some("acme"));
    }

    #[test]
    fn test_insertion_order_does_not_affect_behavior() {
        let forward = ParameterSet::new([
            ("a".to_string(), "1".to_string()),
            ("b".to_string(), "2".to_string()),
        ]);
        let reverse = ParameterSet::new([
            ("b".to_string(), "2".to_string()),
            ("a".to_string(), "1".to_string()),
        ]);

        assert_eq!(forward, reverse);
        assert_eq!(
            forward.validate(&required(&["a", "b", "c"])),
            reverse.validate(&required(&["a", "b", "c"]))
        );
    }
}
