//! Specialist profile data - immutable after registry construction.

use serde::{Deserialize, Serialize};

/// A registered backend persona with a keyword/domain profile and a
/// confidence threshold its score must meet to win a query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecialistProfile {
    /// Unique id used in routing decisions (e.g. `"technical-specialist"`).
    pub id: String,
    /// Human-readable display name.
    pub name: String,
    /// Free-text description; also feeds the analyzer's semantic-overlap check.
    pub description: String,
    /// What this specialist can do, for status displays.
    #[serde(default)]
    pub capabilities: Vec<String>,
    /// Keywords matched case-insensitively as substrings of the query.
    pub keywords: Vec<String>,
    /// Domain tags this specialist claims (see `analysis::tables`).
    #[serde(default)]
    pub domains: Vec<String>,
    /// Minimum confidence score required for this specialist to be selected.
    pub confidence_threshold: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_toml_round_trip() {
        let profile = SpecialistProfile {
            id: "test-specialist".into(),
            name: "Test Specialist".into(),
            description: "handles test queries".into(),
            capabilities: vec!["testing".into()],
            keywords: vec!["test".into()],
            domains: vec!["software_development".into()],
            confidence_threshold: 0.5,
        };

        let toml_str = toml::to_string(&profile).unwrap();
        let parsed: SpecialistProfile = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.id, "test-specialist");
        assert_eq!(parsed.confidence_threshold, 0.5);
    }

    #[test]
    fn optional_fields_default_empty() {
        let parsed: SpecialistProfile = toml::from_str(
            r#"
            id = "bare"
            name = "Bare"
            description = "minimal profile"
            keywords = ["bare"]
            confidence_threshold = 0.4
            "#,
        )
        .unwrap();
        assert!(parsed.capabilities.is_empty());
        assert!(parsed.domains.is_empty());
    }
}
