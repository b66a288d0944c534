//! Registry of specialist profiles with precompiled keyword patterns.

use anyhow::{bail, Context, Result};
use regex::Regex;
use serde::Deserialize;
use std::path::Path;

use super::profile::SpecialistProfile;

/// A profile plus its precompiled word-boundary keyword patterns.
///
/// Patterns are compiled once at registry build so exact-match scoring does
/// not recompile per query.
pub struct RegistryEntry {
    pub profile: SpecialistProfile,
    keyword_patterns: Vec<Regex>,
}

impl RegistryEntry {
    fn new(profile: SpecialistProfile) -> Result<Self> {
        let keyword_patterns = profile
            .keywords
            .iter()
            .map(|kw| {
                Regex::new(&format!(r"(?i)\b{}\b", regex::escape(kw))).with_context(|| {
                    format!("invalid keyword pattern for '{}': {kw}", profile.id)
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            profile,
            keyword_patterns,
        })
    }

    /// Count keywords matching the query at a whole-word boundary.
    ///
    /// Distinct from substring matching: `"docker"` matches `"docker build"`
    /// but not `"Dockerfile"`.
    pub fn exact_keyword_matches(&self, query: &str) -> usize {
        self.keyword_patterns
            .iter()
            .filter(|pattern| pattern.is_match(query))
            .count()
    }
}

/// Ordered, immutable catalog of specialists. Iteration order is declaration
/// order and doubles as the scoring tie-break order.
pub struct SpecialistRegistry {
    entries: Vec<RegistryEntry>,
    fallback_id: String,
}

#[derive(Deserialize)]
struct ProfilesFile {
    specialists: Vec<SpecialistProfile>,
}

impl SpecialistRegistry {
    /// Build a registry from profiles. The fallback id must be registered.
    pub fn from_profiles(profiles: Vec<SpecialistProfile>, fallback_id: &str) -> Result<Self> {
        if profiles.is_empty() {
            bail!("specialist registry cannot be empty");
        }

        let mut seen = std::collections::HashSet::new();
        for profile in &profiles {
            if !seen.insert(profile.id.clone()) {
                bail!("duplicate specialist id: {}", profile.id);
            }
        }
        if !seen.contains(fallback_id) {
            bail!("fallback specialist '{fallback_id}' is not registered");
        }

        let entries = profiles
            .into_iter()
            .map(RegistryEntry::new)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            entries,
            fallback_id: fallback_id.to_string(),
        })
    }

    /// Load profiles from a TOML file with a `[[specialists]]` array.
    pub fn load_toml(path: &Path, fallback_id: &str) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read specialist profiles: {}", path.display()))?;
        let file: ProfilesFile = toml::from_str(&raw)
            .with_context(|| format!("invalid specialist profiles: {}", path.display()))?;
        Self::from_profiles(file.specialists, fallback_id)
    }

    pub fn get(&self, id: &str) -> Option<&RegistryEntry> {
        self.entries.iter().find(|e| e.profile.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RegistryEntry> {
        self.entries.iter()
    }

    pub fn ids(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.profile.id.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn fallback_id(&self) -> &str {
        &self.fallback_id
    }

    /// The fallback entry. Registry construction guarantees it exists.
    pub fn fallback(&self) -> &RegistryEntry {
        self.get(&self.fallback_id)
            .unwrap_or_else(|| &self.entries[0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::specialists::default_profiles;

    fn registry() -> SpecialistRegistry {
        SpecialistRegistry::from_profiles(default_profiles(), "general-assistant").unwrap()
    }

    #[test]
    fn get_by_id() {
        let registry = registry();
        let entry = registry.get("technical-specialist").unwrap();
        assert_eq!(entry.profile.name, "Technical Specialist");
        assert!(registry.get("nonexistent").is_none());
    }

    #[test]
    fn exact_match_requires_word_boundary() {
        let registry = registry();
        let tech = registry.get("technical-specialist").unwrap();

        // "docker" inside "Dockerfile" is a substring but not a whole word.
        assert_eq!(tech.exact_keyword_matches("Write a Dockerfile please"), 0);
        assert!(tech.exact_keyword_matches("run docker build now") >= 2);
    }

    #[test]
    fn exact_match_is_case_insensitive() {
        let registry = registry();
        let tech = registry.get("technical-specialist").unwrap();
        assert!(tech.exact_keyword_matches("DEBUG the SERVER") >= 2);
    }

    #[test]
    fn multiword_keyword_matches_at_boundary() {
        let registry = registry();
        let data = registry.get("data-scientist").unwrap();
        assert!(data.exact_keyword_matches("train a machine learning model") >= 2);
    }

    #[test]
    fn duplicate_ids_rejected() {
        let mut profiles = default_profiles();
        let dup = profiles[0].clone();
        profiles.push(dup);
        assert!(SpecialistRegistry::from_profiles(profiles, "general-assistant").is_err());
    }

    #[test]
    fn empty_registry_rejected() {
        assert!(SpecialistRegistry::from_profiles(vec![], "general-assistant").is_err());
    }

    #[test]
    fn load_toml_profiles() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("specialists.toml");
        std::fs::write(
            &path,
            r#"
            [[specialists]]
            id = "only"
            name = "Only One"
            description = "the single specialist"
            keywords = ["everything"]
            confidence_threshold = 0.1
            "#,
        )
        .unwrap();

        let registry = SpecialistRegistry::load_toml(&path, "only").unwrap();
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.fallback_id(), "only");
    }
}
