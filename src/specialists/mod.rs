//! Specialist registry - the static catalog of routable specialist profiles.

pub mod defaults;
pub mod profile;
pub mod registry;

pub use defaults::default_profiles;
pub use profile::SpecialistProfile;
pub use registry::{RegistryEntry, SpecialistRegistry};

use anyhow::Result;
use std::path::Path;

/// Hardcoded fallback specialist used when config names none.
pub const DEFAULT_FALLBACK_ID: &str = "general-assistant";

/// Factory: build the registry from an optional TOML profile file,
/// falling back to the built-in profile set.
pub fn create_registry(
    profiles_path: Option<&Path>,
    fallback_id: &str,
) -> Result<SpecialistRegistry> {
    match profiles_path {
        Some(path) => SpecialistRegistry::load_toml(path, fallback_id),
        None => SpecialistRegistry::from_profiles(default_profiles(), fallback_id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factory_builds_default_registry() {
        let registry = create_registry(None, DEFAULT_FALLBACK_ID).unwrap();
        assert!(registry.len() >= 6);
        assert!(registry.get(DEFAULT_FALLBACK_ID).is_some());
    }

    #[test]
    fn factory_rejects_unregistered_fallback() {
        assert!(create_registry(None, "no-such-specialist").is_err());
    }
}
