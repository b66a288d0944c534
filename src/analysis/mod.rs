//! Query analysis - extracts keywords, intent, and domain indicators.

pub mod keyword;
pub mod tables;
pub mod traits;

pub use keyword::KeywordAnalyzer;
pub use tables::GENERAL_INQUIRY;
pub use traits::{Analyzer, QueryAnalysis};

use crate::specialists::SpecialistRegistry;
use std::sync::Arc;

/// Create the default table-driven analyzer for a registry.
pub fn create_analyzer(registry: Arc<SpecialistRegistry>) -> Box<dyn Analyzer> {
    Box::new(KeywordAnalyzer::new(registry))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::specialists::default_profiles;

    #[test]
    fn factory_builds_keyword_analyzer() {
        let registry = Arc::new(
            SpecialistRegistry::from_profiles(default_profiles(), "general-assistant").unwrap(),
        );
        let analyzer = create_analyzer(registry);
        assert_eq!(analyzer.name(), "keyword");
    }
}
