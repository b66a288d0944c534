//! External classification collaborator - consulted before the local
//! analyze/score pipeline.

pub mod heuristic;
pub mod http;
pub mod traits;

pub use http::HttpClassifier;
pub use traits::{ClassifierClient, ClassifierVerdict, DisabledClassifier};

use crate::config::ClassifierConfig;
use anyhow::Result;
use std::time::Duration;

/// Factory: build the configured classifier client, or the disabled stub
/// when no endpoint is set.
pub fn create_classifier(
    config: &ClassifierConfig,
    known_specialists: Vec<String>,
) -> Result<Box<dyn ClassifierClient>> {
    match (&config.endpoint, config.enabled) {
        (Some(endpoint), true) => Ok(Box::new(HttpClassifier::new(
            endpoint,
            Duration::from_secs(config.timeout_secs),
            known_specialists,
        )?)),
        _ => Ok(Box::new(DisabledClassifier)),
    }
}
