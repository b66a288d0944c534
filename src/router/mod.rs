//! The routing engine and its public result shapes.

pub mod engine;
pub mod error;
pub mod prompt;
pub mod traits;

pub use engine::RoutingEngine;
pub use error::RouteError;
pub use traits::{Router, RouterStatus, RoutingAnalysis, RoutingResult, SpecialistSummary};

use anyhow::Result;
use std::sync::Arc;

use crate::analysis::create_analyzer;
use crate::classifier::create_classifier;
use crate::config::Config;
use crate::context::create_context_store;
use crate::invoker::create_invoker;
use crate::scoring::create_scorer;
use crate::specialists::create_registry;

/// Wire a complete routing engine from configuration.
pub fn create_engine(config: &Config) -> Result<RoutingEngine> {
    let registry = Arc::new(create_registry(
        config.specialists_path.as_deref(),
        &config.routing.fallback_specialist,
    )?);

    Ok(RoutingEngine::new(
        registry.clone(),
        create_analyzer(registry.clone()),
        create_scorer(config.scoring.clone()),
        create_context_store(config.routing.max_history),
        create_classifier(&config.classifier, registry.ids())?,
        create_invoker(&config.invoker)?,
    ))
}
