//! External specialist invoker - hands the final prompt to a backend.

pub mod http;
pub mod local;
pub mod traits;

pub use http::HttpInvoker;
pub use local::LocalEchoInvoker;
pub use traits::SpecialistInvoker;

use crate::config::InvokerConfig;
use anyhow::Result;
use std::time::Duration;

/// Factory: HTTP invoker when an endpoint is configured, local echo
/// otherwise.
pub fn create_invoker(config: &InvokerConfig) -> Result<Box<dyn SpecialistInvoker>> {
    match &config.endpoint {
        Some(endpoint) => Ok(Box::new(HttpInvoker::new(
            endpoint,
            Duration::from_secs(config.timeout_secs),
        )?)),
        None => Ok(Box::new(LocalEchoInvoker)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factory_local_without_endpoint() {
        let invoker = create_invoker(&InvokerConfig::default()).unwrap();
        assert_eq!(invoker.name(), "local_echo");
    }

    #[test]
    fn factory_http_with_endpoint() {
        let config = InvokerConfig {
            endpoint: Some("http://localhost:8081/invoke".into()),
            ..InvokerConfig::default()
        };
        let invoker = create_invoker(&config).unwrap();
        assert_eq!(invoker.name(), "http");
    }
}
