pub mod schema;

#[allow(unused_imports)]
pub use schema::{ClassifierConfig, Config, GatewayConfig, InvokerConfig, RoutingConfig};
