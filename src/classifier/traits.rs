//! Remote classification client trait and verdict shape.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// The structured result the router expects from the remote classifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifierVerdict {
    pub target_specialist: String,
    /// Confidence in `[0, 1]`.
    pub confidence: f64,
    #[serde(default)]
    pub rationale: String,
    #[serde(default)]
    pub needs_clarification: bool,
}

/// Client for the external semantic classifier the router consults before
/// running the local pipeline. Any error here routes locally instead.
#[async_trait]
pub trait ClassifierClient: Send + Sync {
    /// Classify a query into a target specialist.
    async fn classify(&self, query: &str) -> Result<ClassifierVerdict>;

    /// The name of this client implementation.
    fn name(&self) -> &str;
}

/// Client used when no remote classifier is configured; always errors so the
/// router takes the local analysis path.
pub struct DisabledClassifier;

#[async_trait]
impl ClassifierClient for DisabledClassifier {
    async fn classify(&self, _query: &str) -> Result<ClassifierVerdict> {
        anyhow::bail!("remote classification disabled")
    }

    fn name(&self) -> &str {
        "disabled"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn disabled_classifier_always_errors() {
        let client = DisabledClassifier;
        assert!(client.classify("anything").await.is_err());
    }

    #[test]
    fn verdict_parses_camel_case_payload() {
        let verdict: ClassifierVerdict = serde_json::from_str(
            r#"{"targetSpecialist":"technical-specialist","confidence":0.92,
                "rationale":"code question","needsClarification":false}"#,
        )
        .unwrap();
        assert_eq!(verdict.target_specialist, "technical-specialist");
        assert!((verdict.confidence - 0.92).abs() < 1e-9);
    }

    #[test]
    fn verdict_defaults_optional_fields() {
        let verdict: ClassifierVerdict =
            serde_json::from_str(r#"{"targetSpecialist":"x","confidence":0.5}"#).unwrap();
        assert!(verdict.rationale.is_empty());
        assert!(!verdict.needs_clarification);
    }
}
