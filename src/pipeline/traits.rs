use crate::artifacts::FeatureVector;
use async_trait::async_trait;
use serde_json::Value;

/// Outbound lookup service. Implementations add their own credential.
#[async_trait]
pub trait SearchClient: Send + Sync {
    async fn search(&self, params: &[(&str, String)]) -> anyhow::Result<Value>;
}

/// Fitted text to feature mapping.
pub trait FeatureTransform: Send + Sync {
    fn transform(&self, texts: &[&str]) -> Vec<FeatureVector>;
}

/// Fitted two-class model. Index 1 of each row is the "real" class.
pub trait ProbabilisticClassifier: Send + Sync {
    fn predict_proba(&self, features: &[FeatureVector]) -> Vec<[f64; 2]>;
}
