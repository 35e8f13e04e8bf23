use crate::artifacts::FeatureVector;
use crate::pipeline::traits::ProbabilisticClassifier;
use serde::Deserialize;

/// Fitted binary logistic regression over sparse features.
#[derive(Clone, Debug, Deserialize)]
pub struct LogisticClassifier {
    classes: Vec<i64>,
    coef: Vec<f64>,
    intercept: f64,
}

impl LogisticClassifier {
    pub fn new(coef: Vec<f64>, intercept: f64) -> Self {
        Self {
            classes: vec![0, 1],
            coef,
            intercept,
        }
    }

    pub fn feature_count(&self) -> usize {
        self.coef.len()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.classes.len() != 2 {
            return Err(format!("expected 2 classes, found {}", self.classes.len()));
        }
        if self.coef.is_empty() {
            return Err("coefficient vector is empty".to_string());
        }
        if !self.intercept.is_finite() || self.coef.iter().any(|w| !w.is_finite()) {
            return Err("weights contain non-finite values".to_string());
        }
        Ok(())
    }

    fn real_probability(&self, features: &FeatureVector) -> f64 {
        let z = features
            .entries()
            .iter()
            .filter_map(|(col, value)| self.coef.get(*col).map(|w| w * value))
            .sum::<f64>()
            + self.intercept;
        1.0 / (1.0 + (-z).exp())
    }
}

impl ProbabilisticClassifier for LogisticClassifier {
    fn predict_proba(&self, features: &[FeatureVector]) -> Vec<[f64; 2]> {
        features
            .iter()
            .map(|row| {
                let p = self.real_probability(row);
                [1.0 - p, p]
            })
            .collect()
    }
}
