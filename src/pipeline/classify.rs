use crate::artifacts::ModelHandle;
use crate::models::ClassifierResult;
use tracing::{debug, warn};

pub fn classify(model: &ModelHandle, text: &str) -> ClassifierResult {
    let features = model.vectorizer().transform(&[text]);
    let probability = match model.classifier().predict_proba(&features).first() {
        Some(row) => row[1],
        None => {
            warn!("classifier returned no probability row, scoring as 0");
            0.0
        }
    };
    let result = ClassifierResult::from_probability(probability);
    debug!(probability, label = ?result.label(), "classified text");
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::{FeatureVector, LogisticClassifier, TfIdfVectorizer};
    use crate::models::Label;
    use crate::pipeline::traits::{FeatureTransform, ProbabilisticClassifier};
    use std::collections::HashMap;

    struct Constant;

    impl FeatureTransform for Constant {
        fn transform(&self, texts: &[&str]) -> Vec<FeatureVector> {
            texts.iter().map(|_| FeatureVector::dense(&[1.0])).collect()
        }
    }

    struct Fixed(f64);

    impl ProbabilisticClassifier for Fixed {
        fn predict_proba(&self, features: &[FeatureVector]) -> Vec<[f64; 2]> {
            features.iter().map(|_| [1.0 - self.0, self.0]).collect()
        }
    }

    #[test]
    fn uses_real_class_probability() {
        let model = ModelHandle::new(Constant, Fixed(0.93));
        let result = classify(&model, "some news");
        assert_eq!(result.probability(), 0.93);
        assert_eq!(result.label(), Label::Real);
    }

    struct Silent;

    impl ProbabilisticClassifier for Silent {
        fn predict_proba(&self, _features: &[FeatureVector]) -> Vec<[f64; 2]> {
            Vec::new()
        }
    }

    #[test]
    fn missing_probability_row_scores_zero() {
        let model = ModelHandle::new(Constant, Silent);
        let result = classify(&model, "some news");
        assert_eq!(result.probability(), 0.0);
        assert_eq!(result.label(), Label::Fake);
    }

    #[test]
    fn boundary_probability_is_fake() {
        let model = ModelHandle::new(Constant, Fixed(0.8));
        assert_eq!(classify(&model, "some news").label(), Label::Fake);
        let model = ModelHandle::new(Constant, Fixed(0.80000001));
        assert_eq!(classify(&model, "some news").label(), Label::Real);
    }

    #[test]
    fn fitted_artifacts_classify_end_to_end() {
        let mut vocabulary = HashMap::new();
        vocabulary.insert("officials".to_string(), 0);
        vocabulary.insert("shocking".to_string(), 1);
        let vectorizer = TfIdfVectorizer::new(vocabulary, vec![1.0, 1.0]);
        let classifier = LogisticClassifier::new(vec![6.0, -6.0], 0.0);
        let model = ModelHandle::new(vectorizer, classifier);

        assert_eq!(classify(&model, "Officials confirmed the report").label(), Label::Real);
        assert_eq!(classify(&model, "SHOCKING secret revealed").label(), Label::Fake);
    }
}
