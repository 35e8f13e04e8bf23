//! Pre-trained model artifacts.
//!
//! The vectorizer and classifier are loaded once at startup into an immutable
//! [`ModelHandle`] that is shared read-only by every check.

pub mod logistic;
pub mod tfidf;
pub mod vector;

pub use logistic::LogisticClassifier;
pub use tfidf::TfIdfVectorizer;
pub use vector::{cosine_similarity, FeatureVector};

use crate::pipeline::traits::{FeatureTransform, ProbabilisticClassifier};
use serde::de::DeserializeOwned;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

pub const VECTORIZER_FILE: &str = "vectorizer.json";
pub const CLASSIFIER_FILE: &str = "classifier.json";

/// Conditions that prevent the process from starting.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("failed to read model artifact {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("model artifact {} is not valid: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("model artifact {} is inconsistent: {reason}", .path.display())]
    Invalid { path: PathBuf, reason: String },
}

pub struct ModelHandle {
    vectorizer: Box<dyn FeatureTransform>,
    classifier: Box<dyn ProbabilisticClassifier>,
}

impl ModelHandle {
    pub fn new(
        vectorizer: impl FeatureTransform + 'static,
        classifier: impl ProbabilisticClassifier + 'static,
    ) -> Self {
        Self {
            vectorizer: Box::new(vectorizer),
            classifier: Box::new(classifier),
        }
    }

    /// Loads `vectorizer.json` and `classifier.json` from `dir`.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let dir = dir.as_ref();
        let vectorizer_path = dir.join(VECTORIZER_FILE);
        let classifier_path = dir.join(CLASSIFIER_FILE);

        let vectorizer: TfIdfVectorizer = read_artifact(&vectorizer_path)?;
        vectorizer.validate().map_err(|reason| ArtifactError::Invalid {
            path: vectorizer_path.clone(),
            reason,
        })?;

        let classifier: LogisticClassifier = read_artifact(&classifier_path)?;
        classifier.validate().map_err(|reason| ArtifactError::Invalid {
            path: classifier_path.clone(),
            reason,
        })?;

        if classifier.feature_count() != vectorizer.vocabulary_size() {
            return Err(ArtifactError::Invalid {
                path: classifier_path,
                reason: format!(
                    "classifier expects {} features but vectorizer produces {}",
                    classifier.feature_count(),
                    vectorizer.vocabulary_size()
                ),
            });
        }

        info!(
            dir = %dir.display(),
            features = vectorizer.vocabulary_size(),
            "loaded model artifacts"
        );
        Ok(Self::new(vectorizer, classifier))
    }

    pub fn vectorizer(&self) -> &dyn FeatureTransform {
        self.vectorizer.as_ref()
    }

    pub fn classifier(&self) -> &dyn ProbabilisticClassifier {
        self.classifier.as_ref()
    }
}

impl fmt::Debug for ModelHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelHandle").finish_non_exhaustive()
    }
}

fn read_artifact<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ArtifactError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| ArtifactError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
