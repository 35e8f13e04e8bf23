use crate::models::{Article, CheckId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Probability above which the text is labelled real.
pub const REAL_THRESHOLD: f64 = 0.8;

/// Probability above which an uncorroborated real label is flagged.
pub const HIGH_CONFIDENCE_THRESHOLD: f64 = 0.90;

/// Minimum cosine similarity for an article to count as corroboration.
pub const SIMILARITY_THRESHOLD: f64 = 0.35;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Label {
    Real,
    Fake,
}

impl Label {
    pub fn from_probability(probability: f64) -> Self {
        if probability > REAL_THRESHOLD {
            Label::Real
        } else {
            Label::Fake
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Label::Real => "Real News",
            Label::Fake => "Fake News",
        }
    }
}

/// Output of the classifier stage. The label is always derived from the
/// probability.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClassifierResult {
    label: Label,
    probability: f64,
}

impl ClassifierResult {
    pub fn from_probability(probability: f64) -> Self {
        Self {
            label: Label::from_probability(probability),
            probability,
        }
    }

    pub fn label(&self) -> Label {
        self.label
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }
}

/// Output of the claim search stage. A link is only ever present on a hit.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactCheckResult {
    found: bool,
    link: Option<String>,
}

impl FactCheckResult {
    pub fn not_found() -> Self {
        Self::default()
    }

    pub fn found(link: Option<String>) -> Self {
        Self { found: true, link }
    }

    pub fn is_found(&self) -> bool {
        self.found
    }

    pub fn link(&self) -> Option<&str> {
        self.link.as_deref()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimilarityOutcome {
    pub matched_article: Option<Article>,
    pub score: Option<f64>,
    /// Articles other than the match, in fetch order.
    pub remaining_articles: Vec<Article>,
    /// True when the search produced nothing usable.
    pub exhausted: bool,
}

impl SimilarityOutcome {
    pub fn exhausted() -> Self {
        Self {
            matched_article: None,
            score: None,
            remaining_articles: Vec::new(),
            exhausted: true,
        }
    }

    pub fn matched(article: Article, score: f64, remaining_articles: Vec<Article>) -> Self {
        Self {
            matched_article: Some(article),
            score: Some(score),
            remaining_articles,
            exhausted: false,
        }
    }
}

/// The article search only runs when the claim search came back empty.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SimilarityStage {
    Skipped,
    Ran(SimilarityOutcome),
}

impl SimilarityStage {
    pub fn matched_article(&self) -> Option<&Article> {
        match self {
            SimilarityStage::Skipped => None,
            SimilarityStage::Ran(outcome) => outcome.matched_article.as_ref(),
        }
    }

    pub fn score(&self) -> Option<f64> {
        match self {
            SimilarityStage::Skipped => None,
            SimilarityStage::Ran(outcome) => outcome.score,
        }
    }

    pub fn remaining_articles(&self) -> &[Article] {
        match self {
            SimilarityStage::Skipped => &[],
            SimilarityStage::Ran(outcome) => &outcome.remaining_articles,
        }
    }

    /// A skipped search counts as exhausted.
    pub fn is_exhausted(&self) -> bool {
        match self {
            SimilarityStage::Skipped => true,
            SimilarityStage::Ran(outcome) => outcome.exhausted,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub check_id: CheckId,
    pub checked_at: DateTime<Utc>,
    pub text: String,
    /// e.g. `Real News (Confidence: 95.0%)`
    pub prediction: String,
    pub classifier: ClassifierResult,
    pub fact_check: FactCheckResult,
    pub similarity: SimilarityStage,
    pub high_confidence_unverified: bool,
    pub show_general_warning: bool,
}
