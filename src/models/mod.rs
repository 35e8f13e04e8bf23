pub mod article;
pub mod ids;
pub mod request;
pub mod verdict;

pub use article::{format_published, Article, RawArticle, RawSource, TIME_NOT_AVAILABLE};
pub use ids::CheckId;
pub use request::CheckRequest;
pub use verdict::{
    ClassifierResult, FactCheckResult, Label, SimilarityOutcome, SimilarityStage, Verdict,
    HIGH_CONFIDENCE_THRESHOLD, REAL_THRESHOLD, SIMILARITY_THRESHOLD,
};
