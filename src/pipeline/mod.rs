pub mod check;
pub mod classify;
pub mod fact_check;
pub mod fusion;
pub mod http;
pub mod mock;
pub mod similarity;
pub mod traits;

/// Language restriction applied to both lookups.
pub const LANGUAGE_CODE: &str = "en";

pub use check::CheckPipeline;
pub use classify::classify;
pub use fact_check::fact_check;
pub use fusion::{fuse, prediction_text};
pub use http::HttpSearchClient;
pub use mock::{CannedSearch, DummySearch, FailingSearch};
pub use similarity::{find_similar_articles, rank_articles, select_match, stable_argmax};
pub use traits::{FeatureTransform, ProbabilisticClassifier, SearchClient};
