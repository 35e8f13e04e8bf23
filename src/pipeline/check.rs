use crate::artifacts::ModelHandle;
use crate::models::{CheckRequest, SimilarityStage, Verdict};
use crate::pipeline::classify::classify;
use crate::pipeline::fact_check::fact_check;
use crate::pipeline::fusion::fuse;
use crate::pipeline::similarity::find_similar_articles;
use crate::pipeline::traits::SearchClient;
use std::sync::Arc;
use tracing::{info, info_span, Instrument};

pub struct CheckPipeline<F, A>
where
    F: SearchClient,
    A: SearchClient,
{
    pub model: Arc<ModelHandle>,
    pub claims: F,
    pub articles: A,
}

impl<F, A> CheckPipeline<F, A>
where
    F: SearchClient,
    A: SearchClient,
{
    /// Runs one check start to finish. `text` must be non-empty; every
    /// collaborator failure is folded into the returned verdict.
    pub async fn submit_check(&self, text: &str) -> Verdict {
        let request = CheckRequest::new(text);
        let span = info_span!("check", check_id = %request.id);
        self.run(request).instrument(span).await
    }

    async fn run(&self, request: CheckRequest) -> Verdict {
        info!(chars = request.text.chars().count(), "check started");
        let classifier = classify(&self.model, &request.text);

        let fact = fact_check(&self.claims, &request.text).await;
        let similarity = if fact.is_found() {
            SimilarityStage::Skipped
        } else {
            SimilarityStage::Ran(
                find_similar_articles(&self.articles, self.model.vectorizer(), &request.text).await,
            )
        };

        let verdict = fuse(&request, classifier, fact, similarity);
        info!(
            prediction = %verdict.prediction,
            fact_found = verdict.fact_check.is_found(),
            matched = verdict.similarity.matched_article().is_some(),
            high_confidence_unverified = verdict.high_confidence_unverified,
            show_general_warning = verdict.show_general_warning,
            "check finished"
        );
        verdict
    }
}
