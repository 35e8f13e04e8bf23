use news_verdict::artifacts::{FeatureVector, ModelHandle};
use news_verdict::models::{SimilarityStage, TIME_NOT_AVAILABLE};
use news_verdict::pipeline::{
    CannedSearch, CheckPipeline, FailingSearch, FeatureTransform, ProbabilisticClassifier,
    SearchClient,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;

const NEWS: &str = "Scientists confirm water found on the moon";

/// Vectorizer that looks texts up in a fixed table; unknown texts map to the
/// zero vector.
struct TableVectorizer(HashMap<String, Vec<f64>>);

impl TableVectorizer {
    fn new(rows: &[(&str, &[f64])]) -> Self {
        Self(rows.iter().map(|(k, v)| (k.to_string(), v.to_vec())).collect())
    }
}

impl FeatureTransform for TableVectorizer {
    fn transform(&self, texts: &[&str]) -> Vec<FeatureVector> {
        texts
            .iter()
            .map(|t| FeatureVector::dense(self.0.get(*t).map(Vec::as_slice).unwrap_or(&[])))
            .collect()
    }
}

struct FixedProbability(f64);

impl ProbabilisticClassifier for FixedProbability {
    fn predict_proba(&self, features: &[FeatureVector]) -> Vec<[f64; 2]> {
        features.iter().map(|_| [1.0 - self.0, self.0]).collect()
    }
}

fn model(probability: f64, rows: &[(&str, &[f64])]) -> Arc<ModelHandle> {
    Arc::new(ModelHandle::new(
        TableVectorizer::new(rows),
        FixedProbability(probability),
    ))
}

fn pipeline<F: SearchClient, A: SearchClient>(
    model: Arc<ModelHandle>,
    claims: F,
    articles: A,
) -> CheckPipeline<F, A> {
    CheckPipeline {
        model,
        claims,
        articles,
    }
}

fn articles(count: usize) -> Value {
    let items: Vec<Value> = (0..count)
        .map(|i| {
            json!({
                "source": { "id": null, "name": format!("Source {i}") },
                "title": format!("Title {i}"),
                "description": format!("Description {i}"),
                "url": format!("https://news.example/{i}"),
                "publishedAt": "2024-03-05T14:07:00Z"
            })
        })
        .collect();
    json!({ "status": "ok", "totalResults": count, "articles": items })
}

#[tokio::test]
async fn fact_check_hit_skips_article_search() {
    let claims = CannedSearch::new(json!({
        "claims": [{
            "text": NEWS,
            "claimReview": [{ "url": "https://factcheck.example/review/1" }]
        }]
    }));
    let pipeline = pipeline(model(0.95, &[]), claims, CannedSearch::new(articles(3)));

    let verdict = pipeline.submit_check(NEWS).await;

    assert_eq!(verdict.prediction, "Real News (Confidence: 95.0%)");
    assert!(verdict.fact_check.is_found());
    assert_eq!(verdict.fact_check.link(), Some("https://factcheck.example/review/1"));
    assert_eq!(verdict.similarity, SimilarityStage::Skipped);
    assert!(verdict.similarity.matched_article().is_none());
    assert!(!verdict.high_confidence_unverified);
    assert!(!verdict.show_general_warning);
    assert_eq!(pipeline.articles.calls(), 0);
    assert_eq!(pipeline.claims.calls(), 1);
}

#[tokio::test]
async fn no_evidence_at_all_raises_general_warning() {
    let pipeline = pipeline(
        model(0.60, &[]),
        CannedSearch::new(json!({})),
        CannedSearch::new(articles(0)),
    );

    let verdict = pipeline.submit_check(NEWS).await;

    assert_eq!(verdict.prediction, "Fake News (Confidence: 60.0%)");
    assert!(!verdict.fact_check.is_found());
    assert!(verdict.similarity.is_exhausted());
    assert!(verdict.show_general_warning);
    assert!(!verdict.high_confidence_unverified);
    assert_eq!(pipeline.articles.calls(), 1);
}

#[tokio::test]
async fn weak_article_match_leaves_confident_verdict_unverified() {
    let weak: &[f64] = &[0.2, 0.9797958971132712];
    let rows: &[(&str, &[f64])] = &[
        (NEWS, &[1.0, 0.0]),
        ("Title 0. Description 0", &[0.0, 1.0]),
        ("Title 1. Description 1", &[0.1, 0.99498743710662]),
        ("Title 2. Description 2", weak),
        ("Title 3. Description 3", &[0.0, 1.0]),
        ("Title 4. Description 4", &[0.15, 0.98868599666426]),
    ];
    let pipeline = pipeline(
        model(0.95, rows),
        CannedSearch::new(json!({ "claims": [] })),
        CannedSearch::new(articles(5)),
    );

    let verdict = pipeline.submit_check(NEWS).await;

    assert!(verdict.similarity.matched_article().is_none());
    assert_eq!(verdict.similarity.score(), None);
    assert!(verdict.similarity.remaining_articles().is_empty());
    assert!(verdict.similarity.is_exhausted());
    assert!(verdict.show_general_warning);
    assert!(verdict.high_confidence_unverified);
}

#[tokio::test]
async fn strong_article_match_is_reported_with_the_rest() {
    let rows: &[(&str, &[f64])] = &[
        (NEWS, &[1.0, 0.0]),
        ("Title 0. Description 0", &[0.0, 1.0]),
        ("Title 1. Description 1", &[1.0, 1.0]),
        ("Title 2. Description 2", &[1.0, 0.0]),
        ("Title 3. Description 3", &[1.0, 0.0]),
    ];
    let pipeline = pipeline(
        model(0.95, rows),
        CannedSearch::new(json!({ "claims": [] })),
        CannedSearch::new(articles(4)),
    );

    let verdict = pipeline.submit_check(NEWS).await;

    let matched = verdict.similarity.matched_article().expect("match");
    assert_eq!(matched.title, "Title 2");
    assert_eq!(matched.source, "Source 2");
    assert_eq!(matched.published, "Published on: March 05, 2024 at 02:07 PM");
    assert!((verdict.similarity.score().unwrap() - 1.0).abs() < 1e-12);
    let rest: Vec<&str> = verdict
        .similarity
        .remaining_articles()
        .iter()
        .map(|a| a.title.as_str())
        .collect();
    assert_eq!(rest, vec!["Title 0", "Title 1", "Title 3"]);
    assert!(!verdict.similarity.is_exhausted());
    assert!(!verdict.show_general_warning);
    assert!(!verdict.high_confidence_unverified);
}

#[tokio::test]
async fn lookups_send_expected_parameters() {
    let pipeline = pipeline(
        model(0.5, &[]),
        CannedSearch::new(json!({})),
        CannedSearch::new(articles(0)),
    );

    pipeline.submit_check(NEWS).await;

    let claim_params = pipeline.claims.last_params();
    assert!(claim_params.contains(&("query".to_string(), NEWS.to_string())));
    assert!(claim_params.contains(&("languageCode".to_string(), "en".to_string())));

    let article_params = pipeline.articles.last_params();
    for expected in [
        ("q", NEWS),
        ("language", "en"),
        ("pageSize", "20"),
        ("sortBy", "relevancy"),
    ] {
        assert!(
            article_params.contains(&(expected.0.to_string(), expected.1.to_string())),
            "missing {expected:?}"
        );
    }
}

#[tokio::test]
async fn unreachable_services_degrade_to_no_evidence() {
    let pipeline = pipeline(model(0.97, &[]), FailingSearch::default(), FailingSearch::default());

    let verdict = pipeline.submit_check(NEWS).await;

    assert_eq!(pipeline.claims.calls(), 1);
    assert_eq!(pipeline.articles.calls(), 1);
    assert!(!verdict.fact_check.is_found());
    assert_eq!(verdict.fact_check.link(), None);
    assert!(verdict.similarity.is_exhausted());
    assert!(verdict.show_general_warning);
    assert!(verdict.high_confidence_unverified);
}

#[tokio::test]
async fn malformed_responses_degrade_to_no_evidence() {
    let pipeline = pipeline(
        model(0.5, &[]),
        CannedSearch::new(json!({ "claims": "not a list" })),
        CannedSearch::new(json!({ "articles": [{ "description": "missing title and url" }] })),
    );

    let verdict = pipeline.submit_check(NEWS).await;

    assert!(!verdict.fact_check.is_found());
    assert!(verdict.similarity.is_exhausted());
    assert!(verdict.show_general_warning);
}

#[tokio::test]
async fn bad_timestamps_do_not_break_matching() {
    let rows: &[(&str, &[f64])] = &[(NEWS, &[1.0]), ("Only. ", &[1.0])];
    let pipeline = pipeline(
        model(0.5, rows),
        CannedSearch::new(json!({})),
        CannedSearch::new(json!({
            "articles": [{
                "title": "Only",
                "url": "https://news.example/only",
                "publishedAt": "last tuesday"
            }]
        })),
    );

    let verdict = pipeline.submit_check(NEWS).await;

    let matched = verdict.similarity.matched_article().expect("match");
    assert_eq!(matched.published, TIME_NOT_AVAILABLE);
    assert_eq!(matched.description, "");
    assert_eq!(matched.source, "Unknown");
}

#[tokio::test]
async fn verdict_serializes_for_presentation() {
    let pipeline = pipeline(
        model(0.60, &[]),
        CannedSearch::new(json!({})),
        CannedSearch::new(articles(0)),
    );

    let verdict = pipeline.submit_check(NEWS).await;
    let value = serde_json::to_value(&verdict).unwrap();

    assert_eq!(value["prediction"], "Fake News (Confidence: 60.0%)");
    assert_eq!(value["text"], NEWS);
    assert_eq!(value["similarity"]["status"], "ran");
    assert_eq!(value["show_general_warning"], true);
    assert_eq!(value["high_confidence_unverified"], false);
}
