//! Fallback corroboration through article search.
//!
//! Candidate articles are ranked by cosine similarity to the submitted text in
//! the classifier's own feature space. That vectorizer was fitted for
//! real/fake discrimination rather than general similarity; it is reused here
//! so scores stay comparable with previously reported ones.

use crate::artifacts::cosine_similarity;
use crate::models::{Article, RawArticle, SimilarityOutcome, SIMILARITY_THRESHOLD};
use crate::pipeline::traits::{FeatureTransform, SearchClient};
use crate::pipeline::LANGUAGE_CODE;
use anyhow::Context;
use serde::Deserialize;
use tracing::{debug, info, warn};

pub const PAGE_SIZE: u32 = 20;
pub const SORT_BY: &str = "relevancy";

#[derive(Debug, Default, Deserialize)]
struct ArticleSearchResponse {
    #[serde(default)]
    articles: Option<Vec<RawArticle>>,
}

/// Searches for articles about `text` and picks the closest one. Never fails:
/// search errors and weak matches both come back exhausted.
pub async fn find_similar_articles<C>(
    client: &C,
    vectorizer: &dyn FeatureTransform,
    text: &str,
) -> SimilarityOutcome
where
    C: SearchClient + ?Sized,
{
    match fetch_articles(client, text).await {
        Ok(articles) if articles.is_empty() => {
            info!("article search returned no articles");
            SimilarityOutcome::exhausted()
        }
        Ok(articles) => rank_articles(vectorizer, text, articles),
        Err(err) => {
            warn!(error = %format!("{err:#}"), "article search failed, treating as exhausted");
            SimilarityOutcome::exhausted()
        }
    }
}

async fn fetch_articles<C>(client: &C, text: &str) -> anyhow::Result<Vec<Article>>
where
    C: SearchClient + ?Sized,
{
    let body = client
        .search(&[
            ("q", text.to_string()),
            ("language", LANGUAGE_CODE.to_string()),
            ("pageSize", PAGE_SIZE.to_string()),
            ("sortBy", SORT_BY.to_string()),
        ])
        .await?;
    let response: ArticleSearchResponse =
        serde_json::from_value(body).context("malformed article search response")?;
    Ok(response
        .articles
        .unwrap_or_default()
        .into_iter()
        .map(Article::from)
        .collect())
}

/// Scores `articles` against `text` and keeps the best one if it clears
/// [`SIMILARITY_THRESHOLD`].
pub fn rank_articles(
    vectorizer: &dyn FeatureTransform,
    text: &str,
    mut articles: Vec<Article>,
) -> SimilarityOutcome {
    let mut corpus = Vec::with_capacity(articles.len() + 1);
    corpus.push(text.to_string());
    corpus.extend(articles.iter().map(Article::similarity_text));
    let corpus: Vec<&str> = corpus.iter().map(String::as_str).collect();

    let vectors = vectorizer.transform(&corpus);
    let Some((query, candidates)) = vectors.split_first() else {
        return SimilarityOutcome::exhausted();
    };
    let scores: Vec<f64> = candidates
        .iter()
        .take(articles.len())
        .map(|candidate| cosine_similarity(query, candidate))
        .collect();
    debug!(?scores, "scored candidate articles");

    match select_match(&scores) {
        Some((index, score)) => {
            let matched = articles.remove(index);
            info!(score, url = %matched.url, "matched corroborating article");
            SimilarityOutcome::matched(matched, score, articles)
        }
        None => {
            info!(candidates = scores.len(), "no article cleared the similarity threshold");
            SimilarityOutcome::exhausted()
        }
    }
}

/// Index and score of the first maximum, ignoring NaN.
pub fn stable_argmax(scores: &[f64]) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (index, &score) in scores.iter().enumerate() {
        if score.is_nan() {
            continue;
        }
        match best {
            Some((_, top)) if score <= top => {}
            _ => best = Some((index, score)),
        }
    }
    best
}

pub fn select_match(scores: &[f64]) -> Option<(usize, f64)> {
    stable_argmax(scores).filter(|(_, score)| *score >= SIMILARITY_THRESHOLD)
}
