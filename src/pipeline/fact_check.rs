use crate::models::FactCheckResult;
use crate::pipeline::traits::SearchClient;
use crate::pipeline::LANGUAGE_CODE;
use anyhow::Context;
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

/// Only `claims[0]` is read; later entries may have any shape.
#[derive(Debug, Default, Deserialize)]
struct ClaimSearchResponse {
    #[serde(default)]
    claims: Option<Vec<Value>>,
}

/// Looks the text up in the claim search service. Never fails: any error is
/// logged and reported as not found.
pub async fn fact_check<C>(client: &C, text: &str) -> FactCheckResult
where
    C: SearchClient + ?Sized,
{
    match lookup(client, text).await {
        Ok(result) => {
            info!(found = result.is_found(), link = ?result.link(), "claim search finished");
            result
        }
        Err(err) => {
            warn!(error = %format!("{err:#}"), "claim search failed, treating as not found");
            FactCheckResult::not_found()
        }
    }
}

async fn lookup<C>(client: &C, text: &str) -> anyhow::Result<FactCheckResult>
where
    C: SearchClient + ?Sized,
{
    let body = client
        .search(&[
            ("query", text.to_string()),
            ("languageCode", LANGUAGE_CODE.to_string()),
        ])
        .await?;
    let response: ClaimSearchResponse =
        serde_json::from_value(body).context("malformed claim search response")?;
    Ok(interpret(response))
}

fn interpret(response: ClaimSearchResponse) -> FactCheckResult {
    let claims = response.claims.unwrap_or_default();
    let Some(first) = claims.first() else {
        return FactCheckResult::not_found();
    };
    let link = first
        .get("claimReview")
        .and_then(|reviews| reviews.get(0))
        .and_then(|review| review.get("url"))
        .and_then(Value::as_str)
        .map(str::to_string);
    FactCheckResult::found(link)
}
