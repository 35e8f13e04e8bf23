use crate::models::{Article, Verdict};
use std::fmt::Write;

/// Plain-text rendering of a verdict for terminal output.
pub fn render(verdict: &Verdict) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Prediction: {}", verdict.prediction);

    if verdict.fact_check.is_found() {
        let _ = writeln!(out, "Fact check: Found");
        if let Some(link) = verdict.fact_check.link() {
            let _ = writeln!(out, "  Review: {link}");
        }
    } else {
        let _ = writeln!(out, "Fact check: Not Found");
    }

    if let Some(article) = verdict.similarity.matched_article() {
        let score = verdict.similarity.score().unwrap_or_default();
        let _ = writeln!(out, "Matched article (similarity {score:.2}):");
        write_article(&mut out, article);
    }

    let related = verdict.similarity.remaining_articles();
    if !related.is_empty() {
        let _ = writeln!(out, "Related articles:");
        for article in related {
            write_article(&mut out, article);
        }
    }

    if verdict.high_confidence_unverified {
        let _ = writeln!(
            out,
            "Warning: the model is highly confident this is real news, but no source could confirm it."
        );
    }
    if verdict.show_general_warning {
        let _ = writeln!(
            out,
            "Warning: no fact checks or related articles were found. Verify with trusted sources."
        );
    }
    out
}

fn write_article(out: &mut String, article: &Article) {
    let _ = writeln!(out, "  - {} ({})", article.title, article.source);
    let _ = writeln!(out, "    {}", article.published);
    let _ = writeln!(out, "    {}", article.url);
}
