use crate::models::{
    CheckRequest, ClassifierResult, FactCheckResult, Label, SimilarityStage, Verdict,
    HIGH_CONFIDENCE_THRESHOLD,
};

/// Combines the stage outputs into the final verdict. Pure; performs no I/O.
pub fn fuse(
    request: &CheckRequest,
    classifier: ClassifierResult,
    fact_check: FactCheckResult,
    similarity: SimilarityStage,
) -> Verdict {
    let show_general_warning = no_corroboration(&fact_check, &similarity);
    let high_confidence_unverified = show_general_warning
        && classifier.label() == Label::Real
        && classifier.probability() > HIGH_CONFIDENCE_THRESHOLD;

    Verdict {
        check_id: request.id,
        checked_at: request.received_at,
        text: request.text.clone(),
        prediction: prediction_text(&classifier),
        classifier,
        fact_check,
        similarity,
        high_confidence_unverified,
        show_general_warning,
    }
}

fn no_corroboration(fact_check: &FactCheckResult, similarity: &SimilarityStage) -> bool {
    !fact_check.is_found() && similarity.matched_article().is_none() && similarity.is_exhausted()
}

/// `Real News (Confidence: 95.0%)`
pub fn prediction_text(classifier: &ClassifierResult) -> String {
    format!(
        "{} (Confidence: {}%)",
        classifier.label().display_name(),
        format_percent(classifier.probability())
    )
}

/// Percentage rounded to two decimals (exact ties go to the even digit),
/// keeping at least one decimal place.
fn format_percent(probability: f64) -> String {
    let mut text = format!("{:.2}", probability * 100.0);
    if text.ends_with('0') {
        text.pop();
    }
    text
}
