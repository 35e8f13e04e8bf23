use crate::artifacts::FeatureVector;
use crate::pipeline::traits::FeatureTransform;
use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::OnceLock;

fn token_pattern() -> &'static Regex {
    static TOKEN: OnceLock<Regex> = OnceLock::new();
    TOKEN.get_or_init(|| Regex::new(r"\b\w\w+\b").expect("token pattern"))
}

fn default_lowercase() -> bool {
    true
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

/// Fitted TF-IDF vectorizer. Rows come out L2-normalised.
#[derive(Clone, Debug, Deserialize)]
pub struct TfIdfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    #[serde(default = "default_lowercase")]
    lowercase: bool,
    #[serde(default)]
    sublinear_tf: bool,
    #[serde(default = "default_ngram_range")]
    ngram_range: (usize, usize),
}

impl TfIdfVectorizer {
    pub fn new(vocabulary: HashMap<String, usize>, idf: Vec<f64>) -> Self {
        Self {
            vocabulary,
            idf,
            lowercase: true,
            sublinear_tf: false,
            ngram_range: default_ngram_range(),
        }
    }

    pub fn with_sublinear_tf(mut self, sublinear: bool) -> Self {
        self.sublinear_tf = sublinear;
        self
    }

    pub fn with_ngram_range(mut self, min: usize, max: usize) -> Self {
        self.ngram_range = (min, max);
        self
    }

    pub fn vocabulary_size(&self) -> usize {
        self.idf.len()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.vocabulary.len() != self.idf.len() {
            return Err(format!(
                "vocabulary has {} terms but idf has {} weights",
                self.vocabulary.len(),
                self.idf.len()
            ));
        }
        if let Some((term, col)) = self.vocabulary.iter().find(|(_, col)| **col >= self.idf.len()) {
            return Err(format!("term {term:?} maps to column {col} outside idf range"));
        }
        if self.idf.iter().any(|w| !w.is_finite()) {
            return Err("idf contains non-finite weights".to_string());
        }
        let (min, max) = self.ngram_range;
        if min == 0 || min > max {
            return Err(format!("invalid ngram range ({min}, {max})"));
        }
        Ok(())
    }

    fn terms(&self, text: &str) -> Vec<String> {
        let text = if self.lowercase {
            text.to_lowercase()
        } else {
            text.to_string()
        };
        let tokens: Vec<&str> = token_pattern().find_iter(&text).map(|m| m.as_str()).collect();
        let (min, max) = self.ngram_range;
        let mut terms = Vec::new();
        for n in min.max(1)..=max {
            if n == 1 {
                terms.extend(tokens.iter().map(|t| t.to_string()));
            } else {
                terms.extend(tokens.windows(n).map(|w| w.join(" ")));
            }
        }
        terms
    }

    fn vectorize(&self, text: &str) -> FeatureVector {
        let mut counts: HashMap<usize, f64> = HashMap::new();
        for term in self.terms(text) {
            if let Some(&col) = self.vocabulary.get(&term) {
                *counts.entry(col).or_default() += 1.0;
            }
        }
        let entries = counts
            .into_iter()
            .map(|(col, count)| {
                let tf = if self.sublinear_tf { 1.0 + count.ln() } else { count };
                (col, tf * self.idf[col])
            })
            .collect();
        FeatureVector::from_entries(entries).normalized()
    }
}

impl FeatureTransform for TfIdfVectorizer {
    fn transform(&self, texts: &[&str]) -> Vec<FeatureVector> {
        texts.iter().map(|t| self.vectorize(t)).collect()
    }
}
