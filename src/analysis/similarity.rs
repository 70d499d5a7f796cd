// src/analysis/similarity.rs
//! TF-IDF cosine similarity between a resume and a job description

use std::collections::HashMap;

/// Lowercase and drop everything except ASCII letters and whitespace.
pub fn preprocess(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphabetic() || c.is_whitespace())
        .collect()
}

/// Runs of two or more word characters.
pub fn tokenize(text: &str) -> Vec<&str> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|token| token.chars().count() >= 2)
        .collect()
}

/// Cosine similarity of the L2-normalised TF-IDF vectors of two documents.
///
/// The vocabulary and document frequencies are fitted on the pair itself,
/// with smoothed idf `ln((1 + n) / (1 + df)) + 1`. Returns 0 when either
/// document has no tokens.
pub fn tfidf_cosine(left: &str, right: &str) -> f64 {
    let documents = [term_counts(left), term_counts(right)];
    let n = documents.len() as f64;

    let mut document_frequency: HashMap<&str, usize> = HashMap::new();
    for counts in &documents {
        for term in counts.keys() {
            *document_frequency.entry(*term).or_insert(0) += 1;
        }
    }
    if document_frequency.is_empty() {
        return 0.0;
    }

    let idf: HashMap<&str, f64> = document_frequency
        .iter()
        .map(|(term, df)| (*term, ((1.0 + n) / (1.0 + *df as f64)).ln() + 1.0))
        .collect();

    let [left, right] = documents.map(|counts| weigh(&counts, &idf));
    left.iter()
        .filter_map(|(term, weight)| right.get(term).map(|other| weight * other))
        .sum()
}

/// Similarity expressed as a percentage rounded to two decimals.
pub fn match_percentage(resume: &str, job_description: &str) -> f64 {
    let similarity = tfidf_cosine(&preprocess(resume), &preprocess(job_description));
    (similarity * 100.0 * 100.0).round() / 100.0
}

fn term_counts(text: &str) -> HashMap<&str, f64> {
    let mut counts = HashMap::new();
    for token in tokenize(text) {
        *counts.entry(token).or_insert(0.0) += 1.0;
    }
    counts
}

fn weigh<'a>(counts: &HashMap<&'a str, f64>, idf: &HashMap<&str, f64>) -> HashMap<&'a str, f64> {
    let weights: HashMap<&str, f64> = counts
        .iter()
        .map(|(term, count)| (*term, count * idf.get(term).copied().unwrap_or(1.0)))
        .collect();

    let norm = weights.values().map(|w| w * w).sum::<f64>().sqrt();
    if norm == 0.0 {
        return weights;
    }
    weights.into_iter().map(|(term, w)| (term, w / norm)).collect()
}
