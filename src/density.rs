//! Semantic density scoring: one bounded, deterministic number per
//! paragraph, combining lexical statistics with the flag penalty.

use std::collections::HashSet;

use crate::config::Config;
use crate::document::Token;
use crate::result::Flag;

/// Density of a token sequence in [0, 1].
///
/// Weighted sum of three components (weights configurable):
/// - content-word ratio: non-function tokens over all tokens;
/// - unique-concept ratio: distinct content-word lemmas over content words;
/// - precision: `1 - min(cap, Σ severity_weight / (tokens / 50))`.
///
/// Zero tokens always yields 0.0, never an error.
pub fn density(tokens: &[Token], flags: &[Flag], config: &Config) -> f64 {
    if tokens.is_empty() {
        return 0.0;
    }

    let content: Vec<&Token> = tokens.iter().filter(|t| !t.is_stop).collect();
    let content_ratio = content.len() as f64 / tokens.len() as f64;

    let unique_ratio = if content.is_empty() {
        0.0
    } else {
        let distinct: HashSet<&str> = content.iter().map(|t| t.lemma.as_str()).collect();
        distinct.len() as f64 / content.len() as f64
    };

    let precision = 1.0 - flag_penalty(flags, tokens.len(), config);

    let w = &config.density_weights;
    let score = w.content * content_ratio + w.unique * unique_ratio + w.precision * precision;
    score.clamp(0.0, 1.0)
}

/// Severity-weighted flag penalty, normalized per 50 tokens and capped.
fn flag_penalty(flags: &[Flag], token_count: usize, config: &Config) -> f64 {
    let total: f64 = flags
        .iter()
        .map(|f| f.severity.weight(&config.severity_weights))
        .sum();
    let normalized = total / (token_count as f64 / 50.0).max(1.0);
    normalized.min(config.penalty_cap)
}

/// Distinct content-word lemmas: the document-level concept count.
pub fn concept_count<'a>(tokens: impl Iterator<Item = &'a Token>) -> usize {
    tokens
        .filter(|t| !t.is_stop && t.pos.is_content())
        .map(|t| t.lemma.as_str())
        .collect::<HashSet<_>>()
        .len()
}
