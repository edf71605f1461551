//! Jargon-density detection: sentences whose ratio of domain-unlisted
//! technical tokens exceeds the level's threshold without a nearby
//! definitional pattern.

use crate::annotate::FUNCTION_WORDS;
use crate::config::Config;
use crate::document::ProcessedParagraph;
use crate::error::DetectorError;
use crate::result::{Flag, FlagType, Severity};

use super::patterns::{COMMON_WORDS, EXPLANATION_PATTERNS};
use super::{make_flag, Detector};

/// Below this many jargon tokens a sentence is never flagged, whatever the
/// ratio says.
const MIN_JARGON_TOKENS: usize = 3;

pub struct JargonDetector;

impl Detector for JargonDetector {
    fn name(&self) -> &'static str {
        "jargon"
    }

    fn flag_type(&self) -> FlagType {
        FlagType::JargonDense
    }

    fn detect(
        &self,
        paragraph: &ProcessedParagraph,
        config: &Config,
    ) -> Result<Vec<Flag>, DetectorError> {
        let threshold = config.level.jargon_threshold();
        let mut flags = Vec::new();

        for sentence in &paragraph.sentences {
            let tokens = paragraph.sentence_tokens(sentence);
            if tokens.is_empty() {
                continue;
            }

            let jargon: Vec<&str> = tokens
                .iter()
                .map(|t| t.text.as_str())
                .filter(|w| is_jargon(w, config))
                .collect();

            let ratio = jargon.len() as f64 / tokens.len() as f64;
            if ratio <= threshold || jargon.len() < MIN_JARGON_TOKENS {
                continue;
            }

            let text = paragraph.sentence_text(sentence);
            let explanations = count_explanations(text);
            // At least half the terms explained exempts the sentence.
            if explanations * 2 >= jargon.len() {
                continue;
            }

            flags.push(make_flag(
                paragraph,
                FlagType::JargonDense,
                sentence.local,
                Severity::Medium,
                format!(
                    "{} technical terms, {} explanations",
                    jargon.len(),
                    explanations
                ),
                "Define technical terms or specify intended audience".to_string(),
                config,
            )?);
        }

        Ok(flags)
    }
}

fn is_jargon(word: &str, config: &Config) -> bool {
    if word.len() < 5 {
        return false;
    }
    let lower = word.to_ascii_lowercase();
    if FUNCTION_WORDS.contains(lower.as_str())
        || COMMON_WORDS.contains(lower.as_str())
        || config.is_domain_term(&lower)
    {
        return false;
    }
    let complex_suffix = ["ology", "ization", "ological", "istic", "ential"]
        .iter()
        .any(|s| lower.ends_with(s));
    complex_suffix || word.len() >= 8
}

fn count_explanations(text: &str) -> usize {
    EXPLANATION_PATTERNS
        .iter()
        .map(|re| re.find_iter(text).count())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::super::test_support::run;
    use super::*;
    use crate::config::Level;

    const DENSE: &str =
        "Heteroskedasticity invalidates homoscedastic parametrization in autoregressive cointegration.";

    #[test]
    fn test_dense_unexplained_sentence_flagged() {
        let flags = run(&JargonDetector, DENSE, &Config::default());
        assert_eq!(flags.len(), 1);
        assert_eq!(flags[0].flag_type, FlagType::JargonDense);
    }

    #[test]
    fn test_domain_terms_exempt() {
        let mut config = Config::default();
        for term in [
            "heteroskedasticity",
            "homoscedastic",
            "parametrization",
            "autoregressive",
            "cointegration",
        ] {
            config.domain_terms.push(term.to_string());
        }
        let flags = run(&JargonDetector, DENSE, &config);
        assert!(flags.is_empty());
    }

    #[test]
    fn test_plain_sentence_not_flagged() {
        let flags = run(
            &JargonDetector,
            "The committee met on Tuesday to review the budget.",
            &Config::default(),
        );
        assert!(flags.is_empty());
    }

    #[test]
    fn test_explained_jargon_exempt() {
        let text = "Heteroskedasticity (unequal error variance) and cointegration (shared trends) matter here.";
        let flags = run(&JargonDetector, text, &Config::default());
        assert!(flags.is_empty());
    }

    #[test]
    fn test_relaxed_level_tolerates_more() {
        let text = "The heteroskedasticity correction uses autoregressive cointegration analysis with standard controls.";
        let strict_flags = run(&JargonDetector, text, &Config::with_level(Level::Academic));
        let relaxed_flags = run(&JargonDetector, text, &Config::with_level(Level::Relaxed));
        assert!(strict_flags.len() >= relaxed_flags.len());
    }
}
