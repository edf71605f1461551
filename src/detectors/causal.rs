//! Unsupported-causal-claim detection. A causal verb or phrase is fine when
//! a citation-shaped span backs it in the same sentence or within a short
//! token window; otherwise the claim is missing its mechanism or evidence.

use crate::config::Config;
use crate::document::ProcessedParagraph;
use crate::error::DetectorError;
use crate::result::{Flag, FlagType, Severity};

use super::patterns::CAUSAL_PATTERNS;
use super::{citation_in_sentence, citation_within_tokens, make_flag, Detector};

/// Tokens after the causal phrase inside which a citation still counts.
const CITATION_TOKEN_WINDOW: usize = 15;

pub struct CausalDetector;

impl Detector for CausalDetector {
    fn name(&self) -> &'static str {
        "causal"
    }

    fn flag_type(&self) -> FlagType {
        FlagType::UnsupportedCausal
    }

    fn detect(
        &self,
        paragraph: &ProcessedParagraph,
        config: &Config,
    ) -> Result<Vec<Flag>, DetectorError> {
        let mut flags = Vec::new();

        for sentence in &paragraph.sentences {
            let text = paragraph.sentence_text(sentence);
            for pattern in CAUSAL_PATTERNS.iter() {
                for m in pattern.find_iter(text) {
                    let start = sentence.local.0 + m.start();
                    let end = sentence.local.0 + m.end();

                    if citation_in_sentence(paragraph, start)
                        || citation_within_tokens(paragraph, end, CITATION_TOKEN_WINDOW)
                    {
                        continue;
                    }

                    let term = m.as_str();
                    flags.push(make_flag(
                        paragraph,
                        FlagType::UnsupportedCausal,
                        (start, end),
                        Severity::Medium,
                        "Causal claim without cited evidence or mechanism".to_string(),
                        suggestion_for(term),
                        config,
                    )?);
                }
            }
        }

        Ok(flags)
    }
}

fn suggestion_for(term: &str) -> String {
    let lower = term.to_ascii_lowercase();
    if lower.contains("cause") || lower.contains("caus") {
        "Consider 'correlates with' or 'is associated with', or cite evidence".to_string()
    } else if lower.contains("lead") || lower.contains("led") {
        "Consider 'is followed by' or 'precedes', or cite evidence".to_string()
    } else if lower.contains("result") {
        "Consider 'is associated with' or specify the mechanism".to_string()
    } else if lower.contains("due to") || lower.contains("because of") {
        "Consider 'associated with' or cite evidence for causation".to_string()
    } else {
        "Use correlational language unless causation is established".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::run;
    use super::*;

    #[test]
    fn test_uncited_causal_claim_flagged_once() {
        let flags = run(
            &CausalDetector,
            "Social media causes depression in teenagers.",
            &Config::default(),
        );
        assert_eq!(flags.len(), 1);
        assert_eq!(flags[0].term, "causes");
        assert_eq!(flags[0].flag_type, FlagType::UnsupportedCausal);
    }

    #[test]
    fn test_cited_causal_claim_suppressed() {
        let flags = run(
            &CausalDetector,
            "Social media causes depression in teenagers (Smith, 2023).",
            &Config::default(),
        );
        assert!(flags.is_empty());
    }

    #[test]
    fn test_citation_command_suppresses() {
        let flags = run(
            &CausalDetector,
            "Deforestation leads to soil erosion \\cite{brown2019}.",
            &Config::default(),
        );
        assert!(flags.is_empty());
    }

    #[test]
    fn test_multiple_uncited_claims() {
        let flags = run(
            &CausalDetector,
            "Smoking causes cancer. Stress leads to illness.",
            &Config::default(),
        );
        assert_eq!(flags.len(), 2);
    }

    #[test]
    fn test_causeway_not_matched() {
        let flags = run(
            &CausalDetector,
            "The causeway stretched for three miles.",
            &Config::default(),
        );
        assert!(flags.is_empty());
    }
}
