//! Hedge-stacking detection. Hedges are counted per clause; clause
//! boundaries come from the dependency layer (subordinating markers and
//! coordinators) plus semicolons and colons — never bare commas, which
//! would split nested appositives.

use crate::annotate::DepLabel;
use crate::config::Config;
use crate::document::{ProcessedParagraph, Sentence};
use crate::error::DetectorError;
use crate::result::{Flag, FlagType, Severity};

use super::patterns::HEDGE_PATTERNS;
use super::{make_flag, Detector};

pub struct HedgeDetector;

impl Detector for HedgeDetector {
    fn name(&self) -> &'static str {
        "hedge"
    }

    fn flag_type(&self) -> FlagType {
        FlagType::HedgeStack
    }

    fn detect(
        &self,
        paragraph: &ProcessedParagraph,
        config: &Config,
    ) -> Result<Vec<Flag>, DetectorError> {
        let mut flags = Vec::new();

        for sentence in &paragraph.sentences {
            for (first, last) in clause_token_ranges(paragraph, sentence) {
                let clause_local = (
                    paragraph.tokens[first].local.0,
                    paragraph.tokens[last - 1].local.1,
                );
                let clause_text = &paragraph.analysis[clause_local.0..clause_local.1];

                let hedge_count = count_hedges(clause_text);
                if hedge_count < config.hedge_threshold {
                    continue;
                }

                let confidence = 0.9_f64.powi(hedge_count as i32);
                let severity = if hedge_count < 5 {
                    Severity::Medium
                } else {
                    Severity::High
                };
                flags.push(make_flag(
                    paragraph,
                    FlagType::HedgeStack,
                    clause_local,
                    severity,
                    format!(
                        "{hedge_count} hedges in one clause reduces confidence to ~{:.0}%",
                        confidence * 100.0
                    ),
                    "Make a clear claim or acknowledge uncertainty cleanly".to_string(),
                    config,
                )?);
            }
        }

        Ok(flags)
    }
}

/// Token-index ranges (half-open, into the paragraph token vector) for each
/// clause of a sentence. A clause starts at a Mark or Cc token, or after a
/// semicolon or colon in the gap before a token.
fn clause_token_ranges(
    paragraph: &ProcessedParagraph,
    sentence: &Sentence,
) -> Vec<(usize, usize)> {
    let (first, last) = sentence.token_range;
    let mut ranges = Vec::new();
    let mut clause_start = first;

    for idx in first..last {
        let token = &paragraph.tokens[idx];
        let boundary = match token.dep {
            DepLabel::Mark | DepLabel::Cc => idx > clause_start,
            DepLabel::Other => {
                idx > first && {
                    let gap_start = paragraph.tokens[idx - 1].local.1;
                    paragraph.analysis[gap_start..token.local.0]
                        .bytes()
                        .any(|b| b == b';' || b == b':')
                }
            }
        };
        if boundary && idx > clause_start {
            ranges.push((clause_start, idx));
            clause_start = idx;
        }
    }
    if clause_start < last {
        ranges.push((clause_start, last));
    }
    ranges
}

/// Number of distinct hedge terms present in the clause.
fn count_hedges(clause_text: &str) -> usize {
    HEDGE_PATTERNS
        .iter()
        .filter(|(_, re)| re.is_match(clause_text))
        .count()
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{paragraph, run};
    use super::*;

    #[test]
    fn test_stacked_hedges_flagged_once_per_clause() {
        let flags = run(
            &HedgeDetector,
            "It could perhaps possibly maybe be argued that the policy helps.",
            &Config::default(),
        );
        assert_eq!(flags.len(), 1);
        assert!(flags[0].message.contains("4 hedges"));
        assert!(flags[0].message.contains("66%"));
    }

    #[test]
    fn test_below_threshold_not_flagged() {
        let flags = run(
            &HedgeDetector,
            "It might possibly be true.",
            &Config::default(),
        );
        assert!(flags.is_empty());
    }

    #[test]
    fn test_exactly_at_threshold_flagged() {
        let flags = run(
            &HedgeDetector,
            "It might possibly perhaps be true.",
            &Config::default(),
        );
        assert_eq!(flags.len(), 1);
        assert_eq!(flags[0].severity, Severity::Medium);
    }

    #[test]
    fn test_five_hedges_is_high_severity() {
        let flags = run(
            &HedgeDetector,
            "It may perhaps possibly probably arguably hold.",
            &Config::default(),
        );
        assert_eq!(flags.len(), 1);
        assert_eq!(flags[0].severity, Severity::High);
    }

    #[test]
    fn test_hedges_split_across_clauses_not_flagged() {
        // Two hedges before "because", two after: neither clause reaches 3.
        let flags = run(
            &HedgeDetector,
            "It may perhaps work because it could possibly scale.",
            &Config::default(),
        );
        assert!(flags.is_empty());
    }

    #[test]
    fn test_comma_does_not_split_clauses() {
        let para = paragraph("The result, a surprising outcome, may perhaps possibly hold.");
        let ranges = clause_token_ranges(&para, &para.sentences[0]);
        assert_eq!(ranges.len(), 1);
    }

    #[test]
    fn test_semicolon_splits_clauses() {
        let para = paragraph("The trial ended early; replication may perhaps possibly follow.");
        let ranges = clause_token_ranges(&para, &para.sentences[0]);
        assert_eq!(ranges.len(), 2);
    }

    #[test]
    fn test_custom_threshold() {
        let mut config = Config::default();
        config.hedge_threshold = 2;
        let flags = run(&HedgeDetector, "It might possibly be true.", &config);
        assert_eq!(flags.len(), 1);
    }
}
