//! Vagueness detection: curated vague terms whose referent or scope the
//! sentence never pins down. Severity escalates one step in the paragraph's
//! first sentence, the likely thesis position.

use crate::config::Config;
use crate::document::ProcessedParagraph;
use crate::error::DetectorError;
use crate::result::{Flag, FlagType, Severity};

use super::patterns::VAGUE_TERM_SET;
use super::{make_flag, Detector};

pub struct VaguenessDetector;

impl Detector for VaguenessDetector {
    fn name(&self) -> &'static str {
        "vagueness"
    }

    fn flag_type(&self) -> FlagType {
        FlagType::Underspecified
    }

    fn detect(
        &self,
        paragraph: &ProcessedParagraph,
        config: &Config,
    ) -> Result<Vec<Flag>, DetectorError> {
        let mut flags = Vec::new();

        for (sentence_index, sentence) in paragraph.sentences.iter().enumerate() {
            for token in paragraph.sentence_tokens(sentence) {
                let lower = token.text.to_ascii_lowercase();
                if !VAGUE_TERM_SET.contains(lower.as_str()) {
                    continue;
                }
                if config.is_domain_term(&lower) {
                    continue;
                }

                let mut severity = term_severity(&lower);
                if sentence_index == 0 {
                    severity = severity.escalated();
                }

                flags.push(make_flag(
                    paragraph,
                    FlagType::Underspecified,
                    token.local,
                    severity,
                    term_message(&lower),
                    term_suggestion(&lower),
                    config,
                )?);
            }
        }

        Ok(flags)
    }
}

fn term_severity(term: &str) -> Severity {
    match term {
        "things" | "stuff" | "society" | "impact" | "significant" => Severity::High,
        "very" | "really" | "quite" | "rather" => Severity::Low,
        _ => Severity::Medium,
    }
}

fn term_message(term: &str) -> String {
    match term {
        "society" => "Which society? Western? American? Global?".to_string(),
        "things" => "What things specifically?".to_string(),
        "stuff" => "What specifically?".to_string(),
        "significant" => "Significant by what measure?".to_string(),
        "impact" => "What kind of impact? Measured how?".to_string(),
        "important" => "Important to whom? Why?".to_string(),
        "interesting" => "Interesting in what way?".to_string(),
        "recently" => "When exactly?".to_string(),
        "often" => "How often? With what frequency?".to_string(),
        "sometimes" => "Under what conditions?".to_string(),
        "many" => "How many? What proportion?".to_string(),
        "some" => "Which ones specifically?".to_string(),
        "most" => "What percentage? Based on what data?".to_string(),
        _ => format!("'{term}' lacks clear referent or scope"),
    }
}

fn term_suggestion(term: &str) -> String {
    match term {
        "society" => "Specify which society and demographic".to_string(),
        "things" => "Name the specific items or concepts".to_string(),
        "stuff" => "Be specific about what you're referring to".to_string(),
        "significant" => "Quantify the significance or define the measure".to_string(),
        "impact" => "Specify the type and magnitude of impact".to_string(),
        "important" => "Explain the importance with specific reasons".to_string(),
        "interesting" => "Explain what makes it notable".to_string(),
        "recently" => "Provide a specific time frame".to_string(),
        "often" => "Provide frequency or proportion".to_string(),
        "sometimes" => "Specify the conditions or frequency".to_string(),
        "many" => "Provide a number or percentage".to_string(),
        "some" => "Identify which ones specifically".to_string(),
        "most" => "Cite the data or provide a percentage".to_string(),
        _ => format!("Specify what '{term}' refers to"),
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::run;
    use super::*;

    #[test]
    fn test_flags_vague_terms() {
        let flags = run(
            &VaguenessDetector,
            "The study found many interesting things.",
            &Config::default(),
        );
        let terms: Vec<&str> = flags.iter().map(|f| f.term.as_str()).collect();
        assert!(terms.contains(&"many"));
        assert!(terms.contains(&"interesting"));
        assert!(terms.contains(&"things"));
    }

    #[test]
    fn test_first_sentence_escalates() {
        let flags = run(
            &VaguenessDetector,
            "Technology has a significant impact. The effect size was 0.4.",
            &Config::default(),
        );
        let sig = flags.iter().find(|f| f.term == "significant").unwrap();
        // High escalated stays High
        assert_eq!(sig.severity, Severity::High);

        let flags = run(
            &VaguenessDetector,
            "The effect size was measured. Technology is interesting.",
            &Config::default(),
        );
        let interesting = flags.iter().find(|f| f.term == "interesting").unwrap();
        // Medium, not escalated: second sentence
        assert_eq!(interesting.severity, Severity::Medium);
    }

    #[test]
    fn test_domain_terms_exempt() {
        let mut config = Config::default();
        config.domain_terms.push("impact".to_string());
        let flags = run(
            &VaguenessDetector,
            "We measured the crater impact precisely.",
            &config,
        );
        assert!(flags.iter().all(|f| f.term != "impact"));
    }

    #[test]
    fn test_word_boundary_not_substring() {
        // "mostly" must not match "most"
        let flags = run(
            &VaguenessDetector,
            "The effect was mostly absent from trials.",
            &Config::default(),
        );
        assert!(flags.is_empty());
    }
}
