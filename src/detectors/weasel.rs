//! Weasel-word detection: vague attribution templates ("some experts
//! believe", passive "it is believed that", unattributed "studies show")
//! with no citation-shaped span in the same sentence.

use regex::Regex;

use crate::config::Config;
use crate::document::ProcessedParagraph;
use crate::error::DetectorError;
use crate::result::{Flag, FlagType, Severity};

use super::patterns::{word_regex, WEASEL_PATTERNS};
use super::{citation_in_sentence, make_flag, Detector};

pub struct WeaselDetector;

impl Detector for WeaselDetector {
    fn name(&self) -> &'static str {
        "weasel"
    }

    fn flag_type(&self) -> FlagType {
        FlagType::Weasel
    }

    fn detect(
        &self,
        paragraph: &ProcessedParagraph,
        config: &Config,
    ) -> Result<Vec<Flag>, DetectorError> {
        let custom: Vec<Regex> = config
            .additional_weasels
            .iter()
            .map(|w| word_regex(w))
            .collect();

        let mut flags = Vec::new();
        for sentence in &paragraph.sentences {
            let text = paragraph.sentence_text(sentence);
            for pattern in WEASEL_PATTERNS.iter().chain(custom.iter()) {
                for m in pattern.find_iter(text) {
                    let start = sentence.local.0 + m.start();
                    let end = sentence.local.0 + m.end();

                    if citation_in_sentence(paragraph, start) {
                        continue;
                    }

                    flags.push(make_flag(
                        paragraph,
                        FlagType::Weasel,
                        (start, end),
                        Severity::Medium,
                        "Vague attribution that avoids accountability".to_string(),
                        suggestion_for(m.as_str()),
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
    if lower.contains("research") || lower.contains("studies") || lower.contains("evidence") {
        "Cite the specific research or studies".to_string()
    } else if lower.starts_with("it is") || lower.starts_with("it has") {
        "State who believes this and cite the source".to_string()
    } else if lower.contains("according to") {
        "Name the specific source".to_string()
    } else if lower.contains("some") || lower.contains("many") || lower.contains("most") {
        "Name specific sources or cite references".to_string()
    } else {
        "Provide specific attribution with citations".to_string()
    }
}
