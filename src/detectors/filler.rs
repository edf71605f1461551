//! Filler-phrase detection: fixed phrases that add no information. One flag
//! per matched phrase span, not per word.

use regex::Regex;

use crate::config::Config;
use crate::document::ProcessedParagraph;
use crate::error::DetectorError;
use crate::result::{Flag, FlagType, Severity};

use super::patterns::{word_regex, FILLER_PATTERNS};
use super::{make_flag, Detector};

pub struct FillerDetector;

impl Detector for FillerDetector {
    fn name(&self) -> &'static str {
        "filler"
    }

    fn flag_type(&self) -> FlagType {
        FlagType::Filler
    }

    fn detect(
        &self,
        paragraph: &ProcessedParagraph,
        config: &Config,
    ) -> Result<Vec<Flag>, DetectorError> {
        let custom: Vec<(String, Regex)> = config
            .additional_fillers
            .iter()
            .map(|p| (p.clone(), word_regex(p)))
            .collect();

        let mut flags = Vec::new();
        for (phrase, pattern) in FILLER_PATTERNS
            .iter()
            .map(|(p, re)| (*p, re))
            .chain(custom.iter().map(|(p, re)| (p.as_str(), re)))
        {
            for m in pattern.find_iter(&paragraph.analysis) {
                flags.push(make_flag(
                    paragraph,
                    FlagType::Filler,
                    (m.start(), m.end()),
                    Severity::Low,
                    "This phrase adds no specific information".to_string(),
                    suggestion_for(phrase),
                    config,
                )?);
            }
        }
        Ok(flags)
    }
}

fn suggestion_for(phrase: &str) -> String {
    match phrase.to_ascii_lowercase().as_str() {
        "in today's society" => "Remove or specify which society and time period",
        "in today's world" => "Remove or be specific about context",
        "throughout history" => "Specify the time period and region",
        "since the dawn of time" => "Remove - adds no information",
        "it is important to note that" => "Remove - just state the point",
        "it is worth noting that" => "Remove - just state the point",
        "it goes without saying" => "Remove - if it goes without saying, don't say it",
        "needless to say" => "Remove - if needless, don't say it",
        "it is clear that" => "Remove - if clear, just state the claim",
        "it is obvious that" => "Remove - state the claim directly",
        "as we all know" => "Remove or cite a source",
        "at the end of the day" => "Remove - use specific conclusion",
        "when all is said and done" => "Remove - be direct",
        "in terms of" => "Remove or rephrase more directly",
        "the fact that" => "Remove - just state the fact",
        "in order to" => "Replace with 'to'",
        _ => "Remove or replace with specific content",
    }
    .to_string()
}
