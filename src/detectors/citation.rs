//! Citation-needed detection: claim-shaped sentences (statistics,
//! superlatives, dated claims, unattributed "according to") with no
//! citation-shaped span in the sentence. At most one flag per sentence.

use crate::config::Config;
use crate::document::ProcessedParagraph;
use crate::error::DetectorError;
use crate::result::{Flag, FlagType, Severity};

use super::patterns::{ClaimKind, ACCORDING_TO, NEEDS_CITATION_PATTERNS};
use super::{citation_in_range, make_flag, Detector};

pub struct CitationDetector;

impl Detector for CitationDetector {
    fn name(&self) -> &'static str {
        "citation"
    }

    fn flag_type(&self) -> FlagType {
        FlagType::CitationNeeded
    }

    fn detect(
        &self,
        paragraph: &ProcessedParagraph,
        config: &Config,
    ) -> Result<Vec<Flag>, DetectorError> {
        let mut flags = Vec::new();

        for sentence in &paragraph.sentences {
            if citation_in_range(paragraph, sentence.local) {
                continue;
            }
            let text = paragraph.sentence_text(sentence);

            let claim = NEEDS_CITATION_PATTERNS
                .iter()
                .find_map(|(kind, re)| re.find(text).map(|m| (*kind, m.start(), m.end())))
                .or_else(|| unattributed_according_to(paragraph, sentence.local.0, text));

            let Some((kind, start, end)) = claim else {
                continue;
            };

            flags.push(make_flag(
                paragraph,
                FlagType::CitationNeeded,
                (sentence.local.0 + start, sentence.local.0 + end),
                severity_for(kind),
                message_for(kind),
                "Add a citation to support this claim".to_string(),
                config,
            )?);
        }

        Ok(flags)
    }
}

/// "according to" counts as a claim only when no capitalized source name
/// follows it; "according to Smith" is attribution, not evasion.
fn unattributed_according_to(
    paragraph: &ProcessedParagraph,
    sentence_start: usize,
    text: &str,
) -> Option<(ClaimKind, usize, usize)> {
    let m = ACCORDING_TO.find(text)?;
    let after = sentence_start + m.end();
    let named = paragraph
        .tokens
        .iter()
        .find(|t| t.local.0 >= after)
        .is_some_and(|t| t.text.chars().next().is_some_and(char::is_uppercase));
    if named {
        None
    } else {
        Some((ClaimKind::Attribution, m.start(), m.end()))
    }
}

fn severity_for(kind: ClaimKind) -> Severity {
    match kind {
        ClaimKind::Statistic => Severity::High,
        _ => Severity::Medium,
    }
}

fn message_for(kind: ClaimKind) -> String {
    match kind {
        ClaimKind::Statistic => "Specific statistic requires a source",
        ClaimKind::ResearchClaim => "'Studies show' without citation is a weasel pattern",
        ClaimKind::Superlative => "Superlative claim needs supporting evidence",
        ClaimKind::Dated => "Historical claim needs citation",
        ClaimKind::Attribution => "Attribution without specific source",
    }
    .to_string()
}
