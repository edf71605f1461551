//! Circular-definition detection. For sentences shaped like a definition,
//! flag the defined term when its lemma recurs in its own definition. The
//! comparison goes through the annotation layer's lemma kinship helper, not
//! a surface-form stemmer.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::annotate::lemmas_share_root;
use crate::config::Config;
use crate::document::ProcessedParagraph;
use crate::error::DetectorError;
use crate::result::{Flag, FlagType, Severity};

use super::{make_flag, Detector};

/// Definition templates. Group 1 captures the defined term, group 2 the
/// definition body. More specific templates come first so "is defined as"
/// does not fall through to the bare copula.
static DEFINITION_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)^(?:we\s+)?(?:can\s+)?define\s+([a-z][a-z-]*)\s+as\s+(?:a\s+|an\s+|the\s+)?(.+)$",
        r"(?i)^([a-z][a-z-]*)\s+(?:is|are)\s+defined\s+as\s+(?:a\s+|an\s+|the\s+)?(.+)$",
        r"(?i)^by\s+([a-z][a-z-]*)\s+(?:we|i)\s+mean\s+(?:a\s+|an\s+|the\s+)?(.+)$",
        r"(?i)^the\s+definition\s+of\s+([a-z][a-z-]*)\s+is\s+(?:a\s+|an\s+|the\s+)?(.+)$",
        r"(?i)^([a-z][a-z-]*)\s+(?:is|are)\s+(?:understood|characterized)\s+(?:as|by|to\s+be)\s+(?:a\s+|an\s+|the\s+)?(.+)$",
        r"(?i)^(?:the\s+)?([a-z][a-z-]*)\s+(?:is|are|means?|refers?\s+to|denotes?)\s+(?:a\s+|an\s+|the\s+)?(.+)$",
        r"(?i)^([a-z][a-z-]*)\s*:\s+(?:a\s+|an\s+|the\s+)?(.+)$",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

pub struct CircularDetector;

impl Detector for CircularDetector {
    fn name(&self) -> &'static str {
        "circular"
    }

    fn flag_type(&self) -> FlagType {
        FlagType::Circular
    }

    fn detect(
        &self,
        paragraph: &ProcessedParagraph,
        config: &Config,
    ) -> Result<Vec<Flag>, DetectorError> {
        let mut flags = Vec::new();

        for sentence in &paragraph.sentences {
            let text = paragraph.sentence_text(sentence);
            let Some((term_range, def_start)) = match_definition(text) else {
                continue;
            };

            let term_local = (
                sentence.local.0 + term_range.0,
                sentence.local.0 + term_range.1,
            );
            let def_local = sentence.local.0 + def_start;

            let tokens = paragraph.sentence_tokens(sentence);
            let Some(term_token) = tokens
                .iter()
                .find(|t| t.local.0 == term_local.0 && t.local.1 == term_local.1)
            else {
                continue;
            };

            let circular = tokens
                .iter()
                .filter(|t| t.local.0 >= def_local && !t.is_stop)
                .any(|t| lemmas_share_root(&term_token.lemma, &t.lemma));

            if circular {
                flags.push(make_flag(
                    paragraph,
                    FlagType::Circular,
                    term_token.local,
                    Severity::High,
                    format!("'{}' is defined using a form of itself", term_token.text),
                    "Define in terms of specific properties or examples".to_string(),
                    config,
                )?);
            }
        }

        Ok(flags)
    }
}

/// First matching definition template: the term's byte range within the
/// sentence and the definition's start offset.
fn match_definition(sentence_text: &str) -> Option<((usize, usize), usize)> {
    for pattern in DEFINITION_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(sentence_text) {
            let term = caps.get(1)?;
            let def = caps.get(2)?;
            return Some(((term.start(), term.end()), def.start()));
        }
    }
    None
}
