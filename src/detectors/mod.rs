//! The detector framework: one capability trait, a fixed ordered detector
//! list, and shared helpers for flag construction and citation proximity.
//!
//! Detectors are pure functions over an immutable paragraph; none reads
//! another's output in the same run. Dispatch is an explicit ordered list,
//! not an open registry, so flag ordering is stable by construction.

pub mod patterns;

pub mod causal;
pub mod circular;
pub mod citation;
pub mod filler;
pub mod hedge;
pub mod jargon;
pub mod vagueness;
pub mod weasel;

use crate::config::Config;
use crate::document::ProcessedParagraph;
use crate::error::DetectorError;
use crate::result::{Flag, FlagType, Severity};

/// Common contract for the eight analyses.
pub trait Detector: Send + Sync {
    fn name(&self) -> &'static str;
    fn flag_type(&self) -> FlagType;
    fn detect(
        &self,
        paragraph: &ProcessedParagraph,
        config: &Config,
    ) -> Result<Vec<Flag>, DetectorError>;
}

/// The declared detector order. Flag ordering follows this list, then span
/// start, regardless of how detection is scheduled.
pub fn default_detectors() -> Vec<Box<dyn Detector>> {
    vec![
        Box::new(vagueness::VaguenessDetector),
        Box::new(causal::CausalDetector),
        Box::new(circular::CircularDetector),
        Box::new(weasel::WeaselDetector),
        Box::new(hedge::HedgeDetector),
        Box::new(jargon::JargonDetector),
        Box::new(citation::CitationDetector),
        Box::new(filler::FillerDetector),
    ]
}

/// Construct a flag from a paragraph-local range, enforcing the span
/// invariants: non-zero width, inside the paragraph, inside the input. The
/// flagged term is always the exact original-text slice at the span.
pub(crate) fn make_flag(
    paragraph: &ProcessedParagraph,
    flag_type: FlagType,
    local: (usize, usize),
    severity: Severity,
    message: String,
    suggestion: String,
    config: &Config,
) -> Result<Flag, DetectorError> {
    let (ls, le) = local;
    if ls >= le || le > paragraph.analysis.len() {
        return Err(DetectorError(format!(
            "invalid flag range {ls}..{le} in paragraph {}",
            paragraph.index
        )));
    }
    let span = paragraph.offsets.span_of(ls, le);
    if !paragraph.span.contains(&span) {
        return Err(DetectorError(format!(
            "flag span {}..{} outside paragraph span {}..{}",
            span.start, span.end, paragraph.span.start, paragraph.span.end
        )));
    }
    let resolver = &paragraph.resolver;
    let term = span.slice(resolver.original()).to_string();
    let (line, column) = resolver.resolve(&span);
    let context = resolver.context(&span, &paragraph.span, config.context_window);
    Ok(Flag {
        flag_type,
        term,
        span,
        line,
        column,
        severity,
        message,
        suggestion,
        context,
    })
}

/// Citation-proximity lookup shared by the causal, weasel, and citation
/// detectors so their "is this supported?" semantics stay consistent.
///
/// A citation-shaped span is an author-year or bracketed-numeric pattern in
/// the analysis text, or a blanked citation-command region.
pub(crate) fn citation_in_range(paragraph: &ProcessedParagraph, range: (usize, usize)) -> bool {
    let (start, end) = range;
    if start >= end {
        return false;
    }
    let slice = &paragraph.analysis[start..end];
    if patterns::CITATION_PATTERNS.iter().any(|re| re.is_match(slice)) {
        return true;
    }
    paragraph
        .citation_regions
        .iter()
        .any(|&(cs, ce)| cs < end && start < ce)
}

/// Citation-shaped span anywhere in the sentence holding this local range.
pub(crate) fn citation_in_sentence(paragraph: &ProcessedParagraph, local: usize) -> bool {
    paragraph
        .sentences
        .iter()
        .find(|s| s.local.0 <= local && local < s.local.1)
        .is_some_and(|s| citation_in_range(paragraph, s.local))
}

/// Citation-shaped span within the next `window` tokens after `from_local`,
/// which may reach past the sentence end.
pub(crate) fn citation_within_tokens(
    paragraph: &ProcessedParagraph,
    from_local: usize,
    window: usize,
) -> bool {
    let end = paragraph
        .tokens
        .iter()
        .filter(|t| t.local.0 >= from_local)
        .nth(window.saturating_sub(1))
        .map_or(paragraph.analysis.len(), |t| t.local.1);
    citation_in_range(paragraph, (from_local, end.min(paragraph.analysis.len())))
}
