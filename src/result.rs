//! Result structures: flags, per-paragraph results, and the document-level
//! summary. Everything here is plain serializable data; presentation and
//! transport belong to callers.

use serde::Serialize;

use crate::config::SeverityWeights;
use crate::span::Span;

/// The eight kinds of issue the detector set can raise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FlagType {
    #[serde(rename = "UNDERSPECIFIED")]
    Underspecified,
    #[serde(rename = "UNSUPPORTED_CAUSAL")]
    UnsupportedCausal,
    #[serde(rename = "CIRCULAR")]
    Circular,
    #[serde(rename = "WEASEL")]
    Weasel,
    #[serde(rename = "HEDGE_STACK")]
    HedgeStack,
    #[serde(rename = "JARGON_DENSE")]
    JargonDense,
    #[serde(rename = "CITATION_NEEDED")]
    CitationNeeded,
    #[serde(rename = "FILLER")]
    Filler,
}

impl FlagType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlagType::Underspecified => "UNDERSPECIFIED",
            FlagType::UnsupportedCausal => "UNSUPPORTED_CAUSAL",
            FlagType::Circular => "CIRCULAR",
            FlagType::Weasel => "WEASEL",
            FlagType::HedgeStack => "HEDGE_STACK",
            FlagType::JargonDense => "JARGON_DENSE",
            FlagType::CitationNeeded => "CITATION_NEEDED",
            FlagType::Filler => "FILLER",
        }
    }
}

impl std::fmt::Display for FlagType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    /// One step up, saturating at High. Used when a flag lands in a likely
    /// thesis sentence.
    pub fn escalated(self) -> Self {
        match self {
            Severity::Low => Severity::Medium,
            Severity::Medium => Severity::High,
            Severity::High => Severity::High,
        }
    }

    pub fn weight(&self, weights: &SeverityWeights) -> f64 {
        match self {
            Severity::Low => weights.low,
            Severity::Medium => weights.medium,
            Severity::High => weights.high,
        }
    }
}

/// One detected issue. `term` is always the exact original-text slice at
/// `span`, so resolving the span and slicing the source reproduces it.
#[derive(Debug, Clone, Serialize)]
pub struct Flag {
    #[serde(rename = "type")]
    pub flag_type: FlagType,
    pub term: String,
    pub span: Span,
    /// 1-indexed line of the span start in the original input.
    pub line: usize,
    /// 1-indexed column (in characters) of the span start.
    pub column: usize,
    pub severity: Severity,
    pub message: String,
    pub suggestion: String,
    /// Surrounding text for display, clipped to the owning paragraph.
    pub context: String,
}

/// Analysis result for one paragraph.
#[derive(Debug, Clone, Serialize)]
pub struct ParagraphResult {
    pub index: usize,
    pub text: String,
    pub span: Span,
    /// Bounded density score in [0, 1].
    pub density: f64,
    pub flags: Vec<Flag>,
    pub word_count: usize,
    pub sentence_count: usize,
    /// Set when annotation failed and the paragraph was skipped rather than
    /// failing the whole call.
    pub degraded: bool,
}

/// A detector failure recorded instead of silently dropping the error.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    pub paragraph_index: usize,
    pub detector: &'static str,
    pub message: String,
}

/// Aggregate statistics for the whole document.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub density: f64,
    pub density_grade: &'static str,
    pub flag_count: usize,
    pub word_count: usize,
    pub sentence_count: usize,
    pub paragraph_count: usize,
    /// Distinct content-word lemmas across the document.
    pub concept_count: usize,
    /// Filler flags per word.
    pub filler_ratio: f64,
    pub degraded_paragraph_count: usize,
    pub suggestion_count: usize,
}

/// Complete analysis result for one document. Identical input and
/// configuration always serialize to byte-identical JSON; run metadata that
/// would break that (timestamps, ids, timings) is deliberately absent.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    pub input_length: usize,
    pub summary: Summary,
    pub paragraphs: Vec<ParagraphResult>,
    pub overall_suggestions: Vec<String>,
    pub diagnostics: Vec<Diagnostic>,
}

impl AnalysisResult {
    pub fn density(&self) -> f64 {
        self.summary.density
    }

    /// All flags across all paragraphs, in paragraph order.
    pub fn flags(&self) -> impl Iterator<Item = &Flag> {
        self.paragraphs.iter().flat_map(|p| p.flags.iter())
    }
}
