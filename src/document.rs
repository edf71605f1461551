//! The processed document model: immutable, per-call, never cached.
//!
//! Paragraphs carry two coordinate systems. `local` offsets index the
//! paragraph's analysis text (normalized, markup blanked) that detectors
//! regex against; `span`s index the original input. [`ProcessedParagraph`]
//! converts between them so every flag lands on original-text coordinates.

use std::sync::Arc;

use crate::annotate::{DepLabel, PosTag};
use crate::position::PositionResolver;
use crate::span::Span;

/// One word token. Produced once during annotation alignment; immutable.
#[derive(Debug, Clone)]
pub struct Token {
    pub text: String,
    pub lemma: String,
    pub pos: PosTag,
    pub dep: DepLabel,
    pub is_stop: bool,
    /// Position in the original input.
    pub span: Span,
    /// Half-open byte range in the paragraph's analysis text.
    pub local: (usize, usize),
}

/// One sentence: a local range plus the indices of its tokens.
#[derive(Debug, Clone)]
pub struct Sentence {
    pub span: Span,
    pub local: (usize, usize),
    /// Half-open index range into the paragraph's token vector.
    pub token_range: (usize, usize),
}

/// Mapping from paragraph-local analysis offsets to original offsets.
#[derive(Debug, Clone)]
pub enum ParaOffsets {
    /// Original offset = local offset + base. Holds whenever the input
    /// needed no line-ending folding inside this paragraph.
    Identity { base: usize },
    /// Explicit per-byte mapping (one extra entry for the end offset).
    Map(Arc<Vec<usize>>),
}

impl ParaOffsets {
    pub fn original_of(&self, local: usize) -> usize {
        match self {
            ParaOffsets::Identity { base } => base + local,
            ParaOffsets::Map(map) => map[local],
        }
    }

    /// Convert a local half-open range to an original-text span.
    pub fn span_of(&self, start: usize, end: usize) -> Span {
        Span::new(self.original_of(start), self.original_of(end))
    }
}

/// A fully annotated paragraph, ready for detection.
#[derive(Debug, Clone)]
pub struct ProcessedParagraph {
    pub index: usize,
    /// Position of the paragraph in the original input.
    pub span: Span,
    /// Raw slice of the original input at `span`.
    pub text: String,
    /// Normalized paragraph text with skip regions blanked; what detectors
    /// match against. Same length as the normalized paragraph slice.
    pub analysis: String,
    pub offsets: ParaOffsets,
    pub sentences: Vec<Sentence>,
    pub tokens: Vec<Token>,
    /// Citation-command regions (local ranges) blanked out of the analysis
    /// text but still visible to citation-proximity checks.
    pub citation_regions: Vec<(usize, usize)>,
    /// Title of the closest preceding section header, if any.
    pub section: Option<String>,
    /// Shared resolver over the original input for line/column and context.
    pub resolver: Arc<PositionResolver>,
}

impl ProcessedParagraph {
    pub fn word_count(&self) -> usize {
        self.tokens.len()
    }

    pub fn sentence_count(&self) -> usize {
        self.sentences.len()
    }

    /// Tokens belonging to one sentence.
    pub fn sentence_tokens(&self, sentence: &Sentence) -> &[Token] {
        &self.tokens[sentence.token_range.0..sentence.token_range.1]
    }

    /// The analysis-text slice for one sentence.
    pub fn sentence_text(&self, sentence: &Sentence) -> &str {
        &self.analysis[sentence.local.0..sentence.local.1]
    }
}

/// The whole document: ordered paragraphs plus the shared resolver.
#[derive(Debug)]
pub struct ProcessedDocument {
    pub paragraphs: Vec<ProcessedParagraph>,
    pub resolver: Arc<PositionResolver>,
    pub input_length: usize,
}
