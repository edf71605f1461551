use serde::Serialize;

/// Half-open byte range into the original input text.
///
/// Spans are the sole addressing mechanism shared across components: every
/// token, sentence, paragraph, and flag locates itself with one. Offsets
/// always fall on UTF-8 character boundaries of the original (un-normalized)
/// input, so `&original[span.start..span.end]` is always valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    /// Create a span. Zero-width spans are invalid everywhere in the
    /// pipeline, so construction rejects them outright.
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start < end, "zero-width span {start}..{end}");
        Self { start, end }
    }

    /// Checked constructor used at flag-construction boundaries.
    pub fn try_new(start: usize, end: usize, text_len: usize) -> Option<Self> {
        if start < end && end <= text_len {
            Some(Self { start, end })
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether `other` lies entirely within this span.
    pub fn contains(&self, other: &Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Slice the original text this span indexes into.
    pub fn slice<'a>(&self, text: &'a str) -> &'a str {
        &text[self.start..self.end]
    }
}
