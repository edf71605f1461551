//! Document segmentation: normalization, paragraph and sentence boundaries,
//! and word tokenization, all with spans that point back into the ORIGINAL
//! input. Runs before annotation; the annotation adapter turns the output
//! into [`crate::document::ProcessedParagraph`]s.

pub mod abbreviations;
pub mod normalization;
pub mod skip_regions;

use std::sync::Arc;
use tracing::debug;
use unicode_segmentation::UnicodeSegmentation;

use crate::document::ParaOffsets;
use crate::position::PositionResolver;
use crate::span::Span;
use abbreviations::AbbreviationChecker;
use normalization::NormalizedText;
use skip_regions::SkipKind;

/// Pre-annotation paragraph: all ranges are byte offsets local to
/// `analysis`, except `span`, which indexes the original input.
#[derive(Debug)]
pub struct SegmentedParagraph {
    pub index: usize,
    pub span: Span,
    /// Paragraph slice of the blanked analysis text.
    pub analysis: String,
    pub offsets: ParaOffsets,
    /// Trimmed sentence ranges, sorted, non-overlapping.
    pub sentences: Vec<(usize, usize)>,
    /// Word-token ranges, sorted, non-overlapping, each inside a sentence.
    pub tokens: Vec<(usize, usize)>,
    /// Citation-command regions that were blanked but remain visible to
    /// citation-proximity checks.
    pub citation_regions: Vec<(usize, usize)>,
    pub section: Option<String>,
}

#[derive(Debug)]
pub struct SegmentedDocument {
    pub paragraphs: Vec<SegmentedParagraph>,
    pub resolver: Arc<PositionResolver>,
    pub input_length: usize,
}

/// Splits text into paragraphs, sentences, and word tokens.
#[derive(Debug, Default)]
pub struct Segmenter {
    abbrev: AbbreviationChecker,
}

impl Segmenter {
    pub fn new() -> Self {
        Self {
            abbrev: AbbreviationChecker::new(),
        }
    }

    pub fn segment(&self, original: &str) -> SegmentedDocument {
        let norm = NormalizedText::new(original);
        let skip = skip_regions::scan(&norm.text);
        let resolver = Arc::new(PositionResolver::new(original));

        let para_ranges = split_paragraphs(&norm.text);
        debug!(
            paragraphs = para_ranges.len(),
            skip_regions = skip.regions.len(),
            "segmentation boundaries computed"
        );

        let mut paragraphs = Vec::with_capacity(para_ranges.len());
        for (index, &(pstart, pend)) in para_ranges.iter().enumerate() {
            let analysis = skip.analysis_text[pstart..pend].to_string();
            let offsets = build_offsets(&norm, pstart, pend);
            let span = Span::new(norm.to_original(pstart), norm.to_original(pend));

            let sentences = split_sentences(&analysis, &self.abbrev);
            let tokens = tokenize(&analysis);

            let citation_regions = skip
                .regions
                .iter()
                .filter(|r| r.kind == SkipKind::CitationCommand)
                .filter(|r| r.start >= pstart && r.end <= pend)
                .map(|r| (r.start - pstart, r.end - pstart))
                .collect();

            let section = skip
                .sections
                .iter()
                .rev()
                .find(|(offset, _)| *offset <= pstart)
                .map(|(_, title)| title.clone());

            paragraphs.push(SegmentedParagraph {
                index,
                span,
                analysis,
                offsets,
                sentences,
                tokens,
                citation_regions,
                section,
            });
        }

        SegmentedDocument {
            paragraphs,
            resolver,
            input_length: original.len(),
        }
    }
}

/// Paragraph ranges over normalized text: maximal runs of non-blank lines,
/// trimmed of surrounding whitespace. Blank-line runs are the separators.
fn split_paragraphs(normalized: &str) -> Vec<(usize, usize)> {
    let mut ranges = Vec::new();
    let mut para_start: Option<usize> = None;
    let mut offset = 0;

    for line in normalized.split_inclusive('\n') {
        let blank = line.trim().is_empty();
        match (blank, para_start) {
            (false, None) => para_start = Some(offset),
            (true, Some(start)) => {
                if let Some(range) = trim_range(normalized, start, offset) {
                    ranges.push(range);
                }
                para_start = None;
            }
            _ => {}
        }
        offset += line.len();
    }
    if let Some(start) = para_start {
        if let Some(range) = trim_range(normalized, start, normalized.len()) {
            ranges.push(range);
        }
    }
    ranges
}

/// Shrink a range to exclude surrounding whitespace; `None` if nothing is left.
fn trim_range(text: &str, start: usize, end: usize) -> Option<(usize, usize)> {
    let slice = &text[start..end];
    let trimmed = slice.trim_end();
    if trimmed.is_empty() {
        return None;
    }
    let leading = slice.len() - slice.trim_start().len();
    Some((start + leading, start + trimmed.len()))
}

/// Abbreviation-aware sentence splitting over a paragraph's analysis text.
/// Returns trimmed local ranges.
fn split_sentences(analysis: &str, abbrev: &AbbreviationChecker) -> Vec<(usize, usize)> {
    let mut boundaries = Vec::new();
    let bytes = analysis.as_bytes();

    let chars: Vec<(usize, char)> = analysis.char_indices().collect();
    let mut k = 0;
    while k < chars.len() {
        let (i, ch) = chars[k];
        if !matches!(ch, '.' | '!' | '?') {
            k += 1;
            continue;
        }

        // Decimal numbers never terminate a sentence.
        if ch == '.' && is_decimal_point(bytes, i) {
            k += 1;
            continue;
        }

        // Swallow the full terminator run: ellipses, mixed ?!, closers.
        let mut j = k + 1;
        while j < chars.len()
            && matches!(
                chars[j].1,
                '.' | '!' | '?' | '"' | '\'' | ')' | ']' | '\u{201D}' | '\u{2019}'
            )
        {
            j += 1;
        }
        let end_offset = chars.get(j).map_or(analysis.len(), |&(o, _)| o);

        // Paragraph end is always a boundary.
        if j >= chars.len() {
            boundaries.push(analysis.len());
            break;
        }

        // Must be followed by whitespace and then an upper-case letter,
        // opening quote, or opening bracket.
        if !chars[j].1.is_whitespace() {
            k = j;
            continue;
        }
        let mut n = j;
        while n < chars.len() && chars[n].1.is_whitespace() {
            n += 1;
        }
        let next_ok = chars.get(n).map_or(true, |&(_, c)| {
            c.is_uppercase() || matches!(c, '"' | '\'' | '(' | '[' | '\u{201C}' | '\u{2018}')
        });
        if !next_ok {
            k = j;
            continue;
        }

        // Abbreviations and enumeration markers keep their period.
        if ch == '.'
            && (abbrev.ends_with_abbreviation(&analysis[..i + 1])
                || is_enumeration_marker(analysis, i))
        {
            k = j;
            continue;
        }

        boundaries.push(end_offset);
        k = n;
    }

    let mut ranges = Vec::new();
    let mut start = 0;
    for &boundary in &boundaries {
        if let Some(range) = trim_range(analysis, start, boundary) {
            ranges.push(range);
        }
        start = boundary;
    }
    if start < analysis.len() {
        if let Some(range) = trim_range(analysis, start, analysis.len()) {
            ranges.push(range);
        }
    }
    ranges
}

fn is_decimal_point(bytes: &[u8], dot: usize) -> bool {
    dot > 0
        && bytes[dot - 1].is_ascii_digit()
        && bytes.get(dot + 1).is_some_and(|b| b.is_ascii_digit())
}

/// "1." or "a." at the start of a line is an enumeration marker, not a
/// sentence end.
fn is_enumeration_marker(analysis: &str, dot: usize) -> bool {
    let before = &analysis[..dot];
    let word_start = before
        .rfind(|c: char| c.is_whitespace())
        .map_or(0, |p| p + c_len(before, p));
    let word = &before[word_start..];
    let short_marker = (!word.is_empty() && word.len() <= 3 && word.bytes().all(|b| b.is_ascii_digit()))
        || (word.len() == 1 && word.bytes().all(|b| b.is_ascii_alphabetic()));
    if !short_marker {
        return false;
    }
    // Marker must be the first thing on its line.
    analysis[..word_start]
        .chars()
        .rev()
        .take_while(|c| *c != '\n')
        .all(|c| c == ' ' || c == '\t')
}

fn c_len(s: &str, at: usize) -> usize {
    s[at..].chars().next().map_or(1, char::len_utf8)
}

/// Word tokens: unicode word boundaries, alphanumeric segments only. Blanked
/// skip regions are all spaces, so no token can originate inside one.
fn tokenize(analysis: &str) -> Vec<(usize, usize)> {
    analysis
        .split_word_bound_indices()
        .filter(|(_, seg)| seg.chars().any(char::is_alphanumeric))
        .map(|(start, seg)| (start, start + seg.len()))
        .collect()
}

/// Build the local-to-original offset mapping for one paragraph.
fn build_offsets(norm: &NormalizedText, pstart: usize, pend: usize) -> ParaOffsets {
    if norm.is_identity() {
        ParaOffsets::Identity { base: pstart }
    } else {
        let map: Vec<usize> = (pstart..=pend).map(|i| norm.to_original(i)).collect();
        ParaOffsets::Map(Arc::new(map))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(text: &str) -> SegmentedDocument {
        Segmenter::new().segment(text)
    }

    #[test]
    fn test_paragraph_split_on_blank_lines() {
        let doc = seg("First paragraph here.\n\nSecond paragraph here.\n\n\nThird.");
        assert_eq!(doc.paragraphs.len(), 3);
        assert_eq!(doc.paragraphs[0].span.slice("First paragraph here.\n\nSecond paragraph here.\n\n\nThird."), "First paragraph here.");
    }

    #[test]
    fn test_whitespace_only_lines_separate_paragraphs() {
        let doc = seg("One.\n   \t\nTwo.");
        assert_eq!(doc.paragraphs.len(), 2);
    }

    #[test]
    fn test_sentence_split_basic() {
        let doc = seg("Hello world. This is a test. How are you?");
        assert_eq!(doc.paragraphs[0].sentences.len(), 3);
    }

    #[test]
    fn test_sentence_split_spares_abbreviations() {
        let doc = seg("Results from Smith et al. show improvement. Dr. Jones disagrees.");
        let para = &doc.paragraphs[0];
        assert_eq!(para.sentences.len(), 2);
        let first = &para.analysis[para.sentences[0].0..para.sentences[0].1];
        assert!(first.contains("et al. show"));
    }

    #[test]
    fn test_sentence_split_spares_decimals_and_eg() {
        let doc = seg("The rate was 3.5 percent. Some tools, e.g. linters, help.");
        assert_eq!(doc.paragraphs[0].sentences.len(), 2);
    }

    #[test]
    fn test_enumeration_marker_not_a_boundary() {
        let doc = seg("1. First item in the list\n2. Second item in the list");
        assert_eq!(doc.paragraphs[0].sentences.len(), 1);
    }

    #[test]
    fn test_spans_index_original_with_crlf() {
        let text = "First sentence here.\r\n\r\nSecond paragraph text.";
        let doc = seg(text);
        assert_eq!(doc.paragraphs.len(), 2);
        let second = &doc.paragraphs[1];
        assert_eq!(second.span.slice(text), "Second paragraph text.");
        // token spans round-trip too
        let (ts, te) = second.tokens[0];
        let token_span = second.offsets.span_of(ts, te);
        assert_eq!(token_span.slice(text), "Second");
    }

    #[test]
    fn test_no_tokens_inside_skip_regions() {
        let text = "# A Header\n\nReal prose lives here.";
        let doc = seg(text);
        assert_eq!(doc.paragraphs.len(), 2);
        assert!(doc.paragraphs[0].tokens.is_empty());
        assert_eq!(doc.paragraphs[1].tokens.len(), 4);
    }

    #[test]
    fn test_citation_regions_recorded_locally() {
        let text = "Evidence supports this \\cite{smith2020}.";
        let doc = seg(text);
        let para = &doc.paragraphs[0];
        assert_eq!(para.citation_regions.len(), 1);
        let (cs, ce) = para.citation_regions[0];
        assert_eq!(&text[cs..ce], "\\cite{smith2020}");
    }

    #[test]
    fn test_section_attribution() {
        let text = "# Methods\n\nWe did things.\n\n# Results\n\nThings happened.";
        let doc = seg(text);
        assert_eq!(doc.paragraphs[1].section.as_deref(), Some("Methods"));
        assert_eq!(doc.paragraphs[3].section.as_deref(), Some("Results"));
    }

    #[test]
    fn test_token_ranges_sorted_and_in_sentences() {
        let doc = seg("One two three. Four five.");
        let para = &doc.paragraphs[0];
        assert_eq!(para.tokens.len(), 5);
        for pair in para.tokens.windows(2) {
            assert!(pair[0].1 <= pair[1].0);
        }
        for &(ts, te) in &para.tokens {
            assert!(para
                .sentences
                .iter()
                .any(|&(ss, se)| ss <= ts && te <= se));
        }
    }
}
