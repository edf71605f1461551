//! Span-to-position resolution over the original input.
//!
//! Line starts are precomputed once per analysis call so that resolving a
//! span is a binary search, not a rescan of the document.

use crate::span::Span;

/// Resolves spans to 1-based (line, column) positions and extracts bounded
/// display context. Owns a copy of the original text so that paragraphs can
/// share one resolver without borrowing from the caller.
#[derive(Debug)]
pub struct PositionResolver {
    original: String,
    line_starts: Vec<usize>,
}

impl PositionResolver {
    pub fn new(original: &str) -> Self {
        Self {
            original: original.to_string(),
            line_starts: compute_line_starts(original),
        }
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    /// Resolve a span's start offset to 1-based (line, column).
    /// Columns count characters, not bytes.
    pub fn resolve(&self, span: &Span) -> (usize, usize) {
        let line_idx = self
            .line_starts
            .partition_point(|&start| start <= span.start)
            - 1;
        let line_start = self.line_starts[line_idx];
        let column = self.original[line_start..span.start].chars().count() + 1;
        (line_idx + 1, column)
    }

    /// Extract a display window around `span`, clipped to the owning
    /// paragraph. `window` is the number of characters kept on each side;
    /// ellipses mark truncation inside the paragraph.
    pub fn context(&self, span: &Span, paragraph: &Span, window: usize) -> String {
        let prefix_start = walk_back(&self.original, span.start, paragraph.start, window);
        let suffix_end = walk_forward(&self.original, span.end, paragraph.end, window);

        let mut out = String::new();
        if prefix_start > paragraph.start {
            out.push_str("...");
        }
        out.push_str(&self.original[prefix_start..suffix_end]);
        if suffix_end < paragraph.end {
            out.push_str("...");
        }
        out
    }
}

/// Byte offsets at which each line begins, recognizing `\n`, `\r\n`, and
/// bare `\r` line endings in the original input.
fn compute_line_starts(text: &str) -> Vec<usize> {
    let bytes = text.as_bytes();
    let mut starts = vec![0];
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\n' => starts.push(i + 1),
            b'\r' => {
                if bytes.get(i + 1) != Some(&b'\n') {
                    starts.push(i + 1);
                }
            }
            _ => {}
        }
        i += 1;
    }
    starts
}

fn walk_back(text: &str, from: usize, floor: usize, chars: usize) -> usize {
    let mut pos = from;
    let mut taken = 0;
    for (idx, _) in text[floor..from].char_indices().rev() {
        if taken == chars {
            break;
        }
        pos = floor + idx;
        taken += 1;
    }
    if taken < chars {
        floor
    } else {
        pos
    }
}

fn walk_forward(text: &str, from: usize, ceil: usize, chars: usize) -> usize {
    let mut pos = from;
    let mut taken = 0;
    let mut iter = text[from..ceil].char_indices();
    while taken < chars {
        match iter.next() {
            Some((idx, ch)) => {
                pos = from + idx + ch.len_utf8();
                taken += 1;
            }
            None => return ceil,
        }
    }
    pos
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_first_line() {
        let resolver = PositionResolver::new("hello world");
        let (line, col) = resolver.resolve(&Span::new(6, 11));
        assert_eq!((line, col), (1, 7));
    }

    #[test]
    fn test_resolve_across_lines() {
        let resolver = PositionResolver::new("first line\nsecond line\nthird");
        let (line, col) = resolver.resolve(&Span::new(11, 17));
        assert_eq!((line, col), (2, 1));
        let (line, col) = resolver.resolve(&Span::new(18, 22));
        assert_eq!((line, col), (2, 8));
    }

    #[test]
    fn test_resolve_crlf_line_endings() {
        let resolver = PositionResolver::new("one\r\ntwo\r\nthree");
        let (line, col) = resolver.resolve(&Span::new(5, 8));
        assert_eq!((line, col), (2, 1));
        let (line, col) = resolver.resolve(&Span::new(10, 15));
        assert_eq!((line, col), (3, 1));
    }

    #[test]
    fn test_column_counts_chars_not_bytes() {
        let resolver = PositionResolver::new("héllo wörld");
        // "wörld" starts after "héllo " = 6 chars but 7 bytes
        let start = "héllo ".len();
        let (line, col) = resolver.resolve(&Span::new(start, start + 2));
        assert_eq!((line, col), (1, 7));
    }

    #[test]
    fn test_context_clipped_to_paragraph() {
        let text = "aaaa bbbb cccc dddd eeee";
        let resolver = PositionResolver::new(text);
        let para = Span::new(0, text.len());
        let span = Span::new(10, 14); // "cccc"
        let ctx = resolver.context(&span, &para, 5);
        assert_eq!(ctx, "...bbbb cccc dddd...");
    }

    #[test]
    fn test_context_no_ellipsis_at_paragraph_edge() {
        let text = "short text here";
        let resolver = PositionResolver::new(text);
        let para = Span::new(0, text.len());
        let ctx = resolver.context(&Span::new(6, 10), &para, 40);
        assert_eq!(ctx, "short text here");
    }
}
