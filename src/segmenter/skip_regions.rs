//! Structural-markup skip regions.
//!
//! Headers, code, math, and citation commands are excluded from analysis
//! WITHOUT shifting offsets: each region's bytes are blanked to spaces in
//! the analysis copy (newlines kept, so paragraph structure survives). No
//! token can originate inside a region because the tokenizer only sees
//! spaces there. Citation-command regions are additionally recorded so that
//! citation-proximity checks still see them.

use once_cell::sync::Lazy;
use regex::Regex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipKind {
    Header,
    CodeBlock,
    InlineCode,
    Math,
    CitationCommand,
}

/// One skip region in normalized-text byte offsets.
#[derive(Debug, Clone)]
pub struct SkipRegion {
    pub kind: SkipKind,
    pub start: usize,
    pub end: usize,
}

/// Result of a skip scan over normalized text.
#[derive(Debug)]
pub struct SkipScan {
    pub regions: Vec<SkipRegion>,
    /// Normalized text with region bytes blanked; identical length and
    /// offsets, so spans computed here index the normalized text directly.
    pub analysis_text: String,
    /// (offset, title) for each header, in document order. Paragraph section
    /// attribution picks the closest preceding entry.
    pub sections: Vec<(usize, String)>,
}

static FENCED_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)```.*?(?:```|\z)").unwrap());
static INLINE_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`[^`\n]+`").unwrap());
static HEADER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^(#{1,6})[ \t]+(.*)$").unwrap());
static DISPLAY_MATH: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)\$\$.*?\$\$").unwrap());
static INLINE_MATH: Lazy<Regex> = Lazy::new(|| Regex::new(r"\$[^$\n]+\$").unwrap());
static CITATION_COMMAND: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\(?:cite[pt]?|ref|eqref|label|autocite|textcite)\{[^}]*\}").unwrap());

pub fn scan(normalized: &str) -> SkipScan {
    let mut regions = Vec::new();
    let mut sections = Vec::new();

    for m in FENCED_CODE.find_iter(normalized) {
        regions.push(SkipRegion {
            kind: SkipKind::CodeBlock,
            start: m.start(),
            end: m.end(),
        });
    }
    for caps in HEADER.captures_iter(normalized) {
        let whole = caps.get(0).unwrap();
        let title = caps.get(2).map(|t| t.as_str().trim().to_string());
        if overlaps_existing(&regions, whole.start(), whole.end()) {
            continue; // header syntax inside a code fence
        }
        regions.push(SkipRegion {
            kind: SkipKind::Header,
            start: whole.start(),
            end: whole.end(),
        });
        if let Some(title) = title {
            sections.push((whole.start(), title));
        }
    }
    for (regex, kind) in [
        (&*INLINE_CODE, SkipKind::InlineCode),
        (&*DISPLAY_MATH, SkipKind::Math),
        (&*INLINE_MATH, SkipKind::Math),
        (&*CITATION_COMMAND, SkipKind::CitationCommand),
    ] {
        for m in regex.find_iter(normalized) {
            if overlaps_existing(&regions, m.start(), m.end()) {
                continue;
            }
            regions.push(SkipRegion {
                kind,
                start: m.start(),
                end: m.end(),
            });
        }
    }

    regions.sort_by_key(|r| r.start);

    // Blank region bytes, preserving newlines so blank-line paragraph
    // boundaries stay where they were.
    let mut bytes = normalized.as_bytes().to_vec();
    for region in &regions {
        for b in &mut bytes[region.start..region.end] {
            if *b != b'\n' {
                *b = b' ';
            }
        }
    }
    let analysis_text = String::from_utf8(bytes).expect("blanking preserves UTF-8");

    SkipScan {
        regions,
        analysis_text,
        sections,
    }
}

fn overlaps_existing(regions: &[SkipRegion], start: usize, end: usize) -> bool {
    regions.iter().any(|r| start < r.end && r.start < end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_blanked_and_titled() {
        let scan = scan("# Introduction\n\nBody text here.");
        assert_eq!(scan.regions.len(), 1);
        assert_eq!(scan.regions[0].kind, SkipKind::Header);
        assert_eq!(scan.sections, vec![(0, "Introduction".to_string())]);
        assert!(scan.analysis_text.starts_with("              \n"));
        assert!(scan.analysis_text.ends_with("Body text here."));
        assert_eq!(scan.analysis_text.len(), "# Introduction\n\nBody text here.".len());
    }

    #[test]
    fn test_fenced_code_keeps_newlines() {
        let text = "Before.\n\n```\nlet x = 1;\n```\n\nAfter.";
        let scan = scan(text);
        assert_eq!(scan.analysis_text.len(), text.len());
        assert!(!scan.analysis_text.contains("let x"));
        // newline structure intact
        assert_eq!(
            scan.analysis_text.matches('\n').count(),
            text.matches('\n').count()
        );
    }

    #[test]
    fn test_math_and_citation_commands() {
        let text = "Energy is $E = mc^2$ as shown in \\cite{einstein1905}.";
        let scan = scan(text);
        assert!(!scan.analysis_text.contains("mc^2"));
        assert!(!scan.analysis_text.contains("einstein1905"));
        let kinds: Vec<_> = scan.regions.iter().map(|r| r.kind).collect();
        assert!(kinds.contains(&SkipKind::Math));
        assert!(kinds.contains(&SkipKind::CitationCommand));
    }

    #[test]
    fn test_header_inside_code_fence_not_double_counted() {
        let text = "```\n# not a header\n```\n\nReal text.";
        let scan = scan(text);
        assert!(scan.sections.is_empty());
        assert_eq!(
            scan.regions
                .iter()
                .filter(|r| r.kind == SkipKind::Header)
                .count(),
            0
        );
    }

    #[test]
    fn test_plain_text_untouched() {
        let text = "No markup at all, just prose.";
        let scan = scan(text);
        assert!(scan.regions.is_empty());
        assert_eq!(scan.analysis_text, text);
    }
}
