//! Abbreviation handling for sentence boundary detection.
//!
//! A period ending one of these tokens is part of the abbreviation, not a
//! sentence terminator. "et al." needs its preceding word, so the checker
//! looks at the last two whitespace-separated words.

use std::collections::HashSet;

/// Abbreviations that must not terminate a sentence.
pub const ABBREVIATIONS: &[&str] = &[
    "Dr.", "Mr.", "Mrs.", "Ms.", "Prof.", "Sr.", "Jr.", "St.",
    "e.g.", "i.e.", "cf.", "etc.", "vs.", "viz.", "ca.", "al.",
    "Fig.", "fig.", "Eq.", "eq.", "Sec.", "sec.", "Ch.", "ch.",
    "No.", "no.", "pp.", "p.", "Vol.", "vol.", "ed.", "eds.",
    "approx.", "a.m.", "p.m.", "U.S.", "U.K.", "Ph.D.", "M.A.",
];

/// Two-word abbreviations checked against the last two words.
pub const MULTIWORD_ABBREVIATIONS: &[(&str, &str)] = &[("et", "al.")];

/// O(1) abbreviation lookup shared by the sentence splitter.
#[derive(Debug)]
pub struct AbbreviationChecker {
    single: HashSet<&'static str>,
    multi: HashSet<(&'static str, &'static str)>,
}

impl AbbreviationChecker {
    pub fn new() -> Self {
        Self {
            single: ABBREVIATIONS.iter().copied().collect(),
            multi: MULTIWORD_ABBREVIATIONS.iter().copied().collect(),
        }
    }

    /// Whether `text` (everything up to and including a candidate period)
    /// ends with a known abbreviation.
    pub fn ends_with_abbreviation(&self, text: &str) -> bool {
        let mut words = text.split_whitespace().rev();
        let Some(last) = words.next() else {
            return false;
        };
        let last = strip_wrapping(last);

        if self.single.contains(last) {
            return true;
        }

        if let Some(prev) = words.next() {
            let prev = strip_wrapping(prev);
            if self.multi.contains(&(prev, last)) {
                return true;
            }
        }

        false
    }
}

impl Default for AbbreviationChecker {
    fn default() -> Self {
        Self::new()
    }
}

/// Strip quotes and brackets so "(e.g." and "\"Dr.\"" still match.
fn strip_wrapping(word: &str) -> &str {
    word.trim_matches(|c: char| {
        matches!(
            c,
            '"' | '\'' | '(' | ')' | '[' | ']' | '\u{201C}' | '\u{201D}' | '\u{2018}' | '\u{2019}'
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_abbreviations() {
        let checker = AbbreviationChecker::new();
        assert!(checker.ends_with_abbreviation("Call Dr."));
        assert!(checker.ends_with_abbreviation("According to Prof."));
        assert!(!checker.ends_with_abbreviation("This is a sentence."));
    }

    #[test]
    fn test_latin_abbreviations() {
        let checker = AbbreviationChecker::new();
        assert!(checker.ends_with_abbreviation("some items, e.g."));
        assert!(checker.ends_with_abbreviation("the method (cf."));
        assert!(checker.ends_with_abbreviation("tools, frameworks, etc."));
    }

    #[test]
    fn test_et_al_needs_both_words() {
        let checker = AbbreviationChecker::new();
        assert!(checker.ends_with_abbreviation("shown by Smith et al."));
        // "al." alone is in the single list too (conservative: never split there)
        assert!(checker.ends_with_abbreviation("al."));
    }

    #[test]
    fn test_wrapping_punctuation_stripped() {
        let checker = AbbreviationChecker::new();
        assert!(checker.ends_with_abbreviation("He said \"Dr.\""));
        assert!(checker.ends_with_abbreviation("(see Fig."));
    }

    #[test]
    fn test_empty_text() {
        let checker = AbbreviationChecker::new();
        assert!(!checker.ends_with_abbreviation(""));
        assert!(!checker.ends_with_abbreviation("   "));
    }
}
