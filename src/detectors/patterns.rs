//! Pattern tables shared by the detector set. Compiled once; all matching
//! goes through word-boundary regexes or whole-token comparisons, never raw
//! substring containment.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// Build a case-insensitive word-boundary regex for a literal term or phrase.
pub fn word_regex(term: &str) -> Regex {
    Regex::new(&format!(r"(?i)\b{}\b", regex::escape(term))).expect("escaped literal always compiles")
}

/// Curated vague terms: unresolvable demonstratives, scope-less quantifiers,
/// vague nouns and adjectives.
pub const VAGUE_TERMS: &[&str] = &[
    "things", "stuff", "society", "aspect", "aspects", "factor", "factors", "impact",
    "significant", "important", "interesting", "recently", "often", "sometimes", "usually",
    "generally", "many", "some", "most", "several", "various", "numerous", "very", "really",
    "quite", "rather", "somewhat", "huge", "massive", "good", "bad",
];

pub static VAGUE_TERM_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| VAGUE_TERMS.iter().copied().collect());

/// Hedge terms counted per clause. Multi-word entries match as phrases.
pub const HEDGE_TERMS: &[&str] = &[
    "may", "might", "could", "perhaps", "possibly", "probably", "maybe", "seems", "seem",
    "appears", "appear", "suggests", "suggest", "likely", "unlikely", "somewhat", "arguably",
    "presumably", "conceivably", "potentially", "apparently", "relatively", "virtually",
    "tends to", "tend to", "to some extent", "in some sense", "more or less", "sort of",
    "kind of",
];

pub static HEDGE_PATTERNS: Lazy<Vec<(&'static str, Regex)>> =
    Lazy::new(|| HEDGE_TERMS.iter().map(|t| (*t, word_regex(t))).collect());

/// Vague-attribution templates. Suppressed when a citation-shaped span sits
/// in the same sentence.
pub static WEASEL_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)\b(?:some|many|most|several|numerous|certain)\s+(?:experts?|researchers?|scientists?|scholars?|critics?|observers?|people|authors?)\s+(?:believe|argue|claim|say|suggest|agree|contend|maintain|feel)\b",
        r"(?i)\bit\s+is\s+(?:widely|generally|commonly|often|sometimes)?\s*(?:believed|thought|assumed|accepted|known|said|acknowledged|argued|claimed|suggested)\b",
        r"(?i)\bit\s+has\s+been\s+(?:shown|suggested|argued|claimed|demonstrated|noted|observed)\b",
        r"(?i)\b(?:studies|research|evidence|experts|data|surveys)\s+(?:show|shows|suggest|suggests|indicate|indicates|prove|proves|confirm|confirms|demonstrate|demonstrates)\b",
        r"(?i)\baccording\s+to\s+(?:some|many|most|several|experts|researchers|critics)\b",
        r"(?i)\b(?:there\s+is|there\s+are)\s+(?:a\s+)?(?:growing|widespread|general)\s+(?:consensus|belief|agreement|concern)\b",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Causal verb/phrase patterns.
pub static CAUSAL_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)\bcauses?\b",
        r"(?i)\bcaused\b",
        r"(?i)\bcausing\b",
        r"(?i)\bleads?\s+to\b",
        r"(?i)\bled\s+to\b",
        r"(?i)\bleading\s+to\b",
        r"(?i)\bresults?\s+in\b",
        r"(?i)\bresulted\s+in\b",
        r"(?i)\bresulting\s+in\b",
        r"(?i)\bdue\s+to\b",
        r"(?i)\bbecause\s+of\b",
        r"(?i)\bis\s+(?:a\s+)?(?:direct\s+)?(?:result|consequence)\s+of\b",
        r"(?i)\bbrings?\s+about\b",
        r"(?i)\btriggers?\b",
        r"(?i)\bstems?\s+from\b",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Citation-shaped spans: parenthetical author-year, bracketed numeric, and
/// inline author (year). LaTeX citation commands are covered separately by
/// skip-region bookkeeping.
pub static CITATION_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        // (Smith, 2023) / (Smith & Jones, 2021) / (Smith et al., 2020, p. 4)
        r"\([A-Z][A-Za-z'\u{2019}-]+(?:\s+(?:&|and)\s+[A-Z][A-Za-z'\u{2019}-]+)*(?:\s+et\s+al\.?)?,?\s+\d{4}[a-z]?(?:,\s*(?:pp?\.\s*)?\d+(?:[-\u{2013}]\d+)?)?\)",
        // [3] / [3, 7] / [3-9]
        r"\[\d+(?:\s*[,\u{2013}-]\s*\d+)*\]",
        // Smith (2023) / Smith et al. (2020)
        r"\b[A-Z][A-Za-z'\u{2019}-]+(?:\s+(?:&|and)\s+[A-Z][A-Za-z'\u{2019}-]+)*(?:\s+et\s+al\.?)?\s+\(\d{4}[a-z]?\)",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Claim shapes that demand a citation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimKind {
    Statistic,
    ResearchClaim,
    Superlative,
    Dated,
    Attribution,
}

pub static NEEDS_CITATION_PATTERNS: Lazy<Vec<(ClaimKind, Regex)>> = Lazy::new(|| {
    [
        (ClaimKind::Statistic, r"\b\d+(?:\.\d+)?\s*(?:%|percent)\b"),
        (
            ClaimKind::ResearchClaim,
            r"(?i)\b(?:studies|research|surveys|data|evidence)\s+(?:show|shows|suggest|suggests|indicate|indicates|find|finds|reveal|reveals|prove|proves|demonstrate|demonstrates|confirm|confirms)\b",
        ),
        (
            ClaimKind::Superlative,
            r"(?i)\bthe\s+(?:first|only|largest|greatest|leading|oldest|newest|biggest|smallest|fastest|best|worst|most\s+\w+)\b",
        ),
        (ClaimKind::Dated, r"\b(?:in|since|by|until)\s+(?:1[6-9]|20)\d{2}\b"),
    ]
    .iter()
    .map(|(k, p)| (*k, Regex::new(p).unwrap()))
    .collect()
});

pub static ACCORDING_TO: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\baccording\s+to\b").unwrap());

/// Fixed filler-phrase list. One flag per matched phrase span.
pub const FILLER_PHRASES: &[&str] = &[
    "in today's society",
    "in today's world",
    "throughout history",
    "since the dawn of time",
    "it is important to note that",
    "it is worth noting that",
    "it goes without saying",
    "needless to say",
    "it is clear that",
    "it is obvious that",
    "as we all know",
    "at the end of the day",
    "when all is said and done",
    "in terms of",
    "the fact that",
    "in order to",
    "as a matter of fact",
    "for all intents and purposes",
    "at this point in time",
    "in the final analysis",
    "last but not least",
];

pub static FILLER_PATTERNS: Lazy<Vec<(&'static str, Regex)>> =
    Lazy::new(|| FILLER_PHRASES.iter().map(|p| (*p, word_regex(p))).collect());

/// Definitional patterns that exempt nearby jargon.
pub static EXPLANATION_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"\([^)]+\)",
        r"(?i),\s+which\s+means",
        r"(?i),\s+i\.e\.,",
        r"(?i),\s+that\s+is,",
        r"(?i)\brefers\s+to\b",
        r"(?i)\bdefined\s+as\b",
        r"(?i)\bin\s+other\s+words\b",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Everyday words five letters and longer that never count as jargon.
/// Shorter words are exempt by the length rule alone.
pub static COMMON_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "about", "above", "across", "actually", "after", "again", "against", "almost", "along",
        "already", "although", "always", "among", "analysis", "animal", "announce", "another",
        "answer", "anything", "appear", "approach", "argue", "argument", "around", "article",
        "aspect", "assume", "attempt", "author", "available", "basic", "because", "become",
        "before", "begin", "beginning", "behavior", "believe", "benefit", "better", "between",
        "beyond", "brief", "bring", "broad", "build", "called", "cannot", "careful", "carry",
        "cause", "center", "central", "century", "certain", "certainly", "chance", "change",
        "chapter", "choice", "choose", "claim", "class", "clear", "clearly", "close", "common",
        "community", "company", "compare", "complete", "complex", "concept", "concern",
        "conclude", "conclusion", "condition", "consider", "contain", "context", "continue",
        "contrast", "country", "course", "create", "culture", "current", "death", "debate",
        "decade", "decide", "decision", "define", "degree", "depend", "describe", "design",
        "despite", "detail", "develop", "development", "difference", "different", "difficult",
        "direct", "discuss", "discussion", "distinct", "document", "early", "easily", "effect",
        "effort", "eight", "either", "element", "emerge", "energy", "enough", "ensure", "entire",
        "equal", "error", "especially", "essay", "establish", "event", "every", "everyone",
        "evidence", "exactly", "examine", "example", "except", "exist", "expect", "experience",
        "explain", "explore", "express", "extent", "factor", "family", "field", "figure",
        "final", "finally", "finding", "findings", "first", "focus", "follow", "following",
        "force", "forward", "found", "frame", "framework", "friend", "further", "future",
        "general", "generally", "government", "great", "group", "growth", "happen", "hardly",
        "having", "health", "heart", "higher", "history", "house", "however", "human", "humans",
        "identify", "image", "imagine", "importance", "important", "improve", "include",
        "increase", "indeed", "indicate", "individual", "influence", "information", "instance",
        "instead", "interest", "involve", "issue", "itself", "journal", "knowledge", "language",
        "large", "largely", "later", "learn", "least", "leave", "level", "light", "likely",
        "limit", "literature", "little", "local", "longer", "major", "majority", "manner",
        "matter", "meaning", "means", "measure", "media", "meeting", "member", "method",
        "middle", "might", "model", "modern", "moment", "money", "month", "moreover", "morning",
        "movement", "music", "national", "natural", "nature", "nearly", "necessary", "never",
        "night", "nothing", "notice", "number", "object", "observe", "obtain", "occur", "offer",
        "often", "order", "other", "others", "otherwise", "outcome", "overall", "paper",
        "paragraph", "parent", "particular", "pattern", "people", "perhaps", "period", "person",
        "physical", "place", "point", "policy", "political", "position", "possible",
        "potential", "power", "practice", "present", "pressure", "prevent", "previous",
        "primary", "principle", "private", "probably", "problem", "process", "produce",
        "product", "program", "project", "propose", "provide", "public", "purpose", "question",
        "raise", "range", "rather", "reach", "reader", "really", "reason", "recent", "recently",
        "record", "reduce", "refer", "reflect", "regard", "region", "relate", "relation",
        "relationship", "remain", "report", "represent", "require", "research", "resource",
        "respect", "response", "result", "return", "review", "right", "school", "science",
        "second", "section", "sense", "serve", "service", "seven", "several", "shall", "share",
        "short", "should", "significant", "similar", "simple", "simply", "since", "situation",
        "small", "social", "society", "source", "space", "speak", "specific", "stand",
        "standard", "start", "state", "statement", "still", "story", "street", "strong",
        "structure", "student", "study", "subject", "suggest", "support", "system", "table",
        "teacher", "theory", "therefore", "thing", "things", "think", "third", "those",
        "though", "thought", "three", "through", "throughout", "today", "together", "toward",
        "tradition", "truly", "under", "understand", "understanding", "unique", "until",
        "usually", "value", "various", "water", "where", "whether", "which", "while", "whole",
        "whose", "widely", "within", "without", "woman", "women", "world", "would", "write",
        "writer", "writing", "years", "young",
    ]
    .into_iter()
    .collect()
});
