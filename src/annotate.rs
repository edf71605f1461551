//! Linguistic annotation: the provider seam and the built-in rule-based
//! implementation.
//!
//! The analyzer consumes annotations through [`AnnotationProvider`], injected
//! by the caller — never a hidden module-level singleton — so tests can
//! substitute providers and parallel runs need no shared state.
//! [`RuleAnnotator`] is the bundled deterministic provider: an exception
//! table plus suffix rules for lemmas, closed-class lists plus suffix
//! heuristics for POS, and clause-marking dependency labels.

use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};
use unicode_segmentation::UnicodeSegmentation;

use crate::error::AnnotationError;

/// Coarse part-of-speech tags, modeled on the universal tag set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PosTag {
    Noun,
    ProperNoun,
    Verb,
    Adjective,
    Adverb,
    Pronoun,
    Determiner,
    Adposition,
    Conjunction,
    Numeral,
    Other,
}

impl PosTag {
    /// Whether this tag marks a content word for concept counting.
    pub fn is_content(&self) -> bool {
        matches!(
            self,
            PosTag::Noun | PosTag::ProperNoun | PosTag::Verb | PosTag::Adjective | PosTag::Adverb
        )
    }
}

/// Dependency labels, reduced to what clause segmentation needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepLabel {
    /// Subordinating marker ("that", "because", ...): starts a new clause.
    Mark,
    /// Coordinating conjunction ("and", "but", ...): starts a new clause.
    Cc,
    Other,
}

/// Annotation for one token, with byte offsets relative to the paragraph
/// text handed to the provider.
#[derive(Debug, Clone)]
pub struct TokenAnnotation {
    pub start: usize,
    pub end: usize,
    pub lemma: String,
    pub pos: PosTag,
    pub dep: DepLabel,
    pub is_stop: bool,
}

/// Provider output for one paragraph.
#[derive(Debug, Clone)]
pub struct ParagraphAnnotations {
    pub tokens: Vec<TokenAnnotation>,
    /// End offsets of sentences as the provider sees them. The segmenter's
    /// abbreviation-aware boundaries stay canonical; these are advisory.
    pub sentence_boundaries: Vec<usize>,
}

/// External capability the core consumes: synchronous, local, and
/// deterministic for identical input.
pub trait AnnotationProvider {
    fn annotate(&self, paragraph_text: &str) -> Result<ParagraphAnnotations, AnnotationError>;
}

impl<P: AnnotationProvider + ?Sized> AnnotationProvider for &P {
    fn annotate(&self, paragraph_text: &str) -> Result<ParagraphAnnotations, AnnotationError> {
        (**self).annotate(paragraph_text)
    }
}

/// Function words excluded from content-word counts and skipped when
/// comparing definition lemmas.
pub static FUNCTION_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "a", "an", "the", "this", "that", "these", "those", "each", "every", "either", "neither",
        "some", "any", "no", "all", "both", "such", "what", "which", "whose", "of", "in", "to",
        "for", "with", "on", "at", "by", "from", "about", "as", "into", "like", "through", "over",
        "between", "out", "against", "during", "without", "under", "around", "among", "upon",
        "i", "you", "he", "she", "it", "we", "they", "me", "him", "her", "us", "them", "my",
        "your", "his", "its", "our", "their", "mine", "yours", "hers", "ours", "theirs", "myself",
        "yourself", "himself", "herself", "itself", "ourselves", "themselves", "who", "whom",
        "something", "anything", "nothing", "everything", "someone", "anyone", "everyone",
        "and", "but", "or", "nor", "so", "yet", "because", "although", "though", "since",
        "while", "if", "unless", "whereas", "until", "when", "whenever", "where", "wherever",
        "once", "than", "then", "there", "here", "not", "also", "too", "just", "only", "even",
        "be", "am", "is", "are", "was", "were", "been", "being", "have", "has", "had", "having",
        "do", "does", "did", "done", "doing", "can", "could", "may", "might", "must", "shall",
        "should", "will", "would", "how", "why", "whether", "s", "t", "d", "ll", "re", "ve",
    ]
    .into_iter()
    .collect()
});

pub fn is_function_word(word: &str) -> bool {
    FUNCTION_WORDS.contains(word.to_ascii_lowercase().as_str())
}

static IRREGULAR_LEMMAS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    [
        ("am", "be"), ("is", "be"), ("are", "be"), ("was", "be"), ("were", "be"),
        ("been", "be"), ("being", "be"),
        ("has", "have"), ("had", "have"), ("having", "have"),
        ("does", "do"), ("did", "do"), ("done", "do"),
        ("goes", "go"), ("went", "go"), ("gone", "go"), ("going", "go"),
        ("said", "say"), ("says", "say"), ("saying", "say"),
        ("made", "make"), ("making", "make"),
        ("found", "find"), ("finding", "find"),
        ("shown", "show"), ("showed", "show"),
        ("taken", "take"), ("took", "take"), ("taking", "take"),
        ("given", "give"), ("gave", "give"), ("giving", "give"),
        ("known", "know"), ("knew", "know"), ("knowing", "know"),
        ("seen", "see"), ("saw", "see"), ("seeing", "see"),
        ("thought", "think"), ("thinking", "think"),
        ("came", "come"), ("coming", "come"),
        ("got", "get"), ("gotten", "get"), ("getting", "get"),
        ("ran", "run"), ("running", "run"),
        ("wrote", "write"), ("written", "write"), ("writing", "write"),
        ("led", "lead"), ("leading", "lead"),
        ("held", "hold"), ("holding", "hold"),
        ("brought", "bring"), ("bringing", "bring"),
        ("changed", "change"), ("changing", "change"), ("changes", "change"),
        ("used", "use"), ("using", "use"), ("uses", "use"),
        ("stated", "state"), ("stating", "state"), ("states", "state"),
        ("better", "good"), ("best", "good"),
        ("worse", "bad"), ("worst", "bad"),
        ("more", "many"), ("most", "many"),
        ("less", "little"), ("least", "little"),
        ("children", "child"), ("men", "man"), ("women", "woman"),
        ("people", "person"), ("feet", "foot"), ("teeth", "tooth"), ("mice", "mouse"),
        ("data", "datum"), ("criteria", "criterion"), ("phenomena", "phenomenon"),
        ("analyses", "analysis"), ("hypotheses", "hypothesis"), ("theses", "thesis"),
    ]
    .into_iter()
    .collect()
});

/// Rule-based lemmatization: exception table first, then inflectional
/// suffix rules with doubled-consonant and silent-e repair. Derivational
/// morphology is deliberately untouched; see [`lemmas_share_root`].
pub fn lemmatize(word: &str) -> String {
    let lower = word.to_ascii_lowercase();
    if let Some(&lemma) = IRREGULAR_LEMMAS.get(lower.as_str()) {
        return lemma.to_string();
    }

    // plural / third-person -s
    if let Some(stem) = strip_plural(&lower) {
        return stem;
    }
    // -ing / -ed
    if lower.len() > 5 {
        if let Some(stem) = lower.strip_suffix("ing") {
            return repair_stem(stem);
        }
    }
    if lower.len() > 4 {
        if let Some(stem) = lower.strip_suffix("ied") {
            return format!("{stem}y");
        }
        if let Some(stem) = lower.strip_suffix("ed") {
            return repair_stem(stem);
        }
    }

    lower
}

fn strip_plural(word: &str) -> Option<String> {
    if word.len() > 4 {
        if let Some(stem) = word.strip_suffix("ies") {
            return Some(format!("{stem}y"));
        }
    }
    if word.len() > 4
        && ["sses", "xes", "zes", "ches", "shes"]
            .iter()
            .any(|s| word.ends_with(s))
    {
        return word.strip_suffix("es").map(str::to_string);
    }
    if word.len() > 3
        && word.ends_with('s')
        && !word.ends_with("ss")
        && !word.ends_with("us")
        && !word.ends_with("is")
    {
        return word.strip_suffix('s').map(str::to_string);
    }
    None
}

/// Undo spelling changes from -ing/-ed attachment: drop a doubled final
/// consonant (running -> run) and restore a silent e where the stem could
/// not otherwise end (handl -> handle, believ -> believe, argu -> argue).
fn repair_stem(stem: &str) -> String {
    let bytes = stem.as_bytes();
    let n = bytes.len();
    if n >= 3 && bytes[n - 1] == bytes[n - 2] && !matches!(bytes[n - 1], b'l' | b's' | b'z') {
        return stem[..n - 1].to_string();
    }
    let is_vowel = |b: u8| matches!(b, b'a' | b'e' | b'i' | b'o' | b'u');
    let needs_e = stem.ends_with('u')
        || stem.ends_with('v')
        || stem.ends_with('c')
        || stem.ends_with('z')
        || (n >= 2 && bytes[n - 1] == b'g' && is_vowel(bytes[n - 2]))
        || (n >= 2 && bytes[n - 1] == b'l' && !is_vowel(bytes[n - 2]) && bytes[n - 2] != b'l');
    if needs_e {
        return format!("{stem}e");
    }
    stem.to_string()
}

/// Derivational suffixes consulted by [`lemmas_share_root`], longest first.
const DERIVATIONAL_SUFFIXES: &[&str] = &[
    "ation", "ition", "ness", "ment", "ship", "hood", "ance", "ence", "acy", "ity", "ism", "dom",
    "ous", "ful", "ive", "ly", "al", "ic",
];

fn strip_derivational(lemma: &str) -> Option<String> {
    for suffix in DERIVATIONAL_SUFFIXES {
        if let Some(stem) = lemma.strip_suffix(suffix) {
            if stem.len() >= 3 {
                // y-mutation: happi(ness) -> happy
                if let Some(base) = stem.strip_suffix('i') {
                    return Some(format!("{base}y"));
                }
                return Some(stem.to_string());
            }
        }
    }
    None
}

/// True lemma kinship for the circular-definition check.
///
/// Two lemmas share a root when they are equal, when stripping one
/// derivational suffix from either yields the other ("freedom"/"free"), or
/// when their stripped stems stand in a long prefix relation
/// ("democracy" -> democr, "democratic" -> democrat). Surface-form suffix
/// stemming is never used: inflection is already gone from lemmas, and the
/// stem-length floors keep unrelated words that merely share a suffix apart.
pub fn lemmas_share_root(a: &str, b: &str) -> bool {
    if a == b {
        return true;
    }
    let ra = strip_derivational(a);
    let rb = strip_derivational(b);
    if ra.as_deref() == Some(b) || rb.as_deref() == Some(a) {
        return true;
    }
    if ra.is_none() && rb.is_none() {
        return false; // neither reduced; plain inequality stands
    }
    let ra = ra.as_deref().unwrap_or(a);
    let rb = rb.as_deref().unwrap_or(b);
    let (short, long) = if ra.len() <= rb.len() { (ra, rb) } else { (rb, ra) };
    short.len() >= 6 && long.starts_with(short)
}

static DETERMINERS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "a", "an", "the", "this", "that", "these", "those", "each", "every", "either", "neither",
        "some", "any", "no", "all", "both", "such",
    ]
    .into_iter()
    .collect()
});

static ADPOSITIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "of", "in", "to", "for", "with", "on", "at", "by", "from", "about", "as", "into", "like",
        "through", "over", "between", "out", "against", "during", "without", "under", "around",
        "among", "upon",
    ]
    .into_iter()
    .collect()
});

static PRONOUNS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "i", "you", "he", "she", "it", "we", "they", "me", "him", "her", "us", "them", "my",
        "your", "his", "its", "our", "their", "who", "whom", "something", "anything", "nothing",
        "everything", "someone", "anyone", "everyone",
    ]
    .into_iter()
    .collect()
});

static CONJUNCTIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "and", "but", "or", "nor", "so", "yet", "because", "although", "though", "since", "while",
        "if", "unless", "whereas", "until", "when", "whenever", "where", "wherever", "once",
    ]
    .into_iter()
    .collect()
});

static AUXILIARIES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "be", "am", "is", "are", "was", "were", "been", "being", "have", "has", "had", "having",
        "do", "does", "did", "done", "can", "could", "may", "might", "must", "shall", "should",
        "will", "would",
    ]
    .into_iter()
    .collect()
});

static COMMON_ADVERBS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "not", "very", "really", "quite", "rather", "too", "also", "just", "only", "even",
        "still", "never", "always", "often", "sometimes", "usually", "perhaps", "maybe",
        "possibly", "probably", "here", "there", "now", "then", "soon", "already",
    ]
    .into_iter()
    .collect()
});

static MARKERS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "that", "because", "although", "though", "whereas", "unless", "until", "while", "since",
        "if", "when",
    ]
    .into_iter()
    .collect()
});

static COORDINATORS: Lazy<HashSet<&'static str>> =
    Lazy::new(|| ["and", "but", "or", "nor", "yet", "so"].into_iter().collect());

fn pos_tag(word: &str) -> PosTag {
    let lower = word.to_ascii_lowercase();
    if lower.chars().all(|c| c.is_ascii_digit()) {
        return PosTag::Numeral;
    }
    if AUXILIARIES.contains(lower.as_str()) {
        return PosTag::Verb;
    }
    if DETERMINERS.contains(lower.as_str()) {
        return PosTag::Determiner;
    }
    if ADPOSITIONS.contains(lower.as_str()) {
        return PosTag::Adposition;
    }
    if PRONOUNS.contains(lower.as_str()) {
        return PosTag::Pronoun;
    }
    if CONJUNCTIONS.contains(lower.as_str()) {
        return PosTag::Conjunction;
    }
    if COMMON_ADVERBS.contains(lower.as_str()) {
        return PosTag::Adverb;
    }
    if lower.len() > 3 && lower.ends_with("ly") {
        return PosTag::Adverb;
    }
    if lower.len() > 4 && (lower.ends_with("ing") || lower.ends_with("ed")) {
        return PosTag::Verb;
    }
    if lower.len() > 4
        && ["ize", "ise", "ify"].iter().any(|s| lower.ends_with(s))
    {
        return PosTag::Verb;
    }
    if [
        "tion", "sion", "ment", "ness", "ity", "ism", "ology", "ance", "ence", "ship", "hood",
        "dom",
    ]
    .iter()
    .any(|s| lower.ends_with(s))
    {
        return PosTag::Noun;
    }
    if [
        "ous", "ive", "able", "ible", "ful", "less", "ish", "ical", "al", "ary",
    ]
    .iter()
    .any(|s| lower.ends_with(s))
    {
        return PosTag::Adjective;
    }
    if word.chars().next().is_some_and(|c| c.is_uppercase()) {
        return PosTag::ProperNoun;
    }
    PosTag::Noun
}

fn dep_label(word: &str) -> DepLabel {
    let lower = word.to_ascii_lowercase();
    if MARKERS.contains(lower.as_str()) {
        DepLabel::Mark
    } else if COORDINATORS.contains(lower.as_str()) {
        DepLabel::Cc
    } else {
        DepLabel::Other
    }
}

/// Deterministic rule-based annotation provider.
#[derive(Debug, Default)]
pub struct RuleAnnotator;

impl RuleAnnotator {
    pub fn new() -> Self {
        Self
    }
}

impl AnnotationProvider for RuleAnnotator {
    fn annotate(&self, paragraph_text: &str) -> Result<ParagraphAnnotations, AnnotationError> {
        let mut tokens = Vec::new();
        for (start, segment) in paragraph_text.split_word_bound_indices() {
            if !segment.chars().any(char::is_alphanumeric) {
                continue;
            }
            tokens.push(TokenAnnotation {
                start,
                end: start + segment.len(),
                lemma: lemmatize(segment),
                pos: pos_tag(segment),
                dep: dep_label(segment),
                is_stop: is_function_word(segment),
            });
        }

        let mut sentence_boundaries = Vec::new();
        let bytes = paragraph_text.as_bytes();
        for (i, &b) in bytes.iter().enumerate() {
            if matches!(b, b'.' | b'!' | b'?') && bytes.get(i + 1).map_or(true, |&n| n == b' ' || n == b'\n') {
                sentence_boundaries.push(i + 1);
            }
        }
        if sentence_boundaries.last() != Some(&paragraph_text.len()) && !paragraph_text.is_empty() {
            sentence_boundaries.push(paragraph_text.len());
        }

        Ok(ParagraphAnnotations {
            tokens,
            sentence_boundaries,
        })
    }
}

/// Annotation adapter: run the provider over a segmented paragraph and align
/// its token annotations to the segmenter's tokens by span. The segmenter's
/// sentence boundaries stay canonical; tokens the provider did not cover get
/// conservative fallback annotations rather than failing the paragraph.
pub fn build_paragraph(
    provider: &dyn AnnotationProvider,
    seg: crate::segmenter::SegmentedParagraph,
    resolver: std::sync::Arc<crate::position::PositionResolver>,
) -> Result<crate::document::ProcessedParagraph, AnnotationError> {
    use crate::document::{ProcessedParagraph, Sentence, Token};
    use std::collections::HashMap as Map;

    let annotations = provider.annotate(&seg.analysis)?;
    let by_start: Map<usize, &TokenAnnotation> =
        annotations.tokens.iter().map(|t| (t.start, t)).collect();

    let mut tokens = Vec::with_capacity(seg.tokens.len());
    for &(ts, te) in &seg.tokens {
        let text = seg.analysis[ts..te].to_string();
        let token = match by_start.get(&ts) {
            Some(ann) => Token {
                lemma: ann.lemma.clone(),
                pos: ann.pos,
                dep: ann.dep,
                is_stop: ann.is_stop,
                span: seg.offsets.span_of(ts, te),
                local: (ts, te),
                text,
            },
            None => Token {
                lemma: text.to_ascii_lowercase(),
                pos: PosTag::Other,
                dep: DepLabel::Other,
                is_stop: is_function_word(&text),
                span: seg.offsets.span_of(ts, te),
                local: (ts, te),
                text,
            },
        };
        tokens.push(token);
    }

    let mut sentences = Vec::with_capacity(seg.sentences.len());
    let mut cursor = 0;
    for &(ss, se) in &seg.sentences {
        let first = cursor;
        while cursor < tokens.len() && tokens[cursor].local.1 <= se {
            cursor += 1;
        }
        sentences.push(Sentence {
            span: seg.offsets.span_of(ss, se),
            local: (ss, se),
            token_range: (first, cursor),
        });
    }

    let text = seg.span.slice(resolver.original()).to_string();
    Ok(ProcessedParagraph {
        index: seg.index,
        span: seg.span,
        text,
        analysis: seg.analysis,
        offsets: seg.offsets,
        sentences,
        tokens,
        citation_regions: seg.citation_regions,
        section: seg.section,
        resolver,
    })
}
