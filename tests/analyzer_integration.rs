//! End-to-end properties of the full analysis pipeline.

use tokio_util::sync::CancellationToken;

use lucidity::annotate::{AnnotationProvider, ParagraphAnnotations, RuleAnnotator};
use lucidity::error::AnnotationError;
use lucidity::{AnalysisError, Analyzer, Config, FlagType, Level};

fn analyzer() -> Analyzer<RuleAnnotator> {
    Analyzer::with_default_provider()
}

#[test]
fn test_circular_freedom_flagged() {
    let result = analyzer()
        .analyze(
            "Freedom is the state of being free from oppression.",
            &Config::default(),
        )
        .unwrap();
    let circular: Vec<_> = result
        .flags()
        .filter(|f| f.flag_type == FlagType::Circular)
        .collect();
    assert!(!circular.is_empty());
    assert_eq!(circular[0].term, "Freedom");
}

#[test]
fn test_circular_management_not_flagged() {
    let result = analyzer()
        .analyze(
            "Management is the organized handling of resources.",
            &Config::default(),
        )
        .unwrap();
    assert_eq!(
        result
            .flags()
            .filter(|f| f.flag_type == FlagType::Circular)
            .count(),
        0
    );
}

#[test]
fn test_causal_with_citation_suppressed() {
    let result = analyzer()
        .analyze(
            "Social media causes depression in teenagers (Smith, 2023).",
            &Config::default(),
        )
        .unwrap();
    assert_eq!(
        result
            .flags()
            .filter(|f| f.flag_type == FlagType::UnsupportedCausal)
            .count(),
        0
    );
}

#[test]
fn test_causal_without_citation_exactly_one() {
    let result = analyzer()
        .analyze(
            "Social media causes depression in teenagers.",
            &Config::default(),
        )
        .unwrap();
    assert_eq!(
        result
            .flags()
            .filter(|f| f.flag_type == FlagType::UnsupportedCausal)
            .count(),
        1
    );
}

#[test]
fn test_hedge_stack_exactly_one_flag_for_clause() {
    let result = analyzer()
        .analyze(
            "It could perhaps possibly maybe be argued that the reform succeeded.",
            &Config::default(),
        )
        .unwrap();
    assert_eq!(
        result
            .flags()
            .filter(|f| f.flag_type == FlagType::HedgeStack)
            .count(),
        1
    );
}

#[test]
fn test_every_flag_span_within_paragraph_and_input() {
    let text = "In today's society, experts believe social media causes harm. \
        It could perhaps possibly maybe be true.\n\n\
        Freedom is the state of being free. Around 80% of users report stress.\n\n\
        The committee reviewed the annual budget without incident.";
    let result = analyzer().analyze(text, &Config::default()).unwrap();
    assert!(result.summary.flag_count > 0);
    for paragraph in &result.paragraphs {
        for flag in &paragraph.flags {
            assert!(
                paragraph.span.contains(&flag.span),
                "flag span {:?} outside paragraph span {:?}",
                flag.span,
                paragraph.span
            );
            assert!(flag.span.end <= text.len());
            assert!(flag.span.start < flag.span.end, "zero-width span");
        }
    }
}

#[test]
fn test_flag_span_round_trips_through_position_resolver() {
    // CRLF line endings and markup force real offset remapping.
    let text = "# Report\r\n\r\nIn today's society, things went wrong.\r\n\r\nFreedom is the state of being free.";
    let result = analyzer().analyze(text, &Config::default()).unwrap();
    assert!(result.summary.flag_count > 0);

    for flag in result.flags() {
        // Slicing the original at the span reproduces the term.
        assert_eq!(&text[flag.span.start..flag.span.end], flag.term);

        // Resolving to (line, column) and slicing the line reproduces it too.
        let line_text = text.split(['\n']).nth(flag.line - 1).unwrap().trim_end_matches('\r');
        let col_chars: Vec<char> = line_text.chars().collect();
        let from_line: String = col_chars[flag.column - 1..].iter().collect();
        assert!(
            from_line.starts_with(&flag.term),
            "line {} column {} does not start with {:?}",
            flag.line,
            flag.column,
            flag.term
        );
    }
}

#[test]
fn test_density_bounded_and_empty_paragraph_safe() {
    let text = "# Heading Only\n\nNormal prose describing the measurement protocol in detail.";
    let result = analyzer().analyze(text, &Config::default()).unwrap();
    for paragraph in &result.paragraphs {
        assert!((0.0..=1.0).contains(&paragraph.density));
    }
    assert!((0.0..=1.0).contains(&result.summary.density));
    // header-only paragraph: zero tokens, density 0.0, no flags, no error
    assert_eq!(result.paragraphs[0].word_count, 0);
    assert_eq!(result.paragraphs[0].density, 0.0);
    assert!(result.paragraphs[0].flags.is_empty());
}

#[test]
fn test_document_density_is_token_weighted_mean() {
    let text = "Tiny vague stuff.\n\n\
        The instrumentation recorded seventeen distinct spectral measurements across \
        four calibrated channels, each sampled at microsecond resolution throughout \
        the continuous observation window spanning the entire experiment.";
    let result = analyzer().analyze(text, &Config::default()).unwrap();
    assert_eq!(result.paragraphs.len(), 2);

    let p0 = &result.paragraphs[0];
    let p1 = &result.paragraphs[1];
    assert_ne!(p0.word_count, p1.word_count, "fixture must be unequal");

    let weighted = (p0.density * p0.word_count as f64 + p1.density * p1.word_count as f64)
        / (p0.word_count + p1.word_count) as f64;
    let unweighted = (p0.density + p1.density) / 2.0;

    assert!((result.summary.density - weighted).abs() < 1e-9);
    assert!((result.summary.density - unweighted).abs() > 1e-9);
}

#[test]
fn test_determinism_sequential_and_parallel() {
    let text = "In today's society, experts believe social media causes harm.\n\n\
        Freedom is the state of being free from oppression.\n\n\
        It could perhaps possibly maybe be argued that 80% of the largest firms failed.\n\n\
        The committee reviewed the annual budget without incident.";
    let config = Config::with_level(Level::Strict);
    let a = analyzer();

    let first = serde_json::to_string(&a.analyze(text, &config).unwrap()).unwrap();
    let second = serde_json::to_string(&a.analyze(text, &config).unwrap()).unwrap();
    assert_eq!(first, second);

    let parallel =
        serde_json::to_string(&a.analyze_parallel(text, &config, Some(3)).unwrap()).unwrap();
    assert_eq!(first, parallel);
}

#[test]
fn test_flag_ordering_detector_order_then_span_start() {
    // Filler is declared last; vagueness first. Within a paragraph the
    // filler flag must sort after vagueness flags even though it occurs
    // earlier in the text.
    let text = "In today's world, many things remain unclear.";
    let result = analyzer().analyze(text, &Config::default()).unwrap();
    let flags = &result.paragraphs[0].flags;
    let vague_positions: Vec<usize> = flags
        .iter()
        .enumerate()
        .filter(|(_, f)| f.flag_type == FlagType::Underspecified)
        .map(|(i, _)| i)
        .collect();
    let filler_positions: Vec<usize> = flags
        .iter()
        .enumerate()
        .filter(|(_, f)| f.flag_type == FlagType::Filler)
        .map(|(i, _)| i)
        .collect();
    assert!(!vague_positions.is_empty());
    assert!(!filler_positions.is_empty());
    assert!(vague_positions.iter().max() < filler_positions.iter().min());

    // Within one detector, flags are ordered by span start.
    for pair in flags
        .iter()
        .filter(|f| f.flag_type == FlagType::Underspecified)
        .collect::<Vec<_>>()
        .windows(2)
    {
        assert!(pair[0].span.start <= pair[1].span.start);
    }
}

/// Provider that fails on paragraphs containing a marker string.
struct FailingProvider {
    inner: RuleAnnotator,
}

impl AnnotationProvider for FailingProvider {
    fn annotate(&self, paragraph_text: &str) -> Result<ParagraphAnnotations, AnnotationError> {
        if paragraph_text.contains("POISON") {
            return Err(AnnotationError("simulated model failure".to_string()));
        }
        self.inner.annotate(paragraph_text)
    }
}

#[test]
fn test_annotation_failure_degrades_only_that_paragraph() {
    let analyzer = Analyzer::new(FailingProvider {
        inner: RuleAnnotator::new(),
    });
    let text = "The first paragraph reads normally and mentions many things.\n\n\
        This POISON paragraph will fail annotation entirely.\n\n\
        The third paragraph also reads normally.";
    let result = analyzer.analyze(text, &Config::default()).unwrap();

    assert_eq!(result.paragraphs.len(), 3);
    let degraded = &result.paragraphs[1];
    assert!(degraded.degraded);
    assert_eq!(degraded.density, 0.0);
    assert!(degraded.flags.is_empty());
    assert_eq!(result.summary.degraded_paragraph_count, 1);

    // neighbors analyzed normally
    assert!(!result.paragraphs[0].degraded);
    assert!(!result.paragraphs[2].degraded);
    assert!(result.paragraphs[0].flags.iter().any(|f| f.term == "things"));
}

#[test]
fn test_configuration_error_is_fatal_before_analysis() {
    let mut config = Config::default();
    config.grade_bands.edges = [0.9, 0.4, 0.6, 0.8];
    let err = analyzer().analyze("Valid text here.", &config).unwrap_err();
    assert!(matches!(err, AnalysisError::Config(_)));
}

#[test]
fn test_cancellation_between_paragraphs() {
    let cancel = CancellationToken::new();
    cancel.cancel();
    let err = analyzer()
        .analyze_with_cancel("Some text here.", &Config::default(), &cancel)
        .unwrap_err();
    assert!(matches!(err, AnalysisError::Cancelled));
}

#[test]
fn test_overall_suggestions_from_flag_frequencies() {
    let causal_heavy = "Smoking causes cancer. Stress causes illness. Noise causes fatigue.";
    let result = analyzer().analyze(causal_heavy, &Config::default()).unwrap();
    assert!(result
        .overall_suggestions
        .iter()
        .any(|s| s.contains("causal claim")));
    assert_eq!(result.summary.suggestion_count, result.overall_suggestions.len());
}

#[test]
fn test_grade_band_override() {
    let mut config = Config::default();
    config.grade_bands.edges = [0.01, 0.02, 0.03, 0.04];
    let result = analyzer()
        .analyze(
            "The calibrated spectrometer recorded seventeen distinct measurements.",
            &config,
        )
        .unwrap();
    assert_eq!(result.summary.density_grade, "crystalline");
}

#[test]
fn test_json_output_is_serializable() {
    let result = analyzer()
        .analyze("Plain text for serialization.", &Config::default())
        .unwrap();
    let json = serde_json::to_value(&result).unwrap();
    assert!(json.get("summary").is_some());
    assert!(json.get("paragraphs").is_some());
    assert_eq!(
        json["input_length"].as_u64().unwrap() as usize,
        "Plain text for serialization.".len()
    );
}
