//! Analysis orchestration: validate, segment, annotate, detect, score,
//! aggregate. The annotation provider is injected by the caller and owned
//! for the analyzer's lifetime; each call is stateless relative to other
//! calls and shares nothing with them.

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::annotate::{build_paragraph, AnnotationProvider, RuleAnnotator};
use crate::config::Config;
use crate::density::{concept_count, density};
use crate::detectors::{default_detectors, Detector};
use crate::document::Token;
use crate::error::AnalysisError;
use crate::result::{
    AnalysisResult, Diagnostic, Flag, FlagType, ParagraphResult, Summary,
};
use crate::segmenter::{SegmentedParagraph, Segmenter};

/// Inputs above this many characters are rejected before segmentation.
pub const MAX_INPUT_CHARS: usize = 10_000_000;

/// Per-paragraph processing output, before aggregation.
pub(crate) struct ParagraphOutcome {
    pub result: ParagraphResult,
    pub diagnostics: Vec<Diagnostic>,
    pub tokens: Vec<Token>,
}

/// Main entry point for text analysis.
pub struct Analyzer<P: AnnotationProvider> {
    provider: P,
    detectors: Vec<Box<dyn Detector>>,
    segmenter: Segmenter,
}

impl Analyzer<RuleAnnotator> {
    /// Analyzer over the bundled rule-based annotation provider.
    pub fn with_default_provider() -> Self {
        Self::new(RuleAnnotator::new())
    }
}

impl Default for Analyzer<RuleAnnotator> {
    fn default() -> Self {
        Self::with_default_provider()
    }
}

impl<P: AnnotationProvider> Analyzer<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            detectors: default_detectors(),
            segmenter: Segmenter::new(),
        }
    }

    pub(crate) fn segmenter(&self) -> &Segmenter {
        &self.segmenter
    }

    /// Analyze `text` under `config`. Pure with respect to the inputs:
    /// identical input and configuration yield byte-identical results.
    pub fn analyze(&self, text: &str, config: &Config) -> Result<AnalysisResult, AnalysisError> {
        self.analyze_with_cancel(text, config, &CancellationToken::new())
    }

    /// Like [`Self::analyze`], checking the cooperative token between
    /// paragraphs. Cancellation aborts the whole call.
    pub fn analyze_with_cancel(
        &self,
        text: &str,
        config: &Config,
        cancel: &CancellationToken,
    ) -> Result<AnalysisResult, AnalysisError> {
        config.validate()?;
        validate_input(text)?;

        info!(input_length = text.len(), level = config.level.as_str(), "starting analysis");

        let doc = self.segmenter.segment(text);
        let resolver = doc.resolver.clone();

        let mut outcomes = Vec::new();
        for seg in doc.paragraphs {
            if cancel.is_cancelled() {
                return Err(AnalysisError::Cancelled);
            }
            if !section_selected(config, seg.section.as_deref()) {
                continue;
            }
            outcomes.push(self.process_paragraph(seg, resolver.clone(), config));
        }

        Ok(aggregate(outcomes, doc.input_length, config))
    }

    /// Segment-annotate-detect for one paragraph. Annotation failure
    /// degrades the paragraph; a detector failure is isolated and recorded.
    pub(crate) fn process_paragraph(
        &self,
        seg: SegmentedParagraph,
        resolver: std::sync::Arc<crate::position::PositionResolver>,
        config: &Config,
    ) -> ParagraphOutcome {
        let index = seg.index;
        let span = seg.span;
        let word_count = seg.tokens.len();
        let sentence_count = seg.sentences.len();
        let text = span.slice(resolver.original()).to_string();

        let paragraph = match build_paragraph(&self.provider, seg, resolver) {
            Ok(p) => p,
            Err(err) => {
                warn!(paragraph = index, error = %err, "annotation failed, degrading paragraph");
                return ParagraphOutcome {
                    result: ParagraphResult {
                        index,
                        text,
                        span,
                        density: 0.0,
                        flags: Vec::new(),
                        word_count,
                        sentence_count,
                        degraded: true,
                    },
                    diagnostics: Vec::new(),
                    tokens: Vec::new(),
                };
            }
        };

        let mut diagnostics = Vec::new();
        let mut ordered: Vec<(usize, Flag)> = Vec::new();
        for (detector_index, detector) in self.detectors.iter().enumerate() {
            match detector.detect(&paragraph, config) {
                Ok(flags) => {
                    ordered.extend(flags.into_iter().map(|f| (detector_index, f)));
                }
                Err(err) => {
                    warn!(
                        paragraph = index,
                        detector = detector.name(),
                        error = %err,
                        "detector failed, continuing without its flags"
                    );
                    diagnostics.push(Diagnostic {
                        paragraph_index: index,
                        detector: detector.name(),
                        message: err.0,
                    });
                }
            }
        }
        // Declared detector order, then left-to-right. Stable regardless of
        // how detection was scheduled.
        ordered.sort_by_key(|(detector_index, flag)| (*detector_index, flag.span.start));
        let flags: Vec<Flag> = ordered.into_iter().map(|(_, f)| f).collect();

        let paragraph_density = density(&paragraph.tokens, &flags, config);
        debug!(
            paragraph = index,
            flags = flags.len(),
            density = paragraph_density,
            "paragraph analyzed"
        );

        ParagraphOutcome {
            result: ParagraphResult {
                index,
                text,
                span,
                density: paragraph_density,
                flags,
                word_count,
                sentence_count,
                degraded: false,
            },
            diagnostics,
            tokens: paragraph.tokens,
        }
    }
}

pub(crate) fn validate_input(text: &str) -> Result<(), AnalysisError> {
    if text.trim().is_empty() {
        return Err(AnalysisError::Validation("text is empty".to_string()));
    }
    let chars = text.chars().count();
    if chars > MAX_INPUT_CHARS {
        return Err(AnalysisError::Validation(format!(
            "text exceeds maximum length of {MAX_INPUT_CHARS} characters (got {chars})"
        )));
    }
    Ok(())
}

pub(crate) fn section_selected(config: &Config, section: Option<&str>) -> bool {
    if config.sections.is_empty() {
        return true;
    }
    section.is_some_and(|title| {
        config
            .sections
            .iter()
            .any(|wanted| wanted.eq_ignore_ascii_case(title))
    })
}

/// Merge per-paragraph outcomes into the document-level result.
pub(crate) fn aggregate(
    outcomes: Vec<ParagraphOutcome>,
    input_length: usize,
    config: &Config,
) -> AnalysisResult {
    let mut paragraphs = Vec::with_capacity(outcomes.len());
    let mut diagnostics = Vec::new();
    let mut all_tokens: Vec<Token> = Vec::new();
    for outcome in outcomes {
        diagnostics.extend(outcome.diagnostics);
        all_tokens.extend(outcome.tokens);
        paragraphs.push(outcome.result);
    }

    // Token-count-weighted mean, not the unweighted mean: long and short
    // paragraphs must not count alike. Degraded paragraphs carry no signal
    // and are left out of the mean entirely.
    let (weighted_sum, weight_total) = paragraphs
        .iter()
        .filter(|p| !p.degraded)
        .fold((0.0, 0usize), |(sum, total), p| {
            (sum + p.density * p.word_count as f64, total + p.word_count)
        });
    let overall_density = if weight_total == 0 {
        0.0
    } else {
        weighted_sum / weight_total as f64
    };

    let flag_count = paragraphs.iter().map(|p| p.flags.len()).sum();
    let word_count: usize = paragraphs.iter().map(|p| p.word_count).sum();
    let sentence_count = paragraphs.iter().map(|p| p.sentence_count).sum();
    let degraded_paragraph_count = paragraphs.iter().filter(|p| p.degraded).count();
    let filler_count = paragraphs
        .iter()
        .flat_map(|p| p.flags.iter())
        .filter(|f| f.flag_type == FlagType::Filler)
        .count();
    let filler_ratio = filler_count as f64 / word_count.max(1) as f64;

    let overall_suggestions = build_suggestions(&paragraphs, overall_density, config);

    let summary = Summary {
        density: overall_density,
        density_grade: config.grade_bands.grade(overall_density),
        flag_count,
        word_count,
        sentence_count,
        paragraph_count: paragraphs.len(),
        concept_count: concept_count(all_tokens.iter()),
        filler_ratio,
        degraded_paragraph_count,
        suggestion_count: overall_suggestions.len(),
    };

    info!(
        density = summary.density,
        grade = summary.density_grade,
        flags = summary.flag_count,
        degraded = summary.degraded_paragraph_count,
        "analysis complete"
    );

    AnalysisResult {
        input_length,
        summary,
        paragraphs,
        overall_suggestions,
        diagnostics,
    }
}

/// Deterministic document-level suggestions from flag-type frequencies.
fn build_suggestions(
    paragraphs: &[ParagraphResult],
    overall_density: f64,
    config: &Config,
) -> Vec<String> {
    let count_of = |flag_type: FlagType| {
        paragraphs
            .iter()
            .flat_map(|p| p.flags.iter())
            .filter(|f| f.flag_type == flag_type)
            .count()
    };

    let mut suggestions = Vec::new();

    let hedge_count = count_of(FlagType::HedgeStack);
    if hedge_count > 3 {
        suggestions.push(format!(
            "Document relies heavily on hedged language ({hedge_count} instances)"
        ));
    }

    if count_of(FlagType::Underspecified) > 5 {
        suggestions.push("Consider specifying the scope in the introduction".to_string());
    }

    let causal_count = count_of(FlagType::UnsupportedCausal);
    if causal_count > 0 {
        suggestions.push(format!("{causal_count} causal claim(s) lack cited evidence"));
    }

    let min_density = config.min_density();
    if overall_density < min_density {
        suggestions.push(format!(
            "Overall density ({overall_density:.2}) is below threshold ({min_density:.2})"
        ));
    }

    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Level;

    #[test]
    fn test_empty_input_rejected() {
        let analyzer = Analyzer::with_default_provider();
        let err = analyzer.analyze("", &Config::default()).unwrap_err();
        assert!(matches!(err, AnalysisError::Validation(_)));
        let err = analyzer.analyze("   \n  ", &Config::default()).unwrap_err();
        assert!(matches!(err, AnalysisError::Validation(_)));
    }

    #[test]
    fn test_invalid_config_rejected_before_analysis() {
        let analyzer = Analyzer::with_default_provider();
        let mut config = Config::default();
        config.penalty_cap = 2.0;
        let err = analyzer.analyze("Fine text here.", &config).unwrap_err();
        assert!(matches!(err, AnalysisError::Config(_)));
    }

    #[test]
    fn test_cancelled_token_aborts() {
        let analyzer = Analyzer::with_default_provider();
        let cancel = CancellationToken::new();
        cancel.cancel();
        let err = analyzer
            .analyze_with_cancel("Some text.", &Config::default(), &cancel)
            .unwrap_err();
        assert!(matches!(err, AnalysisError::Cancelled));
    }

    #[test]
    fn test_section_filter() {
        let analyzer = Analyzer::with_default_provider();
        let text = "# Methods\n\nMethod prose sits here.\n\n# Results\n\nResult prose sits here.";
        let mut config = Config::with_level(Level::Standard);
        config.sections.push("Results".to_string());
        let result = analyzer.analyze(text, &config).unwrap();
        // Only the Results header paragraph and its body survive the filter.
        assert!(result
            .paragraphs
            .iter()
            .all(|p| !p.text.contains("Method prose")));
        assert!(result
            .paragraphs
            .iter()
            .any(|p| p.text.contains("Result prose")));
    }

    #[test]
    fn test_header_only_paragraph_zero_density_no_flags() {
        let analyzer = Analyzer::with_default_provider();
        let result = analyzer
            .analyze("# Just A Header\n\nReal prose follows the header.", &Config::default())
            .unwrap();
        let header_para = &result.paragraphs[0];
        assert_eq!(header_para.density, 0.0);
        assert!(header_para.flags.is_empty());
        assert!(!header_para.degraded);
    }
}
