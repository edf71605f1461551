//! Optional parallel analysis across a bounded worker pool.
//!
//! Paragraph processing is embarrassingly parallel: pure functions over
//! immutable input. Workers claim paragraph slots through an atomic cursor;
//! outcomes land in per-index slots and aggregation runs sequentially
//! afterwards, so the result is byte-identical to the sequential path no
//! matter how the scheduler interleaves workers.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::analyzer::{aggregate, Analyzer, ParagraphOutcome};
use crate::annotate::AnnotationProvider;
use crate::config::Config;
use crate::error::AnalysisError;
use crate::result::AnalysisResult;
use crate::segmenter::SegmentedParagraph;

impl<P: AnnotationProvider + Sync> Analyzer<P> {
    /// Parallel variant of [`Analyzer::analyze`]. `workers` bounds the pool;
    /// `None` uses the machine's logical CPU count.
    pub fn analyze_parallel(
        &self,
        text: &str,
        config: &Config,
        workers: Option<usize>,
    ) -> Result<AnalysisResult, AnalysisError> {
        self.analyze_parallel_with_cancel(text, config, workers, &CancellationToken::new())
    }

    pub fn analyze_parallel_with_cancel(
        &self,
        text: &str,
        config: &Config,
        workers: Option<usize>,
        cancel: &CancellationToken,
    ) -> Result<AnalysisResult, AnalysisError> {
        config.validate()?;
        crate::analyzer::validate_input(text)?;

        let doc = self.segmenter().segment(text);
        let resolver = doc.resolver.clone();
        let input_length = doc.input_length;

        let selected: Vec<SegmentedParagraph> = doc
            .paragraphs
            .into_iter()
            .filter(|p| crate::analyzer::section_selected(config, p.section.as_deref()))
            .collect();

        let worker_count = workers
            .unwrap_or_else(num_cpus::get)
            .clamp(1, selected.len().max(1));
        debug!(paragraphs = selected.len(), workers = worker_count, "parallel analysis");

        let slots: Vec<Mutex<Option<SegmentedParagraph>>> =
            selected.into_iter().map(|p| Mutex::new(Some(p))).collect();
        let outcomes: Vec<Mutex<Option<ParagraphOutcome>>> =
            (0..slots.len()).map(|_| Mutex::new(None)).collect();
        let cursor = AtomicUsize::new(0);

        std::thread::scope(|scope| {
            for _ in 0..worker_count {
                scope.spawn(|| loop {
                    if cancel.is_cancelled() {
                        break;
                    }
                    let index = cursor.fetch_add(1, Ordering::Relaxed);
                    if index >= slots.len() {
                        break;
                    }
                    let seg = slots[index]
                        .lock()
                        .expect("slot lock poisoned")
                        .take()
                        .expect("each slot is claimed exactly once");
                    let outcome = self.process_paragraph(seg, resolver.clone(), config);
                    *outcomes[index].lock().expect("outcome lock poisoned") = Some(outcome);
                });
            }
        });

        if cancel.is_cancelled() {
            return Err(AnalysisError::Cancelled);
        }

        let ordered: Vec<ParagraphOutcome> = outcomes
            .into_iter()
            .map(|slot| {
                slot.into_inner()
                    .expect("outcome lock poisoned")
                    .expect("all slots filled when not cancelled")
            })
            .collect();

        Ok(aggregate(ordered, input_length, config))
    }
}
