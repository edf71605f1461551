pub mod analyzer;
pub mod annotate;
pub mod config;
pub mod density;
pub mod detectors;
pub mod document;
pub mod error;
pub mod parallel;
pub mod position;
pub mod result;
pub mod segmenter;
pub mod span;

// Re-export main types for convenient access
pub use analyzer::{Analyzer, MAX_INPUT_CHARS};
pub use annotate::{AnnotationProvider, ParagraphAnnotations, RuleAnnotator, TokenAnnotation};
pub use config::{Config, ConfigurationError, GradeBands, Level};
pub use error::{AnalysisError, AnnotationError, DetectorError};
pub use result::{AnalysisResult, Flag, FlagType, ParagraphResult, Severity, Summary};
pub use span::Span;
