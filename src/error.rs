//! Error types for the analysis entry points.
//!
//! Only configuration and input-validation problems are fatal to a call;
//! annotation and detector failures degrade at paragraph/detector
//! granularity inside the analyzer instead of surfacing here.

use thiserror::Error;

use crate::config::ConfigurationError;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Config(#[from] ConfigurationError),

    #[error("invalid input: {0}")]
    Validation(String),

    #[error("analysis cancelled")]
    Cancelled,
}

/// Failure from an annotation provider for a single paragraph. Recovered at
/// paragraph granularity, never fatal to the call.
#[derive(Debug, Clone, Error)]
#[error("annotation failed: {0}")]
pub struct AnnotationError(pub String);

/// Failure inside one detector for one paragraph. Isolated per detector and
/// recorded as a structured diagnostic.
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct DetectorError(pub String);
