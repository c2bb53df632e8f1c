//! Error types and handling
//!
//! This module contains the crate-wide error type shared by the generation and
//! extraction pipelines. Structural problems (bad configuration, missing input,
//! unparseable rows) are fatal and surface here; data-content anomalies such as
//! unmatched door-open events never do.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::config::{ConfigError, ConfigValidationError};

/// Errors that can occur while generating or reconstructing episodes
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Configuration could not be loaded
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Configuration was loaded but failed validation
    #[error("Configuration validation failed: {0}")]
    Validation(#[from] ConfigValidationError),

    /// Referenced input file does not exist
    #[error("Input file {} not found.", .0.display())]
    InputNotFound(PathBuf),

    /// A timestamp in the event table could not be parsed
    #[error("Malformed timestamp '{value}' in data row {row}")]
    MalformedTimestamp {
        /// 1-based data row (header excluded)
        row: usize,
        /// The raw field text
        value: String,
    },

    /// A non-timestamp field in the event table could not be interpreted
    #[error("Malformed value '{value}' for column '{column}' in data row {row}")]
    MalformedField {
        /// 1-based data row (header excluded)
        row: usize,
        /// Column header name
        column: &'static str,
        /// The raw field text
        value: String,
    },

    /// Scenario sampling or lookup failed
    #[error("Scenario error: {0}")]
    ScenarioError(String),

    /// Episode synthesis failed
    #[error("Event generation failed: {0}")]
    GenerationError(String),

    /// I/O error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Delimited-file read or write error
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}

impl PipelineError {
    /// Create a scenario error
    pub fn scenario_error(msg: impl Into<String>) -> Self {
        Self::ScenarioError(msg.into())
    }

    /// Create an event generation error
    pub fn generation_error(msg: impl Into<String>) -> Self {
        Self::GenerationError(msg.into())
    }

    /// Get the error category
    pub fn category(&self) -> &'static str {
        match self {
            PipelineError::Config(_) | PipelineError::Validation(_) => "Configuration",
            PipelineError::InputNotFound(_) => "Missing Input",
            PipelineError::MalformedTimestamp { .. } | PipelineError::MalformedField { .. } => {
                "Malformed Input"
            }
            PipelineError::ScenarioError(_) => "Scenario",
            PipelineError::GenerationError(_) => "Event Generation",
            PipelineError::IoError(_) => "IO",
            PipelineError::CsvError(_) => "CSV",
        }
    }
}

/// Result type for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;
