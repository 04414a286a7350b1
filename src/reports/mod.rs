//! Report generation over the unified model.
//!
//! Two output formats:
//! - JSON: structured data for programmatic integration
//! - Summary: compact, human-readable shell output
//!
//! Reporters consume the model plus a (possibly filtered) component view and
//! depend only on the model's public fields.

mod json;
mod summary;

pub use json::JsonReporter;
pub use summary::SummaryReporter;

use crate::model::{Component, UnifiedModel};
use std::io::Write;
use thiserror::Error;

/// Errors that can occur during report generation
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    SerializationError(String),
}

/// Output formats supported by the report generators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Json,
    Summary,
}

/// Trait for report generators over the unified model.
///
/// `components` is the view to report on — typically the output of
/// [`FilterSpec::apply`](crate::filter::FilterSpec::apply), or all of
/// `model.components` for an unfiltered report.
pub trait ModelReporter {
    /// Generate a report for the given component view
    fn generate(
        &self,
        model: &UnifiedModel,
        components: &[&Component],
    ) -> Result<String, ReportError>;

    /// Write a report to a writer
    fn write_report(
        &self,
        model: &UnifiedModel,
        components: &[&Component],
        writer: &mut dyn Write,
    ) -> Result<(), ReportError> {
        let report = self.generate(model, components)?;
        writer.write_all(report.as_bytes())?;
        Ok(())
    }

    /// Get the format this generator produces
    fn format(&self) -> ReportFormat;
}
