//! **Merge CycloneDX SBOMs into a unified dependency model.**
//!
//! `sbom-unify` ingests one or more CycloneDX (JSON) Software Bills of
//! Materials and produces a single merged model: a deduplicated component
//! registry, a direct/transitive dependency classification, and any
//! vulnerability annotations embedded in the input. Table, graph, and tree
//! views consume the model as-is — this crate is the shared input they all
//! depend on, with no rendering of its own.
//!
//! ## Key Features
//!
//! - **Multi-document merge**: components with the same identity collapse to
//!   one entry; scalar fields take the first occurrence, dependency edges
//!   take the union across all documents.
//! - **Root inference**: components that are nobody's dependency target are
//!   roots; their immediate dependencies are classified direct, everything
//!   else transitive.
//! - **Graceful degradation**: missing optional fields default ("Unknown"
//!   license, empty dependency list); dangling dependency edges are kept and
//!   resolve to nothing without failing the merge.
//! - **Filtering and reporting**: [`FilterSpec`] derives component views
//!   (free-text, direct/transitive, severity, CVE id), and the
//!   [`reports`] module serializes the model to JSON or a shell summary.
//!
//! ## Getting Started
//!
//! ```
//! use sbom_unify::unify;
//!
//! let doc = r#"{
//!     "bomFormat": "CycloneDX",
//!     "specVersion": "1.5",
//!     "metadata": {"component": {"name": "demo-app"}},
//!     "components": [
//!         {"bom-ref": "app", "type": "application", "name": "app", "version": "1.0"},
//!         {"bom-ref": "lib", "type": "library", "name": "lib", "version": "2.0"}
//!     ],
//!     "dependencies": [{"ref": "app", "dependsOn": ["lib"]}]
//! }"#;
//!
//! let model = unify(&[doc])?;
//! assert_eq!(model.project_name, "demo-app");
//! assert_eq!(model.total_components, 2);
//! assert_eq!(model.direct_count, 2); // app is a root, lib is one hop away
//! # Ok::<(), sbom_unify::UnifyError>(())
//! ```
//!
//! ## Filtering a Model
//!
//! ```
//! use sbom_unify::{unify, DependencyKind, FilterSpec};
//!
//! # let doc = r#"{
//! #     "components": [
//! #         {"bom-ref": "app", "type": "application", "name": "app", "version": "1.0"},
//! #         {"bom-ref": "lib", "type": "library", "name": "lib", "version": "2.0"},
//! #         {"bom-ref": "sub", "type": "library", "name": "sub", "version": "0.1"}
//! #     ],
//! #     "dependencies": [
//! #         {"ref": "app", "dependsOn": ["lib"]},
//! #         {"ref": "lib", "dependsOn": ["sub"]}
//! #     ]
//! # }"#;
//! let model = unify(&[doc])?;
//!
//! let transitive = FilterSpec::new().with_kind(DependencyKind::Transitive);
//! let view = transitive.apply(&model);
//! assert_eq!(view.len(), 1);
//! assert_eq!(view[0].name, "sub");
//! # Ok::<(), sbom_unify::UnifyError>(())
//! ```
//!
//! ## Error Model
//!
//! Only parse-time structural failures are fatal: one malformed document
//! fails the whole batch with [`UnifyError::Parse`] identifying the input,
//! and no partial model is returned. Everything after parsing degrades
//! gracefully — the model is always renderable once parsing succeeds.

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(
    // Doc completeness: # Errors / # Panics sections are aspirational
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod error;
pub mod filter;
pub mod merge;
pub mod model;
pub mod parsers;
pub mod reports;

// Re-export main types for convenience
pub use error::{ErrorContext, OptionContext, ParseErrorKind, Result, UnifyError};
pub use filter::{DependencyKind, FilterSpec};
pub use merge::MergeEngine;
pub use model::{
    Component, ComponentId, ComponentType, ModelIndex, Severity, SeverityCounts, UnifiedModel,
    Vulnerability,
};
pub use parsers::{parse_document, parse_document_file, parse_documents, RawDocument};
pub use reports::{JsonReporter, ModelReporter, ReportError, ReportFormat, SummaryReporter};

/// Parse a batch of CycloneDX JSON texts and merge them into one model.
///
/// Documents are parsed in parallel and merged in input order (processing
/// order determines the "first occurrence wins" tie-breaks). Fails
/// atomically if any input cannot be parsed.
pub fn unify<S: AsRef<str> + Sync>(documents: &[S]) -> Result<UnifiedModel> {
    let parsed = parsers::parse_documents(documents)?;
    Ok(MergeEngine::new().merge(&parsed))
}
