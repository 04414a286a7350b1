//! CycloneDX document parsing.
//!
//! Each input is independent text, so a batch is parsed in parallel; the
//! merge itself then runs as a single sequential pass over the parsed
//! documents. Parsing is the only fatal stage: one malformed document fails
//! the whole batch atomically, identifying the offending input by label.

mod cyclonedx;

pub use cyclonedx::{
    RawAffects, RawComponent, RawDependency, RawDocument, RawLicense, RawLicenseChoice,
    RawMetadata, RawMetadataComponent, RawProperty, RawRating, RawVulnerability, PATH_PROPERTY,
};

use crate::error::{ParseErrorKind, Result, UnifyError};
use rayon::prelude::*;
use std::path::Path;

/// Maximum SBOM document size (256 MB). Larger inputs are rejected rather
/// than buffered.
const MAX_DOCUMENT_SIZE: u64 = 256 * 1024 * 1024;

/// Parse a single CycloneDX JSON document.
///
/// The label (file name or positional) is attached to the document and to
/// any error raised. A document whose `bomFormat` is present but not
/// `CycloneDX` still parses, with a warning; only input that is not a JSON
/// object of the expected shape fails.
pub fn parse_document(label: &str, content: &str) -> Result<RawDocument> {
    let trimmed = content.trim_start();
    if !trimmed.starts_with('{') {
        return Err(UnifyError::parse(
            label,
            ParseErrorKind::UnknownFormat("expected a JSON object".to_string()),
        ));
    }

    let mut doc: RawDocument = serde_json::from_str(content)
        .map_err(|e| UnifyError::parse(label, ParseErrorKind::InvalidJson(e.to_string())))?;

    if let Some(format) = &doc.bom_format {
        if !format.eq_ignore_ascii_case("cyclonedx") {
            tracing::warn!(
                document = label,
                format = %format,
                "bomFormat is not CycloneDX; merging anyway"
            );
        }
    }

    doc.label = label.to_string();

    tracing::info!(
        document = label,
        components = doc.components.len(),
        dependency_records = doc.dependencies.len(),
        "parsed CycloneDX document"
    );

    Ok(doc)
}

/// Parse a batch of documents in parallel.
///
/// Inputs are labeled positionally (`document #1`, `document #2`, ...).
/// If any input fails, the first failure in input order is returned and no
/// partial batch is produced.
pub fn parse_documents<S: AsRef<str> + Sync>(contents: &[S]) -> Result<Vec<RawDocument>> {
    let results: Vec<Result<RawDocument>> = contents
        .par_iter()
        .enumerate()
        .map(|(idx, text)| parse_document(&format!("document #{}", idx + 1), text.as_ref()))
        .collect();

    let mut documents = Vec::with_capacity(results.len());
    for result in results {
        documents.push(result?);
    }
    Ok(documents)
}

/// Read and parse a document from a file, labeled with the file name.
pub fn parse_document_file(path: &Path) -> Result<RawDocument> {
    let metadata = std::fs::metadata(path).map_err(|e| UnifyError::io(path, e))?;
    if metadata.len() > MAX_DOCUMENT_SIZE {
        let label = path.display().to_string();
        return Err(UnifyError::parse(
            label,
            ParseErrorKind::TooLarge(format!(
                "{} MB exceeds the {} MB limit",
                metadata.len() / (1024 * 1024),
                MAX_DOCUMENT_SIZE / (1024 * 1024),
            )),
        ));
    }

    let content = std::fs::read_to_string(path).map_err(|e| UnifyError::io(path, e))?;
    let label = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
    parse_document(&label, &content)
}
