//! Report rendering and writing.
//!
//! The text report lists every matching heading in result order, each
//! followed by its retained paragraphs numbered from 1:
//!
//! ```text
//! INTRARE: BRAD1
//! --------------------------------------------------
//! Paragraf 1:
//! Padure veche cu brad.
//!
//! ==================================================
//!
//! ```

use std::fmt::Write as _;
use std::path::Path;

use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::{debug, instrument};

use toponymy_shared::{FilteredResult, KeywordSet, ReportConfig, ReportFormat, Result, ToponymyError};

/// Run metadata carried into the JSON report.
#[derive(Debug, Clone)]
pub struct ReportContext {
    /// Where the text came from.
    pub source: String,
    /// SHA-256 of the source text.
    pub source_sha256: String,
    /// Keywords searched for.
    pub keywords: Vec<String>,
    /// Entries found by the segmenter.
    pub entries_scanned: usize,
}

impl ReportContext {
    pub fn new(
        source: impl Into<String>,
        text: &str,
        keywords: &KeywordSet,
        entries_scanned: usize,
    ) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(text.as_bytes());

        Self {
            source: source.into(),
            source_sha256: format!("{:x}", hasher.finalize()),
            keywords: keywords.as_slice().to_vec(),
            entries_scanned,
        }
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    source: &'a str,
    source_sha256: &'a str,
    keywords: &'a [String],
    entries_scanned: usize,
    entries_matched: usize,
    entries: &'a FilteredResult,
}

/// Render the report in the requested format.
pub fn render(
    result: &FilteredResult,
    context: &ReportContext,
    format: ReportFormat,
    layout: &ReportConfig,
) -> Result<String> {
    match format {
        ReportFormat::Text => Ok(render_text(result, layout)),
        ReportFormat::Json => render_json(result, context),
    }
}

/// Numbered plain-text report.
pub fn render_text(result: &FilteredResult, layout: &ReportConfig) -> String {
    let thin_rule = "-".repeat(layout.rule_width);
    let thick_rule = "=".repeat(layout.rule_width);
    let mut out = String::new();

    // Writing to a String cannot fail.
    for entry in result.iter() {
        let _ = writeln!(out, "{}: {}", layout.entry_label, entry.heading);
        let _ = writeln!(out, "{thin_rule}");

        for (i, paragraph) in entry.paragraphs.iter().enumerate() {
            let _ = write!(out, "{} {}:\n{paragraph}\n\n", layout.paragraph_label, i + 1);
        }

        let _ = write!(out, "{thick_rule}\n\n");
    }

    out
}

/// Pretty JSON report; `entries` keeps result order.
pub fn render_json(result: &FilteredResult, context: &ReportContext) -> Result<String> {
    let report = JsonReport {
        source: &context.source,
        source_sha256: &context.source_sha256,
        keywords: &context.keywords,
        entries_scanned: context.entries_scanned,
        entries_matched: result.len(),
        entries: result,
    };

    serde_json::to_string_pretty(&report)
        .map_err(|e| ToponymyError::Serialization(format!("JSON report: {e}")))
}

/// Write the rendered report, replacing any previous file.
///
/// Parent directories are created as needed. The content is written to a
/// sibling temp file first and renamed into place.
#[instrument(skip(content), fields(path = %path.display(), bytes = content.len()))]
pub fn write_report(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| ToponymyError::io(parent, e))?;
    }

    let file_name = path
        .file_name()
        .ok_or_else(|| ToponymyError::validation(format!("{} is not a file path", path.display())))?;
    let temp = path.with_file_name(format!(".{}.tmp", file_name.to_string_lossy()));

    let written = std::fs::write(&temp, content)
        .map_err(|e| ToponymyError::io(&temp, e))
        .and_then(|()| std::fs::rename(&temp, path).map_err(|e| ToponymyError::io(path, e)));
    if written.is_err() {
        // The temp file may exist after a partial write or a failed rename.
        let _ = std::fs::remove_file(&temp);
    }
    written?;

    debug!("wrote report");
    Ok(())
}
