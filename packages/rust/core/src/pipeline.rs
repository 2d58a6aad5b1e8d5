//! End-to-end `extract` pipeline: source text → segment → filter → report.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use tracing::{info, instrument, warn};

use toponymy_segment::{HeadingPredicate, HeadingRule, entry_paragraphs, segment};
use toponymy_shared::{ExtractConfig, FilteredResult, KeywordSet, Result};

use crate::filter::filter_entries;
use crate::report::{self, ReportContext};
use crate::source::TextSource;

/// Output of the pure mining core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MineOutput {
    /// Entries found by the segmenter (after duplicate replacement).
    pub entries_scanned: usize,
    /// Keyword-matching paragraphs per heading.
    pub result: FilteredResult,
}

/// Heading and paragraph count of one segmented entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryOverview {
    pub heading: String,
    pub paragraphs: usize,
}

/// Result of the `extract` pipeline.
#[derive(Debug)]
pub struct ExtractSummary {
    /// Entries found by the segmenter.
    pub entries_scanned: usize,
    /// Headings that kept at least one paragraph, in report order.
    pub matched_headings: Vec<String>,
    /// Total paragraphs written.
    pub paragraphs: usize,
    /// Where the report was written.
    pub output: PathBuf,
    /// Total elapsed time.
    pub elapsed: Duration,
}

/// Progress callback for reporting pipeline status.
pub trait ProgressReporter {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called when the pipeline completes.
    fn done(&self, summary: &ExtractSummary);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn done(&self, _summary: &ExtractSummary) {}
}

/// Segment `text` and keep the keyword-matching paragraphs of each entry.
///
/// Pure and deterministic: no I/O, no failure path.
pub fn mine<P: HeadingPredicate>(text: &str, predicate: P, keywords: &KeywordSet) -> MineOutput {
    let entries = segment(text, predicate);
    let result = filter_entries(&entries, keywords);
    MineOutput {
        entries_scanned: entries.len(),
        result,
    }
}

/// List the segmented entries with their paragraph counts.
pub fn scan_entries<P: HeadingPredicate>(text: &str, predicate: P) -> Vec<EntryOverview> {
    segment(text, predicate)
        .iter()
        .map(|entry| EntryOverview {
            heading: entry.heading.clone(),
            paragraphs: entry_paragraphs(entry).len(),
        })
        .collect()
}

/// Run the full `extract` pipeline.
///
/// 1. Read the source text
/// 2. Segment it into entries
/// 3. Filter paragraphs by keyword
/// 4. Render and write the report
#[instrument(skip_all, fields(source = %source.describe(), output = %config.output.display()))]
pub fn run_extract(
    config: &ExtractConfig,
    source: &dyn TextSource,
    progress: &dyn ProgressReporter,
) -> Result<ExtractSummary> {
    let start = Instant::now();
    config.validate()?;

    let rule = HeadingRule::new(&config.extra_uppercase, config.min_token_len)?;
    let keywords = KeywordSet::new(config.keywords.iter().cloned());
    if keywords.is_empty() {
        warn!("no keywords configured, the report will be empty");
    }

    // --- Phase 1: Read ---
    progress.phase("Reading source text");
    let text = source.read_text()?;
    if text.trim().is_empty() {
        warn!("source text is empty");
    }

    // --- Phase 2/3: Segment + filter ---
    progress.phase("Segmenting entries");
    let mined = mine(&text, &rule, &keywords);
    info!(
        entries = mined.entries_scanned,
        matched = mined.result.len(),
        "mined entries"
    );

    // --- Phase 4: Report ---
    progress.phase("Writing report");
    let context = ReportContext::new(source.describe(), &text, &keywords, mined.entries_scanned);
    let content = report::render(&mined.result, &context, config.format, &config.report)?;
    report::write_report(&config.output, &content)?;

    let summary = ExtractSummary {
        entries_scanned: mined.entries_scanned,
        matched_headings: mined.result.headings().map(String::from).collect(),
        paragraphs: mined.result.paragraph_count(),
        output: config.output.clone(),
        elapsed: start.elapsed(),
    };

    info!(
        matched = summary.matched_headings.len(),
        paragraphs = summary.paragraphs,
        elapsed_ms = summary.elapsed.as_millis() as u64,
        "extract complete"
    );
    progress.done(&summary);

    Ok(summary)
}
