//! Entry segmentation: a single forward fold over the document lines.
//!
//! State is the current heading (if any) plus the body lines collected for
//! it. A heading line flushes the pending entry and starts a new one; any
//! other line is appended to the pending body. Lines seen before the first
//! heading belong to no entry and are dropped.

use tracing::{debug, trace};

use toponymy_shared::{Entry, EntryMap};

use crate::heading::HeadingPredicate;

/// Entry being assembled.
#[derive(Debug)]
struct Pending {
    heading: String,
    lines: Vec<String>,
}

/// Incremental segmenter. Feed lines with [`Segmenter::push_line`] and
/// collect the entries with [`Segmenter::finish`].
#[derive(Debug)]
pub struct Segmenter<P> {
    predicate: P,
    current: Option<Pending>,
    entries: EntryMap,
    dropped_lines: usize,
}

impl<P: HeadingPredicate> Segmenter<P> {
    pub fn new(predicate: P) -> Self {
        Self {
            predicate,
            current: None,
            entries: EntryMap::new(),
            dropped_lines: 0,
        }
    }

    /// Advance the fold by one line.
    pub fn push_line(&mut self, line: &str) {
        let line = line.trim();

        if let Some(token) = self.predicate.heading_token(line) {
            let heading = token.to_string();
            self.flush();
            trace!(%heading, "heading detected");
            self.current = Some(Pending {
                heading,
                lines: vec![line.to_string()],
            });
        } else if let Some(pending) = self.current.as_mut() {
            pending.lines.push(line.to_string());
        } else {
            self.dropped_lines += 1;
        }
    }

    /// Flush the last entry and return the ordered entry map.
    pub fn finish(mut self) -> EntryMap {
        self.flush();
        debug!(
            entries = self.entries.len(),
            dropped_lines = self.dropped_lines,
            "segmentation complete"
        );
        self.entries
    }

    fn flush(&mut self) {
        let Some(pending) = self.current.take() else {
            return;
        };
        if pending.lines.is_empty() {
            return;
        }

        let entry = Entry::new(pending.heading, pending.lines.join("\n"));
        if let Some(previous) = self.entries.insert(entry) {
            debug!(heading = %previous.heading, "duplicate heading, later entry replaces earlier");
        }
    }
}

/// Segment a whole text block (split on `\n`).
pub fn segment<P: HeadingPredicate>(text: &str, predicate: P) -> EntryMap {
    segment_lines(text.split('\n'), predicate)
}

/// Segment a stream of lines.
pub fn segment_lines<I, S, P>(lines: I, predicate: P) -> EntryMap
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    P: HeadingPredicate,
{
    let mut segmenter = Segmenter::new(predicate);
    for line in lines {
        segmenter.push_line(line.as_ref());
    }
    segmenter.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heading::HeadingRule;

    fn run(text: &str) -> EntryMap {
        segment(text, HeadingRule::default())
    }

    #[test]
    fn empty_text_yields_no_entries() {
        assert!(run("").is_empty());
        assert!(run("\n\n  \n").is_empty());
    }

    #[test]
    fn lines_before_first_heading_are_dropped() {
        let entries = run("Prefata\nacestei lucrari\n\nBRAD1\nSat.");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries.get("BRAD1").map(|e| e.body.as_str()), Some("BRAD1\nSat."));
    }

    #[test]
    fn body_keeps_heading_line_and_stripped_lines() {
        let entries = run("  ARINI3 (sat), com. Bosanci  \n   Lunca cu arini.  \n\n  Alt paragraf.");
        let entry = entries.get("ARINI3").expect("entry");
        assert_eq!(
            entry.body,
            "ARINI3 (sat), com. Bosanci\nLunca cu arini.\n\nAlt paragraf."
        );
    }

    #[test]
    fn heading_followed_by_heading_keeps_heading_line_body() {
        let entries = run("BRAD1\nBRAD2\nPadure de brazi.");
        assert_eq!(entries.get("BRAD1").map(|e| e.body.as_str()), Some("BRAD1"));
        assert_eq!(
            entries.get("BRAD2").map(|e| e.body.as_str()),
            Some("BRAD2\nPadure de brazi.")
        );
    }

    #[test]
    fn duplicate_heading_last_write_wins() {
        let entries = run("BRAD1\nprima\nCODRU2\ncodru\nBRAD1\na doua");
        assert_eq!(entries.len(), 2);
        assert_eq!(
            entries.get("BRAD1").map(|e| e.body.as_str()),
            Some("BRAD1\na doua")
        );
        assert_eq!(entries.headings().collect::<Vec<_>>(), ["CODRU2", "BRAD1"]);
    }

    #[test]
    fn stray_capital_splits_unless_min_length_excludes_it() {
        let text = "BRAD1\nPadure veche.\nB\ncontinuare cu codru.";
        assert_eq!(run(text).headings().collect::<Vec<_>>(), ["BRAD1", "B"]);

        let rule = HeadingRule::new("ĂÂÎȘȚ", 2).expect("rule");
        let entries = segment(text, &rule);
        assert_eq!(entries.len(), 1);
        assert_eq!(
            entries.get("BRAD1").map(|e| e.body.as_str()),
            Some("BRAD1\nPadure veche.\nB\ncontinuare cu codru.")
        );
    }

    #[test]
    fn streaming_matches_block_segmentation() {
        let text = "BRAD1\nPadure.\n\nCODRU2\nCodru.\n";
        let block = run(text);
        let streamed = segment_lines(text.lines().map(String::from), HeadingRule::default());
        // `lines()` drops the trailing empty line that `split('\n')` keeps.
        assert_eq!(block.get("BRAD1"), streamed.get("BRAD1"));
        assert_eq!(
            block.get("CODRU2").map(|e| e.body.trim_end()),
            streamed.get("CODRU2").map(|e| e.body.as_str())
        );
    }

    #[test]
    fn every_heading_satisfies_the_predicate() {
        let rule = HeadingRule::default();
        let text = "intro\nPĂDURENI, SAT\ntext\nARINI3 (sat)\nmai mult\nBRAD, vezi\nCODRU-MARE\n";
        let entries = segment(text, &rule);
        assert_eq!(
            entries.headings().collect::<Vec<_>>(),
            ["PĂDURENI", "ARINI3", "CODRU-MARE"]
        );
        for heading in entries.headings() {
            assert!(rule.is_heading(heading));
        }
    }

    struct StarPredicate;

    impl HeadingPredicate for StarPredicate {
        fn heading_token<'a>(&self, line: &'a str) -> Option<&'a str> {
            line.trim().strip_prefix('*')
        }
    }

    #[test]
    fn predicate_can_be_swapped() {
        let entries = segment("*unu\na\n*doi\nb", StarPredicate);
        assert_eq!(entries.headings().collect::<Vec<_>>(), ["unu", "doi"]);
        assert_eq!(entries.get("doi").map(|e| e.body.as_str()), Some("*doi\nb"));
    }
}
