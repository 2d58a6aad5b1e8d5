//! Paragraph splitting of entry bodies.

use std::sync::LazyLock;

use regex::Regex;

use toponymy_shared::Entry;

/// Two line breaks with only whitespace between them.
static PARAGRAPH_BREAK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n").expect("paragraph break regex"));

/// Split text on blank-line separators, keeping source order.
///
/// Pieces are not trimmed: joining them back with the separators they were
/// split on gives the input unchanged. Empty text has no paragraphs.
pub fn split_paragraphs(text: &str) -> Vec<&str> {
    if text.is_empty() {
        return Vec::new();
    }
    PARAGRAPH_BREAK_RE.split(text).collect()
}

/// Paragraphs of an entry, excluding its heading token.
pub fn entry_paragraphs(entry: &Entry) -> Vec<&str> {
    split_paragraphs(entry.text())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rejoin(text: &str) -> String {
        let pieces = split_paragraphs(text);
        let separators: Vec<&str> = PARAGRAPH_BREAK_RE
            .find_iter(text)
            .map(|m| m.as_str())
            .collect();
        assert_eq!(pieces.len(), separators.len() + 1);

        let mut out = String::from(pieces[0]);
        for (sep, piece) in separators.iter().zip(&pieces[1..]) {
            out.push_str(sep);
            out.push_str(piece);
        }
        out
    }

    #[test]
    fn splits_on_blank_lines() {
        assert_eq!(
            split_paragraphs("unu\ndoi\n\ntrei\n\n\n\npatru"),
            ["unu\ndoi", "trei", "patru"]
        );
    }

    #[test]
    fn whitespace_only_lines_separate_paragraphs() {
        assert_eq!(split_paragraphs("unu\n   \ndoi"), ["unu", "doi"]);
    }

    #[test]
    fn single_newline_does_not_split() {
        assert_eq!(split_paragraphs("unu\ndoi"), ["unu\ndoi"]);
    }

    #[test]
    fn trailing_newline_stays_on_last_paragraph() {
        assert_eq!(
            split_paragraphs("Padure veche cu brad.\n\nNu are cuvinte cheie.\n"),
            ["Padure veche cu brad.", "Nu are cuvinte cheie.\n"]
        );
    }

    #[test]
    fn empty_text_has_no_paragraphs() {
        assert!(split_paragraphs("").is_empty());
    }

    #[test]
    fn split_round_trips() {
        for text in [
            "a",
            "a\nb",
            "a\n\nb",
            "a\n \t\n\n\nb\nc\n\nd\n",
            "\n\nleading",
            "trailing\n\n",
        ] {
            assert_eq!(rejoin(text), text);
        }
    }

    #[test]
    fn entry_paragraphs_skip_heading_token() {
        let entry = Entry::new("BRAD1", "BRAD1\nPadure veche.\n\nAlt rand.");
        assert_eq!(entry_paragraphs(&entry), ["Padure veche.", "Alt rand."]);

        let inline = Entry::new("CODRU2", "CODRU2 padure deasa\nSat.\n\nAlt rand.");
        assert_eq!(entry_paragraphs(&inline), ["padure deasa\nSat.", "Alt rand."]);

        let bare = Entry::new("BRAD2", "BRAD2");
        assert!(entry_paragraphs(&bare).is_empty());
    }
}
