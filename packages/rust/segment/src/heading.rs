//! Heading detection for unmarked dictionary text.
//!
//! A heading is recognized purely from typography: a leading run of
//! uppercase letters (optionally joined by hyphens) with optional trailing
//! digits, on a line that is either entirely uppercase or carries those
//! trailing digits (`BRAD2`, `CODRU-MARE`, `ARINI3 sat`).

use std::sync::LazyLock;

use regex::Regex;

use toponymy_shared::{DEFAULT_EXTRA_UPPERCASE, DEFAULT_MIN_TOKEN_LEN, Result, ToponymyError};

/// Decides whether a line opens a new entry, and which token names it.
pub trait HeadingPredicate {
    /// Return the heading token at the start of `line`, if the line is a
    /// heading. Surrounding whitespace is ignored.
    fn heading_token<'a>(&self, line: &'a str) -> Option<&'a str>;

    fn is_heading(&self, line: &str) -> bool {
        self.heading_token(line).is_some()
    }
}

impl<P: HeadingPredicate + ?Sized> HeadingPredicate for &P {
    fn heading_token<'a>(&self, line: &'a str) -> Option<&'a str> {
        (**self).heading_token(line)
    }
}

/// Regex-based heading rule over `A-Z` plus a configurable set of extra
/// uppercase letters.
#[derive(Debug, Clone)]
pub struct HeadingRule {
    /// `^U[U-]{n,}\d*`: the heading token.
    token: Regex,
    /// `^U[U-]{n,}\d+`: token with mandatory trailing digits.
    numbered: Regex,
}

static DEFAULT_RULE: LazyLock<HeadingRule> = LazyLock::new(|| {
    HeadingRule::new(DEFAULT_EXTRA_UPPERCASE, DEFAULT_MIN_TOKEN_LEN)
        .expect("default heading rule compiles")
});

impl Default for HeadingRule {
    fn default() -> Self {
        DEFAULT_RULE.clone()
    }
}

impl HeadingRule {
    /// Build a rule accepting `A-Z` plus every non-whitespace character of
    /// `extra_uppercase` as heading letters.
    ///
    /// `min_token_len` counts the letters and hyphens before any trailing
    /// digits. With 1, a lone capital (`B`) opens an entry; 2 keeps stray
    /// page letters inside the current entry.
    pub fn new(extra_uppercase: &str, min_token_len: usize) -> Result<Self> {
        if min_token_len == 0 {
            return Err(ToponymyError::config("heading token length must be at least 1"));
        }
        let letters = letter_class(extra_uppercase);
        // First character must be a letter; the rest may include hyphens.
        let rest = min_token_len - 1;
        let token = compile(&format!(r"^[{letters}][{letters}\-]{{{rest},}}\d*"))?;
        let numbered = compile(&format!(r"^[{letters}][{letters}\-]{{{rest},}}\d+"))?;

        Ok(Self { token, numbered })
    }
}

impl HeadingPredicate for HeadingRule {
    fn heading_token<'a>(&self, line: &'a str) -> Option<&'a str> {
        let line = line.trim();
        let token = self.token.find(line)?;

        if is_all_uppercase(line) || self.numbered.is_match(line) {
            Some(token.as_str())
        } else {
            None
        }
    }
}

/// Contents of a character class: `A-Z` followed by the escaped extras.
fn letter_class(extra_uppercase: &str) -> String {
    let mut class = String::from("A-Z");
    for c in extra_uppercase.chars().filter(|c| !c.is_whitespace()) {
        class.push_str(&regex::escape(c.encode_utf8(&mut [0; 4])));
    }
    class
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern)
        .map_err(|e| ToponymyError::config(format!("invalid heading pattern {pattern:?}: {e}")))
}

/// True when `line` has at least one cased character and none in lowercase.
fn is_all_uppercase(line: &str) -> bool {
    let mut cased = false;
    for c in line.chars() {
        if c.is_lowercase() {
            return false;
        }
        cased |= c.is_uppercase();
    }
    cased
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(line: &str) -> Option<&str> {
        DEFAULT_RULE.heading_token(line)
    }

    #[test]
    fn numbered_token_on_its_own_line() {
        assert_eq!(token("BRAD1"), Some("BRAD1"));
        assert_eq!(token("  CODRU2  "), Some("CODRU2"));
    }

    #[test]
    fn uppercase_line_yields_leading_token_only() {
        assert_eq!(token("PĂDURENI, SAT ÎN COM. MOARA"), Some("PĂDURENI"));
        assert_eq!(token("CODRU-MARE"), Some("CODRU-MARE"));
    }

    #[test]
    fn numbered_token_allows_mixed_case_remainder() {
        assert_eq!(token("ARINI3 (sat), com. Bosanci"), Some("ARINI3"));
    }

    #[test]
    fn mixed_case_line_without_digits_is_body() {
        assert_eq!(token("BRAD, vezi mai sus"), None);
        assert_eq!(token("Padure veche cu brad."), None);
        assert_eq!(token("Ștefan cel Mare"), None);
    }

    #[test]
    fn blank_and_non_letter_lines_are_body() {
        assert_eq!(token(""), None);
        assert_eq!(token("   "), None);
        assert_eq!(token("123 ABC"), None);
        assert_eq!(token("- BRAD1"), None);
    }

    #[test]
    fn accented_letters_follow_configuration() {
        assert_eq!(token("ȚARINA2"), Some("ȚARINA2"));

        let ascii_only = HeadingRule::new("", 1).expect("rule");
        assert_eq!(ascii_only.heading_token("ȚARINA2"), None);
        // Token stops at the first unknown letter; the line is still uppercase.
        assert_eq!(ascii_only.heading_token("STÂNA"), Some("ST"));

        let cedilla = HeadingRule::new("ŞŢ", 1).expect("rule");
        assert_eq!(cedilla.heading_token("ŢARINA2"), Some("ŢARINA2"));
    }

    #[test]
    fn regex_metacharacters_in_extras_are_literal() {
        let rule = HeadingRule::new("]^\\", 1).expect("rule");
        assert_eq!(rule.heading_token("A]B7"), Some("A]B7"));
    }

    #[test]
    fn minimum_token_length_skips_stray_letters() {
        assert_eq!(token("B"), Some("B"));

        let rule = HeadingRule::new(DEFAULT_EXTRA_UPPERCASE, 2).expect("rule");
        assert_eq!(rule.heading_token("B"), None);
        assert_eq!(rule.heading_token("B7"), None);
        assert_eq!(rule.heading_token("BR"), Some("BR"));
        assert_eq!(rule.heading_token("A-3"), Some("A-3"));
        assert_eq!(rule.heading_token("BRAD1"), Some("BRAD1"));
    }

    #[test]
    fn zero_token_length_is_a_config_error() {
        let err = HeadingRule::new("", 0).unwrap_err();
        assert!(matches!(err, ToponymyError::Config { .. }));
    }

    #[test]
    fn every_detected_token_is_itself_a_heading() {
        for line in ["BRAD1", "PĂDURENI, SAT", "ARINI3 (sat)", "CODRU-MARE 2"] {
            let t = token(line).expect("heading");
            assert!(DEFAULT_RULE.is_heading(t), "{t} should re-scan as a heading");
        }
    }
}
