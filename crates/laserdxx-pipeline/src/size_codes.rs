//! Garment size-code recognition for TEXT and MTEXT content.

use regex::Regex;

/// Whole-token size codes, longest alternatives first.
const SIZE_CODE_PATTERN: &str =
    r"(?i)\b(Y?(?:[2-6]XL|XXXL|XXL|XL|XXXS|XXS|XS|S|M|L)(?:-[RTP])?)\b";

/// Matches drawing text against the size-code vocabulary
#[derive(Debug, Clone)]
pub struct SizeCodeMatcher {
    pattern: Regex,
    mtext_codes: Regex,
}

impl SizeCodeMatcher {
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(SIZE_CODE_PATTERN).expect("size code pattern is valid"),
            mtext_codes: Regex::new(r"\\[A-OQ-Za-z][^;\\]*;").expect("mtext pattern is valid"),
        }
    }

    /// The first size code in `text`, upper-cased
    pub fn find(&self, text: &str) -> Option<String> {
        self.pattern
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_uppercase())
    }

    /// Strip MTEXT inline formatting before matching
    ///
    /// Paragraph breaks become spaces, `\X...;` codes and braces go away.
    pub fn clean_mtext(&self, raw: &str) -> String {
        let without_breaks = raw.replace("\\P", " ");
        self.mtext_codes
            .replace_all(&without_breaks, "")
            .chars()
            .filter(|c| *c != '{' && *c != '}')
            .collect()
    }
}

impl Default for SizeCodeMatcher {
    fn default() -> Self {
        Self::new()
    }
}
