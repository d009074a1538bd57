// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Content heuristics for spam detection.
//!
//! Every function here is pure: the same input always yields the same
//! classification.

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// Suspicious message shape that triggers a silent rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuspiciousPattern {
    /// More URLs than allowed
    TooManyUrls(usize),
    /// Long run of uppercase letters
    Shouting,
    /// Short chunk repeated many times in a row
    RepeatedChunk,
}

impl fmt::Display for SuspiciousPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooManyUrls(n) => write!(f, "{n} URLs"),
            Self::Shouting => write!(f, "excessive capitals"),
            Self::RepeatedChunk => write!(f, "repeated characters"),
        }
    }
}

/// Return the first denylisted keyword found in `text`, case-insensitively.
pub fn find_spam_keyword<'a>(text: &str, keywords: &'a [String]) -> Option<&'a str> {
    let haystack = text.to_lowercase();
    keywords
        .iter()
        .map(String::as_str)
        .find(|kw| !kw.is_empty() && haystack.contains(&kw.to_lowercase()))
}

fn url_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)https?://\S+").expect("URL pattern is valid"))
}

fn shouting_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[A-Z]{10,}").expect("shouting pattern is valid"))
}

/// Count non-overlapping `http://` / `https://` links.
///
/// A link is the scheme followed by at least one non-whitespace character
/// and extends to the next whitespace.
pub fn count_urls(text: &str) -> usize {
    url_pattern().find_iter(text).count()
}

/// Whether `text` has ten or more consecutive ASCII uppercase letters.
pub fn has_uppercase_run(text: &str) -> bool {
    shouting_pattern().is_match(text)
}

/// Whether some chunk of 1..=`max_chunk` characters appears `min_repeats`
/// or more times back to back. Chunks never span a line break.
///
/// Scanned by hand: `regex` has no backreferences.
pub fn has_repeated_chunk(text: &str, max_chunk: usize, min_repeats: usize) -> bool {
    if min_repeats < 2 {
        return !text.is_empty();
    }
    let chars: Vec<char> = text.chars().collect();

    for len in 1..=max_chunk {
        let span = len * min_repeats;
        if chars.len() < span {
            break;
        }
        for start in 0..=chars.len() - span {
            let chunk = &chars[start..start + len];
            if chunk.iter().copied().any(is_line_terminator) {
                continue;
            }
            let repeated = (1..min_repeats).all(|k| {
                let at = start + k * len;
                &chars[at..at + len] == chunk
            });
            if repeated {
                return true;
            }
        }
    }
    false
}

fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// Run all pattern checks against a message.
pub fn detect_suspicious(
    message: &str,
    max_urls: usize,
    min_repeats: usize,
) -> Option<SuspiciousPattern> {
    let urls = count_urls(message);
    if urls > max_urls {
        return Some(SuspiciousPattern::TooManyUrls(urls));
    }
    if has_uppercase_run(message) {
        return Some(SuspiciousPattern::Shouting);
    }
    if has_repeated_chunk(message, 3, min_repeats) {
        return Some(SuspiciousPattern::RepeatedChunk);
    }
    None
}
