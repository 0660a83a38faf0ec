use std::fmt;
use thiserror::Error;

/// Failure of a single encode or decode call.
///
/// A codec either fully succeeds or returns exactly one of these. The value
/// carries no state, so repeating a failing call yields an equal error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Decode-time input violates the codec's grammar.
    #[error("malformed input: {0}")]
    MalformedInput(String),
    /// Encode-time input holds a symbol the codec cannot represent.
    #[error("unsupported character {}", codepoint_label(.0))]
    UnsupportedCharacter(char),
    /// The result would exceed the configured output bound.
    #[error("output exceeds configured limit")]
    Overflow,
}

fn codepoint_label(c: &char) -> String {
    format!("U+{:04X}", *c as u32)
}

impl CodecError {
    /// Shorthand for a `MalformedInput` with a formatted reason.
    pub fn malformed(reason: impl Into<String>) -> Self {
        CodecError::MalformedInput(reason.into())
    }

    /// Malformed input pinned to a character position.
    pub fn malformed_at(position: usize, reason: impl fmt::Display) -> Self {
        CodecError::MalformedInput(format!("{} at position {}", reason, position))
    }
}

/// Error when an algorithm name does not resolve to a known codec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownAlgorithmError {
    pub name: String,
    pub suggestion: Option<String>,
}

impl UnknownAlgorithmError {
    pub fn new(name: impl Into<String>, suggestion: Option<String>) -> Self {
        Self {
            name: name.into(),
            suggestion,
        }
    }
}

impl fmt::Display for UnknownAlgorithmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let use_color = should_use_color();

        if use_color {
            write!(
                f,
                "\x1b[1;31merror:\x1b[0m unknown algorithm '{}'",
                self.name
            )?;
        } else {
            write!(f, "error: unknown algorithm '{}'", self.name)?;
        }

        if let Some(suggestion) = &self.suggestion {
            writeln!(f)?;
            if use_color {
                write!(f, "\x1b[1;36mhint:\x1b[0m did you mean '{}'?", suggestion)?;
            } else {
                write!(f, "hint: did you mean '{}'?", suggestion)?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for UnknownAlgorithmError {}

/// Check if colored output should be used
fn should_use_color() -> bool {
    // Respect NO_COLOR environment variable
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    use std::io::IsTerminal;
    std::io::stderr().is_terminal()
}

/// Calculate Levenshtein distance between two strings
fn levenshtein_distance(s1: &str, s2: &str) -> usize {
    let len1 = s1.chars().count();
    let len2 = s2.chars().count();

    if len1 == 0 {
        return len2;
    }
    if len2 == 0 {
        return len1;
    }

    let mut prev_row: Vec<usize> = (0..=len2).collect();
    let mut curr_row = vec![0; len2 + 1];

    for (i, c1) in s1.chars().enumerate() {
        curr_row[0] = i + 1;

        for (j, c2) in s2.chars().enumerate() {
            let cost = if c1 == c2 { 0 } else { 1 };
            curr_row[j + 1] = (curr_row[j] + 1)
                .min(prev_row[j + 1] + 1)
                .min(prev_row[j] + cost);
        }

        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[len2]
}

/// Find the closest matching algorithm name
pub fn find_closest_algorithm(name: &str, available: &[&str]) -> Option<String> {
    let mut best_match = None;
    let mut best_distance = usize::MAX;

    // 1-2 character typos for short names, up to 3 for longer ones
    let threshold = if name.chars().count() < 5 { 2 } else { 3 };

    for candidate in available {
        let distance = levenshtein_distance(name, candidate);
        if distance < best_distance && distance <= threshold {
            best_distance = distance;
            best_match = Some(candidate.to_string());
        }
    }

    best_match
}
