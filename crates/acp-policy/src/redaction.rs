// redaction.rs — Sensitive-content matchers and placeholder substitution.
//
// Each RedactionKind pairs a matcher with a fixed placeholder token.
// Matchers run in priority order; every occurrence of a match is replaced
// with the kind's placeholder. Placeholders are chosen so that no matcher
// can match its own output — redaction is idempotent.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// A kind of sensitive content the gate can detect and redact.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RedactionKind {
    /// An email address (e.g., "jane@co.com").
    Email,
    /// A national identity number in the NNN-NN-NNNN format.
    NationalId,
}

impl RedactionKind {
    /// Every kind, in detection priority order.
    pub const ALL: &'static [RedactionKind] = &[RedactionKind::Email, RedactionKind::NationalId];

    /// The fixed token substituted for every occurrence of this kind.
    pub fn placeholder(&self) -> &'static str {
        match self {
            RedactionKind::Email => "[REDACTED_EMAIL]",
            RedactionKind::NationalId => "[REDACTED_NATIONAL_ID]",
        }
    }

    fn matcher(&self) -> &'static Regex {
        match self {
            RedactionKind::Email => email_matcher(),
            RedactionKind::NationalId => national_id_matcher(),
        }
    }
}

impl fmt::Display for RedactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RedactionKind::Email => write!(f, "email"),
            RedactionKind::NationalId => write!(f, "national_id"),
        }
    }
}

// The patterns are compile-time constants, so the expect can only fire if
// the literal itself is edited into something invalid.
fn email_matcher() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[\w.\-]+@[\w.\-]+\.\w+").expect("email pattern is valid"))
}

fn national_id_matcher() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b\d{3}-\d{2}-\d{4}\b").expect("national-id pattern is valid"))
}

/// Redact one free-text field.
///
/// Returns the redacted text plus the kinds that matched, in priority
/// order. Text without sensitive content comes back unchanged.
pub fn redact_text(text: &str) -> (String, Vec<RedactionKind>) {
    let mut redacted = text.to_string();
    let mut kinds = Vec::new();

    for kind in RedactionKind::ALL {
        let matcher = kind.matcher();
        if matcher.is_match(&redacted) {
            redacted = matcher.replace_all(&redacted, kind.placeholder()).into_owned();
            kinds.push(*kind);
        }
    }

    (redacted, kinds)
}
