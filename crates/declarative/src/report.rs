//! Outcome reporter - result records for the calling runtime
//!
//! A [`Report`] is the success record, a [`FailureReport`] the failure
//! record. Secret fields are replaced by [`REDACTED`], and secret values
//! are masked in captured output and failure messages wherever they stand
//! as a word or as a `name=value` value.

use crate::error::Error;
use crate::resource::Resource;
use crate::types::{Action, Presence, ReconcileOutcome};
use serde::Serialize;
use std::collections::BTreeMap;

/// Placeholder reported instead of a secret value
pub const REDACTED: &str = "NOT_LOGGING_PASSWORD";

/// Success record of one reconciliation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub changed: bool,
    /// Identifying fields of the resource
    #[serde(flatten)]
    pub keys: BTreeMap<String, String>,
    pub state: Presence,
    /// The informational `remove` flag, echoed when a removal ran
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remove: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stdout: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stderr: Option<String>,
    /// Secret fields, each mapped to [`REDACTED`]
    #[serde(flatten)]
    pub redacted: BTreeMap<String, String>,
    /// The change was predicted, not made
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub check_mode: bool,
}

impl Report {
    /// Build the success record for a resource and its outcome
    pub fn new(resource: &dyn Resource, outcome: &ReconcileOutcome) -> Self {
        let secrets = resource.secrets();

        Self {
            changed: outcome.changed(),
            keys: resource
                .key_fields()
                .into_iter()
                .map(|(field, value)| (field.to_string(), value))
                .collect(),
            state: resource.desired_presence(),
            remove: (outcome.action == Action::Remove && !outcome.check_mode)
                .then_some(resource.remove_requested()),
            stdout: captured(outcome.stdout.as_deref(), &secrets),
            stderr: captured(outcome.stderr.as_deref(), &secrets),
            redacted: secrets
                .iter()
                .map(|(field, _)| ((*field).to_string(), REDACTED.to_string()))
                .collect(),
            check_mode: outcome.check_mode,
        }
    }
}

/// Failure record of one reconciliation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailureReport {
    pub failed: bool,
    /// Name of the resource that failed
    pub name: String,
    pub msg: String,
    /// Exit code of the failed authority command
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rc: Option<i32>,
}

impl FailureReport {
    /// Build the failure record for a resource and the error that aborted it
    pub fn new(resource: &dyn Resource, error: &Error) -> Self {
        let secrets = resource.secrets();

        Self {
            failed: true,
            name: resource.id(),
            msg: scrub(&error.message(), &secrets),
            rc: error.exit_code(),
        }
    }
}

/// Keep captured output only if it has content, with secrets scrubbed
fn captured(text: Option<&str>, secrets: &[(&'static str, String)]) -> Option<String> {
    text.filter(|t| !t.trim().is_empty())
        .map(|t| scrub(t, secrets))
}

/// Secrets at least this long are masked even inside a longer word
const MIN_EMBEDDED_SECRET_LEN: usize = 8;

/// Quoting and punctuation a secret may be wrapped in within a word
const WRAPPING: &[char] = &['"', '\'', '`', ',', ';', ':', '.', '(', ')', '[', ']'];

/// Replace secret values with [`REDACTED`]
fn scrub(text: &str, secrets: &[(&'static str, String)]) -> String {
    secrets
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .fold(text.to_string(), |acc, (_, value)| scrub_secret(&acc, value))
}

/// Mask one secret
///
/// Whole words and `name=value` values equal to the secret are masked.
/// Long secrets are also masked where they are embedded in other text;
/// short ones are not, so they cannot mangle unrelated words.
fn scrub_secret(text: &str, secret: &str) -> String {
    let text = if secret.chars().count() >= MIN_EMBEDDED_SECRET_LEN && !REDACTED.contains(secret) {
        text.replace(secret, REDACTED)
    } else {
        text.to_string()
    };

    text.split_inclusive(char::is_whitespace)
        .map(|chunk| {
            let word = chunk.trim_end_matches(char::is_whitespace);
            format!("{}{}", mask_word(word, secret), &chunk[word.len()..])
        })
        .collect()
}

fn mask_word(word: &str, secret: &str) -> String {
    if let Some(masked) = mask_bare(word, secret) {
        return masked;
    }
    if let Some((name, value)) = word.split_once('=')
        && let Some(masked) = mask_bare(value, secret)
    {
        return format!("{name}={masked}");
    }
    word.to_string()
}

fn mask_bare(word: &str, secret: &str) -> Option<String> {
    if word == secret {
        return Some(REDACTED.to_string());
    }
    let core = word.trim_matches(WRAPPING);
    if core != secret {
        return None;
    }
    let start = word.len() - word.trim_start_matches(WRAPPING).len();
    Some(format!(
        "{}{REDACTED}{}",
        &word[..start],
        &word[start + core.len()..]
    ))
}
