//! Sanitized one-line summaries for observability.
//!
//! Every request record can describe itself in a single log-safe line.
//! Secrets never appear, emails are partially masked, and long free-text
//! fields are cut to a bounded prefix.

/// Longest free-text prefix that may reach a log line.
pub const SUMMARY_TEXT_LIMIT: usize = 40;

/// A sanitized, single-line representation for log output.
pub trait LogSummary {
    fn log_summary(&self) -> String;
}

/// Mask the local part of an email beyond its first two characters:
/// "alice@example.com" -> "al***@example.com".
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => {
            let visible: String = local.chars().take(2).collect();
            format!("{visible}***@{domain}")
        }
        None => "***".to_string(),
    }
}

/// Cut free text to a bounded prefix, marking the cut with an ellipsis.
pub fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        text.to_string()
    } else {
        let prefix: String = text.chars().take(limit).collect();
        format!("{prefix}…")
    }
}
