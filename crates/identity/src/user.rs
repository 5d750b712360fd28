use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use stockgate_core::text;
use stockgate_core::{CanonicalRequest, LogSummary, Rejection, RoleRef, mask_email};

/// Username alphabet: letters, digits, dot, hyphen, underscore.
static USERNAME_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z0-9._-]+$").unwrap());

/// Full names are letters and spaces only (accented Latin included).
static FULL_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-zÁÉÍÓÚÜÑáéíóúüñ ]+$").unwrap());

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap());

/// Account names that can never be claimed by a client, whatever their
/// casing. This is a denylist on top of the format pattern, not a format
/// check itself.
const RESERVED_USERNAMES: &[&str] = &[
    "admin",
    "root",
    "system",
    "user",
    "test",
    "null",
    "undefined",
];

/// Raw or canonical user fields; `normalized` maps the former to the latter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRequest {
    pub username: String,
    pub full_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    pub role_id: RoleRef,
}

impl CanonicalRequest for UserRequest {
    const KIND: &'static str = "user";

    fn normalized(self) -> Self {
        Self {
            username: self.username.trim().to_lowercase(),
            full_name: text::map_words(&self.full_name, |_, word| text::title_case_word(word)),
            email: text::trim_to_option(self.email).map(|e| e.to_lowercase()),
            active: Some(self.active.unwrap_or(true)),
            role_id: self.role_id,
        }
    }

    fn validate(&self) -> Result<(), Rejection> {
        let username_len = self.username.chars().count();
        if !(3..=20).contains(&username_len) {
            return Err(Rejection::format("username", "must be 3-20 characters"));
        }
        if !USERNAME_RE.is_match(&self.username) {
            return Err(Rejection::format(
                "username",
                "only letters, digits, dots, hyphens and underscores are allowed",
            ));
        }
        let full_name_len = self.full_name.chars().count();
        if !(2..=100).contains(&full_name_len) {
            return Err(Rejection::format("full_name", "must be 2-100 characters"));
        }
        if !FULL_NAME_RE.is_match(&self.full_name) {
            return Err(Rejection::format("full_name", "only letters and spaces are allowed"));
        }
        if let Some(email) = &self.email {
            if email.chars().count() > 100 {
                return Err(Rejection::format("email", "must be at most 100 characters"));
            }
            if !EMAIL_RE.is_match(email) {
                return Err(Rejection::format("email", "must be a valid email address"));
            }
        }
        if !self.role_id.is_valid() {
            return Err(Rejection::format("role_id", "must be a positive reference"));
        }

        if !is_valid_username(&self.username) {
            return Err(Rejection::semantic("username is reserved"));
        }
        if !has_full_name(&self.full_name) {
            return Err(Rejection::semantic("full name must include first and last name"));
        }
        Ok(())
    }
}

impl LogSummary for UserRequest {
    fn log_summary(&self) -> String {
        let email = self
            .email
            .as_deref()
            .map(mask_email)
            .unwrap_or_else(|| "-".to_string());
        format!(
            "user username={:?} full_name={:?} email={} active={} role={}",
            self.username,
            self.full_name,
            email,
            self.active.unwrap_or(true),
            self.role_id
        )
    }
}

/// Whether a username avoids the reserved-name denylist (case-insensitive).
pub fn is_valid_username(username: &str) -> bool {
    let lower = username.trim().to_lowercase();
    !RESERVED_USERNAMES.contains(&lower.as_str())
}

/// At least two whitespace-separated tokens, read as first plus last name.
pub fn has_full_name(full_name: &str) -> bool {
    full_name.split_whitespace().count() >= 2
}
