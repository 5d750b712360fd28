use serde::{Deserialize, Serialize};

use stockgate_core::text;
use stockgate_core::{CanonicalRequest, LogSummary, Rejection, SUMMARY_TEXT_LIMIT, truncate};

/// Raw or canonical login fields.
///
/// The password is carried opaquely: never trimmed, case-folded or
/// inspected beyond presence, so it cannot leak into logs or derived
/// fields on its way to the authentication collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_info: Option<String>,
    #[serde(default)]
    pub remember_me: bool,
    #[serde(default)]
    pub extended_session: bool,
}

impl CanonicalRequest for LoginRequest {
    const KIND: &'static str = "login";

    fn normalized(self) -> Self {
        Self {
            username: self.username.trim().to_lowercase(),
            password: self.password,
            device_info: text::trim_to_option(self.device_info),
            remember_me: self.remember_me,
            extended_session: self.extended_session,
        }
    }

    fn validate(&self) -> Result<(), Rejection> {
        if self.username.trim().is_empty() {
            return Err(Rejection::format("username", "is required"));
        }
        if self.password.trim().is_empty() {
            return Err(Rejection::format("password", "is required"));
        }
        let username_len = self.username.chars().count();
        if !(3..=100).contains(&username_len) {
            return Err(Rejection::format("username", "must be 3-100 characters"));
        }
        let password_len = self.password.chars().count();
        if !(6..=100).contains(&password_len) {
            return Err(Rejection::format("password", "must be 6-100 characters"));
        }
        Ok(())
    }
}

impl LogSummary for LoginRequest {
    fn log_summary(&self) -> String {
        let device = self
            .device_info
            .as_deref()
            .map(|d| truncate(d, SUMMARY_TEXT_LIMIT))
            .unwrap_or_else(|| "-".to_string());
        // The password is deliberately absent here.
        format!(
            "login username={:?} device={:?} extended_session={}",
            self.username,
            device,
            self.is_extended_session()
        )
    }
}

impl LoginRequest {
    /// Both credentials present (non-blank after trimming).
    pub fn has_valid_credentials(&self) -> bool {
        !self.username.trim().is_empty() && !self.password.trim().is_empty()
    }

    /// Either session-extension flag requests a long-lived session.
    pub fn is_extended_session(&self) -> bool {
        self.extended_session || self.remember_me
    }
}
