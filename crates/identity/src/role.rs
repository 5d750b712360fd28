use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use stockgate_core::text;
use stockgate_core::{CanonicalRequest, LogSummary, Rejection, SUMMARY_TEXT_LIMIT, truncate};

/// Allowed alphabet for role names: letters (accented Latin included),
/// digits, space, hyphen, underscore.
static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-zÁÉÍÓÚÜÑáéíóúüñ0-9 _-]+$").unwrap());

/// Raw or canonical role fields.
///
/// Roles are kept as typed here as they need to be: trimming only, no case
/// change. Uppercasing for storage is the persistence layer's concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRequest {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CanonicalRequest for RoleRequest {
    const KIND: &'static str = "role";

    fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            description: text::trim_to_option(self.description),
        }
    }

    fn validate(&self) -> Result<(), Rejection> {
        let len = self.name.chars().count();
        if !(2..=50).contains(&len) {
            return Err(Rejection::format("name", "must be 2-50 characters"));
        }
        if !is_valid_name(&self.name) {
            return Err(Rejection::format(
                "name",
                "only letters, digits, spaces, hyphens and underscores are allowed",
            ));
        }
        if let Some(description) = &self.description {
            if description.chars().count() > 255 {
                return Err(Rejection::format("description", "must be at most 255 characters"));
            }
        }
        Ok(())
    }
}

impl LogSummary for RoleRequest {
    fn log_summary(&self) -> String {
        let description = self
            .description
            .as_deref()
            .map(|d| truncate(d, SUMMARY_TEXT_LIMIT))
            .unwrap_or_else(|| "-".to_string());
        format!("role name={:?} description={:?}", self.name, description)
    }
}

/// Whether a raw name stays inside the allowed role alphabet.
/// Blank names never pass.
pub fn is_valid_name(name: &str) -> bool {
    !name.trim().is_empty() && NAME_RE.is_match(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_trims_without_changing_case() {
        let canonical = RoleRequest {
            name: "  almacén_supervisor  ".to_string(),
            description: Some("  turno de noche ".to_string()),
        }
        .normalized();
        assert_eq!(canonical.name, "almacén_supervisor");
        assert_eq!(canonical.description.as_deref(), Some("turno de noche"));
    }

    #[test]
    fn empty_description_collapses_to_absent() {
        let canonical = RoleRequest {
            name: "auditor".to_string(),
            description: Some("   ".to_string()),
        }
        .normalized();
        assert_eq!(canonical.description, None);
    }

    #[test]
    fn valid_name_rejects_punctuation_outside_the_alphabet() {
        assert!(is_valid_name("Supervisor de Almacén"));
        assert!(is_valid_name("auditor_2"));
        assert!(!is_valid_name("admin&ops"));
        assert!(!is_valid_name("  "));
    }

    #[test]
    fn evaluate_enforces_length_bounds() {
        let short = RoleRequest {
            name: "a".to_string(),
            description: None,
        };
        assert!(matches!(
            short.evaluate().unwrap_err(),
            Rejection::Format { field: "name", .. }
        ));

        let long = RoleRequest {
            name: "x".repeat(51),
            description: None,
        };
        assert!(matches!(
            long.evaluate().unwrap_err(),
            Rejection::Format { field: "name", .. }
        ));
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: normalization is idempotent.
            #[test]
            fn normalized_is_idempotent(
                name in "[A-Za-z0-9 _-]{0,30}",
                description in proptest::option::of("[A-Za-z .,]{0,60}")
            ) {
                let request = RoleRequest { name, description };
                let once = request.clone().normalized();
                let twice = once.clone().normalized();
                prop_assert_eq!(once, twice);
            }
        }
    }
}
