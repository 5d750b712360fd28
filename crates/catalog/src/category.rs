use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use stockgate_core::text;
use stockgate_core::{CanonicalRequest, LogSummary, Rejection, SUMMARY_TEXT_LIMIT, truncate};

/// Allowed alphabet for category names: letters (accented Latin included),
/// digits, space, hyphen, underscore, ampersand, parentheses, dot.
static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-zÁÉÍÓÚÜÑáéíóúüñ0-9 \-_&().]+$").unwrap());

/// Spanish connector words kept lowercase inside a title-cased name.
const CONNECTOR_WORDS: &[&str] = &[
    "y", "e", "o", "u", "de", "del", "la", "el", "en", "con", "para", "por",
];

/// One bucket of the common-category vocabulary: ES/EN synonyms plus the
/// canonical description suggested for that bucket.
struct VocabularyBucket {
    synonyms: &'static [&'static str],
    description: &'static str,
}

const COMMON_CATEGORIES: &[VocabularyBucket] = &[
    VocabularyBucket {
        synonyms: &[
            "electrónica",
            "electronica",
            "electrónicos",
            "electronicos",
            "electronics",
            "tecnología",
            "tecnologia",
            "technology",
        ],
        description: "Electronic devices, gadgets and accessories",
    },
    VocabularyBucket {
        synonyms: &["ropa", "vestimenta", "moda", "clothing", "apparel", "fashion"],
        description: "Apparel, footwear and fashion items",
    },
    VocabularyBucket {
        synonyms: &["hogar", "casa", "muebles", "home", "furniture"],
        description: "Furniture, decor and household goods",
    },
    VocabularyBucket {
        synonyms: &["deportes", "deporte", "sports", "fitness"],
        description: "Sporting goods and fitness equipment",
    },
    VocabularyBucket {
        synonyms: &["libros", "lectura", "books", "reading"],
        description: "Books, magazines and reading material",
    },
    VocabularyBucket {
        synonyms: &["alimentos", "comida", "bebidas", "abarrotes", "food", "groceries"],
        description: "Food, beverages and groceries",
    },
    VocabularyBucket {
        synonyms: &["belleza", "cosméticos", "cosmeticos", "beauty", "cosmetics"],
        description: "Cosmetics and personal care products",
    },
    VocabularyBucket {
        synonyms: &["juguetes", "juegos", "toys", "games"],
        description: "Toys and games for children",
    },
    VocabularyBucket {
        synonyms: &["oficina", "papelería", "papeleria", "office", "stationery"],
        description: "Office supplies and stationery",
    },
    VocabularyBucket {
        synonyms: &["salud", "farmacia", "bienestar", "health", "pharmacy", "wellness"],
        description: "Health, wellness and pharmacy products",
    },
];

/// Raw or canonical category fields; `normalized` maps the former to the
/// latter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRequest {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CanonicalRequest for CategoryRequest {
    const KIND: &'static str = "category";

    fn normalized(self) -> Self {
        Self {
            name: canonical_name(&self.name),
            description: text::trim_to_option(self.description)
                .map(|d| text::capitalize_first(&d)),
        }
    }

    fn validate(&self) -> Result<(), Rejection> {
        let len = self.name.chars().count();
        if !(2..=100).contains(&len) {
            return Err(Rejection::format("name", "must be 2-100 characters"));
        }
        if !is_valid_name(&self.name) {
            return Err(Rejection::format(
                "name",
                "only letters, digits, spaces and -_&(). are allowed",
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

impl LogSummary for CategoryRequest {
    fn log_summary(&self) -> String {
        let description = self
            .description
            .as_deref()
            .map(|d| truncate(d, SUMMARY_TEXT_LIMIT))
            .unwrap_or_else(|| "-".to_string());
        format!("category name={:?} description={:?}", self.name, description)
    }
}

/// Title-case a category name word by word. Connector words stay lowercase
/// unless they open the name.
fn canonical_name(name: &str) -> String {
    text::map_words(name, |index, word| {
        let lower = word.to_lowercase();
        if index > 0 && CONNECTOR_WORDS.contains(&lower.as_str()) {
            lower
        } else {
            text::title_case_word(word)
        }
    })
}

/// Whether a raw name stays inside the allowed category alphabet.
/// Blank names never pass.
pub fn is_valid_name(name: &str) -> bool {
    !name.trim().is_empty() && NAME_RE.is_match(name)
}

/// Case-insensitive membership in the fixed common-category vocabulary.
pub fn is_common_category(name: &str) -> bool {
    bucket_for(name).is_some()
}

/// Canonical description for a known vocabulary bucket, or a generic line
/// built from the lowercased name.
pub fn suggested_description(name: &str) -> String {
    match bucket_for(name) {
        Some(bucket) => bucket.description.to_string(),
        None => format!("Products in the {} category", name.trim().to_lowercase()),
    }
}

fn bucket_for(name: &str) -> Option<&'static VocabularyBucket> {
    let needle = name.trim().to_lowercase();
    COMMON_CATEGORIES
        .iter()
        .find(|bucket| bucket.synonyms.contains(&needle.as_str()))
}
