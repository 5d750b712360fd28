use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use stockgate_core::text;
use stockgate_core::{
    CanonicalRequest, CategoryRef, LogSummary, Rejection, SUMMARY_TEXT_LIMIT, truncate,
};

/// URL shape accepted for image fields (scheme plus no whitespace).
static URL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^https?://\S+$").unwrap());

/// Image URLs must end in one of the allowed raster/vector extensions.
static IMAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^https?://\S+\.(jpg|jpeg|png|gif|webp|svg)$").unwrap());

/// A product "name" of eight or more digits is almost certainly a scanned
/// barcode that landed in the wrong field.
static BARCODE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{8,}$").unwrap());

/// Brand names spelled with a lowercase "i" prefix and an uppercase second
/// letter ("iPhone"), checked against the lowercased word.
const BRAND_EXCEPTIONS: &[&str] = &["iphone", "ipad", "imac"];

/// Product qualifiers that are title-cased wherever they appear in a name.
const QUALIFIERS: &[&str] = &["pro", "max", "mini", "plus", "air", "ultra"];

const MAX_CONSISTENT_MINIMUM_STOCK: i64 = 10_000;

/// Price band a product falls into, by catalog price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceTier {
    Economic,
    Intermediate,
    High,
    Premium,
}

impl core::fmt::Display for PriceTier {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PriceTier::Economic => write!(f, "Economic"),
            PriceTier::Intermediate => write!(f, "Intermediate"),
            PriceTier::High => write!(f, "High"),
            PriceTier::Premium => write!(f, "Premium"),
        }
    }
}

/// Raw or canonical product fields; `normalized` maps the former to the
/// latter. Prices are stored with exactly two fractional digits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRequest {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_stock: Option<i64>,
    pub category_id: CategoryRef,
}

impl CanonicalRequest for ProductRequest {
    const KIND: &'static str = "product";

    fn normalized(self) -> Self {
        Self {
            name: canonical_name(&self.name),
            description: text::trim_to_option(self.description)
                .map(|d| text::capitalize_first(&d)),
            image_url: text::trim_to_option(self.image_url).map(|url| canonical_image_url(&url)),
            price: self
                .price
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
            minimum_stock: Some(self.minimum_stock.unwrap_or(0)),
            category_id: self.category_id,
        }
    }

    fn validate(&self) -> Result<(), Rejection> {
        let len = self.name.chars().count();
        if !(2..=150).contains(&len) {
            return Err(Rejection::format("name", "must be 2-150 characters"));
        }
        if let Some(description) = &self.description {
            if description.chars().count() > 1000 {
                return Err(Rejection::format("description", "must be at most 1000 characters"));
            }
        }
        if let Some(url) = &self.image_url {
            if url.chars().count() > 500 {
                return Err(Rejection::format("image_url", "must be at most 500 characters"));
            }
            if !URL_RE.is_match(url) {
                return Err(Rejection::format("image_url", "must be an http(s) URL"));
            }
        }
        if self.price < Decimal::new(1, 2) || self.price > Decimal::new(9_999_999_999, 2) {
            return Err(Rejection::format("price", "must be between 0.01 and 99999999.99"));
        }
        if let Some(minimum_stock) = self.minimum_stock {
            if !(0..=1_000_000).contains(&minimum_stock) {
                return Err(Rejection::format("minimum_stock", "must be between 0 and 1000000"));
            }
        }
        if !self.category_id.is_valid() {
            return Err(Rejection::format("category_id", "must be a positive reference"));
        }

        if let Some(rejection) = self.semantic_violation() {
            return Err(rejection);
        }
        Ok(())
    }
}

impl ProductRequest {
    /// Whether the fields are jointly plausible as a real catalog entry.
    /// Each failing condition alone is enough to reject.
    pub fn is_consistent(&self) -> bool {
        self.semantic_violation().is_none()
    }

    fn semantic_violation(&self) -> Option<Rejection> {
        if looks_like_barcode(&self.name) {
            return Some(Rejection::semantic("name looks like a barcode"));
        }
        if !is_reasonable_price(self.price) {
            return Some(Rejection::semantic("price is outside the reasonable range"));
        }
        if self.minimum_stock.unwrap_or(0) > MAX_CONSISTENT_MINIMUM_STOCK {
            return Some(Rejection::semantic("minimum stock is implausibly large"));
        }
        if let Some(url) = &self.image_url {
            if !is_valid_image(url) {
                return Some(Rejection::semantic("image URL has no recognized image extension"));
            }
        }
        None
    }
}

impl LogSummary for ProductRequest {
    fn log_summary(&self) -> String {
        let image = self
            .image_url
            .as_deref()
            .map(|url| truncate(url, SUMMARY_TEXT_LIMIT))
            .unwrap_or_else(|| "-".to_string());
        format!(
            "product name={:?} price={} tier={} category={} image={:?}",
            self.name,
            self.price,
            price_tier(self.price),
            self.category_id,
            image
        )
    }
}

/// Capitalize a product name word by word:
/// brand exceptions ("iphone" -> "iPhone"), title-cased qualifiers
/// ("pro" -> "Pro"), digit-leading words untouched ("15", "5g"),
/// everything else first-letter capitalized.
fn canonical_name(name: &str) -> String {
    text::map_words(name, |_, word| {
        let lower = word.to_lowercase();
        if BRAND_EXCEPTIONS.contains(&lower.as_str()) {
            brand_case(&lower)
        } else if QUALIFIERS.contains(&lower.as_str()) {
            text::title_case_word(word)
        } else if word.chars().next().is_some_and(|c| c.is_ascii_digit()) {
            word.to_string()
        } else {
            text::title_case_word(word)
        }
    })
}

/// "iphone" -> "iPhone": keep the lowercase prefix, uppercase the letter
/// after it.
fn brand_case(lower: &str) -> String {
    let mut chars = lower.chars();
    let (Some(prefix), Some(second)) = (chars.next(), chars.next()) else {
        return lower.to_string();
    };
    let mut out = String::with_capacity(lower.len());
    out.push(prefix);
    out.extend(second.to_uppercase());
    out.extend(chars);
    out
}

/// Prepend `https://` unless the URL already carries an http(s) scheme.
fn canonical_image_url(url: &str) -> String {
    let lower = url.to_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{url}")
    }
}

/// Prices a human would plausibly type for a single catalog item.
pub fn is_reasonable_price(price: Decimal) -> bool {
    price >= Decimal::new(1, 2) && price <= Decimal::from(1_000_000)
}

/// Premium pricing starts strictly above 1000.00.
pub fn is_premium(price: Decimal) -> bool {
    price > Decimal::from(1000)
}

/// Whether an image URL carries an allowed extension after its scheme.
pub fn is_valid_image(url: &str) -> bool {
    IMAGE_RE.is_match(url)
}

/// A name of only digits, eight or more, signals a data-entry error.
pub fn looks_like_barcode(name: &str) -> bool {
    BARCODE_RE.is_match(name)
}

/// Classify a price into its catalog band.
pub fn price_tier(price: Decimal) -> PriceTier {
    if price <= Decimal::from(50) {
        PriceTier::Economic
    } else if price <= Decimal::from(200) {
        PriceTier::Intermediate
    } else if price <= Decimal::from(1000) {
        PriceTier::High
    } else {
        PriceTier::Premium
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, price: Decimal) -> ProductRequest {
        ProductRequest {
            name: name.to_string(),
            description: None,
            image_url: None,
            price,
            minimum_stock: None,
            category_id: CategoryRef::new(1),
        }
    }

    #[test]
    fn brand_qualifier_and_digit_tiers_compose() {
        let canonical = request("iphone 15 pro max", Decimal::from(999)).normalized();
        assert_eq!(canonical.name, "iPhone 15 Pro Max");
    }

    #[test]
    fn ordinary_words_get_first_letter_capitalized() {
        let canonical = request("cable usb-c TRENZADO", Decimal::from(10)).normalized();
        assert_eq!(canonical.name, "Cable Usb-c Trenzado");
    }

    #[test]
    fn digit_leading_words_are_left_alone() {
        let canonical = request("monitor 4k 27in", Decimal::from(300)).normalized();
        assert_eq!(canonical.name, "Monitor 4k 27in");
    }

    #[test]
    fn price_rounds_half_up_to_two_digits() {
        let up = request("Mouse", Decimal::new(19_995, 3)).normalized();
        assert_eq!(up.price, Decimal::new(2000, 2)); // 19.995 -> 20.00

        let down = request("Mouse", Decimal::new(19_994, 3)).normalized();
        assert_eq!(down.price, Decimal::new(1999, 2)); // 19.994 -> 19.99
    }

    #[test]
    fn image_url_gets_scheme_prepended_once() {
        let bare = request("Mouse", Decimal::from(10));
        let canonical = ProductRequest {
            image_url: Some("cdn.example.com/m.png".to_string()),
            ..bare.clone()
        }
        .normalized();
        assert_eq!(
            canonical.image_url.as_deref(),
            Some("https://cdn.example.com/m.png")
        );

        let kept = ProductRequest {
            image_url: Some("http://cdn.example.com/m.png".to_string()),
            ..bare
        }
        .normalized();
        assert_eq!(
            kept.image_url.as_deref(),
            Some("http://cdn.example.com/m.png")
        );
    }

    #[test]
    fn empty_image_url_and_description_collapse_to_absent() {
        let canonical = ProductRequest {
            image_url: Some("  ".to_string()),
            description: Some(String::new()),
            ..request("Mouse", Decimal::from(10))
        }
        .normalized();
        assert_eq!(canonical.image_url, None);
        assert_eq!(canonical.description, None);
        assert_eq!(canonical.minimum_stock, Some(0));
    }

    #[test]
    fn barcode_names_are_never_consistent() {
        let canonical = request("12345678", Decimal::from(10)).normalized();
        assert!(looks_like_barcode(&canonical.name));
        assert!(!canonical.is_consistent());
        assert!(matches!(
            request("12345678", Decimal::from(10)).evaluate().unwrap_err(),
            Rejection::Semantic(_)
        ));
    }

    #[test]
    fn price_predicates_and_tiers() {
        assert!(is_reasonable_price(Decimal::new(1, 2)));
        assert!(is_reasonable_price(Decimal::from(1_000_000)));
        assert!(!is_reasonable_price(Decimal::ZERO));
        assert!(!is_reasonable_price(Decimal::from(2_000_000)));

        assert!(!is_premium(Decimal::from(1000)));
        assert!(is_premium(Decimal::new(100_001, 2)));

        assert_eq!(price_tier(Decimal::from(50)), PriceTier::Economic);
        assert_eq!(price_tier(Decimal::from(51)), PriceTier::Intermediate);
        assert_eq!(price_tier(Decimal::from(200)), PriceTier::Intermediate);
        assert_eq!(price_tier(Decimal::from(999)), PriceTier::High);
        assert_eq!(price_tier(Decimal::from(1001)), PriceTier::Premium);
    }

    #[test]
    fn image_extension_allow_list_is_case_insensitive() {
        assert!(is_valid_image("https://cdn.example.com/a.PNG"));
        assert!(is_valid_image("http://cdn.example.com/a.webp"));
        assert!(!is_valid_image("https://cdn.example.com/a.bmp"));
        assert!(!is_valid_image("cdn.example.com/a.png"));
    }

    #[test]
    fn present_but_invalid_image_rejects_the_request() {
        let result = ProductRequest {
            image_url: Some("cdn.example.com/manual.pdf".to_string()),
            ..request("Mouse", Decimal::from(10))
        }
        .evaluate();
        assert!(matches!(result.unwrap_err(), Rejection::Semantic(_)));
    }

    #[test]
    fn oversized_minimum_stock_is_inconsistent_but_well_formed() {
        let canonical = ProductRequest {
            minimum_stock: Some(20_000),
            ..request("Mouse", Decimal::from(10))
        }
        .normalized();
        assert!(!canonical.is_consistent());

        let out_of_range = ProductRequest {
            minimum_stock: Some(2_000_000),
            ..request("Mouse", Decimal::from(10))
        };
        assert!(matches!(
            out_of_range.evaluate().unwrap_err(),
            Rejection::Format { field: "minimum_stock", .. }
        ));
    }

    #[test]
    fn unreasonable_price_is_a_semantic_rejection() {
        let result = request("Mouse", Decimal::from(5_000_000)).evaluate();
        assert!(matches!(result.unwrap_err(), Rejection::Semantic(_)));
    }

    #[test]
    fn nonpositive_category_reference_is_rejected() {
        let result = ProductRequest {
            category_id: CategoryRef::new(0),
            ..request("Mouse", Decimal::from(10))
        }
        .evaluate();
        assert!(matches!(
            result.unwrap_err(),
            Rejection::Format { field: "category_id", .. }
        ));
    }

    #[test]
    fn log_summary_reports_tier_and_truncates_urls() {
        let canonical = ProductRequest {
            image_url: Some(format!("https://cdn.example.com/{}.png", "x".repeat(100))),
            ..request("iphone 15 pro max", Decimal::from(1500))
        }
        .normalized();
        let summary = canonical.log_summary();
        assert!(summary.contains("tier=Premium"));
        assert!(summary.contains('…'));
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: normalization is idempotent.
            #[test]
            fn normalized_is_idempotent(
                name in "[a-zA-Z0-9 ]{0,40}",
                cents in 1i64..10_000_000,
                minimum_stock in proptest::option::of(0i64..1_000_000)
            ) {
                let request = ProductRequest {
                    name,
                    description: None,
                    image_url: None,
                    price: Decimal::new(cents, 2),
                    minimum_stock,
                    category_id: CategoryRef::new(1),
                };
                let once = request.clone().normalized();
                let twice = once.clone().normalized();
                prop_assert_eq!(once, twice);
            }

            /// Property: every price lands in exactly one tier, consistent
            /// with the premium flag.
            #[test]
            fn premium_flag_agrees_with_tier(cents in 1i64..1_000_000_000) {
                let price = Decimal::new(cents, 2);
                let premium = is_premium(price);
                let tier = price_tier(price);
                prop_assert_eq!(premium, tier == PriceTier::Premium);
            }
        }
    }
}
