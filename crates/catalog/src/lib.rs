//! Catalog validation units (categories and products).
//!
//! This crate contains the request canonicalization and acceptance rules for
//! the catalog side of the inventory backend, implemented purely as
//! deterministic domain logic (no IO, no HTTP, no storage).

pub mod category;
pub mod product;

pub use category::{CategoryRequest, is_common_category, suggested_description};
pub use product::{PriceTier, ProductRequest, is_premium, is_reasonable_price, price_tier};
