//! Strongly-typed reference identifiers used across the validation units.
//!
//! References arrive as raw client-supplied integers; identity itself is
//! assigned by the persistence collaborator. At this layer a reference is
//! acceptable only if it is strictly positive.

use serde::{Deserialize, Serialize};

/// Reference to a category record.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryRef(i64);

/// Reference to a role record.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleRef(i64);

/// Reference to a product record.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductRef(i64);

/// Reference to a user record.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserRef(i64);

macro_rules! impl_ref_newtype {
    ($t:ty) => {
        impl $t {
            pub fn new(id: i64) -> Self {
                Self(id)
            }

            pub fn get(&self) -> i64 {
                self.0
            }

            /// Whether the raw value can possibly resolve to a stored record.
            pub fn is_valid(&self) -> bool {
                self.0 > 0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<i64> for $t {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$t> for i64 {
            fn from(value: $t) -> Self {
                value.0
            }
        }
    };
}

impl_ref_newtype!(CategoryRef);
impl_ref_newtype!(RoleRef);
impl_ref_newtype!(ProductRef);
impl_ref_newtype!(UserRef);
