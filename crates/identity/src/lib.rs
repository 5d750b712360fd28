//! Identity validation units (users, roles, login input).
//!
//! This crate is intentionally decoupled from HTTP, sessions and storage:
//! it canonicalizes and judges raw identity requests, nothing more.
//! Password hashing and session issuance live behind the auth collaborator.

pub mod login;
pub mod role;
pub mod user;

pub use login::LoginRequest;
pub use role::RoleRequest;
pub use user::{UserRequest, has_full_name, is_valid_username};
