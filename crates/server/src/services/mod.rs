//! Business logic services.
//!
//! - `auth` - Password hashing and verification
//! - `jwt` - Admin bearer token signing and validation
//! - `email` - Best-effort transactional email

pub mod auth;
pub mod email;
pub mod jwt;
