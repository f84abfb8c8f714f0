//! Goatique Core - Shared domain types.
//!
//! This crate provides the domain logic shared by the Goatique components:
//! - `server` - The storefront and admin JSON API
//! - `cli` - Command-line tools for migrations and management
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no database
//! access, no HTTP. This keeps it lightweight and allows it to be embedded
//! anywhere, including UI layers that hold the shopping cart.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, order status and milestones, money helpers
//! - [`cart`] - The client-held cart state container
//! - [`snapshot`] - The versioned order line-item snapshot

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod snapshot;
pub mod types;

pub use types::*;
