//! Core types for Goatique.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod money;
pub mod status;

pub use id::*;
pub use status::{Milestone, MessageKind, OrderStatus};
