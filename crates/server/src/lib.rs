//! SEWA Goatique API server library.
//!
//! This crate provides the storefront and admin API as a library,
//! allowing it to be driven by the CLI and exercised by integration
//! tests without a running binary.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
