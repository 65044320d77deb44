//! Sweet Dessert Core - Shared types library.
//!
//! This crate provides common types used across all Sweet Dessert components:
//! - `api` - JSON backend serving the storefront, admin, and chat surfaces
//! - `cli` - Command-line tools for migrations, seeding, and indexing
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no database access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, order
//!   numbers, and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
