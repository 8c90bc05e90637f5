//! Core types for shop module configuration.
//!
//! This crate holds the pieces every other shopcfg crate and every
//! embedding application agrees on:
//!
//! - [`ShopId`]: positive integer key addressing one shop
//! - [`ErrorCode`]: stable error codes across crate boundaries
//!
//! # Crate Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  shopcfg-types   : ShopId, ErrorCode            ◄── HERE     │
//! └─────────────────────────────────────────────────────────────┘
//!                               ↓
//! ┌─────────────────────────────────────────────────────────────┐
//! │  shopcfg-runtime : storage, schema, mapper, environment,    │
//! │                    ShopConfigurationDao                      │
//! └─────────────────────────────────────────────────────────────┘
//! ```

mod error;
mod id;

pub use error::{assert_error_code, assert_error_codes, ErrorCode};
pub use id::{ParseShopIdError, ShopId};
