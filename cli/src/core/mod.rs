//! # appfs Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//!
//! ## Overview
//!
//! This module aggregates the core infrastructure components shared by the
//! storage utilities and the command handlers.
//!
//! ## Architecture
//!
//! - `config`: Configuration loading, merging, and validation
//! - `error`: Error types and the `Result` alias
//!
//! ## Usage
//!
//! ```rust
//! use crate::core::config; // For loading configuration
//! use crate::core::error::{AppfsError, Result}; // For error handling
//! ```
//!
pub mod config;
pub mod error;
