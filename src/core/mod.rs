//! core
//!
//! Core domain types, paths, and configuration for forgelink.
//!
//! # Modules
//!
//! - [`types`] - Line selections and link requests
//! - [`config`] - Configuration schema and loading
//! - [`paths`] - Repository root discovery and repo-relative paths
//!
//! # Design Principles
//!
//! - Strong typing prevents invalid selections at construction
//! - Schemas are strict and self-describing

pub mod config;
pub mod paths;
pub mod types;
