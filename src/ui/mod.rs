//! ui
//!
//! User-facing output.
//!
//! # Modules
//!
//! - [`output`] - Output formatting and display
//!
//! # Design
//!
//! All terminal output goes through this module so verbosity handling and
//! message prefixes stay consistent across commands.

pub mod output;
