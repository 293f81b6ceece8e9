//! git
//!
//! Single interface for all Git operations.
//!
//! # Architecture
//!
//! This module is the **ONLY doorway** to Git. No other module imports
//! `git2`. The [`crate::vcs`] layer adapts [`Git`] to the backend-neutral
//! [`crate::vcs::RepoInfo`] trait.
//!
//! # Responsibilities
//!
//! - Repository discovery from a file or directory
//! - HEAD resolution
//! - Remote lookup
//! - Tracking checks against the index
//! - Repo-relative path computation

mod interface;

pub use interface::{Git, GitError};
