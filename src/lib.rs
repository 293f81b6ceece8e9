//! forgelink - permalinks to files on their forge
//!
//! forgelink turns a file in a local git or Mercurial working copy into a
//! URL on the forge hosting it, pinned to the checked-out revision and
//! optionally to a line or line range.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to engine)
//! - [`engine`] - Discover, check, pick a remote, resolve
//! - [`core`] - Domain types, paths, and configuration
//! - [`forge`] - Forge table, URL matching, and link templates
//! - [`git`] - Single interface for all Git operations
//! - [`vcs`] - Backend-neutral repository queries (git, Mercurial)
//! - [`ui`] - Output
//!
//! # Correctness Invariants
//!
//! 1. Link resolution is a pure function of the request and the forge table
//! 2. The first matching table entry wins
//! 3. Untracked files never produce a link
//! 4. The repository is never modified

pub mod cli;
pub mod core;
pub mod engine;
pub mod forge;
pub mod git;
pub mod ui;
pub mod vcs;
