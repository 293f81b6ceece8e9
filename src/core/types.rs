//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`Selection`] - A 1-based line or inclusive line range
//! - [`LinkRequest`] - Everything needed to format one permalink
//!
//! # Validation
//!
//! Selections are validated at construction time: line 0 does not exist,
//! and a range whose ends coincide is a single line.
//!
//! # Examples
//!
//! ```
//! use forgelink::core::types::Selection;
//!
//! assert_eq!(Selection::lines(7, 7).unwrap(), Selection::Line(7));
//! assert_eq!(
//!     Selection::lines(20, 10).unwrap(),
//!     Selection::Range { start: 10, end: 20 }
//! );
//! assert!(Selection::lines(0, 3).is_err());
//! ```

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid line selection: {0}")]
    InvalidSelection(String),
}

/// Selected lines in a file.
///
/// Lines are 1-based. `Range` always spans at least two lines with
/// `start < end`; use [`Selection::lines`] to construct one from editor
/// coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Selection {
    /// A single line
    Line(u32),
    /// An inclusive multi-line range
    Range { start: u32, end: u32 },
}

impl Selection {
    /// Build a selection from two line numbers, in either order.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidSelection` if either line is 0.
    pub fn lines(a: u32, b: u32) -> Result<Self, TypeError> {
        if a == 0 || b == 0 {
            return Err(TypeError::InvalidSelection(
                "line numbers start at 1".into(),
            ));
        }

        let (start, end) = if a <= b { (a, b) } else { (b, a) };
        if start == end {
            Ok(Selection::Line(start))
        } else {
            Ok(Selection::Range { start, end })
        }
    }

    /// Build a single-line selection.
    pub fn line(n: u32) -> Result<Self, TypeError> {
        Self::lines(n, n)
    }

    /// First selected line.
    pub fn start(&self) -> u32 {
        match self {
            Selection::Line(n) => *n,
            Selection::Range { start, .. } => *start,
        }
    }

    /// Last selected line.
    pub fn end(&self) -> u32 {
        match self {
            Selection::Line(n) => *n,
            Selection::Range { end, .. } => *end,
        }
    }

    /// Whether more than one line is selected.
    pub fn is_range(&self) -> bool {
        matches!(self, Selection::Range { .. })
    }
}

impl FromStr for Selection {
    type Err = TypeError;

    /// Parse `N`, `N:M` or `N-M`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse = |part: &str| {
            part.trim().parse::<u32>().map_err(|_| {
                TypeError::InvalidSelection(format!("'{}' is not a line number", part.trim()))
            })
        };

        match s.split_once([':', '-']) {
            Some((a, b)) => Self::lines(parse(a)?, parse(b)?),
            None => Self::line(parse(s)?),
        }
    }
}

impl std::fmt::Display for Selection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Selection::Line(n) => write!(f, "{}", n),
            Selection::Range { start, end } => write!(f, "{}:{}", start, end),
        }
    }
}

/// Inputs for formatting one permalink.
///
/// Built fresh for each invocation and discarded afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRequest {
    /// URL of the remote the link should point at
    pub remote_url: String,
    /// File path relative to the repository root, `/`-separated
    pub path: String,
    /// Revision the link should pin
    pub revision: String,
    /// Selected lines, if any
    pub selection: Option<Selection>,
}
