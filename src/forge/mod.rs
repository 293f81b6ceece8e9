//! forge
//!
//! Forge detection and permalink formatting.
//!
//! # Architecture
//!
//! - [`kind`]: the closed set of forge flavors, with per-kind match patterns
//!   and link templates
//! - [`registry`]: the ordered host table and its compiled rules, plus the
//!   process-wide registry
//! - [`resolver`]: first-match resolution of a [`LinkRequest`] into a URL
//! - [`template`]: `%x` placeholder substitution
//!
//! Nothing here touches the network or a repository; resolution is a pure
//! function of the request and the registry.
//!
//! # Example
//!
//! ```
//! use forgelink::core::types::{LinkRequest, Selection};
//! use forgelink::forge::{resolve, ForgeRegistry};
//!
//! let registry = ForgeRegistry::global();
//! let url = resolve(&registry, &LinkRequest {
//!     remote_url: "https://github.com/octocat/hello.git".to_string(),
//!     path: "src/main.txt".to_string(),
//!     revision: "abc123".to_string(),
//!     selection: Some(Selection::lines(10, 20).unwrap()),
//! }).unwrap();
//!
//! assert_eq!(url, "https://github.com/octocat/hello/blob/abc123/src/main.txt#L10-L20");
//! ```
//!
//! [`LinkRequest`]: crate::core::types::LinkRequest

pub mod kind;
pub mod registry;
pub mod resolver;
pub mod template;

pub use kind::{ForgeKind, LinkTemplates};
pub use registry::{default_table, ForgeEntry, ForgeRegistry, ForgeRule, RegistryError};
pub use resolver::{resolve, resolve_link, ResolveError, ResolvedLink};
