//! forge::resolver
//!
//! Turn a remote URL, revision, path and selection into a permalink.

use thiserror::Error;

use super::kind::ForgeKind;
use super::registry::ForgeRegistry;
use super::template::{expand, Placeholders};
use crate::core::types::{LinkRequest, Selection};

/// Errors from link resolution.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    /// No forge rule matched the remote URL.
    #[error("Could not build a remote link")]
    NoMatch {
        /// The remote URL that was tried
        remote_url: String,
    },
}

/// A formatted link and the rule that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLink {
    /// The permalink
    pub url: String,
    /// Host of the matching table entry
    pub rule_host: String,
    /// Kind of the matching table entry
    pub kind: ForgeKind,
}

/// Resolve a link request against a registry.
///
/// Rules are tried in registry order and the first match is formatted.
///
/// # Errors
///
/// [`ResolveError::NoMatch`] if the remote belongs to no known forge.
///
/// # Example
///
/// ```
/// use forgelink::core::types::{LinkRequest, Selection};
/// use forgelink::forge::{resolve, ForgeRegistry};
///
/// let registry = ForgeRegistry::with_defaults();
/// let request = LinkRequest {
///     remote_url: "git@gitlab.com:group/proj.git".to_string(),
///     path: "src/lib.py".to_string(),
///     revision: "deadbeef".to_string(),
///     selection: Some(Selection::lines(3, 3).unwrap()),
/// };
/// assert_eq!(
///     resolve(&registry, &request).unwrap(),
///     "https://gitlab.com/group/proj/-/blob/deadbeef/src/lib.py#L3"
/// );
/// ```
pub fn resolve(registry: &ForgeRegistry, request: &LinkRequest) -> Result<String, ResolveError> {
    resolve_link(registry, request).map(|link| link.url)
}

/// Like [`resolve`], also reporting which rule matched.
pub fn resolve_link(
    registry: &ForgeRegistry,
    request: &LinkRequest,
) -> Result<ResolvedLink, ResolveError> {
    let (rule, captures) =
        registry
            .find(&request.remote_url)
            .ok_or_else(|| ResolveError::NoMatch {
                remote_url: request.remote_url.clone(),
            })?;

    let host = captures
        .name("host")
        .map_or(rule.host(), |m| m.as_str())
        .to_lowercase();
    let namespace = captures.name("ns").map_or("", |m| m.as_str());

    let mut values = Placeholders::new();
    values
        .set('p', rule.protocol())
        .set('h', host)
        .set('n', namespace)
        .set('r', request.revision.as_str())
        .set('f', request.path.as_str());
    if let Some(selection) = request.selection {
        values.set('s', selection.start().to_string());
        if let Selection::Range { end, .. } = selection {
            values.set('e', end.to_string());
        }
    }

    let templates = rule.templates(&captures);
    let mut url = expand(templates.base, &values);
    if values.contains('s') {
        url.push_str(&expand(templates.start, &values));
        if let (Some(end), true) = (templates.end, values.contains('e')) {
            url.push_str(&expand(end, &values));
        }
    }

    Ok(ResolvedLink {
        url,
        rule_host: rule.host().to_string(),
        kind: rule.kind(),
    })
}
