//! forge::template
//!
//! Placeholder substitution for link templates.
//!
//! Templates are plain strings with `%x` placeholders, where `x` is a single
//! character key. `%%` produces a literal `%`. Placeholders with no value are
//! left as written, so a missing key is visible in the output rather than
//! silently dropped.

use std::collections::HashMap;

/// Mapping from placeholder key to its value.
///
/// Built from `(key, value)` pairs, so every key always has a value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Placeholders {
    values: HashMap<char, String>,
}

impl Placeholders {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a placeholder, replacing any previous value.
    pub fn set(&mut self, key: char, value: impl Into<String>) -> &mut Self {
        self.values.insert(key, value.into());
        self
    }

    /// Check whether a placeholder has a value.
    pub fn contains(&self, key: char) -> bool {
        self.values.contains_key(&key)
    }

    /// Get the value of a placeholder.
    pub fn get(&self, key: char) -> Option<&str> {
        self.values.get(&key).map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<(char, S)> for Placeholders {
    fn from_iter<I: IntoIterator<Item = (char, S)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k, v.into())).collect(),
        }
    }
}

/// Expand `%x` placeholders in `template`.
///
/// # Example
///
/// ```
/// use forgelink::forge::template::{expand, Placeholders};
///
/// let values: Placeholders = [('h', "github.com"), ('n', "o/r")].into_iter().collect();
/// assert_eq!(expand("https://%h/%n", &values), "https://github.com/o/r");
/// assert_eq!(expand("100%% %z", &values), "100% %z");
/// ```
pub fn expand(template: &str, values: &Placeholders) -> String {
    let mut out = String::with_capacity(template.len() + 32);
    let mut chars = template.chars();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('%') => out.push('%'),
            Some(key) => match values.get(key) {
                Some(value) => out.push_str(value),
                None => {
                    out.push('%');
                    out.push(key);
                }
            },
            // Trailing lone '%'
            None => out.push('%'),
        }
    }

    out
}
