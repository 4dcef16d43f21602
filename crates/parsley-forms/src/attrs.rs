// File: src/attrs.rs
// Purpose: Ordered map of parsley.js attributes and their markup emission

use indexmap::IndexMap;
use maud::Render;
use serde::Serialize;

/// Attribute names understood by parsley.js, without the `data-` prefix
pub mod keys {
    pub const TYPE: &str = "type";
    pub const EQUALTO: &str = "equalto";
    pub const REGEXP: &str = "regexp";
    pub const RANGELENGTH: &str = "rangelength";
    pub const MINLENGTH: &str = "minlength";
    pub const MAXLENGTH: &str = "maxlength";
    pub const RANGE: &str = "range";
    pub const MIN: &str = "min";
    pub const MAX: &str = "max";
    pub const REQUIRED: &str = "required";
    pub const INLIST: &str = "inlist";
    pub const INLIST_DELIMITER: &str = "inlist-delimiter";
    pub const TRIGGER: &str = "trigger";
    pub const ERROR_MESSAGE: &str = "error-message";
}

/// Prefix added to every key when attributes are written into markup
pub const DATA_PREFIX: &str = "data-";

/// Client-side validation attributes of a single field.
///
/// Keys keep insertion order and are unique; inserting an existing key
/// replaces its value in place. Values are stored unescaped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AttributeMap {
    entries: IndexMap<String, String>,
}

impl AttributeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalise a key to its prefix-less form.
    ///
    /// `data_regexp`, `data-regexp` and `regexp` all name the same attribute.
    /// Underscores become hyphens only behind a `data_` prefix, so
    /// `data_error_message` is `error-message` while other keys are kept.
    pub fn normalize_key(key: &str) -> String {
        if let Some(rest) = key.strip_prefix("data_") {
            rest.replace('_', "-")
        } else {
            key.strip_prefix("data-").unwrap_or(key).to_string()
        }
    }

    /// Insert a value, returning the one it replaced
    pub fn insert(&mut self, key: impl AsRef<str>, value: impl Into<String>) -> Option<String> {
        self.entries
            .insert(Self::normalize_key(key.as_ref()), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .get(&Self::normalize_key(key))
            .map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(&Self::normalize_key(key))
    }

    /// Remove a key, keeping the order of the remaining entries
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.shift_remove(&Self::normalize_key(key))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Render as ` data-key="value"` pairs, escaping each value once.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_to(&mut out);
        out
    }

    /// Append the rendered attributes to `buffer`
    pub fn render_to(&self, buffer: &mut String) {
        for (key, value) in &self.entries {
            push_attr(buffer, DATA_PREFIX, key, value);
        }
    }
}

/// Write ` <prefix><name>="<value>"`, escaping the value
pub(crate) fn push_attr(buffer: &mut String, prefix: &str, name: &str, value: &str) {
    buffer.push(' ');
    buffer.push_str(prefix);
    buffer.push_str(name);
    buffer.push_str("=\"");
    value.render_to(buffer);
    buffer.push('"');
}

/// Plain markup attributes such as `class` or `placeholder`.
///
/// Written without a prefix. A trailing underscore is dropped so `class_`
/// and `for_` can be used where the bare word is awkward.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HtmlAttributes {
    entries: IndexMap<String, String>,
}

impl HtmlAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl AsRef<str>, value: impl Into<String>) -> Option<String> {
        let name = name.as_ref();
        let name = name.strip_suffix('_').unwrap_or(name);
        self.entries.insert(name.to_string(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn render_to(&self, buffer: &mut String) {
        for (name, value) in &self.entries {
            push_attr(buffer, "", name, value);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for HtmlAttributes
where
    K: AsRef<str>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = HtmlAttributes::new();
        for (name, value) in iter {
            attrs.insert(name, value);
        }
        attrs
    }
}

impl<K, V> FromIterator<(K, V)> for AttributeMap
where
    K: AsRef<str>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = AttributeMap::new();
        map.extend(iter);
        map
    }
}

impl<K, V> Extend<(K, V)> for AttributeMap
where
    K: AsRef<str>,
    V: Into<String>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<'a> IntoIterator for &'a AttributeMap {
    type Item = (&'a String, &'a String);
    type IntoIter = indexmap::map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
