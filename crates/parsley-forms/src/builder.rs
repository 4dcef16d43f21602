// File: src/builder.rs
// Purpose: Translate a field's validation rules into parsley.js attributes

use crate::attrs::{keys, AttributeMap};
use crate::rule::ValidationRule;
use std::fmt::Display;
use tracing::{debug, trace};

/// Dotted-quad IPv4 address, each octet 0-255
pub const IPV4_PATTERN: &str = concat!(
    r"^\b(25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.",
    r"(25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.",
    r"(25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.",
    r"(25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\b$",
);

/// parsley.js' own list delimiter
pub const DEFAULT_DELIMITER: &str = ",";

/// Used when an allowed value contains the default delimiter
pub const FALLBACK_DELIMITER: &str = ";;;";

pub const DEFAULT_TRIGGER: &str = "change";

/// Required fields are re-validated on every keystroke
pub const REQUIRED_TRIGGER: &str = "key";

/// Build the client-side validation attributes for a field.
///
/// `base` holds attributes supplied by the caller; it is copied, never
/// modified. Rules are applied in order and a later rule may overwrite an
/// attribute set by an earlier one, with two exceptions: a `regexp` given in
/// `base` always wins, and a `Regexp` rule never replaces a `regexp` that is
/// already present.
///
/// Once at least one rule has been seen, `trigger` defaults to `change`
/// (`key` if any rule is `Required`, whatever was there before) and
/// `error-message` defaults to the first non-empty rule message.
///
/// # Example
///
/// ```
/// use parsley_forms::{build, AttributeMap, ValidationRule};
///
/// let rules = [
///     ValidationRule::number_range(Some(5.0), Some(10.0)),
///     ValidationRule::required(),
/// ];
/// let attrs = build(&rules, &AttributeMap::new());
///
/// assert_eq!(attrs.get("range"), Some("[5,10]"));
/// assert_eq!(attrs.get("required"), Some("true"));
/// assert_eq!(attrs.get("trigger"), Some("key"));
/// ```
pub fn build(rules: &[ValidationRule], base: &AttributeMap) -> AttributeMap {
    let mut attrs = base.clone();
    let explicit_regexp = base.contains_key(keys::REGEXP);
    let mut required = false;

    for rule in rules {
        trace!(kind = %rule.kind(), "applying validation rule");
        match rule {
            ValidationRule::Email { .. } => {
                attrs.insert(keys::TYPE, "email");
            }
            ValidationRule::EqualTo { fieldname, .. } => {
                attrs.insert(keys::EQUALTO, format!("#{}", fieldname));
            }
            ValidationRule::IpAddress { .. } => {
                if !explicit_regexp {
                    attrs.insert(keys::REGEXP, IPV4_PATTERN);
                }
            }
            ValidationRule::Length { min, max, .. } => {
                bounds(&mut attrs, *min, *max, keys::RANGELENGTH, keys::MINLENGTH, keys::MAXLENGTH);
            }
            ValidationRule::NumberRange { min, max, .. } => {
                bounds(&mut attrs, *min, *max, keys::RANGE, keys::MIN, keys::MAX);
            }
            ValidationRule::Required { .. } => {
                attrs.insert(keys::REQUIRED, "true");
                required = true;
            }
            ValidationRule::Regexp { regex, .. } => {
                if !attrs.contains_key(keys::REGEXP) {
                    attrs.insert(keys::REGEXP, regex.as_str());
                }
            }
            ValidationRule::Url { .. } => {
                attrs.insert(keys::TYPE, "url");
            }
            ValidationRule::AnyOf { values, .. } => {
                let delimiter = list_delimiter(values);
                if delimiter != DEFAULT_DELIMITER {
                    attrs.insert(keys::INLIST_DELIMITER, delimiter);
                }
                attrs.insert(keys::INLIST, values.join(delimiter));
            }
            ValidationRule::Other { name, .. } => {
                trace!(validator = %name, "no client-side mapping");
            }
        }
    }

    if rules.is_empty() {
        return attrs;
    }

    if required {
        attrs.insert(keys::TRIGGER, REQUIRED_TRIGGER);
    } else if !attrs.contains_key(keys::TRIGGER) {
        attrs.insert(keys::TRIGGER, DEFAULT_TRIGGER);
    }

    if !attrs.contains_key(keys::ERROR_MESSAGE) {
        let message = rules
            .iter()
            .filter_map(ValidationRule::message)
            .find(|m| !m.is_empty());
        if let Some(message) = message {
            attrs.insert(keys::ERROR_MESSAGE, message);
        }
    }

    debug!(rules = rules.len(), attributes = attrs.len(), "built validation attributes");
    attrs
}

/// Pick a delimiter that does not occur inside any of `values`
fn list_delimiter(values: &[String]) -> &'static str {
    if values.iter().any(|v| v.contains(DEFAULT_DELIMITER)) {
        FALLBACK_DELIMITER
    } else {
        DEFAULT_DELIMITER
    }
}

fn bounds<T: Display>(
    attrs: &mut AttributeMap,
    min: Option<T>,
    max: Option<T>,
    range_key: &str,
    min_key: &str,
    max_key: &str,
) {
    match (min, max) {
        (Some(min), Some(max)) => {
            attrs.insert(range_key, format!("[{},{}]", min, max));
        }
        (Some(min), None) => {
            attrs.insert(min_key, min.to_string());
        }
        (None, Some(max)) => {
            attrs.insert(max_key, max.to_string());
        }
        (None, None) => {}
    }
}
