// File: src/rule.rs
// Purpose: Server-side validation rules attached to form fields

use regex::Regex;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Source text of a `Regexp` rule.
///
/// The pattern is resolved to text when the rule is defined, so the builder
/// never needs to care how the pattern was supplied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegexSource {
    /// Pattern taken from a compiled `Regex`
    Compiled { source: String },
    /// Pattern supplied as plain text
    Raw(String),
}

impl RegexSource {
    /// Compile `pattern` to make sure it is valid, keeping only its source.
    pub fn compile(pattern: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(pattern)?;
        Ok(Self::from(&regex))
    }

    /// Pattern text as sent to the client
    pub fn as_str(&self) -> &str {
        match self {
            RegexSource::Compiled { source } => source,
            RegexSource::Raw(source) => source,
        }
    }
}

impl From<&Regex> for RegexSource {
    fn from(regex: &Regex) -> Self {
        RegexSource::Compiled {
            source: regex.as_str().to_string(),
        }
    }
}

impl From<Regex> for RegexSource {
    fn from(regex: Regex) -> Self {
        RegexSource::from(&regex)
    }
}

impl From<&str> for RegexSource {
    fn from(pattern: &str) -> Self {
        RegexSource::Raw(pattern.to_string())
    }
}

impl From<String> for RegexSource {
    fn from(pattern: String) -> Self {
        RegexSource::Raw(pattern)
    }
}

/// Kind of a validation rule, without its parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    Email,
    EqualTo,
    IpAddress,
    Length,
    NumberRange,
    Required,
    Regexp,
    Url,
    AnyOf,
    Other,
}

impl RuleKind {
    pub const ALL: [RuleKind; 10] = [
        RuleKind::Email,
        RuleKind::EqualTo,
        RuleKind::IpAddress,
        RuleKind::Length,
        RuleKind::NumberRange,
        RuleKind::Required,
        RuleKind::Regexp,
        RuleKind::Url,
        RuleKind::AnyOf,
        RuleKind::Other,
    ];

    /// Look up a kind by the name used in serialized rules
    pub fn from_name(name: &str) -> Option<RuleKind> {
        RuleKind::ALL.into_iter().find(|kind| kind.to_string() == name)
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RuleKind::Email => "email",
            RuleKind::EqualTo => "equal_to",
            RuleKind::IpAddress => "ip_address",
            RuleKind::Length => "length",
            RuleKind::NumberRange => "number_range",
            RuleKind::Required => "required",
            RuleKind::Regexp => "regexp",
            RuleKind::Url => "url",
            RuleKind::AnyOf => "any_of",
            RuleKind::Other => "other",
        };
        f.write_str(name)
    }
}

/// A declarative constraint attached to a form field.
///
/// Rules are created once when the form is defined and never change
/// afterwards. Parameters are kept verbatim: a `Length` with `min > max` is
/// the form definition's problem, not this crate's.
///
/// Serialized rules are tagged by `kind`. A tag this crate does not know
/// deserializes to `Other` with the tag as its name, so rule lists written
/// for a richer server-side validator set still load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", tag = "kind", rename_all = "snake_case")]
pub enum ValidationRule {
    Email {
        #[serde(default)]
        message: Option<String>,
    },
    EqualTo {
        /// Identifier of the field whose value must match
        fieldname: String,
        #[serde(default)]
        message: Option<String>,
    },
    IpAddress {
        #[serde(default)]
        message: Option<String>,
    },
    Length {
        #[serde(default)]
        min: Option<usize>,
        #[serde(default)]
        max: Option<usize>,
        #[serde(default)]
        message: Option<String>,
    },
    NumberRange {
        #[serde(default)]
        min: Option<f64>,
        #[serde(default)]
        max: Option<f64>,
        #[serde(default)]
        message: Option<String>,
    },
    Required {
        #[serde(default)]
        message: Option<String>,
    },
    Regexp {
        regex: RegexSource,
        #[serde(default)]
        message: Option<String>,
    },
    Url {
        #[serde(default)]
        message: Option<String>,
    },
    AnyOf {
        values: Vec<String>,
        #[serde(default)]
        message: Option<String>,
    },
    /// A server-only validator with no client-side counterpart
    Other {
        name: String,
        #[serde(default)]
        message: Option<String>,
    },
}

impl ValidationRule {
    pub fn email() -> Self {
        ValidationRule::Email { message: None }
    }

    pub fn equal_to(fieldname: impl Into<String>) -> Self {
        ValidationRule::EqualTo {
            fieldname: fieldname.into(),
            message: None,
        }
    }

    pub fn ip_address() -> Self {
        ValidationRule::IpAddress { message: None }
    }

    /// Length bounds in characters; `None` leaves that side open.
    pub fn length(min: Option<usize>, max: Option<usize>) -> Self {
        ValidationRule::Length {
            min,
            max,
            message: None,
        }
    }

    pub fn number_range(min: Option<f64>, max: Option<f64>) -> Self {
        ValidationRule::NumberRange {
            min,
            max,
            message: None,
        }
    }

    pub fn required() -> Self {
        ValidationRule::Required { message: None }
    }

    pub fn regexp(regex: impl Into<RegexSource>) -> Self {
        ValidationRule::Regexp {
            regex: regex.into(),
            message: None,
        }
    }

    pub fn url() -> Self {
        ValidationRule::Url { message: None }
    }

    pub fn any_of<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ValidationRule::AnyOf {
            values: values.into_iter().map(Into::into).collect(),
            message: None,
        }
    }

    pub fn other(name: impl Into<String>) -> Self {
        ValidationRule::Other {
            name: name.into(),
            message: None,
        }
    }

    /// Attach the human readable message shown when the rule fails
    pub fn with_message(mut self, text: impl Into<String>) -> Self {
        *self.message_slot() = Some(text.into());
        self
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            ValidationRule::Email { message }
            | ValidationRule::EqualTo { message, .. }
            | ValidationRule::IpAddress { message }
            | ValidationRule::Length { message, .. }
            | ValidationRule::NumberRange { message, .. }
            | ValidationRule::Required { message }
            | ValidationRule::Regexp { message, .. }
            | ValidationRule::Url { message }
            | ValidationRule::AnyOf { message, .. }
            | ValidationRule::Other { message, .. } => message.as_deref(),
        }
    }

    pub fn kind(&self) -> RuleKind {
        match self {
            ValidationRule::Email { .. } => RuleKind::Email,
            ValidationRule::EqualTo { .. } => RuleKind::EqualTo,
            ValidationRule::IpAddress { .. } => RuleKind::IpAddress,
            ValidationRule::Length { .. } => RuleKind::Length,
            ValidationRule::NumberRange { .. } => RuleKind::NumberRange,
            ValidationRule::Required { .. } => RuleKind::Required,
            ValidationRule::Regexp { .. } => RuleKind::Regexp,
            ValidationRule::Url { .. } => RuleKind::Url,
            ValidationRule::AnyOf { .. } => RuleKind::AnyOf,
            ValidationRule::Other { .. } => RuleKind::Other,
        }
    }

    fn message_slot(&mut self) -> &mut Option<String> {
        match self {
            ValidationRule::Email { message }
            | ValidationRule::EqualTo { message, .. }
            | ValidationRule::IpAddress { message }
            | ValidationRule::Length { message, .. }
            | ValidationRule::NumberRange { message, .. }
            | ValidationRule::Required { message }
            | ValidationRule::Regexp { message, .. }
            | ValidationRule::Url { message }
            | ValidationRule::AnyOf { message, .. }
            | ValidationRule::Other { message, .. } => message,
        }
    }
}

impl Serialize for ValidationRule {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        ValidationRule::serialize(self, serializer)
    }
}

impl<'de> Deserialize<'de> for ValidationRule {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match TaggedRule::deserialize(deserializer)? {
            TaggedRule::Known(rule) => Ok(rule),
            TaggedRule::Unknown { kind, message } => match RuleKind::from_name(&kind) {
                Some(_) => Err(de::Error::custom(format!(
                    "invalid parameters for `{}` rule",
                    kind
                ))),
                None => Ok(ValidationRule::Other {
                    name: kind,
                    message,
                }),
            },
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TaggedRule {
    Known(#[serde(deserialize_with = "ValidationRule::deserialize")] ValidationRule),
    Unknown {
        kind: String,
        #[serde(default)]
        message: Option<String>,
    },
}
