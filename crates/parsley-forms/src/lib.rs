// parsley-forms - parsley.js attributes from server-side validation rules
// One set of rules drives both server-side checks and client-side feedback

pub mod attrs;
pub mod builder;
pub mod error;
pub mod field;
pub mod form;
pub mod rule;

pub use attrs::{keys, AttributeMap, HtmlAttributes, DATA_PREFIX};
pub use builder::{
    build, DEFAULT_DELIMITER, DEFAULT_TRIGGER, FALLBACK_DELIMITER, IPV4_PATTERN, REQUIRED_TRIGGER,
};
pub use error::FormError;
pub use field::{Field, FieldKind, Widget};
pub use form::{Form, FormData};
pub use rule::{RegexSource, RuleKind, ValidationRule};

// Re-export Maud so callers can compose rendered fields into templates
pub use maud::{Markup, Render};
