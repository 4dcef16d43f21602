// File: src/form.rs
// Purpose: Ordered collection of fields and binding of submitted data

use crate::attrs::AttributeMap;
use crate::error::FormError;
use crate::field::{Field, FieldKind};
use indexmap::IndexMap;
use tracing::debug;

/// Submitted form values in the order they arrived
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    fields: Vec<(String, String)>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_fields(fields: Vec<(String, String)>) -> Self {
        Self { fields }
    }

    /// Parse an `application/x-www-form-urlencoded` body.
    ///
    /// Pairs without `=` are kept with an empty value; undecodable
    /// sequences are passed through as-is.
    pub fn from_urlencoded(body: &str) -> Self {
        let fields = body
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| {
                let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
                (decode(key), decode(value))
            })
            .collect();
        Self { fields }
    }

    /// First value submitted under `name`
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

fn decode(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| spaced.clone())
}

/// A form definition: fields in declaration order.
///
/// The form binds submitted values to its fields so they can be rendered
/// again; checking those values is left to the server-side framework.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Form {
    fields: Vec<Field>,
}

impl Form {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field; names must be unique within the form.
    pub fn push(&mut self, field: Field) -> Result<(), FormError> {
        if self.fields.iter().any(|f| f.name == field.name) {
            return Err(FormError::DuplicateField(field.name));
        }
        self.fields.push(field);
        Ok(())
    }

    pub fn with_field(mut self, field: Field) -> Result<Self, FormError> {
        self.push(field)?;
        Ok(self)
    }

    pub fn field(&self, name: &str) -> Result<&Field, FormError> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .ok_or_else(|| FormError::UnknownField(name.to_string()))
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Bind a submission to the fields.
    ///
    /// A checkbox missing from the submission was unchecked by the user, so
    /// it is bound to an empty value rather than keeping its default.
    pub fn process(&mut self, data: &FormData) {
        for field in &mut self.fields {
            field.data = match data.get(&field.name) {
                Some(value) => Some(value.to_string()),
                None if field.kind == FieldKind::Boolean => Some(String::new()),
                None => None,
            };
        }
        debug!(submitted = data.len(), fields = self.fields.len(), "processed form data");
    }

    /// Validation attributes of every field, keyed by field name
    pub fn attribute_maps(&self) -> IndexMap<String, AttributeMap> {
        self.fields
            .iter()
            .map(|f| (f.name.clone(), f.attributes(&AttributeMap::new())))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::ValidationRule;
    use pretty_assertions::assert_eq;

    fn sample_form() -> Form {
        Form::new()
            .with_field(Field::text("first_value", "Some Value").with_default("Some value"))
            .and_then(|f| {
                f.with_field(
                    Field::text("second_value", "Should be identical")
                        .with_rule(ValidationRule::equal_to("first_value")),
                )
            })
            .and_then(|f| {
                f.with_field(
                    Field::boolean("accept", "Accept")
                        .with_rule(ValidationRule::required())
                        .with_default("y"),
                )
            })
            .unwrap()
    }

    #[test]
    fn test_urlencoded_parsing() {
        let data = FormData::from_urlencoded("email=a%40b.com&name=John+Smith&empty=&flag");
        assert_eq!(data.get("email"), Some("a@b.com"));
        assert_eq!(data.get("name"), Some("John Smith"));
        assert_eq!(data.get("empty"), Some(""));
        assert_eq!(data.get("flag"), Some(""));
        assert_eq!(data.get("missing"), None);
        assert_eq!(data.len(), 4);
    }

    #[test]
    fn test_urlencoded_empty_body() {
        assert!(FormData::from_urlencoded("").is_empty());
    }

    #[test]
    fn test_duplicate_field_rejected() {
        let err = sample_form()
            .with_field(Field::text("accept", "Again"))
            .unwrap_err();
        assert_eq!(err, FormError::DuplicateField("accept".to_string()));
        assert_eq!(err.to_string(), "Field already defined: accept");
    }

    #[test]
    fn test_unknown_field() {
        let form = sample_form();
        assert_eq!(form.field("second_value").unwrap().label, "Should be identical");
        assert_eq!(
            form.field("nope").unwrap_err(),
            FormError::UnknownField("nope".to_string())
        );
    }

    #[test]
    fn test_process_binds_values() {
        let mut form = sample_form();
        form.process(&FormData::from_urlencoded("first_value=abc"));

        assert_eq!(form.field("first_value").unwrap().value(), Some("abc"));
        assert_eq!(form.field("second_value").unwrap().value(), None);
        // unchecked checkbox
        assert!(!form.field("accept").unwrap().is_checked());
    }

    #[test]
    fn test_attribute_maps() {
        let maps = sample_form().attribute_maps();
        let names: Vec<_> = maps.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["first_value", "second_value", "accept"]);
        assert!(maps["first_value"].is_empty());
        assert_eq!(maps["second_value"].get("equalto"), Some("#first_value"));
        assert_eq!(maps["accept"].get("trigger"), Some("key"));
    }
}
