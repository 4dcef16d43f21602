// File: src/field.rs
// Purpose: Form fields and the widgets that render them with validation attributes

use crate::attrs::{AttributeMap, HtmlAttributes};
use crate::builder::build;
use crate::rule::ValidationRule;
use maud::{html, Markup, PreEscaped, Render};

/// Values a checkbox treats as unchecked
const FALSE_VALUES: &[&str] = &["", "false"];

/// Value a checked checkbox submits
const CHECKBOX_VALUE: &str = "y";

/// Data type of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
    Decimal,
    Float,
    Boolean,
    Password,
    Select,
}

impl FieldKind {
    pub fn widget(self) -> Widget {
        match self {
            FieldKind::Text | FieldKind::Integer | FieldKind::Decimal | FieldKind::Float => {
                Widget::TextInput
            }
            FieldKind::Boolean => Widget::CheckboxInput,
            FieldKind::Password => Widget::PasswordInput,
            FieldKind::Select => Widget::Select,
        }
    }
}

/// Markup element used to render a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Widget {
    TextInput,
    PasswordInput,
    CheckboxInput,
    Select,
}

impl Widget {
    /// Render `field` with the already built validation `attrs`.
    ///
    /// `html_attrs` are written as plain attributes after the ones the
    /// widget sets itself; a caller value for `id`, `value` or another
    /// widget attribute replaces the widget's.
    pub fn render(self, field: &Field, attrs: &AttributeMap, html_attrs: &HtmlAttributes) -> Markup {
        let mut own = HtmlAttributes::new();
        own.insert("id", field.name.as_str());
        own.insert("name", field.name.as_str());
        match self {
            Widget::TextInput => {
                own.insert("type", "text");
                own.insert("value", field.value().unwrap_or_default());
            }
            // submitted passwords are never echoed back
            Widget::PasswordInput => {
                own.insert("type", "password");
                own.insert("value", "");
            }
            Widget::CheckboxInput => {
                own.insert("type", "checkbox");
                own.insert("value", CHECKBOX_VALUE);
            }
            Widget::Select => {}
        }
        for (name, value) in html_attrs.iter() {
            own.insert(name, value);
        }

        let mut out = String::new();
        out.push_str(if self == Widget::Select { "<select" } else { "<input" });
        own.render_to(&mut out);
        if self == Widget::CheckboxInput && field.is_checked() {
            out.push_str(" checked");
        }
        attrs.render_to(&mut out);
        out.push('>');

        if self == Widget::Select {
            let current = field.value();
            let options = html! {
                @for (value, label) in &field.choices {
                    option value=(value) selected[current == Some(value.as_str())] { (label) }
                }
            };
            out.push_str(&options.into_string());
            out.push_str("</select>");
        }
        PreEscaped(out)
    }
}

/// A form field: identity, validation rules and current value.
///
/// Rendering builds the parsley.js attributes from `rules` and hands them to
/// the widget for `kind`.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    pub rules: Vec<ValidationRule>,
    /// Value used until something is submitted
    pub default: Option<String>,
    /// Submitted value
    pub data: Option<String>,
    /// `(value, label)` pairs for select fields
    pub choices: Vec<(String, String)>,
}

impl Field {
    pub fn new(name: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            kind,
            rules: Vec::new(),
            default: None,
            data: None,
            choices: Vec::new(),
        }
    }

    pub fn text(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldKind::Text)
    }

    pub fn integer(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldKind::Integer)
    }

    pub fn decimal(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldKind::Decimal)
    }

    pub fn float(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldKind::Float)
    }

    pub fn boolean(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldKind::Boolean)
    }

    pub fn password(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldKind::Password)
    }

    pub fn select<I, V, L>(name: impl Into<String>, label: impl Into<String>, choices: I) -> Self
    where
        I: IntoIterator<Item = (V, L)>,
        V: Into<String>,
        L: Into<String>,
    {
        let mut field = Self::new(name, label, FieldKind::Select);
        field.choices = choices
            .into_iter()
            .map(|(v, l)| (v.into(), l.into()))
            .collect();
        field
    }

    pub fn with_rule(mut self, rule: ValidationRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn with_rules(mut self, rules: impl IntoIterator<Item = ValidationRule>) -> Self {
        self.rules.extend(rules);
        self
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn widget(&self) -> Widget {
        self.kind.widget()
    }

    /// Submitted value, falling back to the default
    pub fn value(&self) -> Option<&str> {
        self.data.as_deref().or(self.default.as_deref())
    }

    pub fn is_checked(&self) -> bool {
        self.value()
            .map(|v| !FALSE_VALUES.contains(&v))
            .unwrap_or(false)
    }

    /// Validation attributes for this field, on top of `extra`
    pub fn attributes(&self, extra: &AttributeMap) -> AttributeMap {
        build(&self.rules, extra)
    }

    /// Render the widget.
    ///
    /// `extra` feeds the builder and overrides generated validation
    /// attributes where the builder allows it; `html_attrs` are plain
    /// attributes such as `class` or `placeholder`, written without the
    /// `data-` prefix.
    pub fn render_with(&self, extra: &AttributeMap, html_attrs: &HtmlAttributes) -> Markup {
        let attrs = self.attributes(extra);
        self.widget().render(self, &attrs, html_attrs)
    }

    pub fn render_label(&self) -> Markup {
        html! {
            label for=(self.name) { (self.label) }
        }
    }
}

impl Render for Field {
    fn render(&self) -> Markup {
        self.render_with(&AttributeMap::new(), &HtmlAttributes::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(FieldKind::Text, Widget::TextInput)]
    #[case(FieldKind::Integer, Widget::TextInput)]
    #[case(FieldKind::Decimal, Widget::TextInput)]
    #[case(FieldKind::Float, Widget::TextInput)]
    #[case(FieldKind::Boolean, Widget::CheckboxInput)]
    #[case(FieldKind::Password, Widget::PasswordInput)]
    #[case(FieldKind::Select, Widget::Select)]
    fn test_kind_widget(#[case] kind: FieldKind, #[case] widget: Widget) {
        assert_eq!(kind.widget(), widget);
    }

    #[test]
    fn test_text_input_markup() {
        let field = Field::text("email", "E-Mail Address")
            .with_rule(ValidationRule::email().with_message("Not a valid email"))
            .with_default("test@example.com");

        assert_eq!(
            field.render().into_string(),
            "<input id=\"email\" name=\"email\" type=\"text\" value=\"test@example.com\" \
             data-type=\"email\" data-trigger=\"change\" data-error-message=\"Not a valid email\">"
        );
    }

    #[test]
    fn test_submitted_data_replaces_default() {
        let mut field = Field::integer("number_range", "Number").with_default("7");
        field.data = Some("9".to_string());
        assert_eq!(field.value(), Some("9"));
        assert!(field.render().into_string().contains("value=\"9\""));
    }

    #[test]
    fn test_value_is_escaped() {
        let field = Field::text("q", "Query").with_default("\"><script>");
        let html = field.render().into_string();
        assert!(html.contains("value=\"&quot;&gt;&lt;script&gt;\""));
    }

    #[test]
    fn test_password_hides_value() {
        let field = Field::password("secret", "Secret")
            .with_rule(ValidationRule::required())
            .with_default("hunter2");
        let html = field.render().into_string();
        assert!(html.contains("type=\"password\""));
        assert!(html.contains("value=\"\""));
        assert!(!html.contains("hunter2"));
        assert!(html.contains("data-required=\"true\" data-trigger=\"key\""));
    }

    #[rstest]
    #[case(Some("y"), true)]
    #[case(Some("true"), true)]
    #[case(Some("false"), false)]
    #[case(Some(""), false)]
    #[case(None, false)]
    fn test_checkbox_checked(#[case] data: Option<&str>, #[case] checked: bool) {
        let mut field = Field::boolean("accept", "Accept");
        field.data = data.map(str::to_string);
        assert_eq!(field.is_checked(), checked);
        assert_eq!(field.render().into_string().contains(" checked"), checked);
    }

    #[test]
    fn test_select_markup() {
        let field = Field::select(
            "language",
            "Language",
            [("", "Please select"), ("py", "Python"), ("cpp", "C++")],
        )
        .with_rule(ValidationRule::required())
        .with_default("py");

        assert_eq!(
            field.render().into_string(),
            "<select id=\"language\" name=\"language\" data-required=\"true\" data-trigger=\"key\">\
             <option value=\"\">Please select</option>\
             <option value=\"py\" selected>Python</option>\
             <option value=\"cpp\">C++</option>\
             </select>"
        );
    }

    #[test]
    fn test_extra_attributes_are_kept() {
        let field = Field::text("color", "Colour").with_rule(ValidationRule::regexp("^#[0-9a-f]{6}$"));
        let extra: AttributeMap = [("data_regexp", "^#[0-9A-F]{6}$")].into_iter().collect();
        let attrs = field.attributes(&extra);
        assert_eq!(attrs.get("regexp"), Some("^#[0-9A-F]{6}$"));
        assert!(field
            .render_with(&extra, &HtmlAttributes::new())
            .into_string()
            .contains("data-regexp=\"^#[0-9A-F]{6}$\""));
    }

    #[test]
    fn test_plain_html_attributes_keep_their_names() {
        let field = Field::text("email", "E").with_rule(ValidationRule::email());
        let html_attrs: HtmlAttributes = [("class", "wide"), ("placeholder", "you@x")]
            .into_iter()
            .collect();

        assert_eq!(
            field.render_with(&AttributeMap::new(), &html_attrs).into_string(),
            "<input id=\"email\" name=\"email\" type=\"text\" value=\"\" \
             class=\"wide\" placeholder=\"you@x\" data-type=\"email\" data-trigger=\"change\">"
        );
    }

    #[test]
    fn test_html_attributes_replace_widget_attributes() {
        let field = Field::select("lang", "Language", [("py", "Python")]);
        let html_attrs: HtmlAttributes = [("id", "lang-select"), ("class_", "picker")]
            .into_iter()
            .collect();

        assert_eq!(
            field.render_with(&AttributeMap::new(), &html_attrs).into_string(),
            "<select id=\"lang-select\" name=\"lang\" class=\"picker\">\
             <option value=\"py\">Python</option></select>"
        );
    }

    #[test]
    fn test_render_label() {
        let field = Field::text("url", "URL <Field>");
        assert_eq!(
            field.render_label().into_string(),
            "<label for=\"url\">URL &lt;Field&gt;</label>"
        );
    }
}
