// File: src/sample_form.rs
// Purpose: Demo form exercising every rule kind

use once_cell::sync::Lazy;
use parsley_forms::{Field, Form, FormError, ValidationRule};
use regex::Regex;

static HEX_COLOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^#[A-Fa-f0-9]{6}$").expect("hex color pattern is valid")
});

/// Build a fresh copy of the test form
pub fn parsley_test_form() -> Result<Form, FormError> {
    Form::new()
        .with_field(
            Field::text("email", "E-Mail Address")
                .with_rule(ValidationRule::email().with_message("Sorrry, not a valid email address."))
                .with_default("test@example.com"),
        )?
        .with_field(Field::text("first_value", "Some Value").with_default("Some value"))?
        .with_field(
            Field::text("second_value", "Should be identical")
                .with_rule(
                    ValidationRule::equal_to("first_value")
                        .with_message("Sorry, values do not match."),
                )
                .with_default("Some value"),
        )?
        .with_field(
            Field::text("ip_address", "IP4 Address")
                .with_rule(ValidationRule::ip_address().with_message("Sorry, not a valid IP4 Address."))
                .with_default("127.0.0.1"),
        )?
        .with_field(
            Field::text("string_length", "Length of String (5 to 10)")
                .with_rule(
                    ValidationRule::length(Some(5), Some(10))
                        .with_message("Length should be between 5 and 10 characters."),
                )
                .with_default("Hello!"),
        )?
        .with_field(
            Field::integer("number_range", "Number Range (5 to 10)")
                .with_rule(
                    ValidationRule::number_range(Some(5.0), Some(10.0))
                        .with_message("Range should be between 5 and 10."),
                )
                .with_default("7"),
        )?
        .with_field(
            Field::text("required_text", "Required Field")
                .with_rule(ValidationRule::required().with_message("Sorry, this is a required field."))
                .with_default("Mandatory text"),
        )?
        .with_field(
            Field::select(
                "required_select",
                "Required Select",
                [
                    ("", "Please select an option"),
                    ("cpp", "C++"),
                    ("py", "Python"),
                    ("text", "Plain Text"),
                ],
            )
            .with_rule(ValidationRule::required().with_message("Sorry, you have to make a choice."))
            .with_default("py"),
        )?
        .with_field(
            Field::boolean("required_checkbox", "Required Checkbox")
                .with_rule(ValidationRule::required().with_message("Sorry, you need to accept this."))
                .with_default("y"),
        )?
        .with_field(
            Field::text("regexp", "Regex-Matched Hex Color-Code")
                .with_rule(
                    ValidationRule::regexp(&*HEX_COLOR).with_message("Not a proper color code, sorry."),
                )
                .with_default("#7D384F"),
        )?
        .with_field(
            Field::text("url", "URL Field")
                .with_rule(ValidationRule::url().with_message("Sorry, this is not a valid URL,"))
                .with_default("http://example.com/parsley"),
        )?
        .with_field(
            Field::text("anyof", "Car, Bike or Plane?")
                .with_rule(
                    ValidationRule::any_of(["car", "bike", "plane"])
                        .with_message("Sorry, you can only choose from car, bike and plane"),
                )
                .with_default("car"),
        )
}
