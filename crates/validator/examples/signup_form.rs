//! Binds a validator to a signup form and walks through a user session.
//!
//! Run with `FORMGUARD_LOG=debug` to see the binding and validation events.

use formguard_validator::prelude::*;
use serde_json::json;

fn signup_form() -> Form {
    Form::new()
        .with_id("signup")
        .with_field(
            Field::new("text", "username")
                .with_id("username")
                .required()
                .with_attr("minlength", "3")
                .with_attr("maxlength", "16"),
        )
        .with_field(Field::new("email", "email").with_id("email").required())
        .with_field(Field::new("tel", "phone").with_id("phone"))
        .with_field(Field::new("text", "password").with_id("password").required())
        .with_field(Field::new("text", "confirm").with_id("confirm").required())
        .with_field(Field::new("checkbox", "terms").with_value("yes").required())
}

fn print_errors<D: ErrorDisplay>(validator: &FormValidator<D>) {
    match validator.check_form() {
        Ok(()) => println!("  form is valid"),
        Err(errors) => {
            for error in errors.errors() {
                println!("  {}", error);
            }
        }
    }
}

fn fill(validator: &mut FormValidator, name: &str, value: &str) {
    if let Some(id) = validator.form().field_id(name) {
        if let Some(field) = validator.form_mut().field_mut(id) {
            field.set_value(value);
        }
        validator.on_event(id, FieldEvent::Input);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _guard = formguard_log::auto_init()?;

    let mut validator = FormValidator::builder(signup_form())
        .settings(json!({
            "fields": [
                {"name": "password", "rules": [{"rule": "rangelength", "min": 8, "max": 64}]},
                {"name": "confirm", "rules": [{"rule": "equalTo", "selector": "#password"}]}
            ]
        }))
        .messages(json!({"equalTo": "Passwords do not match."}))
        .rule(
            "username",
            Rule::custom(|value, _| !value.eq_ignore_ascii_case("admin"))
                .with_message("That username is reserved."),
        )
        .submit_handler(|form| println!("submitting form {:?}", form.id()))
        .build()?;

    println!("empty form:");
    print_errors(&validator);
    println!("submit -> {:?}", validator.submit());

    fill(&mut validator, "username", "admin");
    fill(&mut validator, "email", "alice@example");
    fill(&mut validator, "password", "short");
    fill(&mut validator, "confirm", "shorter");

    println!("\nafter a first attempt:");
    for node in validator.display().iter().filter(|n| n.visible) {
        println!("  #{} <{}> {}", node.id, node.tag, node.message);
    }

    fill(&mut validator, "username", "alice");
    fill(&mut validator, "email", "alice@example.com");
    fill(&mut validator, "password", "correct horse");
    fill(&mut validator, "confirm", "correct horse");
    if let Some(terms) = validator.form().field_id("terms") {
        if let Some(field) = validator.form_mut().field_mut(terms) {
            field.set_checked(true);
        }
    }

    println!("\nafter corrections:");
    print_errors(&validator);
    println!("submit -> {:?}", validator.submit());

    Ok(())
}
