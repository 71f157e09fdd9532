//! End-to-end behavior of a validator bound to a form.

use std::sync::{Arc, Mutex};

use formguard_validator::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::json;

fn signup_form() -> Form {
    Form::new()
        .with_id("signup")
        .with_field(Field::new("text", "username").with_id("username").required().with_attr("minlength", "5"))
        .with_field(Field::new("email", "email").with_id("email").required())
        .with_field(Field::new("text", "password").with_id("password"))
        .with_field(Field::new("text", "confirm").with_id("confirm"))
        .with_field(Field::new("radio", "plan").with_value("basic").required())
        .with_field(Field::new("radio", "plan").with_value("pro").required())
        .with_field(Field::new("text", "nickname").with_class("skip").required())
}

fn id(validator: &FormValidator, name: &str) -> FieldId {
    validator.form().field_id(name).unwrap()
}

fn set(validator: &mut FormValidator, name: &str, value: &str) {
    let id = id(validator, name);
    validator.form_mut().field_mut(id).unwrap().set_value(value);
}

fn has_error_class(validator: &FormValidator, id: FieldId) -> bool {
    validator
        .form()
        .field(id)
        .unwrap()
        .classes()
        .any(|c| c == "field-error")
}

fn bound() -> FormValidator {
    FormValidator::builder(signup_form())
        .settings(json!({
            "ignore": ".skip",
            "fields": [{"name": "confirm", "rules": [{"rule": "equalTo", "selector": "#password"}]}]
        }))
        .build()
        .unwrap()
}

fn fill_valid(validator: &mut FormValidator) {
    set(validator, "username", "alice");
    set(validator, "email", "alice@example.com");
    set(validator, "password", "hunter22");
    set(validator, "confirm", "hunter22");
    let plan = id(validator, "plan");
    validator.form_mut().field_mut(plan).unwrap().set_checked(true);
}

#[test]
fn optional_empty_field_is_valid_and_hidden() {
    let mut validator = bound();
    let password = id(&validator, "password");
    assert!(validator.validate_field(password));
    assert_eq!(validator.display().visible_message("password"), None);
    assert!(!has_error_class(&validator, password));
}

#[test]
fn required_empty_shows_catalog_message() {
    let mut validator = bound();
    let username = id(&validator, "username");
    assert!(!validator.validate_field(username));
    assert_eq!(
        validator.display().visible_message("username"),
        Some("This field is required.")
    );
    assert!(has_error_class(&validator, username));

    set(&mut validator, "username", "ab");
    assert!(!validator.validate_field(username));
    assert_eq!(
        validator.display().visible_message("username"),
        Some("Please enter at least 5 characters.")
    );

    set(&mut validator, "username", "abcdef");
    assert!(validator.validate_field(username));
    assert_eq!(validator.display().visible_message("username"), None);
    assert!(!has_error_class(&validator, username));
    assert_eq!(
        validator.display().node("username").map(|n| n.id.as_str()),
        Some("username-error")
    );
}

#[test]
fn radio_group_toggles_every_member() {
    let mut validator = bound();
    let members: Vec<FieldId> = validator
        .form()
        .fields()
        .filter(|(_, f)| f.name() == "plan")
        .map(|(id, _)| id)
        .collect();

    for &member in &members {
        assert!(!validator.validate_field(member));
    }
    for &member in &members {
        assert!(has_error_class(&validator, member));
    }

    validator.form_mut().field_mut(members[1]).unwrap().set_checked(true);
    assert!(validator.validate_field(members[0]));
    for &member in &members {
        assert!(!has_error_class(&validator, member));
        assert!(validator.validate_field(member));
    }
}

#[test]
fn equal_to_rule() {
    let mut validator = bound();
    let confirm = id(&validator, "confirm");
    set(&mut validator, "password", "s3cret!");
    set(&mut validator, "confirm", "s3cret!");
    assert!(validator.validate_field(confirm));

    set(&mut validator, "confirm", "other");
    assert!(!validator.validate_field(confirm));
    assert_eq!(
        validator.display().visible_message("confirm"),
        Some("Please enter the same value again.")
    );
}

#[test]
fn validate_form_visits_every_field() {
    let mut validator = bound();
    assert!(!validator.validate_form());

    // every failing tracked field got a node, not just the first
    for key in ["username", "email", "plan"] {
        assert!(
            validator.display().visible_message(key).is_some(),
            "{key} was not validated"
        );
    }
}

#[test]
fn ignored_fields_are_untracked() {
    let mut validator = bound();
    let nickname = id(&validator, "nickname");
    assert!(!validator.tracked().contains(&nickname));
    assert!(validator.validate_field(nickname));
    assert!(validator.display().node("nickname").is_none());
}

#[test]
fn check_form_reports_without_display() {
    let validator = bound();
    let errors = validator.check_form().unwrap_err();
    let failing: Vec<&str> = errors
        .errors()
        .iter()
        .filter_map(|e| e.field.as_deref())
        .collect();
    assert_eq!(failing, vec!["username", "email", "plan", "plan"]);
    assert!(validator.display().is_empty());
}

#[test]
fn submit_blocked_then_handled() {
    let submitted = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&submitted);
    let mut validator = FormValidator::builder(signup_form())
        .settings(json!({"ignore": ".skip"}))
        .submit_handler(move |form| {
            sink.lock().unwrap().push(form.id().map(str::to_owned));
        })
        .build()
        .unwrap();

    assert_eq!(validator.submit(), SubmitOutcome::Blocked);
    assert!(!validator.form().has_class("form-validated"));

    fill_valid(&mut validator);
    assert_eq!(validator.submit(), SubmitOutcome::Handled);
    assert!(validator.form().has_class("form-validated"));
    assert_eq!(*submitted.lock().unwrap(), vec![Some("signup".to_owned())]);
}

#[test]
fn submit_without_handler_is_native() {
    let mut validator = bound();
    fill_valid(&mut validator);
    assert_eq!(validator.submit(), SubmitOutcome::Native);
}

#[test]
fn reset_clears_marker_and_values() {
    let mut validator = bound();
    fill_valid(&mut validator);
    validator.submit();
    validator.reset_form();

    assert!(!validator.form().has_class("form-validated"));
    let username = id(&validator, "username");
    assert_eq!(validator.form().field(username).unwrap().value(), "");
}

#[test]
fn on_event_respects_auto_validate() {
    let mut validator = bound();
    let email = id(&validator, "email");
    assert_eq!(validator.on_event(email, FieldEvent::Blur), Some(false));

    let mut manual = FormValidator::builder(signup_form())
        .settings(json!({"autoValidate": false}))
        .build()
        .unwrap();
    assert_eq!(manual.on_event(email, FieldEvent::Input), None);
    assert!(manual.display().is_empty());
}

#[test]
fn custom_rules_placement_and_messages() {
    let mut validator = FormValidator::builder(signup_form())
        .settings(json!({"errorElement": "span", "errorClass": "invalid"}))
        .messages(json!({"required": "Required!"}))
        .rule(
            "username",
            Rule::custom(|value, _| value != "admin").with_message("Name taken."),
        )
        .error_placement(|field, node| {
            node.placement = Placement::Inside(format!("{}-slot", field.key()));
        })
        .build()
        .unwrap();

    let email = id(&validator, "email");
    validator.validate_field(email);
    let node = validator.display().node("email").unwrap();
    assert_eq!(node.tag, "span");
    assert_eq!(node.class.as_deref(), Some("invalid"));
    assert_eq!(node.placement, Placement::Inside("email-slot".into()));
    assert_eq!(node.message, "Required!");

    set(&mut validator, "username", "admin");
    let username = id(&validator, "username");
    assert!(!validator.validate_field(username));
    assert_eq!(validator.display().visible_message("username"), Some("Name taken."));
}

#[test]
fn bind_by_selector() {
    let mut document = Document::new()
        .with_form(Form::new().with_id("login"))
        .with_form(signup_form());

    let validator = FormValidator::builder_for(&mut document, "#signup")
        .unwrap()
        .build()
        .unwrap();
    assert_eq!(validator.form().id(), Some("signup"));

    assert!(matches!(
        FormValidator::builder_for(&mut document, "#signup"),
        Err(BindError::FormNotFound { .. })
    ));
}

#[test]
fn invalid_settings_fail_to_bind() {
    let result = FormValidator::builder(signup_form())
        .settings(json!({"fields": "confirm"}))
        .build();
    assert!(matches!(result, Err(BindError::Config(_))));
}

#[test]
#[should_panic(expected = "predicate exploded")]
fn custom_predicate_panics_propagate() {
    let mut validator = FormValidator::builder(signup_form())
        .rule("password", Rule::custom(|_, _| panic!("predicate exploded")))
        .build()
        .unwrap();
    set(&mut validator, "password", "x");
    validator.validate_form();
}

#[derive(Debug, Default)]
struct Recorder {
    events: Vec<(String, Option<String>)>,
}

impl ErrorDisplay for Recorder {
    fn show(&mut self, field: &Field, message: &str) {
        self.events.push((field.key().to_owned(), Some(message.to_owned())));
    }

    fn clear(&mut self, field: &Field) {
        self.events.push((field.key().to_owned(), None));
    }
}

#[test]
fn custom_display_receives_verdicts() {
    let mut validator = FormValidator::builder(signup_form())
        .build_with_display(Recorder::default())
        .unwrap();
    let email = id_of(validator.form(), "email");
    validator.validate_field(email);
    validator
        .form_mut()
        .field_mut(email)
        .unwrap()
        .set_value("a@b.com");
    validator.validate_field(email);

    assert_eq!(
        validator.display().events,
        vec![
            ("email".to_owned(), Some("This field is required.".to_owned())),
            ("email".to_owned(), None),
        ]
    );
}

fn id_of(form: &Form, name: &str) -> FieldId {
    form.field_id(name).unwrap()
}
