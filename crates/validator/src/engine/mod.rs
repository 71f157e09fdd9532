//! Rule evaluation
//!
//! [`Evaluator::evaluate`] runs the per-field pipeline against one catalog
//! snapshot. The first failing step decides the verdict; later steps never
//! run once a step has failed.
//!
//! 1. **Required**: checkables need a checked group member, everything else
//!    a non-empty value.
//! 2. Blank fields stop here and are valid. A checkable group is blank while
//!    none of its members is checked.
//! 3. **Type check** by [`FieldKind`]: email, tel, url, file, date. Other
//!    kinds go through the **length/range** check instead.
//! 4. **Pattern**: the `pattern` attribute, unanchored.
//! 5. **Declared rules** for the field's name, in order.
//!
//! A per-field custom message replaces the text of any failure but never its
//! code or parameters.

mod length;

use crate::form::{Field, FieldId, FieldKind, Form, Selector};
use crate::foundation::{Validate, ValidationError};
use crate::messages::{MessageCatalog, MessageKey, format_message};
use crate::rules::{CustomRule, ParamRule, Rule};
use crate::settings::Settings;
use crate::validators::{DateRange, email, matches_pattern, not_empty, phone, url};

use self::length::{
    Bound, BoundSource, LengthFailure, check_bounds, lower_bound, measure, upper_bound,
};

/// Outcome of evaluating one field.
pub type Verdict = Result<(), ValidationError>;

/// Evaluates fields against settings and a catalog snapshot.
#[derive(Debug, Clone, Copy)]
pub struct Evaluator<'a> {
    settings: &'a Settings,
    catalog: &'a MessageCatalog,
}

impl<'a> Evaluator<'a> {
    #[must_use]
    pub fn new(settings: &'a Settings, catalog: &'a MessageCatalog) -> Self {
        Self { settings, catalog }
    }

    /// Evaluates the field at `id`. An id outside the form is valid.
    ///
    /// # Panics
    ///
    /// Propagates any panic raised by a custom rule predicate.
    pub fn evaluate(&self, form: &Form, id: FieldId) -> Verdict {
        let Some(field) = form.field(id) else {
            return Ok(());
        };
        let failure = Failure {
            field,
            catalog: self.catalog,
            rule_message: None,
        };

        // A checkable group is blank until one member is checked, whatever
        // the members' value attributes say.
        let present = if field.kind().is_checkable() {
            form.checked_in_group(id) > 0
        } else {
            not_empty().is_valid(field.value())
        };
        if !present {
            return if field.is_required() {
                Err(failure.of(MessageKey::Required, &[]))
            } else {
                Ok(())
            };
        }

        check_kind(form, id, field, failure)?;
        check_pattern(field, failure)?;

        for rule in self.settings.rules_for(field.name()) {
            check_rule(form, id, field, rule, failure.for_rule(rule.message()))?;
        }
        Ok(())
    }
}

fn check_kind(form: &Form, id: FieldId, field: &Field, failure: Failure<'_>) -> Verdict {
    let value = field.value();
    let passed = match field.kind() {
        FieldKind::Email => email().is_valid(value),
        FieldKind::Tel => phone().is_valid(value),
        FieldKind::Url => url().is_valid(value),
        FieldKind::File => !field.files().is_empty(),
        FieldKind::Date => {
            DateRange::from_bounds(field.attribute("min"), field.attribute("max")).is_valid(value)
        }
        _ => return check_length(form, id, field, lower_bound(field), upper_bound(field), failure),
    };
    if passed {
        return Ok(());
    }
    let key = match field.kind() {
        FieldKind::Email => MessageKey::Email,
        FieldKind::Tel => MessageKey::Phone,
        FieldKind::Url => MessageKey::Url,
        FieldKind::File => MessageKey::File,
        _ => MessageKey::Date,
    };
    Err(failure.of(key, &[]))
}

fn check_length(
    form: &Form,
    id: FieldId,
    field: &Field,
    lower: Option<Bound>,
    upper: Option<Bound>,
    failure: Failure<'_>,
) -> Verdict {
    if lower.is_none() && upper.is_none() {
        return Ok(());
    }
    let Some(length) = measure(form, id, field) else {
        return Ok(());
    };
    check_bounds(length, lower, upper).map_err(|LengthFailure { key, args }| failure.of(key, &args))
}

fn check_pattern(field: &Field, failure: Failure<'_>) -> Verdict {
    let Some(pattern) = field.non_empty_attribute("pattern") else {
        return Ok(());
    };
    match matches_pattern(pattern) {
        Ok(validator) if validator.is_valid(field.value()) => Ok(()),
        Ok(_) => Err(failure.of(MessageKey::RegExp, &[])),
        Err(e) => {
            formguard_log::warn!(
                field = field.name(),
                pattern,
                error = %e,
                "ignoring malformed pattern"
            );
            Ok(())
        }
    }
}

fn check_rule(form: &Form, id: FieldId, field: &Field, rule: &Rule, failure: Failure<'_>) -> Verdict {
    match rule {
        Rule::Custom(custom) => check_custom(custom, field, failure),
        Rule::Param(ParamRule::EqualTo { selector, .. }) => {
            check_equal_to(form, field, selector, failure)
        }
        Rule::Param(ParamRule::MinLength { min, .. }) => {
            let lower = declared_bound(*min, field, "min");
            check_length(form, id, field, lower, None, failure)
        }
        Rule::Param(ParamRule::MaxLength { max, .. }) => {
            let upper = declared_bound(*max, field, "max");
            check_length(form, id, field, None, upper, failure)
        }
        Rule::Param(ParamRule::RangeLength { min, max, .. }) => {
            let lower = declared_bound(*min, field, "min");
            let upper = declared_bound(*max, field, "max");
            check_length(form, id, field, lower, upper, failure)
        }
    }
}

fn check_custom(rule: &CustomRule, field: &Field, failure: Failure<'_>) -> Verdict {
    if rule.check(field.value(), field) {
        Ok(())
    } else {
        Err(failure.of(MessageKey::Remote, &[]))
    }
}

/// Unparseable selectors and missing targets leave the rule inapplicable.
fn check_equal_to(form: &Form, field: &Field, selector: &str, failure: Failure<'_>) -> Verdict {
    let target = match Selector::parse(selector) {
        Ok(parsed) => form.find(&parsed).and_then(|other| form.field(other)),
        Err(e) => {
            formguard_log::warn!(field = field.name(), selector, error = %e, "ignoring equalTo rule");
            None
        }
    };
    match target {
        Some(other) if other.value() != field.value() => Err(failure.of(MessageKey::EqualTo, &[])),
        _ => Ok(()),
    }
}

/// A declared rule's limit. The message variant follows the field's own
/// `min`/`max` attribute.
fn declared_bound(limit: usize, field: &Field, value_attr: &str) -> Option<Bound> {
    let source = if field.attribute(value_attr).is_some() {
        BoundSource::Value
    } else {
        BoundSource::Length
    };
    Some(Bound {
        limit: i64::try_from(limit).unwrap_or(i64::MAX),
        source,
    })
}

// ============================================================================
// MESSAGE RESOLUTION
// ============================================================================

/// Resolves failure text: the field's custom message, else the declared
/// rule's message, else the catalog template.
#[derive(Clone, Copy)]
struct Failure<'a> {
    field: &'a Field,
    catalog: &'a MessageCatalog,
    rule_message: Option<&'a str>,
}

impl<'a> Failure<'a> {
    fn for_rule(self, rule_message: Option<&'a str>) -> Self {
        Self {
            rule_message,
            ..self
        }
    }

    fn of(self, key: MessageKey, args: &[i64]) -> ValidationError {
        let message = match (self.field.custom_message(), self.rule_message) {
            (Some(custom), _) => custom.to_owned(),
            (None, Some(text)) => format_message(text, args),
            (None, None) => self.catalog.format(key, args),
        };
        args.iter().enumerate().fold(
            ValidationError::new(key.as_str(), message).with_field(self.field.name().to_owned()),
            |error, (i, arg)| error.with_param(i.to_string(), arg.to_string()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn eval(settings: &Settings, form: &Form, name: &str) -> Verdict {
        let id = form.field_id(name).unwrap();
        Evaluator::new(settings, &settings.messages).evaluate(form, id)
    }

    fn single(field: Field) -> Form {
        Form::new().with_field(field)
    }

    fn at(form: &Form, index: usize) -> FieldId {
        form.fields().nth(index).map(|(id, _)| id).unwrap()
    }

    #[test]
    fn test_optional_empty_field_is_valid() {
        let settings = Settings::default();
        let form = single(Field::new("email", "contact").with_attr("minlength", "5"));
        assert_eq!(eval(&settings, &form, "contact"), Ok(()));
    }

    #[test]
    fn test_required_empty() {
        let settings = Settings::default();
        let form = single(Field::new("text", "name").required());
        let err = eval(&settings, &form, "name").unwrap_err();
        assert_eq!(err.code, "required");
        assert_eq!(err.message, "This field is required.");
        assert_eq!(err.field.as_deref(), Some("name"));
    }

    #[test]
    fn test_custom_message_wins_but_keeps_code() {
        let settings = Settings::default();
        let form = single(
            Field::new("text", "name")
                .with_attr("minlength", "3")
                .with_error_message("Name please."),
        );
        assert_eq!(eval(&settings, &form, "name"), Ok(()));

        let mut form = form;
        form.field_mut(at(&form, 0)).unwrap().set_value("ab");
        let err = eval(&settings, &form, "name").unwrap_err();
        assert_eq!(err.code, "minlength");
        assert_eq!(err.message, "Name please.");
        assert_eq!(err.param("0"), Some("3"));
    }

    #[test]
    fn test_email_dispatch() {
        let settings = Settings::default();
        let mut form = single(Field::new("email", "email").with_value("a@b.com"));
        assert_eq!(eval(&settings, &form, "email"), Ok(()));

        form.field_mut(at(&form, 0)).unwrap().set_value("not-an-email");
        let err = eval(&settings, &form, "email").unwrap_err();
        assert_eq!(err.message, "Please enter a valid email address.");
    }

    #[test]
    fn test_typed_fields_skip_length_checks() {
        let settings = Settings::default();
        let form = single(
            Field::new("url", "site")
                .with_value("http://example.com")
                .with_attr("maxlength", "3"),
        );
        assert_eq!(eval(&settings, &form, "site"), Ok(()));
    }

    #[test]
    fn test_date_bounds() {
        let settings = Settings::default();
        let mut form = single(
            Field::new("date", "start")
                .with_attr("min", "2024-01-01")
                .with_value("2024-06-01"),
        );
        assert_eq!(eval(&settings, &form, "start"), Ok(()));
        form.field_mut(at(&form, 0)).unwrap().set_value("2023-06-01");
        assert_eq!(eval(&settings, &form, "start").unwrap_err().code, "date");
    }

    #[test]
    fn test_minlength_message() {
        let settings = Settings::default();
        let mut form = single(Field::new("text", "user").with_attr("minlength", "5").with_value("ab"));
        let err = eval(&settings, &form, "user").unwrap_err();
        assert_eq!(err.message, "Please enter at least 5 characters.");

        form.field_mut(at(&form, 0)).unwrap().set_value("abcdef");
        assert_eq!(eval(&settings, &form, "user"), Ok(()));
    }

    #[test]
    fn test_min_max_range_variant() {
        let settings = Settings::default();
        let mut form = single(
            Field::new("text", "code")
                .with_attr("min", "3")
                .with_attr("max", "7")
                .with_value("abcde"),
        );
        assert_eq!(eval(&settings, &form, "code"), Ok(()));

        form.field_mut(at(&form, 0)).unwrap().set_value("ab");
        let err = eval(&settings, &form, "code").unwrap_err();
        assert_eq!(err.code, "range");
        assert_eq!(err.message, "Please enter a value between 3 and 7.");
    }

    #[test]
    fn test_number_measures_value() {
        let settings = Settings::default();
        let mut form = single(Field::new("number", "qty").with_attr("max", "10").with_value("12"));
        let err = eval(&settings, &form, "qty").unwrap_err();
        assert_eq!(err.message, "Please enter a value less than or equal to 10.");

        form.field_mut(at(&form, 0)).unwrap().set_value("abc");
        assert_eq!(eval(&settings, &form, "qty"), Ok(()));
    }

    #[test]
    fn test_pattern() {
        let settings = Settings::default();
        let mut form = single(Field::new("text", "zip").with_attr("pattern", r"^\d{5}$").with_value("1234"));
        assert_eq!(eval(&settings, &form, "zip").unwrap_err().code, "regExp");

        form.field_mut(at(&form, 0)).unwrap().set_value("12345");
        assert_eq!(eval(&settings, &form, "zip"), Ok(()));
    }

    #[test]
    fn test_malformed_pattern_is_not_applicable() {
        let settings = Settings::default();
        let form = single(Field::new("text", "zip").with_attr("pattern", "([0-9").with_value("x"));
        assert_eq!(eval(&settings, &form, "zip"), Ok(()));
    }

    #[test]
    fn test_attribute_failure_short_circuits_declared_rules() {
        let mut settings = Settings::default();
        settings.add_rule("user", Rule::custom(|_, _| panic!("must not run")));
        let form = single(Field::new("text", "user").with_attr("minlength", "5").with_value("ab"));
        assert_eq!(eval(&settings, &form, "user").unwrap_err().code, "minlength");
    }

    #[test]
    fn test_declared_rules_stop_at_first_failure() {
        let mut settings = Settings::default();
        settings.add_rule("user", Rule::custom(|v, _| v != "root").with_message("Reserved."));
        settings.add_rule("user", Rule::custom(|_, _| panic!("must not run")));
        let form = single(Field::new("text", "user").with_value("root"));

        let err = eval(&settings, &form, "user").unwrap_err();
        assert_eq!(err.code, "remote");
        assert_eq!(err.message, "Reserved.");
    }

    #[test]
    fn test_custom_rule_falls_back_to_remote() {
        let mut settings = Settings::default();
        settings.add_rule("user", Rule::custom(|_, _| false));
        let form = single(Field::new("text", "user").with_value("x"));
        assert_eq!(eval(&settings, &form, "user").unwrap_err().message, "Please fix this field.");
    }

    #[test]
    fn test_equal_to() {
        let mut settings = Settings::default();
        settings.add_rule("confirm", Rule::equal_to("#password"));
        let mut form = Form::new()
            .with_field(Field::new("text", "password").with_id("password").with_value("s3cret"))
            .with_field(Field::new("text", "confirm").with_value("s3cret"));
        assert_eq!(eval(&settings, &form, "confirm"), Ok(()));

        form.field_mut(at(&form, 1)).unwrap().set_value("other");
        let err = eval(&settings, &form, "confirm").unwrap_err();
        assert_eq!(err.code, "equalTo");
        assert_eq!(err.message, "Please enter the same value again.");
    }

    #[test]
    fn test_unresolvable_equal_to_is_not_applicable() {
        let mut settings = Settings::default();
        settings.add_rule("confirm", Rule::equal_to("#missing"));
        settings.add_rule("confirm", Rule::equal_to("input >"));
        let form = single(Field::new("text", "confirm").with_value("x"));
        assert_eq!(eval(&settings, &form, "confirm"), Ok(()));
    }

    #[test]
    fn test_declared_length_message_variant_follows_attributes() {
        let mut settings = Settings::default();
        settings.add_rule("a", Rule::min_length(4));
        settings.add_rule("b", Rule::range_length(4, 8).with_message("Between {0} and {1}."));
        let form = Form::new()
            .with_field(Field::new("text", "a").with_attr("min", "1").with_value("ab"))
            .with_field(Field::new("text", "b").with_value("ab"));

        let a = eval(&settings, &form, "a").unwrap_err();
        assert_eq!(a.code, "min");
        assert_eq!(a.message, "Please enter a value greater than or equal to 4.");

        let b = eval(&settings, &form, "b").unwrap_err();
        assert_eq!(b.code, "rangelength");
        assert_eq!(b.message, "Between 4 and 8.");
    }

    #[test]
    fn test_radio_group_required() {
        let settings = Settings::default();
        let mut form = Form::new()
            .with_field(Field::new("radio", "plan").with_value("basic").required())
            .with_field(Field::new("radio", "plan").with_value("pro").required());

        for id in [at(&form, 0), at(&form, 1)] {
            let verdict = Evaluator::new(&settings, &settings.messages).evaluate(&form, id);
            assert_eq!(verdict.unwrap_err().code, "required");
        }

        form.field_mut(at(&form, 1)).unwrap().set_checked(true);
        for id in [at(&form, 0), at(&form, 1)] {
            let verdict = Evaluator::new(&settings, &settings.messages).evaluate(&form, id);
            assert_eq!(verdict, Ok(()));
        }
    }

    #[test]
    fn test_checkbox_group_length_counts_checked_members() {
        let mut settings = Settings::default();
        settings.add_rule("extras", Rule::min_length(2));
        let mut form = Form::new()
            .with_field(Field::new("checkbox", "tags").with_attr("minlength", "2"))
            .with_field(Field::new("checkbox", "tags"))
            .with_field(Field::new("checkbox", "tags"))
            .with_field(Field::new("checkbox", "extras"))
            .with_field(Field::new("checkbox", "extras"));

        // nothing checked: optional groups are blank, so valid
        assert_eq!(eval(&settings, &form, "tags"), Ok(()));
        assert_eq!(eval(&settings, &form, "extras"), Ok(()));

        form.field_mut(at(&form, 0)).unwrap().set_checked(true);
        form.field_mut(at(&form, 3)).unwrap().set_checked(true);

        let tags = eval(&settings, &form, "tags").unwrap_err();
        assert_eq!(tags.code, "minlength");
        assert_eq!(tags.message, "Please enter at least 2 characters.");
        assert_eq!(eval(&settings, &form, "extras").unwrap_err().code, "minlength");

        form.field_mut(at(&form, 2)).unwrap().set_checked(true);
        form.field_mut(at(&form, 4)).unwrap().set_checked(true);
        assert_eq!(eval(&settings, &form, "tags"), Ok(()));
        assert_eq!(eval(&settings, &form, "extras"), Ok(()));
    }

    #[test]
    fn test_catalog_snapshot_is_used() {
        let settings = Settings::default();
        let catalog = settings
            .messages
            .merged_with(&serde_json::json!({"required": "Pflichtfeld."}));
        let form = single(Field::new("text", "name").required());
        let err = Evaluator::new(&settings, &catalog)
            .evaluate(&form, at(&form, 0))
            .unwrap_err();
        assert_eq!(err.message, "Pflichtfeld.");
    }
}
