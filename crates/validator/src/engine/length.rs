//! Length and range measurement.

use crate::form::{Field, FieldId, FieldKind, Form};
use crate::foundation::Validate;
use crate::messages::MessageKey;
use crate::validators::digits;

/// Where a bound came from, which decides the message variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BoundSource {
    /// `minlength` / `maxlength` attribute, or a declared rule
    Length,
    /// `min` / `max` attribute
    Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Bound {
    pub limit: i64,
    pub source: BoundSource,
}

/// A failed length check: the message kind and its ordinal arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LengthFailure {
    pub key: MessageKey,
    pub args: Vec<i64>,
}

fn numeric_attr(field: &Field, name: &str) -> Option<i64> {
    field
        .attribute(name)
        .map(str::trim)
        .filter(|v| digits().is_valid(v))
        .and_then(|v| v.parse().ok())
}

/// Effective lower bound: `minlength`, else `min`. Non-digit values count as absent.
pub(crate) fn lower_bound(field: &Field) -> Option<Bound> {
    bound(field, "minlength", "min")
}

/// Effective upper bound: `maxlength`, else `max`.
pub(crate) fn upper_bound(field: &Field) -> Option<Bound> {
    bound(field, "maxlength", "max")
}

fn bound(field: &Field, length_attr: &str, value_attr: &str) -> Option<Bound> {
    numeric_attr(field, length_attr)
        .map(|limit| Bound {
            limit,
            source: BoundSource::Length,
        })
        .or_else(|| {
            numeric_attr(field, value_attr).map(|limit| Bound {
                limit,
                source: BoundSource::Value,
            })
        })
}

/// Checks `length` against optional bounds.
///
/// With both bounds present the range check supersedes the one-sided ones.
pub(crate) fn check_bounds(
    length: i64,
    lower: Option<Bound>,
    upper: Option<Bound>,
) -> Result<(), LengthFailure> {
    match (lower, upper) {
        (Some(lo), Some(hi)) => {
            if (lo.limit..=hi.limit).contains(&length) {
                Ok(())
            } else {
                let key = if lo.source == BoundSource::Value && hi.source == BoundSource::Value {
                    MessageKey::Range
                } else {
                    MessageKey::RangeLength
                };
                Err(LengthFailure {
                    key,
                    args: vec![lo.limit, hi.limit],
                })
            }
        }
        (Some(lo), None) if length < lo.limit => Err(LengthFailure {
            key: match lo.source {
                BoundSource::Value => MessageKey::Min,
                BoundSource::Length => MessageKey::MinLength,
            },
            args: vec![lo.limit],
        }),
        (None, Some(hi)) if length > hi.limit => Err(LengthFailure {
            key: match hi.source {
                BoundSource::Value => MessageKey::Max,
                BoundSource::Length => MessageKey::MaxLength,
            },
            args: vec![hi.limit],
        }),
        _ => Ok(()),
    }
}

/// Element count of a list value.
pub(crate) fn list_length<T>(items: &[T]) -> i64 {
    i64::try_from(items.len()).unwrap_or(i64::MAX)
}

/// Measures a field for length checks.
///
/// Selects count selected options, checkables count checked group members,
/// number inputs parse their leading integer (`None` if there is none), file
/// inputs count attachments, everything else counts characters.
pub(crate) fn measure(form: &Form, id: FieldId, field: &Field) -> Option<i64> {
    match field.kind() {
        FieldKind::Select => Some(list_length(&field.selected_values())),
        FieldKind::Checkbox | FieldKind::Radio => {
            Some(i64::try_from(form.checked_in_group(id)).unwrap_or(i64::MAX))
        }
        FieldKind::Number => leading_integer(field.value()),
        FieldKind::File => Some(list_length(field.files())),
        _ => Some(i64::try_from(field.value().chars().count()).unwrap_or(i64::MAX)),
    }
}

/// Parses an optionally signed run of leading ASCII digits, ignoring leading
/// whitespace and any trailing text: `" 42px"` is 42, `"3.9"` is 3.
fn leading_integer(input: &str) -> Option<i64> {
    let trimmed = input.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let end = rest
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(rest.len());
    if end == 0 {
        return None;
    }
    let magnitude = rest[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}
