//! Constructors for common cross-field rules.
//!
//! Every constructor returns an ordinary [`RuleSpec`]: a named predicate over
//! the validated record plus a fixed message. Fields a rule reads are looked
//! up by name; a missing or differently typed field makes the predicate see
//! "no value", which is documented per constructor.

use records_core::{Record, RuleSpec, Value};

/// A text field must start with `prefix`. Fails when the field is absent.
pub fn starts_with(
    name: impl Into<String>,
    field: impl Into<String>,
    prefix: impl Into<String>,
    message: impl Into<String>,
) -> RuleSpec {
    let field = field.into();
    let prefix = prefix.into();
    RuleSpec::new(name, message, move |record| {
        record
            .get_str(&field)
            .is_some_and(|value| value.starts_with(prefix.as_str()))
    })
}

/// When `category_field` equals `category`, `flag_field` must be `true`.
pub fn requires_true_when(
    name: impl Into<String>,
    category_field: impl Into<String>,
    category: impl Into<String>,
    flag_field: impl Into<String>,
    message: impl Into<String>,
) -> RuleSpec {
    let category_field = category_field.into();
    let category = category.into();
    let flag_field = flag_field.into();
    RuleSpec::new(name, message, move |record| {
        record.get_str(&category_field) != Some(category.as_str())
            || record.get_bool(&flag_field) == Some(true)
    })
}

/// When `category_field` equals `category`, the numeric `count_field` must
/// be at least `min`.
pub fn minimum_when(
    name: impl Into<String>,
    category_field: impl Into<String>,
    category: impl Into<String>,
    count_field: impl Into<String>,
    min: f64,
    message: impl Into<String>,
) -> RuleSpec {
    let category_field = category_field.into();
    let category = category.into();
    let count_field = count_field.into();
    RuleSpec::new(name, message, move |record| {
        record.get_str(&category_field) != Some(category.as_str())
            || record.get_f64(&count_field).is_some_and(|count| count >= min)
    })
}

/// When the numeric `field` is strictly above `threshold`, `companion` must
/// be present and truthy (an empty string counts as absent).
pub fn requires_present_above(
    name: impl Into<String>,
    field: impl Into<String>,
    threshold: f64,
    companion: impl Into<String>,
    message: impl Into<String>,
) -> RuleSpec {
    let field = field.into();
    let companion = companion.into();
    RuleSpec::new(name, message, move |record| {
        !record.get_f64(&field).is_some_and(|value| value > threshold)
            || record.get(&companion).is_some_and(Value::is_truthy)
    })
}

/// At least one record in `list_field` has `member_field` equal to one of
/// `values`. Fails on an empty list.
pub fn any_member_in<I, S>(
    name: impl Into<String>,
    list_field: impl Into<String>,
    member_field: impl Into<String>,
    values: I,
    message: impl Into<String>,
) -> RuleSpec
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let list_field = list_field.into();
    let member_field = member_field.into();
    let values: Vec<String> = values.into_iter().map(Into::into).collect();
    RuleSpec::new(name, message, move |record| {
        members(record, &list_field).any(|member| {
            member
                .get_str(&member_field)
                .is_some_and(|value| values.iter().any(|allowed| allowed == value))
        })
    })
}

/// When the numeric `trigger_field` is strictly above `threshold`, the count
/// of records in `list_field` whose numeric `member_field` is at least
/// `member_min` must not be below `len * share`.
///
/// The comparison is done in floating point: with `share` 0.5, one qualifying
/// member out of three fails (`1 < 1.5`) while one out of two passes.
#[allow(clippy::too_many_arguments)]
pub fn min_share_when(
    name: impl Into<String>,
    trigger_field: impl Into<String>,
    threshold: f64,
    list_field: impl Into<String>,
    member_field: impl Into<String>,
    member_min: f64,
    share: f64,
    message: impl Into<String>,
) -> RuleSpec {
    let trigger_field = trigger_field.into();
    let list_field = list_field.into();
    let member_field = member_field.into();
    RuleSpec::new(name, message, move |record| {
        if !record
            .get_f64(&trigger_field)
            .is_some_and(|value| value > threshold)
        {
            return true;
        }
        let total = members(record, &list_field).count();
        let qualifying = members(record, &list_field)
            .filter(|member| {
                member
                    .get_f64(&member_field)
                    .is_some_and(|value| value >= member_min)
            })
            .count();
        (qualifying as f64) >= (total as f64) * share
    })
}

/// Every record in `list_field` has `member_field` set to `true`. Passes on
/// an empty list.
pub fn all_members_true(
    name: impl Into<String>,
    list_field: impl Into<String>,
    member_field: impl Into<String>,
    message: impl Into<String>,
) -> RuleSpec {
    let list_field = list_field.into();
    let member_field = member_field.into();
    RuleSpec::new(name, message, move |record| {
        members(record, &list_field).all(|member| member.get_bool(&member_field) == Some(true))
    })
}

/// Arbitrary predicate rule.
pub fn custom<F>(name: impl Into<String>, message: impl Into<String>, predicate: F) -> RuleSpec
where
    F: Fn(&Record) -> bool + Send + Sync + 'static,
{
    RuleSpec::new(name, message, predicate)
}

/// Nested records held by a list field.
fn members<'a>(record: &'a Record, list_field: &str) -> impl Iterator<Item = &'a Record> {
    record
        .get_list(list_field)
        .unwrap_or_default()
        .iter()
        .filter_map(Value::as_record)
}
