//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every failure is an `invalid_request` error whose details name the
//! offending field and a stable validation code.

use serde_json::json;
use uuid::Uuid;

use crate::domain::{CategoryFilter, Error, EventSubCategory, Target, TargetId, TargetType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValidationCode {
    MissingField,
    InvalidUuid,
    InvalidValue,
    OutOfRange,
}

impl ValidationCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::InvalidUuid => "invalid_uuid",
            Self::InvalidValue => "invalid_value",
            Self::OutOfRange => "out_of_range",
        }
    }
}

/// Wire name of a request field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub(crate) const fn as_str(self) -> &'static str {
        self.0
    }
}

fn field_error(
    field: FieldName,
    code: ValidationCode,
    message: impl Into<String>,
    value: Option<String>,
) -> Error {
    let details = match value {
        Some(value) => json!({ "field": field.as_str(), "code": code.as_str(), "value": value }),
        None => json!({ "field": field.as_str(), "code": code.as_str() }),
    };
    Error::invalid_request(message).with_details(details)
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    field_error(
        field,
        ValidationCode::MissingField,
        format!("missing required field: {}", field.as_str()),
        None,
    )
}

pub(crate) fn invalid_value_error(
    field: FieldName,
    value: impl Into<String>,
    message: impl Into<String>,
) -> Error {
    field_error(
        field,
        ValidationCode::InvalidValue,
        message,
        Some(value.into()),
    )
}

pub(crate) fn out_of_range_error(field: FieldName, value: i64, message: impl Into<String>) -> Error {
    field_error(
        field,
        ValidationCode::OutOfRange,
        message,
        Some(value.to_string()),
    )
}

/// Require an optional field to be present.
pub(crate) fn require<T>(value: Option<T>, field: FieldName) -> Result<T, Error> {
    value.ok_or_else(|| missing_field_error(field))
}

pub(crate) fn parse_uuid(value: &str, field: FieldName) -> Result<Uuid, Error> {
    Uuid::parse_str(value.trim()).map_err(|_| {
        field_error(
            field,
            ValidationCode::InvalidUuid,
            format!("{} must be a valid UUID", field.as_str()),
            Some(value.to_owned()),
        )
    })
}

/// Parse a filter key; absent or blank means `all`.
pub(crate) fn parse_category(raw: Option<&str>) -> Result<CategoryFilter, Error> {
    match raw.map(str::trim).filter(|value| !value.is_empty()) {
        None => Ok(CategoryFilter::All),
        Some(value) => value.parse().map_err(|_| {
            invalid_value_error(
                FieldName::new("category"),
                value,
                format!("unknown category '{value}'"),
            )
        }),
    }
}

pub(crate) fn parse_sub_category(raw: Option<&str>) -> Result<Option<EventSubCategory>, Error> {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .map(|value| {
            value.parse().map_err(|_| {
                invalid_value_error(
                    FieldName::new("subCategory"),
                    value,
                    format!("unknown sub-category '{value}'"),
                )
            })
        })
        .transpose()
}

pub(crate) fn parse_target_type(raw: &str, field: FieldName) -> Result<TargetType, Error> {
    raw.parse().map_err(|_| {
        invalid_value_error(field, raw, "targetType must be event or location")
    })
}

pub(crate) fn parse_target_id(raw: &str, field: FieldName) -> Result<TargetId, Error> {
    TargetId::new(raw).map_err(|err| invalid_value_error(field, raw, err.to_string()))
}

/// Parse a `(targetType, targetId)` pair from optional request fields.
pub(crate) fn parse_target(
    target_type: Option<&str>,
    target_id: Option<&str>,
) -> Result<Target, Error> {
    let type_field = FieldName::new("targetType");
    let id_field = FieldName::new("targetId");
    let kind = parse_target_type(require(target_type, type_field)?, type_field)?;
    let id = parse_target_id(require(target_id, id_field)?, id_field)?;
    Ok(Target::new(kind, id))
}
