//! Client configuration validation.
//!
//! # Responsibilities
//! - Turn untyped structured input into a [`ClientConfig`]
//! - Enforce the tagged-union shape: base fields plus exactly the content
//!   field selected by `injectType`
//! - Apply per-kind defaults for omitted content fields
//!
//! # Design Decisions
//! - Reports the first offending field, checked in a fixed order:
//!   object, `selfId`, `passiveMode`, `injectType`, foreign content fields,
//!   the selected content field
//! - Validation is a pure function: `&Value → Result<ClientConfig, ValidationError>`
//! - Keys unrelated to any content kind are ignored, not rejected
//! - An explicit JSON `null` counts as absent

use serde_json::{Map, Value};
use thiserror::Error;

use crate::config::client::{ClientConfig, Content, InjectType, CONTENT_FIELDS};

const BASE_FIELDS: [&str; 3] = ["selfId", "passiveMode", "injectType"];

/// Reasons a raw client configuration is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The input is not a key/value object.
    #[error("expected a config object, found {found}")]
    NotAnObject { found: &'static str },

    /// A required field is absent.
    #[error("missing required field `{field}` (expected {expected})")]
    MissingField {
        field: &'static str,
        expected: &'static str,
    },

    /// A field is present with the wrong JSON type.
    #[error("field `{field}` must be {expected}, found {found}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    /// `injectType` is not one of the known tags.
    #[error("field `injectType` must be one of button, text, iframe, html, markdown, null; found \"{0}\"")]
    UnknownInjectType(String),

    /// A content field belonging to another tag is present.
    #[error("field `{field}` is not allowed when `injectType` is \"{inject_type}\"")]
    ForeignField {
        field: &'static str,
        inject_type: InjectType,
    },
}

impl ValidationError {
    /// The offending field, if the error concerns one.
    pub fn field(&self) -> Option<&str> {
        match self {
            ValidationError::NotAnObject { .. } => None,
            ValidationError::MissingField { field, .. }
            | ValidationError::WrongType { field, .. }
            | ValidationError::ForeignField { field, .. } => Some(field),
            ValidationError::UnknownInjectType(_) => Some("injectType"),
        }
    }
}

/// Validate raw input and build a [`ClientConfig`].
pub fn validate(raw: &Value) -> Result<ClientConfig, ValidationError> {
    let object = raw.as_object().ok_or(ValidationError::NotAnObject {
        found: json_kind(raw),
    })?;

    let self_id = match present(object, "selfId") {
        None => {
            return Err(ValidationError::MissingField {
                field: "selfId",
                expected: "a string",
            })
        }
        Some(value) => expect_string(value, "selfId")?,
    };

    let passive_mode = match present(object, "passiveMode") {
        None => false,
        Some(Value::Bool(b)) => *b,
        Some(other) => {
            return Err(ValidationError::WrongType {
                field: "passiveMode",
                expected: "a boolean",
                found: json_kind(other),
            })
        }
    };

    let inject_type = match present(object, "injectType") {
        None => {
            return Err(ValidationError::MissingField {
                field: "injectType",
                expected: "one of button, text, iframe, html, markdown, null",
            })
        }
        Some(value) => {
            let tag = expect_string(value, "injectType")?;
            InjectType::parse(&tag).ok_or(ValidationError::UnknownInjectType(tag))?
        }
    };

    let own_field = inject_type.content_field();
    if let Some(foreign) = CONTENT_FIELDS
        .into_iter()
        .filter(|field| Some(*field) != own_field)
        .find(|field| present(object, field).is_some())
    {
        return Err(ValidationError::ForeignField {
            field: foreign,
            inject_type,
        });
    }

    let value = match own_field {
        Some(field) => present(object, field)
            .map(|v| expect_string(v, field))
            .transpose()?,
        None => None,
    };

    for key in object.keys() {
        if !BASE_FIELDS.contains(&key.as_str()) && !CONTENT_FIELDS.contains(&key.as_str()) {
            tracing::debug!(field = %key, "Ignoring unrecognized client config field");
        }
    }

    Ok(ClientConfig {
        self_id,
        passive_mode,
        content: Content::with_value(inject_type, value),
    })
}

impl ClientConfig {
    /// Validate untyped input. See [`validate`].
    pub fn from_value(raw: &Value) -> Result<Self, ValidationError> {
        validate(raw)
    }
}

impl TryFrom<Value> for ClientConfig {
    type Error = ValidationError;

    fn try_from(raw: Value) -> Result<Self, Self::Error> {
        validate(&raw)
    }
}

fn present<'a>(object: &'a Map<String, Value>, field: &str) -> Option<&'a Value> {
    object.get(field).filter(|v| !v.is_null())
}

fn expect_string(value: &Value, field: &'static str) -> Result<String, ValidationError> {
    value
        .as_str()
        .map(str::to_owned)
        .ok_or(ValidationError::WrongType {
            field,
            expected: "a string",
            found: json_kind(value),
        })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
