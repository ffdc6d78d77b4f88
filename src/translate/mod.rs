//! Payload translation: form fields → backend JSON shape.
//!
//! # Data Flow
//! ```text
//! HTML form submission (flat map of named string fields)
//!     → field specs for the target service (closed, data-driven)
//!     → JSON object in the shape the backend expects
//!
//! users     → {name, email}
//! maisons   → {name, address}
//! locations → {maison_id, description}   (maison_id as a JSON number)
//! ```
//!
//! # Design Decisions
//! - One translation rule per service, shared by create and update; there is
//!   no partial-update variant
//! - Unknown form fields are silently dropped
//! - Fields the target shape requires but the form omits (or submits empty)
//!   pass through as JSON null; the backend is the sole authority on
//!   required-field validation
//! - `maison_id` is the only value the gateway itself parses, because the
//!   target shape is a number

use std::collections::HashMap;

use serde_json::{Map, Value};
use thiserror::Error;

use crate::registry::ServiceKind;

/// A submitted HTML form: flat set of named string fields.
pub type FormFields = HashMap<String, String>;

/// One field of a backend payload shape.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// Field name on both the form and the JSON payload.
    pub name: &'static str,

    /// Whether the backend expects a JSON number for this field.
    pub numeric: bool,

    /// Whether the backend treats this field as required at creation.
    /// Informational only (used to mark form inputs); never enforced here.
    pub required: bool,
}

const USER_FIELDS: [FieldSpec; 2] = [
    FieldSpec { name: "name", numeric: false, required: true },
    FieldSpec { name: "email", numeric: false, required: false },
];

const MAISON_FIELDS: [FieldSpec; 2] = [
    FieldSpec { name: "name", numeric: false, required: true },
    FieldSpec { name: "address", numeric: false, required: false },
];

const LOCATION_FIELDS: [FieldSpec; 2] = [
    FieldSpec { name: "maison_id", numeric: true, required: true },
    FieldSpec { name: "description", numeric: false, required: false },
];

/// The payload shape a given service expects.
pub fn fields(kind: ServiceKind) -> &'static [FieldSpec] {
    match kind {
        ServiceKind::Users => &USER_FIELDS,
        ServiceKind::Maisons => &MAISON_FIELDS,
        ServiceKind::Locations => &LOCATION_FIELDS,
    }
}

/// Errors from payload translation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TranslateError {
    /// A field the backend expects as a number was submitted as something else.
    #[error("field `{field}` must be numeric, got `{value}`")]
    NonNumericField { field: &'static str, value: String },
}

/// Translate a form submission into the JSON payload for one service.
///
/// Pure function; the same rule serves create and update.
pub fn translate(kind: ServiceKind, form: &FormFields) -> Result<Value, TranslateError> {
    let mut payload = Map::new();
    for spec in fields(kind) {
        // Browsers submit untouched optional inputs as empty strings;
        // treat those as absent.
        let raw = form.get(spec.name).map(String::as_str).filter(|v| !v.is_empty());
        let value = match raw {
            None => Value::Null,
            Some(v) if spec.numeric => {
                let parsed: i64 =
                    v.trim()
                        .parse()
                        .map_err(|_| TranslateError::NonNumericField {
                            field: spec.name,
                            value: v.to_string(),
                        })?;
                Value::from(parsed)
            }
            Some(v) => Value::from(v),
        };
        payload.insert(spec.name.to_string(), value);
    }
    Ok(Value::Object(payload))
}
