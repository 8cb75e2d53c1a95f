//! Project-specific utilities live here.

use serde_json::json;
use shelf_http::error::{AppError, AppResult};
use validator::{Validate, ValidationErrors};

/// Formats a shared log prefix for project logs.
pub fn log_prefix(module: &str) -> String {
    format!("project::{module}")
}

/// Run the declared constraints of `value`, handing it back when they hold.
pub fn validated<T: Validate>(value: T) -> AppResult<T> {
    value.validate().map_err(validation_error)?;
    Ok(value)
}

/// One detail entry per failed constraint, ordered by field name.
pub fn validation_error(errors: ValidationErrors) -> AppError {
    let mut details: Vec<serde_json::Value> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, field_errors)| {
            field_errors.iter().map(move |error| {
                json!({
                    "field": field,
                    "error": error.code,
                    "message": error.message,
                })
            })
        })
        .collect();
    details.sort_by(|a, b| a["field"].as_str().cmp(&b["field"].as_str()));

    let fields: Vec<&str> = details
        .iter()
        .filter_map(|detail| detail["field"].as_str())
        .collect();
    let message = format!("invalid value for: {}", fields.join(", "));

    AppError::validation(details, message)
}

/// A request part that could not be parsed at all.
pub fn rejection(source: &str, err: impl std::fmt::Display) -> AppError {
    AppError::validation(
        vec![json!({ "field": source, "error": "parse", "message": err.to_string() })],
        format!("invalid {source}"),
    )
}
