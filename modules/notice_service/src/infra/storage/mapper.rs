//! Entity to model mappers
//!
//! Option values are stored as JSON text. Rows written by other tools may hold
//! plain text; those decode to a JSON string rather than failing the read.

use super::entity;
use chrono::Utc;
use serde_json::Value;

pub fn encode_option_value(value: &Value) -> anyhow::Result<String> {
    Ok(serde_json::to_string(value)?)
}

pub fn decode_option_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

pub fn new_option(key: &str, encoded: String, autoload: bool) -> entity::ActiveModel {
    use sea_orm::ActiveValue::Set;

    entity::ActiveModel {
        option_name: Set(key.to_string()),
        option_value: Set(encoded),
        autoload: Set(autoload),
        updated_at: Set(Utc::now()),
    }
}
