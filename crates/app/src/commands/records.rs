//! DNS record forms

use std::time::Instant;

use nowip_domain::dns::{schema, FieldKind, RecordData, RecordType, RECORD_SCHEMAS};
use nowip_domain::{NowipError, Result};
use serde::Serialize;
use serde_json::Value;

use crate::utils::{execute_logged, log_command_execution, run_logged};

/// One form input
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldView {
    pub name: &'static str,
    pub input: &'static str,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<i64>,
}

/// Form description for one record type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordFormView {
    pub record_type: RecordType,
    pub title: &'static str,
    pub fields: Vec<FieldView>,
}

/// Record type names in picker order.
pub fn record_types() -> Vec<&'static str> {
    let start = Instant::now();
    let types: Vec<_> = RECORD_SCHEMAS.iter().map(|schema| schema.record_type.as_str()).collect();
    log_command_execution("records::types", start.elapsed(), None);
    types
}

/// Form description for `record_type` (case-insensitive).
///
/// # Errors
/// Returns `NowipError::InvalidInput` for an unknown record type.
pub fn record_form(record_type: &str) -> Result<RecordFormView> {
    run_logged("records::form", || build_form(record_type))
}

fn build_form(record_type: &str) -> Result<RecordFormView> {
    let record_type = parse_type(record_type)?;
    let schema = schema(record_type);

    let fields = schema
        .fields
        .iter()
        .map(|field| {
            let (input, min, max) = match field.kind {
                FieldKind::Ipv4 => ("ipv4", None, None),
                FieldKind::Ipv6 => ("ipv6", None, None),
                FieldKind::Hostname => ("hostname", None, None),
                FieldKind::Integer { min, max } => ("number", Some(min), Some(max)),
                FieldKind::Text => ("text", None, None),
                FieldKind::TextOrList => ("text-list", None, None),
            };
            FieldView { name: field.name, input, required: field.required, min, max }
        })
        .collect();

    Ok(RecordFormView { record_type, title: schema.title, fields })
}

/// Validate submitted form data for `record_type`.
///
/// # Errors
/// Returns `NowipError::InvalidInput` listing every failing field, or for an
/// unknown record type.
pub async fn validate_record(record_type: &str, data: Value) -> Result<RecordData> {
    execute_logged("records::validate", async {
        let record_type = parse_type(record_type)?;
        RecordData::from_json(record_type, data).map_err(NowipError::from)
    })
    .await
}

fn parse_type(raw: &str) -> Result<RecordType> {
    raw.parse::<RecordType>().map_err(NowipError::InvalidInput)
}
