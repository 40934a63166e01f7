//! DNS record schemas used by record-editing forms
//!
//! A static table describes, per record type, the fields a record carries
//! and the constraints on each. The same table drives form rendering and
//! validation of submitted data.

pub mod data;
pub mod record_type;
pub mod schema;
pub mod validation;

pub use data::{AData, AaaaData, CaaData, CnameData, MxData, RecordData, SrvData, TextData, TextValue};
pub use record_type::RecordType;
pub use schema::{
    is_valid_hostname, schema, validate_fields, FieldKind, FieldSpec, RecordSchema,
    RECORD_SCHEMAS,
};
pub use validation::{FieldError, RecordValidationError};
