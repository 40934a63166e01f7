//! Page-level commands
//!
//! Thin wrappers that combine a request session with domain helpers and
//! return serializable views.

pub mod domains;
pub mod records;

pub use domains::{domain_detail, list_domains, DomainView};
pub use records::{record_form, record_types, validate_record, FieldView, RecordFormView};
