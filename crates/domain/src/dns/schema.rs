//! Static schema table for DNS record data
//!
//! Each record type maps to a title and an ordered list of field
//! descriptors. Forms render from the descriptors; [`validate_fields`]
//! checks untyped form data against them and reports every failing field at
//! once.

use std::net::{Ipv4Addr, Ipv6Addr};

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

use super::record_type::RecordType;
use super::validation::RecordValidationError;

/// Smallest accepted TTL in seconds.
pub const MIN_TTL: i64 = 1;
/// Largest accepted TTL in seconds (one day).
pub const MAX_TTL: i64 = 86_400;
/// Longest hostname accepted, excluding a trailing dot.
pub const MAX_HOSTNAME_LENGTH: usize = 253;

const HOSTNAME_REGEX: &str = r"^[a-zA-Z0-9](?:[-a-zA-Z0-9]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[-a-zA-Z0-9]{0,61}[a-zA-Z0-9])?)*\.?$";

static HOSTNAME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(HOSTNAME_REGEX).expect("HOSTNAME_PATTERN should compile - this is a bug")
});

/// Kind of value a field holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Ipv4,
    Ipv6,
    /// Hostname between 1 and 253 characters.
    Hostname,
    /// Whole number within an inclusive range.
    Integer { min: i64, max: i64 },
    Text,
    /// Either one string or a list of strings.
    TextOrList,
}

/// Describes one input of a record form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldSpec {
    const fn required(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind, required: true }
    }

    const fn port_range(name: &'static str) -> Self {
        Self::required(name, FieldKind::Integer { min: 0, max: 65_535 })
    }
}

const TTL: FieldSpec =
    FieldSpec { name: "ttl", kind: FieldKind::Integer { min: MIN_TTL, max: MAX_TTL }, required: false };

/// Schema for one record type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordSchema {
    pub record_type: RecordType,
    pub title: &'static str,
    pub fields: &'static [FieldSpec],
}

impl RecordSchema {
    /// Look up a field descriptor by name.
    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|field| field.name == name)
    }
}

/// Schemas for every editable record type, in picker order.
pub static RECORD_SCHEMAS: [RecordSchema; 8] = [
    RecordSchema {
        record_type: RecordType::A,
        title: "A Record",
        fields: &[FieldSpec::required("address", FieldKind::Ipv4), TTL],
    },
    RecordSchema {
        record_type: RecordType::Aaaa,
        title: "AAAA Record",
        fields: &[FieldSpec::required("address", FieldKind::Ipv6), TTL],
    },
    RecordSchema {
        record_type: RecordType::Cname,
        title: "CNAME Record",
        fields: &[FieldSpec::required("domain", FieldKind::Hostname), TTL],
    },
    RecordSchema {
        record_type: RecordType::Mx,
        title: "MX Record",
        fields: &[
            FieldSpec::required("exchange", FieldKind::Hostname),
            FieldSpec::port_range("priority"),
            TTL,
        ],
    },
    RecordSchema {
        record_type: RecordType::Srv,
        title: "SRV Record",
        fields: &[
            FieldSpec::port_range("priority"),
            FieldSpec::port_range("weight"),
            FieldSpec::port_range("port"),
            FieldSpec::required("target", FieldKind::Hostname),
            TTL,
        ],
    },
    RecordSchema {
        record_type: RecordType::Txt,
        title: "TXT Record",
        fields: &[FieldSpec::required("data", FieldKind::TextOrList), TTL],
    },
    RecordSchema {
        record_type: RecordType::Spf,
        title: "SPF Record",
        fields: &[FieldSpec::required("data", FieldKind::TextOrList), TTL],
    },
    RecordSchema {
        record_type: RecordType::Caa,
        title: "CAA Record",
        fields: &[
            FieldSpec::required("flags", FieldKind::Integer { min: 0, max: 255 }),
            FieldSpec::required("tag", FieldKind::Text),
            FieldSpec::required("value", FieldKind::Text),
            TTL,
        ],
    },
];

/// Schema for `record_type`.
pub fn schema(record_type: RecordType) -> &'static RecordSchema {
    // The table is ordered like `RecordType::ALL`.
    match record_type {
        RecordType::A => &RECORD_SCHEMAS[0],
        RecordType::Aaaa => &RECORD_SCHEMAS[1],
        RecordType::Cname => &RECORD_SCHEMAS[2],
        RecordType::Mx => &RECORD_SCHEMAS[3],
        RecordType::Srv => &RECORD_SCHEMAS[4],
        RecordType::Txt => &RECORD_SCHEMAS[5],
        RecordType::Spf => &RECORD_SCHEMAS[6],
        RecordType::Caa => &RECORD_SCHEMAS[7],
    }
}

/// Whether `value` is an acceptable hostname.
pub fn is_valid_hostname(value: &str) -> bool {
    let unrooted = value.strip_suffix('.').unwrap_or(value);
    !unrooted.is_empty()
        && unrooted.len() <= MAX_HOSTNAME_LENGTH
        && HOSTNAME_PATTERN.is_match(value)
}

/// Check `data` against the schema of `record_type`.
///
/// Fields not named by the schema are ignored.
///
/// # Errors
/// Returns every failing field when at least one check fails.
pub fn validate_fields(
    record_type: RecordType,
    data: &Value,
) -> Result<(), RecordValidationError> {
    let mut error = RecordValidationError::new(record_type);

    let Some(object) = data.as_object() else {
        error.add("", "expected an object");
        return Err(error);
    };

    for field in schema(record_type).fields {
        check_field(field, object, &mut error);
    }

    if error.is_empty() {
        Ok(())
    } else {
        Err(error)
    }
}

fn check_field(field: &FieldSpec, object: &Map<String, Value>, error: &mut RecordValidationError) {
    // An optional field may be omitted but not sent as null.
    let value = match object.get(field.name) {
        None | Some(Value::Null) if field.required => {
            error.add(field.name, "is required");
            return;
        }
        None => return,
        Some(value) => value,
    };

    match field.kind {
        FieldKind::Ipv4 => match value.as_str() {
            Some(s) if s.parse::<Ipv4Addr>().is_ok() => {}
            _ => error.add(field.name, "must be an IPv4 address"),
        },
        FieldKind::Ipv6 => match value.as_str() {
            Some(s) if s.parse::<Ipv6Addr>().is_ok() => {}
            _ => error.add(field.name, "must be an IPv6 address"),
        },
        FieldKind::Hostname => match value.as_str() {
            Some(s) if is_valid_hostname(s) => {}
            _ => error.add(
                field.name,
                format!("must be a hostname of 1 to {MAX_HOSTNAME_LENGTH} characters"),
            ),
        },
        FieldKind::Integer { min, max } => match value.as_i64() {
            Some(n) if (min..=max).contains(&n) => {}
            Some(_) => error.add(field.name, format!("must be between {min} and {max}")),
            None => error.add(field.name, "must be a whole number"),
        },
        FieldKind::Text => {
            if !value.is_string() {
                error.add(field.name, "must be a string");
            }
        }
        FieldKind::TextOrList => {
            let ok = match value {
                Value::String(_) => true,
                Value::Array(items) => items.iter().all(Value::is_string),
                _ => false,
            };
            if !ok {
                error.add(field.name, "must be a string or a list of strings");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn table_covers_every_type_in_order() {
        for (schema_entry, record_type) in RECORD_SCHEMAS.iter().zip(RecordType::ALL) {
            assert_eq!(schema_entry.record_type, record_type);
            assert_eq!(schema(record_type).record_type, record_type);
        }
    }

    #[test]
    fn every_schema_has_optional_ttl() {
        for schema_entry in &RECORD_SCHEMAS {
            let ttl = schema_entry.field("ttl").unwrap();
            assert!(!ttl.required);
            assert_eq!(ttl.kind, FieldKind::Integer { min: 1, max: 86_400 });
        }
    }

    #[test]
    fn titles_match_type_names() {
        assert_eq!(schema(RecordType::Mx).title, "MX Record");
        assert_eq!(schema(RecordType::Aaaa).title, "AAAA Record");
    }

    #[test]
    fn hostname_rules() {
        assert!(is_valid_hostname("example.com"));
        assert!(is_valid_hostname("mail.example.com."));
        assert!(is_valid_hostname("a"));
        assert!(!is_valid_hostname(""));
        assert!(!is_valid_hostname("-bad.example"));
        assert!(!is_valid_hostname("bad-.example"));
        assert!(!is_valid_hostname("under_score.example"));
        assert!(!is_valid_hostname(&"a".repeat(64)));

        let long = vec!["a".repeat(50); 6].join(".");
        assert!(long.len() > MAX_HOSTNAME_LENGTH);
        assert!(!is_valid_hostname(&long));
    }

    #[test]
    fn accepts_valid_a_record() {
        assert!(validate_fields(RecordType::A, &json!({ "address": "192.0.2.1" })).is_ok());
        assert!(
            validate_fields(RecordType::A, &json!({ "address": "192.0.2.1", "ttl": 300 })).is_ok()
        );
    }

    #[test]
    fn rejects_wrong_address_family() {
        let err = validate_fields(RecordType::A, &json!({ "address": "2001:db8::1" })).unwrap_err();
        assert_eq!(err.fields(), ["address"]);

        let err = validate_fields(RecordType::Aaaa, &json!({ "address": "192.0.2.1" })).unwrap_err();
        assert_eq!(err.fields(), ["address"]);
    }

    #[test]
    fn ttl_bounds_are_inclusive() {
        let ok_low = json!({ "domain": "target.example", "ttl": 1 });
        let ok_high = json!({ "domain": "target.example", "ttl": 86_400 });
        let too_low = json!({ "domain": "target.example", "ttl": 0 });
        let too_high = json!({ "domain": "target.example", "ttl": 86_401 });

        assert!(validate_fields(RecordType::Cname, &ok_low).is_ok());
        assert!(validate_fields(RecordType::Cname, &ok_high).is_ok());
        assert_eq!(validate_fields(RecordType::Cname, &too_low).unwrap_err().fields(), ["ttl"]);
        assert_eq!(validate_fields(RecordType::Cname, &too_high).unwrap_err().fields(), ["ttl"]);
    }

    #[test]
    fn reports_every_failing_srv_field() {
        let data = json!({ "priority": -1, "weight": 70_000, "port": "80", "target": "" });
        let err = validate_fields(RecordType::Srv, &data).unwrap_err();
        assert_eq!(err.fields(), ["priority", "weight", "port", "target"]);
    }

    #[test]
    fn txt_accepts_string_or_list() {
        assert!(validate_fields(RecordType::Txt, &json!({ "data": "v=spf1 -all" })).is_ok());
        assert!(validate_fields(RecordType::Spf, &json!({ "data": ["a", "b"] })).is_ok());
        assert!(validate_fields(RecordType::Txt, &json!({ "data": ["a", 1] })).is_err());
    }

    #[test]
    fn caa_flags_fit_a_byte() {
        let ok = json!({ "flags": 128, "tag": "issue", "value": "letsencrypt.org" });
        let bad = json!({ "flags": 256, "tag": "issue", "value": "letsencrypt.org" });
        assert!(validate_fields(RecordType::Caa, &ok).is_ok());
        assert_eq!(validate_fields(RecordType::Caa, &bad).unwrap_err().fields(), ["flags"]);
    }

    #[test]
    fn missing_required_and_non_object_input() {
        let err = validate_fields(RecordType::Mx, &json!({})).unwrap_err();
        assert_eq!(err.fields(), ["exchange", "priority"]);

        assert!(validate_fields(RecordType::A, &json!("192.0.2.1")).is_err());
    }

    #[test]
    fn fractional_numbers_are_rejected() {
        let data = json!({ "exchange": "mx.example", "priority": 10.5 });
        assert_eq!(validate_fields(RecordType::Mx, &data).unwrap_err().fields(), ["priority"]);
    }

    #[test]
    fn optional_fields_reject_null() {
        let omitted = json!({ "address": "192.0.2.1" });
        assert!(validate_fields(RecordType::A, &omitted).is_ok());

        let null_ttl = json!({ "address": "192.0.2.1", "ttl": null });
        assert_eq!(validate_fields(RecordType::A, &null_ttl).unwrap_err().fields(), ["ttl"]);

        let null_required = json!({ "address": null });
        let err = validate_fields(RecordType::A, &null_required).unwrap_err();
        assert_eq!(err.message_for("address"), Some("is required"));
    }
}
