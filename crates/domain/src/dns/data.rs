//! Typed DNS record data
//!
//! Form input arrives as loose JSON. [`RecordData::from_json`] runs the
//! schema checks first so users get every field error at once, then
//! deserializes into the typed payload the API expects.

use std::net::{Ipv4Addr, Ipv6Addr};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::record_type::RecordType;
use super::schema::validate_fields;
use super::validation::RecordValidationError;

/// Time to live in seconds, 1..=86400 when present
pub type Ttl = Option<u32>;

/// A record payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AData {
    pub address: Ipv4Addr,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Ttl,
}

/// AAAA record payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AaaaData {
    pub address: Ipv6Addr,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Ttl,
}

/// CNAME record payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CnameData {
    pub domain: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Ttl,
}

/// MX record payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MxData {
    pub exchange: String,
    pub priority: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Ttl,
}

/// SRV record payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SrvData {
    pub priority: u16,
    pub weight: u16,
    pub port: u16,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Ttl,
}

/// TXT/SPF value: one string or several character-strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextValue {
    Single(String),
    Multiple(Vec<String>),
}

impl TextValue {
    /// Character-strings in order.
    pub fn parts(&self) -> Vec<&str> {
        match self {
            Self::Single(s) => vec![s.as_str()],
            Self::Multiple(parts) => parts.iter().map(String::as_str).collect(),
        }
    }
}

/// TXT and SPF record payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextData {
    pub data: TextValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Ttl,
}

/// CAA record payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaaData {
    pub flags: u8,
    pub tag: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Ttl,
}

/// Validated data for one record
///
/// Serializes as the bare payload object; the record type travels next to
/// it in the API request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RecordData {
    A(AData),
    Aaaa(AaaaData),
    Cname(CnameData),
    Mx(MxData),
    Srv(SrvData),
    Txt(TextData),
    Spf(TextData),
    Caa(CaaData),
}

impl RecordData {
    /// Validate `data` against the `record_type` schema and build the
    /// typed payload.
    ///
    /// # Errors
    /// Returns the failing fields when validation fails.
    pub fn from_json(record_type: RecordType, data: Value) -> Result<Self, RecordValidationError> {
        validate_fields(record_type, &data)?;

        let parsed = match record_type {
            RecordType::A => serde_json::from_value(data).map(Self::A),
            RecordType::Aaaa => serde_json::from_value(data).map(Self::Aaaa),
            RecordType::Cname => serde_json::from_value(data).map(Self::Cname),
            RecordType::Mx => serde_json::from_value(data).map(Self::Mx),
            RecordType::Srv => serde_json::from_value(data).map(Self::Srv),
            RecordType::Txt => serde_json::from_value(data).map(Self::Txt),
            RecordType::Spf => serde_json::from_value(data).map(Self::Spf),
            RecordType::Caa => serde_json::from_value(data).map(Self::Caa),
        };

        parsed.map_err(|e| {
            let mut error = RecordValidationError::new(record_type);
            error.add("", e.to_string());
            error
        })
    }

    /// Type of this record.
    pub fn record_type(&self) -> RecordType {
        match self {
            Self::A(_) => RecordType::A,
            Self::Aaaa(_) => RecordType::Aaaa,
            Self::Cname(_) => RecordType::Cname,
            Self::Mx(_) => RecordType::Mx,
            Self::Srv(_) => RecordType::Srv,
            Self::Txt(_) => RecordType::Txt,
            Self::Spf(_) => RecordType::Spf,
            Self::Caa(_) => RecordType::Caa,
        }
    }

    /// TTL override, if any.
    pub fn ttl(&self) -> Ttl {
        match self {
            Self::A(d) => d.ttl,
            Self::Aaaa(d) => d.ttl,
            Self::Cname(d) => d.ttl,
            Self::Mx(d) => d.ttl,
            Self::Srv(d) => d.ttl,
            Self::Txt(d) | Self::Spf(d) => d.ttl,
            Self::Caa(d) => d.ttl,
        }
    }
}
