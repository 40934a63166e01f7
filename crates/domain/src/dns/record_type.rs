//! DNS record type names supported by the record editor

use serde::{Deserialize, Serialize};

use crate::impl_str_conversions;

/// Record types the API accepts
///
/// NS, PTR and SOA records are managed by the platform and are not editable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RecordType {
    A,
    #[serde(rename = "AAAA")]
    Aaaa,
    #[serde(rename = "CNAME")]
    Cname,
    #[serde(rename = "MX")]
    Mx,
    #[serde(rename = "SRV")]
    Srv,
    #[serde(rename = "TXT")]
    Txt,
    #[serde(rename = "SPF")]
    Spf,
    #[serde(rename = "CAA")]
    Caa,
}

impl_str_conversions!(RecordType {
    A => "A",
    Aaaa => "AAAA",
    Cname => "CNAME",
    Mx => "MX",
    Srv => "SRV",
    Txt => "TXT",
    Spf => "SPF",
    Caa => "CAA",
});

impl RecordType {
    /// Every editable type, in picker order.
    pub const ALL: [RecordType; 8] = [
        RecordType::A,
        RecordType::Aaaa,
        RecordType::Cname,
        RecordType::Mx,
        RecordType::Srv,
        RecordType::Txt,
        RecordType::Spf,
        RecordType::Caa,
    ];

    /// Names of every editable type, in picker order.
    pub fn names() -> impl Iterator<Item = &'static str> {
        Self::ALL.into_iter().map(|record_type| record_type.as_str())
    }
}
