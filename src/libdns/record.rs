use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RecordType {
    A,
    AAAA,
    CAA,
    CNAME,
    MX,
    NS,
    SOA,
    SRV,
    TXT,
    Other(String),
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RecordType::A => "A",
            RecordType::AAAA => "AAAA",
            RecordType::CAA => "CAA",
            RecordType::CNAME => "CNAME",
            RecordType::MX => "MX",
            RecordType::NS => "NS",
            RecordType::SOA => "SOA",
            RecordType::SRV => "SRV",
            RecordType::TXT => "TXT",
            RecordType::Other(other) => other,
        };
        f.write_str(s)
    }
}

impl From<&str> for RecordType {
    fn from(s: &str) -> Self {
        match s.to_ascii_uppercase().as_str() {
            "A" => RecordType::A,
            "AAAA" => RecordType::AAAA,
            "CAA" => RecordType::CAA,
            "CNAME" => RecordType::CNAME,
            "MX" => RecordType::MX,
            "NS" => RecordType::NS,
            "SOA" => RecordType::SOA,
            "SRV" => RecordType::SRV,
            "TXT" => RecordType::TXT,
            other => RecordType::Other(other.to_string()),
        }
    }
}

impl FromStr for RecordType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

/// A provider-agnostic DNS record.
///
/// `name` is relative to the zone (`@` for the apex) or fully qualified with a
/// trailing dot. `id` stays empty until the record is known to exist remotely.
/// `port` applies to SRV records; `flags` and `tag` to CAA records.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DNSRecord {
    pub id: String,
    pub record_type: RecordType,
    pub name: String,
    pub value: String,
    pub ttl: Duration,
    pub priority: Option<u16>,
    pub weight: Option<u16>,
    pub port: Option<u16>,
    pub flags: Option<u8>,
    pub tag: Option<String>,
}

impl DNSRecord {
    pub fn new(record_type: RecordType, name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            record_type,
            name: name.into(),
            value: value.into(),
            ttl: Duration::ZERO,
            priority: None,
            weight: None,
            port: None,
            flags: None,
            tag: None,
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn with_priority(mut self, priority: u16) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_weight(mut self, weight: u16) -> Self {
        self.weight = Some(weight);
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn with_caa(mut self, flags: u8, tag: impl Into<String>) -> Self {
        self.flags = Some(flags);
        self.tag = Some(tag.into());
        self
    }

    /// TTL in whole seconds, sub-second precision truncated.
    pub fn ttl_secs(&self) -> u32 {
        u32::try_from(self.ttl.as_secs()).unwrap_or(u32::MAX)
    }
}
