use std::time::Duration;

use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::libdns::{DNSRecord, RecordType};
use crate::providers::digitalocean::error::DigitalOceanError;

#[derive(Deserialize, Debug, Clone)]
pub struct DomainRecord {
    pub id: u64,
    #[serde(rename = "type")]
    pub record_type: String,
    pub name: String,
    pub data: String,
    pub priority: Option<u16>,
    pub port: Option<u16>,
    pub ttl: u32,
    pub weight: Option<u16>,
    pub flags: Option<u8>,
    pub tag: Option<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct DomainRecordEditRequest {
    #[serde(rename = "type")]
    pub record_type: String,
    pub name: String,
    pub data: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flags: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct DomainRecordsRoot {
    pub domain_records: Vec<DomainRecord>,
    pub links: Option<Links>,
    pub meta: Option<Meta>,
}

#[derive(Deserialize, Debug)]
pub struct DomainRecordRoot {
    pub domain_record: DomainRecord,
}

#[derive(Deserialize, Debug, Default)]
pub struct Meta {
    #[serde(default)]
    pub total: u64,
}

#[derive(Deserialize, Debug, Default)]
pub struct Links {
    pub pages: Option<Pages>,
}

#[derive(Deserialize, Debug, Default)]
pub struct Pages {
    #[serde(default)]
    pub first: String,
    #[serde(default)]
    pub prev: String,
    #[serde(default)]
    pub next: String,
    #[serde(default)]
    pub last: String,
}

impl Links {
    pub fn is_last_page(&self) -> bool {
        self.pages.as_ref().is_none_or(|p| p.last.is_empty())
    }

    /// Page number of the response these links came from, derived from the
    /// `prev` link.
    pub fn current_page(&self) -> Result<u32, DigitalOceanError> {
        let Some(pages) = &self.pages else {
            return Ok(1);
        };
        if !pages.prev.is_empty() {
            return Ok(page_for_url(&pages.prev)? + 1);
        }
        if !pages.next.is_empty() {
            return Ok(1);
        }
        Ok(0)
    }
}

fn page_for_url(raw: &str) -> Result<u32, DigitalOceanError> {
    let url = Url::parse(raw)
        .map_err(|e| DigitalOceanError::Pagination(format!("invalid page link {raw:?}: {e}")))?;
    url.query_pairs()
        .find(|(key, _)| key == "page")
        .and_then(|(_, value)| value.parse().ok())
        .ok_or_else(|| DigitalOceanError::Pagination(format!("no page number in {raw:?}")))
}

#[derive(Deserialize, Debug)]
pub struct ErrorResponse {
    pub id: String,
    pub message: String,
    pub request_id: Option<String>,
}

pub fn to_dns_record(dr: &DomainRecord) -> DNSRecord {
    DNSRecord {
        id: dr.id.to_string(),
        record_type: RecordType::from(dr.record_type.as_str()),
        name: dr.name.clone(),
        value: dr.data.clone(),
        ttl: Duration::from_secs(u64::from(dr.ttl)),
        priority: dr.priority,
        weight: dr.weight,
        port: dr.port,
        flags: dr.flags,
        tag: dr.tag.clone(),
    }
}

pub fn to_edit_request(rec: &DNSRecord) -> DomainRecordEditRequest {
    let ttl = rec.ttl_secs();
    DomainRecordEditRequest {
        record_type: rec.record_type.to_string(),
        name: rec.name.clone(),
        data: rec.value.clone(),
        ttl: (ttl > 0).then_some(ttl),
        priority: rec.priority,
        weight: rec.weight,
        port: rec.port,
        flags: rec.flags,
        tag: rec.tag.clone(),
    }
}
