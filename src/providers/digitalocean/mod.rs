//! DigitalOcean provider implementation

pub mod client;
pub mod error;
pub mod types;


pub use client::{DEFAULT_API_URL, DigitalOceanClient, DigitalOceanConfig};
pub use error::DigitalOceanError;
pub use types::{DomainRecord, DomainRecordEditRequest};

use async_trait::async_trait;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, info};

use crate::error::Error;
use crate::libdns::{Context, DNSProvider, DNSRecord};
use types::{to_dns_record, to_edit_request};

/// Record management against the DigitalOcean API.
///
/// Every operation holds a single lock for its whole duration, so at most one
/// operation per provider instance talks to the API at a time, whatever zone
/// it targets. The API client is built from the token on first use and kept.
///
/// Set and Delete address records by (type, name) and assume the zone holds at
/// most one record per pair; more than one is reported as
/// [`Error::AmbiguousMatch`].
pub struct DigitalOceanProvider {
    config: DigitalOceanConfig,
    client: Mutex<Option<DigitalOceanClient>>,
}

impl DigitalOceanProvider {
    pub fn new(config: DigitalOceanConfig) -> Self {
        Self {
            config,
            client: Mutex::new(None),
        }
    }

    pub fn from_token(api_token: impl Into<String>) -> Self {
        Self::new(DigitalOceanConfig::new(api_token))
    }

    async fn lock(&self, ctx: &Context) -> Result<MutexGuard<'_, Option<DigitalOceanClient>>, Error> {
        ctx.run(async { Ok::<_, Error>(self.client.lock().await) })
            .await
    }

    fn client<'a>(&self, slot: &'a mut Option<DigitalOceanClient>) -> &'a DigitalOceanClient {
        slot.get_or_insert_with(|| {
            debug!("creating DigitalOcean API client");
            DigitalOceanClient::new(&self.config)
        })
    }

    /// Looks up the remote record with the same type and name as `record` and
    /// returns `record` with its ID filled in.
    pub async fn resolve_record(
        &self,
        ctx: &Context,
        zone: &str,
        record: &DNSRecord,
    ) -> Result<DNSRecord, Error> {
        let zone = normalize_zone(zone);
        let mut guard = self.lock(ctx).await?;
        let client = self.client(&mut guard);
        resolve(ctx, client, zone, record).await
    }

    #[cfg(test)]
    async fn has_client(&self) -> bool {
        self.client.lock().await.is_some()
    }
}

fn normalize_zone(zone: &str) -> &str {
    zone.trim_end_matches('.')
}

/// Name relative to `zone`, as the API stores it. A name ending in `.` is
/// fully qualified: the zone suffix is stripped and the zone itself becomes `@`.
fn relative_name(name: &str, zone: &str) -> String {
    let Some(absolute) = name.strip_suffix('.') else {
        return name.to_string();
    };
    if absolute.eq_ignore_ascii_case(zone) {
        return "@".to_string();
    }
    let suffix = format!(".{zone}").to_ascii_lowercase();
    if absolute.to_ascii_lowercase().ends_with(&suffix) {
        return absolute[..absolute.len() - suffix.len()].to_string();
    }
    absolute.to_string()
}

/// The API filters by fully-qualified name; `@` and empty names mean the apex.
fn qualify_name(name: &str, zone: &str) -> String {
    match relative_name(name, zone).as_str() {
        "" | "@" => zone.to_string(),
        name => format!("{name}.{zone}"),
    }
}

fn edit_request(record: &DNSRecord, zone: &str) -> DomainRecordEditRequest {
    DomainRecordEditRequest {
        name: relative_name(&record.name, zone),
        ..to_edit_request(record)
    }
}

fn parse_record_id(id: &str) -> Result<u64, Error> {
    id.parse().map_err(|source| Error::MalformedId {
        id: id.to_string(),
        source,
    })
}

async fn list_all(
    ctx: &Context,
    client: &DigitalOceanClient,
    zone: &str,
) -> Result<Vec<DNSRecord>, Error> {
    let mut records = Vec::new();
    let mut page = 1;
    loop {
        let root = ctx.run(client.records(zone, page)).await?;
        records.extend(root.domain_records.iter().map(to_dns_record));
        if let (1, Some(meta)) = (page, &root.meta) {
            debug!(zone, total = meta.total, "listing records");
        }

        let Some(links) = root.links else {
            break;
        };
        if links.is_last_page() {
            break;
        }
        let next = links.current_page()? + 1;
        if next <= page {
            return Err(DigitalOceanError::Pagination(format!(
                "page {page} links back to page {next}"
            ))
            .into());
        }
        page = next;
        debug!(zone, page, fetched = records.len(), "fetching next page");
    }
    Ok(records)
}

async fn resolve(
    ctx: &Context,
    client: &DigitalOceanClient,
    zone: &str,
    record: &DNSRecord,
) -> Result<DNSRecord, Error> {
    let fqdn = qualify_name(&record.name, zone);
    let found = ctx
        .run(client.records_by_type_and_name(zone, &record.record_type.to_string(), &fqdn))
        .await?;

    match found.as_slice() {
        [] => Err(Error::NotFound {
            zone: zone.to_string(),
            record_type: record.record_type.clone(),
            name: record.name.clone(),
        }),
        [existing] => Ok(DNSRecord {
            id: existing.id.to_string(),
            ..record.clone()
        }),
        _ => Err(Error::AmbiguousMatch {
            zone: zone.to_string(),
            record_type: record.record_type.clone(),
            name: record.name.clone(),
            count: found.len(),
        }),
    }
}

async fn add(
    ctx: &Context,
    client: &DigitalOceanClient,
    zone: &str,
    record: &DNSRecord,
) -> Result<DNSRecord, Error> {
    let created = ctx
        .run(client.create_record(zone, &edit_request(record, zone)))
        .await?;
    info!(zone, id = created.id, name = %created.name, "created record");
    Ok(to_dns_record(&created))
}

async fn update(
    ctx: &Context,
    client: &DigitalOceanClient,
    zone: &str,
    record: &DNSRecord,
) -> Result<DNSRecord, Error> {
    let id = parse_record_id(&record.id)?;
    let updated = ctx
        .run(client.edit_record(zone, id, &edit_request(record, zone)))
        .await?;
    info!(zone, id, name = %updated.name, "updated record");
    Ok(to_dns_record(&updated))
}

async fn remove(
    ctx: &Context,
    client: &DigitalOceanClient,
    zone: &str,
    record: DNSRecord,
) -> Result<DNSRecord, Error> {
    let id = parse_record_id(&record.id)?;
    ctx.run(client.delete_record(zone, id)).await?;
    info!(zone, id, name = %record.name, "deleted record");
    Ok(record)
}

#[async_trait]
impl DNSProvider for DigitalOceanProvider {
    fn name(&self) -> &str {
        "digitalocean"
    }

    async fn get_records(&self, ctx: &Context, zone: &str) -> Result<Vec<DNSRecord>, Error> {
        let zone = normalize_zone(zone);
        let mut guard = self.lock(ctx).await?;
        let client = self.client(&mut guard);
        list_all(ctx, client, zone).await
    }

    async fn append_records(
        &self,
        ctx: &Context,
        zone: &str,
        records: Vec<DNSRecord>,
    ) -> Result<Vec<DNSRecord>, Error> {
        let zone = normalize_zone(zone);
        let mut guard = self.lock(ctx).await?;
        let client = self.client(&mut guard);

        let mut appended = Vec::with_capacity(records.len());
        for record in &records {
            appended.push(add(ctx, client, zone, record).await?);
        }
        Ok(appended)
    }

    async fn set_records(
        &self,
        ctx: &Context,
        zone: &str,
        records: Vec<DNSRecord>,
    ) -> Result<Vec<DNSRecord>, Error> {
        let zone = normalize_zone(zone);
        let mut guard = self.lock(ctx).await?;
        let client = self.client(&mut guard);

        let mut set = Vec::with_capacity(records.len());
        for record in &records {
            let result = match resolve(ctx, client, zone, record).await {
                Ok(existing) => update(ctx, client, zone, &existing).await?,
                Err(Error::NotFound { .. }) => add(ctx, client, zone, record).await?,
                Err(e) => return Err(e),
            };
            set.push(result);
        }
        Ok(set)
    }

    async fn delete_records(
        &self,
        ctx: &Context,
        zone: &str,
        records: Vec<DNSRecord>,
    ) -> Result<Vec<DNSRecord>, Error> {
        let zone = normalize_zone(zone);
        let mut guard = self.lock(ctx).await?;
        let client = self.client(&mut guard);

        let mut deleted = Vec::with_capacity(records.len());
        for record in &records {
            let existing = resolve(ctx, client, zone, record).await?;
            deleted.push(remove(ctx, client, zone, existing).await?);
        }
        Ok(deleted)
    }
}
