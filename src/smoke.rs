//! End-to-end exercise of a provider against a live zone.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tracing::info;

use crate::error::Error;
use crate::libdns::{Context, DNSProvider, DNSRecord, RecordType};

pub const TXT_TEST_NAME: &str = "libdns-txt-test";
pub const A_TEST_NAME: &str = "libdns-a-test";

const TEST_TTL: Duration = Duration::from_secs(30);

fn timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

/// Upserts a TXT record, then appends a second one under the same name.
pub async fn txt_round_trip(
    provider: &dyn DNSProvider,
    ctx: &Context,
    zone: &str,
) -> Result<(), Error> {
    info!(provider = provider.name(), "create or update entry for {TXT_TEST_NAME}");
    let replacement = DNSRecord::new(
        RecordType::TXT,
        TXT_TEST_NAME,
        format!("Replacement test entry created by libdns {}", timestamp()),
    )
    .with_ttl(TEST_TTL);
    provider.set_records(ctx, zone, vec![replacement]).await?;

    info!(provider = provider.name(), "creating new entry for {TXT_TEST_NAME}");
    let extra = DNSRecord::new(
        RecordType::TXT,
        TXT_TEST_NAME,
        format!("This is a test entry created by libdns {}", timestamp()),
    )
    .with_ttl(TEST_TTL);
    provider.append_records(ctx, zone, vec![extra]).await?;
    Ok(())
}

/// Upserts an A record pointing at the loopback address.
pub async fn address_upsert(
    provider: &dyn DNSProvider,
    ctx: &Context,
    zone: &str,
) -> Result<(), Error> {
    info!(provider = provider.name(), "create or update entry for {A_TEST_NAME}");
    let record = DNSRecord::new(RecordType::A, A_TEST_NAME, "127.0.0.1").with_ttl(TEST_TTL);
    provider.set_records(ctx, zone, vec![record]).await?;
    Ok(())
}
