use crate::error::Error;
use crate::libdns::context::Context;
use crate::libdns::record::DNSRecord;
use async_trait::async_trait;

/// Record management for a single DNS zone per call.
///
/// Batch operations apply records one at a time and stop at the first
/// failure; changes already applied are not rolled back.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DNSProvider: Send + Sync {
    fn name(&self) -> &str;

    /// All records in `zone`, in the order the provider returns them.
    async fn get_records(&self, ctx: &Context, zone: &str) -> Result<Vec<DNSRecord>, Error>;

    /// Creates every record unconditionally. Identical input creates duplicates.
    async fn append_records(
        &self,
        ctx: &Context,
        zone: &str,
        records: Vec<DNSRecord>,
    ) -> Result<Vec<DNSRecord>, Error>;

    /// Upserts keyed on (type, name). Any caller-supplied ID is ignored.
    async fn set_records(
        &self,
        ctx: &Context,
        zone: &str,
        records: Vec<DNSRecord>,
    ) -> Result<Vec<DNSRecord>, Error>;

    /// Deletes the record matching each input's (type, name). Not idempotent.
    async fn delete_records(
        &self,
        ctx: &Context,
        zone: &str,
        records: Vec<DNSRecord>,
    ) -> Result<Vec<DNSRecord>, Error>;
}
