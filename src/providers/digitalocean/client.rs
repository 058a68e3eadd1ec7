use std::fmt;
use std::time::Duration;

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::providers::digitalocean::error::DigitalOceanError;
use crate::providers::digitalocean::types::*;

pub const DEFAULT_API_URL: &str = "https://api.digitalocean.com";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone, Deserialize)]
pub struct DigitalOceanConfig {
    pub api_token: String,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default)]
    pub per_page: Option<u32>,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

impl DigitalOceanConfig {
    pub fn new(api_token: impl Into<String>) -> Self {
        Self {
            api_token: api_token.into(),
            api_url: default_api_url(),
            per_page: None,
        }
    }
}

impl fmt::Debug for DigitalOceanConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DigitalOceanConfig")
            .field("api_token", &"<redacted>")
            .field("api_url", &self.api_url)
            .field("per_page", &self.per_page)
            .finish()
    }
}

/// Handle for the DigitalOcean domain records API. The token is sent as-is;
/// an invalid one only surfaces when a request is rejected.
pub struct DigitalOceanClient {
    client: Client,
    api_url: String,
    api_token: String,
    per_page: Option<u32>,
}

impl DigitalOceanClient {
    pub fn new(config: &DigitalOceanConfig) -> Self {
        Self {
            client: Client::new(),
            api_url: config.api_url.trim_end_matches('/').to_string(),
            api_token: config.api_token.clone(),
            per_page: config.per_page,
        }
    }

    fn records_url(&self, zone: &str) -> String {
        format!("{}/v2/domains/{}/records", self.api_url, zone)
    }

    fn record_url(&self, zone: &str, id: u64) -> String {
        format!("{}/v2/domains/{}/records/{}", self.api_url, zone, id)
    }

    fn authorized(&self, req: RequestBuilder) -> RequestBuilder {
        req.bearer_auth(&self.api_token).timeout(REQUEST_TIMEOUT)
    }

    async fn handle_request<T>(&self, req: RequestBuilder) -> Result<T, DigitalOceanError>
    where
        T: DeserializeOwned,
    {
        let response = self.authorized(req).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            serde_json::from_str(&body).map_err(DigitalOceanError::Decode)
        } else {
            Err(DigitalOceanError::from_response(status, &body))
        }
    }

    /// One page of the zone's records.
    pub async fn records(
        &self,
        zone: &str,
        page: u32,
    ) -> Result<DomainRecordsRoot, DigitalOceanError> {
        debug!(zone, page, "listing records");
        let mut query = vec![("page", page.to_string())];
        if let Some(per_page) = self.per_page {
            query.push(("per_page", per_page.to_string()));
        }
        self.handle_request(self.client.get(self.records_url(zone)).query(&query))
            .await
    }

    /// Records matching `record_type` and the fully-qualified `name`.
    pub async fn records_by_type_and_name(
        &self,
        zone: &str,
        record_type: &str,
        name: &str,
    ) -> Result<Vec<DomainRecord>, DigitalOceanError> {
        debug!(zone, record_type, name, "looking up records");
        let root: DomainRecordsRoot = self
            .handle_request(
                self.client
                    .get(self.records_url(zone))
                    .query(&[("type", record_type), ("name", name)]),
            )
            .await?;
        Ok(root.domain_records)
    }

    pub async fn create_record(
        &self,
        zone: &str,
        req: &DomainRecordEditRequest,
    ) -> Result<DomainRecord, DigitalOceanError> {
        debug!(zone, name = %req.name, record_type = %req.record_type, "creating record");
        let root: DomainRecordRoot = self
            .handle_request(self.client.post(self.records_url(zone)).json(req))
            .await?;
        Ok(root.domain_record)
    }

    pub async fn edit_record(
        &self,
        zone: &str,
        id: u64,
        req: &DomainRecordEditRequest,
    ) -> Result<DomainRecord, DigitalOceanError> {
        debug!(zone, id, "editing record");
        let root: DomainRecordRoot = self
            .handle_request(self.client.put(self.record_url(zone, id)).json(req))
            .await?;
        Ok(root.domain_record)
    }

    pub async fn delete_record(&self, zone: &str, id: u64) -> Result<(), DigitalOceanError> {
        debug!(zone, id, "deleting record");
        let response = self
            .authorized(self.client.delete(self.record_url(zone, id)))
            .send()
            .await?;
        match response.status() {
            StatusCode::NO_CONTENT | StatusCode::OK => Ok(()),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(DigitalOceanError::from_response(status, &body))
            }
        }
    }
}
