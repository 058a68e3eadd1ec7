//! DigitalOcean DNS record management behind a provider-agnostic interface.
//!
//! ```no_run
//! use digitalocean_dns::libdns::{Context, DNSProvider, DNSRecord, RecordType};
//! use digitalocean_dns::providers::digitalocean::DigitalOceanProvider;
//!
//! # async fn run() -> Result<(), digitalocean_dns::error::Error> {
//! let provider = DigitalOceanProvider::from_token("dop_v1_...");
//! let ctx = Context::new();
//! let record = DNSRecord::new(RecordType::TXT, "_acme-challenge", "token");
//! provider.set_records(&ctx, "example.com", vec![record]).await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod libdns;
pub mod providers;
pub mod smoke;
