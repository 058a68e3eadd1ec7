//! Provider-agnostic record model and provider interface.

pub mod context;
pub mod provider;
pub mod record;

pub use context::Context;
pub use provider::DNSProvider;
pub use record::{DNSRecord, RecordType};
