use std::num::ParseIntError;

use thiserror::Error;

use crate::libdns::RecordType;
use crate::providers::digitalocean::DigitalOceanError;

#[derive(Error, Debug)]
pub enum Error {
    #[error("record not found: {zone} {record_type} {name}")]
    NotFound {
        zone: String,
        record_type: RecordType,
        name: String,
    },

    #[error("found {count} records for {zone} {record_type} {name}, expected at most one")]
    AmbiguousMatch {
        zone: String,
        record_type: RecordType,
        name: String,
        count: usize,
    },

    #[error(transparent)]
    Api(#[from] DigitalOceanError),

    #[error("malformed record id {id:?}")]
    MalformedId {
        id: String,
        #[source]
        source: ParseIntError,
    },

    #[error("operation cancelled")]
    Cancelled,

    #[error("deadline exceeded")]
    DeadlineExceeded,
}

impl Error {
    /// Operator-facing hint for API failures with a well-known cause.
    pub fn hint(&self) -> Option<&'static str> {
        let Error::Api(err) = self else {
            return None;
        };
        if err.is_unauthorized() {
            Some("check that DO_AUTH_TOKEN is valid and has write scope")
        } else if err.is_rate_limited() {
            Some("rate limited by the API, retry later")
        } else if err.is_not_found() {
            Some("the zone does not exist in this account")
        } else {
            None
        }
    }
}
