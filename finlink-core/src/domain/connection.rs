//! Connection domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user's link to a financial institution.
///
/// Structure shared between every API surface that returns connection state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Connection {
    pub id: String,
    pub status: Option<ConnectionStatus>,
    #[serde(rename = "lastUsed")]
    pub last_used: Option<DateTime<Utc>>,
    pub institution: Institution,
}

/// Connection lifecycle status as reported on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConnectionStatus {
    Active,
    Pending,
    Invalid,
    #[serde(other)]
    Unknown,
}

/// Institution a connection points at. Only the id matters to this crate;
/// institution management lives elsewhere.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Institution {
    pub id: String,
}
