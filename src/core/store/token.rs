//! Token type.
//!
//! The payload returned by the CMS token endpoint. Unknown fields are kept
//! so a stored token round-trips unchanged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An OAuth success response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(rename = ".issued", default, skip_serializing_if = "Option::is_none")]
    pub issued: Option<String>,
    #[serde(rename = ".expires", default, skip_serializing_if = "Option::is_none")]
    pub expires: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Token {
    /// Create a bearer token with no metadata
    pub fn bearer(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            token_type: Some("bearer".to_string()),
            expires_in: None,
            refresh_token: None,
            client_id: None,
            username: None,
            issued: None,
            expires: None,
            extra: Map::new(),
        }
    }

    /// Expiry instant, from the `.expires` field (RFC 2822 or RFC 3339)
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.expires.as_deref()?;
        DateTime::parse_from_rfc2822(raw)
            .or_else(|_| DateTime::parse_from_rfc3339(raw))
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// Whether the token is past its expiry. Tokens without a readable
    /// expiry are treated as valid.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at().is_some_and(|at| at <= now)
    }
}
