//! Deployment environment names.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Named deployment environment selecting the `.env.<name>.local` layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvName {
    #[default]
    Development,
    Integration,
    Preproduction,
    Production,
}

impl EnvName {
    /// All environments, in promotion order.
    pub const ALL: [EnvName; 4] = [
        EnvName::Development,
        EnvName::Integration,
        EnvName::Preproduction,
        EnvName::Production,
    ];

    /// Parse a long or short name, case-insensitively.
    ///
    /// Accepts `development`/`dev`, `integration`/`int`,
    /// `preproduction`/`prep` and `production`/`prod`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Some(Self::Development),
            "integration" | "int" => Some(Self::Integration),
            "preproduction" | "prep" => Some(Self::Preproduction),
            "production" | "prod" => Some(Self::Production),
            _ => None,
        }
    }

    /// Parse, falling back to `default` when the value is not recognised.
    pub fn parse_or(value: &str, default: Self) -> Self {
        Self::parse(value).unwrap_or(default)
    }

    /// Canonical lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Integration => "integration",
            Self::Preproduction => "preproduction",
            Self::Production => "production",
        }
    }

    /// Runtime mode synthesised for `NODE_ENV` when none is configured.
    pub fn node_env(&self) -> &'static str {
        match self {
            Self::Development => "development",
            _ => "production",
        }
    }
}

impl fmt::Display for EnvName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EnvName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| {
            format!(
                "unknown environment '{}' (expected one of: development, integration, preproduction, production)",
                s
            )
        })
    }
}
