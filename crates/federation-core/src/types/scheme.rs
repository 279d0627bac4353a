use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::FederationError;

/// Transport scheme for outbound federation calls
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Scheme {
    /// Plain HTTP, for local peers and test setups
    Http,
    /// HTTPS
    #[default]
    Https,
}

impl Scheme {
    /// The URL scheme string
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Https => "https",
        }
    }
}

impl FromStr for Scheme {
    type Err = FederationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "http" => Ok(Self::Http),
            "https" => Ok(Self::Https),
            other => Err(FederationError::Config(format!(
                "unknown transport scheme: {other} (expected http or https)"
            ))),
        }
    }
}

impl TryFrom<String> for Scheme {
    type Error = FederationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
