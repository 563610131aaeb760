//! Configuration for the identity module.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

fn default_issuer() -> String {
    "client-manager".to_owned()
}

fn default_token_ttl() -> Duration {
    Duration::from_secs(10 * 60 * 60)
}

/// Identity module configuration.
#[derive(Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct IdentityConfig {
    /// HMAC secret used to sign and verify issued credentials.
    pub token_secret: String,

    /// Value of the `iss` claim; credentials from other issuers are rejected.
    pub issuer: String,

    /// Lifetime of an issued credential, e.g. `"10h"` or `"30m"`.
    #[serde(with = "humantime_duration")]
    pub token_ttl: Duration,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            token_secret: String::new(),
            issuer: default_issuer(),
            token_ttl: default_token_ttl(),
        }
    }
}

impl IdentityConfig {
    /// Check the configuration before any credential is signed with it.
    ///
    /// # Errors
    /// Returns a description of the first invalid setting.
    pub fn validate(&self) -> Result<(), String> {
        if self.token_secret.trim().is_empty() {
            return Err("identity.token_secret must be set".to_owned());
        }
        if self.issuer.trim().is_empty() {
            return Err("identity.issuer must not be empty".to_owned());
        }
        if self.token_ttl.is_zero() {
            return Err("identity.token_ttl must be greater than zero".to_owned());
        }
        Ok(())
    }
}

impl fmt::Debug for IdentityConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdentityConfig")
            .field("token_secret", &"[REDACTED]")
            .field("issuer", &self.issuer)
            .field("token_ttl", &humantime::format_duration(self.token_ttl))
            .finish()
    }
}

mod humantime_duration {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&humantime::format_duration(*value).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let raw = String::deserialize(deserializer)?;
        humantime::parse_duration(&raw).map_err(serde::de::Error::custom)
    }
}
