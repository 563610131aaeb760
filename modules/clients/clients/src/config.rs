use serde::{Deserialize, Serialize};

/// Clients module configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientsConfig {
    /// Random bytes in a generated access key (hex-encoded, so the key is
    /// twice as many characters).
    pub access_key_bytes: usize,
}

impl Default for ClientsConfig {
    fn default() -> Self {
        Self {
            access_key_bytes: 32,
        }
    }
}

impl ClientsConfig {
    /// # Errors
    /// Returns a description of the first invalid setting.
    pub fn validate(&self) -> Result<(), String> {
        if !(16..=512).contains(&self.access_key_bytes) {
            return Err(format!(
                "clients.access_key_bytes must be between 16 and 512, got {}",
                self.access_key_bytes
            ));
        }
        Ok(())
    }
}
