// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::time::Duration;

/// Errors raised while configuring a client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// A configuration value is unusable.
    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),

    /// The HTTP client could not be built.
    #[error("Failed to build HTTP client: {0}")]
    Build(#[from] reqwest::Error),
}

/// Connection settings for the ticket backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// REST base URL, e.g. `http://backend:3000/api`.
    pub base_url: String,
    /// Push channel URL, e.g. `ws://backend:3000/ws`. Push is disabled when
    /// absent.
    pub push_url: Option<String>,
    /// Per-request timeout.
    pub timeout_secs: u64,
    /// Bearer token sent with every request, if any.
    pub token: Option<String>,
    /// Fixed delay between push reconnection attempts.
    pub reconnect_delay_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::from("http://127.0.0.1:3000/api"),
            push_url: None,
            timeout_secs: 15,
            token: None,
            reconnect_delay_secs: 5,
        }
    }
}

impl ClientConfig {
    /// Checks the configuration for values the clients cannot work with.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is blank or not HTTP(S), the push URL
    /// is not WS(S), or a duration is zero.
    pub fn validate(&self) -> Result<(), ClientError> {
        let base: &str = self.base_url.trim();
        if base.is_empty() {
            return Err(ClientError::InvalidConfig(String::from(
                "Backend URL cannot be empty",
            )));
        }
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ClientError::InvalidConfig(format!(
                "Backend URL must start with http:// or https://, got '{base}'"
            )));
        }

        if let Some(push) = &self.push_url {
            if !(push.starts_with("ws://") || push.starts_with("wss://")) {
                return Err(ClientError::InvalidConfig(format!(
                    "Push URL must start with ws:// or wss://, got '{push}'"
                )));
            }
        }

        if self.timeout_secs == 0 {
            return Err(ClientError::InvalidConfig(String::from(
                "Timeout must be greater than 0",
            )));
        }
        if self.reconnect_delay_secs == 0 {
            return Err(ClientError::InvalidConfig(String::from(
                "Reconnect delay must be greater than 0",
            )));
        }

        Ok(())
    }

    /// The base URL without a trailing slash.
    #[must_use]
    pub fn normalized_base_url(&self) -> String {
        self.base_url.trim().trim_end_matches('/').to_string()
    }

    /// Per-request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Delay between push reconnection attempts.
    #[must_use]
    pub const fn reconnect_delay(&self) -> Duration {
        Duration::from_secs(self.reconnect_delay_secs)
    }
}
