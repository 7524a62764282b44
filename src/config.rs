//! Configuration types.

use std::time::Duration;

use secrecy::SecretString;

use crate::error::ConfigError;

/// Default form-relay endpoint.
pub const DEFAULT_RELAY_URL: &str = "https://api.web3forms.com/submit";

/// Default confirmation page the browser is redirected to after a
/// successful submission.
pub const DEFAULT_THANK_YOU_URL: &str = "https://bluenode.co.za/thank-you.html";

/// Service configuration.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Port for the REST adapter.
    pub port: u16,
    /// Outbound relay settings.
    pub relay: RelayConfig,
}

/// Settings for the outbound form-relay call.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Relay endpoint receiving the multipart POST.
    pub endpoint: String,
    /// Access key embedded in the relay payload.
    pub access_key: SecretString,
    /// Client-side timeout for the single submission attempt.
    pub timeout: Duration,
    /// Confirmation page URL; `name` and `package` are appended as query
    /// parameters on success.
    pub thank_you_url: String,
}

impl ServiceConfig {
    /// Build the configuration from environment variables.
    ///
    /// `ONBOARDING_ACCESS_KEY` is required; everything else has defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let port: u16 = std::env::var("ONBOARDING_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue {
                key: "ONBOARDING_PORT".to_string(),
                message: "must be a port number".to_string(),
            })?;

        let access_key = std::env::var("ONBOARDING_ACCESS_KEY").map_err(|_| {
            ConfigError::MissingRequired {
                key: "ONBOARDING_ACCESS_KEY".to_string(),
                hint: "export ONBOARDING_ACCESS_KEY=<form relay access key>".to_string(),
            }
        })?;

        let endpoint =
            std::env::var("ONBOARDING_RELAY_URL").unwrap_or_else(|_| DEFAULT_RELAY_URL.to_string());

        let thank_you_url = std::env::var("ONBOARDING_THANK_YOU_URL")
            .unwrap_or_else(|_| DEFAULT_THANK_YOU_URL.to_string());
        reqwest::Url::parse(&thank_you_url).map_err(|e| ConfigError::InvalidValue {
            key: "ONBOARDING_THANK_YOU_URL".to_string(),
            message: e.to_string(),
        })?;

        let timeout_secs: u64 = std::env::var("ONBOARDING_SUBMIT_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue {
                key: "ONBOARDING_SUBMIT_TIMEOUT_SECS".to_string(),
                message: "must be a number of seconds".to_string(),
            })?;

        Ok(Self {
            port,
            relay: RelayConfig {
                endpoint,
                access_key: SecretString::from(access_key),
                timeout: Duration::from_secs(timeout_secs),
                thank_you_url,
            },
        })
    }
}
