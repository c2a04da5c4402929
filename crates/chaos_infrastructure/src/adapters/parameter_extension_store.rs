//! Parameter store adapter for a local parameters extension
//!
//! Fetches parameter documents over HTTP from a sidecar that fronts the
//! managed parameter service:
//!
//! ```text
//! GET {endpoint}/systemsmanager/parameters/get?name={name}
//! X-Aws-Parameters-Secrets-Token: {token}
//!
//! 200 {"Parameter": {"Name": "...", "Value": "{...record json...}"}}
//! ```

use std::time::Duration;

use async_trait::async_trait;
use chaos_application::{ApplicationError, ConfigStorePort};
use chaos_domain::ConfigurationRecord;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::config::ExtensionConfig;

/// Header carrying the session token expected by the extension
pub const PARAMETERS_TOKEN_HEADER: &str = "X-Aws-Parameters-Secrets-Token";

const GET_PARAMETER_PATH: &str = "/systemsmanager/parameters/get";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct GetParameterResponse {
    parameter: ParameterPayload,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ParameterPayload {
    value: String,
}

/// HTTP client for the parameters extension
#[derive(Debug, Clone)]
pub struct ParameterExtensionStore {
    client: Client,
    endpoint: String,
    token: Option<String>,
}

impl ParameterExtensionStore {
    /// Create a store talking to `endpoint`
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(
        endpoint: impl Into<String>,
        timeout: Duration,
        token: Option<String>,
    ) -> Result<Self, ApplicationError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApplicationError::Store(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            token,
        })
    }

    /// Create from loaded configuration, reading the token from the
    /// environment variable named by `token_env`
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn from_config(config: &ExtensionConfig) -> Result<Self, ApplicationError> {
        let token = std::env::var(&config.token_env).ok();
        if token.is_none() {
            debug!(token_env = %config.token_env, "No extension token in environment");
        }
        Self::new(
            config.endpoint.clone(),
            Duration::from_millis(config.timeout_ms),
            token,
        )
    }

    /// Base URL of the extension
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn parameter_url(&self) -> String {
        format!("{}{GET_PARAMETER_PATH}", self.endpoint)
    }
}

#[async_trait]
impl ConfigStorePort for ParameterExtensionStore {
    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    async fn fetch(&self, name: &str) -> Result<ConfigurationRecord, ApplicationError> {
        let mut request = self.client.get(self.parameter_url()).query(&[("name", name)]);
        if let Some(token) = &self.token {
            request = request.header(PARAMETERS_TOKEN_HEADER, token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ApplicationError::Store(format!("Parameter request failed: {e}")))?;

        let status = response.status();
        if status == StatusCode::OK {
            let body: GetParameterResponse = response.json().await.map_err(|e| {
                ApplicationError::Store(format!("Invalid parameter response: {e}"))
            })?;
            debug!("Retrieved parameter from extension");
            return ConfigurationRecord::parse(&body.parameter.value)
                .map_err(|e| ApplicationError::invalid_record(name, e.to_string()));
        }

        let body = response.text().await.unwrap_or_default();
        if status == StatusCode::NOT_FOUND
            || (status == StatusCode::BAD_REQUEST && body.contains("ParameterNotFound"))
        {
            warn!(parameter = %name, "Parameter not found");
            return Err(ApplicationError::ParameterNotFound(name.to_string()));
        }

        Err(ApplicationError::Store(format!(
            "Parameter extension returned {status}: {body}"
        )))
    }

    async fn is_healthy(&self) -> bool {
        // Any HTTP answer means the extension is listening
        self.client.get(&self.endpoint).send().await.is_ok()
    }
}
