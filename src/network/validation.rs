use serde::Deserialize;
use thiserror::Error;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::core::{Result, ValidatorConfig};

/// Body returned by the validation endpoint
#[derive(Debug, Deserialize)]
struct ValidationReply {
    result: String,
}

/// Ways a validation exchange can fail
#[derive(Error, Debug)]
enum ValidationFailure {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected status {0}")]
    Status(reqwest::StatusCode),

    #[error("malformed body: {0}")]
    Body(#[from] serde_json::Error),

    #[error("no answer within {0:?}")]
    Timeout(std::time::Duration),
}

/// Checks tokens against the vendor's validation endpoint
#[derive(Debug, Clone)]
pub struct TokenValidator {
    client: reqwest::Client,
    config: ValidatorConfig,
}

impl TokenValidator {
    /// Creates a validator for the given endpoint configuration
    pub fn new(config: ValidatorConfig) -> Result<Self> {
        config.validate()?;
        let client = reqwest::Client::builder()
            .connect_timeout(config.timeout)
            .build()
            .map_err(|e| crate::core::Error::config(format!("failed to build HTTP client: {e}")))?;
        Ok(TokenValidator { client, config })
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Returns true only when the endpoint positively confirms the token
    ///
    /// Transport errors, timeouts, unexpected statuses and malformed bodies
    /// all count as an invalid token.
    pub async fn validate(&self, username: &str, token: &str) -> bool {
        let outcome = match timeout(self.config.timeout, self.exchange(username, token)).await {
            Ok(outcome) => outcome,
            Err(_) => Err(ValidationFailure::Timeout(self.config.timeout)),
        };

        match outcome {
            Ok(reply) => {
                let valid = reply.result.eq_ignore_ascii_case("true");
                debug!(username, valid, "token validation answered");
                valid
            }
            Err(failure) => {
                warn!(username, endpoint = %self.config.endpoint, "token validation failed: {failure}");
                false
            }
        }
    }

    async fn exchange(
        &self,
        username: &str,
        token: &str,
    ) -> std::result::Result<ValidationReply, ValidationFailure> {
        let response = self
            .client
            .post(&self.config.endpoint)
            .form(&[("email", username), ("token", token)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ValidationFailure::Status(status));
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

/// Validates a token against the default endpoint
pub async fn validate_token(username: &str, token: &str) -> bool {
    match TokenValidator::new(ValidatorConfig::default()) {
        Ok(validator) => validator.validate(username, token).await,
        Err(e) => {
            warn!("token validation unavailable: {e}");
            false
        }
    }
}
