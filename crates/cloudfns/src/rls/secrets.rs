//! Database credentials lookup.

use async_trait::async_trait;
use aws_sdk_secretsmanager::error::DisplayErrorContext;
use cloudfns_core::rls::SecretError;

/// Source of secret strings by name.
#[async_trait]
pub trait SecretProvider: Send + Sync {
    /// Returns the secret's string value.
    async fn secret_string(&self, name: &str) -> Result<String, SecretError>;
}

/// AWS Secrets Manager backed provider.
pub struct SecretsManagerProvider {
    client: aws_sdk_secretsmanager::Client,
}

impl SecretsManagerProvider {
    pub fn new(sdk_config: &aws_config::SdkConfig) -> Self {
        Self {
            client: aws_sdk_secretsmanager::Client::new(sdk_config),
        }
    }
}

#[async_trait]
impl SecretProvider for SecretsManagerProvider {
    async fn secret_string(&self, name: &str) -> Result<String, SecretError> {
        let response = self
            .client
            .get_secret_value()
            .secret_id(name)
            .send()
            .await
            .map_err(|e| {
                let err = SecretError::Retrieval(DisplayErrorContext(&e).to_string());
                tracing::error!(secret = name, error = %err, "Failed to retrieve secret");
                err
            })?;

        // Binary secrets carry no SecretString.
        response
            .secret_string()
            .map(str::to_string)
            .ok_or(SecretError::NotFound)
    }
}
