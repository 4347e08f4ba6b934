use cloudfns_core::rls::SecretError;
use thiserror::Error;

/// Errors raised while running the RLS demo.
#[derive(Debug, Error)]
pub enum RlsError {
    #[error("{0} is not configured")]
    MissingConfig(&'static str),

    #[error(transparent)]
    Secret(#[from] SecretError),

    #[error("Failed to {step}: {source}")]
    Database {
        step: &'static str,
        #[source]
        source: sqlx::Error,
    },
}

impl RlsError {
    pub(crate) fn database(step: &'static str) -> impl FnOnce(sqlx::Error) -> Self {
        move |source| Self::Database { step, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_config_display() {
        assert_eq!(
            RlsError::MissingConfig("DB_HOST").to_string(),
            "DB_HOST is not configured"
        );
    }

    #[test]
    fn test_secret_error_is_transparent() {
        let err = RlsError::from(SecretError::NotFound);
        assert_eq!(err.to_string(), "Secret not found");
    }

    #[test]
    fn test_database_error_names_step() {
        let err = RlsError::database("set up RLS")(sqlx::Error::PoolTimedOut);
        assert!(err.to_string().starts_with("Failed to set up RLS: "));
    }
}
