use serde::Deserialize;
use thiserror::Error;

/// Errors reading the database credentials secret.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SecretError {
    #[error("Secret not found")]
    NotFound,
    #[error("Failed to retrieve secret: {0}")]
    Retrieval(String),
    #[error("Malformed secret: {0}")]
    Malformed(String),
}

/// Database credentials stored as a JSON secret string.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct DbSecret {
    pub dbname: String,
    pub username: String,
    pub password: String,
}

impl DbSecret {
    pub fn from_json(secret: &str) -> Result<Self, SecretError> {
        serde_json::from_str(secret).map_err(|e| SecretError::Malformed(e.to_string()))
    }
}

impl std::fmt::Debug for DbSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DbSecret")
            .field("dbname", &self.dbname)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_rds_style_secret() {
        let secret = DbSecret::from_json(
            r#"{"dbname":"app","username":"admin","password":"pw","engine":"postgres","port":5432}"#,
        )
        .unwrap();
        assert_eq!(secret.dbname, "app");
        assert_eq!(secret.username, "admin");
        assert_eq!(secret.password, "pw");
    }

    #[test]
    fn test_missing_field_is_malformed() {
        let err = DbSecret::from_json(r#"{"username":"admin","password":"pw"}"#).unwrap_err();
        assert!(matches!(err, SecretError::Malformed(msg) if msg.contains("dbname")));
    }

    #[test]
    fn test_debug_redacts_password() {
        let secret = DbSecret::from_json(r#"{"dbname":"app","username":"a","password":"hunter2"}"#)
            .unwrap();
        let debug = format!("{secret:?}");
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("<redacted>"));
    }
}
