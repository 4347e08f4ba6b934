//! Sequential driver for the RLS demo (Imperative Shell).
//!
//! Every step opens at most one connection, runs inside a transaction and
//! closes the connection before returning, on success or failure.

use std::sync::Arc;

use sqlx::postgres::{PgConnectOptions, PgConnection, PgRow};
use sqlx::{Connection, Row};

use cloudfns_core::rls::{sql, DbSecret, RlsReport, UserRow, DEMO_TENANTS, SAMPLE_USERS};

use super::{RlsError, SecretProvider};

/// Where the demo database lives.
#[derive(Debug, Clone, Default)]
pub struct DbTarget {
    pub host: Option<String>,
    pub port: u16,
    pub secret_name: Option<String>,
}

/// Runs the provisioning steps and tenant queries.
pub struct RlsDemo {
    secrets: Arc<dyn SecretProvider>,
    target: DbTarget,
}

impl RlsDemo {
    pub fn new(secrets: Arc<dyn SecretProvider>, target: DbTarget) -> Self {
        Self { secrets, target }
    }

    /// Provisions the demo and queries it as every tenant and as the admin.
    pub async fn run(&self) -> Result<RlsReport, RlsError> {
        tracing::info!("RLS demo started");

        let host = self
            .target
            .host
            .as_deref()
            .ok_or(RlsError::MissingConfig("DB_HOST"))?;
        let secret = self.load_secret().await?;

        let mut conn = self
            .connect(host, &secret.dbname, &secret.username, &secret.password)
            .await?;
        tracing::info!(database = %secret.dbname, host, "Connected to database");

        let provisioned = async {
            setup_rls(&mut conn).await?;
            insert_sample_data(&mut conn).await?;
            create_tenant_users(&mut conn).await
        }
        .await;
        close(conn).await;
        provisioned?;

        let [tenant1, tenant2] = DEMO_TENANTS;
        let tenant1_rows = self
            .query_as_user(
                host,
                &secret.dbname,
                Some(tenant1.tenant_id),
                tenant1.role,
                tenant1.password,
            )
            .await?;
        let tenant2_rows = self
            .query_as_user(
                host,
                &secret.dbname,
                Some(tenant2.tenant_id),
                tenant2.role,
                tenant2.password,
            )
            .await?;
        let all_rows = self
            .query_as_user(
                host,
                &secret.dbname,
                None,
                &secret.username,
                &secret.password,
            )
            .await?;

        let report = RlsReport::evaluate(tenant1_rows, tenant2_rows, all_rows);
        tracing::info!(
            rls_working = report.rls_working,
            multi_tenancy_working = report.multi_tenancy_working,
            "RLS demo finished"
        );
        Ok(report)
    }

    /// Fetches and parses the database credentials secret.
    pub async fn load_secret(&self) -> Result<DbSecret, RlsError> {
        let name = self
            .target
            .secret_name
            .as_deref()
            .ok_or(RlsError::MissingConfig("DB_SECRET_NAME"))?;

        let raw = self.secrets.secret_string(name).await?;
        Ok(DbSecret::from_json(&raw)?)
    }

    async fn connect(
        &self,
        host: &str,
        database: &str,
        user: &str,
        password: &str,
    ) -> Result<PgConnection, RlsError> {
        let options = PgConnectOptions::new()
            .host(host)
            .port(self.target.port)
            .database(database)
            .username(user)
            .password(password);

        PgConnection::connect_with(&options)
            .await
            .map_err(|e| {
                tracing::error!(
                    host,
                    database,
                    user,
                    error = %e,
                    "Failed to connect to database"
                );
                RlsError::database("connect to database")(e)
            })
    }

    /// Reads the `users` table as `user` with the tenant setting applied.
    ///
    /// The setting is transaction-local, so it and the select share one
    /// transaction.
    async fn query_as_user(
        &self,
        host: &str,
        database: &str,
        tenant_id: Option<i32>,
        user: &str,
        password: &str,
    ) -> Result<Vec<UserRow>, RlsError> {
        tracing::info!(?tenant_id, user, "Querying data");

        let mut conn = self
            .connect(host, database, user, password)
            .await
            .inspect_err(|e| {
                tracing::error!(?tenant_id, user, error = %e, "Failed to query data");
            })?;
        let result = async {
            let mut tx = conn.begin().await?;
            sqlx::query(sql::SET_TENANT)
                .bind(sql::tenant_setting_value(tenant_id))
                .execute(&mut *tx)
                .await?;
            let rows = sqlx::query(sql::SELECT_USERS).fetch_all(&mut *tx).await?;
            tx.commit().await?;
            rows.iter().map(row_to_user).collect::<Result<Vec<_>, _>>()
        }
        .await;
        close(conn).await;

        match result {
            Ok(rows) => {
                tracing::info!(?tenant_id, user, rows = rows.len(), "Data queried successfully");
                Ok(rows)
            }
            Err(e) => {
                tracing::error!(?tenant_id, user, error = %e, "Failed to query data");
                Err(RlsError::Database {
                    step: "query data",
                    source: e,
                })
            }
        }
    }
}

async fn setup_rls(conn: &mut PgConnection) -> Result<(), RlsError> {
    tracing::info!("Setting up RLS...");

    let result = async {
        let mut tx = conn.begin().await?;
        for statement in sql::SETUP_STATEMENTS {
            sqlx::query(statement).execute(&mut *tx).await?;
        }
        tx.commit().await
    }
    .await;

    finish_step(result, "set up RLS", "RLS setup completed successfully.")
}

async fn insert_sample_data(conn: &mut PgConnection) -> Result<(), RlsError> {
    tracing::info!("Inserting sample data...");

    let result = async {
        let mut tx = conn.begin().await?;
        sqlx::query(sql::TRUNCATE_USERS).execute(&mut *tx).await?;
        for user in SAMPLE_USERS {
            sqlx::query(sql::INSERT_USER)
                .bind(user.tenant_id)
                .bind(user.username)
                .bind(user.email)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await
    }
    .await;

    finish_step(result, "insert sample data", "Sample data inserted successfully.")
}

async fn create_tenant_users(conn: &mut PgConnection) -> Result<(), RlsError> {
    tracing::info!("Creating tenant users...");

    let result = async {
        let mut tx = conn.begin().await?;
        for account in DEMO_TENANTS {
            let exists = sqlx::query(sql::ROLE_EXISTS)
                .bind(account.role)
                .fetch_optional(&mut *tx)
                .await?
                .is_some();

            if exists {
                tracing::info!(role = account.role, "User already exists");
            } else {
                let statement = sql::create_role(&account);
                sqlx::query(&statement).execute(&mut *tx).await?;
            }
        }
        for account in DEMO_TENANTS {
            let statement = sql::grant_select(&account);
            sqlx::query(&statement).execute(&mut *tx).await?;
        }
        tx.commit().await
    }
    .await;

    finish_step(result, "create tenant users", "Tenant users created successfully.")
}

fn finish_step(
    result: Result<(), sqlx::Error>,
    step: &'static str,
    success: &'static str,
) -> Result<(), RlsError> {
    match result {
        Ok(()) => {
            tracing::info!("{success}");
            Ok(())
        }
        Err(e) => {
            tracing::error!(step, error = %e, "Provisioning step failed");
            Err(RlsError::database(step)(e))
        }
    }
}

fn row_to_user(row: &PgRow) -> Result<UserRow, sqlx::Error> {
    Ok(UserRow {
        id: row.try_get("id")?,
        tenant_id: row.try_get("tenant_id")?,
        username: row.try_get("username")?,
        email: row.try_get("email")?,
    })
}

async fn close(conn: PgConnection) {
    match conn.close().await {
        Ok(()) => tracing::debug!("Database connection closed."),
        Err(e) => tracing::warn!(error = %e, "Failed to close database connection"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use cloudfns_core::rls::SecretError;

    struct StaticSecret(Result<String, SecretError>);

    #[async_trait]
    impl SecretProvider for StaticSecret {
        async fn secret_string(&self, _name: &str) -> Result<String, SecretError> {
            self.0.clone()
        }
    }

    fn demo(secret: Result<String, SecretError>, host: Option<&str>) -> RlsDemo {
        RlsDemo::new(
            Arc::new(StaticSecret(secret)),
            DbTarget {
                host: host.map(str::to_string),
                port: 5432,
                secret_name: Some("demo/db".to_string()),
            },
        )
    }

    fn closed_port() -> u16 {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    }

    fn unreachable_demo() -> RlsDemo {
        RlsDemo::new(
            Arc::new(StaticSecret(Ok(
                r#"{"dbname":"app","username":"admin","password":"pw"}"#.to_string(),
            ))),
            DbTarget {
                host: Some("127.0.0.1".to_string()),
                port: closed_port(),
                secret_name: Some("demo/db".to_string()),
            },
        )
    }

    #[tokio::test]
    async fn test_run_reports_admin_connect_failure() {
        let err = unreachable_demo().run().await.unwrap_err();
        assert!(matches!(
            err,
            RlsError::Database {
                step: "connect to database",
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_query_as_user_reports_connect_failure() {
        let err = unreachable_demo()
            .query_as_user("127.0.0.1", "app", Some(1), "tenant1_user", "tenant1pass")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RlsError::Database {
                step: "connect to database",
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_load_secret_parses_credentials() {
        let demo = demo(
            Ok(r#"{"dbname":"app","username":"admin","password":"pw"}"#.to_string()),
            Some("db.local"),
        );

        let secret = demo.load_secret().await.unwrap();
        assert_eq!(secret.dbname, "app");
        assert_eq!(secret.username, "admin");
    }

    #[tokio::test]
    async fn test_load_secret_requires_secret_name() {
        let demo = RlsDemo::new(
            Arc::new(StaticSecret(Ok("{}".to_string()))),
            DbTarget::default(),
        );

        let err = demo.load_secret().await.unwrap_err();
        assert!(matches!(err, RlsError::MissingConfig("DB_SECRET_NAME")));
    }

    #[tokio::test]
    async fn test_run_requires_host() {
        let demo = demo(Ok("{}".to_string()), None);

        let err = demo.run().await.unwrap_err();
        assert_eq!(err.to_string(), "DB_HOST is not configured");
    }

    #[tokio::test]
    async fn test_run_surfaces_secret_errors() {
        let demo = demo(Err(SecretError::NotFound), Some("db.local"));

        let err = demo.run().await.unwrap_err();
        assert_eq!(err.to_string(), "Secret not found");
    }

    #[tokio::test]
    async fn test_run_rejects_malformed_secret() {
        let demo = demo(Ok("not json".to_string()), Some("db.local"));

        let err = demo.run().await.unwrap_err();
        assert!(matches!(err, RlsError::Secret(SecretError::Malformed(_))));
    }
}
