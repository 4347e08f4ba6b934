//! SQL text for the row-level security demo.
//!
//! Statements are kept one per constant because prepared statements cannot
//! carry more than one command.

use super::TenantAccount;

pub const CREATE_USERS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        id SERIAL PRIMARY KEY,
        tenant_id INTEGER,
        username TEXT,
        email TEXT
    )
"#;

pub const ENABLE_RLS: &str = "ALTER TABLE users ENABLE ROW LEVEL SECURITY";

pub const CREATE_TENANT_FUNCTION: &str = r#"
    CREATE OR REPLACE FUNCTION get_current_tenant_id() RETURNS INTEGER AS $$
    BEGIN
        RETURN NULLIF(current_setting('app.current_tenant_id', TRUE), '')::INTEGER;
    END;
    $$ LANGUAGE plpgsql
"#;

pub const DROP_POLICY: &str = "DROP POLICY IF EXISTS tenant_isolation_policy ON users";

pub const CREATE_POLICY: &str = r#"
    CREATE POLICY tenant_isolation_policy ON users
    USING (tenant_id = get_current_tenant_id())
"#;

/// Statements run in order by the setup step.
pub const SETUP_STATEMENTS: [&str; 5] = [
    CREATE_USERS_TABLE,
    ENABLE_RLS,
    CREATE_TENANT_FUNCTION,
    DROP_POLICY,
    CREATE_POLICY,
];

pub const TRUNCATE_USERS: &str = "TRUNCATE TABLE users RESTART IDENTITY";

pub const INSERT_USER: &str = "INSERT INTO users (tenant_id, username, email) VALUES ($1, $2, $3)";

pub const ROLE_EXISTS: &str = "SELECT 1 FROM pg_roles WHERE rolname = $1";

/// Transaction-local: only lasts until the surrounding transaction ends.
pub const SET_TENANT: &str = "SELECT set_config('app.current_tenant_id', $1, TRUE)";

pub const SELECT_USERS: &str = "SELECT id, tenant_id, username, email FROM users ORDER BY id";

/// Quotes an SQL identifier, doubling embedded quotes.
pub fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// Quotes an SQL string literal, doubling embedded single quotes.
pub fn quote_literal(literal: &str) -> String {
    format!("'{}'", literal.replace('\'', "''"))
}

/// `CREATE USER` takes no bind parameters, so the statement is built here.
pub fn create_role(account: &TenantAccount) -> String {
    format!(
        "CREATE USER {} WITH PASSWORD {}",
        quote_ident(account.role),
        quote_literal(account.password)
    )
}

pub fn grant_select(account: &TenantAccount) -> String {
    format!("GRANT SELECT ON users TO {}", quote_ident(account.role))
}

/// Value for [`SET_TENANT`]. No tenant maps to the empty string, which the
/// policy function turns into NULL.
pub fn tenant_setting_value(tenant_id: Option<i32>) -> String {
    tenant_id.map(|id| id.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_ident_escapes_quotes() {
        assert_eq!(quote_ident("tenant1_user"), "\"tenant1_user\"");
        assert_eq!(quote_ident("we\"ird"), "\"we\"\"ird\"");
    }

    #[test]
    fn test_quote_literal_escapes_quotes() {
        assert_eq!(quote_literal("tenant1pass"), "'tenant1pass'");
        assert_eq!(quote_literal("it's"), "'it''s'");
    }

    #[test]
    fn test_create_role_statement() {
        let account = TenantAccount {
            tenant_id: 1,
            role: "tenant1_user",
            password: "tenant1pass",
        };
        assert_eq!(
            create_role(&account),
            "CREATE USER \"tenant1_user\" WITH PASSWORD 'tenant1pass'"
        );
        assert_eq!(
            grant_select(&account),
            "GRANT SELECT ON users TO \"tenant1_user\""
        );
    }

    #[test]
    fn test_tenant_setting_value() {
        assert_eq!(tenant_setting_value(Some(2)), "2");
        assert_eq!(tenant_setting_value(None), "");
    }

    #[test]
    fn test_setup_statements_are_single_commands() {
        for statement in SETUP_STATEMENTS {
            assert!(!statement.trim().is_empty());
            // The plpgsql body is the only place a semicolon may appear.
            if !statement.contains("$$") {
                assert!(!statement.contains(';'), "multi-command: {statement}");
            }
        }
    }

    #[test]
    fn test_policy_and_session_use_same_setting() {
        let setting = "'app.current_tenant_id'";
        assert!(CREATE_TENANT_FUNCTION.contains(setting));
        assert!(SET_TENANT.contains(setting));
    }
}
