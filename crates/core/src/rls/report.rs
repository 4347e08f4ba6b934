//! Evaluation and rendering of the RLS demo results.

use serde::{Deserialize, Serialize};

/// A row of the `users` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRow {
    pub id: i32,
    pub tenant_id: i32,
    pub username: String,
    pub email: String,
}

/// What each role could see, and whether isolation held.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RlsReport {
    pub tenant1: Vec<UserRow>,
    pub tenant2: Vec<UserRow>,
    pub all: Vec<UserRow>,
    pub rls_working: bool,
    pub multi_tenancy_working: bool,
}

impl RlsReport {
    /// RLS works when each tenant sees strictly fewer rows than the
    /// administrator. Multi-tenancy works when every row a tenant sees
    /// belongs to it.
    pub fn evaluate(tenant1: Vec<UserRow>, tenant2: Vec<UserRow>, all: Vec<UserRow>) -> Self {
        let rls_working = tenant1.len() < all.len() && tenant2.len() < all.len();
        let multi_tenancy_working =
            tenant1.iter().all(|u| u.tenant_id == 1) && tenant2.iter().all(|u| u.tenant_id == 2);

        Self {
            tenant1,
            tenant2,
            all,
            rls_working,
            multi_tenancy_working,
        }
    }

    /// Renders the report as a preformatted text block.
    pub fn render(&self) -> String {
        format!(
            "<pre>\n\
             Multi-tenancy and Row-Level Security Test Results:\n\
             \n\
             Tenant 1 Data:\n\
             {}\n\
             \n\
             Tenant 2 Data:\n\
             {}\n\
             \n\
             All Data:\n\
             {}\n\
             \n\
             RLS Working: {}\n\
             Multi-tenancy Working: {}\n\
             </pre>\n",
            format_rows(&self.tenant1),
            format_rows(&self.tenant2),
            format_rows(&self.all),
            title_bool(self.rls_working),
            title_bool(self.multi_tenancy_working),
        )
    }
}

/// One line per row.
pub fn format_rows(rows: &[UserRow]) -> String {
    rows.iter()
        .map(|u| {
            format!(
                " ID: {}, Tenant ID: {}, Username: {}, Email: {}",
                u.id, u.tenant_id, u.username, u.email
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn title_bool(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: i32, tenant_id: i32) -> UserRow {
        UserRow {
            id,
            tenant_id,
            username: format!("user{id}"),
            email: format!("user{id}@tenant{tenant_id}.com"),
        }
    }

    fn seeded() -> Vec<UserRow> {
        vec![row(1, 1), row(2, 1), row(3, 2), row(4, 2)]
    }

    #[test]
    fn test_isolated_tenants_pass_both_checks() {
        let report = RlsReport::evaluate(
            vec![row(1, 1), row(2, 1)],
            vec![row(3, 2), row(4, 2)],
            seeded(),
        );
        assert!(report.rls_working);
        assert!(report.multi_tenancy_working);
    }

    #[test]
    fn test_tenant_seeing_everything_fails_rls() {
        let report = RlsReport::evaluate(seeded(), vec![row(3, 2), row(4, 2)], seeded());
        assert!(!report.rls_working);
        assert!(!report.multi_tenancy_working);
    }

    #[test]
    fn test_leaked_row_fails_multi_tenancy_only() {
        let report = RlsReport::evaluate(
            vec![row(1, 1), row(3, 2)],
            vec![row(4, 2)],
            seeded(),
        );
        assert!(report.rls_working);
        assert!(!report.multi_tenancy_working);
    }

    #[test]
    fn test_empty_tenant_sets_are_vacuously_isolated() {
        let report = RlsReport::evaluate(vec![], vec![], seeded());
        assert!(report.rls_working);
        assert!(report.multi_tenancy_working);

        let report = RlsReport::evaluate(vec![], vec![], vec![]);
        assert!(!report.rls_working);
    }

    #[test]
    fn test_format_rows() {
        assert_eq!(
            format_rows(&[row(1, 1), row(3, 2)]),
            " ID: 1, Tenant ID: 1, Username: user1, Email: user1@tenant1.com\n \
             ID: 3, Tenant ID: 2, Username: user3, Email: user3@tenant2.com"
        );
        assert_eq!(format_rows(&[]), "");
    }

    #[test]
    fn test_render_layout() {
        let report = RlsReport::evaluate(vec![row(1, 1)], vec![row(3, 2)], seeded());
        let text = report.render();

        assert!(text.starts_with("<pre>\nMulti-tenancy and Row-Level Security Test Results:\n"));
        assert!(text.contains("Tenant 1 Data:\n ID: 1, Tenant ID: 1"));
        assert!(text.contains("Tenant 2 Data:\n ID: 3, Tenant ID: 2"));
        assert!(text.contains("All Data:\n ID: 1"));
        assert!(text.contains("RLS Working: True\nMulti-tenancy Working: True\n"));
        assert!(text.ends_with("</pre>\n"));
    }
}
