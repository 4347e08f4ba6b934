/// A database role bound to one tenant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TenantAccount {
    pub tenant_id: i32,
    pub role: &'static str,
    pub password: &'static str,
}

/// Roles created by the demo, one per tenant.
pub const DEMO_TENANTS: [TenantAccount; 2] = [
    TenantAccount {
        tenant_id: 1,
        role: "tenant1_user",
        password: "tenant1pass",
    },
    TenantAccount {
        tenant_id: 2,
        role: "tenant2_user",
        password: "tenant2pass",
    },
];

/// A row seeded into the `users` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleUser {
    pub tenant_id: i32,
    pub username: &'static str,
    pub email: &'static str,
}

pub const SAMPLE_USERS: [SampleUser; 4] = [
    SampleUser {
        tenant_id: 1,
        username: "user1",
        email: "user1@tenant1.com",
    },
    SampleUser {
        tenant_id: 1,
        username: "user2",
        email: "user2@tenant1.com",
    },
    SampleUser {
        tenant_id: 2,
        username: "user3",
        email: "user3@tenant2.com",
    },
    SampleUser {
        tenant_id: 2,
        username: "user4",
        email: "user4@tenant2.com",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_demo_tenant_has_sample_rows() {
        for tenant in DEMO_TENANTS {
            let rows = SAMPLE_USERS
                .iter()
                .filter(|u| u.tenant_id == tenant.tenant_id)
                .count();
            assert_eq!(rows, 2, "tenant {}", tenant.tenant_id);
        }
    }

    #[test]
    fn test_sample_emails_match_tenant() {
        for user in SAMPLE_USERS {
            let suffix = format!("@tenant{}.com", user.tenant_id);
            assert!(user.email.ends_with(&suffix));
            assert!(user.email.starts_with(user.username));
        }
    }
}
