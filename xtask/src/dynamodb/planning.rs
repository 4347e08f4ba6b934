//! Pure functions for calculating deployment plans (Functional Core).

use super::config::TableConfig;

/// Represents the current state of a table.
#[derive(Debug, Clone)]
pub struct TableState {
    pub status: TableStatus,
    /// Name of the hash key attribute, when reported.
    pub partition_key: Option<String>,
}

/// Table status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableStatus {
    Active,
    Creating,
    Updating,
    Deleting,
}

/// Planned changes for deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployPlan {
    /// Table doesn't exist, needs to be created.
    CreateTable { config: TableConfig },
    /// Table exists with a different hash key. Key schemas can't be altered.
    KeyMismatch {
        table_name: String,
        expected: String,
        found: String,
    },
    /// Table is up to date, no changes needed.
    NoChanges { table_name: String },
}

/// Plan for destroying a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DestroyPlan {
    /// Table exists and will be deleted.
    DeleteTable { table_name: String },
    /// Table doesn't exist, nothing to do.
    AlreadyGone { table_name: String },
}

/// Pure function: Calculate what changes are needed to reach desired state.
pub fn calculate_deploy_plan(current: Option<&TableState>, desired: &TableConfig) -> DeployPlan {
    match current {
        None => DeployPlan::CreateTable {
            config: desired.clone(),
        },
        Some(state) => match &state.partition_key {
            Some(found) if *found != desired.partition_key.name => DeployPlan::KeyMismatch {
                table_name: desired.table_name.clone(),
                expected: desired.partition_key.name.clone(),
                found: found.clone(),
            },
            _ => DeployPlan::NoChanges {
                table_name: desired.table_name.clone(),
            },
        },
    }
}

/// Pure function: Calculate destroy plan.
pub fn calculate_destroy_plan(current: Option<&TableState>, table_name: &str) -> DestroyPlan {
    match current {
        Some(_) => DestroyPlan::DeleteTable {
            table_name: table_name.to_string(),
        },
        None => DestroyPlan::AlreadyGone {
            table_name: table_name.to_string(),
        },
    }
}

/// Pure function: Format a deploy plan for display.
pub fn format_deploy_plan(plan: &DeployPlan) -> Vec<String> {
    match plan {
        DeployPlan::CreateTable { config } => vec![
            format!("+ Create table: {}", config.table_name),
            format!("  Partition key: {} (S)", config.partition_key.name),
            "  Billing: PAY_PER_REQUEST".to_string(),
        ],
        DeployPlan::KeyMismatch {
            table_name,
            expected,
            found,
        } => vec![
            format!("- Table '{}' is keyed on '{}'", table_name, found),
            format!("  Expected partition key: {} (S)", expected),
        ],
        DeployPlan::NoChanges { table_name } => {
            vec![format!("= Table '{}' is up to date", table_name)]
        }
    }
}

/// Pure function: Format a destroy plan for display.
pub fn format_destroy_plan(plan: &DestroyPlan) -> Vec<String> {
    match plan {
        DestroyPlan::DeleteTable { table_name } => {
            vec![format!(
                "- Delete table: {} (ALL DATA WILL BE LOST)",
                table_name
            )]
        }
        DestroyPlan::AlreadyGone { table_name } => {
            vec![format!("= Table '{}' does not exist", table_name)]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamodb::config::items_table_config;

    fn state(partition_key: Option<&str>) -> TableState {
        TableState {
            status: TableStatus::Active,
            partition_key: partition_key.map(str::to_string),
        }
    }

    #[test]
    fn test_missing_table_is_created() {
        let desired = items_table_config();
        let plan = calculate_deploy_plan(None, &desired);

        assert_eq!(plan, DeployPlan::CreateTable { config: desired });
        assert_eq!(
            format_deploy_plan(&plan),
            vec![
                "+ Create table: ItemsTable",
                "  Partition key: ItemId (S)",
                "  Billing: PAY_PER_REQUEST",
            ]
        );
    }

    #[test]
    fn test_matching_table_needs_no_changes() {
        let plan = calculate_deploy_plan(Some(&state(Some("ItemId"))), &items_table_config());
        assert_eq!(
            plan,
            DeployPlan::NoChanges {
                table_name: "ItemsTable".to_string()
            }
        );
    }

    #[test]
    fn test_unknown_key_is_treated_as_up_to_date() {
        let plan = calculate_deploy_plan(Some(&state(None)), &items_table_config());
        assert!(matches!(plan, DeployPlan::NoChanges { .. }));
    }

    #[test]
    fn test_different_key_is_reported() {
        let plan = calculate_deploy_plan(Some(&state(Some("PK"))), &items_table_config());
        assert_eq!(
            plan,
            DeployPlan::KeyMismatch {
                table_name: "ItemsTable".to_string(),
                expected: "ItemId".to_string(),
                found: "PK".to_string(),
            }
        );
    }

    #[test]
    fn test_destroy_plan() {
        assert_eq!(
            calculate_destroy_plan(Some(&state(Some("ItemId"))), "ItemsTable"),
            DestroyPlan::DeleteTable {
                table_name: "ItemsTable".to_string()
            }
        );
        let gone = calculate_destroy_plan(None, "ItemsTable");
        assert_eq!(
            format_destroy_plan(&gone),
            vec!["= Table 'ItemsTable' does not exist"]
        );
    }
}
