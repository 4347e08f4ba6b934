//! Pretty output formatting.

use cloudfns_core::items::{Item, ITEM_KEY};
use cloudfns_core::rls::{format_rows, RlsReport, UserRow};

use crate::client::checks::ConnectivityResult;

/// Format an item for display.
pub fn format_item(item: &Item) -> String {
    let mut output = format!("Item {}", item.id());
    for (key, value) in item.attributes() {
        if key == ITEM_KEY {
            continue;
        }
        output.push_str(&format!("\n  {key}: {value}"));
    }
    output
}

/// Format a connectivity result for display.
pub fn format_connectivity(result: &ConnectivityResult) -> String {
    format!("{}\n  Status: {}", result.message, result.status)
}

/// Format an RLS report for display.
pub fn format_report(report: &RlsReport) -> String {
    let mut output = String::from("RLS DEMO\n");
    output.push_str(&"-".repeat(40));
    output.push_str(&section("Tenant 1", &report.tenant1));
    output.push_str(&section("Tenant 2", &report.tenant2));
    output.push_str(&section("All", &report.all));
    output.push_str(&format!(
        "\nRLS working: {}\nMulti-tenancy working: {}",
        yes_no(report.rls_working),
        yes_no(report.multi_tenancy_working)
    ));
    output
}

fn section(title: &str, rows: &[UserRow]) -> String {
    if rows.is_empty() {
        format!("\n{title} ({}):\n (no rows)", rows.len())
    } else {
        format!("\n{title} ({}):\n{}", rows.len(), format_rows(rows))
    }
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}
