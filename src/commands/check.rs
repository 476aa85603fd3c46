// Check command for auditing the release table

use crate::check::{CheckResult, CheckStatus, Summary, check_table};
use crate::config;
use crate::constants;
use crate::table::ReleaseTable;
use crate::ui::{self, CheckMarker};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct CheckOutput {
    /// Schema version for the JSON output format.
    /// See constants::SCHEMA_VERSION for the current version.
    schema_version: u32,
    table: String,
    status: String,
    summary: Summary,
    checks: Vec<CheckResult>,
}

pub fn check(table_arg: Option<&str>, json: bool) -> anyhow::Result<i32> {
    let path = config::table_path(table_arg);
    let table_name = path.display().to_string();

    let results = match ReleaseTable::load(&path) {
        Ok(table) => {
            let mut results = vec![CheckResult {
                name: table_name.clone(),
                status: CheckStatus::Ok,
                message: format!("Parses correctly ({} version(s))", table.versions.len()),
            }];
            results.extend(check_table(&table));
            results
        }
        Err(e) => vec![CheckResult {
            name: table_name.clone(),
            status: CheckStatus::Error,
            message: e.to_string(),
        }],
    };

    let summary = Summary::of(&results);

    if json {
        let output = CheckOutput {
            schema_version: constants::SCHEMA_VERSION,
            table: table_name,
            status: summary.status().to_string(),
            summary,
            checks: results,
        };
        ui::data(&serde_json::to_string_pretty(&output)?);
    } else {
        ui::header("Release table:");
        for result in &results {
            let marker = match result.status {
                CheckStatus::Ok => CheckMarker::Ok,
                CheckStatus::Warning => CheckMarker::Warning,
                CheckStatus::Error => CheckMarker::Error,
            };
            ui::check_line(marker, &result.name, &result.message);
        }

        ui::header("\nSummary:");
        ui::dim(&format!("  {} check(s) passed", summary.ok));
        if summary.warnings > 0 {
            ui::dim(&format!("  {} warning(s)", summary.warnings));
        }
        if summary.errors > 0 {
            ui::dim(&format!("  {} error(s)", summary.errors));
        }
    }

    Ok(summary.exit_code())
}
