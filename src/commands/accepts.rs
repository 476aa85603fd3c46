// Accepts command for gating inbound QA reports by version

use crate::commands::load_and_build;
use crate::ui;
use log::debug;

// Exit codes: 0 = accepted, 1 = rejected, 2 = release table unusable
pub fn accepts(table_arg: Option<&str>, version: &str) -> anyhow::Result<i32> {
    let derived = match load_and_build(table_arg) {
        Ok((_, derived)) => derived,
        Err(e) => {
            ui::error(&format!("{:#}", e));
            return Ok(2);
        }
    };

    if derived.reported.accepts(version) {
        ui::success(&format!("{} is accepted", version.trim()));
        Ok(0)
    } else {
        debug!(
            "{} not among {} reported version(s)",
            version.trim(),
            derived.reported.len()
        );
        ui::error(&format!("{} is not accepted", version.trim()));
        Ok(1)
    }
}
