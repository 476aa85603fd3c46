// Reported command for listing versions accepted in QA reports

use crate::commands::load_and_build;
use crate::ui;

pub fn reported(table_arg: Option<&str>, json: bool) -> anyhow::Result<()> {
    let (_, derived) = load_and_build(table_arg)?;

    if json {
        ui::data(&serde_json::to_string_pretty(&derived.reported)?);
        return Ok(());
    }

    if derived.reported.is_empty() {
        ui::warning("No active versions; every QA report would be rejected");
    }
    for version in derived.reported.iter() {
        ui::data(version);
    }
    Ok(())
}
