// Releases command for listing QA release downloads

use crate::commands::load_and_build;
use crate::releases::ReleaseRecord;
use crate::ui;
use std::collections::BTreeMap;

pub fn releases(table_arg: Option<&str>, all: bool, json: bool) -> anyhow::Result<()> {
    let (_, derived) = load_and_build(table_arg)?;

    // Disabled records are never offered as links unless explicitly requested
    let listed: BTreeMap<&String, &ReleaseRecord> = if all {
        derived.releases.iter().collect()
    } else {
        derived.releases.enabled().collect()
    };

    if json {
        ui::data(&serde_json::to_string_pretty(&listed)?);
        return Ok(());
    }

    if derived.releases.is_empty() {
        ui::dim("No active QA releases");
        return Ok(());
    }
    if listed.is_empty() {
        ui::dim("No downloadable QA releases (use --all to show disabled records)");
        return Ok(());
    }

    for (version, record) in listed {
        if !record.enabled {
            ui::warning(&format!(
                "{} ({}) disabled: no downloadable archives",
                record.version, version
            ));
            continue;
        }

        if record.date.is_empty() {
            ui::header(&record.version);
        } else {
            ui::header(&format!("{} ({})", record.version, record.date));
        }
        for (format, file) in &record.files {
            ui::action(&format!("{}: {}", format.as_str(), file.path));
            for (algorithm, value) in &file.checksums {
                ui::dim(&format!("    {}: {}", algorithm, value));
            }
        }
    }
    Ok(())
}
