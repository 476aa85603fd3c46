// Init command for writing a starter release table

use crate::config;
use crate::table::ReleaseTable;
use crate::ui;

pub fn init(table_arg: Option<&str>, version: String, force: bool) -> anyhow::Result<()> {
    let path = config::table_path(table_arg);

    // Check if a table already exists
    if path.exists() && !force {
        ui::dim(&format!(
            "Release table detected at {}. Skipping initialization.",
            path.display()
        ));
        return Ok(());
    }

    ReleaseTable::starter(&version).save(&path)?;
    ui::success(&format!(
        "Initialized {} with inactive entry {}",
        path.display(),
        version
    ));
    Ok(())
}
