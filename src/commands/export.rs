// Export command for printing the public API document

use crate::api::ApiDocument;
use crate::commands::load_and_build;
use crate::ui;

pub fn export(table_arg: Option<&str>) -> anyhow::Result<()> {
    let (table, derived) = load_and_build(table_arg)?;
    let document = ApiDocument::new(&table, &derived);
    ui::data(&document.to_json()?);
    Ok(())
}
