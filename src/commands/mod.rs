// Command modules, one per subcommand

pub mod accepts;
pub mod check;
pub mod export;
pub mod init;
pub mod releases;
pub mod reported;

use crate::config;
use crate::releases::QaReleases;
use crate::table::ReleaseTable;
use anyhow::Context;

/// Load the release table and derive from it, failing on any configuration error.
pub fn load_and_build(table_arg: Option<&str>) -> anyhow::Result<(ReleaseTable, QaReleases)> {
    let path = config::table_path(table_arg);
    let table = ReleaseTable::load(&path).with_context(|| {
        format!(
            "Release table unusable. Fix {} or run 'qarel init'.",
            path.display()
        )
    })?;
    let derived = crate::releases::build(&table);
    Ok((table, derived))
}
