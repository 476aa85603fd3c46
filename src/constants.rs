// Constants module for shared string constants

pub const TABLE_FILE: &str = "qa-releases.toml";
pub const DEFAULT_PRODUCT: &str = "php";
pub const DEFAULT_CHECKSUM_ALGORITHM: &str = "sha256";
pub const DEFAULT_ARCHIVE_FORMATS: [&str; 3] = ["bz2", "gz", "xz"];

/// Key holding the download URL beside per-algorithm checksums in a resolved archive.
/// No checksum algorithm may use this name.
pub const ARCHIVE_PATH_KEY: &str = "path";

/// Suffix appended to every active version to form its development build identifier.
pub const DEV_SUFFIX: &str = "-dev";

/// Schema version for the check --json output format.
/// Increment only on breaking changes to ensure future integrations can safely evolve.
pub const SCHEMA_VERSION: u32 = 1;
