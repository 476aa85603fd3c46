// Check module for auditing a release table

use crate::checksum::{self, ChecksumAlgorithm};
use crate::releases::{self, ArchiveFormat, QaReleases, ReleaseTableBuilder};
use crate::table::{ReleaseTable, VersionEntry};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Ok,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
}

impl CheckResult {
    fn new(name: &str, status: CheckStatus, message: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            status,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub ok: usize,
    pub warnings: usize,
    pub errors: usize,
}

impl Summary {
    pub fn of(results: &[CheckResult]) -> Self {
        let mut summary = Summary::default();
        for result in results {
            match result.status {
                CheckStatus::Ok => summary.ok += 1,
                CheckStatus::Warning => summary.warnings += 1,
                CheckStatus::Error => summary.errors += 1,
            }
        }
        summary
    }

    pub fn status(&self) -> &'static str {
        if self.errors > 0 {
            "failure"
        } else if self.warnings > 0 {
            "drift"
        } else {
            "healthy"
        }
    }

    // 0 = healthy, 1 = warnings only, 2 = errors present
    pub fn exit_code(&self) -> i32 {
        if self.errors > 0 {
            2
        } else if self.warnings > 0 {
            1
        } else {
            0
        }
    }
}

/// Audit table settings and every version entry.
pub fn check_table(table: &ReleaseTable) -> Vec<CheckResult> {
    let builder = ReleaseTableBuilder::for_table(table);
    let derived = builder.build(&table.versions);

    let mut results = check_settings(table);
    for (version, entry) in &table.versions {
        results.extend(check_version(&builder, &derived, version, entry));
    }
    results
}

fn check_settings(table: &ReleaseTable) -> Vec<CheckResult> {
    let mut results = Vec::new();
    let settings = &table.settings;

    if settings.product.trim().is_empty() {
        results.push(CheckResult::new(
            "settings",
            CheckStatus::Warning,
            "Empty product prefix; archive names will start with '-'",
        ));
    }

    if settings.checksum_algorithms.is_empty() {
        results.push(CheckResult::new(
            "settings",
            CheckStatus::Warning,
            "No checksum algorithms configured; no release can be enabled",
        ));
    }

    for algorithm in &settings.checksum_algorithms {
        if ChecksumAlgorithm::from_name(algorithm).is_none() {
            results.push(CheckResult::new(
                "settings",
                CheckStatus::Warning,
                format!("Checksum algorithm '{}' is unknown; values are not validated", algorithm),
            ));
        }
    }

    for format in &settings.archive_formats {
        if ArchiveFormat::from_name(format).is_none() {
            results.push(CheckResult::new(
                "settings",
                CheckStatus::Warning,
                format!("Archive format '{}' is not supported and is ignored", format),
            ));
        }
    }

    if results.is_empty() {
        results.push(CheckResult::new(
            "settings",
            CheckStatus::Ok,
            format!(
                "Product '{}', checksums: {}",
                settings.product,
                settings.checksum_algorithms.join(", ")
            ),
        ));
    }

    results
}

fn check_version(
    builder: &ReleaseTableBuilder,
    derived: &QaReleases,
    version: &str,
    entry: &VersionEntry,
) -> Vec<CheckResult> {
    let name = format!("version:{}", version);

    if !entry.active {
        return vec![CheckResult::new(&name, CheckStatus::Ok, "Inactive, skipped")];
    }

    let mut results = check_checksums(builder, &name, entry);
    let release = &entry.release;

    if release.number == 0 {
        if results.is_empty() {
            results.push(CheckResult::new(
                &name,
                CheckStatus::Ok,
                format!(
                    "Active, development builds only ({})",
                    releases::dev_version(version)
                ),
            ));
        }
        return results;
    }

    let full_version = releases::full_version(version, entry);

    if release.baseurl.is_empty() {
        results.push(CheckResult::new(
            &name,
            CheckStatus::Warning,
            format!("{} has no base URL and is not downloadable", full_version),
        ));
        return results;
    }

    if !release.baseurl.ends_with('/') {
        results.push(CheckResult::new(
            &name,
            CheckStatus::Warning,
            format!("Base URL '{}' does not end with '/'", release.baseurl),
        ));
    }

    let Some(record) = derived.releases.get(version) else {
        return results;
    };

    if !record.enabled {
        results.push(CheckResult::new(
            &name,
            CheckStatus::Warning,
            format!("{} has no checksums; download links are disabled", full_version),
        ));
        return results;
    }

    for format in builder.configured_formats() {
        for algorithm in builder.configured_algorithms() {
            if release.checksum(algorithm, format.as_str()).is_none() {
                results.push(CheckResult::new(
                    &name,
                    CheckStatus::Warning,
                    format!("Missing {} checksum for .tar.{}", algorithm, format.as_str()),
                ));
            }
        }
    }

    if results.is_empty() {
        let formats: Vec<&str> = record.files.keys().map(ArchiveFormat::as_str).collect();
        results.push(CheckResult::new(
            &name,
            CheckStatus::Ok,
            format!("{} downloadable as {}", full_version, formats.join(", ")),
        ));
    }

    results
}

fn check_checksums(
    builder: &ReleaseTableBuilder,
    name: &str,
    entry: &VersionEntry,
) -> Vec<CheckResult> {
    let mut results = Vec::new();

    for (algorithm, by_format) in &entry.release.checksums {
        if !builder.configured_algorithms().contains(algorithm) {
            results.push(CheckResult::new(
                name,
                CheckStatus::Warning,
                format!("Checksums under unconfigured algorithm '{}' are ignored", algorithm),
            ));
            continue;
        }

        for (format, value) in by_format {
            if ArchiveFormat::from_name(format).is_none() {
                results.push(CheckResult::new(
                    name,
                    CheckStatus::Warning,
                    format!("Unknown archive format '{}' is ignored", format),
                ));
                continue;
            }

            let Some(known) = ChecksumAlgorithm::from_name(algorithm) else {
                continue;
            };
            if value.trim().is_empty() {
                continue;
            }
            if let Err(e) = checksum::validate_format(value, known) {
                results.push(CheckResult::new(
                    name,
                    CheckStatus::Error,
                    format!("Invalid {} checksum for .tar.{}: {}", algorithm, format, e),
                ));
            }
        }
    }

    results
}
