// Releases module for deriving report identifiers and download records

use crate::constants;
use crate::table::{ReleaseTable, VersionEntry};
use log::{debug, info};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Archive formats the hosted tarballs are published in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ArchiveFormat {
    Bz2,
    Gz,
    Xz,
}

impl ArchiveFormat {
    pub const ALL: [ArchiveFormat; 3] = [ArchiveFormat::Bz2, ArchiveFormat::Gz, ArchiveFormat::Xz];

    pub fn as_str(&self) -> &'static str {
        match self {
            ArchiveFormat::Bz2 => "bz2",
            ArchiveFormat::Gz => "gz",
            ArchiveFormat::Xz => "xz",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|format| format.as_str() == name)
    }
}

/// Version identifiers accepted in incoming QA report submissions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ReportSet(BTreeSet<String>);

impl ReportSet {
    /// Whether a report carrying `version` should be accepted.
    pub fn accepts(&self, version: &str) -> bool {
        self.0.contains(version.trim())
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn insert(&mut self, version: String) {
        self.0.insert(version);
    }
}

/// One downloadable archive: checksums keyed by algorithm plus its URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArchiveFile {
    #[serde(flatten)]
    pub checksums: BTreeMap<String, String>,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleaseRecord {
    /// Full version string, e.g. "8.1.8RC1"
    pub version: String,
    #[serde(rename = "type")]
    pub release_type: String,
    pub number: u32,
    pub date: String,
    pub baseurl: String,
    pub files: BTreeMap<ArchiveFormat, ArchiveFile>,
    /// False when no archive resolved; such records must never be linked
    pub enabled: bool,
}

/// Release records keyed by version, for active entries with a pre-release build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ReleasesIndex(BTreeMap<String, ReleaseRecord>);

impl ReleasesIndex {
    pub fn get(&self, version: &str) -> Option<&ReleaseRecord> {
        self.0.get(version)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ReleaseRecord)> {
        self.0.iter()
    }

    /// Records that may be offered as download links
    pub fn enabled(&self) -> impl Iterator<Item = (&String, &ReleaseRecord)> {
        self.0.iter().filter(|(_, record)| record.enabled)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Everything derived from a release table, held apart from the input's
/// version keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QaReleases {
    pub reported: ReportSet,
    pub releases: ReleasesIndex,
}

#[derive(Debug, Clone)]
pub struct ReleaseTableBuilder {
    product: String,
    algorithms: Vec<String>,
    formats: Vec<ArchiveFormat>,
}

impl Default for ReleaseTableBuilder {
    fn default() -> Self {
        Self {
            product: constants::DEFAULT_PRODUCT.to_string(),
            algorithms: vec![constants::DEFAULT_CHECKSUM_ALGORITHM.to_string()],
            formats: ArchiveFormat::ALL.to_vec(),
        }
    }
}

impl ReleaseTableBuilder {
    /// Builder configured from the table's own settings.
    pub fn for_table(table: &ReleaseTable) -> Self {
        Self::default()
            .product(&table.settings.product)
            .algorithms(table.settings.checksum_algorithms.iter().map(String::as_str))
            .formats(
                table
                    .settings
                    .archive_formats
                    .iter()
                    .filter_map(|name| ArchiveFormat::from_name(name)),
            )
    }

    pub fn product(mut self, product: &str) -> Self {
        self.product = product.to_string();
        self
    }

    /// Checksum algorithms to read; duplicates are dropped, first occurrence wins.
    /// The reserved `path` key is never read as an algorithm.
    pub fn algorithms<'a>(mut self, algorithms: impl IntoIterator<Item = &'a str>) -> Self {
        self.algorithms.clear();
        for algorithm in algorithms {
            if algorithm == constants::ARCHIVE_PATH_KEY {
                debug!("Ignoring reserved checksum algorithm name '{}'", algorithm);
                continue;
            }
            if !self.algorithms.iter().any(|known| known == algorithm) {
                self.algorithms.push(algorithm.to_string());
            }
        }
        self
    }

    pub fn formats(mut self, formats: impl IntoIterator<Item = ArchiveFormat>) -> Self {
        self.formats.clear();
        for format in formats {
            if !self.formats.contains(&format) {
                self.formats.push(format);
            }
        }
        self
    }

    pub fn configured_algorithms(&self) -> &[String] {
        &self.algorithms
    }

    pub fn configured_formats(&self) -> &[ArchiveFormat] {
        &self.formats
    }

    /// Derive the report set and releases index. Pure: the table is only read.
    pub fn build(&self, versions: &BTreeMap<String, VersionEntry>) -> QaReleases {
        let mut derived = QaReleases::default();

        for (version, entry) in versions {
            if !entry.active {
                debug!("Skipping inactive version {}", version);
                continue;
            }

            derived.reported.insert(dev_version(version));

            let release = &entry.release;
            if release.number == 0 {
                debug!("{} has no pre-release build yet", version);
                continue;
            }

            let full_version = full_version(version, entry);
            derived.reported.insert(full_version.clone());

            let files = if release.baseurl.is_empty() {
                debug!("{} has no base URL, not downloadable", version);
                BTreeMap::new()
            } else {
                self.resolve_files(&full_version, entry)
            };

            let enabled = !files.is_empty();
            if !enabled {
                debug!("{} resolved no archives, record disabled", full_version);
            }

            derived.releases.0.insert(
                version.clone(),
                ReleaseRecord {
                    version: full_version,
                    release_type: release.release_type.clone(),
                    number: release.number,
                    date: release.date.clone(),
                    baseurl: release.baseurl.clone(),
                    files,
                    enabled,
                },
            );
        }

        info!(
            "Derived {} reported version(s) and {} release(s) ({} enabled)",
            derived.reported.len(),
            derived.releases.len(),
            derived.releases.enabled().count()
        );

        derived
    }

    fn resolve_files(
        &self,
        full_version: &str,
        entry: &VersionEntry,
    ) -> BTreeMap<ArchiveFormat, ArchiveFile> {
        let release = &entry.release;
        let filename_base = format!("{}-{}", self.product, full_version);
        let mut files = BTreeMap::new();

        for format in &self.formats {
            let checksums: BTreeMap<String, String> = self
                .algorithms
                .iter()
                .filter_map(|algorithm| {
                    release
                        .checksum(algorithm, format.as_str())
                        .map(|value| (algorithm.clone(), value.to_string()))
                })
                .collect();

            if checksums.is_empty() {
                continue;
            }

            files.insert(
                *format,
                ArchiveFile {
                    checksums,
                    path: format!("{}{}.tar.{}", release.baseurl, filename_base, format.as_str()),
                },
            );
        }

        files
    }
}

/// Derive everything using the table's own settings.
pub fn build(table: &ReleaseTable) -> QaReleases {
    ReleaseTableBuilder::for_table(table).build(&table.versions)
}

pub fn dev_version(version: &str) -> String {
    format!("{}{}", version, constants::DEV_SUFFIX)
}

pub fn full_version(version: &str, entry: &VersionEntry) -> String {
    format!(
        "{}{}{}",
        version, entry.release.release_type, entry.release.number
    )
}
