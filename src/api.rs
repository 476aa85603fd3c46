// API module for the machine-readable release document

use crate::releases::{self, QaReleases, ReleasesIndex, ReportSet};
use crate::table::{ReleaseInfo, ReleaseTable};
use serde::Serialize;
use std::collections::BTreeMap;

/// Document served to third parties: the active part of the raw table plus
/// everything derived from it.
#[derive(Debug, Serialize)]
pub struct ApiDocument<'a> {
    pub versions: BTreeMap<&'a str, ActiveVersion<'a>>,
    pub reported: &'a ReportSet,
    pub releases: &'a ReleasesIndex,
}

#[derive(Debug, Serialize)]
pub struct ActiveVersion<'a> {
    pub active: bool,
    pub release: &'a ReleaseInfo,
    pub dev_version: String,
}

impl<'a> ApiDocument<'a> {
    pub fn new(table: &'a ReleaseTable, derived: &'a QaReleases) -> Self {
        let versions = table
            .active_versions()
            .map(|(version, entry)| {
                (
                    version.as_str(),
                    ActiveVersion {
                        active: entry.active,
                        release: &entry.release,
                        dev_version: releases::dev_version(version),
                    },
                )
            })
            .collect();

        Self {
            versions,
            reported: &derived.reported,
            releases: &derived.releases,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
