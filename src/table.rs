// Table module for the hand-maintained QA release table

use crate::constants;
use crate::error::ConfigError;
use log::debug;
use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

/// On-disk encodings the table can be authored in, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Toml,
    Json,
    Yaml,
}

impl Encoding {
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Some(Encoding::Toml),
            Some("json") => Some(Encoding::Json),
            Some("yaml") | Some("yml") => Some(Encoding::Yaml),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Encoding::Toml => "toml",
            Encoding::Json => "json",
            Encoding::Yaml => "yaml",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseTable {
    #[serde(default)]
    pub settings: Settings,
    #[serde(default, deserialize_with = "unique_versions")]
    pub versions: BTreeMap<String, VersionEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Filename prefix of the hosted archives (e.g. "php" for php-8.1.8RC1.tar.gz)
    pub product: String,
    /// Checksum algorithms read from each release, in display order
    pub checksum_algorithms: Vec<String>,
    /// Archive formats to resolve; names outside bz2/gz/xz are ignored
    pub archive_formats: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            product: constants::DEFAULT_PRODUCT.to_string(),
            checksum_algorithms: vec![constants::DEFAULT_CHECKSUM_ALGORITHM.to_string()],
            archive_formats: constants::DEFAULT_ARCHIVE_FORMATS
                .iter()
                .map(|format| format.to_string())
                .collect(),
        }
    }
}

/// One upcoming product version under (or awaiting) QA.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionEntry {
    #[serde(default)]
    pub active: bool,
    /// Absent for placeholders; such entries are dev-only
    #[serde(default)]
    pub release: ReleaseInfo,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseInfo {
    /// RC, alpha, beta... used verbatim since hosted filenames depend on its casing
    #[serde(rename = "type", default)]
    pub release_type: String,
    /// 0 when no pre-release build exists yet
    #[serde(default)]
    pub number: u32,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub baseurl: String,
    /// algorithm -> archive format -> checksum
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub checksums: BTreeMap<String, BTreeMap<String, String>>,
}

impl ReleaseInfo {
    /// Non-empty checksum recorded for an algorithm/format pair
    pub fn checksum(&self, algorithm: &str, format: &str) -> Option<&str> {
        self.checksums
            .get(algorithm)
            .and_then(|by_format| by_format.get(format))
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    }
}

impl ReleaseTable {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let encoding = Encoding::from_path(path).ok_or_else(|| ConfigError::UnsupportedFormat {
            path: path.to_path_buf(),
        })?;

        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        debug!(
            "Loading release table from {} ({})",
            path.display(),
            encoding.name()
        );
        Self::parse(&text, encoding, path)
    }

    /// Parse table text; `origin` is only used to label errors.
    pub fn parse(text: &str, encoding: Encoding, origin: &Path) -> Result<Self, ConfigError> {
        let parsed: Result<Self, String> = match encoding {
            Encoding::Toml => toml::from_str(text).map_err(|e| e.to_string()),
            Encoding::Json => serde_json::from_str(text).map_err(|e| e.to_string()),
            Encoding::Yaml => serde_yaml::from_str(text).map_err(|e| e.to_string()),
        };

        let table = parsed.map_err(|message| ConfigError::Parse {
            path: origin.to_path_buf(),
            message: message.trim().to_string(),
        })?;

        if table.versions.keys().any(|version| version.trim().is_empty()) {
            return Err(ConfigError::EmptyVersion);
        }

        if let Some(name) = table
            .settings
            .checksum_algorithms
            .iter()
            .find(|name| name.as_str() == constants::ARCHIVE_PATH_KEY)
        {
            return Err(ConfigError::ReservedAlgorithm { name: name.clone() });
        }

        Ok(table)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let encoding = Encoding::from_path(path).ok_or_else(|| ConfigError::UnsupportedFormat {
            path: path.to_path_buf(),
        })?;

        let text = match encoding {
            Encoding::Toml => toml::to_string_pretty(self).map_err(|e| e.to_string()),
            Encoding::Json => serde_json::to_string_pretty(self).map_err(|e| e.to_string()),
            Encoding::Yaml => serde_yaml::to_string(self).map_err(|e| e.to_string()),
        }
        .map_err(|message| ConfigError::Parse {
            path: path.to_path_buf(),
            message,
        })?;

        if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(|source| ConfigError::Write {
                path: path.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(path, text).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// A table with a single inactive placeholder entry, written by `init`.
    pub fn starter(version: &str) -> Self {
        let mut versions = BTreeMap::new();
        versions.insert(
            version.to_string(),
            VersionEntry {
                active: false,
                release: ReleaseInfo {
                    release_type: "RC".to_string(),
                    ..ReleaseInfo::default()
                },
            },
        );

        Self {
            settings: Settings::default(),
            versions,
        }
    }

    pub fn active_versions(&self) -> impl Iterator<Item = (&String, &VersionEntry)> {
        self.versions.iter().filter(|(_, entry)| entry.active)
    }
}

// Duplicate version keys are rejected in every encoding instead of silently
// letting the last one win.
fn unique_versions<'de, D>(deserializer: D) -> Result<BTreeMap<String, VersionEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    struct VersionsVisitor;

    impl<'de> Visitor<'de> for VersionsVisitor {
        type Value = BTreeMap<String, VersionEntry>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a map of version keys to release entries")
        }

        fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut versions = BTreeMap::new();
            while let Some((version, entry)) = access.next_entry::<String, VersionEntry>()? {
                if versions.contains_key(&version) {
                    return Err(de::Error::custom(format!("duplicate version `{}`", version)));
                }
                versions.insert(version, entry);
            }
            Ok(versions)
        }
    }

    deserializer.deserialize_map(VersionsVisitor)
}
