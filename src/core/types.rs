use crate::error::{Result, SunpkgError};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Canonical attribute vocabulary shared by every part of the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Attribute {
    Name,
    Ensure,
    Category,
    Platform,
    Root,
    Vendor,
    Description,
}

impl Attribute {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Ensure => "ensure",
            Self::Category => "category",
            Self::Platform => "platform",
            Self::Root => "root",
            Self::Vendor => "vendor",
            Self::Description => "description",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One package's database entry, renamed to canonical attributes.
///
/// Only constructible with a `name`, so a nameless record can never escape
/// the query engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageRecord {
    #[serde(flatten)]
    attributes: BTreeMap<Attribute, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    provider: Option<&'static str>,
}

impl PackageRecord {
    /// Build a record from mapped attributes; `None` when `name` is missing.
    pub fn from_attributes(attributes: BTreeMap<Attribute, String>) -> Option<Self> {
        if !attributes.contains_key(&Attribute::Name) {
            return None;
        }
        Some(Self {
            attributes,
            provider: None,
        })
    }

    pub fn with_provider(mut self, provider: &'static str) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn name(&self) -> &str {
        self.attributes
            .get(&Attribute::Name)
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// Installed (or available) version, the `ensure` attribute.
    pub fn version(&self) -> Option<&str> {
        self.get(Attribute::Ensure)
    }

    pub fn get(&self, attribute: Attribute) -> Option<&str> {
        self.attributes.get(&attribute).map(String::as_str)
    }

    pub fn attributes(&self) -> &BTreeMap<Attribute, String> {
        &self.attributes
    }

    pub fn provider(&self) -> Option<&'static str> {
        self.provider
    }
}

/// Requested presence of a package.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Ensure {
    Absent,
    /// Installed at any version
    Present,
    /// Installed at whatever version the source carries
    Latest,
    Version(String),
}

impl FromStr for Ensure {
    type Err = SunpkgError;

    fn from_str(s: &str) -> Result<Self> {
        let value = s.trim();
        match value {
            "" => Err(SunpkgError::ConfigError(
                "ensure value cannot be empty".to_string(),
            )),
            "absent" => Ok(Self::Absent),
            "present" | "installed" => Ok(Self::Present),
            "latest" => Ok(Self::Latest),
            version => Ok(Self::Version(version.to_string())),
        }
    }
}

impl fmt::Display for Ensure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent => write!(f, "absent"),
            Self::Present => write!(f, "present"),
            Self::Latest => write!(f, "latest"),
            Self::Version(v) => write!(f, "{}", v),
        }
    }
}

/// Caller-supplied target configuration for one package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesiredState {
    pub name: String,
    pub ensure: Ensure,
    /// Package file, spool directory or device handed to `-d`
    pub source: Option<String>,
    pub adminfile: Option<PathBuf>,
    pub responsefile: Option<PathBuf>,
    /// Passed to the installer verbatim, one argv entry per element
    pub install_options: Vec<String>,
}

impl DesiredState {
    pub fn new(name: impl Into<String>, ensure: Ensure) -> Self {
        Self {
            name: name.into(),
            ensure,
            source: None,
            adminfile: None,
            responsefile: None,
            install_options: Vec::new(),
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_adminfile(mut self, path: impl Into<PathBuf>) -> Self {
        self.adminfile = Some(path.into());
        self
    }

    pub fn with_responsefile(mut self, path: impl Into<PathBuf>) -> Self {
        self.responsefile = Some(path.into());
        self
    }

    pub fn with_install_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.install_options = options.into_iter().map(Into::into).collect();
        self
    }
}

/// Actual state of a package as read from the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackageState {
    Absent,
    /// Installed; the version is `None` when the database omits `VERSION`
    Present(Option<String>),
}

impl PackageState {
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    pub fn version(&self) -> Option<&str> {
        match self {
            Self::Absent => None,
            Self::Present(version) => version.as_deref(),
        }
    }
}

impl fmt::Display for PackageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent => write!(f, "absent"),
            Self::Present(Some(v)) => write!(f, "{}", v),
            Self::Present(None) => write!(f, "present (unknown version)"),
        }
    }
}

/// Classification of a single-package query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryResult {
    Found(PackageRecord),
    Absent,
    QueryFailed(String),
}

impl QueryResult {
    /// Surface `QueryFailed` as an error; otherwise hand back the record, if any.
    pub fn into_record(self, package: &str) -> Result<Option<PackageRecord>> {
        match self {
            Self::Found(record) => Ok(Some(record)),
            Self::Absent => Ok(None),
            Self::QueryFailed(message) => Err(SunpkgError::QueryFailed {
                package: package.to_string(),
                message,
            }),
        }
    }

    pub fn into_state(self, package: &str) -> Result<PackageState> {
        Ok(match self.into_record(package)? {
            Some(record) => PackageState::Present(record.version().map(str::to_string)),
            None => PackageState::Absent,
        })
    }
}
