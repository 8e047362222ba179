use crate::project_identity;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_PKGINFO: &str = "/usr/bin/pkginfo";
pub const DEFAULT_PKGADD: &str = "/usr/sbin/pkgadd";
pub const DEFAULT_PKGRM: &str = "/usr/sbin/pkgrm";

/// Default timeout for native package commands (5 minutes)
pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(300);

/// Locations of the native SVR4 tools and how long to wait for them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolPaths {
    pub pkginfo: PathBuf,
    pub pkgadd: PathBuf,
    pub pkgrm: PathBuf,
    pub timeout: Duration,
}

impl Default for ToolPaths {
    fn default() -> Self {
        Self {
            pkginfo: PathBuf::from(DEFAULT_PKGINFO),
            pkgadd: PathBuf::from(DEFAULT_PKGADD),
            pkgrm: PathBuf::from(DEFAULT_PKGRM),
            timeout: DEFAULT_COMMAND_TIMEOUT,
        }
    }
}

impl ToolPaths {
    /// Apply `SUNPKG_PKGINFO`, `SUNPKG_PKGADD` and `SUNPKG_PKGRM`.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|suffix| std::env::var_os(project_identity::env_key(suffix)))
    }

    fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<std::ffi::OsString>,
    {
        for (suffix, slot) in [
            ("PKGINFO", &mut self.pkginfo),
            ("PKGADD", &mut self.pkgadd),
            ("PKGRM", &mut self.pkgrm),
        ] {
            if let Some(value) = lookup(suffix).filter(|v| !v.is_empty()) {
                *slot = PathBuf::from(value);
            }
        }
        self
    }

    /// Tools that cannot be found or are not executable.
    pub fn missing(&self) -> Vec<&Path> {
        [&self.pkginfo, &self.pkgadd, &self.pkgrm]
            .into_iter()
            .filter(|tool| which::which(tool).is_err())
            .map(PathBuf::as_path)
            .collect()
    }
}
