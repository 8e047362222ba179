use crate::backends::config::ToolPaths;
use crate::config::kdl::{Manifest, ToolSettings, parse_manifest};
use crate::error::{Result, SunpkgError};
use crate::project_identity;
use crate::utils::paths;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Pick the manifest: explicit path, then `SUNPKG_MANIFEST`, then the
/// per-user config directory.
pub fn manifest_path(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    if let Some(path) = std::env::var_os(project_identity::env_key("MANIFEST"))
        .filter(|v| !v.is_empty())
    {
        return Ok(PathBuf::from(path));
    }
    paths::manifest_file()
}

pub fn load_manifest(path: &Path) -> Result<Manifest> {
    if !path.exists() {
        return Err(SunpkgError::ManifestNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path).map_err(|e| SunpkgError::IoError {
        path: path.to_path_buf(),
        source: e,
    })?;

    parse_manifest(&content).map_err(|e| match e {
        SunpkgError::ConfigError(message) => SunpkgError::ParseError {
            file: path.display().to_string(),
            message,
        },
        other => other,
    })
}

/// Tool locations: built-in defaults, then the manifest `tools` block,
/// then environment overrides.
pub fn resolve_tools(settings: Option<&ToolSettings>) -> ToolPaths {
    let mut tools = ToolPaths::default();

    if let Some(settings) = settings {
        if let Some(path) = &settings.pkginfo {
            tools.pkginfo = path.clone();
        }
        if let Some(path) = &settings.pkgadd {
            tools.pkgadd = path.clone();
        }
        if let Some(path) = &settings.pkgrm {
            tools.pkgrm = path.clone();
        }
        if let Some(secs) = settings.timeout {
            tools.timeout = Duration::from_secs(secs);
        }
    }

    tools.with_env_overrides()
}
