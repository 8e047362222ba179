pub mod apply;
pub mod check;
pub mod completions;
pub mod ensure;
pub mod list;
pub mod query;

use crate::backends::config::ToolPaths;
use crate::config::loader;
use crate::error::{Result, SunpkgError};
use crate::packages::PackageManager;
use crate::project_identity;
use crate::utils::machine_output::{self, Format};
use serde::Serialize;

/// How a command prints its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputMode {
    pub format: Format,
    /// Wrap in the v1 envelope
    pub versioned: bool,
}

impl Default for OutputMode {
    fn default() -> Self {
        Self {
            format: Format::Table,
            versioned: false,
        }
    }
}

impl OutputMode {
    pub fn is_table(&self) -> bool {
        self.format == Format::Table
    }

    pub fn emit<T>(
        &self,
        command: &str,
        data: T,
        warnings: Vec<String>,
        errors: Vec<String>,
    ) -> Result<()>
    where
        T: Serialize,
    {
        if self.versioned {
            return machine_output::emit_v1(command, data, warnings, errors, self.format);
        }
        if let Some(out) = machine_output::render(&data, self.format)? {
            println!("{}", out);
        }
        Ok(())
    }
}

/// Tool paths for commands that do not take a manifest: honor the default
/// manifest's `tools` block when one exists.
pub(crate) fn ambient_tools() -> Result<ToolPaths> {
    let manifest = match loader::manifest_path(None) {
        Ok(path) if path.exists() => Some(loader::load_manifest(&path)?),
        _ => None,
    };
    Ok(loader::resolve_tools(manifest.as_ref().map(|m| &m.tools)))
}

/// The provider only works when all of its native tools are installed.
pub(crate) fn require_tools(manager: &dyn PackageManager) -> Result<()> {
    if manager.is_available() {
        return Ok(());
    }
    Err(SunpkgError::DependencyMissing(format!(
        "{} packaging tools are not installed (see `{} check`)",
        manager.provider_name(),
        project_identity::BINARY_NAME
    )))
}
