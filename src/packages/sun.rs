//! Sun's SVR4 packaging: `pkginfo`, `pkgadd` and `pkgrm`.
//!
//! The tools have no upgrade verb and no implicit repository, so every
//! install names its source explicitly and an update is a removal followed
//! by a fresh install.

pub mod command;
pub mod query;

use crate::backends::config::ToolPaths;
use crate::backends::exec::{CommandRunner, SystemRunner};
use crate::backends::namemap::namemap;
use crate::backends::parsers::parse_pkginfo;
use crate::core::types::{DesiredState, PackageRecord, QueryResult};
use crate::error::{Result, SunpkgError};
use crate::packages::traits::PackageManager;
use crate::project_identity::PROVIDER_NAME;
use crate::ui;
use command::{CommandOptions, prepare_cmd};

pub struct SunManager<R = SystemRunner> {
    tools: ToolPaths,
    runner: R,
}

impl SunManager<SystemRunner> {
    /// Manager that runs the real tools.
    pub fn system(tools: ToolPaths) -> Self {
        let runner = SystemRunner::new(tools.timeout);
        Self::new(tools, runner)
    }
}

impl<R: CommandRunner> SunManager<R> {
    pub fn new(tools: ToolPaths, runner: R) -> Self {
        Self { tools, runner }
    }

    pub fn tools(&self) -> &ToolPaths {
        &self.tools
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    fn require_source(desired: &DesiredState) -> Result<&str> {
        desired.source.as_deref().ok_or_else(|| {
            SunpkgError::ConfigError(format!(
                "Sun packages must specify a package source ({})",
                desired.name
            ))
        })
    }
}

impl<R: CommandRunner> PackageManager for SunManager<R> {
    fn provider_name(&self) -> &'static str {
        PROVIDER_NAME
    }

    fn instances(&self) -> Result<Vec<PackageRecord>> {
        let args = vec!["-l".to_string()];
        let output = self.runner.execute(&self.tools.pkginfo, &args, true)?;

        let records = parse_pkginfo(&output)
            .iter()
            .filter_map(|block| {
                let record = PackageRecord::from_attributes(namemap(block));
                if record.is_none() {
                    ui::debug("Skipping pkginfo entry without PKGINST");
                }
                record
            })
            .map(|record| record.with_provider(PROVIDER_NAME))
            .collect();

        Ok(records)
    }

    fn info(&self, name: &str, device: Option<&str>) -> Result<QueryResult> {
        let mut args = vec!["-l".to_string()];
        if let Some(device) = device {
            args.push("-d".to_string());
            args.push(device.to_string());
        }
        args.push(name.to_string());

        // pkginfo exits nonzero for unknown packages; the ERROR line decides
        let output = self.runner.execute(&self.tools.pkginfo, &args, false)?;
        query::classify(name, parse_pkginfo(&output))
    }

    fn latest(&self, desired: &DesiredState) -> Result<Option<String>> {
        let source = Self::require_source(desired)?;
        let record = self.info(&desired.name, Some(source))?.into_record(&desired.name)?;
        Ok(record.and_then(|r| r.version().map(str::to_string)))
    }

    fn install(&self, desired: &DesiredState) -> Result<()> {
        Self::require_source(desired)?;
        let args = prepare_cmd(desired, CommandOptions::INSTALL);
        self.runner.execute(&self.tools.pkgadd, &args, true)?;
        Ok(())
    }

    fn uninstall(&self, desired: &DesiredState) -> Result<()> {
        let args = prepare_cmd(desired, CommandOptions::UNINSTALL);
        self.runner.execute(&self.tools.pkgrm, &args, true)?;
        Ok(())
    }

    /// Best effort and not atomic: when the removal succeeds and the install
    /// fails, the package is left absent and `PartialUpdate` is returned.
    fn update(&self, desired: &DesiredState) -> Result<()> {
        // Without a source the removal could never be followed by an install
        Self::require_source(desired)?;

        let removed = if self.query(desired)?.is_absent() {
            ui::debug(&format!("{} is already absent, skipping pkgrm", desired.name));
            false
        } else {
            self.uninstall(desired)?;
            true
        };

        match self.install(desired) {
            Err(e) if removed => Err(SunpkgError::PartialUpdate {
                package: desired.name.clone(),
                reason: e.to_string(),
            }),
            other => other,
        }
    }

    fn is_available(&self) -> bool {
        self.tools.missing().is_empty()
    }
}
