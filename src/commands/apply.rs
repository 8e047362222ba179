use crate::commands::OutputMode;
use crate::config::{Manifest, loader};
use crate::core::Reconciler;
use crate::core::types::DesiredState;
use crate::error::{Result, SunpkgError};
use crate::packages::{PackageManager, SunManager};
use crate::ui as output;
use crate::utils::sanitize;
use serde::Serialize;
use std::path::PathBuf;

pub struct ApplyOptions {
    pub manifest: Option<PathBuf>,
    pub only: Vec<String>,
    pub dry_run: bool,
    pub output: OutputMode,
}

/// Result of reconciling one manifest entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageOutcome {
    pub name: String,
    pub ensure: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transition: Option<String>,
    pub changed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PackageOutcome {
    pub fn failed(&self) -> bool {
        self.error.is_some()
    }
}

pub fn run(options: ApplyOptions) -> Result<()> {
    let path = loader::manifest_path(options.manifest.as_deref())?;
    output::debug(&format!("Using manifest {}", path.display()));
    let manifest = loader::load_manifest(&path)?;

    let manager = SunManager::system(loader::resolve_tools(Some(&manifest.tools)));
    super::require_tools(&manager)?;
    run_with(&manager, &manifest, &options)
}

pub fn run_with(
    manager: &dyn PackageManager,
    manifest: &Manifest,
    options: &ApplyOptions,
) -> Result<()> {
    let selected = select(manifest, &options.only)?;
    let human = options.output.is_table();
    if selected.is_empty() && human {
        output::info("Manifest declares no packages");
        return Ok(());
    }

    if human {
        let verb = if options.dry_run { "Planning" } else { "Applying" };
        output::header(&format!("{} {} packages", verb, selected.len()));
    }

    let outcomes = reconcile_all(manager, &selected, options.dry_run, human)?;
    let failures: Vec<String> = outcomes
        .iter()
        .filter_map(|o| o.error.as_ref().map(|e| format!("{}: {}", o.name, e)))
        .collect();

    if !human {
        options
            .output
            .emit("apply", &outcomes, vec![], failures.clone())?;
    } else {
        let changed = outcomes.iter().filter(|o| o.changed).count();
        output::separator();
        if options.dry_run {
            output::info(&format!("{} of {} packages would change", changed, outcomes.len()));
        } else {
            output::info(&format!("{} of {} packages changed", changed, outcomes.len()));
        }
    }

    if failures.is_empty() {
        Ok(())
    } else {
        Err(SunpkgError::Other(format!(
            "{} of {} packages failed",
            failures.len(),
            outcomes.len()
        )))
    }
}

/// Keep declaration order; `--only` names must exist in the manifest.
fn select<'a>(manifest: &'a Manifest, only: &[String]) -> Result<Vec<&'a DesiredState>> {
    if only.is_empty() {
        return Ok(manifest.packages.iter().collect());
    }
    sanitize::validate_package_names(only)?;

    if let Some(unknown) = only.iter().find(|name| manifest.package(name).is_none()) {
        return Err(SunpkgError::ConfigError(format!(
            "Package '{}' is not declared in the manifest",
            unknown
        )));
    }

    Ok(manifest
        .packages
        .iter()
        .filter(|p| only.contains(&p.name))
        .collect())
}

/// One package at a time; a failure is recorded and the run moves on.
///
/// Per-package progress goes to stdout only when `human` is set, so machine
/// output stays parseable.
pub fn reconcile_all(
    manager: &dyn PackageManager,
    packages: &[&DesiredState],
    dry_run: bool,
    human: bool,
) -> Result<Vec<PackageOutcome>> {
    let reconciler = Reconciler::new(manager);
    let mut outcomes = Vec::with_capacity(packages.len());

    for desired in packages {
        if output::is_interrupted() {
            return Err(SunpkgError::Interrupted);
        }

        let result = if dry_run {
            reconciler.plan(desired)
        } else {
            reconciler.reconcile(desired)
        };

        let outcome = match result {
            Ok(transition) => {
                if human {
                    super::ensure::report(&desired.name, &transition, dry_run);
                }
                PackageOutcome {
                    name: desired.name.clone(),
                    ensure: desired.ensure.to_string(),
                    changed: transition.is_change(),
                    transition: Some(transition.to_string()),
                    error: None,
                }
            }
            Err(e) => {
                output::error(&format!("{}: {}", desired.name, e));
                PackageOutcome {
                    name: desired.name.clone(),
                    ensure: desired.ensure.to_string(),
                    transition: None,
                    changed: false,
                    error: Some(e.to_string()),
                }
            }
        };
        outcomes.push(outcome);
    }

    Ok(outcomes)
}
