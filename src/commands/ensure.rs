use crate::core::types::{DesiredState, Ensure};
use crate::core::{Reconciler, Transition};
use crate::error::{Result, SunpkgError};
use crate::packages::{PackageManager, SunManager};
use crate::ui as output;
use crate::utils::sanitize;
use std::path::PathBuf;

pub struct EnsureOptions {
    pub name: String,
    pub state: String,
    pub source: Option<String>,
    pub adminfile: Option<PathBuf>,
    pub responsefile: Option<PathBuf>,
    pub install_options: Option<String>,
    pub dry_run: bool,
}

impl EnsureOptions {
    pub fn desired_state(&self) -> Result<DesiredState> {
        sanitize::validate_package_name(&self.name)?;
        let ensure: Ensure = self.state.parse()?;

        let install_options = match &self.install_options {
            Some(flags) => shlex::split(flags).ok_or_else(|| {
                SunpkgError::ConfigError(format!("Cannot split install options: {}", flags))
            })?,
            None => Vec::new(),
        };

        Ok(DesiredState {
            name: self.name.clone(),
            ensure,
            source: self.source.clone(),
            adminfile: self.adminfile.clone(),
            responsefile: self.responsefile.clone(),
            install_options,
        })
    }
}

pub fn run(options: EnsureOptions) -> Result<()> {
    let desired = options.desired_state()?;
    let manager = SunManager::system(super::ambient_tools()?);
    super::require_tools(&manager)?;
    run_with(&manager, &desired, options.dry_run)?;
    Ok(())
}

pub fn run_with(
    manager: &dyn PackageManager,
    desired: &DesiredState,
    dry_run: bool,
) -> Result<Transition> {
    let reconciler = Reconciler::new(manager);

    let transition = if dry_run {
        reconciler.plan(desired)?
    } else {
        reconciler.reconcile(desired)?
    };

    report(&desired.name, &transition, dry_run);
    Ok(transition)
}

pub(crate) fn report(name: &str, transition: &Transition, dry_run: bool) {
    if dry_run && transition.is_change() {
        output::info(&format!("{}: would {}", name, transition));
    } else {
        output::success(&format!("{}: {}", name, transition));
    }
}
