//! Desired-vs-actual state machine.
//!
//! Planning only reads (installed database and, for `latest` or pinned
//! versions, the source). Applying a plan runs at most one of install,
//! uninstall or update.

use crate::core::types::{DesiredState, Ensure, PackageState};
use crate::error::{Result, SunpkgError};
use crate::packages::traits::PackageManager;
use crate::ui;
use std::fmt;

/// What reconciliation will do (or did) to one package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Unchanged(PackageState),
    Install { available: Option<String> },
    Remove { installed: Option<String> },
    Update {
        installed: Option<String>,
        available: Option<String>,
    },
}

impl Transition {
    pub fn is_change(&self) -> bool {
        !matches!(self, Self::Unchanged(_))
    }
}

fn or_unknown(version: &Option<String>) -> &str {
    version.as_deref().unwrap_or("unknown")
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unchanged(state) => write!(f, "unchanged ({})", state),
            Self::Install { available: None } => write!(f, "install"),
            Self::Install {
                available: Some(version),
            } => write!(f, "install {}", version),
            Self::Remove { installed } => write!(f, "remove {}", or_unknown(installed)),
            Self::Update {
                installed,
                available,
            } => write!(
                f,
                "update {} -> {}",
                or_unknown(installed),
                or_unknown(available)
            ),
        }
    }
}

pub struct Reconciler<'a> {
    manager: &'a dyn PackageManager,
}

impl<'a> Reconciler<'a> {
    pub fn new(manager: &'a dyn PackageManager) -> Self {
        Self { manager }
    }

    /// Decide the transition for `desired` without changing anything.
    pub fn plan(&self, desired: &DesiredState) -> Result<Transition> {
        let current = self.manager.query(desired)?;
        ui::debug(&format!(
            "{}: installed {}, wanted {}",
            desired.name, current, desired.ensure
        ));

        let transition = match (&desired.ensure, current) {
            (Ensure::Absent, PackageState::Absent) => Transition::Unchanged(PackageState::Absent),
            (Ensure::Absent, PackageState::Present(installed)) => Transition::Remove { installed },

            (Ensure::Present, PackageState::Absent) => Transition::Install { available: None },
            (Ensure::Present, present @ PackageState::Present(_)) => Transition::Unchanged(present),

            (Ensure::Latest, PackageState::Absent) => Transition::Install { available: None },
            (Ensure::Latest, PackageState::Present(installed)) => {
                match self.manager.latest(desired)? {
                    None => {
                        ui::warning(&format!(
                            "Source {} does not provide {}; leaving installed version",
                            desired.source.as_deref().unwrap_or("-"),
                            desired.name
                        ));
                        Transition::Unchanged(PackageState::Present(installed))
                    }
                    Some(available) if installed.as_deref() == Some(available.as_str()) => {
                        Transition::Unchanged(PackageState::Present(installed))
                    }
                    Some(available) => Transition::Update {
                        installed,
                        available: Some(available),
                    },
                }
            }

            (Ensure::Version(wanted), PackageState::Present(installed))
                if installed.as_deref() == Some(wanted.as_str()) =>
            {
                Transition::Unchanged(PackageState::Present(installed))
            }
            (Ensure::Version(wanted), current) => {
                let available = self.manager.latest(desired)?;
                if available.as_deref() != Some(wanted.as_str()) {
                    return Err(SunpkgError::VersionUnavailable {
                        package: desired.name.clone(),
                        wanted: wanted.clone(),
                        available: available.unwrap_or_else(|| "nothing".to_string()),
                    });
                }
                match current {
                    PackageState::Absent => Transition::Install { available },
                    PackageState::Present(installed) => Transition::Update {
                        installed,
                        available,
                    },
                }
            }
        };

        // Anything that ends in pkgadd needs a source; report it before acting
        if matches!(
            transition,
            Transition::Install { .. } | Transition::Update { .. }
        ) && desired.source.is_none()
        {
            return Err(SunpkgError::ConfigError(format!(
                "Sun packages must specify a package source ({})",
                desired.name
            )));
        }

        Ok(transition)
    }

    /// Carry out a planned transition.
    pub fn apply(&self, desired: &DesiredState, transition: &Transition) -> Result<()> {
        match transition {
            Transition::Unchanged(_) => Ok(()),
            Transition::Install { .. } => self.manager.install(desired),
            Transition::Remove { .. } => self.manager.uninstall(desired),
            Transition::Update { .. } => self.manager.update(desired),
        }
    }

    /// Plan and apply in one step, returning what was done.
    pub fn reconcile(&self, desired: &DesiredState) -> Result<Transition> {
        let transition = self.plan(desired)?;
        self.apply(desired, &transition)?;
        Ok(transition)
    }
}

#[cfg(test)]
mod tests;
