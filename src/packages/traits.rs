use crate::core::types::{DesiredState, PackageRecord, PackageState, QueryResult};
use crate::error::Result;

pub trait PackageManager: Send + Sync {
    /// Identity attached to inventory records
    fn provider_name(&self) -> &'static str;

    /// Every installed package.
    fn instances(&self) -> Result<Vec<PackageRecord>>;

    /// Look up one package, in the installed database or on `device`.
    fn info(&self, name: &str, device: Option<&str>) -> Result<QueryResult>;

    /// Installed state, read live from the package database.
    fn query(&self, desired: &DesiredState) -> Result<PackageState> {
        self.info(&desired.name, None)?.into_state(&desired.name)
    }

    /// Version offered by the desired source, `None` when the source does
    /// not carry the package.
    fn latest(&self, desired: &DesiredState) -> Result<Option<String>>;

    fn install(&self, desired: &DesiredState) -> Result<()>;

    fn uninstall(&self, desired: &DesiredState) -> Result<()>;

    /// Replace the installed package with the one from the source.
    fn update(&self, desired: &DesiredState) -> Result<()>;

    /// Check if the native tools are present
    fn is_available(&self) -> bool;
}
