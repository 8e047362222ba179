//! Central project identity contract.
//!
//! This module is the single source of truth for runtime identity values.

pub const DISPLAY_NAME: &str = "Sunpkg";
pub const BINARY_NAME: &str = "sunpkg";
pub const CONFIG_DIR_NAME: &str = "sunpkg";
pub const ENV_PREFIX: &str = "SUNPKG";
pub const MANIFEST_FILE_BASENAME: &str = "manifest.kdl";

/// Provider identity attached to inventory records.
pub const PROVIDER_NAME: &str = "sun";

pub fn env_key(suffix: &str) -> String {
    format!("{}_{}", ENV_PREFIX, suffix)
}
