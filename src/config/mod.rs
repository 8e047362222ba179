pub mod kdl;
pub mod loader;

pub use kdl::{Manifest, PackageDefaults, ToolSettings, parse_manifest};
pub use loader::{load_manifest, manifest_path, resolve_tools};
