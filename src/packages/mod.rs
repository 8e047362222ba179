//! # Package Manager Implementations
//!
//! The `PackageManager` trait is the seam between reconciliation and the
//! native tools:
//! - `instances()` - List installed packages
//! - `info()` / `query()` / `latest()` - Look up one package
//! - `install()` / `uninstall()` / `update()` - Change it
//!
//! `SunManager` implements it on top of `pkginfo`, `pkgadd` and `pkgrm`.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use sunpkg::backends::ToolPaths;
//! use sunpkg::core::types::{DesiredState, Ensure};
//! use sunpkg::packages::{PackageManager, SunManager};
//!
//! let manager = SunManager::system(ToolPaths::default());
//! let desired = DesiredState::new("SUNWzlib", Ensure::Present).with_source("/cdrom/Product");
//! manager.install(&desired)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod sun;
pub mod traits;

pub use sun::SunManager;
pub use traits::PackageManager;
