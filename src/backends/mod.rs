//! # SVR4 Backend Plumbing
//!
//! Everything that touches the native tools' text:
//!
//! - `parsers` splits `pkginfo -l` output into raw field blocks
//! - `namemap` renames backend fields to canonical attributes
//! - `exec` runs `pkginfo`, `pkgadd` and `pkgrm`
//! - `config` locates those tools

pub mod config;
pub mod exec;
pub mod namemap;
pub mod parsers;

pub use config::ToolPaths;
pub use exec::{CommandRunner, SystemRunner};
