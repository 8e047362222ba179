pub mod pkginfo;

pub use pkginfo::{RawBlock, parse_pkginfo};
