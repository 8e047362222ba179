//! Package name validation
//!
//! Names end up as argv entries of `pkgadd`/`pkgrm`, never in a shell, but a
//! name like `-R/` would still be read as an option. SVR4 package
//! abbreviations are restricted enough that checking the full grammar rules
//! that out.

use crate::error::{Result, SunpkgError};
use regex::Regex;
use std::sync::LazyLock;

/// Longest abbreviation accepted by `pkgmk`
pub const MAX_ABBREVIATION_LEN: usize = 32;

/// Names the packaging tools treat as keywords
const RESERVED_NAMES: &[&str] = &["all", "install", "new"];

/// Abbreviation followed by an optional instance suffix (`SUNWfoo.2`)
static PKGINST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9+-]*(\.[A-Za-z0-9+-]+)?$").expect("Invalid regex pattern")
});

fn invalid(name: &str, reason: impl Into<String>) -> SunpkgError {
    SunpkgError::InvalidPackageName {
        name: name.to_string(),
        reason: reason.into(),
    }
}

/// Validate an SVR4 package instance name.
pub fn validate_package_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(invalid(name, "name cannot be empty"));
    }

    if !PKGINST.is_match(name) {
        return Err(invalid(
            name,
            "must start with a letter and contain only letters, digits, '+' or '-', \
             with an optional '.instance' suffix",
        ));
    }

    let abbreviation = name.split('.').next().unwrap_or(name);
    if abbreviation.len() > MAX_ABBREVIATION_LEN {
        return Err(invalid(
            name,
            format!("abbreviation longer than {} characters", MAX_ABBREVIATION_LEN),
        ));
    }

    if RESERVED_NAMES.contains(&abbreviation) {
        return Err(invalid(name, "reserved by the packaging tools"));
    }

    Ok(())
}

/// Validate a list of package names
pub fn validate_package_names(names: &[String]) -> Result<()> {
    for name in names {
        validate_package_name(name)?;
    }
    Ok(())
}
