use crate::backends::namemap::namemap;
use crate::backends::parsers::RawBlock;
use crate::core::types::{PackageRecord, QueryResult};
use crate::error::{Result, SunpkgError};
use crate::ui;
use regex::Regex;

/// Reported when a query produced no parseable output at all
pub const NO_MESSAGE: &str = "No message";

const ERROR_KEY: &str = "ERROR";

/// Classify the parsed output of `pkginfo -l [-d <device>] <name>`.
///
/// An `ERROR` block saying there is no `information for "<name>"` means the
/// package is absent; any other `ERROR` is a failed query.
pub fn classify(name: &str, mut blocks: Vec<RawBlock>) -> Result<QueryResult> {
    if blocks.is_empty() {
        return Ok(QueryResult::QueryFailed(NO_MESSAGE.to_string()));
    }

    if blocks.len() > 1 {
        ui::warning(&format!(
            "pkginfo returned {} entries for '{}'; using the first",
            blocks.len(),
            name
        ));
    }

    let block = blocks.swap_remove(0);

    if let Some(message) = block.get(ERROR_KEY) {
        if not_found_pattern(name)?.is_match(message) {
            return Ok(QueryResult::Absent);
        }
        return Ok(QueryResult::QueryFailed(message.clone()));
    }

    match PackageRecord::from_attributes(namemap(&block)) {
        Some(record) => Ok(QueryResult::Found(record)),
        None => Ok(QueryResult::QueryFailed(format!(
            "pkginfo output for '{}' has no PKGINST field",
            name
        ))),
    }
}

/// `information for "<name>"`, with the name matched literally so
/// `SUNWgcc+` or `a.b` never act as pattern syntax.
fn not_found_pattern(name: &str) -> Result<Regex> {
    Regex::new(&format!("information for \"{}\"", regex::escape(name)))
        .map_err(|e| SunpkgError::InvalidRegex(e.to_string()))
}
