use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Fields of one `pkginfo -l` block, keyed by the backend's own names.
pub type RawBlock = BTreeMap<String, String>;

static BLANK_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*$").expect("Invalid regex pattern"));

/// `KEY: value`, split on the first colon; at least one space after it.
static FIELD_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([^:]+):\s+(.+)$").expect("Invalid regex pattern"));

/// Parse long-format `pkginfo` output into one field map per package.
///
/// Blocks are separated by blank lines and returned in input order. Lines
/// that are neither blank nor `key: value` are skipped, and empty blocks are
/// never emitted.
pub fn parse_pkginfo(output: &str) -> Vec<RawBlock> {
    let mut blocks = Vec::new();
    let mut current = RawBlock::new();

    for line in output.lines() {
        if BLANK_LINE.is_match(line) {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
            continue;
        }

        if let Some(caps) = FIELD_LINE.captures(line) {
            let key = caps[1].trim();
            let value = caps[2].trim();
            if key.is_empty() {
                continue;
            }
            current.insert(key.to_string(), value.to_string());
        }
    }

    if !current.is_empty() {
        blocks.push(current);
    }

    blocks
}
