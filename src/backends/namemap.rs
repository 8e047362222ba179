//! Backend field names to canonical attributes.

use crate::backends::parsers::RawBlock;
use crate::core::types::Attribute;
use std::collections::BTreeMap;

/// `pkginfo -l` keys that carry over into a package record.
pub const NAMEMAP: [(&str, Attribute); 7] = [
    ("PKGINST", Attribute::Name),
    ("CATEGORY", Attribute::Category),
    ("ARCH", Attribute::Platform),
    ("VERSION", Attribute::Ensure),
    ("BASEDIR", Attribute::Root),
    ("VENDOR", Attribute::Vendor),
    ("DESC", Attribute::Description),
];

/// Rename a parsed block to canonical attributes.
///
/// Keys outside the table are dropped and table keys missing from the block
/// stay missing.
pub fn namemap(block: &RawBlock) -> BTreeMap<Attribute, String> {
    NAMEMAP
        .iter()
        .filter_map(|(key, attribute)| block.get(*key).map(|value| (*attribute, value.clone())))
        .collect()
}
