use crate::core::types::{DesiredState, Ensure};
use crate::error::{Result, SunpkgError};
use crate::utils::sanitize;
use kdl::{KdlDocument, KdlEntry, KdlNode};
use std::collections::HashSet;
use std::path::PathBuf;

/// `tools { ... }` block; unset fields keep their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolSettings {
    pub pkginfo: Option<PathBuf>,
    pub pkgadd: Option<PathBuf>,
    pub pkgrm: Option<PathBuf>,
    /// Seconds
    pub timeout: Option<u64>,
}

/// `defaults { ... }` block, inherited field by field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageDefaults {
    pub source: Option<String>,
    pub adminfile: Option<PathBuf>,
    pub responsefile: Option<PathBuf>,
    pub install_options: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    pub tools: ToolSettings,
    pub defaults: PackageDefaults,
    /// In declaration order, defaults already applied
    pub packages: Vec<DesiredState>,
}

impl Manifest {
    pub fn package(&self, name: &str) -> Option<&DesiredState> {
        self.packages.iter().find(|p| p.name == name)
    }
}

/// What a `package` node sets itself, before defaults.
#[derive(Debug, Default)]
struct PackageNode {
    name: String,
    ensure: Option<Ensure>,
    source: Option<String>,
    adminfile: Option<PathBuf>,
    responsefile: Option<PathBuf>,
    install_options: Option<Vec<String>>,
}

impl PackageNode {
    fn resolve(self, defaults: &PackageDefaults) -> DesiredState {
        DesiredState {
            name: self.name,
            ensure: self.ensure.unwrap_or(Ensure::Present),
            source: self.source.or_else(|| defaults.source.clone()),
            adminfile: self.adminfile.or_else(|| defaults.adminfile.clone()),
            responsefile: self.responsefile.or_else(|| defaults.responsefile.clone()),
            install_options: self
                .install_options
                .unwrap_or_else(|| defaults.install_options.clone()),
        }
    }
}

pub fn parse_manifest(content: &str) -> Result<Manifest> {
    let doc: KdlDocument = content.parse().map_err(|e: kdl::KdlError| {
        let err_msg = e.to_string();
        let hint = if err_msg.contains("unexpected end of file") {
            "\nHint: You might be missing a closing brace '}'."
        } else if err_msg.contains("expected") {
            "\nHint: Check that your KDL syntax follows the format: package \"NAME\" { ensure \"latest\" }"
        } else {
            ""
        };
        SunpkgError::ConfigError(format!("KDL parsing error: {}{}", err_msg, hint))
    })?;

    let mut manifest = Manifest::default();
    let mut nodes = Vec::new();
    let mut seen = HashSet::new();

    for node in doc.nodes() {
        match node.name().value() {
            "tools" => parse_tools(node, &mut manifest.tools)?,
            "defaults" => parse_defaults(node, &mut manifest.defaults)?,
            "package" | "pkg" => {
                let package = parse_package(node)?;
                if !seen.insert(package.name.clone()) {
                    return Err(SunpkgError::ConfigError(format!(
                        "Package '{}' is declared more than once",
                        package.name
                    )));
                }
                nodes.push(package);
            }
            other => {
                return Err(SunpkgError::ConfigError(format!(
                    "Unknown manifest node '{}' (expected tools, defaults or package)",
                    other
                )));
            }
        }
    }

    // defaults may come after the packages that use them
    manifest.packages = nodes
        .into_iter()
        .map(|node| node.resolve(&manifest.defaults))
        .collect();

    Ok(manifest)
}

fn parse_tools(node: &KdlNode, tools: &mut ToolSettings) -> Result<()> {
    for child in children(node) {
        let key = child.name().value();
        match key {
            "pkginfo" => tools.pkginfo = Some(PathBuf::from(required_string(child)?)),
            "pkgadd" => tools.pkgadd = Some(PathBuf::from(required_string(child)?)),
            "pkgrm" => tools.pkgrm = Some(PathBuf::from(required_string(child)?)),
            "timeout" => {
                let seconds = first_argument(child)
                    .and_then(|entry| entry.value().as_integer())
                    .filter(|secs| *secs > 0)
                    .and_then(|secs| u64::try_from(secs).ok())
                    .ok_or_else(|| {
                        SunpkgError::ConfigError(
                            "tools.timeout must be a positive number of seconds".to_string(),
                        )
                    })?;
                tools.timeout = Some(seconds);
            }
            other => {
                return Err(SunpkgError::ConfigError(format!(
                    "Unknown tools setting '{}'",
                    other
                )));
            }
        }
    }
    Ok(())
}

fn parse_defaults(node: &KdlNode, defaults: &mut PackageDefaults) -> Result<()> {
    for child in children(node) {
        match child.name().value() {
            "source" => defaults.source = Some(required_string(child)?),
            "adminfile" => defaults.adminfile = Some(PathBuf::from(required_string(child)?)),
            "responsefile" => {
                defaults.responsefile = Some(PathBuf::from(required_string(child)?))
            }
            "install-options" => defaults.install_options = string_arguments(child),
            other => {
                return Err(SunpkgError::ConfigError(format!(
                    "Unknown defaults setting '{}'",
                    other
                )));
            }
        }
    }
    Ok(())
}

/// `package "NAME" { ... }` or `package "NAME" ensure="absent" source="..."`
fn parse_package(node: &KdlNode) -> Result<PackageNode> {
    let name = required_string(node)?;
    sanitize::validate_package_name(&name)?;

    let mut package = PackageNode {
        name,
        ..Default::default()
    };

    let properties = node
        .entries()
        .iter()
        .filter_map(|entry| entry.name().map(|id| (id.value().to_string(), entry)));
    for (key, entry) in properties {
        let value = entry.value().as_string().ok_or_else(|| {
            SunpkgError::ConfigError(format!(
                "Property '{}' of package '{}' must be a string",
                key, package.name
            ))
        })?;
        set_package_field(&mut package, &key, vec![value.to_string()])?;
    }

    for child in children(node) {
        let key = child.name().value().to_string();
        let values = string_arguments(child);
        if values.is_empty() && key != "install-options" {
            return Err(SunpkgError::ConfigError(format!(
                "'{}' of package '{}' needs a string value",
                key, package.name
            )));
        }
        set_package_field(&mut package, &key, values)?;
    }

    Ok(package)
}

fn set_package_field(package: &mut PackageNode, key: &str, mut values: Vec<String>) -> Result<()> {
    match key {
        "install-options" => {
            package.install_options = Some(values);
            return Ok(());
        }
        "ensure" | "source" | "adminfile" | "responsefile" => {}
        other => {
            return Err(SunpkgError::ConfigError(format!(
                "Unknown setting '{}' for package '{}'",
                other, package.name
            )));
        }
    }

    let value = values.swap_remove(0);
    match key {
        "ensure" => package.ensure = Some(value.parse()?),
        "source" => package.source = Some(value),
        "adminfile" => package.adminfile = Some(PathBuf::from(value)),
        _ => package.responsefile = Some(PathBuf::from(value)),
    }
    Ok(())
}

fn children(node: &KdlNode) -> impl Iterator<Item = &KdlNode> {
    node.children()
        .map(|doc| doc.nodes().iter())
        .into_iter()
        .flatten()
}

fn first_argument(node: &KdlNode) -> Option<&KdlEntry> {
    node.entries().iter().find(|entry| entry.name().is_none())
}

fn required_string(node: &KdlNode) -> Result<String> {
    first_argument(node)
        .and_then(|entry| entry.value().as_string())
        .map(str::to_string)
        .ok_or_else(|| {
            SunpkgError::ConfigError(format!(
                "'{}' needs a string argument",
                node.name().value()
            ))
        })
}

fn string_arguments(node: &KdlNode) -> Vec<String> {
    node.entries()
        .iter()
        .filter(|entry| entry.name().is_none())
        .filter_map(|entry| entry.value().as_string())
        .map(str::to_string)
        .collect()
}
