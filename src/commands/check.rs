use crate::config::loader;
use crate::error::{Result, SunpkgError};
use crate::ui as output;
use std::path::PathBuf;

pub struct CheckOptions {
    pub manifest: Option<PathBuf>,
}

pub fn run(options: CheckOptions) -> Result<()> {
    let path = loader::manifest_path(options.manifest.as_deref())?;

    output::header("Manifest");
    output::keyval("Path", &path.display().to_string());
    let manifest = loader::load_manifest(&path)?;
    output::success(&format!(
        "Syntax OK, {} package(s) declared",
        manifest.packages.len()
    ));

    if output::is_verbose() {
        for package in &manifest.packages {
            let source = package.source.as_deref().unwrap_or("(no source)");
            output::indent(
                &format!("{:<24} {:<12} {}", package.name, package.ensure, source),
                1,
            );
        }
    }

    output::header("Native tools");
    let tools = loader::resolve_tools(Some(&manifest.tools));
    let missing = tools.missing();
    for tool in [&tools.pkginfo, &tools.pkgadd, &tools.pkgrm] {
        if missing.contains(&tool.as_path()) {
            output::warning(&format!("{} not found or not executable", tool.display()));
        } else {
            output::success(&tool.display().to_string());
        }
    }
    output::keyval("Timeout", &format!("{}s", tools.timeout.as_secs()));

    if missing.is_empty() {
        Ok(())
    } else {
        let names: Vec<String> = missing.iter().map(|p| p.display().to_string()).collect();
        Err(SunpkgError::DependencyMissing(names.join(", ")))
    }
}
