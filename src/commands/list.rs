use crate::commands::OutputMode;
use crate::core::types::{Attribute, PackageRecord};
use crate::error::Result;
use crate::packages::{PackageManager, SunManager};
use crate::ui as output;
use colored::Colorize;

/// Options for the list command
pub struct ListOptions {
    pub output: OutputMode,
}

pub fn run(options: ListOptions) -> Result<()> {
    let manager = SunManager::system(super::ambient_tools()?);
    super::require_tools(&manager)?;
    run_with(&manager, &options)
}

pub fn run_with(manager: &dyn PackageManager, options: &ListOptions) -> Result<()> {
    let records = manager.instances()?;

    if options.output.is_table() {
        display_packages(&records);
        return Ok(());
    }
    options.output.emit("list", &records, vec![], vec![])
}

fn display_packages(records: &[PackageRecord]) {
    if records.is_empty() {
        output::info("No packages installed");
        return;
    }

    output::header(&format!("Installed Packages ({})", records.len()));

    for record in records {
        let version = record.version().unwrap_or("-");
        let category = record.get(Attribute::Category).unwrap_or("");
        println!(
            "  {} {:<30} {:<24} {}",
            "✓".green(),
            record.name(),
            version.dimmed(),
            category.bright_black()
        );
    }
}
