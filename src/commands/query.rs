use crate::commands::OutputMode;
use crate::core::types::PackageRecord;
use crate::error::Result;
use crate::packages::{PackageManager, SunManager};
use crate::ui as output;
use crate::utils::sanitize;
use serde::Serialize;

pub struct QueryOptions {
    pub name: String,
    pub device: Option<String>,
    pub output: OutputMode,
}

#[derive(Debug, Serialize)]
pub struct QueryReport {
    pub name: String,
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<PackageRecord>,
}

pub fn run(options: QueryOptions) -> Result<()> {
    sanitize::validate_package_name(&options.name)?;
    let manager = SunManager::system(super::ambient_tools()?);
    super::require_tools(&manager)?;
    run_with(&manager, &options)
}

pub fn run_with(manager: &dyn PackageManager, options: &QueryOptions) -> Result<()> {
    let report = lookup(manager, &options.name, options.device.as_deref())?;

    if options.output.is_table() {
        display_report(&report);
        return Ok(());
    }
    options.output.emit("query", &report, vec![], vec![])
}

/// `QueryFailed` becomes an error; only a definite answer makes a report.
pub fn lookup(manager: &dyn PackageManager, name: &str, device: Option<&str>) -> Result<QueryReport> {
    let record = manager.info(name, device)?.into_record(name)?;
    Ok(QueryReport {
        name: name.to_string(),
        found: record.is_some(),
        device: device.map(str::to_string),
        record,
    })
}

fn display_report(report: &QueryReport) {
    let Some(record) = &report.record else {
        match &report.device {
            Some(device) => output::info(&format!("{} is not available on {}", report.name, device)),
            None => output::info(&format!("{} is not installed", report.name)),
        }
        return;
    };

    output::header(record.name());
    for (attribute, value) in record.attributes() {
        output::keyval(attribute.as_str(), value);
    }
}
