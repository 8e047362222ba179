use crate::error::{Result, SunpkgError};
use chrono::Utc;
use serde::Serialize;

pub const CONTRACT_VERSION: &str = "v1";

#[derive(Debug, Serialize)]
pub struct MachineEnvelope<T>
where
    T: Serialize,
{
    pub version: String,
    pub command: String,
    pub ok: bool,
    pub data: T,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
    pub meta: MachineMeta,
}

#[derive(Debug, Serialize)]
pub struct MachineMeta {
    pub generated_at: String,
    pub provider: String,
}

/// Output flavors shared by the listing commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Table,
    Json,
    Yaml,
}

impl Format {
    pub fn parse(value: Option<&str>) -> Result<Self> {
        match value.unwrap_or("table") {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            "yaml" => Ok(Self::Yaml),
            other => Err(SunpkgError::Other(format!(
                "Unknown output format '{}'. Use table, json or yaml.",
                other
            ))),
        }
    }
}

pub fn envelope<T>(
    command: &str,
    data: T,
    warnings: Vec<String>,
    errors: Vec<String>,
) -> MachineEnvelope<T>
where
    T: Serialize,
{
    MachineEnvelope {
        version: CONTRACT_VERSION.to_string(),
        command: command.to_string(),
        ok: errors.is_empty(),
        data,
        warnings,
        errors,
        meta: MachineMeta {
            generated_at: Utc::now().to_rfc3339(),
            provider: crate::project_identity::PROVIDER_NAME.to_string(),
        },
    }
}

/// Serialize `value` as JSON or YAML; tables are the caller's job.
pub fn render<T>(value: &T, format: Format) -> Result<Option<String>>
where
    T: Serialize,
{
    Ok(match format {
        Format::Json => Some(serde_json::to_string_pretty(value)?),
        Format::Yaml => Some(serde_yml::to_string(value)?),
        Format::Table => None,
    })
}

pub fn emit_v1<T>(
    command: &str,
    data: T,
    warnings: Vec<String>,
    errors: Vec<String>,
    format: Format,
) -> Result<()>
where
    T: Serialize,
{
    if let Some(out) = render(&envelope(command, data, warnings, errors), format)? {
        println!("{}", out);
    }
    Ok(())
}
