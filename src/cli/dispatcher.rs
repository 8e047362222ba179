//! Command dispatcher
//!
//! Routes CLI commands to their appropriate handlers.

use crate::cli::args::{Cli, Command};
use crate::commands::{self, OutputMode};
use crate::error::{Result, SunpkgError};
use crate::project_identity;
use crate::ui as output;
use crate::utils::machine_output::{CONTRACT_VERSION, Format};

/// Dispatch the parsed CLI command to the appropriate handler
pub fn dispatch(args: &Cli) -> Result<()> {
    let mode = output_mode(args)?;

    match &args.command {
        Some(Command::List) => commands::list::run(commands::list::ListOptions { output: mode }),

        Some(Command::Query { name, device }) => {
            commands::query::run(commands::query::QueryOptions {
                name: name.clone(),
                device: device.clone(),
                output: mode,
            })
        }

        Some(Command::Ensure {
            name,
            state,
            source,
            adminfile,
            responsefile,
            install_options,
        }) => commands::ensure::run(commands::ensure::EnsureOptions {
            name: name.clone(),
            state: state.clone(),
            source: source.clone(),
            adminfile: adminfile.clone(),
            responsefile: responsefile.clone(),
            install_options: install_options.clone(),
            dry_run: args.global.dry_run,
        }),

        Some(Command::Apply { manifest, only }) => {
            commands::apply::run(commands::apply::ApplyOptions {
                manifest: manifest.clone(),
                only: only.clone(),
                dry_run: args.global.dry_run,
                output: mode,
            })
        }

        Some(Command::Check { manifest }) => commands::check::run(commands::check::CheckOptions {
            manifest: manifest.clone(),
        }),

        Some(Command::Completions { shell }) => commands::completions::run(*shell),

        None => {
            output::info("No command provided.");
            output::info("Quick start:");
            output::indent(&format!("{} list", project_identity::BINARY_NAME), 2);
            output::indent(
                &format!(
                    "{} ensure SUNWcurl latest --source /var/spool/pkg",
                    project_identity::BINARY_NAME
                ),
                2,
            );
            output::indent(&format!("{} --dry-run apply", project_identity::BINARY_NAME), 2);
            output::info(&format!(
                "Use `{} --help` for full command list.",
                project_identity::BINARY_NAME
            ));
            Ok(())
        }
    }
}

/// Resolve `--format` / `--output-version` and reject combinations no
/// command can honor.
pub(crate) fn output_mode(args: &Cli) -> Result<OutputMode> {
    let format = Format::parse(args.global.format.as_deref())?;
    let machine_capable = matches!(
        args.command,
        Some(Command::List) | Some(Command::Query { .. }) | Some(Command::Apply { .. })
    );

    if format != Format::Table && !machine_capable {
        return Err(SunpkgError::Other(format!(
            "This command does not support --format {}.\nSupported: `{bin} list`, `{bin} query`, `{bin} apply`.",
            args.global.format.as_deref().unwrap_or_default(),
            bin = project_identity::BINARY_NAME,
        )));
    }

    let Some(version) = args.global.output_version.as_deref() else {
        return Ok(OutputMode {
            format,
            versioned: false,
        });
    };

    if version != CONTRACT_VERSION {
        return Err(SunpkgError::Other(format!(
            "Unsupported output contract version '{}'. Supported: {}",
            version, CONTRACT_VERSION
        )));
    }

    if !machine_capable {
        return Err(SunpkgError::Other(format!(
            "This command does not support --output-version v1.\nSupported: `{bin} list`, `{bin} query`, `{bin} apply`.",
            bin = project_identity::BINARY_NAME,
        )));
    }

    if format == Format::Table {
        output::warning(
            "--output-version v1 is set without --format json|yaml; output remains human-oriented.",
        );
    }

    Ok(OutputMode {
        format,
        versioned: format != Format::Table,
    })
}

#[cfg(test)]
mod tests;
