use crate::core::types::DesiredState;

/// Which optional arguments an operation accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandOptions {
    pub adminfile: bool,
    pub responsefile: bool,
    pub source: bool,
    pub install_options: bool,
}

impl CommandOptions {
    /// `pkgadd` takes every optional argument
    pub const INSTALL: Self = Self {
        adminfile: true,
        responsefile: true,
        source: true,
        install_options: true,
    };

    /// `pkgrm` only takes an admin file
    pub const UNINSTALL: Self = Self {
        adminfile: true,
        responsefile: false,
        source: false,
        install_options: false,
    };
}

/// Build the argument vector for `pkgadd` or `pkgrm`.
///
/// The order is part of the tools' grammar: `-a`, `-r`, `-d`, free-form
/// options, and `-n <name>` last.
pub fn prepare_cmd(desired: &DesiredState, opts: CommandOptions) -> Vec<String> {
    let mut args = Vec::new();

    if opts.adminfile
        && let Some(adminfile) = &desired.adminfile
    {
        args.push("-a".to_string());
        args.push(adminfile.display().to_string());
    }

    if opts.responsefile
        && let Some(responsefile) = &desired.responsefile
    {
        args.push("-r".to_string());
        args.push(responsefile.display().to_string());
    }

    if opts.source
        && let Some(source) = &desired.source
    {
        args.push("-d".to_string());
        args.push(source.clone());
    }

    if opts.install_options {
        args.extend(desired.install_options.iter().cloned());
    }

    args.push("-n".to_string());
    args.push(desired.name.clone());
    args
}
