use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "sunpkg",
    about = "Declarative SVR4 package provider",
    long_about = "Query and reconcile Solaris SVR4 packages through pkginfo, pkgadd and pkgrm",
    version,
    next_line_help = false,
    term_width = 80
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalFlags,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Parser, Debug)]
pub struct GlobalFlags {
    /// Verbose output (echo every native command)
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Quiet mode
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Plan changes without running pkgadd or pkgrm
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Output format: table, json or yaml
    #[arg(long, value_name = "FORMAT", global = true)]
    pub format: Option<String>,

    /// Wrap machine output in a versioned envelope (only v1)
    #[arg(long, value_name = "VERSION", global = true)]
    pub output_version: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List every installed package
    List,

    /// Show one package from the installed database or a device
    Query {
        /// Package instance name (e.g. SUNWcurl)
        name: String,

        /// Look the package up on a device or spool directory instead
        #[arg(short = 'd', long, value_name = "DEVICE")]
        device: Option<String>,
    },

    /// Bring a single package to the requested state
    Ensure {
        /// Package instance name
        name: String,

        /// absent, present, latest or an exact version
        state: String,

        /// Package source handed to pkgadd -d
        #[arg(short = 's', long, value_name = "SOURCE")]
        source: Option<String>,

        /// Admin file (pkgadd/pkgrm -a)
        #[arg(long, value_name = "FILE")]
        adminfile: Option<PathBuf>,

        /// Response file (pkgadd -r)
        #[arg(long, value_name = "FILE")]
        responsefile: Option<PathBuf>,

        /// Extra pkgadd flags, shell-quoted (e.g. "-G -M")
        #[arg(long, value_name = "FLAGS", allow_hyphen_values = true)]
        install_options: Option<String>,
    },

    /// Reconcile every package declared in the manifest
    Apply {
        /// Manifest file (default: $SUNPKG_MANIFEST or the config directory)
        #[arg(short = 'm', long, value_name = "PATH")]
        manifest: Option<PathBuf>,

        /// Restrict to these packages
        #[arg(long, value_name = "NAME", num_args = 1..)]
        only: Vec<String>,
    },

    /// Verify the native tools and the manifest
    Check {
        /// Manifest file (default: $SUNPKG_MANIFEST or the config directory)
        #[arg(short = 'm', long, value_name = "PATH")]
        manifest: Option<PathBuf>,
    },

    /// Generate shell completions
    #[command(hide = true)]
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}
