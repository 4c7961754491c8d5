//! ipsgen CLI - Code generator for insurance product models
//!
//! Commands:
//! - `ipsgen generate` - Generate Java sources for a project
//! - `ipsgen check` - Validate a project and print all messages
//! - `ipsgen export-enum` - Export the values of an enum to an xlsx file
//! - `ipsgen import` - Add a project to a workspace

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

mod check;
mod export;
mod generate;
mod import;
mod logging;

#[derive(Parser)]
#[command(name = "ipsgen")]
#[command(author, version, about = "Code generator for insurance product models", long_about = None)]
struct Cli {
    /// Log level or filter directive (overrides RUST_LOG and the project setting)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate Java sources for a project
    Generate {
        /// Project directory containing ipsproject.toml (default: current directory)
        #[arg(short, long)]
        project: Option<PathBuf>,

        /// Output directory for generated sources
        #[arg(short, long, default_value = "target/generated")]
        output: PathBuf,

        /// Only regenerate what depends on these changed objects
        #[arg(long, num_args = 1..)]
        changed: Vec<String>,
    },

    /// Validate a project and print all messages
    Check {
        /// Project directory containing ipsproject.toml (default: current directory)
        #[arg(short, long)]
        project: Option<PathBuf>,
    },

    /// Export the values of an enum type or enum content to an xlsx file
    ExportEnum {
        /// Project directory containing ipsproject.toml (default: current directory)
        #[arg(short, long)]
        project: Option<PathBuf>,

        /// Qualified name of the enum type or enum content
        #[arg(long = "enum")]
        enum_name: String,

        /// Target xlsx file
        #[arg(short, long)]
        output: PathBuf,

        /// Text written for null values
        #[arg(long, default_value = "")]
        null_repr: String,

        /// Omit the row of attribute names
        #[arg(long)]
        no_header: bool,

        /// Overwrite an existing target file
        #[arg(long)]
        force: bool,
    },

    /// Add an existing project to a workspace
    Import {
        /// Project directory containing ipsproject.toml
        dir: PathBuf,

        /// Copy the project into the workspace instead of referencing it
        #[arg(long)]
        copy: bool,

        /// Workspace directory (default: current directory)
        #[arg(short, long, default_value = ".")]
        workspace: PathBuf,
    },
}

impl Commands {
    fn project_dir(&self) -> Option<&Path> {
        match self {
            Commands::Generate { project, .. }
            | Commands::Check { project }
            | Commands::ExportEnum { project, .. } => {
                Some(project.as_deref().unwrap_or(Path::new(".")))
            }
            Commands::Import { .. } => None,
        }
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    logging::init(cli.log_level.as_deref(), cli.command.project_dir())?;

    let success = match cli.command {
        Commands::Generate {
            project,
            output,
            changed,
        } => generate::run(project, &output, &changed)?,
        Commands::Check { project } => check::run(project)?,
        Commands::ExportEnum {
            project,
            enum_name,
            output,
            null_repr,
            no_header,
            force,
        } => export::run(export::ExportArgs {
            project,
            enum_name,
            output,
            null_representation: null_repr,
            header: !no_header,
            force,
        })?,
        Commands::Import {
            dir,
            copy,
            workspace,
        } => {
            import::run(&dir, copy, &workspace)?;
            true
        }
    };

    Ok(if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Print messages the way every command reports them.
pub(crate) fn print_messages(messages: &ipsgen_core::MessageList) {
    for message in messages.iter() {
        println!("  {message}");
    }
}

pub(crate) fn project_dir(project: Option<PathBuf>) -> PathBuf {
    project.unwrap_or_else(|| PathBuf::from("."))
}
