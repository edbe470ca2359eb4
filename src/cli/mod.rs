// CLI module for command-line interface

pub mod download;
pub mod install;

use std::path::PathBuf;
use clap::{Parser, Subcommand};
use crate::utils::config::ConfigParser;
use crate::utils::error::{Result, VsixError};

use self::download::DownloadCommand;
use self::install::InstallCommand;

/// Main CLI structure
#[derive(Parser)]
#[command(name = "vsix")]
#[command(about = "Back up installed editor extensions as .vsix files and restore them")]
#[command(long_about = r#"vsix backs up the extensions installed in your editor by downloading
their .vsix packages from the public marketplace, and installs them back
from a local directory.

Examples:
  vsix download                       Back up every installed extension
  vsix download -o ~/vsix-backup      Choose the backup directory
  vsix install --list                 Show the packages available to install
  vsix install --install-all          Install every package in vsix_files/
  vsix install -e prettier            Install packages matching 'prettier'

Settings can be stored in ~/.config/vsix-backup/config.toml:
  editor = "codium"
  timeout_secs = 120"#)]
#[command(version)]
pub struct Cli {
    /// Path to a config.toml (default: <config dir>/vsix-backup/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Editor command used to list and install extensions (default: code)
    #[arg(long, global = true, env = "VSIX_EDITOR")]
    pub editor: Option<String>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// All available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Download .vsix packages for installed extensions
    #[command(long_about = r#"Back up installed extensions into .vsix files.

Installed extensions are read from the editor CLI (`code --list-extensions`),
or from an extensions directory with --extensions-dir. Each one is looked
up on the marketplace and its newest package is saved as
<output-dir>/<publisher>.<name>.vsix. Extensions that cannot be downloaded
are reported and skipped.

Examples:
  vsix download                                 Back up everything
  vsix download -e ~/.vscode/extensions         Read extensions from disk
  vsix download --extension golang.go           Back up a single extension
  vsix download --skip-existing --json          Incremental run, JSON report"#)]
    Download {
        /// Directory to save .vsix files (default: vsix_files)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
        /// Read installed extensions from this directory instead of the editor CLI
        #[arg(short, long)]
        extensions_dir: Option<PathBuf>,
        /// Only back up these extensions (publisher.name)
        #[arg(long = "extension", value_name = "ID")]
        extensions: Vec<String>,
        /// Skip extensions whose .vsix file already exists
        #[arg(long)]
        skip_existing: bool,
        /// Marketplace base URL
        #[arg(long, env = "VSIX_MARKETPLACE_URL")]
        marketplace_url: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Install extensions from .vsix files
    #[command(long_about = r#"Install extensions from the .vsix files in a directory.

Nothing is installed unless --install-all or --extension is given.

Examples:
  vsix install --list                 List available packages
  vsix install --install-all          Install every package
  vsix install -e ms-python           Install packages whose name contains 'ms-python'
  vsix install -d backup -a --json    Install from 'backup', JSON report"#)]
    Install {
        /// Directory containing .vsix files (default: vsix_files)
        #[arg(short = 'd', long)]
        vsix_dir: Option<PathBuf>,
        /// Install packages whose name contains this text (e.g. "publisher.name")
        #[arg(short, long)]
        extension: Option<String>,
        /// Install all .vsix files in the directory
        #[arg(short = 'a', long)]
        install_all: bool,
        /// List available .vsix files without installing
        #[arg(short, long)]
        list: bool,
        /// Do not pass --force to the editor
        #[arg(long)]
        no_force: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// CLI command dispatcher
pub struct CliDispatcher;

impl CliDispatcher {
    /// Resolve settings and execute a CLI command
    pub async fn execute(cli: Cli) -> Result<()> {
        let settings = ConfigParser::resolve_settings(cli.config.as_deref())?;

        match cli.command {
            Commands::Download {
                output_dir,
                extensions_dir,
                extensions,
                skip_existing,
                marketplace_url,
                json,
            } => {
                let settings = settings.with_overrides(cli.editor, marketplace_url);
                settings.validate().map_err(VsixError::ConfigError)?;

                let cmd = DownloadCommand {
                    output_dir,
                    extensions_dir,
                    extensions,
                    skip_existing,
                    json,
                };
                cmd.run(&settings).await
            }

            Commands::Install {
                vsix_dir,
                extension,
                install_all,
                list,
                no_force,
                json,
            } => {
                let settings = settings.with_overrides(cli.editor, None);
                settings.validate().map_err(VsixError::ConfigError)?;

                let cmd = InstallCommand {
                    vsix_dir,
                    extension,
                    install_all,
                    list,
                    no_force,
                    json,
                };
                cmd.run(&settings)
            }
        }
    }
}
