//! src/cli.rs
use std::path::PathBuf;

use clap::Parser;

use crate::errors::HuskyConfError;

const EXAMPLES: &str = "\
Commands:
  init     i  Initialize husky
  add      a  Add husky hook
  remove   r  Remove existing husky hook
  version  v  Check version of husky-conf

Examples:
  $ husky-conf init
  $ husky-conf add commit-msg
  $ husky-conf remove commit-msg
  $ husky-conf version";

/// Configure husky git hooks inside package.json
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None, after_help = EXAMPLES)]
pub struct Cli {
    /// init | add | remove | version (or i, a, r, v)
    pub command: Option<String>,

    /// Git hook name for add/remove, e.g. commit-msg
    pub hook: Option<String>,

    /// Path to the manifest, defaults to package.json in the current directory
    #[arg(long, value_name = "PATH")]
    pub manifest: Option<PathBuf>,

    /// Never install husky, even if package.json does not declare it
    #[arg(long)]
    pub no_install: bool,

    /// Anything after the hook name is ignored.
    #[arg(hide = true)]
    pub extra: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Init,
    /// The hook name is validated by the editor, not here.
    Add(Option<String>),
    Remove(Option<String>),
    Version,
}

impl Command {
    pub fn from_args(command: &str, hook: Option<&str>) -> Result<Self, HuskyConfError> {
        let hook = hook.map(str::to_string);
        match command {
            "init" | "i" => Ok(Command::Init),
            "add" | "a" => Ok(Command::Add(hook)),
            "remove" | "r" => Ok(Command::Remove(hook)),
            "version" | "v" => Ok(Command::Version),
            other => Err(HuskyConfError::InvalidCommand(other.to_string())),
        }
    }
}
