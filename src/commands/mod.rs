pub mod add;
pub mod init;
pub mod remove;
pub mod version;

use std::path::{Path, PathBuf};

use colored::Colorize;

use crate::cli::Command;
use crate::config::Config;
use crate::editor::HookEditor;
use crate::errors::{HuskyConfError, Result};

/// Everything a handler needs, resolved once per invocation.
#[derive(Debug, Clone)]
pub struct Context {
    pub config: Config,
    pub manifest_path: PathBuf,
    pub skip_install: bool,
}

impl Context {
    pub fn new(config: Config, cwd: &Path, manifest: Option<&Path>, skip_install: bool) -> Self {
        let manifest_path = config.manifest_path(cwd, manifest);
        Self {
            config,
            manifest_path,
            skip_install,
        }
    }

    pub fn editor(&self) -> HookEditor {
        HookEditor::new(self.config.runner.clone())
    }
}

/// The single line printed once a command has finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report {
    Success(String),
    Info(String),
}

impl Report {
    pub fn print(&self) {
        match self {
            Report::Success(message) => println!("{} {}", "✔".green(), message.green()),
            Report::Info(message) => println!("{} {}", "ℹ".blue(), message),
        }
    }
}

pub fn print_error(error: &HuskyConfError) {
    println!("{} {}", "✖".red(), error.to_string().red());
}

pub async fn dispatch(command: Command, ctx: &Context) -> Result<Report> {
    match command {
        Command::Init => init::handle_init(ctx).await,
        Command::Add(hook) => add::handle_add(ctx, hook.as_deref()).await,
        Command::Remove(hook) => remove::handle_remove(ctx, hook.as_deref()).await,
        Command::Version => Ok(version::handle_version()),
    }
}

/// `add` and `remove` need a hook name; a missing one is an invalid hook.
fn required_hook(hook: Option<&str>) -> Result<&str> {
    hook.ok_or_else(|| HuskyConfError::InvalidHook("no hook name given".to_string()))
}
