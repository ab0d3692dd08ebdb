//! src/installer.rs
// Makes sure the hook runner package is declared before hooks get bound to it.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};
use tokio::process::Command;

use crate::config::InstallConfig;
use crate::errors::{HuskyConfError, Result};
use crate::manifest::Manifest;

/// Returns a manifest that declares the hook runner, installing it first when
/// it is missing. The manifest is re-read after an install because the package
/// manager rewrites it.
pub async fn ensure_hook_runner(
    manifest: Manifest,
    install: &InstallConfig,
    skip_install: bool,
) -> Result<Manifest> {
    if manifest.has_dependency(&install.package) {
        debug!("{} already declared in {}", install.package, manifest.path().display());
        return Ok(manifest);
    }
    if skip_install || !install.enabled {
        info!("{} is not declared, installation skipped", install.package);
        return Ok(manifest);
    }

    install_package(install, &project_dir(manifest.path())).await?;
    Manifest::load(manifest.path()).await
}

async fn install_package(install: &InstallConfig, project_dir: &Path) -> Result<()> {
    let install_error = |message: String| HuskyConfError::DependencyInstall {
        package: install.package.clone(),
        message,
    };

    let program = which::which(&install.program)
        .map_err(|e| install_error(format!("`{}` not found: {}", install.program, e)))?;
    debug!(
        "Running {} {} {} in {}",
        program.display(),
        install.args.join(" "),
        install.package,
        project_dir.display()
    );

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(format!("Installing {} ...", install.package));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let output = Command::new(&program)
        .args(&install.args)
        .arg(&install.package)
        .current_dir(project_dir)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await;

    match output {
        Ok(output) if output.status.success() => {
            spinner.finish_with_message(format!("✔ {} successfully installed", install.package));
            Ok(())
        }
        Ok(output) => {
            spinner.finish_with_message("✖ Failed to install");
            let stderr = String::from_utf8_lossy(&output.stderr);
            let detail = stderr
                .lines()
                .rev()
                .find(|line| !line.trim().is_empty())
                .unwrap_or("no output");
            Err(install_error(format!(
                "{} exited with {}: {}",
                install.program, output.status, detail
            )))
        }
        Err(e) => {
            spinner.finish_with_message("✖ Failed to install");
            Err(install_error(e.to_string()))
        }
    }
}

fn project_dir(manifest_path: &Path) -> PathBuf {
    match manifest_path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
