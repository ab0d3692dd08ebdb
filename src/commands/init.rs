use crate::editor::InitOutcome;
use crate::errors::Result;
use crate::installer::ensure_hook_runner;
use crate::manifest::Manifest;

use super::{Context, Report};

pub async fn handle_init(ctx: &Context) -> Result<Report> {
    let manifest = Manifest::load(&ctx.manifest_path).await?;
    let mut manifest = ensure_hook_runner(manifest, &ctx.config.install, ctx.skip_install).await?;

    match ctx.editor().init(&mut manifest)? {
        InitOutcome::AlreadyConfigured => Ok(Report::Info("Husky already exists".to_string())),
        InitOutcome::Configured => {
            manifest.save().await?;
            Ok(Report::Success("Husky setup completed".to_string()))
        }
    }
}
