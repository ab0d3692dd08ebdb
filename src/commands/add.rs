use log::debug;

use crate::errors::Result;
use crate::hook::HookName;
use crate::installer::ensure_hook_runner;
use crate::manifest::Manifest;

use super::{required_hook, Context, Report};

pub async fn handle_add(ctx: &Context, hook: Option<&str>) -> Result<Report> {
    let hook_name = required_hook(hook)?;
    // Reject unknown hooks before anything gets installed.
    hook_name.parse::<HookName>()?;

    let manifest = Manifest::load(&ctx.manifest_path).await?;
    let mut manifest = ensure_hook_runner(manifest, &ctx.config.install, ctx.skip_install).await?;

    let change = ctx.editor().add(&mut manifest, hook_name)?;
    if change.changed {
        manifest.save().await?;
    } else {
        debug!("{} already bound, manifest left as is", change.hook);
    }

    Ok(Report::Success(format!(
        "{} added into husky hooks as well as npm script",
        change.hook
    )))
}
