use crate::errors::Result;
use crate::hook::HookName;
use crate::manifest::Manifest;

use super::{required_hook, Context, Report};

pub async fn handle_remove(ctx: &Context, hook: Option<&str>) -> Result<Report> {
    let hook_name = required_hook(hook)?;
    hook_name.parse::<HookName>()?;

    let mut manifest = Manifest::load(&ctx.manifest_path).await?;

    let change = ctx.editor().remove(&mut manifest, hook_name)?;
    if !change.changed {
        return Ok(Report::Info(format!(
            "{} is not configured, nothing to remove",
            change.hook
        )));
    }

    manifest.save().await?;
    Ok(Report::Success(format!(
        "{} removed from husky hooks as well as npm script",
        change.hook
    )))
}
