//! src/hook.rs

use std::fmt;
use std::str::FromStr;

use crate::errors::HuskyConfError;

/// Git hooks husky knows how to bind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookName {
    ApplypatchMsg,
    CommitMsg,
    PostApplypatch,
    PostCheckout,
    PostCommit,
    PostMerge,
    PostReceive,
    PostRewrite,
    PostUpdate,
    PreApplypatch,
    PreAutoGc,
    PreCommit,
    PrePush,
    PreRebase,
    PreReceive,
    PrepareCommitMsg,
    PushToCheckout,
    Update,
}

impl HookName {
    #[cfg(test)]
    pub const ALL: [HookName; 18] = [
        HookName::ApplypatchMsg,
        HookName::CommitMsg,
        HookName::PostApplypatch,
        HookName::PostCheckout,
        HookName::PostCommit,
        HookName::PostMerge,
        HookName::PostReceive,
        HookName::PostRewrite,
        HookName::PostUpdate,
        HookName::PreApplypatch,
        HookName::PreAutoGc,
        HookName::PreCommit,
        HookName::PrePush,
        HookName::PreRebase,
        HookName::PreReceive,
        HookName::PrepareCommitMsg,
        HookName::PushToCheckout,
        HookName::Update,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            HookName::ApplypatchMsg => "applypatch-msg",
            HookName::CommitMsg => "commit-msg",
            HookName::PostApplypatch => "post-applypatch",
            HookName::PostCheckout => "post-checkout",
            HookName::PostCommit => "post-commit",
            HookName::PostMerge => "post-merge",
            HookName::PostReceive => "post-receive",
            HookName::PostRewrite => "post-rewrite",
            HookName::PostUpdate => "post-update",
            HookName::PreApplypatch => "pre-applypatch",
            HookName::PreAutoGc => "pre-auto-gc",
            HookName::PreCommit => "pre-commit",
            HookName::PrePush => "pre-push",
            HookName::PreRebase => "pre-rebase",
            HookName::PreReceive => "pre-receive",
            HookName::PrepareCommitMsg => "prepare-commit-msg",
            HookName::PushToCheckout => "push-to-checkout",
            HookName::Update => "update",
        }
    }

    /// The npm script name bound to this hook: the hook name without dashes.
    pub fn script_key(self) -> String {
        self.as_str().replace('-', "")
    }
}

impl FromStr for HookName {
    type Err = HuskyConfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "applypatch-msg" => Ok(HookName::ApplypatchMsg),
            "commit-msg" => Ok(HookName::CommitMsg),
            "post-applypatch" => Ok(HookName::PostApplypatch),
            "post-checkout" => Ok(HookName::PostCheckout),
            "post-commit" => Ok(HookName::PostCommit),
            "post-merge" => Ok(HookName::PostMerge),
            "post-receive" => Ok(HookName::PostReceive),
            "post-rewrite" => Ok(HookName::PostRewrite),
            "post-update" => Ok(HookName::PostUpdate),
            "pre-applypatch" => Ok(HookName::PreApplypatch),
            "pre-auto-gc" => Ok(HookName::PreAutoGc),
            "pre-commit" => Ok(HookName::PreCommit),
            "pre-push" => Ok(HookName::PrePush),
            "pre-rebase" => Ok(HookName::PreRebase),
            "pre-receive" => Ok(HookName::PreReceive),
            "prepare-commit-msg" => Ok(HookName::PrepareCommitMsg),
            "push-to-checkout" => Ok(HookName::PushToCheckout),
            "update" => Ok(HookName::Update),
            other => Err(HuskyConfError::InvalidHook(other.to_string())),
        }
    }
}

impl fmt::Display for HookName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The command husky runs for `hook`, e.g. `run precommit`.
pub fn resolve_hook_command(hook: HookName) -> String {
    format!("run {}", hook.script_key())
}
