//! src/editor.rs
//!
//! The three manifest transformations behind `init`, `add` and `remove`.
//! Each one validates everything it needs up front, so an error never leaves
//! the manifest half-edited.

use log::debug;
use serde_json::{Map, Value};

use crate::errors::{HuskyConfError, Result};
use crate::hook::{resolve_hook_command, HookName};
use crate::manifest::{Manifest, HOOKS_KEY, HUSKY_KEY, SCRIPTS_KEY};

/// The `test` script npm writes when `npm init` gets no test command.
pub const DEFAULT_TEST_SCRIPT: &str = "echo 'Error: no test specified' && exit 1";

const TEST_SCRIPT_KEY: &str = "test";
const RUN_TEST: &str = "run test";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    Configured,
    AlreadyConfigured,
}

/// What `add` or `remove` did to the manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HookChange {
    pub hook: HookName,
    pub changed: bool,
}

#[derive(Debug, Clone, Default)]
pub struct HookEditor {
    /// Package manager placed in front of generated commands, e.g. `npm`.
    runner: Option<String>,
}

impl HookEditor {
    pub fn new(runner: Option<String>) -> Self {
        let runner = runner
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty());
        Self { runner }
    }

    pub fn init(&self, manifest: &mut Manifest) -> Result<InitOutcome> {
        if manifest.root().contains_key(HUSKY_KEY) {
            debug!("`{HUSKY_KEY}` already present, leaving manifest untouched");
            return Ok(InitOutcome::AlreadyConfigured);
        }
        let root = manifest.root_mut();
        check_object(root.get(SCRIPTS_KEY), SCRIPTS_KEY)?;

        let run_test = self.command(RUN_TEST);
        let scripts = section_mut(root, SCRIPTS_KEY)?;
        ensure_test_script(scripts);
        let precommit = HookName::PreCommit.script_key();
        if !scripts.contains_key(&precommit) {
            scripts.insert(precommit, Value::String(run_test));
        }

        let mut hooks = Map::new();
        hooks.insert(
            HookName::PreCommit.as_str().to_string(),
            Value::String(self.hook_command(HookName::PreCommit)),
        );
        let mut husky = Map::new();
        husky.insert(HOOKS_KEY.to_string(), Value::Object(hooks));
        root.insert(HUSKY_KEY.to_string(), Value::Object(husky));

        Ok(InitOutcome::Configured)
    }

    pub fn add(&self, manifest: &mut Manifest, hook_name: &str) -> Result<HookChange> {
        let hook: HookName = hook_name.parse()?;
        let root = manifest.root_mut();
        validate_sections(root)?;

        let mut changed = false;

        let scripts = section_mut(root, SCRIPTS_KEY)?;
        changed |= ensure_test_script(scripts);
        changed |= set_string(scripts, hook.script_key(), self.command(RUN_TEST));

        let husky = section_mut(root, HUSKY_KEY)?;
        let hooks = section_mut(husky, HOOKS_KEY)?;
        changed |= set_string(hooks, hook.as_str().to_string(), self.hook_command(hook));

        debug!("add {hook}: changed = {changed}");
        Ok(HookChange { hook, changed })
    }

    pub fn remove(&self, manifest: &mut Manifest, hook_name: &str) -> Result<HookChange> {
        let hook: HookName = hook_name.parse()?;
        let root = manifest.root_mut();
        validate_sections(root)?;

        let mut changed = false;

        if let Some(hooks) = root
            .get_mut(HUSKY_KEY)
            .and_then(Value::as_object_mut)
            .and_then(|husky| husky.get_mut(HOOKS_KEY))
            .and_then(Value::as_object_mut)
        {
            changed |= hooks.shift_remove(hook.as_str()).is_some();
        }

        if let Some(scripts) = root.get_mut(SCRIPTS_KEY).and_then(Value::as_object_mut) {
            changed |= scripts.shift_remove(&hook.script_key()).is_some();
        }

        debug!("remove {hook}: changed = {changed}");
        Ok(HookChange { hook, changed })
    }

    fn command(&self, command: &str) -> String {
        match &self.runner {
            Some(runner) => format!("{runner} {command}"),
            None => command.to_string(),
        }
    }

    fn hook_command(&self, hook: HookName) -> String {
        self.command(&resolve_hook_command(hook))
    }
}

/// Inserts the npm default `test` script when none exists. Returns whether it did.
fn ensure_test_script(scripts: &mut Map<String, Value>) -> bool {
    if scripts.contains_key(TEST_SCRIPT_KEY) {
        return false;
    }
    scripts.insert(
        TEST_SCRIPT_KEY.to_string(),
        Value::String(DEFAULT_TEST_SCRIPT.to_string()),
    );
    true
}

fn set_string(map: &mut Map<String, Value>, key: String, value: String) -> bool {
    let value = Value::String(value);
    match map.get(&key) {
        Some(existing) if *existing == value => false,
        _ => {
            map.insert(key, value);
            true
        }
    }
}

fn section_mut<'a>(parent: &'a mut Map<String, Value>, key: &str) -> Result<&'a mut Map<String, Value>> {
    parent
        .entry(key.to_string())
        .or_insert_with(|| Value::Object(Map::new()))
        .as_object_mut()
        .ok_or_else(|| not_an_object(key))
}

fn validate_sections(root: &Map<String, Value>) -> Result<()> {
    check_object(root.get(SCRIPTS_KEY), SCRIPTS_KEY)?;
    let husky = root.get(HUSKY_KEY);
    check_object(husky, HUSKY_KEY)?;
    check_object(
        husky.and_then(|h| h.get(HOOKS_KEY)),
        &format!("{HUSKY_KEY}.{HOOKS_KEY}"),
    )
}

fn check_object(value: Option<&Value>, name: &str) -> Result<()> {
    match value {
        None | Some(Value::Object(_)) => Ok(()),
        Some(_) => Err(not_an_object(name)),
    }
}

fn not_an_object(name: &str) -> HuskyConfError {
    HuskyConfError::InvalidManifest(format!("`{name}` is not a JSON object"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn manifest(value: Value) -> Manifest {
        match value {
            Value::Object(root) => Manifest::new("package.json", root),
            _ => panic!("manifest must be an object"),
        }
    }

    fn root(manifest: &Manifest) -> Value {
        Value::Object(manifest.root().clone())
    }

    #[test]
    fn init_on_empty_manifest() {
        let mut m = manifest(json!({}));
        let outcome = HookEditor::default().init(&mut m).unwrap();

        assert_eq!(outcome, InitOutcome::Configured);
        assert_eq!(
            root(&m),
            json!({
                "scripts": {
                    "test": "echo 'Error: no test specified' && exit 1",
                    "precommit": "run test"
                },
                "husky": { "hooks": { "pre-commit": "run precommit" } }
            })
        );
    }

    #[test]
    fn init_keeps_existing_scripts() {
        let mut m = manifest(json!({
            "name": "demo",
            "scripts": { "test": "jest", "precommit": "lint-staged" }
        }));
        HookEditor::default().init(&mut m).unwrap();

        assert_eq!(m.root()["scripts"], json!({ "test": "jest", "precommit": "lint-staged" }));
        assert_eq!(m.root()["husky"]["hooks"]["pre-commit"], "run precommit");
        let keys: Vec<&str> = m.root().keys().map(String::as_str).collect();
        assert_eq!(keys, ["name", "scripts", "husky"]);
    }

    #[test]
    fn init_does_not_touch_existing_husky_section() {
        let original = json!({
            "scripts": { "test": "jest" },
            "husky": { "hooks": { "pre-push": "run prepush" } }
        });
        let mut m = manifest(original.clone());
        let outcome = HookEditor::default().init(&mut m).unwrap();

        assert_eq!(outcome, InitOutcome::AlreadyConfigured);
        assert_eq!(root(&m), original);
    }

    #[test]
    fn add_merges_into_existing_scripts() {
        let mut m = manifest(json!({ "scripts": { "test": "jest" } }));
        let change = HookEditor::default().add(&mut m, "pre-push").unwrap();

        assert_eq!(change, HookChange { hook: HookName::PrePush, changed: true });
        assert_eq!(
            root(&m),
            json!({
                "scripts": { "test": "jest", "prepush": "run test" },
                "husky": { "hooks": { "pre-push": "run prepush" } }
            })
        );
    }

    #[test]
    fn add_without_scripts_seeds_default_test() {
        let mut m = manifest(json!({ "name": "demo" }));
        HookEditor::default().add(&mut m, "commit-msg").unwrap();

        assert_eq!(
            m.root()["scripts"],
            json!({
                "test": DEFAULT_TEST_SCRIPT,
                "commitmsg": "run test"
            })
        );
        assert_eq!(m.root()["husky"], json!({ "hooks": { "commit-msg": "run commitmsg" } }));
    }

    #[test]
    fn add_keeps_other_husky_settings() {
        let mut m = manifest(json!({
            "scripts": { "test": "jest" },
            "husky": { "skipCI": true }
        }));
        HookEditor::default().add(&mut m, "post-merge").unwrap();

        assert_eq!(
            m.root()["husky"],
            json!({ "skipCI": true, "hooks": { "post-merge": "run postmerge" } })
        );
    }

    #[test]
    fn add_is_idempotent() {
        let editor = HookEditor::default();
        let mut once = manifest(json!({ "scripts": { "test": "jest" } }));
        editor.add(&mut once, "pre-rebase").unwrap();

        let mut twice = once.clone();
        let change = editor.add(&mut twice, "pre-rebase").unwrap();

        assert!(!change.changed);
        assert_eq!(once, twice);
    }

    #[test]
    fn add_overwrites_customised_entries() {
        let mut m = manifest(json!({
            "scripts": { "test": "jest", "prepush": "npm run lint" },
            "husky": { "hooks": { "pre-push": "echo hi" } }
        }));
        let change = HookEditor::default().add(&mut m, "pre-push").unwrap();

        assert!(change.changed);
        assert_eq!(m.root()["scripts"]["prepush"], "run test");
        assert_eq!(m.root()["husky"]["hooks"]["pre-push"], "run prepush");
    }

    #[test]
    fn add_then_remove_round_trips() {
        let original = json!({
            "scripts": { "test": "jest", "build": "tsc" },
            "husky": { "hooks": { "pre-commit": "run precommit" } }
        });
        let editor = HookEditor::default();
        for hook in HookName::ALL {
            if hook == HookName::PreCommit {
                continue;
            }
            let mut m = manifest(original.clone());
            editor.add(&mut m, hook.as_str()).unwrap();
            assert_ne!(root(&m), original);
            editor.remove(&mut m, hook.as_str()).unwrap();
            assert_eq!(root(&m), original, "round trip failed for {hook}");
        }
    }

    #[test]
    fn remove_drops_hook_and_script() {
        let mut m = manifest(json!({
            "scripts": { "test": "jest", "precommit": "run test", "prepush": "run test" },
            "husky": { "hooks": { "pre-commit": "run precommit", "pre-push": "run prepush" } }
        }));
        let change = HookEditor::default().remove(&mut m, "pre-push").unwrap();

        assert!(change.changed);
        assert_eq!(
            root(&m),
            json!({
                "scripts": { "test": "jest", "precommit": "run test" },
                "husky": { "hooks": { "pre-commit": "run precommit" } }
            })
        );
    }

    #[test]
    fn remove_preserves_order_of_remaining_entries() {
        let mut m = manifest(json!({
            "scripts": { "a": "1", "postmerge": "run test", "b": "2", "c": "3" }
        }));
        HookEditor::default().remove(&mut m, "post-merge").unwrap();

        let keys: Vec<&str> = m.root()["scripts"]
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, ["a", "b", "c"]);
    }

    #[test]
    fn remove_of_absent_hook_is_not_an_error() {
        let original = json!({ "name": "demo" });
        let mut m = manifest(original.clone());
        let change = HookEditor::default().remove(&mut m, "pre-push").unwrap();

        assert!(!change.changed);
        assert_eq!(root(&m), original);
    }

    #[test]
    fn unknown_hook_leaves_manifest_untouched() {
        let original = json!({ "scripts": { "test": "jest" } });
        let editor = HookEditor::default();
        let mut m = manifest(original.clone());

        assert!(matches!(
            editor.add(&mut m, "not-a-hook"),
            Err(HuskyConfError::InvalidHook(_))
        ));
        assert!(matches!(
            editor.remove(&mut m, "not-a-hook"),
            Err(HuskyConfError::InvalidHook(_))
        ));
        assert_eq!(root(&m), original);
    }

    #[test]
    fn malformed_sections_are_rejected_without_mutation() {
        let editor = HookEditor::default();
        let cases = [
            json!({ "scripts": "jest" }),
            json!({ "scripts": { "test": "jest" }, "husky": true }),
            json!({ "scripts": { "test": "jest" }, "husky": { "hooks": ["pre-commit"] } }),
        ];
        for original in cases {
            let mut m = manifest(original.clone());
            assert!(matches!(
                editor.add(&mut m, "pre-commit"),
                Err(HuskyConfError::InvalidManifest(_))
            ));
            assert!(matches!(
                editor.remove(&mut m, "pre-commit"),
                Err(HuskyConfError::InvalidManifest(_))
            ));
            assert_eq!(root(&m), original);
        }

        let mut m = manifest(json!({ "scripts": 3 }));
        assert!(matches!(editor.init(&mut m), Err(HuskyConfError::InvalidManifest(_))));
        assert_eq!(root(&m), json!({ "scripts": 3 }));
    }

    #[test]
    fn runner_prefixes_generated_commands() {
        let editor = HookEditor::new(Some("npm".to_string()));
        let mut m = manifest(json!({}));
        editor.init(&mut m).unwrap();
        editor.add(&mut m, "pre-push").unwrap();

        assert_eq!(
            root(&m),
            json!({
                "scripts": {
                    "test": DEFAULT_TEST_SCRIPT,
                    "precommit": "npm run test",
                    "prepush": "npm run test"
                },
                "husky": {
                    "hooks": {
                        "pre-commit": "npm run precommit",
                        "pre-push": "npm run prepush"
                    }
                }
            })
        );
    }

    #[test]
    fn blank_runner_is_ignored() {
        let mut m = manifest(json!({ "scripts": { "test": "jest" } }));
        HookEditor::new(Some("  ".to_string())).add(&mut m, "update").unwrap();
        assert_eq!(m.root()["husky"]["hooks"]["update"], "run update");
    }
}
