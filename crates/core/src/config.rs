//! `hookchain.toml` loading and hook entry normalization
//!
//! ```toml
//! [hooks]
//! pre-commit = [
//!     { command = { program = "cargo", args = ["fmt", "--check"] } },
//! ]
//! commit-msg = ["my-hook", { message-prefix = { prefix = "[ABC-1]" } }]
//! ```
//!
//! Declaration order is execution order, so every map involved keeps
//! insertion order.

use crate::event::HookEvent;
use crate::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name looked up in the repository root
pub const CONFIG_FILE_NAME: &str = "hookchain.toml";

/// Parameters passed to a hook factory
pub type HookParams = serde_json::Map<String, serde_json::Value>;

/// One element of an event's hook list as written in the configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HookEntry {
    /// Bare identifier, resolved without parameters
    Identifier(String),
    /// Identifiers mapped to their parameters, in key order
    Parameterized(IndexMap<String, HookParams>),
}

/// A normalized entry: which hook to build and with which parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookSpec {
    /// Registry identifier
    pub identifier: String,
    /// Parameters for the factory, empty for bare identifiers
    pub params: HookParams,
}

impl HookSpec {
    /// Spec without parameters
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            params: HookParams::new(),
        }
    }

    /// Spec with parameters
    pub fn with_params(identifier: impl Into<String>, params: HookParams) -> Self {
        Self {
            identifier: identifier.into(),
            params,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    #[serde(default)]
    hooks: IndexMap<String, Vec<HookEntry>>,
}

/// Hook lists per git event
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HooksConfig {
    hooks: IndexMap<HookEvent, Vec<HookEntry>>,
    source: Option<PathBuf>,
}

impl HooksConfig {
    /// Empty configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a bare identifier to the hook list of `event`
    #[must_use]
    pub fn with_hook(mut self, event: HookEvent, identifier: impl Into<String>) -> Self {
        self.hooks
            .entry(event)
            .or_default()
            .push(HookEntry::Identifier(identifier.into()));
        self
    }

    /// Append a parameterized identifier to the hook list of `event`
    #[must_use]
    pub fn with_hook_params(
        mut self,
        event: HookEvent,
        identifier: impl Into<String>,
        params: HookParams,
    ) -> Self {
        let mut entry = IndexMap::new();
        entry.insert(identifier.into(), params);
        self.hooks
            .entry(event)
            .or_default()
            .push(HookEntry::Parameterized(entry));
        self
    }

    /// Read and validate a configuration file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid TOML of the
    /// expected shape, or names an unknown event.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| Error::io(e, Some(path.to_path_buf()), "read configuration"))?;
        let mut config = Self::parse(&content, path)?;
        config.source = Some(path.to_path_buf());
        debug!(path = %path.display(), events = config.hooks.len(), "Loaded hook configuration");
        Ok(config)
    }

    /// Parse configuration text
    ///
    /// # Errors
    ///
    /// Same as [`load`](Self::load), minus file access.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Self::parse(content, Path::new(CONFIG_FILE_NAME))
    }

    fn parse(content: &str, path: &Path) -> Result<Self> {
        let raw: RawConfig = toml::from_str(content).map_err(|e| Error::ConfigParse {
            path: path.to_path_buf(),
            message: e.message().to_string(),
        })?;

        let mut hooks = IndexMap::with_capacity(raw.hooks.len());
        for (name, entries) in raw.hooks {
            let event: HookEvent = name.parse()?;
            let has_empty_table = entries
                .iter()
                .any(|entry| matches!(entry, HookEntry::Parameterized(table) if table.is_empty()));
            if has_empty_table {
                return Err(Error::configuration(format!(
                    "{event} contains an empty hook table"
                )));
            }
            hooks.insert(event, entries);
        }

        Ok(Self {
            hooks,
            source: None,
        })
    }

    /// The file this configuration was loaded from
    #[must_use]
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Events with a hook list, in declaration order
    pub fn events(&self) -> impl Iterator<Item = HookEvent> + '_ {
        self.hooks.keys().copied()
    }

    /// Raw entries for `event`
    #[must_use]
    pub fn entries(&self, event: HookEvent) -> &[HookEntry] {
        self.hooks.get(&event).map_or(&[], Vec::as_slice)
    }

    /// Normalize the entries of `event` into a flat, ordered spec list.
    ///
    /// `["A", { B = { param = 1 } }]` becomes `[("A", {}), ("B", {"param": 1})]`.
    #[must_use]
    pub fn registered_hooks(&self, event: HookEvent) -> Vec<HookSpec> {
        let mut specs = Vec::new();
        for entry in self.entries(event) {
            match entry {
                HookEntry::Identifier(identifier) => {
                    specs.push(HookSpec::new(identifier.clone()));
                }
                HookEntry::Parameterized(table) => {
                    specs.extend(table.iter().map(|(identifier, params)| {
                        HookSpec::with_params(identifier.clone(), params.clone())
                    }));
                }
            }
        }
        specs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn params(value: serde_json::Value) -> HookParams {
        match value {
            serde_json::Value::Object(map) => map,
            other => panic!("expected an object, got {other}"),
        }
    }

    #[test]
    fn test_normalization_preserves_order_and_params() {
        let config = HooksConfig::from_toml_str(
            r#"
[hooks]
pre-commit = ["A", { B = { param = 1 } }]
"#,
        )
        .unwrap();

        assert_eq!(
            config.registered_hooks(HookEvent::PreCommit),
            vec![
                HookSpec::new("A"),
                HookSpec::with_params("B", params(json!({ "param": 1 }))),
            ]
        );
    }

    #[test]
    fn test_multi_key_table_expands_in_key_order() {
        let config = HooksConfig::from_toml_str(
            r#"
[hooks]
commit-msg = [{ zeta = {}, alpha = { x = "y" } }, "last"]
"#,
        )
        .unwrap();

        let identifiers: Vec<_> = config
            .registered_hooks(HookEvent::CommitMsg)
            .into_iter()
            .map(|spec| spec.identifier)
            .collect();
        assert_eq!(identifiers, vec!["zeta", "alpha", "last"]);
    }

    #[test]
    fn test_events_keep_declaration_order() {
        let config = HooksConfig::from_toml_str(
            r#"
[hooks]
pre-push = []
commit-msg = ["a"]
pre-commit = ["b"]
"#,
        )
        .unwrap();

        assert_eq!(
            config.events().collect::<Vec<_>>(),
            vec![HookEvent::PrePush, HookEvent::CommitMsg, HookEvent::PreCommit]
        );
    }

    #[test]
    fn test_missing_event_has_no_hooks() {
        let config = HooksConfig::from_toml_str("").unwrap();
        assert!(config.registered_hooks(HookEvent::PostMerge).is_empty());
        assert!(config.entries(HookEvent::PostMerge).is_empty());
    }

    #[test]
    fn test_unknown_event_is_rejected() {
        let err = HooksConfig::from_toml_str("[hooks]\npre-comit = [\"a\"]\n").unwrap_err();
        assert!(matches!(err, Error::UnknownEvent { name } if name == "pre-comit"));
    }

    #[test]
    fn test_invalid_shape_is_parse_error() {
        let err = HooksConfig::from_toml_str("[hooks]\npre-commit = \"a\"\n").unwrap_err();
        assert!(matches!(err, Error::ConfigParse { .. }));

        let err = HooksConfig::from_toml_str("[settings]\nx = 1\n").unwrap_err();
        assert!(matches!(err, Error::ConfigParse { .. }));
    }

    #[test]
    fn test_empty_table_entry_is_rejected() {
        let err = HooksConfig::from_toml_str("[hooks]\npre-commit = [{}]\n").unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
    }

    #[test]
    fn test_builder_matches_parsed_config() {
        let built = HooksConfig::new()
            .with_hook(HookEvent::PreCommit, "A")
            .with_hook_params(HookEvent::PreCommit, "B", params(json!({ "param": 1 })));

        assert_eq!(
            built.registered_hooks(HookEvent::PreCommit),
            vec![
                HookSpec::new("A"),
                HookSpec::with_params("B", params(json!({ "param": 1 }))),
            ]
        );
    }

    #[test]
    fn test_load_records_source() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "[hooks]\npre-commit = [\"a\"]\n").unwrap();

        let config = HooksConfig::load(&path).unwrap();
        assert_eq!(config.source(), Some(path.as_path()));
        assert_eq!(config.registered_hooks(HookEvent::PreCommit).len(), 1);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let err = HooksConfig::load(temp_dir.path().join(CONFIG_FILE_NAME)).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
