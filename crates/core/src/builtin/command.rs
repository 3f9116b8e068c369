//! Run an external program as a hook

use super::{COMMAND, parse_params};
use crate::config::HookParams;
use crate::hook::Hook;
use crate::payload::{CommitMessage, HookContext};
use crate::pipeline::Next;
use crate::{Error, Result};
use serde::Deserialize;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use tracing::debug;

/// Environment a payload exposes to external commands
pub trait CommandEnv {
    /// Variables set on the spawned process
    fn command_env(&self) -> Vec<(&'static str, String)>;
}

impl CommandEnv for HookContext {
    fn command_env(&self) -> Vec<(&'static str, String)> {
        vec![
            ("HOOKCHAIN_EVENT", self.event().to_string()),
            ("HOOKCHAIN_ARGS", self.args().join(" ")),
        ]
    }
}

impl CommandEnv for CommitMessage {
    fn command_env(&self) -> Vec<(&'static str, String)> {
        let mut env = vec![("HOOKCHAIN_MESSAGE", self.message().to_string())];
        if let Some(file) = self.file() {
            env.push(("HOOKCHAIN_MESSAGE_FILE", file.display().to_string()));
        }
        env
    }
}

/// Parameters of the `command` hook
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommandSpec {
    /// Program to run, looked up on `PATH`
    pub program: String,
    /// Arguments passed to the program
    #[serde(default)]
    pub args: Vec<String>,
    /// Name shown in the status line
    #[serde(default)]
    pub name: Option<String>,
    /// Working directory, defaults to the current one
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

/// Runs a program; a non-zero exit fails the hook
#[derive(Debug, Clone)]
pub struct CommandHook {
    name: String,
    spec: CommandSpec,
}

impl CommandHook {
    /// Hook running `program` with `args`
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self::from_spec(CommandSpec {
            program: program.into(),
            args,
            name: None,
            dir: None,
        })
    }

    /// Hook described by a parameter table
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameters`] if `program` is missing or empty,
    /// or the table has unknown keys.
    pub fn from_params(params: &HookParams) -> Result<Self> {
        let spec: CommandSpec = parse_params(COMMAND, params)?;
        if spec.program.trim().is_empty() {
            return Err(Error::invalid_parameters(COMMAND, "'program' must not be empty"));
        }
        Ok(Self::from_spec(spec))
    }

    fn from_spec(spec: CommandSpec) -> Self {
        let name = spec.name.clone().unwrap_or_else(|| {
            std::iter::once(spec.program.as_str())
                .chain(spec.args.iter().map(String::as_str))
                .collect::<Vec<_>>()
                .join(" ")
        });
        Self { name, spec }
    }

    /// The parsed parameters
    #[must_use]
    pub const fn spec(&self) -> &CommandSpec {
        &self.spec
    }

    fn execute(&self, env: Vec<(&'static str, String)>) -> Result<()> {
        let mut command = Command::new(&self.spec.program);
        command
            .args(&self.spec.args)
            .envs(env)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = &self.spec.dir {
            command.current_dir(dir);
        }

        debug!(program = %self.spec.program, args = ?self.spec.args, "Running hook command");
        let output = command.output().map_err(|e| {
            Error::execution(
                &self.name,
                format!("failed to start '{}': {e}", self.spec.program),
            )
        })?;

        if output.status.success() {
            return Ok(());
        }

        let status = output
            .status
            .code()
            .map_or_else(|| "a signal".to_string(), |code| format!("status {code}"));
        let mut message = format!("'{}' exited with {status}", self.spec.program);
        for stream in [&output.stdout, &output.stderr] {
            let text = String::from_utf8_lossy(stream);
            let text = text.trim();
            if !text.is_empty() {
                message.push('\n');
                message.push_str(text);
            }
        }
        Err(Error::execution(&self.name, message))
    }
}

impl<P: CommandEnv> Hook<P> for CommandHook {
    fn name(&self) -> &str {
        &self.name
    }

    fn handle(&self, payload: P, next: Next<'_, P>) -> Result<P> {
        self.execute(payload.command_env())?;
        next.run(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::HookEvent;
    use crate::pipeline::Pipeline;
    use serde_json::json;

    fn params(value: serde_json::Value) -> HookParams {
        let serde_json::Value::Object(map) = value else {
            unreachable!()
        };
        map
    }

    fn context() -> HookContext {
        HookContext::new(HookEvent::PreCommit, Vec::new())
    }

    #[test]
    fn test_from_params_defaults() {
        let hook = CommandHook::from_params(&params(json!({
            "program": "cargo",
            "args": ["fmt", "--check"],
        })))
        .unwrap();

        assert_eq!(Hook::<HookContext>::name(&hook), "cargo fmt --check");
        assert_eq!(hook.spec().dir, None);
    }

    #[test]
    fn test_from_params_custom_name() {
        let hook =
            CommandHook::from_params(&params(json!({ "program": "cargo", "name": "Rustfmt" })))
                .unwrap();
        assert_eq!(Hook::<HookContext>::name(&hook), "Rustfmt");
    }

    #[test]
    fn test_from_params_rejects_bad_tables() {
        let err = CommandHook::from_params(&params(json!({ "args": ["x"] }))).unwrap_err();
        assert!(matches!(err, Error::InvalidParameters { .. }));

        let err = CommandHook::from_params(&params(json!({ "program": " " }))).unwrap_err();
        assert!(matches!(err, Error::InvalidParameters { .. }));

        let err = CommandHook::from_params(&params(json!({ "program": "x", "shell": true })))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidParameters { .. }));
    }

    #[test]
    fn test_missing_program_fails_hook() {
        let mut pipeline = Pipeline::default();
        pipeline.push(CommandHook::new("hookchain-definitely-missing-program", Vec::new()));

        let err = pipeline.run(context(), &mut ()).unwrap_err();
        assert!(matches!(err, Error::Execution { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_successful_command_continues() {
        let mut pipeline = Pipeline::default();
        pipeline.push(CommandHook::new("true", Vec::new()));

        assert_eq!(pipeline.run(context(), &mut ()).unwrap(), context());
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_command_reports_output() {
        let mut pipeline = Pipeline::default();
        pipeline.push(CommandHook::new(
            "sh",
            vec!["-c".to_string(), "echo broken >&2; exit 3".to_string()],
        ));

        let err = pipeline.run(context(), &mut ()).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("exited with status 3"), "{message}");
        assert!(message.contains("broken"), "{message}");
    }

    #[cfg(unix)]
    #[test]
    fn test_command_sees_payload_env() {
        let mut pipeline = Pipeline::default();
        pipeline.push(CommandHook::new(
            "sh",
            vec![
                "-c".to_string(),
                "test \"$HOOKCHAIN_MESSAGE\" = \"feat: x\"".to_string(),
            ],
        ));

        let message = pipeline
            .run(CommitMessage::new("feat: x"), &mut ())
            .unwrap();
        assert_eq!(message.message(), "feat: x");
    }
}
