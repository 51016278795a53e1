//! External command execution with per-command deadlines.

use async_trait::async_trait;
use tokio::process::Command;
use tokio::time::timeout;

use binscout_core::{Result, ScanContext, ScanError};

use crate::paths::is_executable;

/// Seam between backends and the host's external tools.
///
/// Every backend talks to its package manager through this trait, so
/// parsers can be exercised against canned output in tests.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run a command and return its stdout. Non-zero exit is an error.
    async fn run(&self, ctx: &ScanContext, program: &str, args: &[&str]) -> Result<String>;

    /// Run a command, tolerating a non-zero exit as long as it produced
    /// stdout. npm in particular exits non-zero on benign tree problems
    /// while still printing a usable listing.
    async fn run_lenient(&self, ctx: &ScanContext, program: &str, args: &[&str])
        -> Result<String>;

    /// Check whether a program exists on `PATH`. Never errors.
    fn lookup(&self, program: &str) -> bool;
}

/// Runs real commands via `tokio::process`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl SystemRunner {
    /// Create a runner.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    async fn output(
        ctx: &ScanContext,
        program: &str,
        args: &[&str],
    ) -> Result<std::process::Output> {
        let command_line = render_command(program, args);
        let mut command = Command::new(program);
        command.args(args);
        let result = timeout(ctx.command_timeout, command.output())
            .await
            .map_err(|_| ScanError::Timeout {
                command: command_line.clone(),
                secs: ctx.command_timeout.as_secs(),
            })?;
        result.map_err(|source| ScanError::Spawn {
            command: command_line,
            source,
        })
    }
}

#[async_trait]
impl CommandRunner for SystemRunner {
    async fn run(&self, ctx: &ScanContext, program: &str, args: &[&str]) -> Result<String> {
        let output = Self::output(ctx, program, args).await?;
        if !output.status.success() {
            return Err(ScanError::Command {
                command: render_command(program, args),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    async fn run_lenient(
        &self,
        ctx: &ScanContext,
        program: &str,
        args: &[&str],
    ) -> Result<String> {
        let output = Self::output(ctx, program, args).await?;
        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        if !output.status.success() && stdout.trim().is_empty() {
            return Err(ScanError::Command {
                command: render_command(program, args),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(stdout)
    }

    fn lookup(&self, program: &str) -> bool {
        let Some(path_env) = std::env::var_os("PATH") else {
            return false;
        };
        std::env::split_paths(&path_env).any(|dir| is_executable(&dir.join(program)))
    }
}

fn render_command(program: &str, args: &[&str]) -> String {
    if args.is_empty() {
        program.to_string()
    } else {
        format!("{program} {}", args.join(" "))
    }
}

#[cfg(test)]
pub(crate) mod mock {
    use std::collections::{HashMap, HashSet};

    use async_trait::async_trait;
    use binscout_core::{Result, ScanContext, ScanError};

    use super::CommandRunner;

    enum Response {
        Ok(String),
        Fail { stderr: String, stdout: String },
    }

    /// Canned-output runner for backend parser tests.
    #[derive(Default)]
    pub struct MockRunner {
        responses: HashMap<String, Response>,
        tools: HashSet<String>,
    }

    impl MockRunner {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_tool(mut self, program: &str) -> Self {
            self.tools.insert(program.to_string());
            self
        }

        pub fn with_output(mut self, command: &str, stdout: &str) -> Self {
            self.responses
                .insert(command.to_string(), Response::Ok(stdout.to_string()));
            self
        }

        /// Register a failing command. `stdout` may still carry output,
        /// which `run_lenient` passes through.
        pub fn with_failure(mut self, command: &str, stderr: &str, stdout: &str) -> Self {
            self.responses.insert(
                command.to_string(),
                Response::Fail {
                    stderr: stderr.to_string(),
                    stdout: stdout.to_string(),
                },
            );
            self
        }

        fn response(&self, program: &str, args: &[&str]) -> Result<&Response> {
            let command = super::render_command(program, args);
            self.responses
                .get(&command)
                .ok_or_else(|| ScanError::Command {
                    command,
                    stderr: "no canned response".to_string(),
                })
        }
    }

    #[async_trait]
    impl CommandRunner for MockRunner {
        async fn run(&self, _ctx: &ScanContext, program: &str, args: &[&str]) -> Result<String> {
            match self.response(program, args)? {
                Response::Ok(stdout) => Ok(stdout.clone()),
                Response::Fail { stderr, .. } => Err(ScanError::Command {
                    command: super::render_command(program, args),
                    stderr: stderr.clone(),
                }),
            }
        }

        async fn run_lenient(
            &self,
            _ctx: &ScanContext,
            program: &str,
            args: &[&str],
        ) -> Result<String> {
            match self.response(program, args)? {
                Response::Ok(stdout) => Ok(stdout.clone()),
                Response::Fail { stderr, stdout } => {
                    if stdout.trim().is_empty() {
                        Err(ScanError::Command {
                            command: super::render_command(program, args),
                            stderr: stderr.clone(),
                        })
                    } else {
                        Ok(stdout.clone())
                    }
                }
            }
        }

        fn lookup(&self, program: &str) -> bool {
            self.tools.contains(program)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_command() {
        assert_eq!(render_command("brew", &[]), "brew");
        assert_eq!(
            render_command("brew", &["list", "--formula"]),
            "brew list --formula"
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_captures_stdout() {
        let runner = SystemRunner::new();
        let out = runner
            .run(&ScanContext::new(), "echo", &["hello"])
            .await
            .unwrap();
        assert_eq!(out.trim(), "hello");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_reports_failure() {
        let runner = SystemRunner::new();
        let err = runner
            .run(&ScanContext::new(), "false", &[])
            .await
            .unwrap_err();
        assert!(matches!(err, ScanError::Command { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_times_out() {
        use std::time::Duration;

        let runner = SystemRunner::new();
        let ctx = ScanContext::new().with_command_timeout(Duration::from_millis(50));
        let err = runner.run(&ctx, "sleep", &["5"]).await.unwrap_err();
        assert!(matches!(err, ScanError::Timeout { .. }));
    }

    #[test]
    fn test_lookup_misses_nonsense() {
        let runner = SystemRunner::new();
        assert!(!runner.lookup("definitely-not-a-real-tool-name"));
    }
}
