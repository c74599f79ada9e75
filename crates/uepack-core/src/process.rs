use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::process::Command;

use anyhow::{Context, Result};
use tracing::debug;

/// One external command: the build tool, `mkdocs`, or a task script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: PathBuf,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// First argument, which is the verb for build tool invocations.
    pub fn verb(&self) -> Option<&str> {
        self.args.first().map(String::as_str)
    }

    /// Value of a `-Key=value` argument.
    pub fn option(&self, key: &str) -> Option<&str> {
        let prefix = format!("-{key}=");
        self.args.iter().find_map(|arg| arg.strip_prefix(&prefix))
    }
}

impl Display for Invocation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "\"{}\"", self.program.display())?;
        for arg in &self.args {
            if arg.contains(' ') {
                write!(f, " \"{arg}\"")?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}

/// Exit information of a finished command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunStatus {
    /// `None` when the process was terminated by a signal.
    pub code: Option<i32>,
}

impl RunStatus {
    pub const SUCCESS: RunStatus = RunStatus { code: Some(0) };

    pub fn success(self) -> bool {
        self.code == Some(0)
    }
}

impl Display for RunStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.code {
            Some(code) => write!(f, "exit code {code}"),
            None => f.write_str("termination by signal"),
        }
    }
}

/// Runs external commands to completion.
pub trait CommandRunner: std::fmt::Debug {
    /// Blocks until the command exits. Only a failure to start is an error.
    fn run(&self, invocation: &Invocation) -> Result<RunStatus>;
}

/// Runs commands as child processes sharing this process's stdio.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> Result<RunStatus> {
        debug!("spawning {}", invocation);
        let status = Command::new(&invocation.program)
            .args(&invocation.args)
            .status()
            .with_context(|| format!("failed to start command {invocation}"))?;
        Ok(RunStatus {
            code: status.code(),
        })
    }
}
