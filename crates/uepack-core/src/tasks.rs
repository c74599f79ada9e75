use std::path::Path;

use anyhow::Result;
use tracing::{info, instrument};

use crate::config::Settings;
use crate::constants::TASK_INTERPRETER;
use crate::process::{CommandRunner, Invocation};

/// Runs the configured pre-task, if any.
pub fn run_pre_task(settings: &Settings, runner: &dyn CommandRunner) -> Result<()> {
    match &settings.tasks.pre {
        Some(script) => run_task("pre", script, runner),
        None => Ok(()),
    }
}

/// Runs the configured post-task, if any.
pub fn run_post_task(settings: &Settings, runner: &dyn CommandRunner) -> Result<()> {
    match &settings.tasks.post {
        Some(script) => run_task("post", script, runner),
        None => Ok(()),
    }
}

// Like the build tool, a task's exit status does not stop the run.
#[instrument(skip(runner))]
fn run_task(kind: &str, script: &Path, runner: &dyn CommandRunner) -> Result<()> {
    println!("Running {kind}-task");
    let invocation = Invocation::new(TASK_INTERPRETER).arg(script.display().to_string());
    let status = runner.run(&invocation)?;
    info!(target: "uepack", "{}-task finished with {}", kind, status);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::tests::workspace;
    use crate::config::PackagerConfig;
    use crate::process::tests::RecordingRunner;
    use std::fs;

    #[test]
    fn runs_configured_tasks_with_python() {
        let dir = workspace();
        fs::write(dir.path().join("pre.py"), "print('pre')").unwrap();
        let cfg = PackagerConfig::from_toml(
            "[environment]\nunreal_install_dir = \"engines\"\noutput = \"out\"\n[tasks]\npre = \"pre.py\"",
        )
        .unwrap();
        let settings = Settings::verify(cfg, dir.path()).unwrap();
        let runner = RecordingRunner::failing(2);

        run_pre_task(&settings, &runner).expect("task exit status is not inspected");
        run_post_task(&settings, &runner).unwrap();

        let calls = runner.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].program, Path::new("python"));
        assert_eq!(calls[0].args, vec![dir.path().join("pre.py").display().to_string()]);
    }
}
