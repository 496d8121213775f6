//! Post-creation hooks.
//! Hooks are shell command lines declared in the template descriptor. They
//! run one after another inside the new project once the operator agrees.

use std::path::Path;
use std::process::{Command, ExitStatus};

use log::{debug, warn};

use crate::error::{ThingError, ThingResult};
use crate::prompt::Prompter;

/// Exit status of one executed hook.
#[derive(Debug)]
pub struct HookOutcome {
    pub command: String,
    pub status: ExitStatus,
}

/// What happened during the hook phase.
#[derive(Debug, Default)]
pub struct HookReport {
    /// False when the operator declined or there was nothing to run
    pub executed: bool,
    pub outcomes: Vec<HookOutcome>,
}

impl HookReport {
    /// Hooks that exited with a non-zero status.
    pub fn failures(&self) -> impl Iterator<Item = &HookOutcome> {
        self.outcomes
            .iter()
            .filter(|outcome| !outcome.status.success())
    }
}

fn shell_command(hook: &str) -> Command {
    if cfg!(windows) {
        let mut command = Command::new("cmd");
        command.arg("/C").arg(hook);
        command
    } else {
        let mut command = Command::new("sh");
        command.arg("-c").arg(hook);
        command
    }
}

/// Runs a single hook with `project_dir` as working directory and waits for it.
///
/// # Errors
/// * `ThingError::HookLaunchFailure` if the shell cannot be started
pub fn run_hook(hook: &str, project_dir: &Path) -> ThingResult<ExitStatus> {
    debug!("Running hook '{hook}' in {}", project_dir.display());
    shell_command(hook)
        .current_dir(project_dir)
        .status()
        .map_err(|source| ThingError::HookLaunchFailure {
            command: hook.to_string(),
            source,
        })
}

/// Shows the hooks, asks for confirmation and runs them in declared order.
///
/// A declined prompt is not an error: nothing runs and the report says so.
/// A hook exiting with a non-zero status is reported as a warning and the
/// remaining hooks still run.
pub fn run_hooks(
    prompt: &dyn Prompter,
    project_dir: &Path,
    hooks: &[String],
) -> ThingResult<HookReport> {
    if hooks.is_empty() {
        debug!("Template declares no hooks");
        return Ok(HookReport::default());
    }

    println!(
        "This template wants to run the following commands in {}:",
        project_dir.display()
    );
    for hook in hooks {
        println!("  {hook}");
    }
    if !prompt.confirm("Run these hooks?")? {
        println!("Skipping hooks.");
        return Ok(HookReport::default());
    }

    let mut report = HookReport {
        executed: true,
        outcomes: Vec::with_capacity(hooks.len()),
    };
    for hook in hooks {
        let status = run_hook(hook, project_dir)?;
        if !status.success() {
            warn!("Hook '{hook}' exited with {status}");
            eprintln!("warning: hook '{hook}' exited with {status}");
        }
        report.outcomes.push(HookOutcome {
            command: hook.clone(),
            status,
        });
    }
    Ok(report)
}
