//! Runs command lines through the host shell.
//! Unaware of the build graph; just command execution.

#[derive(Debug, PartialEq)]
pub enum Termination {
    Success,
    Interrupted,
    /// Exit code, or None when killed by a signal other than SIGINT.
    Failure(Option<i32>),
}

impl std::fmt::Display for Termination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Termination::Success => write!(f, "success"),
            Termination::Interrupted => write!(f, "interrupted"),
            Termination::Failure(Some(code)) => write!(f, "exit status {}", code),
            Termination::Failure(None) => write!(f, "killed by signal"),
        }
    }
}

/// Executes command lines.  The build loop only cares about how a command
/// terminated; tests substitute a runner that records instead of spawning.
pub trait Runner {
    /// Run a command to completion.  Returns an Err() only if we failed
    /// outside of the process itself, e.g. the shell couldn't be spawned.
    fn run(&mut self, cmdline: &str) -> anyhow::Result<Termination>;
}

/// Runs commands through /bin/sh (cmd on Windows), with the child sharing
/// our stdin/stdout/stderr.  Blocks until the child exits; no timeout.
#[derive(Default)]
pub struct ShellRunner {}

impl ShellRunner {
    pub fn new() -> Self {
        ShellRunner {}
    }
}

#[cfg(unix)]
fn shell_command(cmdline: &str) -> std::process::Command {
    let mut cmd = std::process::Command::new("/bin/sh");
    cmd.arg("-c").arg(cmdline);
    cmd
}

#[cfg(windows)]
fn shell_command(cmdline: &str) -> std::process::Command {
    let mut cmd = std::process::Command::new("cmd");
    cmd.arg("/C").arg(cmdline);
    cmd
}

#[cfg(unix)]
fn termination(status: std::process::ExitStatus) -> Termination {
    use std::os::unix::process::ExitStatusExt;
    if status.success() {
        return Termination::Success;
    }
    match status.signal() {
        Some(libc::SIGINT) => Termination::Interrupted,
        Some(_) => Termination::Failure(None),
        None => Termination::Failure(status.code()),
    }
}

#[cfg(windows)]
fn termination(status: std::process::ExitStatus) -> Termination {
    if status.success() {
        Termination::Success
    } else {
        Termination::Failure(status.code())
    }
}

impl Runner for ShellRunner {
    fn run(&mut self, cmdline: &str) -> anyhow::Result<Termination> {
        let status = shell_command(cmdline)
            .status()
            .map_err(|err| anyhow::anyhow!("spawn {:?}: {}", cmdline, err))?;
        Ok(termination(status))
    }
}
