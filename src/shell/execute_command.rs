//! Process launching and waiting.
//!
//! `ProcessLauncher` is the seam between the shell's dispatch logic and the
//! operating system. `UnixLauncher` is the real implementation; tests use an
//! in-memory one.

use std::fmt;
use std::io::{self, Write};
use std::process::{self, ExitStatus};

use nix::errno::Errno;
use nix::sys::wait::{self, WaitPidFlag, WaitStatus};
use nix::unistd::Pid;

use crate::core::{command::Command, job::ProcessId};
use crate::errors::{Error, ErrorKind, Result, ResultExt};
use crate::util::MshExitStatusExt;

/// A child process started by a `ProcessLauncher`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProcessHandle {
    pid: ProcessId,
}

impl ProcessHandle {
    pub fn new(pid: ProcessId) -> Self {
        Self { pid }
    }

    pub fn pid(&self) -> ProcessId {
        self.pid
    }
}

/// A child that has terminated and whose status has been collected.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Termination {
    pub pid: ProcessId,
    pub status: ExitStatus,
}

/// Human-readable outcome used in completion notices, e.g. `Done` or `Exit 2`.
#[derive(Debug)]
pub struct StatusDisplay(pub ExitStatus);

impl fmt::Display for StatusDisplay {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.0.code() {
            Some(0) => write!(f, "Done"),
            Some(code) => write!(f, "Exit {}", code),
            None => write!(f, "{}", self.0),
        }
    }
}

pub trait ProcessLauncher {
    /// Starts `command` with the shell's environment, working directory, and
    /// standard streams.
    fn spawn(&mut self, command: &Command) -> Result<ProcessHandle>;

    /// Blocks until the child behind `handle`, and no other, terminates.
    fn wait(&mut self, handle: ProcessHandle) -> Result<ExitStatus>;

    /// Collects one terminated child, if any, without blocking.
    fn try_reap(&mut self) -> Result<Option<Termination>>;
}

/// Launches real processes via `fork`/`exec` and waits with `waitpid(2)`.
#[derive(Debug, Default)]
pub struct UnixLauncher;

impl UnixLauncher {
    pub fn new() -> Self {
        UnixLauncher
    }
}

impl ProcessLauncher for UnixLauncher {
    fn spawn(&mut self, command: &Command) -> Result<ProcessHandle> {
        // The child writes straight to the inherited descriptors, so anything
        // still buffered on our side has to go out first.
        let temp_result = io::stdout().flush();
        log_if_err!(temp_result, "failed to flush stdout before spawn");

        let mut process_command = process::Command::new(command.program());
        process_command.args(command.args());

        match process_command.spawn() {
            Ok(child) => {
                let pid = ProcessId::from(child.id());
                debug!("spawned {} as pid {}", command, pid);
                // Dropping `child` neither kills nor waits for the process;
                // its status is collected through waitpid below.
                Ok(ProcessHandle::new(pid))
            }
            Err(e) => Err(spawn_error(e, command.program())),
        }
    }

    fn wait(&mut self, handle: ProcessHandle) -> Result<ExitStatus> {
        let pid = handle.pid();
        loop {
            match wait::waitpid(Pid::from(pid), None) {
                Ok(WaitStatus::Exited(_, code)) => {
                    debug!("{} exited with {}.", pid, code);
                    return Ok(ExitStatus::from_status(code));
                }
                Ok(WaitStatus::Signaled(_, signal, _)) => {
                    debug!("{} terminated by signal {:?}.", pid, signal);
                    return Ok(get_status_code_for_signal(signal as i32));
                }
                Ok(status) => debug!("ignoring wait status {:?}", status),
                Err(Errno::EINTR) => continue,
                Err(e) => return Err(e).chain_err(|| ErrorKind::Wait(pid)),
            }
        }
    }

    fn try_reap(&mut self) -> Result<Option<Termination>> {
        loop {
            let wait_status = wait::waitpid(None, Some(WaitPidFlag::WNOHANG));
            let (pid, status) = match wait_status {
                Ok(WaitStatus::StillAlive) | Err(Errno::ECHILD) => return Ok(None),
                Ok(WaitStatus::Exited(pid, code)) => {
                    debug!("{} exited with {}.", pid, code);
                    (pid, ExitStatus::from_status(code))
                }
                Ok(WaitStatus::Signaled(pid, signal, _)) => {
                    debug!("{} terminated by signal {:?}.", pid, signal);
                    (pid, get_status_code_for_signal(signal as i32))
                }
                Ok(_) | Err(Errno::EINTR) => continue,
                Err(e) => return Err(e.into()),
            };

            return Ok(Some(Termination {
                pid: pid.into(),
                status,
            }));
        }
    }
}

/// Maps a spawn failure onto the shell's error taxonomy: resource exhaustion
/// while creating the process is a fork error, anything else means the
/// program itself could not be executed.
pub(crate) fn spawn_error(e: io::Error, program: &str) -> Error {
    let kind = match e.kind() {
        io::ErrorKind::WouldBlock | io::ErrorKind::OutOfMemory => {
            ErrorKind::Fork(program.to_string())
        }
        _ => ErrorKind::Spawn(program.to_string()),
    };
    warn!("failed to spawn {}: {}", program, e);
    Error::with_chain(e, kind)
}

fn get_status_code_for_signal(signo: i32) -> ExitStatus {
    ExitStatus::from_status(128 + signo)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nix::libc;
    use std::os::unix::process::ExitStatusExt;

    fn command(words: &[&str]) -> Command {
        Command::from_tokens(words.iter().map(|w| w.to_string()).collect())
            .unwrap()
            .unwrap()
    }

    #[test]
    fn test_spawn_and_wait_for_exit_code() {
        let mut launcher = UnixLauncher::new();
        let handle = launcher
            .spawn(&command(&["sh", "-c", "exit 3"]))
            .expect("sh should spawn");
        let status = launcher.wait(handle).expect("wait should succeed");
        assert_eq!(status.code(), Some(3));
    }

    #[test]
    fn test_spawn_missing_program() {
        let mut launcher = UnixLauncher::new();
        let err = launcher
            .spawn(&command(&["msh-test-no-such-program"]))
            .unwrap_err();
        match *err.kind() {
            ErrorKind::Spawn(ref program) => assert_eq!(program, "msh-test-no-such-program"),
            ref kind => panic!("unexpected error: {:?}", kind),
        }
        assert!(err.display_chain_inline().contains("msh-test-no-such-program"));
    }

    #[test]
    fn test_wait_on_unknown_pid() {
        let mut launcher = UnixLauncher::new();
        // pid 1 is never a child of the test process
        let err = launcher
            .wait(ProcessHandle::new(ProcessId::from(1u32)))
            .unwrap_err();
        match *err.kind() {
            ErrorKind::Wait(pid) => assert_eq!(pid, ProcessId::from(1u32)),
            ref kind => panic!("unexpected error: {:?}", kind),
        }
    }

    #[test]
    fn test_signal_status() {
        assert_eq!(get_status_code_for_signal(9).code(), Some(137));
    }

    #[test]
    fn test_status_display() {
        assert_eq!(StatusDisplay(ExitStatus::from_success()).to_string(), "Done");
        assert_eq!(StatusDisplay(ExitStatus::from_status(2)).to_string(), "Exit 2");
    }

    #[test]
    fn test_status_display_without_exit_code() {
        // raw wait status for a child killed by SIGKILL
        let killed = ExitStatus::from_raw(libc::SIGKILL);
        assert_eq!(killed.code(), None);
        assert_eq!(StatusDisplay(killed).to_string(), killed.to_string());
    }

    #[test]
    fn test_resource_exhaustion_is_a_fork_error() {
        let errors = vec![
            spawn_error(io::Error::from(io::ErrorKind::WouldBlock), "x"),
            spawn_error(io::Error::from_raw_os_error(libc::EAGAIN), "x"),
            spawn_error(io::Error::from_raw_os_error(libc::ENOMEM), "x"),
        ];
        for err in errors {
            match *err.kind() {
                ErrorKind::Fork(ref program) => assert_eq!(program, "x"),
                ref kind => panic!("unexpected error: {:?}", kind),
            }
            assert!(err.display_chain_inline().starts_with("x: failed to create process: "));
        }
    }

    #[test]
    fn test_other_spawn_failures_are_spawn_errors() {
        let errors = vec![
            spawn_error(io::Error::from(io::ErrorKind::NotFound), "x"),
            spawn_error(io::Error::from_raw_os_error(libc::EACCES), "x"),
        ];
        for err in errors {
            match *err.kind() {
                ErrorKind::Spawn(ref program) => assert_eq!(program, "x"),
                ref kind => panic!("unexpected error: {:?}", kind),
            }
        }
    }
}
