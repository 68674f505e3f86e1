//! In-memory `ProcessLauncher` for exercising dispatch without spawning.

use std::collections::{HashSet, VecDeque};
use std::io;
use std::process::ExitStatus;

use crate::core::{command::Command, job::ProcessId};
use crate::errors::{Error, ErrorKind, Result};
use crate::shell::execute_command::{spawn_error, ProcessHandle, ProcessLauncher, Termination};
use crate::util::MshExitStatusExt;

const FIRST_PID: u32 = 1000;

#[derive(Debug)]
pub struct FakeLauncher {
    next_pid: u32,
    missing_programs: HashSet<String>,
    exhausted_programs: HashSet<String>,
    fail_waits: bool,
    spawned: Vec<(ProcessId, Vec<String>)>,
    waited: Vec<ProcessId>,
    terminated: VecDeque<Termination>,
}

impl FakeLauncher {
    pub fn new() -> Self {
        Self {
            next_pid: FIRST_PID,
            missing_programs: HashSet::new(),
            exhausted_programs: HashSet::new(),
            fail_waits: false,
            spawned: Vec::new(),
            waited: Vec::new(),
            terminated: VecDeque::new(),
        }
    }

    /// Makes spawning `program` fail as if it were not on `PATH`.
    pub fn missing(mut self, program: &str) -> Self {
        self.missing_programs.insert(program.to_string());
        self
    }

    /// Makes spawning `program` fail as if `fork` ran out of processes.
    pub fn failing_fork(mut self, program: &str) -> Self {
        self.exhausted_programs.insert(program.to_string());
        self
    }

    pub fn failing_waits(mut self) -> Self {
        self.fail_waits = true;
        self
    }

    /// Queues a terminated child for the next `try_reap`.
    pub fn finish(&mut self, pid: ProcessId, status: ExitStatus) {
        self.terminated.push_back(Termination { pid, status });
    }

    pub fn pending_terminations(&self) -> usize {
        self.terminated.len()
    }

    pub fn spawned(&self) -> &[(ProcessId, Vec<String>)] {
        &self.spawned
    }

    pub fn waited(&self) -> &[ProcessId] {
        &self.waited
    }
}

impl ProcessLauncher for FakeLauncher {
    fn spawn(&mut self, command: &Command) -> Result<ProcessHandle> {
        if self.missing_programs.contains(command.program()) {
            let cause = io::Error::from(io::ErrorKind::NotFound);
            return Err(Error::with_chain(
                cause,
                ErrorKind::Spawn(command.program().to_string()),
            ));
        }

        if self.exhausted_programs.contains(command.program()) {
            let cause = io::Error::from(io::ErrorKind::WouldBlock);
            return Err(spawn_error(cause, command.program()));
        }

        let pid = ProcessId::from(self.next_pid);
        self.next_pid += 1;
        self.spawned.push((pid, command.argv().to_vec()));
        Ok(ProcessHandle::new(pid))
    }

    fn wait(&mut self, handle: ProcessHandle) -> Result<ExitStatus> {
        self.waited.push(handle.pid());
        if self.fail_waits {
            let cause = io::Error::from(io::ErrorKind::Other);
            return Err(Error::with_chain(cause, ErrorKind::Wait(handle.pid())));
        }
        Ok(ExitStatus::from_success())
    }

    fn try_reap(&mut self) -> Result<Option<Termination>> {
        Ok(self.terminated.pop_front())
    }
}
