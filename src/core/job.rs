use std::collections::HashMap;
use std::fmt;

use nix::{libc, unistd::Pid};

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ProcessId(u32);

impl From<u32> for ProcessId {
    fn from(value: u32) -> Self {
        ProcessId(value)
    }
}

impl From<Pid> for ProcessId {
    fn from(value: Pid) -> Self {
        libc::pid_t::from(value).into()
    }
}

impl From<libc::pid_t> for ProcessId {
    fn from(value: libc::pid_t) -> Self {
        ProcessId(value as u32)
    }
}

impl From<ProcessId> for Pid {
    fn from(value: ProcessId) -> Self {
        Pid::from_raw(value.0 as libc::pid_t)
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct JobId(pub u32);

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A command the shell launched in the background and has not yet reaped.
#[derive(Clone, Debug, PartialEq)]
pub struct Job {
    id: JobId,
    pid: ProcessId,
    command_name: String,
}

impl Job {
    pub fn id(&self) -> JobId {
        self.id
    }

    pub fn pid(&self) -> ProcessId {
        self.pid
    }

    pub fn command_name(&self) -> &str {
        &self.command_name
    }
}

impl fmt::Display for Job {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{}] {}\t{}", self.id, self.pid, self.command_name)
    }
}

/// Live background jobs keyed by process id.
///
/// Job numbers start at 1 and are never handed out twice, even after the
/// job that held one has been removed.
#[derive(Default)]
pub struct JobTable {
    jobs: HashMap<ProcessId, Job>,
    job_count: u32,
}

impl JobTable {
    pub fn new() -> Self {
        Default::default()
    }

    /// Registers a background process and returns its job number.
    pub fn insert<S: Into<String>>(&mut self, pid: ProcessId, command_name: S) -> JobId {
        let id = self.get_next_job_id();
        let job = Job {
            id,
            pid,
            command_name: command_name.into(),
        };
        if let Some(stale) = self.jobs.insert(pid, job) {
            warn!("pid {} was still registered to job [{}]", pid, stale.id());
        }
        id
    }

    pub fn remove(&mut self, pid: ProcessId) -> Option<Job> {
        self.jobs.remove(&pid)
    }

    pub fn find(&self, pid: ProcessId) -> Option<&Job> {
        self.jobs.get(&pid)
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    /// Returns the live jobs ordered by job number.
    pub fn jobs(&self) -> Vec<&Job> {
        let mut jobs: Vec<&Job> = self.jobs.values().collect();
        jobs.sort_by_key(|job| job.id());
        jobs
    }

    fn get_next_job_id(&mut self) -> JobId {
        self.job_count += 1;
        JobId(self.job_count)
    }
}

impl fmt::Debug for JobTable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{} jobs\tjob_count: {}", self.jobs.len(), self.job_count)?;
        for job in self.jobs() {
            writeln!(f, "{}", job)?;
        }

        Ok(())
    }
}
