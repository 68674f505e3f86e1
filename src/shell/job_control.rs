use std::io::Write;

use crate::core::job::JobTable;
use crate::errors::Result;
use crate::shell::execute_command::{ProcessLauncher, StatusDisplay};

/// Collects every background child that has terminated since the last sweep
/// and reports each one, without blocking.
///
/// Returns the number of jobs that were reported. A terminated child with no
/// matching job is discarded.
pub fn reap_jobs<L, W>(launcher: &mut L, jobs: &mut JobTable, stdout: &mut W) -> Result<usize>
where
    L: ProcessLauncher + ?Sized,
    W: Write + ?Sized,
{
    if jobs.is_empty() {
        return Ok(0);
    }

    let mut reported = 0;
    while let Some(termination) = launcher.try_reap()? {
        match jobs.remove(termination.pid) {
            Some(job) => {
                debug!("job [{}] ({}) finished", job.id(), job.pid());
                writeln!(
                    stdout,
                    "[{}]+\t{}\t{}",
                    job.id(),
                    StatusDisplay(termination.status),
                    job.command_name()
                )?;
                reported += 1;
            }
            None => debug!("discarding status of untracked pid {}", termination.pid),
        }
    }

    Ok(reported)
}
