//! Msh - Shell Module
//!
//! The Shell reads command lines, dispatches them, and owns the table of
//! background jobs that are still running.

use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;
use std::process::{self, ExitStatus};

use nix::unistd;

use crate::core::{command::Command, job::JobTable, tokenizer::Tokenizer};
use crate::errors::{Error, Result};
use crate::shell::{
    builtins,
    execute_command::{ProcessLauncher, UnixLauncher},
    job_control, ShellConfig,
};
use crate::util::{self, MshExitStatusExt};

const PROMPT: &str = "\n msh> ";

/// Msh Shell
pub struct Shell<L: ProcessLauncher = UnixLauncher> {
    config: ShellConfig,
    tokenizer: Tokenizer,
    jobs: JobTable,
    launcher: L,
    /// Is `true` when standard input is a terminal.
    is_interactive: bool,
}

impl<L: ProcessLauncher> Shell<L> {
    /// Constructs a new Shell that starts processes through `launcher`.
    pub fn with_launcher(config: ShellConfig, launcher: L) -> Self {
        let shell = Shell {
            config,
            tokenizer: Tokenizer::new(config.max_args()),
            jobs: JobTable::new(),
            launcher,
            is_interactive: util::isatty(),
        };

        info!("msh started up");
        shell
    }

    pub fn is_interactive(&self) -> bool {
        self.is_interactive
    }

    /// Background jobs that have not been reaped yet.
    pub fn jobs(&self) -> &JobTable {
        &self.jobs
    }

    pub fn launcher(&self) -> &L {
        &self.launcher
    }

    /// Custom prompt to output to the user.
    pub fn prompt(&self, stdout: &mut dyn Write) -> Result<()> {
        write!(stdout, "{}", PROMPT)?;
        stdout.flush()?;
        Ok(())
    }

    /// Runs commands typed on stdin until end-of-input.
    pub fn execute_from_stdin(&mut self) -> Result<()> {
        let stdin = io::stdin();
        let show_prompt = self.is_interactive;
        self.execute_lines(stdin.lock(), &mut io::stdout(), show_prompt)
    }

    /// Runs a msh script from a file.
    pub fn execute_commands_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let file = File::open(path)?;
        self.execute_lines(BufReader::new(file), &mut io::stdout(), false)
    }

    /// Runs every line of `input` until end-of-input, reporting failed
    /// commands on stderr and carrying on with the next line.
    pub fn execute_from_reader<R: BufRead>(
        &mut self,
        input: R,
        stdout: &mut dyn Write,
    ) -> Result<()> {
        self.execute_lines(input, stdout, false)
    }

    fn execute_lines<R: BufRead>(
        &mut self,
        mut input: R,
        stdout: &mut dyn Write,
        show_prompt: bool,
    ) -> Result<()> {
        let mut line = String::new();
        loop {
            if show_prompt {
                let temp_result = self.prompt(stdout);
                log_if_err!(temp_result, "prompt");
            }

            line.clear();
            match input.read_line(&mut line) {
                Ok(0) => break,
                Ok(_) => {}
                Err(ref e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    if e.kind() == io::ErrorKind::InvalidData {
                        // the offending bytes are consumed; move on
                        report_error(&Error::from(e));
                        continue;
                    }
                    return Err(e.into());
                }
            }

            if let Err(e) = self.execute_command_string(&line, stdout) {
                report_error(&e);
            }
        }

        info!("EOF pid {}", unistd::getpid());
        Ok(())
    }

    /// Runs a single command line, then reports finished background jobs.
    ///
    /// Blank and comment lines do nothing. Any other line is followed by a
    /// reap, even when it failed to parse or to run.
    pub fn execute_command_string(&mut self, input: &str, stdout: &mut dyn Write) -> Result<()> {
        let parsed = self
            .tokenizer
            .tokenize(input)
            .and_then(Command::from_tokens);

        let result = match parsed {
            Ok(Some(command)) => self.execute_command(&command, stdout),
            Ok(None) => return Ok(()),
            Err(e) => Err(e),
        };

        let temp_result = job_control::reap_jobs(&mut self.launcher, &mut self.jobs, stdout);
        log_if_err!(temp_result, "reap_jobs");

        result
    }

    fn execute_command(&mut self, command: &Command, stdout: &mut dyn Write) -> Result<()> {
        if builtins::is_builtin(command.program()) {
            return builtins::run(command.program(), command.args(), stdout);
        }

        let handle = self.launcher.spawn(command)?;
        if command.is_background() {
            let job_id = self.jobs.insert(handle.pid(), command.program());
            debug!("job [{}] started in background", job_id);
            writeln!(stdout, "[{}] {}", job_id, handle.pid())?;
        } else {
            let status = self.launcher.wait(handle)?;
            debug!("{} finished with {}", command.program(), status);
            writeln!(stdout, "{} done", command.program())?;
        }

        Ok(())
    }

    /// Exit the shell.
    ///
    /// Exits with `n`, or with a successful status if `n` is None.
    pub fn exit(&mut self, n: Option<ExitStatus>) -> ! {
        if self.config.display_messages() && self.is_interactive {
            println!("exit");
        }

        if !self.jobs.is_empty() {
            warn!("exiting with {} background jobs still running", self.jobs.len());
        }

        let code = n
            .unwrap_or_else(ExitStatus::from_success)
            .code()
            .unwrap_or(1);
        info!("msh has shut down");
        process::exit(code);
    }
}

impl<L: ProcessLauncher> fmt::Debug for Shell<L> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}\n{:?}", self.config, self.jobs)
    }
}

fn report_error(error: &Error) {
    error!("{}", error.display_chain_inline());
    eprintln!("msh: error: {}", error.display_chain_inline());
}
