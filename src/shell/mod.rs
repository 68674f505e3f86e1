pub use self::execute_command::{ProcessHandle, ProcessLauncher, Termination, UnixLauncher};
pub use self::shell::Shell;

pub mod builtins;
pub mod execute_command;
pub mod job_control;
#[allow(clippy::module_inception)]
pub mod shell;
#[cfg(test)]
pub(crate) mod testing;

/// Creates a shell that launches real processes.
pub fn create_shell(config: ShellConfig) -> Shell<UnixLauncher> {
    Shell::with_launcher(config, UnixLauncher::new())
}

/// Policy object to control a Shell's behavior
#[derive(Debug, Copy, Clone)]
pub struct ShellConfig {
    /// Maximum number of words accepted on one command line, the background
    /// marker included.
    max_args: usize,

    /// Determines if some messages (e.g. "exit") should be displayed.
    display_messages: bool,
}

impl ShellConfig {
    /// Creates a shell reading commands typed by a user.
    ///
    /// # Complete List
    /// - Some additional messages are displayed
    pub fn interactive(max_args: usize) -> Self {
        Self {
            max_args,
            display_messages: true,
        }
    }

    /// Creates a shell running a command string or a script.
    ///
    /// # Complete List
    /// - Fewer messages are displayed
    pub fn noninteractive(max_args: usize) -> Self {
        Self {
            max_args,
            display_messages: false,
        }
    }

    pub fn max_args(&self) -> usize {
        self.max_args
    }

    pub fn display_messages(&self) -> bool {
        self.display_messages
    }
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self::noninteractive(crate::core::tokenizer::DEFAULT_MAX_TOKENS)
    }
}
