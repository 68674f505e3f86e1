//! Error module. See the [error-chain](https://crates.io/crates/error-chain) crate for details.

#![allow(missing_docs)]

use crate::core::job::ProcessId;

error_chain! {
    foreign_links {
        Docopt(::docopt::Error);
        Io(::std::io::Error);
        Log(::log::SetLoggerError);
        Nix(::nix::Error);
    }

    errors {
        /// A line that cannot be turned into a command, e.g. a lone `&`
        Syntax(line: String) {
            description("syntax error")
            display("syntax error near: '{}'", line)
        }
        TooManyArguments(count: usize, max: usize) {
            description("too many arguments")
            display("too many arguments ({} given, at most {} allowed)", count, max)
        }
        /// The program could not be executed (not found, not executable, ...)
        Spawn(program: String) {
            description("failed to execute program")
            display("{}: failed to execute", program)
        }
        /// The operating system refused to create another process
        Fork(program: String) {
            description("failed to create process")
            display("{}: failed to create process", program)
        }
        Wait(pid: ProcessId) {
            description("failed to wait for process")
            display("failed to wait for process {}", pid)
        }
        BuiltinArg(message: String) {
            description("invalid builtin arguments")
            display("{}", message)
        }
        DirectoryChange(path: String) {
            description("failed to change directory")
            display("cd: {}", path)
        }
    }
}

impl Error {
    pub(crate) fn syntax<T: AsRef<str>>(line: T) -> Error {
        Error::from(ErrorKind::Syntax(line.as_ref().to_string()))
    }

    pub(crate) fn builtin_arg<T: AsRef<str>>(message: T) -> Error {
        Error::from(ErrorKind::BuiltinArg(message.as_ref().to_string()))
    }

    /// Renders the error and every cause beneath it on a single line.
    pub fn display_chain_inline(&self) -> String {
        self.iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(": ")
    }
}
