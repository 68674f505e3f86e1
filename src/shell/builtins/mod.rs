//! Msh builtins
//!
//! Commands that run inside the shell process instead of a child. Only `cd`
//! exists; it has to, since a child changing directory cannot affect us.

use std::io::Write;

use crate::errors::Result;

use self::dirs::Cd;

mod dirs;

const CD_NAME: &str = "cd";

/// Represents a Msh builtin command such as cd.
pub trait BuiltinCommand {
    /// The NAME of the command.
    const NAME: &'static str;
    /// The help string to display to the user.
    const HELP: &'static str;
    /// The usage string to display to the user.
    fn usage() -> &'static str {
        Self::HELP.lines().next().unwrap_or(Self::NAME)
    }
    /// Runs the command with the given arguments.
    fn run<T: AsRef<str>>(args: &[T], stdout: &mut dyn Write) -> Result<()>;
}

pub fn is_builtin<T: AsRef<str>>(program: T) -> bool {
    [CD_NAME].contains(&program.as_ref())
}

/// precondition: command is a builtin.
pub fn run<S1, S2>(program: S1, args: &[S2], stdout: &mut dyn Write) -> Result<()>
where
    S1: AsRef<str>,
    S2: AsRef<str>,
{
    debug_assert!(is_builtin(&program));
    debug!("running builtin {}", program.as_ref());

    match program.as_ref() {
        CD_NAME => Cd::run(args, stdout),
        _ => unreachable!(),
    }
}
