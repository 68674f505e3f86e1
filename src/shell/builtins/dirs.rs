use std::env;
use std::io::Write;
use std::path::Path;

use crate::errors::{Error, ErrorKind, Result, ResultExt};
use crate::shell::builtins::{self, BuiltinCommand};

pub struct Cd;

impl BuiltinCommand for Cd {
    const NAME: &'static str = builtins::CD_NAME;

    const HELP: &'static str = "\
cd: cd <dir>
    Change the shell's working directory to DIR. Commands started
    afterwards inherit the new directory.";

    fn run<T: AsRef<str>>(args: &[T], _stdout: &mut dyn Write) -> Result<()> {
        let dir = match args {
            [] => {
                return Err(Error::builtin_arg(format!(
                    "cd: expected argument\nusage: {}",
                    Self::usage()
                )))
            }
            [dir] => dir.as_ref(),
            _ => return Err(Error::builtin_arg("cd: too many arguments")),
        };

        env::set_current_dir(Path::new(dir))
            .chain_err(|| ErrorKind::DirectoryChange(dir.to_string()))?;
        debug!("changed directory to {}", dir);
        Ok(())
    }
}
