#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;

use std::path::PathBuf;
use std::process::ExitStatus;

use docopt::Docopt;
use msh_rs::core::tokenizer::DEFAULT_MAX_TOKENS;
use msh_rs::errors::*;
use msh_rs::{create_shell, MshExitStatusExt, ShellConfig};
use nix::unistd::Pid;

const LOG_FILE_NAME: &str = ".msh_log";

const USAGE: &str = "
msh.

Usage:
    msh [options]
    msh [options] -c <command>
    msh [options] <file>
    msh (-h | --help)
    msh --version

Options:
    -h --help           Show this screen.
    --version           Show version.
    -c                  If the -c option is present, then commands are read from the first
                            non-option argument command_string.
    --log=<path>        File to write log to, defaults to ~/.msh_log
    --max-args=<n>      Maximum number of words on a command line [default: 20].
";

/// Docopts input arguments.
#[derive(Debug, Deserialize)]
struct Args {
    arg_command: Option<String>,
    arg_file: Option<String>,
    flag_version: bool,
    flag_c: bool,
    flag_log: Option<String>,
    flag_max_args: Option<usize>,
}

fn main() {
    let args: Args = Docopt::new(USAGE)
        .and_then(|d| d.deserialize())
        .unwrap_or_else(|e| e.exit());

    if let Err(e) = init_logger(&args.flag_log) {
        eprintln!("msh: warning: logging disabled: {}", e.display_chain_inline());
    }
    debug!("{:?}", args);

    let max_args = args.flag_max_args.unwrap_or(DEFAULT_MAX_TOKENS);
    if args.flag_version {
        println!("msh version {}", env!("CARGO_PKG_VERSION"));
    } else if args.flag_c || args.arg_file.is_some() {
        execute_from_command_string_or_file(&args, max_args);
    } else {
        execute_from_stdin(max_args);
    }
}

fn init_logger(path: &Option<String>) -> Result<()> {
    let log_path = match path.clone().map(PathBuf::from).or_else(default_log_path) {
        Some(log_path) => log_path,
        None => return Err("unable to locate home directory for the log file".into()),
    };

    let pid = Pid::this();
    fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "{} [{}] {}: {}",
                pid,
                record.level(),
                record.target(),
                message
            ))
        })
        .level(log::LevelFilter::Trace)
        .chain(fern::log_file(log_path)?)
        .apply()?;
    Ok(())
}

fn default_log_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(LOG_FILE_NAME))
}

fn execute_from_command_string_or_file(args: &Args, max_args: usize) -> ! {
    let mut shell = create_shell(ShellConfig::noninteractive(max_args));

    let result = if let Some(ref command) = args.arg_command {
        let mut stdout = std::io::stdout();
        shell.execute_command_string(command, &mut stdout)
    } else if let Some(ref file_path) = args.arg_file {
        shell.execute_commands_from_file(file_path)
    } else {
        unreachable!();
    };

    if let Err(e) = result {
        error!("{}", e.display_chain_inline());
        eprintln!("msh: error: {}", e.display_chain_inline());
        shell.exit(Some(ExitStatus::from_failure()));
    }
    shell.exit(None)
}

fn execute_from_stdin(max_args: usize) -> ! {
    let mut shell = create_shell(ShellConfig::interactive(max_args));
    if let Err(e) = shell.execute_from_stdin() {
        error!("reading commands failed: {}", e.display_chain_inline());
        eprintln!("msh: error: {}", e.display_chain_inline());
        shell.exit(Some(ExitStatus::from_failure()));
    }
    shell.exit(None)
}
