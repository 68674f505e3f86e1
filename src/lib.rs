//! Msh - Mini Shell
//!
//! Reads command lines, runs each as a child process in the foreground or
//! the background, and reports when background jobs finish.

#![warn(
    missing_debug_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unused_import_braces,
    unused_qualifications
)]
#![recursion_limit = "1024"]

#[macro_use]
extern crate error_chain;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;

macro_rules! log_if_err {
    ($result:expr, $fmt:expr) => {{
        if let Err(ref e) = $result {
            error!(concat!($fmt, ": {}"), e);
        }
    }};
    ($result:expr, $fmt:expr, $($arg:tt)*) => {{
        if let Err(ref e) = $result {
            error!(concat!($fmt, ": {}"), $($arg)*, e);
        }
    }};
}

pub mod core;
pub mod errors;
pub mod shell;
mod util;

pub use crate::shell::{create_shell, Shell, ShellConfig};
pub use crate::util::MshExitStatusExt;
