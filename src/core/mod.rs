//! Parsing and bookkeeping that does not touch the operating system.

pub mod command;
pub mod job;
pub mod tokenizer;
