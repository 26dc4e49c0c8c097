//! A minimal interactive shell.
//!
//! Each input line is split into whitespace-separated arguments. The first argument
//! is either one of the built-in commands (`exit`, `echo`, `type`) or the name of an
//! executable, which is looked up in the directories of the search path and spawned
//! as a child process with its standard output relayed back to the shell.
//!
//! The main entry point is [`Interpreter`], which evaluates one line at a time.
//! The [`repl`] module contains the read-eval-print loops built on top of it.

mod builtin;
pub mod command;
pub mod env;
pub mod error;
mod external;
mod interpreter;
mod lexer;
pub mod repl;

#[cfg(all(test, unix))]
mod testing;

pub use builtin::{BUILTINS, is_builtin};
pub use env::{Environment, SearchPath};
pub use error::ShellError;
pub use external::find_command_path;
pub use interpreter::Interpreter;
pub use lexer::split_into_tokens;
