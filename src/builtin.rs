use crate::command::{ExecutableCommand, ExitCode};
use crate::env::Environment;
use crate::error::{Result, ShellError};
use argh::{EarlyExit, FromArgs};
use log::debug;
use std::io::Write;

/// Names of the commands implemented inside the shell itself.
pub const BUILTINS: [&str; 3] = ["exit", "echo", "type"];

/// Whether `name` refers to a builtin rather than an external program.
pub fn is_builtin(name: &str) -> bool {
    BUILTINS.contains(&name)
}

/// Built-in commands known to the shell at compile time.
///
/// Builtins are executed directly in-process without spawning a child process.
pub(crate) trait BuiltinCommand: Sized {
    /// Canonical name of the command, e.g. "echo" or "type".
    fn name() -> &'static str;

    /// Build the command from its arguments, not including the command name.
    fn from_argv(args: &[&str]) -> std::result::Result<Self, EarlyExit>;

    /// Executes the command using the provided output stream and environment.
    ///
    /// Return value should follow shell conventions: 0 for success, non-zero for error.
    fn execute(self, stdout: &mut dyn Write, env: &mut Environment) -> Result<ExitCode>;
}

impl<T: BuiltinCommand> ExecutableCommand for T {
    fn execute(
        self: Box<Self>,
        stdout: &mut dyn Write,
        env: &mut Environment,
    ) -> Result<ExitCode> {
        BuiltinCommand::execute(*self, stdout, env)
    }
}

/// Help text or a usage error produced by the argument parser instead of a command.
struct InvalidArgs {
    output: String,
    is_error: bool,
}

impl ExecutableCommand for InvalidArgs {
    fn execute(
        self: Box<Self>,
        stdout: &mut dyn Write,
        _env: &mut Environment,
    ) -> Result<ExitCode> {
        stdout.write_all(self.output.as_bytes())?;
        Ok(if self.is_error { 1 } else { 0 })
    }
}

fn parse_with_argh<T: BuiltinCommand + FromArgs>(
    args: &[&str],
) -> std::result::Result<T, EarlyExit> {
    T::from_args(&[T::name()], args)
}

fn create<T: BuiltinCommand + 'static>(args: &[&str]) -> Box<dyn ExecutableCommand> {
    match T::from_argv(args) {
        Ok(cmd) => Box::new(cmd),
        Err(EarlyExit { output, status }) => Box::new(InvalidArgs {
            output,
            is_error: status.is_err(),
        }),
    }
}

/// Instantiate the builtin called `name`, or `None` if there is no such builtin.
pub(crate) fn create_builtin(name: &str, args: &[&str]) -> Option<Box<dyn ExecutableCommand>> {
    debug!("dispatching builtin {name} with args {args:?}");
    match name {
        "exit" => Some(create::<Exit>(args)),
        "echo" => Some(create::<Echo>(args)),
        "type" => Some(create::<Type>(args)),
        _ => None,
    }
}

#[derive(FromArgs)]
/// Exit the shell.
pub struct Exit {
    #[argh(positional)]
    /// status to exit with, 0 when omitted.
    pub code: Option<String>,
}

impl BuiltinCommand for Exit {
    fn name() -> &'static str {
        "exit"
    }

    fn from_argv(args: &[&str]) -> std::result::Result<Self, EarlyExit> {
        // argh would take a negative status such as `-1` for an unknown flag.
        if let [code] = args {
            if code.parse::<ExitCode>().is_ok() {
                return Ok(Exit {
                    code: Some(code.to_string()),
                });
            }
        }
        parse_with_argh(args)
    }

    fn execute(self, _stdout: &mut dyn Write, env: &mut Environment) -> Result<ExitCode> {
        let code = match self.code {
            None => 0,
            Some(arg) => arg
                .parse::<ExitCode>()
                .map_err(|_| ShellError::InvalidExitCode(arg))?,
        };
        env.request_exit(code);
        Ok(code)
    }
}

/// Write the arguments to standard output, separated by single spaces and
/// followed by a newline.
///
/// Unlike the other builtins, nothing is interpreted as an option.
pub struct Echo {
    pub args: Vec<String>,
}

impl BuiltinCommand for Echo {
    fn name() -> &'static str {
        "echo"
    }

    fn from_argv(args: &[&str]) -> std::result::Result<Self, EarlyExit> {
        Ok(Echo {
            args: args.iter().map(|s| s.to_string()).collect(),
        })
    }

    fn execute(self, stdout: &mut dyn Write, _env: &mut Environment) -> Result<ExitCode> {
        let words: Vec<&str> = self
            .args
            .iter()
            .map(String::as_str)
            .filter(|s| !s.is_empty())
            .collect();
        writeln!(stdout, "{}", words.join(" "))?;
        Ok(0)
    }
}

#[derive(FromArgs)]
/// Display how each name would be interpreted if used as a command.
pub struct Type {
    #[argh(positional, greedy)]
    /// command names to look up.
    pub names: Vec<String>,
}

impl BuiltinCommand for Type {
    fn name() -> &'static str {
        "type"
    }

    fn from_argv(args: &[&str]) -> std::result::Result<Self, EarlyExit> {
        parse_with_argh(args)
    }

    fn execute(self, stdout: &mut dyn Write, env: &mut Environment) -> Result<ExitCode> {
        let mut status = 0;
        for name in &self.names {
            if is_builtin(name) {
                writeln!(stdout, "{name} is a shell builtin")?;
            } else if let Some(path) = env.search_path.resolve(name) {
                writeln!(stdout, "{name} is {}", path.display())?;
            } else {
                writeln!(stdout, "{name}: not found")?;
                status = 1;
            }
        }
        Ok(status)
    }
}
