use crate::builtin::{create_builtin, is_builtin};
use crate::command::{ExecutableCommand, ExitCode};
use crate::env::{Environment, SearchPath};
use crate::error::ShellError;
use crate::external::ExternalCommand;
use crate::lexer;
use log::debug;
use std::io::Write;

/// Status of a command line naming a program that could not be found.
pub const COMMAND_NOT_FOUND: ExitCode = 127;

/// A minimal shell-like interpreter that can execute built-in and external commands.
///
/// Every call to [`Interpreter::eval`] processes exactly one input line: the line is
/// split into arguments, the first argument is classified as a builtin or an external
/// program, and the command is run. Nothing but the [`Environment`] survives between
/// lines.
///
/// Example
/// ```
/// use pathsh::Interpreter;
/// let mut sh = Interpreter::default();
/// let mut out = Vec::new();
/// let code = sh.eval("echo hello  world", &mut out, &mut std::io::sink()).unwrap();
/// assert_eq!(code, 0);
/// assert_eq!(out, b"hello world\n");
/// ```
#[derive(Debug, Default)]
pub struct Interpreter {
    env: Environment,
}

impl Interpreter {
    /// Create an interpreter that resolves external commands in `search_path`.
    pub fn new(search_path: SearchPath) -> Self {
        Self {
            env: Environment::new(search_path),
        }
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    /// Exit code requested by the `exit` builtin, if it has run.
    pub fn exit_requested(&self) -> Option<ExitCode> {
        self.env.exit_code
    }

    /// Evaluate one input line and return the status of the command it ran.
    ///
    /// Command output goes to `stdout`; reportable failures (bad `exit` operand, a
    /// program that cannot be started) are printed on `stderr` and turned into a
    /// non-zero status. Only failures to write to the streams are returned as errors.
    pub fn eval(
        &mut self,
        line: &str,
        stdout: &mut dyn Write,
        stderr: &mut dyn Write,
    ) -> anyhow::Result<ExitCode> {
        let args = lexer::split_into_tokens(line);
        debug!("tokens: {args:?}");
        let Some((name, rest)) = args.split_first() else {
            return Ok(0);
        };

        let Some(cmd) = self.classify(name, rest) else {
            writeln!(stdout, "{name}: command not found")?;
            stdout.flush()?;
            return Ok(COMMAND_NOT_FOUND);
        };

        let status = match cmd.execute(stdout, &mut self.env) {
            Ok(code) => code,
            Err(ShellError::Io(e)) => return Err(e.into()),
            Err(e) => {
                writeln!(stderr, "{e}")?;
                stderr.flush()?;
                e.status()
            }
        };
        stdout.flush()?;
        Ok(status)
    }

    /// Pick the builtin or the resolved external program `name` refers to.
    fn classify(&self, name: &str, args: &[String]) -> Option<Box<dyn ExecutableCommand>> {
        if is_builtin(name) {
            let args: Vec<&str> = args.iter().map(String::as_str).collect();
            return create_builtin(name, &args);
        }
        let path = self.env.search_path.resolve(name)?;
        debug!("{name} is external: {}", path.display());
        Some(Box::new(ExternalCommand::new(path, name, args)))
    }
}
