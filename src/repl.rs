//! Read-eval-print loops around an [`Interpreter`].
//!
//! Both loops print the `$ ` prompt, evaluate one line at a time and stop on end of
//! input (status 0) or when `exit` has been run (its status).

use crate::Interpreter;
use crate::command::ExitCode;
use anyhow::Context;
use log::{info, warn};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::io::{BufRead, Write};

pub const PROMPT: &str = "$ ";

/// Run the loop over raw lines of `input`, without line editing.
///
/// Used when standard input is not a terminal, and by tests.
pub fn run_plain(
    sh: &mut Interpreter,
    input: &mut dyn BufRead,
    stdout: &mut dyn Write,
    stderr: &mut dyn Write,
) -> anyhow::Result<ExitCode> {
    let mut buf = Vec::new();
    loop {
        write!(stdout, "{PROMPT}")?;
        stdout.flush()?;

        buf.clear();
        if input.read_until(b'\n', &mut buf).context("failed to read input")? == 0 {
            info!("end of input");
            return Ok(0);
        }
        // Invalid UTF-8 is replaced rather than aborting the loop.
        let line = String::from_utf8_lossy(&buf);
        let trimmed = line.strip_suffix('\n').unwrap_or(&line);
        let trimmed = trimmed.strip_suffix('\r').unwrap_or(trimmed);

        sh.eval(trimmed, stdout, stderr)?;
        if let Some(code) = sh.exit_requested() {
            return Ok(code);
        }
    }
}

/// Run the loop on the terminal with line editing and history.
///
/// Ctrl-C drops the line being edited and shows a fresh prompt; Ctrl-D exits.
pub fn run_editor(sh: &mut Interpreter) -> anyhow::Result<ExitCode> {
    let mut rl = DefaultEditor::new().context("failed to initialize line editor")?;
    let mut stdout = std::io::stdout();
    let mut stderr = std::io::stderr();

    loop {
        match rl.readline(PROMPT) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    rl.add_history_entry(line.as_str())?;
                }
                sh.eval(&line, &mut stdout, &mut stderr)?;
                if let Some(code) = sh.exit_requested() {
                    return Ok(code);
                }
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => {
                info!("end of input");
                return Ok(0);
            }
            Err(err) => {
                warn!("line editor failed: {err}");
                return Err(err).context("failed to read input");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::SearchPath;
    use std::io::Cursor;

    fn run(sh: &mut Interpreter, input: impl AsRef<[u8]>) -> (ExitCode, String, String) {
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        let mut input = Cursor::new(input.as_ref());
        let code = run_plain(sh, &mut input, &mut stdout, &mut stderr).unwrap();
        (
            code,
            String::from_utf8(stdout).unwrap(),
            String::from_utf8(stderr).unwrap(),
        )
    }

    #[test]
    fn test_prompts_before_each_line() {
        let mut sh = Interpreter::default();
        let (code, out, err) = run(&mut sh, "echo hello\n\necho world\n");
        assert_eq!(code, 0);
        assert_eq!(out, "$ hello\n$ $ world\n$ ");
        assert!(err.is_empty());
    }

    #[test]
    fn test_empty_input_exits_cleanly() {
        let mut sh = Interpreter::default();
        let (code, out, _) = run(&mut sh, "");
        assert_eq!(code, 0);
        assert_eq!(out, "$ ");
    }

    #[test]
    fn test_last_line_without_newline() {
        let mut sh = Interpreter::default();
        let (_, out, _) = run(&mut sh, "echo done");
        assert_eq!(out, "$ done\n$ ");
    }

    #[test]
    fn test_crlf_line_endings() {
        let mut sh = Interpreter::default();
        let (code, out, _) = run(&mut sh, "type echo\r\nexit 4\r\n");
        assert_eq!(code, 4);
        assert_eq!(out, "$ echo is a shell builtin\n$ ");
    }

    #[test]
    fn test_exit_stops_reading() {
        let mut sh = Interpreter::default();
        let (code, out, _) = run(&mut sh, "exit 3\necho unreachable\n");
        assert_eq!(code, 3);
        assert_eq!(out, "$ ");
    }

    #[test]
    fn test_bad_exit_code_continues() {
        let mut sh = Interpreter::new(SearchPath::default());
        let (code, out, err) = run(&mut sh, "exit abc\nmissing\nexit\n");
        assert_eq!(code, 0);
        assert_eq!(out, "$ $ missing: command not found\n$ ");
        assert_eq!(err, "exit: abc: numeric argument required\n");
    }

    #[test]
    fn test_invalid_utf8_line_does_not_stop_the_loop() {
        let mut sh = Interpreter::default();
        let (code, out, err) = run(&mut sh, b"echo \xff\necho ok\n");
        assert_eq!(code, 0);
        assert_eq!(out, "$ \u{FFFD}\n$ ok\n$ ");
        assert!(err.is_empty());
    }
}
