use crate::command::{ExecutableCommand, ExitCode};
use crate::env::{Environment, SearchPath};
use crate::error::{Result, ShellError};
use log::{debug, warn};
use std::ffi::OsStr;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};

/// Command that is not a builtin, resolved to a file on disk.
pub struct ExternalCommand {
    path: PathBuf,
    name: String,
    args: Vec<String>,
}

impl ExternalCommand {
    /// `name` is what the user typed; it becomes `argv[0]` of the child.
    pub fn new(path: PathBuf, name: impl Into<String>, args: &[String]) -> Self {
        Self {
            path,
            name: name.into(),
            args: args.to_vec(),
        }
    }

    fn spawn(&self) -> Result<Child> {
        let mut cmd = Command::new(&self.path);
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            cmd.arg0(&self.name);
        }
        cmd.args(&self.args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| ShellError::Spawn {
                name: self.name.clone(),
                path: self.path.clone(),
                source,
            })
    }
}

impl ExecutableCommand for ExternalCommand {
    fn execute(
        self: Box<Self>,
        stdout: &mut dyn Write,
        _env: &mut Environment,
    ) -> Result<ExitCode> {
        debug!("spawning {} with args {:?}", self.path.display(), self.args);
        let mut child = match self.spawn() {
            Ok(child) => child,
            Err(e) => {
                warn!("{e}");
                return Err(e);
            }
        };

        // The child is reaped even if relaying its output fails.
        let relayed = match child.stdout.take() {
            Some(mut pipe) => relay(&mut pipe, stdout),
            None => Ok(()),
        };
        let exit_status = child.wait()?;
        relayed?;

        debug!("{} exited with {}", self.name, exit_status);
        Ok(match exit_status.code() {
            Some(x) => x,
            None => terminated_by_signal(exit_status),
        })
    }
}

/// Copy everything from `from` into `to`, flushing after every chunk so the output
/// shows up as soon as the child produces it.
fn relay(from: &mut dyn Read, to: &mut dyn Write) -> io::Result<()> {
    let mut buf = [0u8; 8192];
    loop {
        let n = match from.read(&mut buf) {
            Ok(0) => return to.flush(),
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        to.write_all(&buf[..n])?;
        to.flush()?;
    }
}

#[cfg(unix)]
fn terminated_by_signal(exit_status: ExitStatus) -> ExitCode {
    use std::os::unix::process::ExitStatusExt;
    if let Some(signal) = ExitStatusExt::signal(&exit_status) {
        128 + signal
    } else if ExitStatusExt::core_dumped(&exit_status) {
        255
    } else {
        -1
    }
}

#[cfg(not(unix))]
fn terminated_by_signal(_exit_status: ExitStatus) -> ExitCode {
    -1
}

/// Resolve a command name to a file on disk.
///
/// Behavior:
/// - Empty name: returns `None`.
/// - Absolute path: returns it if it exists.
/// - Anything else, including names with separators (`sh`, `bin/tool`, `./tool`):
///   join it onto each directory of `search_path` in order and return the first
///   `dir/name` that exists. The name is joined as typed, so `sh/` only matches a
///   directory.
///
/// Only existence is checked. A file without execute permission still matches and
/// fails later, when it is spawned.
pub fn find_command_path(search_path: &SearchPath, name: &str) -> Option<PathBuf> {
    let path = Path::new(name);
    let found = if name.is_empty() {
        None
    } else if path.is_absolute() {
        find_by_path(path)
    } else {
        find_in_path(search_path, OsStr::new(name))
    };
    debug!("resolved {name:?} to {found:?}");
    found
}

fn find_in_path(search_path: &SearchPath, cmd: &OsStr) -> Option<PathBuf> {
    search_path
        .iter()
        .map(|dir| dir.join(cmd))
        .find(|path| path.exists())
}

fn find_by_path(path: &Path) -> Option<PathBuf> {
    if path.exists() {
        Some(path.to_path_buf())
    } else {
        None
    }
}
