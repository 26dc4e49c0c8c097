use crate::command::ExitCode;
use std::env as stdenv;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Name of the environment variable holding the executable search path.
pub const PATH_VAR: &str = "PATH";

/// Ordered list of directories searched for external commands.
///
/// Built once at startup and never modified afterwards. An unset variable gives an
/// empty search path, in which case no external command can be resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPath {
    dirs: Vec<PathBuf>,
}

impl SearchPath {
    /// Read the search path from the `PATH` variable of the current process.
    pub fn from_process_env() -> Self {
        Self::parse(stdenv::var_os(PATH_VAR).as_deref())
    }

    /// Split a raw variable value on the platform separator (`:` on Unix).
    ///
    /// Empty entries are dropped rather than treated as the current directory.
    pub fn parse(value: Option<&OsStr>) -> Self {
        let dirs = value
            .map(|v| {
                stdenv::split_paths(v)
                    .filter(|dir| !dir.as_os_str().is_empty())
                    .collect()
            })
            .unwrap_or_default();
        Self { dirs }
    }

    pub fn from_dirs<I, P>(dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            dirs: dirs.into_iter().map(Into::into).collect(),
        }
    }

    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }

    /// Look `name` up in this search path. See [`crate::find_command_path`].
    pub fn resolve(&self, name: &str) -> Option<PathBuf> {
        crate::external::find_command_path(self, name)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &Path> {
        self.dirs.iter().map(PathBuf::as_path)
    }
}

/// State shared between the interpreter and the commands it runs.
///
/// The environment contains:
/// - `search_path`: directories searched for external commands, fixed at startup.
/// - `exit_code`: set by `exit`; a REPL loop checks it to know when to terminate.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    pub search_path: SearchPath,
    pub exit_code: Option<ExitCode>,
}

impl Environment {
    pub fn new(search_path: SearchPath) -> Self {
        Self {
            search_path,
            exit_code: None,
        }
    }

    /// Capture the search path of the current process.
    pub fn from_process_env() -> Self {
        Self::new(SearchPath::from_process_env())
    }

    /// Ask the surrounding loop to stop and terminate the process with `code`.
    pub fn request_exit(&mut self, code: ExitCode) {
        self.exit_code = Some(code);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keeps_directory_order() {
        let path = SearchPath::parse(Some(OsStr::new("/usr/local/bin:/usr/bin:/bin")));
        assert_eq!(
            path.dirs(),
            &[
                PathBuf::from("/usr/local/bin"),
                PathBuf::from("/usr/bin"),
                PathBuf::from("/bin")
            ]
        );
    }

    #[test]
    fn test_unset_variable_is_empty() {
        let path = SearchPath::parse(None);
        assert!(path.is_empty());
        assert_eq!(path.resolve("sh"), None);
    }

    #[test]
    fn test_empty_entries_are_dropped() {
        let path = SearchPath::parse(Some(OsStr::new("::/bin::")));
        assert_eq!(path.dirs(), &[PathBuf::from("/bin")]);

        assert!(SearchPath::parse(Some(OsStr::new(""))).is_empty());
    }

    #[test]
    fn test_reads_from_process_env() {
        let env = Environment::from_process_env();
        assert!(!env.search_path.is_empty());
        assert_eq!(env.exit_code, None);
    }

    #[test]
    fn test_request_exit() {
        let mut env = Environment::default();
        env.request_exit(7);
        assert_eq!(env.exit_code, Some(7));
    }
}
