//! Fixtures shared by the unit tests.

use std::fs;
use std::io::Write;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, OnceLock};

/// Serializes tests that write executables and spawn processes.
///
/// A file still open for writing in one thread is inherited by a child forked in
/// another, and executing it then fails with `ETXTBSY`.
pub fn lock_exec() -> MutexGuard<'static, ()> {
    static MUTEX: OnceLock<Mutex<()>> = OnceLock::new();
    MUTEX
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Write a `/bin/sh` script named `name` into `dir` and make it executable.
pub fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = write_file(dir, name, &format!("#!/bin/sh\n{body}\n"));
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).expect("chmod script");
    path
}

/// Write a plain, non-executable file named `name` into `dir`.
pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    let mut file = fs::File::create(&path).expect("create file");
    file.write_all(contents.as_bytes()).expect("write file");
    file.sync_all().expect("sync file");
    path
}
