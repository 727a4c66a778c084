//! Executable lookup on `PATH`.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Resolves `name` against the current `PATH`.
pub fn find_executable(name: &str) -> Option<PathBuf> {
  let path = std::env::var_os("PATH")?;
  find_in_path(name, &path)
}

/// Resolves `name` against an explicit `PATH`-style search list.
///
/// Returns the first candidate that is a regular file and, on Unix, has an
/// execute bit set.
pub fn find_in_path(name: &str, search: &OsStr) -> Option<PathBuf> {
  std::env::split_paths(search)
    .filter(|dir| !dir.as_os_str().is_empty())
    .flat_map(|dir| candidates(&dir, name))
    .find(|candidate| is_executable(candidate))
}

#[cfg(windows)]
fn candidates(dir: &Path, name: &str) -> Vec<PathBuf> {
  vec![dir.join(format!("{}.exe", name)), dir.join(name)]
}

#[cfg(not(windows))]
fn candidates(dir: &Path, name: &str) -> Vec<PathBuf> {
  vec![dir.join(name)]
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
  use std::os::unix::fs::PermissionsExt;

  path
    .metadata()
    .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
    .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
  path.is_file()
}
