//! Build target identifiers.
//!
//! A target addresses one flake package output, named `<package>-py<version>`.

use crate::consts::{PYTHON_PACKAGES, PYTHON_VERSIONS, TEST_TARGET};

/// Returns the flake attribute path for `package` built against Python `version`.
pub fn make_target(package: &str, version: &str) -> String {
  format!(".#{}-py{}", package, version)
}

/// Builds the cross product of `versions` and `packages`.
///
/// Ordering is version-major, package-minor: every package for the first
/// version, then every package for the second, and so on.
pub fn build_matrix<V, P>(versions: &[V], packages: &[P]) -> Vec<String>
where
  V: AsRef<str>,
  P: AsRef<str>,
{
  versions
    .iter()
    .flat_map(|version| {
      packages
        .iter()
        .map(move |package| make_target(package.as_ref(), version.as_ref()))
    })
    .collect()
}

/// The full matrix over the supported Python versions and packages.
pub fn default_matrix() -> Vec<String> {
  build_matrix(PYTHON_VERSIONS, PYTHON_PACKAGES)
}

/// The single-target batch used to verify the environment.
pub fn test_batch() -> Vec<String> {
  vec![TEST_TARGET.to_string()]
}
