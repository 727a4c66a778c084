//! Shared test helpers for CLI integration tests.

use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

/// Arguments every batch passes before the revision override and targets.
pub const BASE_ARGS: [&str; 7] = [
  "watch-exec",
  "ml-rocm",
  "--",
  "nix",
  "build",
  "--keep-going",
  "--print-build-logs",
];

/// The full matrix, version-major.
pub const FULL_MATRIX: [&str; 6] = [
  ".#torch-py311",
  ".#torchaudio-py311",
  ".#torchvision-py311",
  ".#torch-py312",
  ".#torchaudio-py312",
  ".#torchvision-py312",
];

/// Get path to a fixture file.
pub fn fixture_path(name: &str) -> PathBuf {
  PathBuf::from(env!("CARGO_MANIFEST_DIR"))
    .join("tests")
    .join("fixtures")
    .join(name)
}

/// Read fixture content.
pub fn fixture_content(name: &str) -> String {
  std::fs::read_to_string(fixture_path(name)).unwrap_or_else(|e| panic!("Failed to load fixture {}: {}", name, e))
}

/// Isolated test environment.
///
/// The temp directory is the working directory of the binary; `bin/` holds
/// the fake tools and is the whole `PATH`.
pub struct TestEnv {
  pub temp: TempDir,
}

impl TestEnv {
  /// Create an environment with both `cachix` and `nix` available.
  pub fn new() -> Self {
    Self::with_tools(&["cachix", "nix"])
  }

  /// Create an environment with only the named fake tools installed.
  pub fn with_tools(tools: &[&str]) -> Self {
    let temp = TempDir::new().unwrap();
    let env = Self { temp };
    std::fs::create_dir_all(env.bin_path()).unwrap();
    for tool in tools {
      let fixture = match *tool {
        "cachix" => "fake_cachix.sh",
        "nix" => "fake_nix.sh",
        other => panic!("no fake for {}", other),
      };
      let path = env.bin_path().join(tool);
      std::fs::write(&path, fixture_content(fixture)).unwrap();
      std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    }
    env
  }

  pub fn bin_path(&self) -> PathBuf {
    self.temp.path().join("bin")
  }

  pub fn args_path(&self) -> PathBuf {
    self.temp.path().join("cachix-args")
  }

  pub fn env_probe_path(&self) -> PathBuf {
    self.temp.path().join("cachix-env")
  }

  /// Write a file relative to the temp directory.
  pub fn write_file(&self, relative_path: &str, content: &str) {
    let path = self.temp.path().join(relative_path);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
  }

  /// Arguments the fake `cachix` was called with, or `None` if it never ran.
  pub fn recorded_args(&self) -> Option<Vec<String>> {
    let content = std::fs::read_to_string(self.args_path()).ok()?;
    Some(content.lines().map(str::to_string).collect())
  }

  /// Value of `DOTENV_PROBE` the fake `cachix` saw.
  pub fn recorded_probe(&self) -> Option<String> {
    let content = std::fs::read_to_string(self.env_probe_path()).ok()?;
    Some(content.trim_end().to_string())
  }

  /// Get a pre-configured Command for the mlcache binary.
  pub fn mlcache_cmd(&self) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("mlcache");
    cmd.current_dir(self.temp.path());
    cmd.env("PATH", self.bin_path());
    cmd.env("NO_COLOR", "1");
    cmd.env("MLCACHE_TEST_ARGS", self.args_path());
    cmd.env("MLCACHE_TEST_ENV", self.env_probe_path());
    cmd.env_remove("NIXPKGS_REV");
    cmd.env_remove("RUST_LOG");
    cmd.env_remove("DOTENV_PROBE");
    cmd.env_remove("FAKE_BUILD_EXIT");
    cmd
  }
}

/// Expected fake `cachix` arguments for a batch.
pub fn expected_args(override_rev: Option<&str>, targets: &[&str]) -> Vec<String> {
  let mut args: Vec<String> = BASE_ARGS.iter().map(|s| s.to_string()).collect();
  if let Some(rev) = override_rev {
    args.push("--override-input".to_string());
    args.push("nixpkgs".to_string());
    args.push(format!("github:nixos/nixpkgs/{}", rev));
  }
  args.extend(targets.iter().map(|s| s.to_string()));
  args
}
