pub const APP_NAME: &str = "mlcache";

/// Binary cache that successful build outputs are pushed to.
pub const CACHE_NAME: &str = "ml-rocm";

pub const CACHE_TOOL: &str = "cachix";
pub const BUILD_TOOL: &str = "nix";

/// Executables that must resolve on `PATH` before any build is attempted.
pub const REQUIRED_TOOLS: [&str; 2] = [CACHE_TOOL, BUILD_TOOL];

// TODO: add 313 once the ROCm torch builds support it
pub const PYTHON_VERSIONS: &[&str] = &["311", "312"];
pub const PYTHON_PACKAGES: &[&str] = &["torch", "torchaudio", "torchvision"];

/// Target built by the diagnostic test batch.
pub const TEST_TARGET: &str = ".#test-artifact";

/// Fallback source for the nixpkgs revision override.
pub const REVISION_ENV_VAR: &str = "NIXPKGS_REV";

pub const DOTENV_FILE: &str = ".env";

/// Flake input replaced by a revision override.
pub const OVERRIDE_INPUT: &str = "nixpkgs";
pub const NIXPKGS_FLAKE_URL: &str = "github:nixos/nixpkgs";
