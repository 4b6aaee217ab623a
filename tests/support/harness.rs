use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// TestHarness provides an isolated working directory for running the
/// pedigree binary. The directory is removed when the harness is dropped.
pub struct TestHarness {
    pub dir: TempDir,
    pub config_path: PathBuf,
    pub pedigree_binary: PathBuf,
}

impl TestHarness {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join(".pedigree/config.md");

        TestHarness {
            dir: temp_dir,
            config_path,
            pedigree_binary: PathBuf::from(env!("CARGO_BIN_EXE_pedigree")),
        }
    }

    /// Creates a harness with a project config at `.pedigree/config.md`.
    pub fn with_config(config_content: &str) -> Self {
        let harness = Self::new();
        fs::create_dir_all(harness.path().join(".pedigree")).expect("Failed to create config dir");
        fs::write(&harness.config_path, config_content).expect("Failed to write config");
        harness
    }

    /// Returns the base directory path (the TempDir path).
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Writes a file relative to the harness directory and returns its path.
    pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path().join(name);
        fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// Copies a fixture into the harness directory and returns its path.
    pub fn copy_fixture(&self, name: &str) -> PathBuf {
        let content = super::fixtures::load_fixture(name);
        self.write_file(name, &content)
    }

    /// Executes the pedigree binary with the given arguments in the harness
    /// directory. Colors are disabled so output can be matched literally.
    pub fn run(&self, args: &[&str]) -> Output {
        Command::new(&self.pedigree_binary)
            .args(args)
            .current_dir(self.path())
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG")
            .env_remove("PEDIGREE_QUIET")
            .output()
            .expect("Failed to run pedigree")
    }
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}
