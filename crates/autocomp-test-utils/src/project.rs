//! [`TestProject`] builder for component discovery and transform scenarios.

use std::fs;
use std::path::Path;

use autocomp_fs::{NormalizedPath, canonicalize_root};
use tempfile::TempDir;

/// A temporary project directory with helpers for writing components,
/// consumers and configuration.
///
/// # Example
///
/// ```rust,no_run
/// use autocomp_test_utils::TestProject;
///
/// let project = TestProject::new();
/// project.component("src/components/Card.svelte");
/// project.config("directory-as-namespace = true");
/// project.assert_file_exists("autocomp.toml");
/// ```
pub struct TestProject {
    temp_dir: TempDir,
    root: NormalizedPath,
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

impl TestProject {
    /// Create an empty temporary project.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        // Canonical so paths match what the filesystem and watchers report
        let root = canonicalize_root(temp_dir.path()).unwrap();
        Self { temp_dir, root }
    }

    /// Native path of the project root.
    pub fn dir(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Canonical, normalized project root.
    pub fn root(&self) -> NormalizedPath {
        self.root.clone()
    }

    /// Absolute normalized path of `rel`.
    pub fn path(&self, rel: &str) -> NormalizedPath {
        self.root.join(rel)
    }

    /// Write `content` to `rel`, creating parent directories.
    pub fn write(&self, rel: &str, content: &str) -> NormalizedPath {
        let path = self.path(rel);
        let native = path.to_native();
        if let Some(parent) = native.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&native, content).unwrap();
        path
    }

    /// Write a minimal component file at `rel`.
    pub fn component(&self, rel: &str) -> NormalizedPath {
        self.write(rel, "<div><slot /></div>\n")
    }

    /// Write several minimal components.
    pub fn components(&self, rels: &[&str]) -> Vec<NormalizedPath> {
        rels.iter().map(|rel| self.component(rel)).collect()
    }

    /// Write `autocomp.toml`.
    pub fn config(&self, toml: &str) {
        self.write("autocomp.toml", toml);
    }

    /// Pretend TypeScript is installed.
    pub fn install_typescript(&self) {
        self.write("node_modules/typescript/package.json", "{\"name\":\"typescript\"}");
    }

    pub fn read(&self, rel: &str) -> String {
        let path = self.path(rel);
        fs::read_to_string(path.to_native())
            .unwrap_or_else(|_| panic!("Could not read file: {}", path))
    }

    pub fn remove(&self, rel: &str) {
        fs::remove_file(self.path(rel).to_native()).unwrap();
    }

    /// Assert that `rel` exists.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_file_exists(&self, rel: &str) {
        let path = self.path(rel);
        assert!(path.exists(), "Expected file to exist: {}", path);
    }

    /// Assert that `rel` does **not** exist.
    pub fn assert_file_not_exists(&self, rel: &str) {
        let path = self.path(rel);
        assert!(!path.exists(), "Expected file NOT to exist: {}", path);
    }

    /// Assert that the file at `rel` contains `content`.
    pub fn assert_file_contains(&self, rel: &str, content: &str) {
        let file_content = self.read(rel);
        assert!(
            file_content.contains(content),
            "File {} does not contain expected content.\nExpected: {}\nActual: {}",
            rel,
            content,
            file_content
        );
    }
}
