//! Shared test utilities for integration tests.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::PropertiesFixture;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = PropertiesFixture::new().with_file("app.properties", "a=1\n");
//!     // ... test code
//! }
//! ```

use std::path::{Path, PathBuf};

use collection_kit::properties::ExtendedProperties;
use tempfile::TempDir;

/// Routes `log` output to the test harness. Safe to call more than once.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A temporary directory holding property files.
#[allow(dead_code)]
pub struct PropertiesFixture {
    dir: TempDir,
}

#[allow(dead_code)]
impl PropertiesFixture {
    pub fn new() -> Self {
        init_logging();
        Self {
            dir: TempDir::new().expect("failed to create temp dir"),
        }
    }

    /// Writes `content` to `name` (relative to the fixture root).
    pub fn with_file(self, name: &str, content: &str) -> Self {
        self.write(name, content);
        self
    }

    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("failed to create fixture dirs");
        }
        std::fs::write(&path, content).expect("failed to write fixture file");
        path
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Loads `name` with [`ExtendedProperties::from_file`].
    pub fn load(&self, name: &str) -> ExtendedProperties {
        ExtendedProperties::from_file(self.path(name)).expect("failed to load fixture")
    }
}

/// Common property file snippets.
#[allow(dead_code)]
pub mod snippets {
    /// Lists, escapes and a continued line.
    pub const MIXED: &str = r#"# application settings
! alternate comment marker

app.name = demo
app.root = /srv/demo
app.data = ${app.root}/data
app.hosts = alpha, beta,\
            gamma
app.motto = work\, then play
app.share = \\\\server\\share
"#;
}
