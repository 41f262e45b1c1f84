//! Fixture tables: sweeps paired with the shape they must classify as.
//!
//! Tables are plain JSON so a harness can be pointed at any set of
//! recordings:
//!
//! ```json
//! { "cases": [ { "input": "tree-cover-square-path-0.gif", "expected": "square" } ] }
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::shape::SweepShape;

/// File names of the bundled regression sweeps, with their expected shape.
pub const DEFAULT_FIXTURES: [(&str, SweepShape); 4] = [
    ("tree-cover-square-path-0.gif", SweepShape::Rectangular),
    ("tree-cover-square-path-1.gif", SweepShape::Rectangular),
    ("tree-cover-triangle-path-0.gif", SweepShape::Triangular),
    ("tree-cover-triangle-path-1.gif", SweepShape::Triangular),
];

/// One sweep and the shape it is expected to classify as.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixtureCase {
    /// Path to the animated GIF. Relative paths resolve against the table's base.
    pub input: PathBuf,

    /// Expected classification.
    pub expected: SweepShape,
}

/// An ordered list of fixture cases.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixtureTable {
    pub cases: Vec<FixtureCase>,
}

impl FixtureTable {
    pub fn new(cases: Vec<FixtureCase>) -> Self {
        Self { cases }
    }

    /// The four regression sweeps, located in `assets_dir`.
    pub fn default_sweeps(assets_dir: &Path) -> Self {
        Self {
            cases: DEFAULT_FIXTURES
                .iter()
                .map(|(name, expected)| FixtureCase {
                    input: assets_dir.join(name),
                    expected: *expected,
                })
                .collect(),
        }
    }

    /// Load a table from JSON. Relative inputs resolve against the file's directory.
    pub fn load(path: &Path) -> Result<Self, FixtureError> {
        let content = std::fs::read_to_string(path).map_err(|e| FixtureError::IoError {
            path: path.to_path_buf(),
            source: e,
        })?;
        let table: FixtureTable =
            serde_json::from_str(&content).map_err(|e| FixtureError::ParseError {
                path: path.to_path_buf(),
                source: e,
            })?;
        if table.cases.is_empty() {
            return Err(FixtureError::ValidationError {
                message: format!("fixture table {} has no cases", path.display()),
            });
        }
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        Ok(table.resolved_against(base))
    }

    /// Save the table as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<(), FixtureError> {
        let json = serde_json::to_string_pretty(self).map_err(|e| FixtureError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;
        std::fs::write(path, json).map_err(|e| FixtureError::IoError {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Copy of the table with relative inputs joined onto `base`.
    pub fn resolved_against(&self, base: &Path) -> Self {
        Self {
            cases: self
                .cases
                .iter()
                .map(|case| FixtureCase {
                    input: if case.input.is_absolute() {
                        case.input.clone()
                    } else {
                        base.join(&case.input)
                    },
                    expected: case.expected,
                })
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// Case at `index`, or a validation error naming the valid range.
    pub fn case(&self, index: usize) -> Result<&FixtureCase, FixtureError> {
        self.cases
            .get(index)
            .ok_or_else(|| FixtureError::ValidationError {
                message: format!(
                    "index must be between 0 and {} (inclusive)",
                    self.cases.len().saturating_sub(1)
                ),
            })
    }
}

/// Errors that can occur when working with fixture tables.
#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    #[error("I/O error at {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Parse error in {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Invalid fixture table: {message}")]
    ValidationError { message: String },
}
