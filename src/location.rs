//! Source location primitives shared by every language extractor.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// A single point in a source file, 1-indexed to match editor conventions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SourceLocation {
    pub line: u32,
    pub column: u32,
}

impl SourceLocation {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

/// A location anchored to the file it came from. `FileAnalysis`-level
/// structures carry bare `SourceLocation`s because the file is implicit from
/// context; cross-file structures (call sites, type origins) carry this
/// instead so the file travels with the position.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileLocation {
    pub file: PathBuf,
    pub location: SourceLocation,
}

impl FileLocation {
    pub fn new(file: impl Into<PathBuf>, location: SourceLocation) -> Self {
        Self {
            file: file.into(),
            location,
        }
    }

    pub fn file(&self) -> &Path {
        &self.file
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locations_order_by_line_then_column() {
        let a = SourceLocation::new(3, 9);
        let b = SourceLocation::new(3, 10);
        let c = SourceLocation::new(4, 0);
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn file_location_carries_path() {
        let loc = FileLocation::new("pkg/mod.py", SourceLocation::new(1, 0));
        assert_eq!(loc.file(), Path::new("pkg/mod.py"));
    }
}
