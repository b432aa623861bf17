//! CLI command implementations

pub mod presets;
pub mod render;
pub mod sheet;
pub mod validate;

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Writes `bytes` to `path`, creating missing parent directories.
pub(crate) fn write_output(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::write(path, bytes).with_context(|| format!("Failed to write file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_output_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("nested").join("frame.png");
        write_output(&path, b"data").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"data");
    }
}
