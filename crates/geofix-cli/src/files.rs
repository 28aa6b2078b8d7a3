//! Reading and writing GeoJSON files

use anyhow::{Context, Result};
use serde_json::Value;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// Read and parse a JSON document, keeping member order
pub fn read_document(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse JSON: {}", path.display()))
}

/// Write a document as compact JSON with non-ASCII text unescaped
pub fn write_document(path: &Path, document: &Value) -> Result<()> {
    let content = serde_json::to_string(document)?;
    fs::write(path, content).with_context(|| format!("Failed to write file: {}", path.display()))
}

/// `<dir>/<stem><suffix>.<ext>` for a source path
pub fn new_file_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name: OsString = path.file_stem().map(OsString::from).unwrap_or_default();
    name.push(suffix);
    if let Some(extension) = path.extension() {
        name.push(".");
        name.push(extension);
    }
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_new_file_path() {
        assert_eq!(
            new_file_path(Path::new("data/parcels.geojson"), "_fixed"),
            PathBuf::from("data/parcels_fixed.geojson")
        );
        assert_eq!(new_file_path(Path::new("roads.json"), "-v2"), PathBuf::from("roads-v2.json"));
        assert_eq!(new_file_path(Path::new("noext"), "_fixed"), PathBuf::from("noext_fixed"));
        assert_eq!(
            new_file_path(Path::new("archive.tar.geojson"), "_fixed"),
            PathBuf::from("archive.tar_fixed.geojson")
        );
    }

    #[test]
    fn test_write_keeps_order_and_unicode() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.geojson");
        let document: Value =
            serde_json::from_str(r#"{"type":"Feature","properties":{"name":"Dénpasar","a":1},"geometry":null}"#)
                .unwrap();

        write_document(&path, &document).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, r#"{"type":"Feature","properties":{"name":"Dénpasar","a":1},"geometry":null}"#);
        assert_eq!(read_document(&path).unwrap(), document);
    }

    #[test]
    fn test_read_invalid_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.geojson");
        fs::write(&path, "{\"type\": ").unwrap();

        let err = read_document(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse JSON"));
        assert!(read_document(&dir.path().join("missing.geojson")).is_err());
    }
}
