pub mod completions;
pub mod list;
pub mod man_pages;
pub mod render;

use devcompose_core::CoreError;
use devcompose_schema::ResourceSet;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_FAILURE: u8 = 1;
pub const EXIT_MANIFEST_ERROR: u8 = 2;
pub const EXIT_CONTEXT_ERROR: u8 = 3;

pub fn json_pretty(value: &impl serde::Serialize) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|e| format!("JSON serialization failed: {e}"))
}

pub fn load_resources(files: &[PathBuf]) -> Result<ResourceSet, String> {
    ResourceSet::from_files(files).map_err(|e| CoreError::from(e).to_string())
}

pub fn status_label(ok: bool) -> String {
    use console::Style;
    if ok {
        Style::new().green().apply_to("ok").to_string()
    } else {
        Style::new().red().apply_to("unresolved").to_string()
    }
}

pub fn write_atomic(dest: &Path, content: &str) -> Result<(), String> {
    let dir = match dest.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let mut tmp = NamedTempFile::new_in(&dir).map_err(|e| format!("write temp file: {e}"))?;
    use std::io::Write;
    tmp.write_all(content.as_bytes())
        .map_err(|e| format!("write temp file: {e}"))?;
    tmp.as_file()
        .sync_all()
        .map_err(|e| format!("fsync temp file: {e}"))?;
    tmp.persist(dest)
        .map_err(|e| format!("persist {}: {}", dest.display(), e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_pretty_serializes_map() {
        let val = serde_json::json!({"key": "value"});
        let result = json_pretty(&val).unwrap();
        assert!(result.contains("\"key\""));
        assert!(result.contains("\"value\""));
    }

    #[test]
    fn exit_codes_are_distinct() {
        assert_ne!(EXIT_SUCCESS, EXIT_FAILURE);
        assert_ne!(EXIT_FAILURE, EXIT_MANIFEST_ERROR);
        assert_ne!(EXIT_MANIFEST_ERROR, EXIT_CONTEXT_ERROR);
    }

    #[test]
    fn load_resources_prefixes_manifest_errors() {
        let err = load_resources(&[PathBuf::from("/nonexistent/fleet.yaml")]).unwrap_err();
        assert!(err.starts_with("manifest error:"), "{err}");
    }

    #[test]
    fn write_atomic_replaces_file() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("compose.yaml");
        std::fs::write(&dest, "old").unwrap();
        write_atomic(&dest, "services: {}\n").unwrap();
        assert_eq!(std::fs::read_to_string(&dest).unwrap(), "services: {}\n");
    }

    #[test]
    fn status_label_mentions_state() {
        assert!(status_label(true).contains("ok"));
        assert!(status_label(false).contains("unresolved"));
    }
}
