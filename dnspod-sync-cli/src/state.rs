//! JSON state and desired-spec files

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use anyhow::{Context, Result};
use dnspod_sync_core::types::{RecordResource, RecordSpec};

/// Read a state file; `None` when it does not exist yet.
pub fn load_state(path: &Path) -> Result<Option<RecordResource>> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to read state {}", path.display()));
        }
    };
    let resource = serde_json::from_str(&text)
        .with_context(|| format!("Invalid state file {}", path.display()))?;
    Ok(Some(resource))
}

/// Write `resource` pretty-printed, replacing the file atomically.
pub fn save_state(path: &Path, resource: &RecordResource) -> Result<()> {
    let mut json = serde_json::to_string_pretty(resource).context("Failed to encode state")?;
    json.push('\n');

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    fs::write(&tmp, json).with_context(|| format!("Failed to write {}", path.display()))?;
    fs::rename(&tmp, path).with_context(|| format!("Failed to replace {}", path.display()))?;
    tracing::debug!("State saved to {}", path.display());
    Ok(())
}

pub fn load_spec(path: &Path) -> Result<RecordSpec> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read desired spec {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Invalid record spec {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use dnspod_sync_core::types::RecordType;

    #[test]
    fn missing_state_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_state(&dir.path().join("none.json")).unwrap().is_none());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("www.json");
        let resource = RecordResource {
            id: Some("100:55".to_string()),
            spec: RecordSpec::new("100", "www", RecordType::A, "1.2.3.4"),
        };

        save_state(&path, &resource).unwrap();
        assert_eq!(load_state(&path).unwrap(), Some(resource));

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"id\": \"100:55\""));
        assert!(!dir.path().join("www.json.tmp").exists());
    }

    #[test]
    fn spec_file_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mail.json");
        fs::write(
            &path,
            r#"{"domain_id":"100","sub_domain":"mail","record_type":"MX","value":"mx.example.com","mx":10}"#,
        )
        .unwrap();

        let spec = load_spec(&path).unwrap();
        assert_eq!(spec.mx, Some(10));
        assert_eq!(spec.ttl, Some(600));
        assert_eq!(spec.record_line, "默认");
    }

    #[test]
    fn corrupt_state_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{").unwrap();
        assert!(load_state(&path).is_err());
    }
}
