//! The collected-record store.
//!
//! A store is a single JSON file holding an ordered array of
//! [`CollectedRecord`] objects. Saving always rewrites the whole file.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use handsign_common::error::{HandsignError, HandsignResult};

use crate::observation::CollectedRecord;

/// Write `records` to `path`, replacing any previous content.
///
/// The records go to a staging file next to `path` that is renamed over it
/// once complete, so a failed save leaves the previous store intact.
pub fn save_records(path: impl AsRef<Path>, records: &[CollectedRecord]) -> HandsignResult<()> {
    let path = path.as_ref();
    let persist_err = |source: std::io::Error| HandsignError::Persist {
        path: path.to_path_buf(),
        records: records.len(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(persist_err)?;
    }

    let staging = staging_path(path).map_err(persist_err)?;
    let result = write_staged(&staging, records).and_then(|()| std::fs::rename(&staging, path));
    if let Err(e) = result {
        let _ = std::fs::remove_file(&staging);
        return Err(persist_err(e));
    }

    tracing::debug!(path = %path.display(), records = records.len(), "Store written");
    Ok(())
}

fn staging_path(path: &Path) -> std::io::Result<PathBuf> {
    let mut name = path
        .file_name()
        .ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "store path has no file name")
        })?
        .to_os_string();
    name.push(".tmp");
    Ok(path.with_file_name(name))
}

fn write_staged(staging: &Path, records: &[CollectedRecord]) -> std::io::Result<()> {
    let mut writer = BufWriter::new(File::create(staging)?);
    serde_json::to_writer_pretty(&mut writer, records)?;
    let file = writer.into_inner().map_err(|e| e.into_error())?;
    file.sync_all()
}

/// Read every record from the store at `path`.
pub fn load_records(path: impl AsRef<Path>) -> HandsignResult<Vec<CollectedRecord>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| HandsignError::from_read(path, e))?;
    parse_records(&content).map_err(|e| HandsignError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Parse store content.
pub fn parse_records(json: &str) -> Result<Vec<CollectedRecord>, serde_json::Error> {
    serde_json::from_str(json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_records_accepts_optional_gesture() {
        let landmark = r#"{"x":0.5,"y":0.25,"z":-0.01}"#;
        let landmarks = vec![landmark; 21].join(",");
        let json = format!(
            r#"[
                {{"hand_index":0,"landmarks":[{landmarks}],"timestamp":1.5}},
                {{"hand_index":1,"landmarks":[{landmarks}],"timestamp":1.5,"gesture":"other"}}
            ]"#
        );

        let records = parse_records(&json).unwrap();
        assert_eq!(records.len(), 2);
        assert!(records[0].gesture.is_none());
        assert_eq!(records[1].gesture.as_deref(), Some("other"));
        assert_eq!(records[1].landmarks.landmarks()[20].z, -0.01);
    }

    #[test]
    fn test_parse_records_rejects_short_frame() {
        let json = r#"[{"hand_index":0,"landmarks":[{"x":0.1,"y":0.1,"z":0.0}],"timestamp":0.0}]"#;
        assert!(parse_records(json).is_err());
    }

    #[test]
    fn test_load_missing_store_is_not_found() {
        let path = std::env::temp_dir().join("handsign_missing_store/hand_data.json");
        assert!(matches!(
            load_records(&path),
            Err(HandsignError::NotFound { .. })
        ));
    }

    #[test]
    fn test_load_malformed_store_is_parse_error() {
        let dir = std::env::temp_dir().join("handsign_test_malformed_store");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("hand_data.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            load_records(&path),
            Err(HandsignError::Parse { .. })
        ));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_failed_save_keeps_previous_store() {
        use crate::landmark::{Landmark, LandmarkFrame, LANDMARK_COUNT};

        let dir = std::env::temp_dir().join("handsign_test_store_failed_save");
        let _ = std::fs::remove_dir_all(&dir);
        let path = dir.join("hand_data.json");

        let record = CollectedRecord {
            hand_index: 0,
            landmarks: LandmarkFrame::from_array([Landmark::new(0.1, 0.2, 0.3); LANDMARK_COUNT]),
            timestamp: 1.0,
            gesture: None,
        };
        save_records(&path, &[record.clone(), record.clone()]).unwrap();

        // block the staging file so the next save cannot be written
        let staging = staging_path(&path).unwrap();
        std::fs::create_dir_all(&staging).unwrap();

        match save_records(&path, &[record.clone()]) {
            Err(HandsignError::Persist { records, .. }) => assert_eq!(records, 1),
            other => panic!("expected persist error, got {other:?}"),
        }
        assert_eq!(load_records(&path).unwrap(), vec![record.clone(), record]);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_successful_save_leaves_no_staging_file() {
        let dir = std::env::temp_dir().join("handsign_test_store_staging_cleanup");
        let _ = std::fs::remove_dir_all(&dir);
        let path = dir.join("hand_data.json");

        save_records(&path, &[]).unwrap();
        assert!(path.exists());
        assert!(!staging_path(&path).unwrap().exists());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_save_into_directory_path_fails_with_record_count() {
        let dir = std::env::temp_dir().join("handsign_test_store_is_dir");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();

        match save_records(&dir, &[]) {
            Err(HandsignError::Persist { records, .. }) => assert_eq!(records, 0),
            other => panic!("expected persist error, got {other:?}"),
        }

        std::fs::remove_dir_all(&dir).ok();
    }
}
