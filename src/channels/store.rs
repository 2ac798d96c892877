//! JSON file holding the rig → channel id mapping.
//!
//! The file is a flat object, `{"gastown": 123456789012345678}`. Ids written
//! as strings are accepted on load. A missing file is an empty mapping; an
//! unreadable or unparsable one is an error, never an empty mapping.

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serenity::model::id::ChannelId;
use tracing::debug;

use crate::error::{AppError, AppResult};

pub type Mappings = BTreeMap<String, ChannelId>;

#[derive(Deserialize)]
#[serde(untagged)]
enum RawChannelId {
    Number(u64),
    Text(String),
}

impl RawChannelId {
    fn into_channel_id(self, rig: &str) -> Result<ChannelId, serde_json::Error> {
        let id = match self {
            RawChannelId::Number(id) => Some(id),
            RawChannelId::Text(text) => text.trim().parse().ok(),
        };
        id.filter(|id| *id != 0).map(ChannelId::new).ok_or_else(|| {
            <serde_json::Error as serde::de::Error>::custom(format!(
                "invalid channel id for rig {rig:?}"
            ))
        })
    }
}

#[derive(Debug, Clone)]
pub struct MappingFile {
    path: PathBuf,
}

impl MappingFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn load(&self) -> AppResult<Mappings> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "🗂️ No mapping file yet, starting empty");
                return Ok(Mappings::new());
            }
            Err(source) => return Err(self.persistence_error(source)),
        };

        let raw: BTreeMap<String, RawChannelId> =
            serde_json::from_slice(&bytes).map_err(|source| self.corrupt_error(source))?;

        raw.into_iter()
            .map(|(rig, id)| -> AppResult<(String, ChannelId)> {
                let id = id
                    .into_channel_id(&rig)
                    .map_err(|source| self.corrupt_error(source))?;
                Ok((rig, id))
            })
            .collect()
    }

    /// Rewrites the whole file through a sibling temp file and a rename.
    pub async fn save(&self, mappings: &Mappings) -> AppResult<()> {
        let plain: BTreeMap<&str, u64> = mappings
            .iter()
            .map(|(rig, id)| (rig.as_str(), id.get()))
            .collect();

        let mut contents = serde_json::to_vec_pretty(&plain)
            .map_err(|e| self.persistence_error(std::io::Error::other(e)))?;
        contents.push(b'\n');

        let tmp = self.tmp_path();
        tokio::fs::write(&tmp, &contents)
            .await
            .map_err(|source| self.persistence_error(source))?;
        if let Err(source) = tokio::fs::rename(&tmp, &self.path).await {
            // Best effort; the rename error is what gets reported.
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(self.persistence_error(source));
        }

        debug!(path = %self.path.display(), count = mappings.len(), "🗂️ Mappings saved");
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name: OsString = self
            .path
            .file_name()
            .map(ToOwned::to_owned)
            .unwrap_or_else(|| OsString::from("channel_mappings"));
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn persistence_error(&self, source: std::io::Error) -> AppError {
        AppError::Persistence {
            path: self.path.clone(),
            source,
        }
    }

    fn corrupt_error(&self, source: serde_json::Error) -> AppError {
        AppError::CorruptMappings {
            path: self.path.clone(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Mappings {
        [
            ("discord_bot".to_string(), ChannelId::new(1_234_567_890_123_456_789)),
            ("gastown".to_string(), ChannelId::new(42)),
        ]
        .into_iter()
        .collect()
    }

    #[tokio::test]
    async fn missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let file = MappingFile::new(dir.path().join("channel_mappings.json"));
        assert!(file.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn save_then_load_yields_same_mappings() {
        let dir = tempfile::tempdir().unwrap();
        let file = MappingFile::new(dir.path().join("channel_mappings.json"));

        file.save(&sample()).await.unwrap();
        assert_eq!(file.load().await.unwrap(), sample());
        assert!(!file.tmp_path().exists());
    }

    #[tokio::test]
    async fn file_is_flat_human_readable_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("channel_mappings.json");
        MappingFile::new(&path).save(&sample()).await.unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            text,
            "{\n  \"discord_bot\": 1234567890123456789,\n  \"gastown\": 42\n}\n"
        );
    }

    #[tokio::test]
    async fn accepts_string_ids() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("channel_mappings.json");
        std::fs::write(&path, r#"{"gastown": "42"}"#).unwrap();

        let mappings = MappingFile::new(&path).load().await.unwrap();
        assert_eq!(mappings.get("gastown"), Some(&ChannelId::new(42)));
    }

    #[tokio::test]
    async fn corrupt_file_fails_loudly() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("channel_mappings.json");

        for contents in ["{not json", r#"["gastown"]"#, r#"{"gastown": 0}"#, r#"{"gastown": "abc"}"#] {
            std::fs::write(&path, contents).unwrap();
            let err = MappingFile::new(&path).load().await.unwrap_err();
            assert!(
                matches!(err, AppError::CorruptMappings { .. }),
                "unexpected error for {contents:?}: {err}"
            );
            // Content is left alone for a human to fix.
            assert_eq!(std::fs::read_to_string(&path).unwrap(), contents);
        }
    }

    #[tokio::test]
    async fn failed_rename_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("channel_mappings.json");
        // A non-empty directory in the way makes the rename fail.
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("keep"), "").unwrap();
        let file = MappingFile::new(&path);

        let err = file.save(&sample()).await.unwrap_err();
        assert!(matches!(err, AppError::Persistence { .. }));
        assert!(!file.tmp_path().exists());
        assert!(path.is_dir());
    }

    #[tokio::test]
    async fn unreadable_path_is_a_persistence_error() {
        let dir = tempfile::tempdir().unwrap();
        // A directory can't be read as a file.
        let err = MappingFile::new(dir.path()).load().await.unwrap_err();
        assert!(matches!(err, AppError::Persistence { .. }));
    }
}
