//! Local filesystem storage implementation.
//!
//! Keeps the watermark as a pretty-printed JSON file under the storage
//! directory. Writes go to a temp file first and are then renamed into place.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::models::{Notice, WatermarkRecord};
use crate::storage::WatermarkStore;

const DEFAULT_WATERMARK_KEY: &str = "lastId.json";

/// Local filesystem storage backend.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root_dir: PathBuf,
    watermark_key: String,
}

impl LocalStorage {
    /// Create a new LocalStorage rooted at the given directory.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
            watermark_key: DEFAULT_WATERMARK_KEY.to_string(),
        }
    }

    /// Use a different file name for the watermark.
    pub fn with_watermark_key(mut self, key: impl Into<String>) -> Self {
        self.watermark_key = key.into();
        self
    }

    /// Full path of the watermark file.
    pub fn watermark_path(&self) -> PathBuf {
        self.path(&self.watermark_key)
    }

    /// Get the full path for a relative key.
    fn path(&self, key: &str) -> PathBuf {
        self.root_dir.join(key)
    }

    /// Ensure parent directory exists.
    async fn ensure_dir(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, key: &str, bytes: &[u8]) -> Result<()> {
        let path = self.path(key);
        self.ensure_dir(&path).await?;

        let tmp = path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }

    /// Write JSON data.
    async fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(value)?;
        self.write_bytes(key, &bytes).await
    }

    /// Read bytes, returning None if file doesn't exist.
    async fn read_bytes(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path(key);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }

    /// Read JSON data.
    async fn read_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.read_bytes(key).await? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl WatermarkStore for LocalStorage {
    async fn load_watermark(&self) -> Option<Notice> {
        match self.read_json::<WatermarkRecord>(&self.watermark_key).await {
            Ok(Some(record)) => record.notice,
            Ok(None) => {
                log::info!("No watermark found at {}", self.watermark_path().display());
                None
            }
            Err(e) => {
                log::warn!(
                    "Failed to read watermark {}: {}. Treating as no history.",
                    self.watermark_path().display(),
                    e
                );
                None
            }
        }
    }

    async fn save_watermark(&self, notice: &Notice) -> Result<()> {
        let record = WatermarkRecord::new(notice.clone());
        self.write_json(&self.watermark_key, &record).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NoticeInfo;
    use tempfile::TempDir;

    fn notice(id: &str) -> Notice {
        Notice {
            id: id.to_string(),
            title: "장학금 신청 안내".to_string(),
            link: format!("https://mirae.yonsei.ac.kr/bbs/wj/1415/{id}/artclView.do?layout=unknown"),
            info: NoticeInfo {
                type_cl: "장학".to_string(),
                date: "2026.02.02".to_string(),
                date_last: String::new(),
            },
        }
    }

    #[tokio::test]
    async fn test_write_and_read() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path());

        storage.write_bytes("test.txt", b"hello").await.unwrap();
        let data = storage.read_bytes("test.txt").await.unwrap();
        assert_eq!(data, Some(b"hello".to_vec()));
    }

    #[tokio::test]
    async fn test_missing_watermark_is_none() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path());

        assert!(storage.load_watermark().await.is_none());
    }

    #[tokio::test]
    async fn test_save_then_load_watermark() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path());

        storage.save_watermark(&notice("103")).await.unwrap();
        assert_eq!(storage.load_watermark().await, Some(notice("103")));

        storage.save_watermark(&notice("104")).await.unwrap();
        assert_eq!(storage.load_watermark().await.unwrap().id, "104");
    }

    #[tokio::test]
    async fn test_watermark_file_format() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path());
        storage.save_watermark(&notice("103")).await.unwrap();

        let raw = std::fs::read_to_string(tmp.path().join("lastId.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["Notice"]["id"], "103");
        assert_eq!(value["Notice"]["info"]["typeCL"], "장학");
        assert_eq!(value["Notice"]["info"]["dateLast"], "");
        assert!(!tmp.path().join("lastId.tmp").exists());
    }

    #[tokio::test]
    async fn test_corrupt_watermark_is_none() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("lastId.json"), "{ not json").unwrap();
        let storage = LocalStorage::new(tmp.path());

        assert!(storage.load_watermark().await.is_none());
    }

    #[tokio::test]
    async fn test_null_notice_is_none() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("lastId.json"), r#"{ "Notice": null }"#).unwrap();
        let storage = LocalStorage::new(tmp.path());

        assert!(storage.load_watermark().await.is_none());
    }

    #[tokio::test]
    async fn test_custom_key_creates_parent_dir() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path()).with_watermark_key("state/last.json");

        storage.save_watermark(&notice("7")).await.unwrap();
        assert!(tmp.path().join("state/last.json").exists());
        assert_eq!(storage.load_watermark().await.unwrap().id, "7");
    }
}
