//! File Blob Repository - 文件系统音频存储实现
//!
//! 实现 BlobRepositoryPort trait

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::application::ports::{BlobError, BlobRepositoryPort};

/// 文件系统 blob 存储
///
/// 所有文件位于单一托管目录，最终产物与 prompt 临时文件仅以
/// 文件名前缀区分（audio_ / prompt_）
pub struct FileBlobRepository {
    /// 托管目录（绝对路径）
    base_dir: PathBuf,
}

impl FileBlobRepository {
    /// 创建存储，目录不存在时幂等创建
    pub async fn new(base_dir: impl AsRef<Path>) -> Result<Self, BlobError> {
        let base_dir = base_dir.as_ref().to_path_buf();

        fs::create_dir_all(&base_dir)
            .await
            .map_err(|e| BlobError::Io(e.to_string()))?;

        // 规范化为绝对路径，产物元数据中的 file_path 依赖于此
        let base_dir = fs::canonicalize(&base_dir)
            .await
            .map_err(|e| BlobError::Io(e.to_string()))?;

        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// 文件名只允许托管目录的直接子项
    fn check_filename(filename: &str) -> Result<(), BlobError> {
        if filename.is_empty()
            || filename.contains('/')
            || filename.contains('\\')
            || filename.contains("..")
        {
            return Err(BlobError::InvalidFilename(filename.to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl BlobRepositoryPort for FileBlobRepository {
    fn blob_path(&self, filename: &str) -> PathBuf {
        self.base_dir.join(filename)
    }

    async fn write(&self, filename: &str, data: &[u8]) -> Result<PathBuf, BlobError> {
        Self::check_filename(filename)?;
        let path = self.blob_path(filename);

        fs::write(&path, data)
            .await
            .map_err(|e| BlobError::Io(e.to_string()))?;

        tracing::debug!(filename = %filename, size = data.len(), "Blob written");
        Ok(path)
    }

    async fn read(&self, filename: &str) -> Result<Vec<u8>, BlobError> {
        if Self::check_filename(filename).is_err() {
            return Err(BlobError::NotFound(filename.to_string()));
        }

        let path = self.blob_path(filename);
        match fs::read(&path).await {
            Ok(data) => Ok(data),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(BlobError::NotFound(filename.to_string()))
            }
            Err(e) => Err(BlobError::Io(e.to_string())),
        }
    }

    async fn delete(&self, filename: &str) -> bool {
        if Self::check_filename(filename).is_err() {
            return false;
        }

        let path = self.blob_path(filename);
        match fs::remove_file(&path).await {
            Ok(()) => {
                tracing::debug!(filename = %filename, "Blob deleted");
                true
            }
            Err(e) => {
                tracing::debug!(filename = %filename, error = %e, "Blob delete failed");
                false
            }
        }
    }

    async fn exists(&self, filename: &str) -> bool {
        if Self::check_filename(filename).is_err() {
            return false;
        }
        fs::metadata(self.blob_path(filename)).await.is_ok()
    }
}
