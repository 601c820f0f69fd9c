//! Blob Repository Port - 音频字节持久化
//!
//! 单一托管目录下按文件名寻址的字节存取，具体实现在 infrastructure/storage 层

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

/// Blob 存取错误
#[derive(Debug, Error)]
pub enum BlobError {
    #[error("Blob not found: {0}")]
    NotFound(String),

    /// 含路径分隔符或 `..` 的文件名，越出托管目录
    #[error("Invalid blob filename: {0}")]
    InvalidFilename(String),

    #[error("IO error: {0}")]
    Io(String),
}

/// Blob Repository Port
///
/// 文件名一律由 Orchestrator 生成，不接受外部路径；
/// 托管目录在进程启动时幂等创建
#[async_trait]
pub trait BlobRepositoryPort: Send + Sync {
    /// 解析文件名在托管目录下的完整路径
    fn blob_path(&self, filename: &str) -> PathBuf;

    /// 写入字节，返回落盘路径（用于 prompt 临时文件）
    async fn write(&self, filename: &str, data: &[u8]) -> Result<PathBuf, BlobError>;

    /// 读取全部字节
    async fn read(&self, filename: &str) -> Result<Vec<u8>, BlobError>;

    /// 删除 blob；文件不存在或删除失败返回 false，不抛错
    ///
    /// 调用方不得将 false 视为整体删除流程的致命错误
    async fn delete(&self, filename: &str) -> bool;

    /// 检查 blob 是否存在
    async fn exists(&self, filename: &str) -> bool;
}
