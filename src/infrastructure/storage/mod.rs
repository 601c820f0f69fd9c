//! Storage Layer - Blob Persistence
//!
//! 实现 BlobRepositoryPort 的文件系统存储

mod file_blob_repository;

pub use file_blob_repository::FileBlobRepository;
