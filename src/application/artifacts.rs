//! Artifact Service - 产物生命周期
//!
//! 在 Store（元数据）与 Blob Repository（字节）之上编排产物的
//! 注册、查询与删除。删除是显式的两步 saga：先删 blob 再删元数据，
//! 两步各自幂等，中间崩溃留下的不一致状态可通过重试收敛

use std::sync::Arc;

use crate::application::ports::{ArtifactStorePort, BlobError, BlobRepositoryPort};
use crate::domain::synthesis::{AudioArtifact, NewAudioArtifact};

/// 产物服务
pub struct ArtifactService {
    store: Arc<dyn ArtifactStorePort>,
    blobs: Arc<dyn BlobRepositoryPort>,
}

impl ArtifactService {
    pub fn new(store: Arc<dyn ArtifactStorePort>, blobs: Arc<dyn BlobRepositoryPort>) -> Self {
        Self { store, blobs }
    }

    /// 注册合成产物，分配 id
    pub fn register(&self, artifact: NewAudioArtifact) -> AudioArtifact {
        let artifact = self.store.create(artifact);
        tracing::info!(
            artifact_id = %artifact.id,
            filename = %artifact.filename,
            "Artifact registered"
        );
        artifact
    }

    /// 全量列表，created_at 降序
    pub fn list(&self) -> Vec<AudioArtifact> {
        self.store.list()
    }

    /// 按 id 查询元数据
    pub fn get(&self, id: &str) -> Option<AudioArtifact> {
        self.store.get(id)
    }

    /// 读取产物的音频字节
    ///
    /// 元数据存在但 blob 缺失（悬挂条目）时返回 NotFound，不视为异常
    pub async fn read_blob(&self, filename: &str) -> Result<Vec<u8>, BlobError> {
        self.blobs.read(filename).await
    }

    /// 删除产物：blob 在前，元数据在后
    ///
    /// blob 删除失败（含文件已不存在）不阻断元数据删除；
    /// 返回值只反映元数据条目是否存在并被移除
    pub async fn delete(&self, id: &str) -> bool {
        let Some(artifact) = self.store.get(id) else {
            return false;
        };

        if !self.blobs.delete(&artifact.filename).await {
            tracing::warn!(
                artifact_id = %id,
                filename = %artifact.filename,
                "Blob missing or not removable, deleting metadata anyway"
            );
        }

        let deleted = self.store.delete(id);
        if deleted {
            tracing::info!(artifact_id = %id, "Artifact deleted");
        }
        deleted
    }

    /// 清空全部产物，返回删除数量
    pub async fn clear(&self) -> u64 {
        let artifacts = self.store.list();
        let mut deleted = 0u64;

        for artifact in artifacts {
            if self.delete(&artifact.id).await {
                deleted += 1;
            }
        }

        tracing::info!(deleted = deleted, "All artifacts cleared");
        deleted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::path::PathBuf;
    use tempfile::tempdir;

    use crate::domain::synthesis::{OutputFormat, SynthesisParameters};
    use crate::infrastructure::memory::InMemoryArtifactStore;
    use crate::infrastructure::storage::FileBlobRepository;

    fn new_artifact(filename: &str, file_path: PathBuf) -> NewAudioArtifact {
        NewAudioArtifact {
            title: "测试".to_string(),
            text: "测试".to_string(),
            model_path: "/models/tts".to_string(),
            parameters: SynthesisParameters {
                speed: 1.0,
                stream: false,
                seed: 0,
            },
            filename: filename.to_string(),
            format: OutputFormat::Wav,
            duration: 1.0,
            created_at: Utc::now(),
            file_size: 4,
            file_path,
        }
    }

    async fn service_with_dir(dir: &std::path::Path) -> ArtifactService {
        let store = Arc::new(InMemoryArtifactStore::new());
        let blobs = Arc::new(FileBlobRepository::new(dir).await.unwrap());
        ArtifactService::new(store, blobs)
    }

    #[tokio::test]
    async fn test_delete_removes_blob_then_metadata() {
        let dir = tempdir().unwrap();
        let service = service_with_dir(dir.path()).await;

        let path = service.blobs.write("audio_1_abc.wav", b"data").await.unwrap();
        let artifact = service.register(new_artifact("audio_1_abc.wav", path));

        assert!(service.delete(&artifact.id).await);
        assert!(service.get(&artifact.id).is_none());
        assert!(matches!(
            service.read_blob("audio_1_abc.wav").await,
            Err(BlobError::NotFound(_))
        ));

        // 第二次删除：条目已不存在
        assert!(!service.delete(&artifact.id).await);
    }

    #[tokio::test]
    async fn test_delete_tolerates_missing_blob() {
        let dir = tempdir().unwrap();
        let service = service_with_dir(dir.path()).await;

        // 悬挂元数据：blob 从未写入
        let path = dir.path().join("audio_2_def.wav");
        let artifact = service.register(new_artifact("audio_2_def.wav", path));

        // blob 删除失败不阻断元数据删除
        assert!(service.delete(&artifact.id).await);
        assert!(service.get(&artifact.id).is_none());
    }

    #[tokio::test]
    async fn test_clear_deletes_everything() {
        let dir = tempdir().unwrap();
        let service = service_with_dir(dir.path()).await;

        for i in 0..3 {
            let filename = format!("audio_{}_x.wav", i);
            let path = service.blobs.write(&filename, b"data").await.unwrap();
            service.register(new_artifact(&filename, path));
        }

        assert_eq!(service.clear().await, 3);
        assert!(service.list().is_empty());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_read_blob_for_dangling_entry_is_not_found() {
        let dir = tempdir().unwrap();
        let service = service_with_dir(dir.path()).await;

        let path = dir.path().join("audio_3_ghi.wav");
        let artifact = service.register(new_artifact("audio_3_ghi.wav", path));

        let stored = service.get(&artifact.id).unwrap();
        assert!(matches!(
            service.read_blob(&stored.filename).await,
            Err(BlobError::NotFound(_))
        ));
    }
}
